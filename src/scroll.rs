use anyhow::Context;
use crate::constants::{
    PANELS_EXPORT_NAME, PANEL_SELECTOR, SCROLL_RESIZE_THROTTLE_MS, SCROLL_STOP_RESET_MS,
};
use crate::core::snap::{ScrollMetrics, SnapConfig, SnapController};
use crate::dom::{self, AnimationFrame, WindowTimeout};
use crate::gsap::{self, GsapEngine};
use crate::schedule::{Debounce, Throttle};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

pub type Controller = Rc<RefCell<SnapController<GsapEngine>>>;

/// Pin `.panel` sections and snap between them on desktop widths.
pub fn start(config: SnapConfig) -> anyhow::Result<Controller> {
    let (window, _document) = dom::window_document()?;
    gsap::ensure_loaded().context("scroll snapping needs GSAP")?;

    let engine = GsapEngine::new(window.clone(), PANEL_SELECTOR);
    if let Err(e) = js_sys::Reflect::set(
        &window,
        &JsValue::from_str(PANELS_EXPORT_NAME),
        engine.panels(),
    ) {
        log::warn!("[scroll] could not export window.{}: {:?}", PANELS_EXPORT_NAME, e);
    }

    let (width, _) = dom::inner_size(&window);
    let controller = Rc::new(RefCell::new(SnapController::new(
        engine,
        config,
        width,
        js_sys::Date::now(),
        window.scroll_y().unwrap_or(0.0),
    )));

    wire_resize(&window, &controller);
    wire_scroll(&window, &controller);
    Ok(controller)
}

fn wire_resize(window: &web::Window, controller: &Controller) {
    let throttle = Throttle::new(WindowTimeout::new(window.clone()), SCROLL_RESIZE_THROTTLE_MS);
    let controller = controller.clone();
    let window_for_size = window.clone();
    dom::add_listener(window.as_ref(), "resize", true, move |_: web::Event| {
        let controller = controller.clone();
        let window = window_for_size.clone();
        throttle.call(move || {
            let (width, _) = dom::inner_size(&window);
            controller.borrow_mut().on_resize(width);
        });
    });
}

fn scroll_metrics(window: &web::Window) -> ScrollMetrics {
    let scroll_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    ScrollMetrics {
        scroll_y: window.scroll_y().unwrap_or(0.0),
        scroll_height,
        viewport_height: dom::inner_size(window).1,
    }
}

fn wire_scroll(window: &web::Window, controller: &Controller) {
    // One pending frame sample; a newer scroll event replaces it.
    let sample = Debounce::new(AnimationFrame::new(window.clone()), 0);
    let scroll_stop = Rc::new(Debounce::new(
        WindowTimeout::new(window.clone()),
        SCROLL_STOP_RESET_MS,
    ));
    let controller = controller.clone();
    let window_for_metrics = window.clone();
    dom::add_listener(window.as_ref(), "scroll", true, move |_: web::Event| {
        let controller = controller.clone();
        let scroll_stop = scroll_stop.clone();
        let window = window_for_metrics.clone();
        sample.call(move || {
            let metrics = scroll_metrics(&window);
            let outcome = controller.borrow_mut().on_scroll(js_sys::Date::now(), metrics);
            if outcome.rearm_stop_timer {
                let controller = controller.clone();
                scroll_stop.call(move || controller.borrow().on_scroll_stop());
            }
        });
    });
}
