use crate::error::EffectError;
use crate::schedule::TimerBackend;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Result<(web::Window, web::Document), EffectError> {
    let window = web::window().ok_or(EffectError::NoWindow)?;
    let document = window.document().ok_or(EffectError::NoWindow)?;
    Ok((window, document))
}

pub fn find_canvas(
    document: &web::Document,
    id: &str,
) -> Result<web::HtmlCanvasElement, EffectError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
        .ok_or_else(|| EffectError::MissingElement(id.to_string()))
}

/// Run `f` once the document has been parsed.
pub fn when_ready(document: &web::Document, f: impl FnOnce() + 'static) {
    if document.ready_state() != "loading" {
        f();
        return;
    }
    let callback = Closure::once_into_js(f);
    let opts = web::AddEventListenerOptions::new();
    opts.set_once(true);
    if let Err(e) = document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        callback.unchecked_ref(),
        &opts,
    ) {
        log::error!("cannot wait for DOMContentLoaded: {:?}", e);
    }
}

#[inline]
pub fn inner_size(window: &web::Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

/// Match the canvas backing store to the window's inner size.
pub fn sync_canvas_to_window(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let Some(window) = web::window() else {
        return (canvas.width(), canvas.height());
    };
    let (w, h) = inner_size(&window);
    let (w_px, h_px) = (w as u32, h as u32);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}

/// Register `handler` for `event` on `target`, leaking the closure for the
/// lifetime of the page.
pub fn add_listener<E, F>(target: &web::EventTarget, event: &str, passive: bool, handler: F)
where
    E: JsCast + wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(passive);
    if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &opts,
    ) {
        log::warn!("addEventListener({}) failed: {:?}", event, e);
    }
    closure.forget();
}

/// `setTimeout`/`clearTimeout` on the window.
#[derive(Clone)]
pub struct WindowTimeout {
    window: web::Window,
}

impl WindowTimeout {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl TimerBackend for WindowTimeout {
    type Handle = i32;

    fn schedule(&self, delay_ms: i32, callback: Box<dyn FnOnce()>) -> Option<i32> {
        let f = Closure::once_into_js(move || callback());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(f.unchecked_ref(), delay_ms)
            .ok()
    }

    fn cancel(&self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}

/// `requestAnimationFrame`/`cancelAnimationFrame`; the delay is ignored.
#[derive(Clone)]
pub struct AnimationFrame {
    window: web::Window,
}

impl AnimationFrame {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl TimerBackend for AnimationFrame {
    type Handle = i32;

    fn schedule(&self, _delay_ms: i32, callback: Box<dyn FnOnce()>) -> Option<i32> {
        let f = Closure::once_into_js(move || callback());
        self.window.request_animation_frame(f.unchecked_ref()).ok()
    }

    fn cancel(&self, handle: i32) {
        _ = self.window.cancel_animation_frame(handle);
    }
}
