use crate::core::{pointer_from_client, FrameState};
use crate::dom;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Pointer target in shader space for a client-space position over `canvas`.
#[inline]
pub fn canvas_pointer(
    canvas: &web::HtmlCanvasElement,
    client_x: f64,
    client_y: f64,
) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    pointer_from_client(
        Vec2::new(client_x as f32, client_y as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

fn set_target(canvas: &web::HtmlCanvasElement, frame: &Rc<RefCell<FrameState>>, x: f64, y: f64) {
    if let Some(p) = canvas_pointer(canvas, x, y) {
        frame.borrow_mut().set_pointer(p);
    }
}

/// Mouse moves anywhere on the page, and touches on the canvas, steer the
/// pointer target. Touch handlers swallow the default scroll on the canvas
/// only.
pub fn wire_pointer_handlers(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    frame: Rc<RefCell<FrameState>>,
) {
    let targets: [&web::EventTarget; 2] = [window.as_ref(), canvas.as_ref()];
    for target in targets {
        let canvas = canvas.clone();
        let frame = frame.clone();
        dom::add_listener(target, "mousemove", true, move |ev: web::MouseEvent| {
            set_target(&canvas, &frame, ev.client_x() as f64, ev.client_y() as f64);
        });
    }

    for event in ["touchmove", "touchstart"] {
        let canvas_for_touch = canvas.clone();
        let frame = frame.clone();
        dom::add_listener(canvas.as_ref(), event, false, move |ev: web::TouchEvent| {
            ev.prevent_default();
            if let Some(touch) = ev.touches().get(0) {
                set_target(
                    &canvas_for_touch,
                    &frame,
                    touch.client_x() as f64,
                    touch.client_y() as f64,
                );
            }
        });
    }
}
