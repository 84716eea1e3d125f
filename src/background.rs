use anyhow::Context;
use crate::constants::{CANVAS_ID, CANVAS_RESIZE_DEBOUNCE_MS};
use crate::core::FrameState;
use crate::dom::{self, AnimationFrame, WindowTimeout};
use crate::frame::FrameContext;
use crate::input;
use crate::render::GpuState;
use crate::schedule::{self, Debounce, LoopHandle};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone, Debug)]
pub struct BackgroundConfig {
    pub canvas_id: &'static str,
    pub resize_debounce_ms: i32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            canvas_id: CANVAS_ID,
            resize_debounce_ms: CANVAS_RESIZE_DEBOUNCE_MS,
        }
    }
}

/// Running background effect.
pub struct Background {
    pub frame_loop: LoopHandle,
    pub context: Rc<RefCell<FrameContext>>,
}

/// Acquire the canvas and graphics context, build the pipeline, wire input
/// and resize, and start the frame loop.
pub async fn start(config: BackgroundConfig) -> anyhow::Result<Background> {
    let (window, document) = dom::window_document()?;
    let canvas = dom::find_canvas(&document, config.canvas_id)?;
    let (w, h) = dom::sync_canvas_to_window(&canvas);
    log::info!("[background] canvas {}x{}", w, h);

    let gpu = GpuState::new(&canvas)
        .await
        .context("initialising metaball renderer")?;

    let frame_state = Rc::new(RefCell::new(FrameState::default()));
    input::wire_pointer_handlers(&window, &canvas, frame_state.clone());

    let context = Rc::new(RefCell::new(FrameContext::new(gpu, canvas, frame_state)));
    wire_resize(&window, &context, config.resize_debounce_ms);

    let loop_ctx = context.clone();
    let frame_loop = schedule::start_loop(AnimationFrame::new(window), move || {
        loop_ctx.borrow_mut().frame();
    });

    Ok(Background {
        frame_loop,
        context,
    })
}

fn wire_resize(window: &web::Window, context: &Rc<RefCell<FrameContext>>, delay_ms: i32) {
    let debounce = Debounce::new(WindowTimeout::new(window.clone()), delay_ms);
    let context = context.clone();
    dom::add_listener(window.as_ref(), "resize", true, move |_: web::Event| {
        let context = context.clone();
        debounce.call(move || context.borrow_mut().resize());
    });
}
