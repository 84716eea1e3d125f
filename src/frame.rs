use crate::core::{FrameState, MetaballUniforms, ViewportState};
use crate::dom;
use crate::render::GpuState;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Everything the per-frame and resize callbacks touch. Owned by the loop
/// driver; nothing here is global.
pub struct FrameContext {
    pub gpu: GpuState,
    pub canvas: web::HtmlCanvasElement,
    /// Shared with the pointer handlers, which only write the target.
    pub frame: Rc<RefCell<FrameState>>,
    pub start: Instant,
}

impl FrameContext {
    pub fn new(
        gpu: GpuState,
        canvas: web::HtmlCanvasElement,
        frame: Rc<RefCell<FrameState>>,
    ) -> Self {
        Self {
            gpu,
            canvas,
            frame,
            start: Instant::now(),
        }
    }

    /// Advance time and pointer smoothing, upload uniforms and draw.
    pub fn frame(&mut self) {
        let elapsed = self.start.elapsed().as_secs_f32();
        let uniforms = {
            let mut state = self.frame.borrow_mut();
            state.advance(elapsed);
            MetaballUniforms::new(&state, &self.gpu.viewport())
        };

        match self.gpu.render(&uniforms) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[frame] surface lost; reconfiguring");
                self.gpu.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }

    /// Match the canvas to the window and resize the surface to it.
    pub fn resize(&mut self) {
        let (w, h) = dom::sync_canvas_to_window(&self.canvas);
        self.gpu.resize(ViewportState::new(w, h));
    }
}
