#![cfg(target_arch = "wasm32")]
use crate::background::BackgroundConfig;
use crate::core::snap::SnapConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod background;
mod constants;
pub mod core;
mod dom;
mod error;
mod frame;
mod gsap;
mod input;
mod render;
pub mod schedule;
mod scroll;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("metaball-web starting");

    let (_, document) = dom::window_document().map_err(|e| JsValue::from_str(&e.to_string()))?;
    dom::when_ready(&document, start_effects);
    Ok(())
}

// Each effect is attempted once; a failure in one is logged and leaves the
// other, and the page, running.
fn start_effects() {
    match scroll::start(SnapConfig::default()) {
        Ok(_) => log::info!("[scroll] snap controller ready"),
        Err(e) => log::error!("[scroll] disabled, native scrolling kept: {:#}", e),
    }

    spawn_local(async move {
        match background::start(BackgroundConfig::default()).await {
            Ok(background) => {
                let viewport = background.context.borrow().gpu.viewport();
                log::info!(
                    "[background] render loop running={} at {}x{}",
                    background.frame_loop.is_running(),
                    viewport.width,
                    viewport.height
                );
            }
            Err(e) => log::error!("[background] disabled: {:#}", e),
        }
    });
}
