//! Bindings to the page's GSAP + ScrollTrigger globals and the
//! [`ScrollEngine`] implementation backed by them.

use crate::core::snap::{ScrollEngine, SnapConfig, SnapState};
use crate::error::EffectError;
use js_sys::{Array, Object, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = gsap, js_name = registerPlugin)]
    fn register_plugin(plugin: &JsValue);

    #[wasm_bindgen(js_namespace = ["gsap", "utils"], js_name = toArray)]
    fn to_array(selector: &str) -> Array;

    pub type ScrollTriggerInstance;

    #[wasm_bindgen(method)]
    fn kill(this: &ScrollTriggerInstance);

    #[wasm_bindgen(js_namespace = ScrollTrigger, js_name = create)]
    fn create_trigger(vars: &Object) -> ScrollTriggerInstance;

    #[wasm_bindgen(js_namespace = ScrollTrigger, js_name = maxScroll)]
    fn max_scroll(scroller: &web::Window) -> f64;

    #[wasm_bindgen(js_namespace = ScrollTrigger, js_name = refresh)]
    fn refresh_all();
}

fn global(name: &str) -> Option<JsValue> {
    Reflect::get(&js_sys::global(), &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Fail unless GSAP and ScrollTrigger are loaded, then register the
/// plugins that are present.
pub fn ensure_loaded() -> Result<(), EffectError> {
    global("gsap").ok_or(EffectError::LibraryMissing("gsap"))?;
    let scroll_trigger =
        global("ScrollTrigger").ok_or(EffectError::LibraryMissing("ScrollTrigger"))?;
    register_plugin(&scroll_trigger);
    match global("ScrollToPlugin") {
        Some(scroll_to) => register_plugin(&scroll_to),
        None => log::warn!("[scroll] ScrollToPlugin not loaded; snapping still works"),
    }
    Ok(())
}

fn set(obj: &Object, key: &str, value: impl Into<JsValue>) {
    _ = Reflect::set(obj, &JsValue::from_str(key), &value.into());
}

/// A live ScrollTrigger plus the Rust callback it calls into, if any.
pub struct GsapTrigger {
    instance: ScrollTriggerInstance,
    _snap_to: Option<Closure<dyn FnMut(f64) -> f64>>,
}

pub struct GsapEngine {
    window: web::Window,
    panels: Array,
}

impl GsapEngine {
    pub fn new(window: web::Window, panel_selector: &str) -> Self {
        Self {
            window,
            panels: to_array(panel_selector),
        }
    }

    pub fn panels(&self) -> &Array {
        &self.panels
    }
}

impl ScrollEngine for GsapEngine {
    type Trigger = GsapTrigger;

    fn panel_count(&self) -> usize {
        self.panels.length() as usize
    }

    fn pin_panel(&mut self, index: usize) -> GsapTrigger {
        let vars = Object::new();
        set(&vars, "trigger", self.panels.get(index as u32));
        set(&vars, "start", "top top");
        set(&vars, "pin", true);
        set(&vars, "pinSpacing", false);
        set(&vars, "refreshPriority", -1);
        set(&vars, "anticipatePin", 1);
        GsapTrigger {
            instance: create_trigger(&vars),
            _snap_to: None,
        }
    }

    fn create_snap(&mut self, state: Rc<RefCell<SnapState>>, config: &SnapConfig) -> GsapTrigger {
        let panel_count = self.panel_count();
        let snap_config = config.clone();
        let snap_to = Closure::wrap(Box::new(move |progress: f64| {
            state.borrow_mut().snap_to(progress, panel_count, &snap_config)
        }) as Box<dyn FnMut(f64) -> f64>);

        let duration = Object::new();
        set(&duration, "min", config.duration_min_sec);
        set(&duration, "max", config.duration_max_sec);

        let snap = Object::new();
        set(&snap, "snapTo", snap_to.as_ref().clone());
        set(&snap, "duration", duration);
        set(&snap, "delay", config.delay_sec);
        set(&snap, "inertia", true);
        set(&snap, "ease", config.ease);

        let vars = Object::new();
        set(&vars, "snap", snap);
        GsapTrigger {
            instance: create_trigger(&vars),
            _snap_to: Some(snap_to),
        }
    }

    fn kill(&mut self, trigger: GsapTrigger) {
        trigger.instance.kill();
    }

    fn max_scroll(&self) -> f64 {
        max_scroll(&self.window)
    }

    fn refresh(&mut self) {
        refresh_all();
    }

    fn scroll_to(&mut self, y: f64) {
        self.window.scroll_to_with_x_and_y(0.0, y);
    }
}
