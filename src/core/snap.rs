// Section pin/snap heuristic, independent of the page and the scroll
// library. The web layer feeds it resize widths, scroll samples and the
// library's `snapTo` callbacks; everything it needs from the library goes
// through [`ScrollEngine`].

use crate::constants::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    Mobile,
    Desktop,
}

impl LayoutMode {
    #[inline]
    pub fn for_width(width_px: f64) -> Self {
        if width_px <= MOBILE_BREAKPOINT_PX {
            LayoutMode::Mobile
        } else {
            LayoutMode::Desktop
        }
    }

    #[inline]
    pub fn is_desktop(self) -> bool {
        self == LayoutMode::Desktop
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnapConfig {
    pub threshold: f64,
    pub min_section_change: f64,
    pub fast_velocity: f64,
    pub sample_min_ms: f64,
    pub duration_min_sec: f64,
    pub duration_max_sec: f64,
    pub delay_sec: f64,
    pub ease: &'static str,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: SNAP_THRESHOLD,
            min_section_change: SNAP_MIN_SECTION_CHANGE,
            fast_velocity: FAST_SCROLL_VELOCITY,
            sample_min_ms: VELOCITY_SAMPLE_MIN_MS,
            duration_min_sec: SNAP_DURATION_MIN_SEC,
            duration_max_sec: SNAP_DURATION_MAX_SEC,
            delay_sec: SNAP_DELAY_SEC,
            ease: SNAP_EASE,
        }
    }
}

/// Round `value` to the nearest multiple of `1 / count`.
#[inline]
pub fn snap_to_increment(value: f64, count: usize) -> f64 {
    if count == 0 {
        return value;
    }
    let inc = 1.0 / count as f64;
    (value / inc).round() * inc
}

/// Scroll velocity estimate and snap accumulator shared between the scroll
/// sampler, the scroll-stop timer and the library's `snapTo` callback.
#[derive(Clone, Debug)]
pub struct SnapState {
    pub fast_scrolling: bool,
    pub accumulated: f64,
    last_sample_ms: f64,
    last_sample_y: f64,
    last_progress: f64,
    last_snap: f64,
}

impl SnapState {
    pub fn new(now_ms: f64, scroll_y: f64) -> Self {
        Self {
            fast_scrolling: false,
            accumulated: 0.0,
            last_sample_ms: now_ms,
            last_sample_y: scroll_y,
            last_progress: 0.0,
            last_snap: 0.0,
        }
    }

    /// Record a scroll position. Returns the velocity (px/ms) when enough
    /// time has passed since the previous sample to take one.
    pub fn sample(&mut self, now_ms: f64, scroll_y: f64, config: &SnapConfig) -> Option<f64> {
        let dt = now_ms - self.last_sample_ms;
        if dt <= config.sample_min_ms {
            return None;
        }
        let velocity = (scroll_y - self.last_sample_y).abs() / dt;
        self.fast_scrolling = velocity > config.fast_velocity;
        self.last_sample_ms = now_ms;
        self.last_sample_y = scroll_y;
        Some(velocity)
    }

    /// Scroll came to rest.
    pub fn reset_accumulator(&mut self) {
        self.accumulated = 0.0;
    }

    /// A fresh snap trigger starts counting from the top of the page.
    pub fn restart(&mut self) {
        self.accumulated = 0.0;
        self.last_progress = 0.0;
    }

    pub fn last_snap(&self) -> f64 {
        self.last_snap
    }

    /// Decide the snap target for a page progress value in \[0, 1\].
    /// Returning `progress` unchanged declines the snap.
    pub fn snap_to(&mut self, progress: f64, panel_count: usize, config: &SnapConfig) -> f64 {
        if self.fast_scrolling {
            self.accumulated = 0.0;
            return progress;
        }

        self.accumulated += (progress - self.last_progress).abs();
        self.last_progress = progress;
        if self.accumulated < config.threshold {
            return progress;
        }

        let snapped = snap_to_increment(progress, panel_count);
        self.accumulated = 0.0;
        if (snapped - self.last_snap).abs() > config.min_section_change {
            self.last_snap = snapped;
            snapped
        } else {
            progress
        }
    }
}

/// True when `scroll_y` is within the edge margin of either end of the page.
#[inline]
pub fn near_boundary(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> bool {
    scroll_y <= BOUNDARY_MARGIN_PX
        || scroll_y >= scroll_height - viewport_height - BOUNDARY_MARGIN_PX
}

/// Position to pin the page to when it has run past either end.
#[inline]
pub fn boundary_target(scroll_y: f64, max_scroll: f64) -> Option<f64> {
    if scroll_y <= 0.0 {
        Some(0.0)
    } else if scroll_y >= max_scroll {
        Some(max_scroll)
    } else {
        None
    }
}

/// Page geometry captured alongside a scroll sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

/// What the web layer should do after a scroll sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampleOutcome {
    /// A velocity sample was taken; restart the scroll-stop timer.
    pub rearm_stop_timer: bool,
    pub clamped_to: Option<f64>,
}

/// Capabilities the controller needs from the pin/snap library.
pub trait ScrollEngine {
    type Trigger;

    fn panel_count(&self) -> usize;
    /// Pin panel `index` at the top of the viewport while it scrolls past.
    fn pin_panel(&mut self, index: usize) -> Self::Trigger;
    /// Page-level trigger whose snap target comes from `state`.
    fn create_snap(&mut self, state: Rc<RefCell<SnapState>>, config: &SnapConfig) -> Self::Trigger;
    fn kill(&mut self, trigger: Self::Trigger);
    fn max_scroll(&self) -> f64;
    fn refresh(&mut self);
    fn scroll_to(&mut self, y: f64);
}

pub struct SnapController<E: ScrollEngine> {
    engine: E,
    config: SnapConfig,
    mode: LayoutMode,
    pins: Vec<E::Trigger>,
    snap: Option<E::Trigger>,
    state: Rc<RefCell<SnapState>>,
    cached_max_scroll: Option<f64>,
}

impl<E: ScrollEngine> SnapController<E> {
    pub fn new(engine: E, config: SnapConfig, width_px: f64, now_ms: f64, scroll_y: f64) -> Self {
        let mut ctrl = Self {
            engine,
            config,
            mode: LayoutMode::for_width(width_px),
            pins: Vec::new(),
            snap: None,
            state: Rc::new(RefCell::new(SnapState::new(now_ms, scroll_y))),
            cached_max_scroll: None,
        };
        ctrl.rebuild_pins();
        ctrl.update_max_scroll();
        ctrl.rebuild_snap();
        log::info!(
            "[scroll] {} panels, mode={:?}",
            ctrl.engine.panel_count(),
            ctrl.mode
        );
        ctrl
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn state(&self) -> Rc<RefCell<SnapState>> {
        self.state.clone()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    pub fn has_snap(&self) -> bool {
        self.snap.is_some()
    }

    pub fn cached_max_scroll(&self) -> Option<f64> {
        self.cached_max_scroll
    }

    /// Throttled resize. Rebuilds pins and snap and refreshes the library
    /// only when the width crossed the mobile breakpoint. Returns whether it
    /// did.
    pub fn on_resize(&mut self, width_px: f64) -> bool {
        let next = LayoutMode::for_width(width_px);
        let crossed = next != self.mode;
        self.mode = next;
        if crossed {
            log::info!("[scroll] layout mode -> {:?}", next);
            self.rebuild_pins();
            self.engine.refresh();
            self.rebuild_snap();
        }
        self.update_max_scroll();
        crossed
    }

    /// Frame-throttled scroll sample.
    pub fn on_scroll(&mut self, now_ms: f64, metrics: ScrollMetrics) -> SampleOutcome {
        let sampled = self
            .state
            .borrow_mut()
            .sample(now_ms, metrics.scroll_y, &self.config)
            .is_some();

        let mut clamped_to = None;
        if self.mode.is_desktop()
            && near_boundary(metrics.scroll_y, metrics.scroll_height, metrics.viewport_height)
        {
            let max = self.engine.max_scroll();
            if let Some(y) = boundary_target(metrics.scroll_y, max) {
                self.engine.scroll_to(y);
                clamped_to = Some(y);
            }
        }

        SampleOutcome {
            rearm_stop_timer: sampled,
            clamped_to,
        }
    }

    /// Scroll-stop timer fired.
    pub fn on_scroll_stop(&self) {
        self.state.borrow_mut().reset_accumulator();
    }

    fn update_max_scroll(&mut self) {
        if self.mode.is_desktop() {
            self.cached_max_scroll = Some(self.engine.max_scroll() - 1.0);
        }
    }

    fn rebuild_pins(&mut self) {
        for trigger in self.pins.drain(..) {
            self.engine.kill(trigger);
        }
        if self.mode.is_desktop() {
            for i in 0..self.engine.panel_count() {
                let trigger = self.engine.pin_panel(i);
                self.pins.push(trigger);
            }
        }
    }

    fn rebuild_snap(&mut self) {
        if let Some(trigger) = self.snap.take() {
            self.engine.kill(trigger);
        }
        self.state.borrow_mut().restart();
        if self.mode.is_desktop() {
            let trigger = self.engine.create_snap(self.state.clone(), &self.config);
            self.snap = Some(trigger);
        }
    }
}
