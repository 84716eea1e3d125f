// Host-side tests for the section pin/snap controller.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod snap {
    include!("../src/core/snap.rs");
}

use constants::*;
use snap::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
enum FakeTrigger {
    Pin(usize, u32),
    Snap(u32),
}

/// Records what the controller asks of the scroll library.
#[derive(Default)]
struct FakeEngine {
    panels: usize,
    max_scroll: f64,
    next_id: u32,
    live: Vec<FakeTrigger>,
    pins_created: u32,
    snaps_created: u32,
    kills: u32,
    refreshes: u32,
    scrolled_to: Vec<f64>,
    snap_state: Option<Rc<RefCell<SnapState>>>,
}

impl FakeEngine {
    fn new(panels: usize, max_scroll: f64) -> Self {
        Self {
            panels,
            max_scroll,
            ..Default::default()
        }
    }

    fn live_pins(&self) -> usize {
        self.live
            .iter()
            .filter(|t| matches!(t, FakeTrigger::Pin(..)))
            .count()
    }

    fn live_snaps(&self) -> usize {
        self.live
            .iter()
            .filter(|t| matches!(t, FakeTrigger::Snap(_)))
            .count()
    }
}

impl ScrollEngine for FakeEngine {
    type Trigger = FakeTrigger;

    fn panel_count(&self) -> usize {
        self.panels
    }

    fn pin_panel(&mut self, index: usize) -> FakeTrigger {
        self.next_id += 1;
        self.pins_created += 1;
        let t = FakeTrigger::Pin(index, self.next_id);
        self.live.push(t);
        t
    }

    fn create_snap(&mut self, state: Rc<RefCell<SnapState>>, _config: &SnapConfig) -> FakeTrigger {
        self.next_id += 1;
        self.snaps_created += 1;
        self.snap_state = Some(state);
        let t = FakeTrigger::Snap(self.next_id);
        self.live.push(t);
        t
    }

    fn kill(&mut self, trigger: FakeTrigger) {
        self.kills += 1;
        self.live.retain(|t| *t != trigger);
    }

    fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }

    fn scroll_to(&mut self, y: f64) {
        self.scrolled_to.push(y);
    }
}

const DESKTOP: f64 = 1280.0;
const MOBILE: f64 = 600.0;

fn desktop(panels: usize) -> SnapController<FakeEngine> {
    SnapController::new(
        FakeEngine::new(panels, 4000.0),
        SnapConfig::default(),
        DESKTOP,
        0.0,
        0.0,
    )
}

fn metrics(scroll_y: f64) -> ScrollMetrics {
    ScrollMetrics {
        scroll_y,
        scroll_height: 5000.0,
        viewport_height: 1000.0,
    }
}

#[test]
fn breakpoint_is_inclusive_on_the_mobile_side() {
    assert_eq!(LayoutMode::for_width(MOBILE_BREAKPOINT_PX), LayoutMode::Mobile);
    assert_eq!(LayoutMode::for_width(MOBILE_BREAKPOINT_PX + 1.0), LayoutMode::Desktop);
    assert_eq!(LayoutMode::for_width(320.0), LayoutMode::Mobile);
}

#[test]
fn increments_round_to_nearest_panel() {
    assert_eq!(snap_to_increment(0.0, 4), 0.0);
    assert_eq!(snap_to_increment(0.3, 4), 0.25);
    assert_eq!(snap_to_increment(0.4, 4), 0.5);
    assert_eq!(snap_to_increment(1.0, 4), 1.0);
    assert_eq!(snap_to_increment(0.37, 0), 0.37);
}

#[test]
fn small_moves_do_not_snap() {
    let cfg = SnapConfig::default();
    let mut s = SnapState::new(0.0, 0.0);
    assert_eq!(s.snap_to(0.1, 4, &cfg), 0.1);
    assert_eq!(s.snap_to(0.2, 4, &cfg), 0.2);
    assert_eq!(s.snap_to(0.3, 4, &cfg), 0.3);
    assert!(s.accumulated < cfg.threshold);
    assert_eq!(s.last_snap(), 0.0);
}

#[test]
fn accumulated_motion_snaps_to_nearest_section() {
    let cfg = SnapConfig::default();
    let mut s = SnapState::new(0.0, 0.0);
    assert_eq!(s.snap_to(0.2, 4, &cfg), 0.2);
    let snapped = s.snap_to(0.4, 4, &cfg);
    assert_eq!(snapped, 0.5);
    assert_eq!(s.last_snap(), 0.5);
    assert_eq!(s.accumulated, 0.0);
}

#[test]
fn snap_to_the_same_section_is_declined() {
    let cfg = SnapConfig::default();
    let mut s = SnapState::new(0.0, 0.0);
    assert_eq!(s.snap_to(0.5, 4, &cfg), 0.5);
    assert_eq!(s.last_snap(), 0.5);

    // Wander far enough to pass the threshold but land on the same section.
    assert_eq!(s.snap_to(0.3, 4, &cfg), 0.3);
    let back = s.snap_to(0.55, 4, &cfg);
    assert_eq!(back, 0.55);
    assert_eq!(s.last_snap(), 0.5);
    assert_eq!(s.accumulated, 0.0);
}

#[test]
fn fast_scrolling_vetoes_snapping() {
    let cfg = SnapConfig::default();
    let mut s = SnapState::new(0.0, 0.0);
    // 1000px in 100ms = 10px/ms.
    assert_eq!(s.sample(100.0, 1000.0, &cfg), Some(10.0));
    assert!(s.fast_scrolling);
    assert_eq!(s.snap_to(0.9, 4, &cfg), 0.9);
    assert_eq!(s.accumulated, 0.0);
    assert_eq!(s.last_snap(), 0.0);
}

#[test]
fn samples_closer_than_a_frame_are_ignored() {
    let cfg = SnapConfig::default();
    let mut s = SnapState::new(0.0, 0.0);
    assert_eq!(s.sample(10.0, 5000.0, &cfg), None);
    assert_eq!(s.sample(16.0, 5000.0, &cfg), None);
    assert!(!s.fast_scrolling);
    let v = s.sample(20.0, 20.0, &cfg).unwrap();
    assert_eq!(v, 1.0);
    assert!(!s.fast_scrolling);
}

#[test]
fn slow_sample_clears_fast_flag() {
    let cfg = SnapConfig::default();
    let mut s = SnapState::new(0.0, 0.0);
    s.sample(20.0, 500.0, &cfg);
    assert!(s.fast_scrolling);
    s.sample(120.0, 510.0, &cfg);
    assert!(!s.fast_scrolling);
}

#[test]
fn boundary_helpers() {
    assert!(near_boundary(0.0, 5000.0, 1000.0));
    assert!(near_boundary(BOUNDARY_MARGIN_PX, 5000.0, 1000.0));
    assert!(!near_boundary(2000.0, 5000.0, 1000.0));
    assert!(near_boundary(3995.0, 5000.0, 1000.0));

    assert_eq!(boundary_target(-3.0, 3999.0), Some(0.0));
    assert_eq!(boundary_target(0.0, 3999.0), Some(0.0));
    assert_eq!(boundary_target(5.0, 3999.0), None);
    assert_eq!(boundary_target(4000.0, 3999.0), Some(3999.0));
}

#[test]
fn desktop_start_pins_every_panel_and_installs_snap() {
    let ctrl = desktop(5);
    assert_eq!(ctrl.mode(), LayoutMode::Desktop);
    assert_eq!(ctrl.pin_count(), 5);
    assert!(ctrl.has_snap());
    assert_eq!(ctrl.engine().live_pins(), 5);
    assert_eq!(ctrl.engine().live_snaps(), 1);
    assert_eq!(ctrl.cached_max_scroll(), Some(3999.0));
    assert!(Rc::ptr_eq(
        ctrl.engine().snap_state.as_ref().unwrap(),
        &ctrl.state()
    ));
}

#[test]
fn mobile_start_installs_nothing() {
    let ctrl = SnapController::new(
        FakeEngine::new(5, 4000.0),
        SnapConfig::default(),
        MOBILE,
        0.0,
        0.0,
    );
    assert_eq!(ctrl.mode(), LayoutMode::Mobile);
    assert_eq!(ctrl.pin_count(), 0);
    assert!(!ctrl.has_snap());
    assert!(ctrl.engine().live.is_empty());
    assert_eq!(ctrl.cached_max_scroll(), None);
}

#[test]
fn resize_within_a_mode_rebuilds_nothing() {
    let mut ctrl = desktop(3);
    let created = ctrl.engine().pins_created;
    assert!(!ctrl.on_resize(1024.0));
    assert!(!ctrl.on_resize(1900.0));
    assert_eq!(ctrl.engine().pins_created, created);
    assert_eq!(ctrl.engine().kills, 0);
    assert_eq!(ctrl.engine().refreshes, 0);
}

#[test]
fn crossing_to_mobile_tears_down_and_back_rebuilds() {
    let mut ctrl = desktop(3);

    assert!(ctrl.on_resize(MOBILE));
    assert_eq!(ctrl.mode(), LayoutMode::Mobile);
    assert_eq!(ctrl.pin_count(), 0);
    assert!(!ctrl.has_snap());
    assert!(ctrl.engine().live.is_empty());
    assert_eq!(ctrl.engine().kills, 4);
    assert_eq!(ctrl.engine().refreshes, 1);

    // Staying mobile is a no-op.
    assert!(!ctrl.on_resize(500.0));
    assert_eq!(ctrl.engine().refreshes, 1);

    assert!(ctrl.on_resize(DESKTOP));
    assert_eq!(ctrl.pin_count(), 3);
    assert!(ctrl.has_snap());
    assert_eq!(ctrl.engine().live_pins(), 3);
    assert_eq!(ctrl.engine().live_snaps(), 1);
    assert_eq!(ctrl.engine().refreshes, 2);
}

#[test]
fn rebuilt_snap_starts_with_a_clean_accumulator() {
    let mut ctrl = desktop(4);
    ctrl.state().borrow_mut().accumulated = 0.3;
    ctrl.on_resize(MOBILE);
    ctrl.on_resize(DESKTOP);
    assert_eq!(ctrl.state().borrow().accumulated, 0.0);
}

#[test]
fn scroll_stop_resets_accumulator() {
    let ctrl = desktop(4);
    let cfg = SnapConfig::default();
    ctrl.state().borrow_mut().snap_to(0.2, 4, &cfg);
    assert!(ctrl.state().borrow().accumulated > 0.0);
    ctrl.on_scroll_stop();
    assert_eq!(ctrl.state().borrow().accumulated, 0.0);
}

#[test]
fn scroll_sample_rearms_stop_timer_only_when_sampled() {
    let mut ctrl = desktop(4);
    let out = ctrl.on_scroll(10.0, metrics(2000.0));
    assert!(!out.rearm_stop_timer);
    let out = ctrl.on_scroll(50.0, metrics(2010.0));
    assert!(out.rearm_stop_timer);
    assert_eq!(out.clamped_to, None);
    assert!(ctrl.engine().scrolled_to.is_empty());
}

#[test]
fn overscroll_is_clamped_on_desktop() {
    let mut ctrl = desktop(4);
    let out = ctrl.on_scroll(50.0, metrics(-20.0));
    assert_eq!(out.clamped_to, Some(0.0));
    let out = ctrl.on_scroll(100.0, metrics(4100.0));
    assert_eq!(out.clamped_to, Some(4000.0));
    assert_eq!(ctrl.engine().scrolled_to, vec![0.0, 4000.0]);
}

#[test]
fn overscroll_is_left_alone_on_mobile() {
    let mut ctrl = SnapController::new(
        FakeEngine::new(4, 4000.0),
        SnapConfig::default(),
        MOBILE,
        0.0,
        0.0,
    );
    let out = ctrl.on_scroll(50.0, metrics(-20.0));
    assert_eq!(out.clamped_to, None);
    assert!(ctrl.engine().scrolled_to.is_empty());
}

#[test]
fn default_config_uses_tuning_constants() {
    let cfg = SnapConfig::default();
    assert_eq!(cfg.threshold, SNAP_THRESHOLD);
    assert_eq!(cfg.min_section_change, SNAP_MIN_SECTION_CHANGE);
    assert!(cfg.duration_min_sec < cfg.duration_max_sec);
    assert_eq!(cfg.ease, "power2.inOut");
}
