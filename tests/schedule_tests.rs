// Host-side tests for debounce, throttle and the self-rescheduling loop.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod schedule {
    include!("../src/schedule.rs");
}

use schedule::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Manual clock: callbacks fire only when the test advances time.
#[derive(Clone, Default)]
struct ManualClock {
    inner: Rc<ClockInner>,
}

#[derive(Default)]
struct ClockInner {
    now: Cell<i64>,
    next_id: Cell<u32>,
    pending: RefCell<Vec<(u32, i64, Box<dyn FnOnce()>)>>,
    refuse: Cell<bool>,
}

impl ManualClock {
    /// Run the earliest callback due at or before `until`, if any.
    fn fire_due(&self, until: i64) -> bool {
        let due = {
            let mut pending = self.inner.pending.borrow_mut();
            let mut earliest: Option<usize> = None;
            for (i, entry) in pending.iter().enumerate() {
                let at = entry.1;
                if at <= until && earliest.map_or(true, |e| at < pending[e].1) {
                    earliest = Some(i);
                }
            }
            earliest.map(|i| pending.remove(i))
        };
        match due {
            Some((_, at, f)) => {
                self.inner.now.set(at);
                f();
                true
            }
            None => false,
        }
    }

    /// Advance time, firing everything that comes due. Callbacks must not
    /// reschedule themselves with zero delay.
    fn advance(&self, ms: i64) {
        let target = self.inner.now.get() + ms;
        while self.fire_due(target) {}
        self.inner.now.set(target);
    }

    /// One animation frame: fire the earliest pending callback.
    fn next_frame(&self) -> bool {
        self.fire_due(i64::MAX)
    }

    fn pending(&self) -> usize {
        self.inner.pending.borrow().len()
    }
}

impl TimerBackend for ManualClock {
    type Handle = u32;

    fn schedule(&self, delay_ms: i32, callback: Box<dyn FnOnce()>) -> Option<u32> {
        if self.inner.refuse.get() {
            return None;
        }
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let at = self.inner.now.get() + delay_ms.max(0) as i64;
        self.inner.pending.borrow_mut().push((id, at, callback));
        Some(id)
    }

    fn cancel(&self, handle: u32) {
        self.inner
            .pending
            .borrow_mut()
            .retain(|(id, _, _)| *id != handle);
    }
}

fn counter() -> (Rc<Cell<u32>>, impl Fn() -> Box<dyn FnOnce()>) {
    let count = Rc::new(Cell::new(0));
    let c = count.clone();
    (count, move || -> Box<dyn FnOnce()> {
        let c = c.clone();
        Box::new(move || c.set(c.get() + 1))
    })
}

#[test]
fn debounce_fires_once_after_quiet_period() {
    let clock = ManualClock::default();
    let debounce = Debounce::new(clock.clone(), 100);
    let (count, make) = counter();

    for _ in 0..5 {
        debounce.call(make());
        clock.advance(50);
    }
    assert_eq!(count.get(), 0);
    assert!(debounce.is_pending());
    assert_eq!(clock.pending(), 1);

    clock.advance(50);
    assert_eq!(count.get(), 1);
    assert!(!debounce.is_pending());
}

#[test]
fn debounce_cancel_drops_pending_call() {
    let clock = ManualClock::default();
    let debounce = Debounce::new(clock.clone(), 100);
    let (count, make) = counter();
    debounce.call(make());
    debounce.cancel();
    clock.advance(500);
    assert_eq!(count.get(), 0);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn throttle_drops_calls_while_pending() {
    let clock = ManualClock::default();
    let throttle = Throttle::new(clock.clone(), 200);
    let (count, make) = counter();

    assert!(throttle.call(make()));
    assert!(!throttle.call(make()));
    clock.advance(100);
    assert!(!throttle.call(make()));
    clock.advance(100);
    assert_eq!(count.get(), 1);

    assert!(throttle.call(make()));
    clock.advance(200);
    assert_eq!(count.get(), 2);
}

#[test]
fn throttle_reports_unarmed_timer() {
    let clock = ManualClock::default();
    clock.inner.refuse.set(true);
    let throttle = Throttle::new(clock.clone(), 16);
    let (_, make) = counter();
    assert!(!throttle.call(make()));
    assert!(!throttle.is_pending());
}

#[test]
fn loop_ticks_every_firing_until_stopped() {
    let clock = ManualClock::default();
    let ticks = Rc::new(Cell::new(0));
    let t = ticks.clone();
    let handle = start_loop(clock.clone(), move || t.set(t.get() + 1));
    assert!(handle.is_running());
    assert_eq!(ticks.get(), 0);

    for _ in 0..3 {
        assert!(clock.next_frame());
    }
    assert_eq!(ticks.get(), 3);
    assert_eq!(clock.pending(), 1);

    handle.stop();
    assert!(!handle.is_running());
    // The frame already requested still fires but neither ticks nor
    // requests another.
    assert!(clock.next_frame());
    assert_eq!(ticks.get(), 3);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn loop_stops_when_backend_refuses() {
    let clock = ManualClock::default();
    clock.inner.refuse.set(true);
    let handle = start_loop(clock.clone(), || {});
    assert!(!handle.is_running());
}

#[test]
fn throttle_cancel_allows_immediate_rearm() {
    let clock = ManualClock::default();
    let throttle = Throttle::new(clock.clone(), 200);
    let (count, make) = counter();

    assert!(throttle.call(make()));
    assert!(throttle.is_pending());
    throttle.cancel();
    assert!(!throttle.is_pending());
    assert_eq!(clock.pending(), 0);

    assert!(throttle.call(make()));
    clock.advance(200);
    assert_eq!(count.get(), 1);
}
