// Debounce, throttle and self-rescheduling loops over an abstract timer.
//
// Each utility owns its pending handle, so at most one invocation is ever
// outstanding. Backends must not run callbacks synchronously from
// `schedule`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A one-shot timer source: `setTimeout`, `requestAnimationFrame`, or a
/// manual clock in tests.
pub trait TimerBackend {
    type Handle: 'static;

    /// Run `callback` once after `delay_ms` (backends without a delay, such
    /// as animation frames, ignore it). `None` when the timer could not be
    /// armed.
    fn schedule(&self, delay_ms: i32, callback: Box<dyn FnOnce()>) -> Option<Self::Handle>;
    fn cancel(&self, handle: Self::Handle);
}

/// Last request wins: every call restarts the quiet period.
pub struct Debounce<B: TimerBackend> {
    backend: B,
    delay_ms: i32,
    pending: Rc<RefCell<Option<B::Handle>>>,
}

impl<B: TimerBackend> Debounce<B> {
    pub fn new(backend: B, delay_ms: i32) -> Self {
        Self {
            backend,
            delay_ms,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn call(&self, f: impl FnOnce() + 'static) {
        self.cancel();
        let pending = self.pending.clone();
        let handle = self.backend.schedule(
            self.delay_ms,
            Box::new(move || {
                pending.borrow_mut().take();
                f();
            }),
        );
        *self.pending.borrow_mut() = handle;
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.borrow_mut().take() {
            self.backend.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

/// First request wins: calls made while one is pending are dropped.
pub struct Throttle<B: TimerBackend> {
    backend: B,
    delay_ms: i32,
    pending: Rc<RefCell<Option<B::Handle>>>,
}

impl<B: TimerBackend> Throttle<B> {
    pub fn new(backend: B, delay_ms: i32) -> Self {
        Self {
            backend,
            delay_ms,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    /// Returns `false` when the call was dropped.
    pub fn call(&self, f: impl FnOnce() + 'static) -> bool {
        if self.pending.borrow().is_some() {
            return false;
        }
        let pending = self.pending.clone();
        let handle = self.backend.schedule(
            self.delay_ms,
            Box::new(move || {
                pending.borrow_mut().take();
                f();
            }),
        );
        let armed = handle.is_some();
        *self.pending.borrow_mut() = handle;
        armed
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.pending.borrow_mut().take() {
            self.backend.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }
}

/// Stops a loop started with [`start_loop`]. The loop keeps running if the
/// handle is dropped.
#[derive(Clone, Debug)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

/// Call `tick` once per backend firing until the handle is stopped.
pub fn start_loop<B, F>(backend: B, tick: F) -> LoopHandle
where
    B: TimerBackend + Clone + 'static,
    F: FnMut() + 'static,
{
    let running = Rc::new(Cell::new(true));
    schedule_tick(backend, Rc::new(RefCell::new(tick)), running.clone());
    LoopHandle { running }
}

fn schedule_tick<B, F>(backend: B, tick: Rc<RefCell<F>>, running: Rc<Cell<bool>>)
where
    B: TimerBackend + Clone + 'static,
    F: FnMut() + 'static,
{
    let next = backend.clone();
    let still_running = running.clone();
    let armed = backend.schedule(
        0,
        Box::new(move || {
            if !still_running.get() {
                return;
            }
            (tick.borrow_mut())();
            schedule_tick(next, tick, still_running);
        }),
    );
    if armed.is_none() {
        log::warn!("[loop] could not schedule next frame; stopping");
        running.set(false);
    }
}
