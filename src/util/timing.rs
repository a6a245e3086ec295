//! Debounce and throttle wrappers for input handlers.
//!
//! DESIGN
//! ======
//! Each wrapper owns at most one timer handle from its [`UiEnv`]. Replacing
//! or dropping the handle cancels the old timer, so a wrapper never has two
//! timers pending.
//!
//! - [`Debouncer`]: trailing edge. Every call replaces the pending timer and
//!   argument; the wrapped function runs `wait` after the last call.
//! - [`Throttler`]: leading edge. A call while idle runs immediately and
//!   starts a blackout of `limit`; calls during the blackout are dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::env::UiEnv;

pub struct Debouncer<E: UiEnv, A: 'static = ()> {
    env: E,
    wait_ms: u32,
    func: Rc<dyn Fn(A)>,
    pending: Rc<RefCell<Option<A>>>,
    timer: RefCell<Option<E::Timer>>,
}

impl<E: UiEnv, A: 'static> Debouncer<E, A> {
    pub fn new(env: &E, wait_ms: u32, func: impl Fn(A) + 'static) -> Self {
        Self {
            env: env.clone(),
            wait_ms,
            func: Rc::new(func),
            pending: Rc::new(RefCell::new(None)),
            timer: RefCell::new(None),
        }
    }

    /// Schedule `func(arg)` for `wait` from now, superseding any pending call.
    pub fn call(&self, arg: A) {
        *self.pending.borrow_mut() = Some(arg);
        let func = Rc::clone(&self.func);
        let pending = Rc::clone(&self.pending);
        let timer = self.env.schedule(
            self.wait_ms,
            Box::new(move || {
                let arg = pending.borrow_mut().take();
                if let Some(arg) = arg {
                    func(arg);
                }
            }),
        );
        // Dropping the previous handle cancels its timer.
        *self.timer.borrow_mut() = Some(timer);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        *self.timer.borrow_mut() = None;
        self.pending.borrow_mut().take();
    }

    /// Run the pending call now instead of waiting. Returns whether one ran.
    pub fn flush(&self) -> bool {
        *self.timer.borrow_mut() = None;
        let arg = self.pending.borrow_mut().take();
        match arg {
            Some(arg) => {
                (self.func)(arg);
                true
            }
            None => false,
        }
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }
}

pub struct Throttler<E: UiEnv, A: 'static = ()> {
    env: E,
    limit_ms: u32,
    func: Box<dyn Fn(A)>,
    blocked: Rc<Cell<bool>>,
    reset: RefCell<Option<E::Timer>>,
}

impl<E: UiEnv, A: 'static> Throttler<E, A> {
    pub fn new(env: &E, limit_ms: u32, func: impl Fn(A) + 'static) -> Self {
        Self {
            env: env.clone(),
            limit_ms,
            func: Box::new(func),
            blocked: Rc::new(Cell::new(false)),
            reset: RefCell::new(None),
        }
    }

    /// Run `func(arg)` unless inside a blackout. Returns whether it ran.
    pub fn call(&self, arg: A) -> bool {
        if self.blocked.get() {
            return false;
        }
        self.blocked.set(true);
        let blocked = Rc::clone(&self.blocked);
        let timer = self.env.schedule(self.limit_ms, Box::new(move || blocked.set(false)));
        *self.reset.borrow_mut() = Some(timer);
        (self.func)(arg);
        true
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.get()
    }

    pub fn limit_ms(&self) -> u32 {
        self.limit_ms
    }
}

#[cfg(test)]
#[path = "timing_test.rs"]
mod tests;
