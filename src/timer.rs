use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;

/// Schedules one-shot callbacks. Implementations never run a callback
/// whose handle was cancelled, and release it (with everything it
/// captured) on cancel.
pub trait Timer {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

/// Cancel token for a scheduled callback. Dropping the handle detaches it
/// without cancelling.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// `setTimeout`-backed timer for the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        // The slot owns the gloo timeout until it fires or is cancelled,
        // whichever comes first.
        let slot: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
        let fired = slot.clone();
        let timeout = Timeout::new(delay_ms, move || {
            let spent = fired.borrow_mut().take();
            // The JS closure is still on the stack; free it on a later turn.
            if let Some(spent) = spent {
                spawn_local(async move { drop(spent) });
            }
            callback();
        });
        *slot.borrow_mut() = Some(timeout);

        TimerHandle::new(move || {
            let pending = slot.borrow_mut().take();
            if let Some(timeout) = pending {
                drop(timeout.cancel());
            }
        })
    }
}

/// Deterministic clock: callbacks only run from [`ManualClock::advance`].
#[derive(Clone, Default)]
pub struct ManualClock {
    inner: Rc<RefCell<ClockInner>>,
}

#[derive(Default)]
struct ClockInner {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Scheduled>,
}

struct Scheduled {
    id: u64,
    due_ms: u64,
    callback: Box<dyn FnOnce()>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Moves time forward, firing due callbacks in order. Callbacks may
    /// schedule further callbacks; those fire too if they fall in range.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms() + ms;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let index = inner
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.due_ms <= target)
                    .min_by_key(|(_, s)| (s.due_ms, s.id))
                    .map(|(i, _)| i);
                index.map(|i| {
                    let scheduled = inner.pending.remove(i);
                    inner.now_ms = scheduled.due_ms;
                    scheduled.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.inner.borrow_mut().now_ms = target;
    }
}

impl Timer for ManualClock {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            let due_ms = inner.now_ms + u64::from(delay_ms);
            inner.pending.push(Scheduled { id, due_ms, callback });
            id
        };
        let weak: Weak<RefCell<ClockInner>> = Rc::downgrade(&self.inner);
        TimerHandle::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().pending.retain(|s| s.id != id);
            }
        })
    }
}
