use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::timer::{Timer, TimerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// Fire-and-forget notification sink.
pub trait Notifier {
    fn notify(&self, level: ToastLevel, message: &str);

    fn success(&self, message: &str) {
        self.notify(ToastLevel::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(ToastLevel::Error, message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Default)]
struct QueueInner {
    next_id: u64,
    toasts: Vec<Toast>,
    timers: HashMap<u64, TimerHandle>,
}

/// Newest-first toast stack with auto-dismiss.
#[derive(Clone)]
pub struct ToastQueue {
    inner: Rc<RefCell<QueueInner>>,
    timer: Rc<dyn Timer>,
    dismiss_after_ms: u32,
    on_change: Rc<dyn Fn()>,
}

impl ToastQueue {
    pub fn new(timer: Rc<dyn Timer>, dismiss_after_ms: u32, on_change: Rc<dyn Fn()>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(QueueInner::default())),
            timer,
            dismiss_after_ms,
            on_change,
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.borrow().toasts.clone()
    }

    pub fn push(&self, level: ToastLevel, message: &str) -> u64 {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.toasts.insert(
                0,
                Toast {
                    id,
                    level,
                    message: message.to_string(),
                },
            );
            id
        };

        let weak = Rc::downgrade(&self.inner);
        let on_change = self.on_change.clone();
        let handle = self.timer.schedule(
            self.dismiss_after_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let removed = {
                        let mut inner = inner.borrow_mut();
                        // Detach; the timer that owns this handle already fired.
                        drop(inner.timers.remove(&id));
                        remove_toast(&mut inner.toasts, id)
                    };
                    if removed {
                        on_change();
                    }
                }
            }),
        );
        self.inner.borrow_mut().timers.insert(id, handle);
        (self.on_change)();
        id
    }

    pub fn dismiss(&self, id: u64) {
        let (removed, handle) = {
            let mut inner = self.inner.borrow_mut();
            let handle = inner.timers.remove(&id);
            (remove_toast(&mut inner.toasts, id), handle)
        };
        if let Some(handle) = handle {
            handle.cancel();
        }
        if removed {
            (self.on_change)();
        }
    }
}

fn remove_toast(toasts: &mut Vec<Toast>, id: u64) -> bool {
    let before = toasts.len();
    toasts.retain(|t| t.id != id);
    toasts.len() != before
}

impl Notifier for ToastQueue {
    fn notify(&self, level: ToastLevel, message: &str) {
        self.push(level, message);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;
    use std::cell::Cell;

    fn queue(clock: &ManualClock) -> (ToastQueue, Rc<Cell<u32>>) {
        let renders = Rc::new(Cell::new(0));
        let counter = renders.clone();
        let queue = ToastQueue::new(
            Rc::new(clock.clone()),
            3000,
            Rc::new(move || counter.set(counter.get() + 1)),
        );
        (queue, renders)
    }

    #[test]
    fn newest_toast_is_first() {
        let clock = ManualClock::new();
        let (queue, _) = queue(&clock);
        queue.success("Payment marked as paid");
        queue.error("Failed to load transaction data");

        let toasts = queue.toasts();
        assert_eq!(toasts[0].message, "Failed to load transaction data");
        assert_eq!(toasts[1].level, ToastLevel::Success);
    }

    #[test]
    fn toasts_auto_dismiss() {
        let clock = ManualClock::new();
        let (queue, renders) = queue(&clock);
        queue.success("saved");
        clock.advance(1000);
        queue.error("failed");

        clock.advance(2000);
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].message, "failed");

        clock.advance(1000);
        assert!(queue.toasts().is_empty());
        assert_eq!(renders.get(), 4);
    }

    #[test]
    fn manual_dismiss_cancels_timer() {
        let clock = ManualClock::new();
        let (queue, _) = queue(&clock);
        let kept = queue.push(ToastLevel::Error, "failed");
        let id = queue.push(ToastLevel::Success, "saved");
        assert_eq!(clock.pending(), 2);

        queue.dismiss(id);
        let toasts = queue.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, kept);
        assert_eq!(clock.pending(), 1);

        clock.advance(3000);
        assert!(queue.toasts().is_empty());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn dismissing_unknown_id_is_silent() {
        let clock = ManualClock::new();
        let (queue, renders) = queue(&clock);
        queue.dismiss(42);
        assert_eq!(renders.get(), 0);
    }
}
