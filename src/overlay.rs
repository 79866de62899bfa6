use std::cell::RefCell;
use std::rc::Rc;

use crate::models::OverlayKind;
use crate::timer::{Timer, TimerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Closed,
    /// Mounted but still on its invisible first frame.
    Entering,
    Open,
    /// Fading out; content stays mounted until the exit delay elapses.
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayView {
    pub phase: OverlayPhase,
    pub kind: OverlayKind,
}

impl OverlayView {
    /// Whether the overlay exists in the layout tree.
    pub fn is_present(&self) -> bool {
        self.phase != OverlayPhase::Closed
    }

    /// Whether the visual flag is at its "shown" value.
    pub fn is_visible(&self) -> bool {
        self.phase == OverlayPhase::Open
    }

    pub fn hosts(&self, kind: OverlayKind) -> bool {
        self.is_present() && kind != OverlayKind::None && self.kind == kind
    }
}

struct OverlayInner {
    phase: OverlayPhase,
    kind: OverlayKind,
    generation: u64,
    pending: Option<TimerHandle>,
}

impl OverlayInner {
    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}

/// Mount/animate/unmount state machine for a single modal surface. It
/// hosts whatever content `kind` selects and owns none of it.
#[derive(Clone)]
pub struct OverlayController {
    inner: Rc<RefCell<OverlayInner>>,
    timer: Rc<dyn Timer>,
    enter_delay_ms: u32,
    exit_delay_ms: u32,
    on_change: Rc<dyn Fn()>,
}

impl OverlayController {
    pub fn new(
        timer: Rc<dyn Timer>,
        enter_delay_ms: u32,
        exit_delay_ms: u32,
        on_change: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(OverlayInner {
                phase: OverlayPhase::Closed,
                kind: OverlayKind::None,
                generation: 0,
                pending: None,
            })),
            timer,
            enter_delay_ms,
            exit_delay_ms,
            on_change,
        }
    }

    pub fn view(&self) -> OverlayView {
        let inner = self.inner.borrow();
        OverlayView {
            phase: inner.phase,
            kind: inner.kind,
        }
    }

    pub fn open(&self, kind: OverlayKind) {
        if kind == OverlayKind::None {
            self.close();
            return;
        }
        let start_entering = {
            let mut inner = self.inner.borrow_mut();
            match inner.phase {
                OverlayPhase::Closed | OverlayPhase::Exiting => {
                    inner.cancel_pending();
                    inner.kind = kind;
                    inner.phase = OverlayPhase::Entering;
                    true
                }
                OverlayPhase::Entering | OverlayPhase::Open => {
                    if inner.kind == kind {
                        return;
                    }
                    // Replace in place: no exit animation for the old kind.
                    inner.kind = kind;
                    false
                }
            }
        };
        if start_entering {
            self.schedule(self.enter_delay_ms);
        }
        (self.on_change)();
    }

    pub fn close(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            match inner.phase {
                OverlayPhase::Entering | OverlayPhase::Open => {
                    inner.cancel_pending();
                    inner.phase = OverlayPhase::Exiting;
                }
                OverlayPhase::Closed | OverlayPhase::Exiting => return,
            }
        }
        self.schedule(self.exit_delay_ms);
        (self.on_change)();
    }

    // Arms the timer that finishes the current transitional phase.
    fn schedule(&self, delay_ms: u32) {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            inner.generation += 1;
            inner.generation
        };
        let weak = Rc::downgrade(&self.inner);
        let on_change = self.on_change.clone();
        let handle = self.timer.schedule(
            delay_ms,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let advanced = {
                    let mut inner = inner.borrow_mut();
                    if inner.generation != generation {
                        false
                    } else {
                        inner.pending = None;
                        match inner.phase {
                            OverlayPhase::Entering => {
                                inner.phase = OverlayPhase::Open;
                                true
                            }
                            OverlayPhase::Exiting => {
                                inner.phase = OverlayPhase::Closed;
                                inner.kind = OverlayKind::None;
                                true
                            }
                            OverlayPhase::Closed | OverlayPhase::Open => false,
                        }
                    }
                };
                if advanced {
                    on_change();
                }
            }),
        );
        self.inner.borrow_mut().pending = Some(handle);
    }
}
