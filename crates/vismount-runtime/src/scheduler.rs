#![forbid(unsafe_code)]

//! Resize scheduling: trailing-edge debounce composed with a frame latch.
//!
//! The raw resize broadcast fires at high frequency during a drag-resize.
//! Two stages bound the work:
//!
//! 1. [`DebounceGate`] — every poke re-arms a [`RESIZE_DEBOUNCE`] deadline;
//!    the gate fires only after that much signal silence.
//! 2. [`FrameLatch`] — holds at most one pending resize pass; the pass
//!    runs when the next render cycle completes, so any number of logical
//!    triggers within one cycle collapse into a single layout pass.
//!
//! [`ResizeScheduler`] composes the two over shared state, so the
//! resize-signal callback can poke the gate while the controller drives
//! render cycles. The primitives stay separate and independently
//! testable.
//!
//! # Invariants
//!
//! 1. N pokes within one debounce window yield exactly one pass.
//! 2. Any number of latch requests within one cycle yield one pass.
//! 3. After [`cancel`](ResizeScheduler::cancel), no pass runs until new
//!    input arrives.
//! 4. A gate that fires while cycle k completes produces the pass at the
//!    completion of cycle k+1.

use std::cell::RefCell;
use std::rc::Rc;

use vismount_core::clock::Clock;
use web_time::{Duration, Instant};

/// Quiet period required after the last raw resize notification.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(50);

/// Cancellable trailing-edge debounce.
#[derive(Debug)]
pub struct DebounceGate {
    deadline: Option<Instant>,
    window: Duration,
}

impl DebounceGate {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            deadline: None,
            window,
        }
    }

    /// Observe one raw notification: the gate now fires `window` after
    /// `now`, superseding any earlier deadline.
    pub fn poke(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Fire if the quiet period has elapsed; firing disarms the gate.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

/// At-most-one pending pass, consumed once per render cycle.
#[derive(Debug, Default)]
pub struct FrameLatch {
    pending: bool,
}

impl FrameLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a pass; idempotent while one is already pending.
    pub fn request(&mut self) {
        self.pending = true;
    }

    /// Consume the pending pass, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Clear without consuming.
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[derive(Debug)]
struct SchedulerState {
    gate: DebounceGate,
    latch: FrameLatch,
}

/// Composed resize scheduler.
///
/// Clonable handle over shared state: the resize-subscription callback
/// holds one clone and pokes it; the controller holds another and drives
/// [`advance`](ResizeScheduler::advance) once per completed render cycle.
#[derive(Clone, Debug)]
pub struct ResizeScheduler {
    state: Rc<RefCell<SchedulerState>>,
    clock: Clock,
}

impl ResizeScheduler {
    /// Scheduler with the standard [`RESIZE_DEBOUNCE`] window.
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self::with_window(clock, RESIZE_DEBOUNCE)
    }

    /// Scheduler with a custom debounce window.
    #[must_use]
    pub fn with_window(clock: Clock, window: Duration) -> Self {
        Self {
            state: Rc::new(RefCell::new(SchedulerState {
                gate: DebounceGate::new(window),
                latch: FrameLatch::new(),
            })),
            clock,
        }
    }

    /// Raw resize notification observed: re-arm the debounce.
    pub fn poke(&self) {
        let now = self.clock.now();
        self.state.borrow_mut().gate.poke(now);
    }

    /// Latch a resize pass directly, bypassing the debounce. Used when a
    /// watched attribute change makes the current size suspect.
    pub fn schedule_pass(&self) {
        self.state.borrow_mut().latch.request();
    }

    /// Drive one completed render cycle.
    ///
    /// Returns true when a pass latched in an earlier cycle should run
    /// now. An elapsed debounce is promoted into the latch, producing the
    /// pass at the *next* cycle completion.
    pub fn advance(&self) -> bool {
        let now = self.clock.now();
        let mut state = self.state.borrow_mut();
        let run = state.latch.take();
        if state.gate.fire(now) {
            state.latch.request();
        }
        run
    }

    /// Cancel both stages; nothing already latched or armed will run.
    pub fn cancel(&self) {
        let mut state = self.state.borrow_mut();
        state.gate.cancel();
        state.latch.cancel();
    }

    /// Whether either stage holds work.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        let state = self.state.borrow();
        state.gate.is_armed() || state.latch.is_pending()
    }
}
