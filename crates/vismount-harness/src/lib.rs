#![forbid(unsafe_code)]

//! Test harness: recording fakes for the engine collaborator and scripted
//! containers.
//!
//! [`RecordingEngine`] implements [`Engine`]; every operation its views
//! receive is appended to a shared [`CallLog`], and the live listener sets
//! are tracked in a shared [`ListenerState`], so tests keep full
//! visibility after the engine and view have been moved into a
//! controller. [`TestContainer`] scripts the measurement seam through
//! interior mutability, so a shared handle can "resize" the container
//! mid-test.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;
use vismount_core::container::Container;
use vismount_core::error::EngineError;
use vismount_core::events::EventHandler;
use vismount_core::props::{LogLevel, RendererKind};
use vismount_runtime::engine::{EncodeSet, Engine, EngineView};

// ============================================================================
// Call log
// ============================================================================

/// One operation received by a recording view.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Initialize,
    Width(f64),
    Height(f64),
    Padding(Value),
    Background(String),
    LogLevel(LogLevel),
    Renderer(RendererKind),
    Hover,
    Run(Option<EncodeSet>),
    AddEvent(String),
    RemoveEvent(String),
    AddSignal(String),
    RemoveSignal(String),
    Finalize,
}

/// Shared, inspectable log of every view operation.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<RecordedCall>>>,
}

impl CallLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: RecordedCall) {
        self.calls.borrow_mut().push(call);
    }

    /// Snapshot of all recorded calls, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// How many recorded calls satisfy `pred`.
    #[must_use]
    pub fn count_where(&self, pred: impl Fn(&RecordedCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| pred(call)).count()
    }

    /// Number of render passes, regardless of encode set.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.count_where(|call| matches!(call, RecordedCall::Run(_)))
    }

    /// Number of `width`/`height` sizing pairs (counted by width calls).
    #[must_use]
    pub fn size_count(&self) -> usize {
        self.count_where(|call| matches!(call, RecordedCall::Width(_)))
    }

    /// Number of finalizations.
    #[must_use]
    pub fn finalize_count(&self) -> usize {
        self.count_where(|call| matches!(call, RecordedCall::Finalize))
    }

    /// Whether `call` was recorded at least once.
    #[must_use]
    pub fn contains(&self, call: &RecordedCall) -> bool {
        self.calls.borrow().iter().any(|recorded| recorded == call)
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl fmt::Debug for CallLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallLog")
            .field("calls", &self.calls.borrow().len())
            .finish()
    }
}

// ============================================================================
// Listener bookkeeping
// ============================================================================

/// Live listener registrations, shared between a view and the test.
#[derive(Default)]
pub struct ListenerState {
    events: Vec<(String, EventHandler)>,
    signals: Vec<(String, EventHandler)>,
}

/// Shared handle onto a view's listener state.
#[derive(Clone, Default)]
pub struct ListenerProbe {
    state: Rc<RefCell<ListenerState>>,
}

impl ListenerProbe {
    /// Names with a live interaction listener, sorted.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .borrow()
            .events
            .iter()
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Names with a live signal listener, sorted.
    #[must_use]
    pub fn signal_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .borrow()
            .signals
            .iter()
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Total live registrations across both namespaces.
    #[must_use]
    pub fn total(&self) -> usize {
        let state = self.state.borrow();
        state.events.len() + state.signals.len()
    }

    /// Dispatch an interaction event to every matching live listener.
    pub fn fire_event(&self, name: &str, payload: &Value) {
        let handlers: Vec<EventHandler> = self
            .state
            .borrow()
            .events
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler.call(name, payload);
        }
    }

    /// Dispatch a signal-value change to every matching live listener.
    pub fn fire_signal(&self, name: &str, value: &Value) {
        let handlers: Vec<EventHandler> = self
            .state
            .borrow()
            .signals
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler.call(name, value);
        }
    }
}

impl fmt::Debug for ListenerProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerProbe")
            .field("total", &self.total())
            .finish()
    }
}

// ============================================================================
// Recording engine and view
// ============================================================================

/// Plan snapshot: the documents exactly as the engine received them.
#[derive(Debug, Clone)]
pub struct RecordingPlan {
    pub spec: Value,
    pub config: Option<Value>,
}

/// Engine fake whose views record every operation.
pub struct RecordingEngine {
    log: CallLog,
    listeners: ListenerProbe,
    parsed: Rc<RefCell<Vec<RecordingPlan>>>,
    view_count: Rc<Cell<usize>>,
    parse_error: Option<String>,
    run_error: Option<String>,
}

impl RecordingEngine {
    /// Engine that accepts every spec.
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: CallLog::new(),
            listeners: ListenerProbe::default(),
            parsed: Rc::new(RefCell::new(Vec::new())),
            view_count: Rc::new(Cell::new(0)),
            parse_error: None,
            run_error: None,
        }
    }

    /// Engine that rejects every spec with `message`.
    #[must_use]
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            parse_error: Some(message.into()),
            ..Self::new()
        }
    }

    /// Engine whose views fail every render pass with `message`.
    #[must_use]
    pub fn failing_runs(message: impl Into<String>) -> Self {
        Self {
            run_error: Some(message.into()),
            ..Self::new()
        }
    }

    /// Shared call log; keep a clone before moving the engine.
    #[must_use]
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Shared listener probe; keep a clone before moving the engine.
    #[must_use]
    pub fn listeners(&self) -> ListenerProbe {
        self.listeners.clone()
    }

    /// Specs/configs parsed so far, in order.
    #[must_use]
    pub fn parsed(&self) -> Vec<RecordingPlan> {
        self.parsed.borrow().clone()
    }

    /// Shared handle onto the parse history (survives moving the engine).
    #[must_use]
    pub fn parse_history(&self) -> Rc<RefCell<Vec<RecordingPlan>>> {
        Rc::clone(&self.parsed)
    }

    /// Shared view-construction counter.
    #[must_use]
    pub fn view_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.view_count)
    }
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RecordingEngine {
    type Plan = RecordingPlan;
    type View = RecordingView;

    fn parse(&self, spec: &Value, config: Option<&Value>) -> Result<RecordingPlan, EngineError> {
        if let Some(message) = &self.parse_error {
            return Err(EngineError::msg(message.clone()));
        }
        let plan = RecordingPlan {
            spec: spec.clone(),
            config: config.cloned(),
        };
        self.parsed.borrow_mut().push(plan.clone());
        Ok(plan)
    }

    fn view(&self, plan: RecordingPlan) -> RecordingView {
        self.view_count.set(self.view_count.get() + 1);
        RecordingView {
            log: self.log.clone(),
            listeners: self.listeners.clone(),
            run_error: self.run_error.clone(),
            plan,
            finalized: false,
        }
    }
}

/// View fake: records every operation and tracks live listeners.
pub struct RecordingView {
    log: CallLog,
    listeners: ListenerProbe,
    run_error: Option<String>,
    pub plan: RecordingPlan,
    finalized: bool,
}

impl EngineView for RecordingView {
    fn initialize(&mut self, _container: &dyn Container) {
        self.log.push(RecordedCall::Initialize);
    }

    fn width(&mut self, width: f64) {
        self.log.push(RecordedCall::Width(width));
    }

    fn height(&mut self, height: f64) {
        self.log.push(RecordedCall::Height(height));
    }

    fn padding(&mut self, padding: &Value) {
        self.log.push(RecordedCall::Padding(padding.clone()));
    }

    fn background(&mut self, background: &str) {
        self.log.push(RecordedCall::Background(background.to_owned()));
    }

    fn log_level(&mut self, level: LogLevel) {
        self.log.push(RecordedCall::LogLevel(level));
    }

    fn renderer(&mut self, kind: RendererKind) {
        self.log.push(RecordedCall::Renderer(kind));
    }

    fn hover(&mut self) {
        self.log.push(RecordedCall::Hover);
    }

    fn run(&mut self, encode: Option<EncodeSet>) -> Result<(), EngineError> {
        self.log.push(RecordedCall::Run(encode));
        match &self.run_error {
            Some(message) => Err(EngineError::msg(message.clone())),
            None => Ok(()),
        }
    }

    fn add_event_listener(&mut self, name: &str, handler: EventHandler) {
        self.log.push(RecordedCall::AddEvent(name.to_owned()));
        self.listeners
            .state
            .borrow_mut()
            .events
            .push((name.to_owned(), handler));
    }

    fn remove_event_listener(&mut self, name: &str, handler: &EventHandler) {
        self.log.push(RecordedCall::RemoveEvent(name.to_owned()));
        let mut state = self.listeners.state.borrow_mut();
        if let Some(pos) = state
            .events
            .iter()
            .position(|(n, h)| n == name && h.ptr_eq(handler))
        {
            state.events.remove(pos);
        }
    }

    fn add_signal_listener(&mut self, name: &str, handler: EventHandler) {
        self.log.push(RecordedCall::AddSignal(name.to_owned()));
        self.listeners
            .state
            .borrow_mut()
            .signals
            .push((name.to_owned(), handler));
    }

    fn remove_signal_listener(&mut self, name: &str, handler: &EventHandler) {
        self.log.push(RecordedCall::RemoveSignal(name.to_owned()));
        let mut state = self.listeners.state.borrow_mut();
        if let Some(pos) = state
            .signals
            .iter()
            .position(|(n, h)| n == name && h.ptr_eq(handler))
        {
            state.signals.remove(pos);
        }
    }

    fn finalize(&mut self) {
        debug_assert!(!self.finalized, "finalize must be called exactly once");
        self.finalized = true;
        self.log.push(RecordedCall::Finalize);
    }
}

// ============================================================================
// Scripted container
// ============================================================================

/// Container whose measurements a test scripts through interior
/// mutability; share it via `Rc` and resize mid-test.
#[derive(Debug)]
pub struct TestContainer {
    width: Cell<f64>,
    height: Cell<f64>,
}

impl TestContainer {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: Cell::new(width),
            height: Cell::new(height),
        }
    }

    /// Change the scripted measurements.
    pub fn set_measurements(&self, width: f64, height: f64) {
        self.width.set(width);
        self.height.set(height);
    }
}

impl Container for TestContainer {
    fn content_width(&self) -> f64 {
        self.width.get()
    }

    fn content_height(&self) -> f64 {
        self.height.get()
    }
}
