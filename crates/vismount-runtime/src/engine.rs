#![forbid(unsafe_code)]

//! Engine collaborator traits.
//!
//! The visualization engine is external: it parses a declarative spec into
//! an executable plan and instantiates live views from that plan. The
//! lifecycle machinery consumes only this narrow surface and never looks
//! inside the documents it hands over.

use serde_json::Value;
use vismount_core::container::Container;
use vismount_core::error::EngineError;
use vismount_core::events::EventHandler;
use vismount_core::props::{LogLevel, RendererKind};

/// Visual encoding set a render pass may be restricted to.
///
/// Resize passes re-run only [`Enter`](EncodeSet::Enter) so newly entering
/// marks pick up the new dimensions without a full relayout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeSet {
    Enter,
    Update,
    Exit,
}

impl EncodeSet {
    /// Engine-facing name of the set.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Update => "update",
            Self::Exit => "exit",
        }
    }
}

/// Factory half of the engine: spec/config in, live view out.
pub trait Engine {
    /// Executable plan produced by [`parse`](Engine::parse).
    type Plan;
    /// Live view type instantiated from a plan.
    type View: EngineView;

    /// Build the engine's internal execution plan from `spec` and
    /// `config`. A malformed document is the engine's call to make; the
    /// error is propagated to the host untouched.
    fn parse(&self, spec: &Value, config: Option<&Value>) -> Result<Self::Plan, EngineError>;

    /// Instantiate a view bound to `plan`.
    fn view(&self, plan: Self::Plan) -> Self::View;
}

/// One live view instance, bound to at most one container.
///
/// Mutators mirror the engine's imperative view API. Listener
/// registration is pair-symmetric: `remove_*` is handed the identical
/// handler that `add_*` received, compared by closure identity.
pub trait EngineView {
    /// Bind the view to a concrete container for pixel output.
    fn initialize(&mut self, container: &dyn Container);

    fn width(&mut self, width: f64);
    fn height(&mut self, height: f64);
    fn padding(&mut self, padding: &Value);
    fn background(&mut self, background: &str);
    fn log_level(&mut self, level: LogLevel);
    fn renderer(&mut self, kind: RendererKind);
    fn hover(&mut self);

    /// Trigger a render pass, optionally restricted to one encoding set.
    fn run(&mut self, encode: Option<EncodeSet>) -> Result<(), EngineError>;

    fn add_event_listener(&mut self, name: &str, handler: EventHandler);
    fn remove_event_listener(&mut self, name: &str, handler: &EventHandler);
    fn add_signal_listener(&mut self, name: &str, handler: EventHandler);
    fn remove_signal_listener(&mut self, name: &str, handler: &EventHandler);

    /// Release every resource held by the view.
    fn finalize(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_set_names() {
        assert_eq!(EncodeSet::Enter.as_str(), "enter");
        assert_eq!(EncodeSet::Update.as_str(), "update");
        assert_eq!(EncodeSet::Exit.as_str(), "exit");
    }
}
