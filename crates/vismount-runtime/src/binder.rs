#![forbid(unsafe_code)]

//! Symmetric bind/unbind of handler tables on an engine view.
//!
//! Registration is a closed verb set — {bind, unbind} over the two
//! listener namespaces — mapped to explicit [`EngineView`] operations, not
//! dispatch on method names.
//!
//! # Invariants
//!
//! 1. `bind` followed by `unbind` on the same table leaves the view with
//!    no listeners from that table (pairings removed by closure identity).
//! 2. A missing handle or empty table is a no-op in both directions.
//! 3. Binding the same table twice double-registers; the controller never
//!    does so within one mount.

use vismount_core::events::HandlerTable;

use crate::engine::EngineView;
use crate::handle::ViewHandle;

/// Listener namespace on the engine view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerChannel {
    /// Pointer/touch interaction events.
    Interaction,
    /// Engine signal-value changes.
    Signal,
}

/// Register every (name, handler) pair in `table` on `handle`'s `channel`
/// namespace.
pub fn bind<V: EngineView>(
    handle: Option<&mut ViewHandle<V>>,
    channel: ListenerChannel,
    table: &HandlerTable,
) {
    let Some(handle) = handle else {
        return;
    };
    let view = handle.view_mut();
    for (name, handler) in table.iter() {
        match channel {
            ListenerChannel::Interaction => view.add_event_listener(name, handler.clone()),
            ListenerChannel::Signal => view.add_signal_listener(name, handler.clone()),
        }
    }
}

/// Remove the identical pairings a previous [`bind`] of `table` registered.
pub fn unbind<V: EngineView>(
    handle: Option<&mut ViewHandle<V>>,
    channel: ListenerChannel,
    table: &HandlerTable,
) {
    let Some(handle) = handle else {
        return;
    };
    let view = handle.view_mut();
    for (name, handler) in table.iter() {
        match channel {
            ListenerChannel::Interaction => view.remove_event_listener(name, handler),
            ListenerChannel::Signal => view.remove_signal_listener(name, handler),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use vismount_core::container::Container;
    use vismount_core::error::EngineError;
    use vismount_core::events::EventHandler;
    use vismount_core::props::{LogLevel, RendererKind};

    use crate::engine::{EncodeSet, Engine};

    #[derive(Default)]
    struct FakeView {
        events: Vec<(String, EventHandler)>,
        signals: Vec<(String, EventHandler)>,
    }

    impl EngineView for FakeView {
        fn initialize(&mut self, _container: &dyn Container) {}
        fn width(&mut self, _width: f64) {}
        fn height(&mut self, _height: f64) {}
        fn padding(&mut self, _padding: &Value) {}
        fn background(&mut self, _background: &str) {}
        fn log_level(&mut self, _level: LogLevel) {}
        fn renderer(&mut self, _kind: RendererKind) {}
        fn hover(&mut self) {}

        fn run(&mut self, _encode: Option<EncodeSet>) -> Result<(), EngineError> {
            Ok(())
        }

        fn add_event_listener(&mut self, name: &str, handler: EventHandler) {
            self.events.push((name.to_owned(), handler));
        }

        fn remove_event_listener(&mut self, name: &str, handler: &EventHandler) {
            if let Some(pos) = self
                .events
                .iter()
                .position(|(n, h)| n == name && h.ptr_eq(handler))
            {
                self.events.remove(pos);
            }
        }

        fn add_signal_listener(&mut self, name: &str, handler: EventHandler) {
            self.signals.push((name.to_owned(), handler));
        }

        fn remove_signal_listener(&mut self, name: &str, handler: &EventHandler) {
            if let Some(pos) = self
                .signals
                .iter()
                .position(|(n, h)| n == name && h.ptr_eq(handler))
            {
                self.signals.remove(pos);
            }
        }

        fn finalize(&mut self) {}
    }

    struct FakeEngine;

    impl Engine for FakeEngine {
        type Plan = ();
        type View = FakeView;

        fn parse(&self, _spec: &Value, _config: Option<&Value>) -> Result<(), EngineError> {
            Ok(())
        }

        fn view(&self, (): ()) -> FakeView {
            FakeView::default()
        }
    }

    fn handle() -> ViewHandle<FakeView> {
        ViewHandle::construct(&FakeEngine, &Value::Null, None).expect("fake parse")
    }

    #[test]
    fn bind_then_unbind_is_symmetric() {
        let mut handle = handle();
        let table = HandlerTable::new()
            .with("click", |_, _| {})
            .with("mouseover", |_, _| {});

        bind(Some(&mut handle), ListenerChannel::Interaction, &table);
        assert_eq!(handle.view_mut().events.len(), 2);

        unbind(Some(&mut handle), ListenerChannel::Interaction, &table);
        assert!(handle.view_mut().events.is_empty());
    }

    #[test]
    fn channels_are_independent() {
        let mut handle = handle();
        let table = HandlerTable::new().with("width", |_, _| {});

        bind(Some(&mut handle), ListenerChannel::Signal, &table);
        assert!(handle.view_mut().events.is_empty());
        assert_eq!(handle.view_mut().signals.len(), 1);

        unbind(Some(&mut handle), ListenerChannel::Signal, &table);
        assert!(handle.view_mut().signals.is_empty());
    }

    #[test]
    fn missing_handle_is_a_no_op() {
        let table = HandlerTable::new().with("click", |_, _| {});
        bind(None::<&mut ViewHandle<FakeView>>, ListenerChannel::Interaction, &table);
        unbind(None::<&mut ViewHandle<FakeView>>, ListenerChannel::Interaction, &table);
    }

    #[test]
    fn empty_table_registers_nothing() {
        let mut handle = handle();
        bind(
            Some(&mut handle),
            ListenerChannel::Interaction,
            &HandlerTable::new(),
        );
        assert!(handle.view_mut().events.is_empty());
    }

    #[test]
    fn unbind_removes_only_the_identical_pairing() {
        let mut handle = handle();
        let bound = HandlerTable::new().with("click", |_, _| {});
        let stranger = HandlerTable::new().with("click", |_, _| {});

        bind(Some(&mut handle), ListenerChannel::Interaction, &bound);
        unbind(Some(&mut handle), ListenerChannel::Interaction, &stranger);
        assert_eq!(handle.view_mut().events.len(), 1);

        unbind(Some(&mut handle), ListenerChannel::Interaction, &bound);
        assert!(handle.view_mut().events.is_empty());
    }

    #[test]
    fn double_bind_double_registers() {
        let mut handle = handle();
        let table = HandlerTable::new().with("click", |_, _| {});

        bind(Some(&mut handle), ListenerChannel::Interaction, &table);
        bind(Some(&mut handle), ListenerChannel::Interaction, &table);
        assert_eq!(handle.view_mut().events.len(), 2);
    }
}
