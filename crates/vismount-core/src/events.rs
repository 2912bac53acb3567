#![forbid(unsafe_code)]

//! Named handler tables for engine events and signals.
//!
//! A [`HandlerTable`] maps event (or signal) names to [`EventHandler`]
//! callbacks. Two independent tables exist per mount — interaction events
//! and signal events — and bind/unbind walk the same table, so every
//! registration has a matching removal.
//!
//! # Invariants
//!
//! 1. Handlers are compared by closure identity ([`EventHandler::ptr_eq`]),
//!    never by name alone; unbind removes the identical pairing it bound.
//! 2. An empty table binds and unbinds as a no-op.

use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use serde_json::Value;

/// Callback invoked by the engine with the event (or signal) name and its
/// payload.
///
/// Cheap to clone; clones share the underlying closure, which is what
/// makes symmetric removal by identity possible.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&str, &Value)>);

impl EventHandler {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&str, &Value) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the handler.
    pub fn call(&self, name: &str, payload: &Value) {
        (self.0)(name, payload);
    }

    /// Identity comparison: true only when both handles share the same
    /// underlying closure.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandler")
            .field("ptr", &Rc::as_ptr(&self.0))
            .finish()
    }
}

/// Mapping from event (or signal) name to handler.
#[derive(Clone, Default)]
pub struct HandlerTable {
    entries: AHashMap<String, EventHandler>,
}

impl HandlerTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` under `name`, replacing any previous entry. Builder
    /// form for literal tables.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, f: impl Fn(&str, &Value) + 'static) -> Self {
        self.insert(name, EventHandler::new(f));
        self
    }

    /// Register `handler` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, handler: EventHandler) {
        self.entries.insert(name.into(), handler);
    }

    /// Look up the handler registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EventHandler> {
        self.entries.get(name)
    }

    /// Iterate over (name, handler) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EventHandler)> {
        self.entries
            .iter()
            .map(|(name, handler)| (name.as_str(), handler))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Map iteration order is unspecified; print names sorted so Debug
        // output stays stable.
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("HandlerTable").field("names", &names).finish()
    }
}
