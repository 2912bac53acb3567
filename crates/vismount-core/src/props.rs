#![forbid(unsafe_code)]

//! Inbound configuration surface for one mounted view.

use serde_json::Value;

use crate::events::HandlerTable;

/// Rendering backend requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererKind {
    Svg,
    Canvas,
}

impl RendererKind {
    /// Engine-facing name of the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Canvas => "canvas",
        }
    }
}

impl Default for RendererKind {
    fn default() -> Self {
        Self::Svg
    }
}

/// Engine log verbosity, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    /// Engine-facing name of the level.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warn => "Warn",
            Self::Info => "Info",
            Self::Debug => "Debug",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Warn
    }
}

/// Configuration supplied by the host for one mount.
///
/// `spec` is the only required field; everything else has the component
/// defaults. Visibility and resizability are tri-state: only an explicit
/// `Some(false)` disables them, so an absent flag behaves as enabled.
#[derive(Debug, Clone)]
pub struct ViewProps {
    /// Declarative document describing what to render. Required at mount.
    pub spec: Option<Value>,
    /// External data, merged into `spec` when the spec carries none of its
    /// own (see [`crate::spec_doc::merge_external_data`]).
    pub data: Option<Value>,
    /// Styling/theming document paired with the spec at construction.
    pub config: Option<Value>,
    pub renderer: RendererKind,
    pub log_level: LogLevel,
    pub background: Option<String>,
    /// Padding document (a number or a per-side object), passed through
    /// opaquely.
    pub padding: Option<Value>,
    /// Fixed height/width ratio; when set, height tracks measured width.
    pub aspect_ratio: Option<f64>,
    pub is_visible: Option<bool>,
    pub is_resizable: Option<bool>,
    /// Interaction event handlers, bound at mount.
    pub events: HandlerTable,
    /// Signal handlers, bound at mount.
    pub signal_events: HandlerTable,
}

impl ViewProps {
    /// Props carrying `spec` with every other field defaulted.
    #[must_use]
    pub fn with_spec(spec: Value) -> Self {
        Self {
            spec: Some(spec),
            ..Self::default()
        }
    }

    /// Effective visibility: default-on; only an explicit `false` hides.
    #[must_use]
    pub fn effectively_visible(&self) -> bool {
        self.is_visible != Some(false)
    }

    /// Effective resizability: default-on; only an explicit `false`
    /// disables resize passes.
    #[must_use]
    pub fn effectively_resizable(&self) -> bool {
        self.is_resizable != Some(false)
    }
}

impl Default for ViewProps {
    fn default() -> Self {
        Self {
            spec: None,
            data: None,
            config: None,
            renderer: RendererKind::default(),
            log_level: LogLevel::default(),
            background: None,
            padding: None,
            aspect_ratio: None,
            is_visible: None,
            is_resizable: None,
            events: HandlerTable::new(),
            signal_events: HandlerTable::new(),
        }
    }
}
