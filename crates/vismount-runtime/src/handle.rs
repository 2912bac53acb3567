#![forbid(unsafe_code)]

//! View handle: exclusive owner of one engine view for one mount.
//!
//! The handle is created by the controller after the environment check,
//! mutated by sizing and attribute reactions, and consumed by
//! [`finalize`](ViewHandle::finalize) at unmount. Because `finalize`
//! takes the handle by value, a second finalize does not typecheck —
//! double-release is unrepresentable rather than merely checked.

use std::fmt;

use serde_json::Value;
use vismount_core::container::Container;
use vismount_core::dimensions::Size;
use vismount_core::error::EngineError;
use vismount_core::props::{LogLevel, RendererKind};

use crate::engine::{EncodeSet, Engine, EngineView};

/// Owns the engine view constructed for a single mount.
pub struct ViewHandle<V: EngineView> {
    view: V,
    size: Option<Size>,
}

impl<V: EngineView> ViewHandle<V> {
    /// Parse `spec`/`config` into a plan and instantiate the view.
    ///
    /// Engine rejections propagate untouched.
    pub fn construct<E>(
        engine: &E,
        spec: &Value,
        config: Option<&Value>,
    ) -> Result<Self, EngineError>
    where
        E: Engine<View = V>,
    {
        let plan = engine.parse(spec, config)?;
        Ok(Self {
            view: engine.view(plan),
            size: None,
        })
    }

    /// Bind the view to its host container for pixel output.
    pub fn initialize(&mut self, container: &dyn Container) {
        self.view.initialize(container);
    }

    /// Apply target dimensions to the view.
    pub fn apply_size(&mut self, size: Size) {
        self.view.width(size.width);
        self.view.height(size.height);
        self.size = Some(size);
    }

    /// Last size applied via [`apply_size`](Self::apply_size), if any.
    #[must_use]
    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn set_padding(&mut self, padding: &Value) {
        self.view.padding(padding);
    }

    pub fn set_background(&mut self, background: &str) {
        self.view.background(background);
    }

    pub fn set_log_level(&mut self, level: LogLevel) {
        self.view.log_level(level);
    }

    pub fn set_renderer(&mut self, kind: RendererKind) {
        self.view.renderer(kind);
    }

    pub fn enable_hover(&mut self) {
        self.view.hover();
    }

    /// Trigger a render pass. Lifecycle guards (phase, visibility) live in
    /// the controller, which owns that state.
    pub fn run(&mut self, encode: Option<EncodeSet>) -> Result<(), EngineError> {
        self.view.run(encode)
    }

    /// Raw engine view, for listener registration.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Release the engine view's resources, consuming the handle.
    pub fn finalize(mut self) {
        self.view.finalize();
    }
}

impl<V: EngineView> fmt::Debug for ViewHandle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHandle")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
