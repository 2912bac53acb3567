#![forbid(unsafe_code)]

//! vismount public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub mod prelude {
    pub use vismount_core as core;
    pub use vismount_runtime as runtime;

    pub use vismount_core::container::Container;
    pub use vismount_core::diff::WatchedChanges;
    pub use vismount_core::env::{Headless, Interactive, RenderEnvironment};
    pub use vismount_core::error::{EngineError, LifecycleError};
    pub use vismount_core::events::{EventHandler, HandlerTable};
    pub use vismount_core::props::{LogLevel, RendererKind, ViewProps};
    pub use vismount_runtime::{
        EncodeSet, Engine, EngineView, LifecyclePhase, ResizeSignal, ViewController,
    };
}
