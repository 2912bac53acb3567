#![forbid(unsafe_code)]

//! Runtime: engine collaborator traits, view handle, resize scheduling,
//! and the lifecycle controller.

pub mod binder;
pub mod controller;
pub mod engine;
pub mod handle;
pub mod scheduler;
pub mod signal;

pub use binder::ListenerChannel;
pub use controller::{LifecyclePhase, ViewController};
pub use engine::{EncodeSet, Engine, EngineView};
pub use handle::ViewHandle;
pub use scheduler::{DebounceGate, FrameLatch, RESIZE_DEBOUNCE, ResizeScheduler};
pub use signal::{ResizeSignal, ResizeSubscription};
