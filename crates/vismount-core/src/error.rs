#![forbid(unsafe_code)]

//! Error taxonomy for mount and render failures.
//!
//! Two failure classes surface to the host: a missing specification (a
//! mount precondition, never retried) and engine failures (passed through
//! without interpretation). Everything else the lifecycle encounters —
//! absent handles, empty tables, guarded render passes, unmeasurable
//! containers — is an expected race between phases and stays silent.

use std::error::Error;
use std::fmt;

/// Failure raised by the engine collaborator, carried unmodified.
///
/// The controller never interprets or retries engine failures; the
/// original error stays reachable via [`source`](Error::source).
pub struct EngineError(Box<dyn Error + 'static>);

impl EngineError {
    /// Wrap a structured engine error.
    pub fn new(err: impl Error + 'static) -> Self {
        Self(Box::new(err))
    }

    /// Wrap a bare message, for engines without structured errors.
    pub fn msg(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }

    /// The underlying engine error.
    #[must_use]
    pub fn inner(&self) -> &(dyn Error + 'static) {
        &*self.0
    }
}

impl fmt::Debug for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EngineError").field(&self.0.to_string()).finish()
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.0)
    }
}

/// Errors surfaced to the host by the lifecycle controller.
#[derive(Debug)]
pub enum LifecycleError {
    /// Mount was attempted without a specification document. Fatal; the
    /// mount is aborted before any view is constructed.
    MissingSpec,
    /// The engine rejected the spec/config or failed during a render pass.
    Engine(EngineError),
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSpec => write!(f, "mount requires a specification document"),
            Self::Engine(err) => write!(f, "engine failure: {err}"),
        }
    }
}

impl Error for LifecycleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingSpec => None,
            Self::Engine(err) => Some(err),
        }
    }
}

impl From<EngineError> for LifecycleError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}
