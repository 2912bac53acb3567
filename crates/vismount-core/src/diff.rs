#![forbid(unsafe_code)]

//! Narrow attribute-diff contract between host and controller.
//!
//! The host watches exactly two attributes — visibility and aspect ratio —
//! and reports their before/after pairs in a [`WatchedChanges`] value.
//! The controller's update transition depends only on this contract, not
//! on the host's full diffing machinery.

/// Before/after pair for one watched attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Change<T> {
    pub old: T,
    pub new: T,
}

impl<T: PartialEq> Change<T> {
    /// Whether the value actually changed.
    #[must_use]
    pub fn differs(&self) -> bool {
        self.old != self.new
    }
}

/// Changes to the attributes the lifecycle state machine reacts to.
///
/// A `None` field means the attribute did not change this update. Every
/// other host attribute is invisible to the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WatchedChanges {
    pub is_visible: Option<Change<Option<bool>>>,
    pub aspect_ratio: Option<Change<Option<f64>>>,
}

impl WatchedChanges {
    /// A visibility-only change.
    #[must_use]
    pub fn visibility(old: Option<bool>, new: Option<bool>) -> Self {
        Self {
            is_visible: Some(Change { old, new }),
            ..Self::default()
        }
    }

    /// An aspect-ratio-only change.
    #[must_use]
    pub fn aspect(old: Option<f64>, new: Option<f64>) -> Self {
        Self {
            aspect_ratio: Some(Change { old, new }),
            ..Self::default()
        }
    }

    /// Whether anything at all was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_visible.is_none() && self.aspect_ratio.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn differs_on_actual_change() {
        assert!(Change { old: Some(1.0), new: Some(2.0) }.differs());
        assert!(Change { old: None, new: Some(2.0) }.differs());
        assert!(!Change { old: Some(2.0), new: Some(2.0) }.differs());
    }

    #[test]
    fn empty_reports_nothing() {
        assert!(WatchedChanges::default().is_empty());
        assert!(!WatchedChanges::visibility(Some(false), Some(true)).is_empty());
        assert!(!WatchedChanges::aspect(None, Some(0.5)).is_empty());
    }
}
