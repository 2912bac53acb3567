#![forbid(unsafe_code)]

//! Host container measurement seam.

/// A view's host container, measured in the host's layout units.
///
/// The controller measures on mount and on every resize pass; the host
/// decides what "content width" means (padding excluded, borders excluded,
/// whatever its layout system reports).
pub trait Container {
    /// Current content width of the container.
    fn content_width(&self) -> f64;

    /// Current content height of the container.
    fn content_height(&self) -> f64;
}
