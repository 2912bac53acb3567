#![forbid(unsafe_code)]

//! Dimension calculator.
//!
//! Pure function of the container's current layout state: width comes from
//! the container, height from a fixed aspect ratio when one is set, else
//! from the container.
//!
//! # Invariants
//!
//! 1. A returned [`Size`] never carries a negative width or height.
//! 2. An unmeasurable container (zero width) yields `None`, not a
//!    degenerate zero-area size; callers skip sizing and wait for the next
//!    resize event.

use crate::container::Container;

/// Target view dimensions, in the container's measurement units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Compute the target size for a view bound to `container`.
///
/// `height = aspect_ratio * width` when a ratio is present; otherwise the
/// container's measured content height. Returns `None` when the container
/// is not yet measurable.
#[must_use]
pub fn compute_size(container: &dyn Container, aspect_ratio: Option<f64>) -> Option<Size> {
    let width = container.content_width();
    if width <= 0.0 {
        return None;
    }
    let height = match aspect_ratio {
        Some(ratio) => ratio * width,
        None => container.content_height(),
    };
    Some(Size {
        width,
        height: height.max(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        width: f64,
        height: f64,
    }

    impl Container for Fixed {
        fn content_width(&self) -> f64 {
            self.width
        }

        fn content_height(&self) -> f64 {
            self.height
        }
    }

    #[test]
    fn aspect_ratio_overrides_measured_height() {
        let container = Fixed {
            width: 400.0,
            height: 999.0,
        };
        let size = compute_size(&container, Some(0.5)).expect("measurable");
        assert_eq!(size.width, 400.0);
        assert_eq!(size.height, 200.0);
    }

    #[test]
    fn absent_ratio_uses_measured_height() {
        let container = Fixed {
            width: 400.0,
            height: 300.0,
        };
        let size = compute_size(&container, None).expect("measurable");
        assert_eq!(size.height, 300.0);
    }

    #[test]
    fn zero_width_is_not_sizeable() {
        let container = Fixed {
            width: 0.0,
            height: 300.0,
        };
        assert!(compute_size(&container, None).is_none());
        assert!(compute_size(&container, Some(0.5)).is_none());
    }

    #[test]
    fn negative_ratio_clamps_height_to_zero() {
        let container = Fixed {
            width: 100.0,
            height: 50.0,
        };
        let size = compute_size(&container, Some(-2.0)).expect("measurable");
        assert_eq!(size.height, 0.0);
    }

    #[test]
    fn negative_measured_height_clamps_to_zero() {
        let container = Fixed {
            width: 100.0,
            height: -10.0,
        };
        let size = compute_size(&container, None).expect("measurable");
        assert_eq!(size.height, 0.0);
    }
}
