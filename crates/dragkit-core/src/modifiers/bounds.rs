//! Keep the dragged shape inside a bounding rectangle.

use super::Modifier;
use crate::geometry::{BoundingRectangle, ShapeTrait, Transform};
use crate::operation::DragOperation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsOptions {
    pub bounds: BoundingRectangle,
}

/// Clamps the transform so the dragged shape never leaves `bounds`.
///
/// Use [`BoundingRectangle::viewport`] to keep a drag inside the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct RestrictToBoundsModifier {
    options: Option<BoundsOptions>,
}

impl RestrictToBoundsModifier {
    /// An unconfigured modifier; passes transforms through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a modifier with the given options.
    pub fn configure(options: BoundsOptions) -> Self {
        Self {
            options: Some(options),
        }
    }

    /// Get the configured options.
    pub fn options(&self) -> Option<BoundsOptions> {
        self.options
    }
}

impl Modifier for RestrictToBoundsModifier {
    fn apply(&self, operation: &DragOperation) -> Transform {
        let transform = operation.transform;
        let (Some(options), Some(shape)) = (self.options, operation.initial_shape()) else {
            return transform;
        };

        let shape = shape.bounding_rectangle();
        let bounds = options.bounds;
        Transform::new(
            clamp_axis(transform.x, bounds.left - shape.left, bounds.right - shape.right),
            clamp_axis(transform.y, bounds.top - shape.top, bounds.bottom - shape.bottom),
        )
    }
}

/// Clamp into `[min, max]`; an oversized shape (`min > max`) pins to `min`.
fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if min > max {
        min
    } else {
        value.max(min).min(max)
    }
}
