//! Axis restriction.

use super::Modifier;
use crate::geometry::Transform;
use crate::operation::DragOperation;
use serde::{Deserialize, Serialize};

/// A transform axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Pin `axis` to `value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisOptions {
    pub axis: Axis,
    pub value: f64,
}

/// Pins one axis of the transform regardless of pointer motion.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisModifier {
    options: Option<AxisOptions>,
}

impl AxisModifier {
    /// An unconfigured modifier; passes transforms through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a modifier with the given options.
    pub fn configure(options: AxisOptions) -> Self {
        Self {
            options: Some(options),
        }
    }

    /// Get the configured options.
    pub fn options(&self) -> Option<AxisOptions> {
        self.options
    }
}

impl Modifier for AxisModifier {
    fn apply(&self, operation: &DragOperation) -> Transform {
        let transform = operation.transform;
        let Some(AxisOptions { axis, value }) = self.options else {
            return transform;
        };

        match axis {
            Axis::X => Transform::new(value, transform.y),
            Axis::Y => Transform::new(transform.x, value),
        }
    }
}

/// Only vertical movement: pins `x` to zero.
pub fn restrict_to_vertical_axis() -> AxisModifier {
    AxisModifier::configure(AxisOptions {
        axis: Axis::X,
        value: 0.0,
    })
}

/// Only horizontal movement: pins `y` to zero.
pub fn restrict_to_horizontal_axis() -> AxisModifier {
    AxisModifier::configure(AxisOptions {
        axis: Axis::Y,
        value: 0.0,
    })
}
