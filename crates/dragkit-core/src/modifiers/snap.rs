//! Snap-to-grid.

use super::Modifier;
use crate::geometry::Transform;
use crate::operation::DragOperation;
use serde::{Deserialize, Serialize};

/// Grid cell size used when the options omit one.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Grid cell size, uniform or per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridSize {
    Uniform(f64),
    PerAxis { x: f64, y: f64 },
}

impl GridSize {
    /// Cell size along x and y.
    pub fn axes(self) -> (f64, f64) {
        match self {
            GridSize::Uniform(size) => (size, size),
            GridSize::PerAxis { x, y } => (x, y),
        }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        GridSize::Uniform(DEFAULT_GRID_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SnapOptions {
    #[serde(default)]
    pub size: GridSize,
}

/// Rounds each axis of the transform up to the next grid multiple.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapModifier {
    options: Option<SnapOptions>,
}

impl SnapModifier {
    /// An unconfigured modifier; passes transforms through unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a modifier with the given options.
    pub fn configure(options: SnapOptions) -> Self {
        Self {
            options: Some(options),
        }
    }

    /// Get the configured options.
    pub fn options(&self) -> Option<SnapOptions> {
        self.options
    }
}

impl Modifier for SnapModifier {
    fn apply(&self, operation: &DragOperation) -> Transform {
        match self.options {
            Some(options) => snap_to_grid(operation.transform, options.size),
            None => operation.transform,
        }
    }
}

/// Round `transform` up to the next multiple of `size` on each axis.
pub fn snap_to_grid(transform: Transform, size: GridSize) -> Transform {
    let (x, y) = size.axes();
    Transform::new(snap_axis(transform.x, x), snap_axis(transform.y, y))
}

fn snap_axis(value: f64, size: f64) -> f64 {
    // Unusable cell sizes leave the axis alone.
    if !(size.is_finite() && size > 0.0) {
        return value;
    }
    (value / size).ceil() * size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn with_transform(transform: Transform) -> DragOperation {
        let mut op = DragOperation::new("item".into(), Point::ZERO, None);
        op.transform = transform;
        op
    }

    #[test]
    fn test_snap_per_axis_size() {
        let snapped = snap_to_grid(Transform::new(13.0, 4.0), GridSize::PerAxis { x: 20.0, y: 10.0 });
        assert_eq!(snapped, Transform::new(20.0, 10.0));
    }

    #[test]
    fn test_snap_rounds_up() {
        let snapped = snap_to_grid(Transform::new(21.0, -13.0), GridSize::Uniform(20.0));
        assert_eq!(snapped, Transform::new(40.0, 0.0));
        let snapped = snap_to_grid(Transform::new(-21.0, 40.0), GridSize::Uniform(20.0));
        assert_eq!(snapped, Transform::new(-20.0, 40.0));
    }

    #[test]
    fn test_snap_is_idempotent() {
        let size = GridSize::PerAxis { x: 20.0, y: 10.0 };
        for t in [
            Transform::new(13.0, 4.0),
            Transform::new(-37.0, 91.0),
            Transform::new(0.0, 0.0),
            Transform::new(200.5, -0.5),
        ] {
            let once = snap_to_grid(t, size);
            assert_eq!(snap_to_grid(once, size), once);
        }
    }

    #[test]
    fn test_unconfigured_is_identity() {
        let t = Transform::new(13.0, 4.0);
        assert_eq!(SnapModifier::new().apply(&with_transform(t)), t);
    }

    #[test]
    fn test_configured_modifier() {
        let modifier = SnapModifier::configure(SnapOptions::default());
        assert_eq!(
            modifier.apply(&with_transform(Transform::new(1.0, 21.0))),
            Transform::new(20.0, 40.0)
        );
    }

    #[test]
    fn test_invalid_size_leaves_axis() {
        let snapped = snap_to_grid(Transform::new(13.0, 4.0), GridSize::PerAxis { x: 0.0, y: 10.0 });
        assert_eq!(snapped, Transform::new(13.0, 10.0));
    }

    #[test]
    fn test_grid_size_serde() {
        let uniform: SnapOptions = serde_json::from_str(r#"{"size": 15}"#).unwrap();
        assert_eq!(uniform.size, GridSize::Uniform(15.0));
        let per_axis: SnapOptions = serde_json::from_str(r#"{"size": {"x": 20, "y": 10}}"#).unwrap();
        assert_eq!(per_axis.size.axes(), (20.0, 10.0));
        let omitted: SnapOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(omitted.size.axes(), (DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE));
    }
}
