//! Collision detection between the dragged shape and droppables.
//!
//! A detector inspects one droppable at a time and returns an optional ranked
//! [`Collision`]. The manager collects the results for every eligible droppable
//! and resolves the best target with [`sort_collisions`]: higher
//! [`CollisionPriority`] first, then higher [`Collision::value`].

mod algorithms;

pub use algorithms::{
    closest_center, closest_corners, default_collision_detection, pointer_intersection,
};

use crate::geometry::Shape;
use crate::operation::DragOperation;
use crate::registry::{Droppable, EntityId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Primary tie-break between collisions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPriority {
    Low,
    #[default]
    Normal,
    High,
}

/// What kind of match a collision represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionType {
    #[default]
    Collision,
    ShapeIntersection,
    PointerIntersection,
}

/// A ranked candidate match between the dragged shape and a droppable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    /// The droppable this collision refers to.
    pub id: EntityId,
    /// Ranking score, higher is better.
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: CollisionType,
    pub priority: CollisionPriority,
}

/// Input handed to a [`CollisionDetector`].
#[derive(Debug, Clone, Copy)]
pub struct CollisionInput<'a> {
    pub operation: &'a DragOperation,
    pub droppable: &'a Droppable,
}

impl<'a> CollisionInput<'a> {
    /// The droppable's shape, if measured with finite coordinates.
    pub fn droppable_shape(&self) -> Option<&'a Shape> {
        self.droppable.shape.as_ref().filter(|shape| shape.is_finite())
    }

    /// The dragged entity's current shape, if measured with finite coordinates.
    pub fn dragged_shape(&self) -> Option<&'a Shape> {
        self.operation
            .current_shape()
            .filter(|shape| shape.is_finite())
    }
}

/// Tests one droppable against the current drag operation.
pub type CollisionDetector = fn(&CollisionInput<'_>) -> Option<Collision>;

/// Built-in detectors, selectable by name in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectorKind {
    #[default]
    Default,
    ClosestCenter,
    ClosestCorners,
    PointerIntersection,
}

impl DetectorKind {
    /// Get the detector function for this kind.
    pub fn detector(self) -> CollisionDetector {
        match self {
            DetectorKind::Default => default_collision_detection,
            DetectorKind::ClosestCenter => closest_center,
            DetectorKind::ClosestCorners => closest_corners,
            DetectorKind::PointerIntersection => pointer_intersection,
        }
    }
}

/// Ordering that puts the better collision first.
pub fn compare_collisions(a: &Collision, b: &Collision) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| b.value.total_cmp(&a.value))
}

/// Sort collisions best first. Full ties keep their input order.
pub fn sort_collisions(collisions: &mut [Collision]) {
    collisions.sort_by(compare_collisions);
}

/// The winning droppable among `collisions`, if any.
pub fn resolve_target(collisions: &[Collision]) -> Option<&Collision> {
    collisions.iter().min_by(|a, b| compare_collisions(a, b))
}

/// Inverse distance ranking, with zero distance as the strongest possible match.
pub(crate) fn inverse_distance(distance: f64) -> f64 {
    if distance > 0.0 {
        1.0 / distance
    } else {
        f64::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collision(id: &str, value: f64, priority: CollisionPriority) -> Collision {
        Collision {
            id: id.into(),
            value,
            kind: CollisionType::Collision,
            priority,
        }
    }

    #[test]
    fn test_priority_beats_value() {
        let mut collisions = vec![
            collision("normal", 0.5, CollisionPriority::Normal),
            collision("high", 0.5, CollisionPriority::High),
        ];
        sort_collisions(&mut collisions);
        assert_eq!(collisions[0].id.as_str(), "high");

        let mut collisions = vec![
            collision("normal", 0.9, CollisionPriority::Normal),
            collision("high", 0.1, CollisionPriority::High),
            collision("low", 1.0, CollisionPriority::Low),
        ];
        sort_collisions(&mut collisions);
        let order: Vec<_> = collisions.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, ["high", "normal", "low"]);
    }

    #[test]
    fn test_value_breaks_equal_priority() {
        let collisions = vec![
            collision("a", 0.2, CollisionPriority::Normal),
            collision("b", 0.7, CollisionPriority::Normal),
        ];
        assert_eq!(resolve_target(&collisions).unwrap().id.as_str(), "b");
    }

    #[test]
    fn test_full_tie_keeps_first() {
        let collisions = vec![
            collision("first", 0.5, CollisionPriority::Normal),
            collision("second", 0.5, CollisionPriority::Normal),
        ];
        assert_eq!(resolve_target(&collisions).unwrap().id.as_str(), "first");
        let mut sorted = collisions.clone();
        sort_collisions(&mut sorted);
        assert_eq!(sorted, collisions);
    }

    #[test]
    fn test_resolve_empty() {
        assert!(resolve_target(&[]).is_none());
    }

    #[test]
    fn test_inverse_distance() {
        assert_eq!(inverse_distance(4.0), 0.25);
        assert_eq!(inverse_distance(0.0), f64::MAX);
    }

    #[test]
    fn test_collision_serde() {
        let json = serde_json::to_value(collision("zone", 0.25, CollisionPriority::High)).unwrap();
        assert_eq!(json["id"], "zone");
        assert_eq!(json["type"], "collision");
        assert_eq!(json["priority"], "high");
    }

    #[test]
    fn test_detector_kind_from_config() {
        let kind: DetectorKind = serde_json::from_str(r#""closest_center""#).unwrap();
        assert_eq!(kind, DetectorKind::ClosestCenter);
    }
}
