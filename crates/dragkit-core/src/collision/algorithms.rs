//! Built-in collision detection algorithms.

use super::{Collision, CollisionInput, CollisionPriority, CollisionType, inverse_distance};
use crate::geometry::{Point, ShapeTrait, distance};

/// Overlap based detection: ranks by intersection ratio, no match without overlap.
pub fn default_collision_detection(input: &CollisionInput<'_>) -> Option<Collision> {
    let droppable = input.droppable;
    let target = input.droppable_shape()?;
    let dragged = input.dragged_shape()?;

    let ratio = target.intersection_ratio(dragged);
    if ratio > 0.0 {
        Some(Collision {
            id: droppable.id.clone(),
            value: ratio,
            kind: CollisionType::Collision,
            priority: droppable.collision_priority.unwrap_or_default(),
        })
    } else {
        None
    }
}

/// Overlap first, otherwise ranks by the inverse distance between centers.
///
/// Falls back to the pointer position while the dragged entity has no shape.
pub fn closest_center(input: &CollisionInput<'_>) -> Option<Collision> {
    let droppable = input.droppable;
    let target = input.droppable_shape()?;

    if let Some(collision) = default_collision_detection(input) {
        return Some(collision);
    }

    let operation = input.operation;
    let origin = input
        .dragged_shape()
        .map(ShapeTrait::center)
        .unwrap_or(operation.position.current);

    Some(Collision {
        id: droppable.id.clone(),
        value: inverse_distance(distance(target.center(), origin)),
        kind: CollisionType::Collision,
        priority: CollisionPriority::Normal,
    })
}

/// Ranks by the inverse of the mean distance between corresponding corners.
pub fn closest_corners(input: &CollisionInput<'_>) -> Option<Collision> {
    let droppable = input.droppable;
    let target = input.droppable_shape()?;

    let operation = input.operation;
    let pointer = operation.position.current;
    let dragged: [Point; 4] = input
        .dragged_shape()
        .map(|shape| shape.corners())
        .unwrap_or([pointer; 4]);

    let total: f64 = target
        .corners()
        .iter()
        .zip(dragged.iter())
        .map(|(a, b)| distance(*a, *b))
        .sum();

    Some(Collision {
        id: droppable.id.clone(),
        value: inverse_distance(total / 4.0),
        kind: CollisionType::Collision,
        priority: CollisionPriority::Normal,
    })
}

/// Matches droppables that contain the pointer, with high priority.
pub fn pointer_intersection(input: &CollisionInput<'_>) -> Option<Collision> {
    let droppable = input.droppable;
    let target = input.droppable_shape()?;
    let pointer = input.operation.position.current;

    if !target.contains_point(pointer) {
        return None;
    }

    Some(Collision {
        id: droppable.id.clone(),
        value: inverse_distance(distance(target.center(), pointer)),
        kind: CollisionType::PointerIntersection,
        priority: CollisionPriority::High,
    })
}
