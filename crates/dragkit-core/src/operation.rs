//! State of a single drag operation.

use crate::collision::Collision;
use crate::geometry::{Point, Shape, Transform};
use crate::registry::EntityId;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a drag manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Idle,
    Dragging,
    /// Ended normally; only observable while the end event is dispatched.
    Dropped,
    /// Ended by cancellation; only observable while the end event is dispatched.
    Canceled,
}

impl Status {
    /// Check if a drag is in progress.
    pub fn is_dragging(self) -> bool {
        self == Status::Dragging
    }
}

/// Pointer positions of a drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Pointer-down position.
    pub initial: Point,
    /// Latest pointer position.
    pub current: Point,
}

impl Position {
    /// Create positions for a pointer-down at `initial`.
    pub fn new(initial: Point) -> Self {
        Self {
            initial,
            current: initial,
        }
    }

    /// Raw pointer offset since pointer-down.
    pub fn delta(&self) -> Transform {
        self.current - self.initial
    }
}

/// The dragged entity's shape at drag start and at the latest tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub initial: Shape,
    pub current: Shape,
}

/// Mutable state of the active drag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragOperation {
    /// The draggable being moved.
    pub source: EntityId,
    /// Best matching droppable as of the last resolved tick.
    pub target: Option<EntityId>,
    /// `None` while the dragged entity has no measurable shape.
    pub shape: Option<ShapeSnapshot>,
    pub position: Position,
    /// Cumulative constrained offset since drag start.
    pub transform: Transform,
    /// Ranked candidates of the last resolved tick, best first.
    pub collisions: Vec<Collision>,
    pub status: Status,
    /// Set when the operation ends by cancellation.
    pub canceled: bool,
}

impl DragOperation {
    /// A fresh operation for `source` picked up at `position`.
    pub fn new(source: EntityId, position: Point, shape: Option<Shape>) -> Self {
        Self {
            source,
            target: None,
            shape: shape.map(|initial| ShapeSnapshot {
                current: initial.clone(),
                initial,
            }),
            position: Position::new(position),
            transform: Transform::ZERO,
            collisions: Vec::new(),
            status: Status::Dragging,
            canceled: false,
        }
    }

    /// Current shape of the dragged entity, if measured.
    pub fn current_shape(&self) -> Option<&Shape> {
        self.shape.as_ref().map(|snapshot| &snapshot.current)
    }

    /// Shape of the dragged entity at drag start, if measured.
    pub fn initial_shape(&self) -> Option<&Shape> {
        self.shape.as_ref().map(|snapshot| &snapshot.initial)
    }

    /// Apply a constrained transform, moving the current shape with it.
    pub(crate) fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
        if let Some(snapshot) = self.shape.as_mut() {
            snapshot.current = snapshot.initial.translated_by(transform);
        }
    }
}
