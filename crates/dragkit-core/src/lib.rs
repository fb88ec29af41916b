//! dragkit core library
//!
//! Geometry, collision detection, drag modifiers and the drag operation state
//! machine. Sensors feed pointer signals into a [`DragDropManager`]; consumers
//! observe [`DragEvent`]s through its [`Monitor`].

pub mod collision;
pub mod geometry;
pub mod manager;
pub mod modifiers;
pub mod monitor;
pub mod operation;
pub mod registry;

pub use collision::{
    Collision, CollisionDetector, CollisionInput, CollisionPriority, CollisionType, DetectorKind,
    closest_center, closest_corners, default_collision_detection, pointer_intersection,
    resolve_target, sort_collisions,
};
pub use geometry::{BoundingRectangle, Point, Rectangle, Scale, Shape, ShapeTrait, Transform, Vec2};
pub use manager::{DragDropManager, DragError, DragResult, Layout};
pub use modifiers::{
    AxisModifier, Modifier, ModifierConfig, ModifierPipeline, RestrictToBoundsModifier,
    SnapModifier,
};
pub use monitor::{DragEvent, ListenerId, Monitor};
pub use operation::{DragOperation, Position, ShapeSnapshot, Status};
pub use registry::{Accept, Draggable, Droppable, EntityId, Registry};
