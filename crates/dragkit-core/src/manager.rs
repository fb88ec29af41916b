//! Drag operation manager.
//!
//! The manager owns the registry and the single active [`DragOperation`]. It
//! consumes sensor signals (`start`, `move_by`/`move_to`, `end`, `cancel`) and
//! runs one tick per movement:
//!
//! 1. raw transform = current pointer position - pointer-down position
//! 2. the modifier pipeline constrains it
//! 3. the dragged shape is translated from its initial shape
//! 4. eligible droppables are re-measured through the [`Layout`], if any
//! 5. each droppable's collision detector runs
//! 6. the best collision becomes the target
//! 7. `Over` is emitted when the target changed, then `Move`
//!
//! Status moves `Idle -> Dragging -> Dropped | Canceled -> Idle`.

use crate::collision::{Collision, CollisionInput, sort_collisions};
use crate::geometry::{Point, Shape, Transform};
use crate::modifiers::{Modifier, ModifierPipeline};
use crate::monitor::{DragEvent, Monitor};
use crate::operation::{DragOperation, ShapeSnapshot, Status};
use crate::registry::{Draggable, Droppable, EntityId, Registry};
use std::fmt;
use thiserror::Error;

/// Misuse of the drag state machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DragError {
    #[error("A drag of {active} is already in progress")]
    AlreadyDragging { active: EntityId },
    #[error("No drag operation is in progress")]
    NotDragging,
    #[error("Draggable not registered: {0}")]
    UnknownDraggable(EntityId),
    #[error("Draggable is disabled: {0}")]
    DraggableDisabled(EntityId),
    #[error("Pointer input must be finite")]
    NonFiniteInput,
}

/// Result type for drag manager signals.
pub type DragResult<T> = Result<T, DragError>;

/// Measures the current shape of a registered entity.
///
/// Returning `None` marks the entity as non-participating until the next
/// measurement. Implementations must not have side effects the manager can
/// observe.
pub trait Layout {
    fn measure(&self, id: &EntityId) -> Option<Shape>;
}

impl<F> Layout for F
where
    F: Fn(&EntityId) -> Option<Shape>,
{
    fn measure(&self, id: &EntityId) -> Option<Shape> {
        self(id)
    }
}

/// Owns the registry and drives the active drag operation.
#[derive(Default)]
pub struct DragDropManager {
    registry: Registry,
    layout: Option<Box<dyn Layout>>,
    modifiers: ModifierPipeline,
    monitor: Monitor,
    operation: Option<DragOperation>,
    /// Snapshot of the dragged entity taken at start; survives unregistration.
    source: Option<Draggable>,
    status: Status,
}

impl fmt::Debug for DragDropManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragDropManager")
            .field("registry", &self.registry)
            .field("layout", &self.layout.is_some())
            .field("modifiers", &self.modifiers)
            .field("monitor", &self.monitor)
            .field("operation", &self.operation)
            .field("status", &self.status)
            .finish()
    }
}

impl DragDropManager {
    /// Create a manager with an empty registry and no layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure shapes through `layout` instead of the registered snapshots.
    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.set_layout(layout);
        self
    }

    /// Install the layout used to measure shapes.
    pub fn set_layout(&mut self, layout: impl Layout + 'static) {
        self.layout = Some(Box::new(layout));
    }

    /// Remove the layout; registered shapes are used as-is.
    pub fn clear_layout(&mut self) {
        self.layout = None;
    }

    /// Get the registry of draggables and droppables.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register a draggable, replacing any with the same id.
    pub fn register_draggable(&mut self, draggable: Draggable) {
        self.registry.register_draggable(draggable);
    }

    /// Register a droppable, replacing any with the same id.
    pub fn register_droppable(&mut self, droppable: Droppable) {
        self.registry.register_droppable(droppable);
    }

    /// Unregister a draggable. Unregistering the dragged entity turns the next `end` into a cancel.
    pub fn unregister_draggable(&mut self, id: &EntityId) -> Option<Draggable> {
        self.registry.unregister_draggable(id)
    }

    /// Unregister a droppable. It drops out of consideration from the next tick.
    pub fn unregister_droppable(&mut self, id: &EntityId) -> Option<Droppable> {
        self.registry.unregister_droppable(id)
    }

    /// Get the modifier pipeline.
    pub fn modifiers(&self) -> &ModifierPipeline {
        &self.modifiers
    }

    /// Get the modifier pipeline mutably.
    pub fn modifiers_mut(&mut self) -> &mut ModifierPipeline {
        &mut self.modifiers
    }

    /// Append a modifier to the pipeline.
    pub fn add_modifier(&mut self, modifier: impl Modifier + 'static) {
        self.modifiers.push(modifier);
    }

    /// Event listeners. Clone the handle to subscribe from elsewhere.
    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    /// Get the current lifecycle status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Check if a drag operation is active.
    pub fn is_dragging(&self) -> bool {
        self.operation.is_some()
    }

    /// The active drag operation, if any.
    pub fn operation(&self) -> Option<&DragOperation> {
        self.operation.as_ref()
    }

    /// Pick up `id` at pointer `position`.
    pub fn start(&mut self, id: impl Into<EntityId>, position: Point) -> DragResult<()> {
        let id = id.into();
        if let Some(active) = &self.operation {
            log::warn!("Rejected drag start of {}: {} is already dragging", id, active.source);
            return Err(DragError::AlreadyDragging {
                active: active.source.clone(),
            });
        }
        ensure_finite(position.x, position.y)?;

        let draggable = self
            .registry
            .draggable(&id)
            .ok_or_else(|| DragError::UnknownDraggable(id.clone()))?;
        if draggable.disabled {
            return Err(DragError::DraggableDisabled(id));
        }
        let draggable = draggable.clone();

        let shape = self.measure_draggable(&id, draggable.shape.as_ref());
        let operation = DragOperation::new(id, position, shape);
        log::debug!(
            "Drag start: {} at ({}, {})",
            operation.source,
            position.x,
            position.y
        );

        self.status = Status::Dragging;
        self.source = Some(draggable);
        self.measure_droppables();
        self.monitor.dispatch(&DragEvent::Start(&operation));
        self.operation = Some(operation);
        Ok(())
    }

    /// The pointer moved by `delta` since the previous signal.
    pub fn move_by(&mut self, delta: Transform) -> DragResult<()> {
        ensure_finite(delta.x, delta.y)?;
        let mut operation = self.take_operation()?;
        operation.position.current += delta;
        self.tick(operation);
        Ok(())
    }

    /// The pointer is now at `position`.
    pub fn move_to(&mut self, position: Point) -> DragResult<()> {
        ensure_finite(position.x, position.y)?;
        let mut operation = self.take_operation()?;
        operation.position.current = position;
        self.tick(operation);
        Ok(())
    }

    /// Re-run detection without pointer motion, e.g. after a scroll or resize.
    pub fn refresh(&mut self) -> DragResult<()> {
        let operation = self.take_operation()?;
        self.tick(operation);
        Ok(())
    }

    /// Drop at the current position.
    ///
    /// If the dragged entity was unregistered mid-drag there is nothing left to
    /// drop and the operation ends as canceled.
    pub fn end(&mut self) -> DragResult<DragOperation> {
        let Some(operation) = &self.operation else {
            log::warn!("Rejected drag end: no drag in progress");
            return Err(DragError::NotDragging);
        };
        let canceled = self.registry.draggable(&operation.source).is_none();
        if canceled {
            log::debug!("Drag source {} was unregistered; canceling", operation.source);
        }
        self.finish(canceled)
    }

    /// Abort the drag. Consumers should roll back optimistic changes.
    pub fn cancel(&mut self) -> DragResult<DragOperation> {
        if self.operation.is_none() {
            log::warn!("Rejected drag cancel: no drag in progress");
            return Err(DragError::NotDragging);
        }
        self.finish(true)
    }

    fn take_operation(&mut self) -> DragResult<DragOperation> {
        self.operation.take().ok_or_else(|| {
            log::warn!("Rejected drag move: no drag in progress");
            DragError::NotDragging
        })
    }

    fn tick(&mut self, mut operation: DragOperation) {
        if operation.shape.is_none() {
            let stored = self
                .source
                .as_ref()
                .and_then(|source| source.shape.clone());
            if let Some(shape) = self.measure_draggable(&operation.source, stored.as_ref()) {
                operation.shape = Some(ShapeSnapshot {
                    current: shape.clone(),
                    initial: shape,
                });
            }
        }

        let proposed = operation.position.delta();
        let transform = self.modifiers.apply(&mut operation, proposed);
        operation.set_transform(transform);
        log::trace!(
            "Drag tick: {} transform ({}, {})",
            operation.source,
            transform.x,
            transform.y
        );

        self.measure_droppables();
        let collisions = self.detect_collisions(&operation);
        let previous_target = operation.target.take();
        operation.target = collisions.first().map(|collision| collision.id.clone());
        operation.collisions = collisions;

        if previous_target != operation.target {
            log::debug!(
                "Drag over: {:?} -> {:?}",
                previous_target.as_ref().map(EntityId::as_str),
                operation.target.as_ref().map(EntityId::as_str)
            );
            self.monitor.dispatch(&DragEvent::Over {
                operation: &operation,
                previous_target: previous_target.as_ref(),
                target: operation.target.as_ref(),
            });
        }
        self.monitor.dispatch(&DragEvent::Move(&operation));
        self.operation = Some(operation);
    }

    fn finish(&mut self, canceled: bool) -> DragResult<DragOperation> {
        let mut operation = self.operation.take().ok_or(DragError::NotDragging)?;
        self.source = None;

        // Droppables unregistered since the last tick can no longer receive the drop.
        operation
            .collisions
            .retain(|collision| self.registry.droppable(&collision.id).is_some());
        let stale_target = operation
            .target
            .as_ref()
            .is_some_and(|target| self.registry.droppable(target).is_none());
        if stale_target {
            log::debug!("Drag target {:?} was unregistered before the drop", operation.target);
            operation.target = None;
        }

        operation.canceled = canceled;
        operation.status = if canceled {
            Status::Canceled
        } else {
            Status::Dropped
        };
        self.status = operation.status;
        log::debug!(
            "Drag end: {} onto {:?} (canceled: {})",
            operation.source,
            operation.target.as_ref().map(EntityId::as_str),
            canceled
        );

        self.monitor.dispatch(&DragEvent::End(&operation));
        self.status = Status::Idle;
        Ok(operation)
    }

    fn measure_draggable(&mut self, id: &EntityId, stored: Option<&Shape>) -> Option<Shape> {
        let Some(layout) = self.layout.as_ref() else {
            return stored.cloned();
        };
        let shape = measure_finite(&**layout, id);
        if let Some(draggable) = self.registry.draggable_mut(id) {
            draggable.shape = shape.clone();
        }
        shape
    }

    /// Refresh shapes of every droppable the dragged entity may hit.
    fn measure_droppables(&mut self) {
        let (Some(layout), Some(source)) = (self.layout.as_ref(), self.source.as_ref()) else {
            return;
        };
        let ids: Vec<EntityId> = self
            .registry
            .eligible_droppables(source)
            .map(|droppable| droppable.id.clone())
            .collect();
        for id in ids {
            let shape = measure_finite(&**layout, &id);
            if let Some(droppable) = self.registry.droppable_mut(&id) {
                droppable.shape = shape;
            }
        }
    }

    fn detect_collisions(&self, operation: &DragOperation) -> Vec<Collision> {
        let Some(source) = self.source.as_ref() else {
            return Vec::new();
        };
        let mut collisions: Vec<Collision> = self
            .registry
            .eligible_droppables(source)
            .filter_map(|droppable| {
                (droppable.collision_detector)(&CollisionInput {
                    operation,
                    droppable,
                })
            })
            .collect();
        sort_collisions(&mut collisions);
        collisions
    }
}

/// Measure through `layout`, treating a non-finite shape as unmeasured.
fn measure_finite(layout: &dyn Layout, id: &EntityId) -> Option<Shape> {
    let shape = layout.measure(id)?;
    if shape.is_finite() {
        Some(shape)
    } else {
        log::warn!("Ignoring non-finite shape measured for {}", id);
        None
    }
}

fn ensure_finite(x: f64, y: f64) -> DragResult<()> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        log::warn!("Rejected non-finite pointer input ({}, {})", x, y);
        Err(DragError::NonFiniteInput)
    }
}
