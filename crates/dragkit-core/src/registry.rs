//! Registered draggable and droppable entities.

use crate::collision::{CollisionDetector, CollisionPriority, default_collision_detection};
use crate::geometry::Shape;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use uuid::Uuid;

/// Identity of a draggable or droppable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Create an identity from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Which draggable types a droppable receives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accept {
    /// Any draggable, typed or not.
    #[default]
    Any,
    /// Only draggables whose type is in the set.
    Types(BTreeSet<String>),
}

impl Accept {
    /// Accept a fixed list of type tags.
    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Accept::Types(types.into_iter().map(Into::into).collect())
    }

    /// Check a draggable type tag against this rule.
    pub fn accepts(&self, kind: Option<&str>) -> bool {
        match self {
            Accept::Any => true,
            Accept::Types(types) => kind.is_some_and(|kind| types.contains(kind)),
        }
    }
}

/// An entity that can be picked up and moved.
#[derive(Debug, Clone)]
pub struct Draggable {
    pub id: EntityId,
    /// Last measured shape, `None` until measured.
    pub shape: Option<Shape>,
    /// Group/type tag matched against droppable accept rules.
    pub kind: Option<String>,
    /// Owner-defined data.
    pub data: serde_json::Value,
    pub disabled: bool,
}

impl Draggable {
    /// Create an enabled draggable with no shape or type.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            shape: None,
            kind: None,
            data: serde_json::Value::Null,
            disabled: false,
        }
    }

    /// Set the registered shape.
    pub fn with_shape(mut self, shape: impl Into<Shape>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    /// Set the type tag droppables filter on.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Attach owner data.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// A region that can receive a draggable.
#[derive(Clone)]
pub struct Droppable {
    pub id: EntityId,
    /// Last measured shape, `None` if not measured or hidden.
    pub shape: Option<Shape>,
    pub accept: Accept,
    /// Overrides the priority reported by overlap-based detection.
    pub collision_priority: Option<CollisionPriority>,
    /// Algorithm used to test this droppable.
    pub collision_detector: CollisionDetector,
    /// Owner-defined data.
    pub data: serde_json::Value,
    pub disabled: bool,
}

impl fmt::Debug for Droppable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Droppable")
            .field("id", &self.id)
            .field("shape", &self.shape)
            .field("accept", &self.accept)
            .field("collision_priority", &self.collision_priority)
            .field("data", &self.data)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl Droppable {
    /// Create an enabled droppable that accepts anything.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            shape: None,
            accept: Accept::Any,
            collision_priority: None,
            collision_detector: default_collision_detection,
            data: serde_json::Value::Null,
            disabled: false,
        }
    }

    /// Set the registered shape.
    pub fn with_shape(mut self, shape: impl Into<Shape>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    /// Set which draggable types are accepted.
    pub fn with_accept(mut self, accept: Accept) -> Self {
        self.accept = accept;
        self
    }

    /// Override the collision priority.
    pub fn with_priority(mut self, priority: CollisionPriority) -> Self {
        self.collision_priority = Some(priority);
        self
    }

    /// Use a different collision detector.
    pub fn with_detector(mut self, detector: CollisionDetector) -> Self {
        self.collision_detector = detector;
        self
    }

    /// Attach owner data.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Whether this droppable can currently receive `draggable`.
    pub fn accepts(&self, draggable: &Draggable) -> bool {
        !self.disabled && self.accept.accepts(draggable.kind.as_deref())
    }
}

/// Live set of registered entities, iterated in registration order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    draggables: HashMap<EntityId, Draggable>,
    draggable_order: Vec<EntityId>,
    droppables: HashMap<EntityId, Droppable>,
    droppable_order: Vec<EntityId>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a draggable, replacing any registration with the same id in place.
    pub fn register_draggable(&mut self, draggable: Draggable) {
        if !self.draggables.contains_key(&draggable.id) {
            self.draggable_order.push(draggable.id.clone());
        }
        self.draggables.insert(draggable.id.clone(), draggable);
    }

    /// Register a droppable, replacing any registration with the same id in place.
    pub fn register_droppable(&mut self, droppable: Droppable) {
        if !self.droppables.contains_key(&droppable.id) {
            self.droppable_order.push(droppable.id.clone());
        }
        self.droppables.insert(droppable.id.clone(), droppable);
    }

    /// Remove a draggable, returning it if it was registered.
    pub fn unregister_draggable(&mut self, id: &EntityId) -> Option<Draggable> {
        let removed = self.draggables.remove(id)?;
        self.draggable_order.retain(|other| other != id);
        Some(removed)
    }

    /// Remove a droppable, returning it if it was registered.
    pub fn unregister_droppable(&mut self, id: &EntityId) -> Option<Droppable> {
        let removed = self.droppables.remove(id)?;
        self.droppable_order.retain(|other| other != id);
        Some(removed)
    }

    /// Get a draggable by id.
    pub fn draggable(&self, id: &EntityId) -> Option<&Draggable> {
        self.draggables.get(id)
    }

    /// Get a mutable draggable by id.
    pub fn draggable_mut(&mut self, id: &EntityId) -> Option<&mut Draggable> {
        self.draggables.get_mut(id)
    }

    /// Get a droppable by id.
    pub fn droppable(&self, id: &EntityId) -> Option<&Droppable> {
        self.droppables.get(id)
    }

    /// Get a mutable droppable by id.
    pub fn droppable_mut(&mut self, id: &EntityId) -> Option<&mut Droppable> {
        self.droppables.get_mut(id)
    }

    /// Draggables in registration order.
    pub fn draggables(&self) -> impl Iterator<Item = &Draggable> {
        self.draggable_order
            .iter()
            .filter_map(|id| self.draggables.get(id))
    }

    /// Droppables in registration order.
    pub fn droppables(&self) -> impl Iterator<Item = &Droppable> {
        self.droppable_order
            .iter()
            .filter_map(|id| self.droppables.get(id))
    }

    /// Enabled droppables whose accept rule admits `draggable`.
    pub fn eligible_droppables<'a>(
        &'a self,
        draggable: &'a Draggable,
    ) -> impl Iterator<Item = &'a Droppable> + 'a {
        self.droppables().filter(move |droppable| droppable.accepts(draggable))
    }

    /// Number of registered draggables.
    pub fn draggable_count(&self) -> usize {
        self.draggables.len()
    }

    /// Number of registered droppables.
    pub fn droppable_count(&self) -> usize {
        self.droppables.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.draggables.is_empty() && self.droppables.is_empty()
    }
}
