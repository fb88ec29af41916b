//! Scenario files: entities, modifiers and a recorded list of sensor signals.

use dragkit_core::{
    Accept, Collision, CollisionPriority, DetectorKind, DragDropManager, DragError, DragEvent,
    Draggable, Droppable, EntityId, ModifierConfig, Point, Shape, Transform,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read scenario {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Signal {index} rejected: {source}")]
    Signal {
        index: usize,
        #[source]
        source: DragError,
    },
    #[error("Failed to write output: {0}")]
    Write(#[source] std::io::Error),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

#[derive(Debug, Clone, Deserialize)]
pub struct DraggableSpec {
    pub id: EntityId,
    #[serde(default)]
    pub shape: Option<Shape>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub disabled: bool,
}

impl From<DraggableSpec> for Draggable {
    fn from(spec: DraggableSpec) -> Self {
        let mut draggable = Draggable::new(spec.id).with_data(spec.data);
        draggable.shape = spec.shape;
        draggable.kind = spec.kind;
        draggable.disabled = spec.disabled;
        draggable
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DroppableSpec {
    pub id: EntityId,
    #[serde(default)]
    pub shape: Option<Shape>,
    #[serde(default)]
    pub accept: Accept,
    #[serde(default)]
    pub priority: Option<CollisionPriority>,
    /// Overrides the scenario-wide detector.
    #[serde(default)]
    pub detector: Option<DetectorKind>,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub disabled: bool,
}

impl DroppableSpec {
    fn into_droppable(self, fallback: DetectorKind) -> Droppable {
        let mut droppable = Droppable::new(self.id)
            .with_accept(self.accept)
            .with_detector(self.detector.unwrap_or(fallback).detector())
            .with_data(self.data);
        droppable.shape = self.shape;
        droppable.collision_priority = self.priority;
        droppable.disabled = self.disabled;
        droppable
    }
}

/// A recorded sensor signal or registry change.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    Start { id: EntityId, position: Point },
    Move { delta: Transform },
    MoveTo { position: Point },
    Refresh,
    End,
    Cancel,
    UnregisterDraggable { id: EntityId },
    UnregisterDroppable { id: EntityId },
}

/// A complete scenario file.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Detector for droppables that do not name their own.
    #[serde(default)]
    pub detector: DetectorKind,
    #[serde(default)]
    pub modifiers: Vec<ModifierConfig>,
    #[serde(default)]
    pub draggables: Vec<DraggableSpec>,
    #[serde(default)]
    pub droppables: Vec<DroppableSpec>,
    pub signals: Vec<Signal>,
}

/// One emitted drag event, flattened for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub event: &'static str,
    pub source: EntityId,
    pub target: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_target: Option<Option<EntityId>>,
    pub transform: Transform,
    pub position: Point,
    pub collisions: Vec<Collision>,
    pub canceled: bool,
}

impl EventRecord {
    fn from_event(event: &DragEvent<'_>) -> Self {
        let operation = event.operation();
        let (target, previous_target) = match *event {
            DragEvent::Over {
                previous_target,
                target,
                ..
            } => (target.cloned(), Some(previous_target.cloned())),
            _ => (operation.target.clone(), None),
        };
        Self {
            event: event.name(),
            source: operation.source.clone(),
            target,
            previous_target,
            transform: operation.transform,
            position: operation.position.current,
            collisions: operation.collisions.clone(),
            canceled: operation.canceled,
        }
    }
}

impl Scenario {
    /// Load a scenario from a JSON file.
    pub fn load(path: &Path) -> ReplayResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse a scenario from a JSON string.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a manager with this scenario's entities and modifiers registered.
    pub fn build_manager(&self) -> DragDropManager {
        let mut manager = DragDropManager::new();
        for config in &self.modifiers {
            manager.modifiers_mut().push_boxed(config.clone().build());
        }
        for spec in &self.draggables {
            manager.register_draggable(spec.clone().into());
        }
        for spec in &self.droppables {
            manager.register_droppable(spec.clone().into_droppable(self.detector));
        }
        manager
    }

    /// Replay every signal and collect the emitted events.
    pub fn run(&self) -> ReplayResult<Vec<EventRecord>> {
        let mut manager = self.build_manager();
        let records = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&records);
        manager
            .monitor()
            .subscribe(move |event| sink.borrow_mut().push(EventRecord::from_event(event)));

        for (index, signal) in self.signals.iter().enumerate() {
            log::debug!("Replaying signal {}: {:?}", index, signal);
            apply_signal(&mut manager, signal)
                .map_err(|source| ReplayError::Signal { index, source })?;
        }

        let records = records.take();
        log::info!(
            "Replayed {} signals, {} events",
            self.signals.len(),
            records.len()
        );
        Ok(records)
    }
}

fn apply_signal(manager: &mut DragDropManager, signal: &Signal) -> Result<(), DragError> {
    match signal {
        Signal::Start { id, position } => manager.start(id.clone(), *position),
        Signal::Move { delta } => manager.move_by(*delta),
        Signal::MoveTo { position } => manager.move_to(*position),
        Signal::Refresh => manager.refresh(),
        Signal::End => manager.end().map(|_| ()),
        Signal::Cancel => manager.cancel().map(|_| ()),
        Signal::UnregisterDraggable { id } => {
            manager.unregister_draggable(id);
            Ok(())
        }
        Signal::UnregisterDroppable { id } => {
            manager.unregister_droppable(id);
            Ok(())
        }
    }
}
