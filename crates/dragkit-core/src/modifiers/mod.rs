//! Modifiers that constrain the drag transform before collision detection.
//!
//! Modifiers run in registration order. Each one sees the operation with its
//! `transform` replaced by the previous modifier's output, so the pipeline is a
//! fold over the chain starting from the raw pointer offset.

mod axis;
mod bounds;
mod snap;

pub use axis::{Axis, AxisModifier, AxisOptions, restrict_to_horizontal_axis, restrict_to_vertical_axis};
pub use bounds::{BoundsOptions, RestrictToBoundsModifier};
pub use snap::{DEFAULT_GRID_SIZE, GridSize, SnapModifier, SnapOptions, snap_to_grid};

use crate::geometry::Transform;
use crate::operation::DragOperation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Adjusts the transform proposed for the current tick.
pub trait Modifier: fmt::Debug {
    /// Return the adjusted transform. `operation.transform` holds the proposal.
    fn apply(&self, operation: &DragOperation) -> Transform;
}

/// Ordered chain of modifiers.
#[derive(Debug, Default)]
pub struct ModifierPipeline {
    modifiers: Vec<Box<dyn Modifier>>,
}

impl ModifierPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a modifier to the end of the chain.
    pub fn push(&mut self, modifier: impl Modifier + 'static) {
        self.modifiers.push(Box::new(modifier));
    }

    /// Append an already boxed modifier.
    pub fn push_boxed(&mut self, modifier: Box<dyn Modifier>) {
        self.modifiers.push(modifier);
    }

    /// Remove every modifier.
    pub fn clear(&mut self) {
        self.modifiers.clear();
    }

    /// Number of modifiers in the chain.
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Thread `proposed` through every modifier in order.
    ///
    /// Each modifier sees `operation.transform` set to the running value; the
    /// operation's own transform is restored before returning.
    pub fn apply(&self, operation: &mut DragOperation, proposed: Transform) -> Transform {
        if self.modifiers.is_empty() {
            return proposed;
        }

        let previous = operation.transform;
        let transform = self.modifiers.iter().fold(proposed, |transform, modifier| {
            operation.transform = transform;
            modifier.apply(operation)
        });
        operation.transform = previous;
        transform
    }
}

impl FromIterator<Box<dyn Modifier>> for ModifierPipeline {
    fn from_iter<I: IntoIterator<Item = Box<dyn Modifier>>>(iter: I) -> Self {
        Self {
            modifiers: iter.into_iter().collect(),
        }
    }
}

/// Serializable modifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModifierConfig {
    Axis(AxisOptions),
    Snap(SnapOptions),
    RestrictToBounds(BoundsOptions),
}

impl ModifierConfig {
    /// Build the configured modifier.
    pub fn build(self) -> Box<dyn Modifier> {
        match self {
            ModifierConfig::Axis(options) => Box::new(AxisModifier::configure(options)),
            ModifierConfig::Snap(options) => Box::new(SnapModifier::configure(options)),
            ModifierConfig::RestrictToBounds(options) => {
                Box::new(RestrictToBoundsModifier::configure(options))
            }
        }
    }
}
