//! Objects placed in the simulation world.

use quadpath_common::{EntityId, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// What an object is and how it takes part in collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Static, always blocks
    Wall,
    /// Moves each tick and blocks other agents
    Agent,
    /// Blocks only while closed
    Gate {
        /// Whether agents may pass through
        open: bool,
    },
}

/// An axis-aligned box in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    /// Unique identifier
    pub id: EntityId,
    /// Collision behavior
    pub kind: ObjectKind,
    /// Occupied area
    pub bounds: Rect,
    /// Displacement applied on the next step
    pub velocity: Vec2,
}

impl WorldObject {
    /// Creates a motionless object.
    #[must_use]
    pub fn new(kind: ObjectKind, bounds: Rect) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            bounds,
            velocity: Vec2::ZERO,
        }
    }

    /// Returns true if the object blocks movement and paths.
    #[must_use]
    pub fn is_obstacle(&self) -> bool {
        !matches!(self.kind, ObjectKind::Gate { open: true })
    }

    /// Returns true for agents.
    #[must_use]
    pub fn is_agent(&self) -> bool {
        self.kind == ObjectKind::Agent
    }

    /// Center of the object's box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }
}
