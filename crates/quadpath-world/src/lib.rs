//! # QuadPath World
//!
//! Simulation layer on top of the region tree.
//!
//! This crate handles:
//! - Simulation configuration loaded from TOML
//! - Walls, gates and agents as axis-aligned boxes
//! - Per-tick movement with collision
//! - Turning paths into velocities and replanning towards targets

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod object;
pub mod planner;
pub mod seeker;
pub mod steering;
pub mod world;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::object::*;
    pub use crate::planner::*;
    pub use crate::seeker::*;
    pub use crate::steering::*;
    pub use crate::world::*;
}

pub use prelude::*;
