//! # Quadpath Common
//!
//! Common types shared by every quadpath crate:
//! - Axis-aligned rectangles and the `Vec2` point type
//! - Entity ids for world objects
//! - The recoverable error taxonomy for tree building and path finding
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod geometry;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::geometry::*;
    pub use crate::ids::*;
}

pub use prelude::*;
