//! # Quadpath Kernel
//!
//! Spatial index and path search for agents moving among rectangular
//! obstacles.
//!
//! This crate provides:
//! - A region quadtree that colors cells white (free), black (blocked) or
//!   gray (mixed, split into four)
//! - Cardinal neighbor pointers maintained incrementally while the tree is
//!   split
//! - Neighbor enumeration along any side of a cell
//! - Point location
//! - Dijkstra search over the free leaves, with adjacency discovered on demand
//!
//! ## Lifecycle
//!
//! A tree is built once per planning episode from the current obstacle set,
//! queried any number of times, then dropped. Nothing is written after
//! [`RegionTree::build`] returns, so a built tree can be shared read-only.
//!
//! ```
//! use quadpath_kernel::prelude::*;
//!
//! let wall = Rect::new(0.0, 45.0, 80.0, 55.0);
//! let tree = RegionTree::build(Rect::new(0.0, 0.0, 100.0, 100.0), &[wall], 5.0)?;
//! let path = tree.find_path(Vec2::new(10.0, 90.0), Vec2::new(10.0, 10.0))?;
//! assert!(path.cost > 80.0);
//! # Ok::<(), QuadPathError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod neighbors;
pub mod node;
pub mod pathfinder;
pub mod quadrant;
pub mod quadtree;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::neighbors::*;
    pub use crate::node::*;
    pub use crate::pathfinder::*;
    pub use crate::quadrant::*;
    pub use crate::quadtree::*;
    pub use quadpath_common::{QuadPathError, QuadPathResult, Rect, Vec2};
}

pub use prelude::*;
