//! Owns the region tree used for the current planning episode.

use quadpath_common::{QuadPathError, QuadPathResult, Rect, Vec2};
use quadpath_kernel::{Path, RegionTree};
use tracing::debug;

/// Region tree rebuilt from the latest obstacle snapshot.
#[derive(Debug, Clone)]
pub struct Planner {
    tree: Option<RegionTree>,
    min_cell_size: f32,
}

impl Planner {
    /// Creates a planner with no tree yet.
    #[must_use]
    pub fn new(min_cell_size: f32) -> Self {
        Self {
            tree: None,
            min_cell_size,
        }
    }

    /// Replaces the tree with one built over `obstacles`.
    ///
    /// On failure the previous tree is dropped.
    pub fn rebuild(&mut self, bounds: Rect, obstacles: &[Rect]) -> QuadPathResult<&RegionTree> {
        self.tree = None;
        let tree = RegionTree::build(bounds, obstacles, self.min_cell_size)?;
        debug!(
            "Rebuilt planner tree: {} obstacles, {} leaves",
            obstacles.len(),
            tree.stats().leaf_count
        );
        Ok(self.tree.insert(tree))
    }

    /// Current tree, if one has been built.
    #[must_use]
    pub fn tree(&self) -> Option<&RegionTree> {
        self.tree.as_ref()
    }

    /// Searches the current tree.
    pub fn find_path(&self, start: Vec2, target: Vec2) -> QuadPathResult<Path> {
        self.tree
            .as_ref()
            .ok_or(QuadPathError::EmptyTree)?
            .find_path(start, target)
    }

    /// Drops the current tree.
    pub fn clear(&mut self) {
        self.tree = None;
    }
}
