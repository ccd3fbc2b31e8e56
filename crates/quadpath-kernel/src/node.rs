//! Region tree nodes.
//!
//! Nodes live in the arena owned by [`RegionTree`](crate::RegionTree) and
//! refer to each other by [`NodeId`]. Parent, child and cardinal-neighbor
//! links are plain indices, so the cyclic structure carries no ownership.

use crate::quadrant::{Quadrant, Side};
use quadpath_common::Rect;

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root is always the first node allocated.
    pub const ROOT: Self = Self(0);

    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Occupancy of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// No obstacle touches the region
    White,
    /// Fully obstructed, or mixed at the resolution limit
    Black,
    /// Mixed; the node has exactly four children
    Gray,
}

impl Color {
    /// Black and white nodes are leaves.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::White | Self::Black)
    }

    /// Only white regions may be traversed.
    #[must_use]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::White)
    }
}

/// A single quadtree cell.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) bounds: Rect,
    pub(crate) color: Color,
    pub(crate) objects: Vec<Rect>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Option<[NodeId; 4]>,
    pub(crate) location: Option<Quadrant>,
    pub(crate) level: u32,
    pub(crate) neighbors: [Option<NodeId>; 4],
}

impl Node {
    pub(crate) fn new(
        bounds: Rect,
        objects: Vec<Rect>,
        parent: Option<NodeId>,
        location: Option<Quadrant>,
        level: u32,
    ) -> Self {
        Self {
            bounds,
            // Recomputed once the node is classified.
            color: Color::White,
            objects,
            parent,
            children: None,
            location,
            level,
            neighbors: [None; 4],
        }
    }

    /// Area covered by this cell.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Occupancy color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Obstacles overlapping this cell.
    #[must_use]
    pub fn objects(&self) -> &[Rect] {
        &self.objects
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in quadrant order, present iff the node is gray.
    #[must_use]
    pub fn children(&self) -> Option<&[NodeId; 4]> {
        self.children.as_ref()
    }

    /// Child in the given quadrant.
    #[must_use]
    pub fn child(&self, quadrant: Quadrant) -> Option<NodeId> {
        self.children.map(|children| children[quadrant.index()])
    }

    /// Quadrant this node occupies in its parent, `None` for the root.
    #[must_use]
    pub fn location(&self) -> Option<Quadrant> {
        self.location
    }

    /// Depth from the root.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Whether the node is black or white.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.color.is_leaf()
    }

    /// Stored equal-or-larger neighbor on `side`, `None` at the world edge.
    #[must_use]
    pub fn cardinal_neighbor(&self, side: Side) -> Option<NodeId> {
        self.neighbors[side.index()]
    }
}

/// Total obstacle area inside `bounds`.
///
/// Each obstacle is clipped to the cell before summing, but obstacles are not
/// clipped against each other, so overlapping obstacles are counted twice.
#[must_use]
pub fn covered_area(bounds: &Rect, objects: &[Rect]) -> f32 {
    objects.iter().map(|o| bounds.intersection_area(o)).sum()
}

/// Whether obstacles touch the cell without filling it.
#[must_use]
pub fn is_partially_full(bounds: &Rect, objects: &[Rect]) -> bool {
    !objects.is_empty() && covered_area(bounds, objects) < bounds.area()
}

/// Classifies a cell from the obstacles overlapping it.
///
/// A mixed cell whose shorter side is below `min_size` is treated as blocked.
#[must_use]
pub fn calculate_color(bounds: &Rect, objects: &[Rect], min_size: f32) -> Color {
    if objects.is_empty() {
        Color::White
    } else if !is_partially_full(bounds, objects) || bounds.min_extent() < min_size {
        Color::Black
    } else {
        Color::Gray
    }
}
