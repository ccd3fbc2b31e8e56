//! Neighbor finding over a built region tree.
//!
//! Two lookups are provided:
//! - [`RegionTree::equal_or_larger_neighbor`] climbs to the nearest common
//!   ancestor and mirrors back down, using only parent/child links.
//! - [`RegionTree::neighbors_in_direction`] starts from the stored cardinal
//!   neighbor and hops along the shared edge, yielding every bordering leaf.

use crate::node::NodeId;
use crate::quadrant::{Quadrant, Side};
use crate::quadtree::RegionTree;

impl RegionTree {
    /// Smallest node at least as large as `id` that borders its `side`.
    ///
    /// Returns `None` when `side` faces the world boundary.
    #[must_use]
    pub fn equal_or_larger_neighbor(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = self.node(id);
        let (parent, location) = match (node.parent(), node.location()) {
            (Some(parent), Some(location)) => (parent, location),
            _ => return None,
        };

        if !location.is_adjacent(side) {
            // The neighbor is a sibling inside the same parent.
            return self.node(parent).child(location.reflect(side));
        }

        let candidate = self.equal_or_larger_neighbor(parent, side)?;
        Some(
            self.node(candidate)
                .child(location.reflect(side))
                .unwrap_or(candidate),
        )
    }

    /// Every node of the subtree at `id` that touches its `side`, in
    /// pre-order, starting with `id` itself.
    pub fn boundary_nodes(&self, id: NodeId, side: Side) -> BoundaryNodes<'_> {
        BoundaryNodes {
            tree: self,
            side,
            stack: vec![id],
        }
    }

    /// Leaves of the subtree at `id` that touch its `side`.
    pub fn boundary_leaves(&self, id: NodeId, side: Side) -> impl Iterator<Item = NodeId> + '_ {
        self.boundary_nodes(id, side)
            .filter(move |&node| self.node(node).is_leaf())
    }

    /// Leaves bordering `id` on `side`, walked along the edge.
    pub fn neighbors_in_direction(&self, id: NodeId, side: Side) -> DirectionalNeighbors<'_> {
        DirectionalNeighbors {
            tree: self,
            origin: id,
            side,
            state: Walk::Start,
        }
    }

    /// Leaves bordering `id` on any side.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        Side::ALL
            .into_iter()
            .flat_map(move |side| self.neighbors_in_direction(id, side))
    }

    /// Free (white) leaves bordering `id`.
    pub fn free_neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbors(id)
            .filter(move |&node| self.node(node).color().is_free())
    }

    /// Follows `quadrant` children down to a leaf.
    fn descend_to_corner(&self, mut id: NodeId, quadrant: Quadrant) -> NodeId {
        while let Some(child) = self.node(id).child(quadrant) {
            id = child;
        }
        id
    }
}

/// Pre-order walk of the nodes touching one side of a subtree.
#[derive(Debug)]
pub struct BoundaryNodes<'a> {
    tree: &'a RegionTree,
    side: Side,
    stack: Vec<NodeId>,
}

impl Iterator for BoundaryNodes<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Some(children) = self.tree.node(id).children() {
            // Reversed so the walk runs in traversal order.
            for quadrant in self.side.edge_quadrants().into_iter().rev() {
                self.stack.push(children[quadrant.index()]);
            }
        }
        Some(id)
    }
}

#[derive(Debug, Clone, Copy)]
enum Walk {
    Start,
    Edge(NodeId),
    Done,
}

/// Leaves bordering one side of a node, in traversal order.
///
/// The first leaf is the stored cardinal neighbor, or its corner-most leaf
/// when that neighbor is split. Each following leaf is reached through the
/// previous leaf's cardinal neighbor in the traversal direction. The walk
/// ends at the world boundary or at the first leaf whose cardinal neighbor
/// back across the edge no longer lands in the origin node.
#[derive(Debug)]
pub struct DirectionalNeighbors<'a> {
    tree: &'a RegionTree,
    origin: NodeId,
    side: Side,
    state: Walk,
}

impl Iterator for DirectionalNeighbors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let corner = self.side.edge_start();
        let (leaf, state) = match self.state {
            Walk::Done => return None,
            Walk::Start => match self.tree.cardinal_neighbor(self.origin, self.side) {
                None => (None, Walk::Done),
                // A leaf at least as large as the origin covers the whole side.
                Some(first) if self.tree.node(first).is_leaf() => (Some(first), Walk::Done),
                Some(first) => {
                    let leaf = self.tree.descend_to_corner(first, corner);
                    (Some(leaf), Walk::Edge(leaf))
                },
            },
            Walk::Edge(last) => {
                let next = self
                    .tree
                    .cardinal_neighbor(last, self.side.traversal())
                    .map(|next| self.tree.descend_to_corner(next, corner))
                    .filter(|&leaf| {
                        self.tree
                            .cardinal_neighbor(leaf, self.side.opposite())
                            .is_some_and(|back| self.tree.is_within(back, self.origin))
                    });
                match next {
                    Some(leaf) => (Some(leaf), Walk::Edge(leaf)),
                    None => (None, Walk::Done),
                }
            },
        };
        self.state = state;
        leaf
    }
}

impl std::iter::FusedIterator for DirectionalNeighbors<'_> {}
