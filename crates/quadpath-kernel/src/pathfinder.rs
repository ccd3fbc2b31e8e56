//! Shortest paths over the free leaves of a region tree.
//!
//! The search graph is never materialized: its vertices are the leaves,
//! its edges come from [`RegionTree::free_neighbors`], and each edge costs
//! the distance between the two cell centers.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};
use quadpath_common::{QuadPathError, QuadPathResult, Vec2};
use tracing::{debug, trace};

use crate::node::NodeId;
use crate::quadtree::RegionTree;

/// Result of a successful search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    /// Cell centers from the first step to the target cell.
    ///
    /// The start cell is not included; following these points from the
    /// agent's position never moves it back to its own cell center.
    pub waypoints: Vec<Vec2>,
    /// Leaves matching `waypoints`, in the same order.
    pub cells: Vec<NodeId>,
    /// Sum of center-to-center distances, starting at the start cell.
    pub cost: f32,
}

impl Path {
    /// Returns true when start and target share a cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of waypoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }
}

/// Frontier entry, ordered so the cheapest node pops first.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    cost: f32,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap, then lower ids first for determinism
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl RegionTree {
    /// Finds the cheapest chain of free cells from `start` to `target`.
    ///
    /// Both points must lie inside the tree bounds. The start cell may be
    /// blocked (an agent standing inside an obstacle can still leave it),
    /// but every step of the path is a free cell.
    pub fn find_path(&self, start: Vec2, target: Vec2) -> QuadPathResult<Path> {
        if self.is_empty() {
            return Err(QuadPathError::EmptyTree);
        }
        let origin = self.locate(start)?;
        let goal = self.locate(target)?;

        let mut frontier = BinaryHeap::new();
        let mut best: AHashMap<NodeId, f32> = AHashMap::new();
        let mut previous: AHashMap<NodeId, NodeId> = AHashMap::new();
        let mut explored: AHashSet<NodeId> = AHashSet::new();

        best.insert(origin, 0.0);
        frontier.push(FrontierEntry {
            cost: 0.0,
            node: origin,
        });

        while let Some(FrontierEntry { cost, node }) = frontier.pop() {
            // Superseded by a cheaper entry for the same node.
            if !explored.insert(node) {
                continue;
            }

            if node == goal {
                let path = self.reconstruct(origin, goal, cost, &previous);
                debug!(
                    "Path found: {} waypoints, cost {:.2}, {} cells explored",
                    path.len(),
                    path.cost,
                    explored.len()
                );
                return Ok(path);
            }

            let center = self.node(node).bounds().center();
            for next in self.free_neighbors(node) {
                if explored.contains(&next) {
                    continue;
                }
                let candidate = cost + center.distance(self.node(next).bounds().center());
                if best.get(&next).is_some_and(|&known| known <= candidate) {
                    continue;
                }
                best.insert(next, candidate);
                previous.insert(next, node);
                frontier.push(FrontierEntry {
                    cost: candidate,
                    node: next,
                });
            }
            trace!("Expanded {:?} at cost {:.2}", node, cost);
        }

        debug!("No path: frontier exhausted after {} cells", explored.len());
        Err(QuadPathError::NoPath)
    }

    /// Walks predecessors back from `goal`, leaving out `origin`.
    fn reconstruct(
        &self,
        origin: NodeId,
        goal: NodeId,
        cost: f32,
        previous: &AHashMap<NodeId, NodeId>,
    ) -> Path {
        let mut cells = Vec::new();
        let mut current = goal;
        while current != origin {
            cells.push(current);
            let Some(&prev) = previous.get(&current) else {
                break;
            };
            current = prev;
        }
        debug_assert_eq!(current, origin, "broken predecessor chain");
        cells.reverse();

        Path {
            waypoints: cells
                .iter()
                .map(|&id| self.node(id).bounds().center())
                .collect(),
            cells,
            cost,
        }
    }
}
