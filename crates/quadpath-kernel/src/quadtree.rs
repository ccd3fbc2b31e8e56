//! Region quadtree over a rectangular world with rectangular obstacles.
//!
//! The tree recursively splits mixed cells into four quadrants until every
//! leaf is either free (white) or blocked (black). Each node stores its
//! cardinal neighbors: for every side, the smallest node that is at least as
//! large as the node itself and borders that whole side. These pointers are
//! kept exact while the tree grows, one split at a time, so neighbor queries
//! never need to rescan the tree.

use crate::node::{calculate_color, Color, Node, NodeId};
use crate::quadrant::{Quadrant, Side};
use quadpath_common::{QuadPathError, QuadPathResult, Rect, Vec2};
use tracing::debug;

/// Statistics about a region tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of nodes in the tree.
    pub node_count: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Number of free leaves.
    pub white_count: usize,
    /// Number of blocked leaves.
    pub black_count: usize,
    /// Maximum depth of the tree.
    pub max_depth: u32,
}

/// Region quadtree built once per planning episode.
///
/// The tree is read-only after [`RegionTree::build`] returns.
#[derive(Debug, Clone)]
pub struct RegionTree {
    /// Bounding rectangle of the root.
    bounds: Rect,
    /// Mixed cells smaller than this are not split further.
    min_size: f32,
    /// Node arena, root first.
    nodes: Vec<Node>,
}

impl RegionTree {
    /// Builds a tree covering `bounds` from the given obstacles.
    ///
    /// Obstacles outside `bounds` are ignored.
    pub fn build(bounds: Rect, obstacles: &[Rect], min_size: f32) -> QuadPathResult<Self> {
        if bounds.is_empty() {
            return Err(QuadPathError::InvalidBounds {
                width: bounds.width(),
                height: bounds.height(),
            });
        }
        if !(min_size > 0.0) {
            return Err(QuadPathError::InvalidMinSize(min_size));
        }

        let objects = obstacles
            .iter()
            .filter(|o| o.overlaps(&bounds))
            .copied()
            .collect();

        let mut tree = Self {
            bounds,
            min_size,
            nodes: vec![Node::new(bounds, objects, None, None, 0)],
        };
        tree.build_node(NodeId::ROOT);

        let stats = tree.stats();
        debug!(
            "Built region tree: {} nodes, {} leaves ({} free), depth {}",
            stats.node_count, stats.leaf_count, stats.white_count, stats.max_depth
        );

        Ok(tree)
    }

    /// Classifies a node and recursively splits it while it is mixed.
    fn build_node(&mut self, id: NodeId) {
        let color = {
            let node = &self.nodes[id.index()];
            calculate_color(&node.bounds, &node.objects, self.min_size)
        };
        self.nodes[id.index()].color = color;

        if color == Color::Gray {
            let children = self.split(id);
            for child in children {
                self.build_node(child);
            }
        }
    }

    /// Creates the four children of a gray node and wires their neighbors.
    fn split(&mut self, id: NodeId) -> [NodeId; 4] {
        let (bounds, level, objects) = {
            let node = &self.nodes[id.index()];
            (node.bounds, node.level, node.objects.clone())
        };

        let mut children = [NodeId::ROOT; 4];
        for quadrant in Quadrant::ALL {
            let child_bounds = quadrant.bounds_within(&bounds);
            let child_objects = objects
                .iter()
                .filter(|o| o.overlaps(&child_bounds))
                .copied()
                .collect();
            let child = NodeId::from_index(self.nodes.len());
            self.nodes.push(Node::new(
                child_bounds,
                child_objects,
                Some(id),
                Some(quadrant),
                level + 1,
            ));
            children[quadrant.index()] = child;
        }
        self.nodes[id.index()].children = Some(children);

        self.link_children(id, children);
        self.propagate_split(id, children);
        children
    }

    /// Sets the cardinal neighbors of freshly created children.
    ///
    /// Inner sides face a sibling. Outer sides inherit the parent's neighbor,
    /// narrowed to the facing child when that neighbor is the same size and
    /// already split.
    fn link_children(&mut self, parent: NodeId, children: [NodeId; 4]) {
        let parent_level = self.nodes[parent.index()].level;

        for quadrant in Quadrant::ALL {
            let mut neighbors = [None; 4];
            for side in Side::ALL {
                neighbors[side.index()] = if quadrant.is_adjacent(side) {
                    self.nodes[parent.index()].neighbors[side.index()].map(|outer| {
                        let outer_node = &self.nodes[outer.index()];
                        match outer_node.children {
                            Some(grand) if outer_node.level == parent_level => {
                                grand[quadrant.reflect(side).index()]
                            },
                            _ => outer,
                        }
                    })
                } else {
                    Some(children[quadrant.reflect(side).index()])
                };
            }
            self.nodes[children[quadrant.index()].index()].neighbors = neighbors;
        }
    }

    /// Re-points smaller nodes that bordered the split node at its children.
    ///
    /// Only a same-size neighbor that is already split can hold nodes smaller
    /// than `parent` along the shared edge. Those nodes are walked along the
    /// edge, and each one still pointing back at `parent` is moved to the
    /// child it actually touches.
    ///
    /// All four sides are updated the same way, so a stored pointer is the
    /// exact equal-or-larger neighbor in every direction.
    fn propagate_split(&mut self, parent: NodeId, children: [NodeId; 4]) {
        let (parent_bounds, parent_level, parent_neighbors) = {
            let node = &self.nodes[parent.index()];
            (node.bounds, node.level, node.neighbors)
        };

        for side in Side::ALL {
            // World boundary on this side.
            let Some(outer) = parent_neighbors[side.index()] else {
                continue;
            };
            if self.nodes[outer.index()].level != parent_level {
                continue;
            }

            let back = side.opposite();
            let facing: Vec<NodeId> = self.boundary_nodes(outer, back).skip(1).collect();
            for id in facing {
                let node = &mut self.nodes[id.index()];
                if node.neighbors[back.index()] != Some(parent) {
                    continue;
                }
                let quadrant = Quadrant::containing(&parent_bounds, node.bounds.center());
                node.neighbors[back.index()] = Some(children[quadrant.index()]);
            }
        }
    }

    /// Bounding rectangle of the whole tree.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Minimum cell size used during construction.
    #[must_use]
    pub fn min_size(&self) -> f32 {
        self.min_size
    }

    /// Root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Number of nodes of every color.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node id in allocation order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    /// Iterates over the black and white leaves.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(|&id| self.node(id).is_leaf())
    }

    /// Stored cardinal neighbor of `id` on `side`.
    #[must_use]
    pub fn cardinal_neighbor(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.node(id).cardinal_neighbor(side)
    }

    /// Finds the leaf containing `point`.
    ///
    /// Points on a boundary between cells resolve to the west/north cell.
    pub fn locate(&self, point: Vec2) -> QuadPathResult<NodeId> {
        if self.is_empty() {
            return Err(QuadPathError::EmptyTree);
        }
        if !self.bounds.contains_point(point) {
            return Err(QuadPathError::PointOutOfBounds {
                x: point.x,
                y: point.y,
            });
        }

        let mut id = NodeId::ROOT;
        loop {
            let node = self.node(id);
            match node.children {
                Some(children) => {
                    id = children[Quadrant::containing(&node.bounds, point).index()];
                },
                None => {
                    debug_assert!(node.is_leaf(), "childless node must be a leaf");
                    return Ok(id);
                },
            }
        }
    }

    /// Whether `id` is `ancestor` or lies below it.
    #[must_use]
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            let node = self.node(candidate);
            if node.level <= self.node(ancestor).level {
                return false;
            }
            current = node.parent;
        }
        false
    }

    /// Returns statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        for node in &self.nodes {
            stats.node_count += 1;
            stats.max_depth = stats.max_depth.max(node.level);
            match node.color {
                Color::White => {
                    stats.leaf_count += 1;
                    stats.white_count += 1;
                },
                Color::Black => {
                    stats.leaf_count += 1;
                    stats.black_count += 1;
                },
                Color::Gray => {
                    debug_assert!(node.children.is_some(), "gray node without children");
                },
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_build_rejects_empty_bounds() {
        let err = RegionTree::build(Rect::new(0.0, 0.0, 0.0, 10.0), &[], 1.0).unwrap_err();
        assert_eq!(
            err,
            QuadPathError::InvalidBounds {
                width: 0.0,
                height: 10.0
            }
        );
    }

    #[test]
    fn test_build_rejects_non_positive_min_size() {
        assert_eq!(
            RegionTree::build(world(), &[], 0.0).unwrap_err(),
            QuadPathError::InvalidMinSize(0.0)
        );
        assert!(RegionTree::build(world(), &[], -3.0).is_err());
        assert!(RegionTree::build(world(), &[], f32::NAN).is_err());
    }

    #[test]
    fn test_no_obstacles_single_white_root() {
        let tree = RegionTree::build(world(), &[], 10.0).expect("valid tree");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).color(), Color::White);
        assert_eq!(tree.locate(Vec2::new(50.0, 50.0)).expect("point inside tree"), tree.root());
        for side in Side::ALL {
            assert_eq!(tree.cardinal_neighbor(tree.root(), side), None);
        }
    }

    #[test]
    fn test_fully_covered_root_is_black() {
        let tree = RegionTree::build(world(), &[Rect::new(-10.0, -10.0, 110.0, 110.0)], 10.0)
            .expect("valid tree");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).color(), Color::Black);
    }

    #[test]
    fn test_obstacles_outside_bounds_ignored() {
        let tree = RegionTree::build(world(), &[Rect::new(200.0, 200.0, 300.0, 300.0)], 10.0)
            .expect("valid tree");
        assert_eq!(tree.len(), 1);
        assert!(tree.node(tree.root()).objects().is_empty());
    }

    #[test]
    fn test_quadrant_obstacle_splits_once() {
        let blocked = [Rect::new(0.0, 0.0, 50.0, 50.0)];
        let tree = RegionTree::build(world(), &blocked, 10.0).expect("valid tree");
        let root = tree.node(tree.root());
        assert_eq!(root.color(), Color::Gray);
        assert_eq!(tree.len(), 5);

        let nw = root.child(Quadrant::NorthWest).expect("split node");
        assert_eq!(tree.node(nw).color(), Color::Black);
        for quadrant in [Quadrant::NorthEast, Quadrant::SouthEast, Quadrant::SouthWest] {
            let child = root.child(quadrant).expect("split node");
            assert_eq!(tree.node(child).color(), Color::White);
            assert_eq!(tree.node(child).location(), Some(quadrant));
            assert_eq!(tree.node(child).level(), 1);
        }
    }

    #[test]
    fn test_sibling_cardinal_neighbors() {
        let blocked = [Rect::new(0.0, 0.0, 50.0, 50.0)];
        let tree = RegionTree::build(world(), &blocked, 10.0).expect("valid tree");
        let root = tree.node(tree.root());
        let nw = root.child(Quadrant::NorthWest).expect("split node");
        let ne = root.child(Quadrant::NorthEast).expect("split node");
        let sw = root.child(Quadrant::SouthWest).expect("split node");

        assert_eq!(tree.cardinal_neighbor(nw, Side::East), Some(ne));
        assert_eq!(tree.cardinal_neighbor(nw, Side::South), Some(sw));
        assert_eq!(tree.cardinal_neighbor(nw, Side::North), None);
        assert_eq!(tree.cardinal_neighbor(nw, Side::West), None);
        assert_eq!(tree.cardinal_neighbor(ne, Side::West), Some(nw));
    }

    #[test]
    fn test_resolution_limit_forces_black() {
        // A sliver that never fills any cell it touches.
        let sliver = Rect::new(49.0, 0.0, 50.5, 100.0);
        let tree = RegionTree::build(world(), &[sliver], 30.0).expect("valid tree");
        let stats = tree.stats();
        assert!(stats.black_count > 0);
        for leaf in tree.leaves() {
            let node = tree.node(leaf);
            if node.color() == Color::Black {
                assert!(node.bounds().overlaps(&sliver));
            }
        }
    }

    #[test]
    fn test_split_repoints_smaller_neighbors() {
        // Obstacle in the NE corner of the NW quadrant splits NW twice;
        // a second obstacle later splits NE, whose west edge faces NW's
        // already-split children.
        let obstacles = [
            Rect::new(40.0, 0.0, 45.0, 5.0),
            Rect::new(50.0, 45.0, 55.0, 50.0),
        ];
        let tree = RegionTree::build(world(), &obstacles, 5.0).expect("valid tree");
        let root = tree.node(tree.root());
        let nw = root.child(Quadrant::NorthWest).expect("split node");
        let ne = root.child(Quadrant::NorthEast).expect("split node");
        let nw_ne = tree.node(nw).child(Quadrant::NorthEast).expect("split node");
        let ne_nw = tree.node(ne).child(Quadrant::NorthWest).expect("split node");

        assert_eq!(tree.cardinal_neighbor(nw_ne, Side::East), Some(ne_nw));
        assert_eq!(tree.cardinal_neighbor(ne_nw, Side::West), Some(nw_ne));
    }

    #[test]
    fn test_locate_descends_to_leaf() {
        let blocked = [Rect::new(0.0, 0.0, 50.0, 50.0)];
        let tree = RegionTree::build(world(), &blocked, 10.0).expect("valid tree");
        let leaf = tree.locate(Vec2::new(75.0, 75.0)).expect("point inside tree");
        assert_eq!(
            tree.node(tree.root()).child(Quadrant::SouthEast),
            Some(leaf)
        );

        // On the vertical divider: resolves west.
        let on_line = tree.locate(Vec2::new(50.0, 75.0)).expect("point inside tree");
        assert_eq!(
            tree.node(tree.root()).child(Quadrant::SouthWest),
            Some(on_line)
        );
    }

    #[test]
    fn test_locate_out_of_bounds() {
        let tree = RegionTree::build(world(), &[], 10.0).expect("valid tree");
        assert_eq!(
            tree.locate(Vec2::new(150.0, 5.0)).unwrap_err(),
            QuadPathError::PointOutOfBounds { x: 150.0, y: 5.0 }
        );
        assert!(tree.locate(Vec2::new(100.0, 100.0)).is_ok());
    }

    #[test]
    fn test_is_within() {
        let blocked = [Rect::new(0.0, 0.0, 50.0, 50.0)];
        let tree = RegionTree::build(world(), &blocked, 10.0).expect("valid tree");
        let root = tree.node(tree.root());
        let nw = root.child(Quadrant::NorthWest).expect("split node");
        let ne = root.child(Quadrant::NorthEast).expect("split node");
        assert!(tree.is_within(nw, tree.root()));
        assert!(tree.is_within(nw, nw));
        assert!(!tree.is_within(nw, ne));
        assert!(!tree.is_within(tree.root(), nw));
    }

    #[test]
    fn test_stats_counts_leaves() {
        let blocked = [Rect::new(0.0, 0.0, 50.0, 50.0)];
        let tree = RegionTree::build(world(), &blocked, 10.0).expect("valid tree");
        let stats = tree.stats();
        assert_eq!(
            stats,
            TreeStats {
                node_count: 5,
                leaf_count: 4,
                white_count: 3,
                black_count: 1,
                max_depth: 1,
            }
        );
        assert_eq!(tree.leaves().count(), 4);
    }
}
