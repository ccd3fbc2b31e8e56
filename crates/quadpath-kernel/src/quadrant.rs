//! Quadrant and side arithmetic for the region quadtree.
//!
//! All adjacency rules used by tree construction and neighbor finding are
//! pure functions over these two enums.

use quadpath_common::{Rect, Vec2};

/// Cardinal direction, also used to name the four sides of a cell.
///
/// North is the `min.y` side (screen orientation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Towards decreasing y
    North,
    /// Towards increasing x
    East,
    /// Towards increasing y
    South,
    /// Towards decreasing x
    West,
}

impl Side {
    /// All sides in pointer-array order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Index into per-side arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The side facing this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Direction used to walk along an edge on this side.
    ///
    /// Northern and southern edges are walked west to east, eastern and
    /// western edges north to south.
    #[must_use]
    pub const fn traversal(self) -> Self {
        match self {
            Self::North | Self::South => Self::East,
            Self::East | Self::West => Self::South,
        }
    }

    /// The two quadrants touching this side, in traversal order.
    #[must_use]
    pub const fn edge_quadrants(self) -> [Quadrant; 2] {
        match self {
            Self::North => [Quadrant::NorthWest, Quadrant::NorthEast],
            Self::East => [Quadrant::NorthEast, Quadrant::SouthEast],
            Self::South => [Quadrant::SouthWest, Quadrant::SouthEast],
            Self::West => [Quadrant::NorthWest, Quadrant::SouthWest],
        }
    }

    /// Quadrant where a walk of the cells bordering this side begins.
    ///
    /// The cells on the far side of a northern edge face back south, and the
    /// walk starts at the west end, so the first cell sits in the south-west
    /// corner of the neighboring block.
    #[must_use]
    pub const fn edge_start(self) -> Quadrant {
        match self {
            Self::North => Quadrant::SouthWest,
            Self::East | Self::South => Quadrant::NorthWest,
            Self::West => Quadrant::NorthEast,
        }
    }

    /// Returns true for north and south.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

/// Position of a child cell within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Upper-left child
    NorthWest,
    /// Upper-right child
    NorthEast,
    /// Lower-right child
    SouthEast,
    /// Lower-left child
    SouthWest,
}

impl Quadrant {
    /// All quadrants in child-array order.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Index into the children array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this quadrant touches the given side of its parent.
    #[must_use]
    pub const fn is_adjacent(self, side: Side) -> bool {
        matches!(
            (self, side),
            (Self::NorthWest | Self::NorthEast, Side::North)
                | (Self::NorthEast | Self::SouthEast, Side::East)
                | (Self::SouthEast | Self::SouthWest, Side::South)
                | (Self::SouthWest | Self::NorthWest, Side::West)
        )
    }

    /// Mirror image of this quadrant across the axis crossed when moving
    /// towards `side`.
    ///
    /// `NorthWest.reflect(North)` is `SouthWest`: the quadrant of the cell
    /// directly above, inside the block above.
    #[must_use]
    pub const fn reflect(self, side: Side) -> Self {
        if side.is_vertical() {
            match self {
                Self::NorthWest => Self::SouthWest,
                Self::NorthEast => Self::SouthEast,
                Self::SouthEast => Self::NorthEast,
                Self::SouthWest => Self::NorthWest,
            }
        } else {
            match self {
                Self::NorthWest => Self::NorthEast,
                Self::NorthEast => Self::NorthWest,
                Self::SouthEast => Self::SouthWest,
                Self::SouthWest => Self::SouthEast,
            }
        }
    }

    /// Bounds of this quadrant inside `parent`.
    ///
    /// Every quadrant is cut at the same midpoint so the four children tile
    /// the parent with no gap or overlap.
    #[must_use]
    pub fn bounds_within(self, parent: &Rect) -> Rect {
        let mid = parent.center();
        match self {
            Self::NorthWest => Rect::from_corners(parent.min, mid),
            Self::NorthEast => Rect::new(mid.x, parent.min.y, parent.max.x, mid.y),
            Self::SouthEast => Rect::from_corners(mid, parent.max),
            Self::SouthWest => Rect::new(parent.min.x, mid.y, mid.x, parent.max.y),
        }
    }

    /// Quadrant of `parent` holding `point`.
    ///
    /// Points on a dividing line resolve to the lower coordinate (west,
    /// north) half.
    #[must_use]
    pub fn containing(parent: &Rect, point: Vec2) -> Self {
        let mid = parent.center();
        match (point.x <= mid.x, point.y <= mid.y) {
            (true, true) => Self::NorthWest,
            (false, true) => Self::NorthEast,
            (false, false) => Self::SouthEast,
            (true, false) => Self::SouthWest,
        }
    }
}
