//! Planar geometry shared by the region tree and the world model.
//!
//! World space uses screen orientation: x grows to the east and y grows to
//! the south, so the "north" edge of a rectangle is its `min.y` edge.

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Axis-aligned rectangle described by its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum (north-west) corner
    pub min: Vec2,
    /// Maximum (south-east) corner
    pub max: Vec2,
}

impl Rect {
    /// Creates a new rectangle from its edge coordinates.
    #[must_use]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Creates a rectangle from two corner points.
    #[must_use]
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates a rectangle from its center and half-extents.
    #[must_use]
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Returns the width of the rectangle.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Returns the height of the rectangle.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Returns the area, or zero for degenerate rectangles.
    #[must_use]
    pub fn area(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.width() * self.height()
        }
    }

    /// Returns true if the rectangle has no positive area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Returns the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns the shorter of width and height.
    #[must_use]
    pub fn min_extent(&self) -> f32 {
        self.width().min(self.height())
    }

    /// Checks if the rectangle contains a point. Edges are inclusive.
    #[must_use]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Checks if this rectangle overlaps another with positive area.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Checks if this rectangle fully contains another.
    #[must_use]
    pub fn contains(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }

    /// Returns the overlapping region of two rectangles, if any.
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Rect::from_corners(
            self.min.max(other.min),
            self.max.min(other.max),
        ))
    }

    /// Returns the area of the overlap between two rectangles.
    #[must_use]
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        self.intersection(other).map_or(0.0, |r| r.area())
    }

    /// Returns the rectangle translated by a vector.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Expands the rectangle by a margin on all sides.
    #[must_use]
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect::new(10.0, 20.0, 30.0, 60.0);
        assert_eq!(rect.width(), 20.0);
        assert_eq!(rect.height(), 40.0);
        assert_eq!(rect.area(), 800.0);
        assert_eq!(rect.min_extent(), 20.0);
        assert_eq!(rect.center(), Vec2::new(20.0, 40.0));
    }

    #[test]
    fn test_rect_degenerate_area() {
        assert_eq!(Rect::new(0.0, 0.0, 0.0, 10.0).area(), 0.0);
        assert_eq!(Rect::new(5.0, 5.0, 0.0, 0.0).area(), 0.0);
        assert!(Rect::new(5.0, 5.0, 0.0, 0.0).is_empty());
    }

    #[test]
    fn test_rect_contains_point_inclusive() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains_point(Vec2::new(50.0, 50.0)));
        assert!(rect.contains_point(Vec2::new(0.0, 0.0)));
        assert!(rect.contains_point(Vec2::new(100.0, 100.0)));
        assert!(!rect.contains_point(Vec2::new(-1.0, 50.0)));
    }

    #[test]
    fn test_rect_overlaps_excludes_touching() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        let touching = Rect::new(10.0, 0.0, 20.0, 10.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&touching));
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, -5.0, 15.0, 5.0);

        assert_eq!(a.intersection(&b), Some(Rect::new(5.0, 0.0, 10.0, 5.0)));
        assert_eq!(a.intersection_area(&b), 25.0);
        assert_eq!(a.intersection(&Rect::new(20.0, 20.0, 30.0, 30.0)), None);
    }

    #[test]
    fn test_rect_contains() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(25.0, 25.0, 75.0, 75.0);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_rect_from_center_and_translate() {
        let rect = Rect::from_center(Vec2::new(10.0, 10.0), Vec2::new(5.0, 2.0));
        assert_eq!(rect, Rect::new(5.0, 8.0, 15.0, 12.0));

        let moved = rect.translated(Vec2::new(1.0, -1.0));
        assert_eq!(moved, Rect::new(6.0, 7.0, 16.0, 11.0));
        assert_eq!(moved.expanded(1.0), Rect::new(5.0, 6.0, 17.0, 12.0));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn rect_strategy() -> impl Strategy<Value = Rect> {
            (-50i16..50, -50i16..50, 1i16..40, 1i16..40).prop_map(|(x, y, w, h)| {
                let (x, y) = (f32::from(x), f32::from(y));
                Rect::new(x, y, x + f32::from(w), y + f32::from(h))
            })
        }

        proptest! {
            #[test]
            fn intersection_is_symmetric_and_bounded(a in rect_strategy(), b in rect_strategy()) {
                prop_assert_eq!(a.intersection(&b), b.intersection(&a));
                prop_assert_eq!(a.overlaps(&b), a.intersection_area(&b) > 0.0);
                prop_assert!(a.intersection_area(&b) <= a.area().min(b.area()));
                if let Some(shared) = a.intersection(&b) {
                    prop_assert!(a.contains(&shared) && b.contains(&shared));
                }
            }
        }
    }
}
