//! Axis-aligned rectangle primitives
//!
//! World space has +x to the right and +y pointing down, matching screen
//! coordinates, so a rectangle's `y` is its top edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.w / 2.0, self.h / 2.0)
    }

    /// True if `other` lies entirely within this rectangle (edges may touch)
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }

    /// Grow the rectangle by `dx` on the left and right and `dy` on the top and bottom
    pub fn inflate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x - dx, self.y - dy, self.w + 2.0 * dx, self.h + 2.0 * dy)
    }
}

/// Strict overlap test; rectangles that only share an edge do not overlap
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Overlap depth of two rectangles on each axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Horizontal overlap (positive when overlapping)
    pub x: f32,
    /// Vertical overlap (positive when overlapping)
    pub y: f32,
    /// `mover.center - solid.center`; its sign says which side to push toward
    pub offset: Vec2,
}

impl Penetration {
    /// Resolve along x if that is the shallower axis
    pub fn is_horizontal(&self) -> bool {
        self.x < self.y
    }
}

/// Penetration of `mover` into `solid`, or `None` if they don't overlap
pub fn penetration(mover: &Rect, solid: &Rect) -> Option<Penetration> {
    if !overlaps(mover, solid) {
        return None;
    }
    let offset = mover.center() - solid.center();
    let reach = mover.half_extents() + solid.half_extents();
    Some(Penetration {
        x: reach.x - offset.x.abs(),
        y: reach.y - offset.y.abs(),
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));

        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_overlap_is_symmetric_and_reflexive() {
        let cases = [
            (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(5.0, 5.0, 10.0, 10.0)),
            (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(20.0, 0.0, 5.0, 5.0)),
            (Rect::new(-3.0, 2.0, 1.0, 50.0), Rect::new(-10.0, 20.0, 30.0, 1.0)),
            (Rect::new(0.0, 0.0, 100.0, 100.0), Rect::new(40.0, 40.0, 2.0, 2.0)),
        ];
        for (a, b) in cases {
            assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
            assert!(overlaps(&a, &a));
            assert!(overlaps(&b, &b));
        }
    }

    #[test]
    fn test_penetration_prefers_shallow_axis() {
        // Player sinking 2 units into the top of a wide platform
        let platform = Rect::new(0.0, 100.0, 200.0, 20.0);
        let player = Rect::new(50.0, 30.0, 36.0, 72.0);
        let pen = penetration(&player, &platform).unwrap();
        assert!((pen.y - 2.0).abs() < 1e-4);
        assert!(!pen.is_horizontal());
        assert!(pen.offset.y < 0.0);

        // Player pushed 3 units into the side of a tall wall
        let wall = Rect::new(100.0, 0.0, 20.0, 200.0);
        let player = Rect::new(67.0, 50.0, 36.0, 72.0);
        let pen = penetration(&player, &wall).unwrap();
        assert!((pen.x - 3.0).abs() < 1e-4);
        assert!(pen.is_horizontal());
        assert!(pen.offset.x < 0.0);
    }

    #[test]
    fn test_penetration_none_when_apart() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(penetration(&a, &b).is_none());
    }

    #[test]
    fn test_contains() {
        let goal = Rect::new(0.0, 0.0, 64.0, 96.0);
        assert!(goal.contains(&Rect::new(10.0, 10.0, 36.0, 72.0)));
        assert!(!goal.contains(&Rect::new(40.0, 10.0, 36.0, 72.0)));
    }
}
