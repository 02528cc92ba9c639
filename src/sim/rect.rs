//! Axis-aligned rectangle primitives
//!
//! Every collision test in the game reduces to rectangle overlap or a
//! center-to-center distance, all in board tile units.

use glam::Vec2;

/// Axis-aligned rectangle in tile units (origin at top-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square rect, used for players, projectiles and pickups
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self::new(pos.x, pos.y, size, size)
    }

    /// Strict overlap test: touching edges do not count as intersecting
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Euclidean distance between rectangle centers
    pub fn center_distance(&self, other: &Rect) -> f32 {
        self.center().distance(other.center())
    }

    /// Whether the rect lies fully inside the board `[0, width] x [0, height]`
    pub fn within_board(&self, width: f32, height: f32) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x + self.w <= width && self.y + self.h <= height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(1.0, 1.0, 2.0, 2.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 1.0, 1.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_disjoint() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(5.0, 5.0, 1.0, 1.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_center_distance() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(3.0, 1.0, 2.0, 2.0);
        // Centers at (1,1) and (4,2)
        assert!((a.center_distance(&b) - 10.0f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_within_board() {
        let board = (40.0, 20.0);
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).within_board(board.0, board.1));
        assert!(Rect::new(39.0, 19.0, 1.0, 1.0).within_board(board.0, board.1));
        assert!(!Rect::new(39.5, 0.0, 1.0, 1.0).within_board(board.0, board.1));
        assert!(!Rect::new(-0.1, 0.0, 1.0, 1.0).within_board(board.0, board.1));
    }
}
