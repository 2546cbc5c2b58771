//! Polygon geometry for terrain zones
//!
//! A polygon is an ordered ring of points, implicitly closed (the last point
//! connects back to the first). Containment uses the even-odd rule: cast a
//! horizontal ray from the point and count edge crossings.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A closed polygon in course space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangle from two opposite corners
    pub fn rect(min: Vec2, max: Vec2) -> Self {
        Self::new(vec![
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(max.x, max.y),
            Vec2::new(min.x, max.y),
        ])
    }

    /// Fewer than 3 points can't enclose anything
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Even-odd point containment. Degenerate polygons contain nothing.
    pub fn contains_point(&self, p: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }

        let pts = &self.points;
        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (a, b) = (pts[i], pts[j]);
            // Edge straddles the ray's y; horizontal edges never do
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Bounding box as (min, max), None when empty
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }
}

/// Axis-aligned world rectangle; anything outside is out of bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for WorldBounds {
    fn default() -> Self {
        use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
        }
    }
}

impl WorldBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Edges count as inside
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}
