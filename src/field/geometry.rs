//! Field geometry: corner triangles and fixed stake positions
//!
//! Canvas coordinates: origin at the top-left corner of the field, x to the
//! right, y downward. A corner triangle is the right triangle with legs of
//! `corner_leg` running along the two field edges that meet at the corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// The four field corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Bottom corners reward, top corners penalize
    pub fn is_positive(self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::BottomRight)
    }
}

/// Field dimensions used by the scoring rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldGeometry {
    /// Side length of the square field (canvas units)
    pub size: f32,
    /// Leg length of each corner triangle (canvas units)
    pub corner_leg: f32,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            size: FIELD_SIZE,
            corner_leg: CORNER_LEG_INCHES * PIXELS_PER_INCH,
        }
    }
}

impl FieldGeometry {
    pub fn new(size: f32, corner_leg: f32) -> Self {
        Self { size, corner_leg }
    }

    /// Check if a point lies inside a corner triangle (edges inclusive)
    pub fn in_corner(&self, p: Vec2, corner: Corner) -> bool {
        let leg = self.corner_leg;
        // Distances from the two field edges meeting at this corner
        let (dx, dy) = match corner {
            Corner::TopLeft => (p.x, p.y),
            Corner::TopRight => (self.size - p.x, p.y),
            Corner::BottomLeft => (p.x, self.size - p.y),
            Corner::BottomRight => (self.size - p.x, self.size - p.y),
        };
        (0.0..=leg).contains(&dx) && (0.0..=leg).contains(&dy) && dx + dy <= leg
    }

    /// The corner containing a point, if any
    pub fn corner_at(&self, p: Vec2) -> Option<Corner> {
        Corner::ALL.into_iter().find(|&c| self.in_corner(p, c))
    }

    /// Inside either bottom corner
    pub fn in_positive_corner(&self, p: Vec2) -> bool {
        self.in_corner(p, Corner::BottomLeft) || self.in_corner(p, Corner::BottomRight)
    }

    /// Inside either top corner
    pub fn in_negative_corner(&self, p: Vec2) -> bool {
        self.in_corner(p, Corner::TopLeft) || self.in_corner(p, Corner::TopRight)
    }

    /// Alliance stake positions (left and right edge midpoints)
    pub fn alliance_stake_positions(&self) -> [Vec2; 2] {
        let mid = self.size / 2.0;
        [Vec2::new(0.0, mid), Vec2::new(self.size, mid)]
    }

    /// Wall stake positions (top and bottom edge midpoints)
    pub fn wall_stake_positions(&self) -> [Vec2; 2] {
        let mid = self.size / 2.0;
        [Vec2::new(mid, 0.0), Vec2::new(mid, self.size)]
    }

    /// Clamp a point onto the field
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(Vec2::ZERO, Vec2::splat(self.size))
    }
}
