//! Distance, circle overlap and coordinate mapping
//!
//! Enemies live in a normalized `[0, 100]²` space and are mapped onto the
//! board through two independent linear scales.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::NORMALIZED_EXTENT;

/// Euclidean distance between two points
#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    p1.distance(p2)
}

/// Whether two circles overlap
///
/// Strict: circles that exactly touch do not overlap.
#[inline]
pub fn overlaps(p1: Vec2, r1: f32, p2: Vec2, r2: f32) -> bool {
    distance(p1, p2) < r1 + r2
}

/// Linear interpolation, `start + (end - start) * t`
#[inline]
pub fn lerp(start: Vec2, end: Vec2, t: f32) -> Vec2 {
    start + (end - start) * t
}

/// Scalar linear interpolation
#[inline]
pub fn lerp_f32(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// A linear map from a domain interval onto a range interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f32, f32),
    pub range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value into the range (extrapolates outside the domain)
    pub fn apply(&self, value: f32) -> f32 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return self.range.0;
        }
        let t = (value - self.domain.0) / span;
        lerp_f32(self.range.0, self.range.1, t)
    }
}

/// The pair of scales taking normalized enemy coordinates to board pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub x: LinearScale,
    pub y: LinearScale,
}

impl Axes {
    /// Axes for a board of the given pixel size
    pub fn for_board(width: f32, height: f32) -> Self {
        Self {
            x: LinearScale::new((0.0, NORMALIZED_EXTENT), (0.0, width)),
            y: LinearScale::new((0.0, NORMALIZED_EXTENT), (0.0, height)),
        }
    }

    #[inline]
    pub fn to_board(&self, normalized: Vec2) -> Vec2 {
        Vec2::new(self.x.apply(normalized.x), self.y.apply(normalized.y))
    }
}
