//! Planar geometry: the `Vec2` value type and the bounded `Plane`.
//!
//! Coordinates are screen-style `f32` units (the default plane is
//! 900 × 600).  Nothing in the engine clamps positions to the plane; only
//! destination generation respects its bounds.

use std::ops::{Add, AddAssign, Mul, Sub};

use crate::{RandomSource, SirError, SirResult};

/// A 2D vector used for positions, destinations, and velocities.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// `true` if both axis distances to `other` are within `margin`.
    #[inline]
    pub fn within_box(self, other: Vec2, margin: f32) -> bool {
        (self.x - other.x).abs() <= margin && (self.y - other.y).abs() <= margin
    }

    /// Clamp each component independently to `[-limit, limit]`.
    #[inline]
    pub fn clamp_axes(self, limit: f32) -> Vec2 {
        Vec2::new(self.x.clamp(-limit, limit), self.y.clamp(-limit, limit))
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Plane ─────────────────────────────────────────────────────────────────────

/// The nominal bounds agents wander in: `[0, width] × [0, height]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane {
    pub width:  f32,
    pub height: f32,
}

impl Plane {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Reject degenerate planes (non-finite or non-positive sides).
    pub fn validate(&self) -> SirResult<()> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(SirError::InvalidPlane { width: self.width, height: self.height })
        }
    }

    /// Uniform random point anywhere in the plane.
    pub fn random_point<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Vec2 {
        self.random_point_inset(0.0, rng)
    }

    /// Uniform random point at least `margin` away from every edge.
    ///
    /// If the plane is narrower than `2 * margin` along an axis the point
    /// collapses onto that axis' midline.
    pub fn random_point_inset<R: RandomSource + ?Sized>(&self, margin: f32, rng: &mut R) -> Vec2 {
        let axis = |len: f32, rng: &mut R| {
            if len <= 2.0 * margin {
                len * 0.5
            } else {
                rng.uniform(margin, len - margin)
            }
        };
        let x = axis(self.width, rng);
        let y = axis(self.height, rng);
        Vec2::new(x, y)
    }

    /// `true` if `p` lies inside the nominal bounds (edges inclusive).
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Plane::new(900.0, 600.0)
    }
}
