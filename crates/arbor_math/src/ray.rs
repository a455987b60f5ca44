use crate::{Interval, Vec3};

/// A ray in 3D space with origin, direction, time and a validity range.
///
/// Only hits with a parameter inside `[min_t, max_t]` count. Queries never
/// narrow these bounds; accelerators work on local copies of the range.
/// The direction is fixed at construction so its cached reciprocal stays valid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    direction: Vec3,
    pub time: f32,
    pub min_t: f32,
    pub max_t: f32,
    inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray valid over `[0, +inf]`.
    pub fn new(origin: Vec3, direction: Vec3, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
            min_t: 0.0,
            max_t: f32::INFINITY,
            inv_direction: direction.recip(),
        }
    }

    /// Create a ray at time 0.
    #[inline]
    pub fn new_simple(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, 0.0)
    }

    /// Restrict the ray to the parameter range `[min_t, max_t]`.
    pub fn with_range(mut self, min_t: f32, max_t: f32) -> Self {
        self.min_t = min_t;
        self.max_t = max_t;
        self
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Componentwise reciprocal of the direction.
    ///
    /// Axes with a zero direction component map to signed infinity, which
    /// the slab test relies on for axis-parallel rays.
    #[inline]
    pub fn inv_direction(&self) -> Vec3 {
        self.inv_direction
    }

    /// The validity range as an interval.
    #[inline]
    pub fn range(&self) -> Interval {
        Interval::new(self.min_t, self.max_t)
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
