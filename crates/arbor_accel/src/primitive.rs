//! Primitive trait and Intersection record for ray-object queries.

use arbor_math::{Aabb, Ray, Vec3};
use std::fmt;

/// Record of the closest ray-primitive intersection found so far.
///
/// `t` starts at infinity, so any hit inside the ray's range improves on a
/// fresh record.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// The primitive that produced the hit
    pub primitive: Option<&'a dyn Primitive>,
}

impl Default for Intersection<'_> {
    fn default() -> Self {
        Self {
            t: f32::INFINITY,
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            front_face: false,
            primitive: None,
        }
    }
}

impl<'a> Intersection<'a> {
    /// True once a primitive has written into the record.
    pub fn is_hit(&self) -> bool {
        self.primitive.is_some()
    }

    /// Whether a hit at `t` lies in the ray's range and beats the current record.
    #[inline]
    pub fn improves(&self, ray: &Ray, t: f32) -> bool {
        ray.range().contains(t) && t < self.t
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

impl fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersection")
            .field("t", &self.t)
            .field("p", &self.p)
            .field("normal", &self.normal)
            .field("front_face", &self.front_face)
            .field("primitive", &self.primitive.map(|p| p.bounding_box()))
            .finish()
    }
}

/// Something a ray can be tested against.
///
/// Implementations must only report hits whose parameter lies in
/// `[ray.min_t, ray.max_t]`, and `closest_hit` must leave `rec` untouched
/// unless the new hit is strictly closer than `rec.t`. Aggregates rely on
/// that to keep the nearest hit while sharing one record across primitives.
pub trait Primitive: Send + Sync {
    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;

    /// Test whether the ray hits this object anywhere in its range.
    fn any_hit(&self, ray: &Ray) -> bool;

    /// Test the ray and update `rec` if this object is hit closer than `rec.t`.
    ///
    /// Returns true only when the record was updated.
    fn closest_hit<'a>(&'a self, ray: &Ray, rec: &mut Intersection<'a>) -> bool;
}
