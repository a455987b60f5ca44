//! Axis-aligned solid box primitive.

use crate::{Intersection, Primitive};
use arbor_math::{Aabb, Interval, Ray, Vec3};

/// A solid axis-aligned box. Its bounding box is the shape itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    bounds: Aabb,
}

impl Cuboid {
    /// Create a box spanning two opposite corners.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            bounds: Aabb::from_points(a, b),
        }
    }

    /// Unit cube with its minimum corner at `min`.
    pub fn unit(min: Vec3) -> Self {
        Self::new(min, min + Vec3::ONE)
    }

    /// Entry or exit parameter of the first surface crossing inside the ray's range.
    fn surface_t(&self, ray: &Ray) -> Option<f32> {
        let mut span = Interval::UNIVERSE;
        if !self.bounds.intersect(ray, &mut span) {
            return None;
        }
        let range = ray.range();
        [span.min, span.max].into_iter().find(|t| range.contains(*t))
    }

    /// Outward normal of the face closest to `p`.
    fn face_normal(&self, p: Vec3) -> Vec3 {
        let mut best = (f32::INFINITY, Vec3::ZERO);
        for axis in 0..3 {
            let slab = self.bounds.axis_interval(axis);
            let mut unit = Vec3::ZERO;
            unit[axis] = 1.0;
            let faces = [
                ((p[axis] - slab.min).abs(), -unit),
                ((slab.max - p[axis]).abs(), unit),
            ];
            for (dist, normal) in faces {
                if dist < best.0 {
                    best = (dist, normal);
                }
            }
        }
        best.1
    }
}

impl Primitive for Cuboid {
    fn bounding_box(&self) -> Aabb {
        self.bounds
    }

    fn any_hit(&self, ray: &Ray) -> bool {
        self.surface_t(ray).is_some()
    }

    fn closest_hit<'a>(&'a self, ray: &Ray, rec: &mut Intersection<'a>) -> bool {
        match self.surface_t(ray) {
            Some(t) if rec.improves(ray, t) => {
                rec.t = t;
                rec.p = ray.at(t);
                rec.set_face_normal(ray, self.face_normal(rec.p));
                rec.primitive = Some(self);
                true
            }
            _ => false,
        }
    }
}
