//! Triangle primitive.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{Intersection, Primitive};
use arbor_math::{Aabb, Ray, Vec3};

/// Thickness given to the flat axis of an axis-aligned triangle's box.
const BBOX_PAD: f32 = 0.0002;

/// A single-sided-geometry, double-sided-hit triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    /// Bounding box
    bbox: Aabb,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let mut bbox = Aabb::from_point(v0);
        bbox.expand_point(v1);
        bbox.expand_point(v2);

        Self {
            v0,
            v1,
            v2,
            normal: (v1 - v0).cross(v2 - v0).normalize(),
            bbox: bbox.padded(BBOX_PAD),
        }
    }

    /// Möller-Trumbore. Returns the ray parameter of the plane hit if it
    /// falls inside the triangle, regardless of the ray's range.
    fn hit_t(&self, ray: &Ray) -> Option<f32> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-8 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        Some(f * edge2.dot(q))
    }
}

impl Primitive for Triangle {
    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn any_hit(&self, ray: &Ray) -> bool {
        self.hit_t(ray).is_some_and(|t| ray.range().contains(t))
    }

    fn closest_hit<'a>(&'a self, ray: &Ray, rec: &mut Intersection<'a>) -> bool {
        match self.hit_t(ray) {
            Some(t) if rec.improves(ray, t) => {
                rec.t = t;
                rec.p = ray.at(t);
                rec.set_face_normal(ray, self.normal);
                rec.primitive = Some(self);
                true
            }
            _ => false,
        }
    }
}
