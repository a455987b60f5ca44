//! Sphere primitive.

use crate::{Intersection, Primitive};
use arbor_math::{Aabb, Interval, Ray, Vec3};

/// A solid sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Nearest root of the ray-sphere quadratic inside `ray_t`.
    fn nearest_root(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        [(h - sqrtd) / a, (h + sqrtd) / a]
            .into_iter()
            .find(|root| ray_t.contains(*root))
    }
}

impl Primitive for Sphere {
    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn any_hit(&self, ray: &Ray) -> bool {
        self.nearest_root(ray, ray.range()).is_some()
    }

    fn closest_hit<'a>(&'a self, ray: &Ray, rec: &mut Intersection<'a>) -> bool {
        let Some(root) = self.nearest_root(ray, ray.range()) else {
            return false;
        };
        if !rec.improves(ray, root) {
            return false;
        }

        rec.t = root;
        rec.p = ray.at(root);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        rec.primitive = Some(self);

        true
    }
}
