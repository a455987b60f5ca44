//! Linear aggregate that tests every primitive.

use crate::{Intersection, IntersectionCounter, Primitive};
use arbor_math::{Aabb, Ray};

/// A flat list of borrowed primitives answered by brute force.
///
/// Serves as the reference answer a [`crate::Bvh`] must reproduce.
pub struct PrimitiveList<'p, P: ?Sized> {
    objects: Vec<&'p P>,
    bbox: Aabb,
    intersection_tests: IntersectionCounter,
}

impl<'p, P: Primitive + ?Sized> PrimitiveList<'p, P> {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
            intersection_tests: IntersectionCounter::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: &'p P) {
        self.bbox.expand(&object.bounding_box());
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[&'p P] {
        &self.objects
    }

    /// Primitive tests performed since construction or the last reset.
    pub fn intersection_tests(&self) -> u64 {
        self.intersection_tests.get()
    }

    pub fn reset_intersection_tests(&self) -> u64 {
        self.intersection_tests.reset()
    }
}

impl<'p, P: Primitive + ?Sized> Default for PrimitiveList<'p, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p, P: Primitive + ?Sized> FromIterator<&'p P> for PrimitiveList<'p, P> {
    fn from_iter<I: IntoIterator<Item = &'p P>>(iter: I) -> Self {
        let mut list = Self::new();
        for object in iter {
            list.add(object);
        }
        list
    }
}

impl<'p, P: Primitive + ?Sized> Primitive for PrimitiveList<'p, P> {
    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn any_hit(&self, ray: &Ray) -> bool {
        self.objects.iter().any(|object| {
            self.intersection_tests.record();
            object.any_hit(ray)
        })
    }

    fn closest_hit<'a>(&'a self, ray: &Ray, rec: &mut Intersection<'a>) -> bool {
        let mut hit_anything = false;

        for object in &self.objects {
            self.intersection_tests.record();
            if object.closest_hit(ray, rec) {
                hit_anything = true;
            }
        }

        hit_anything
    }
}
