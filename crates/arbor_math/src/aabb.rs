use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// [`Aabb::EMPTY`] is the identity of expansion: growing it by any box or point
/// yields exactly that box or point.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB from two corner points, in any order.
    ///
    /// The box is tight; use [`Aabb::padded`] for flat geometry.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Degenerate box holding a single point.
    pub fn from_point(p: Vec3) -> Self {
        Self::from_points(p, p)
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Grow this box to also enclose `other`.
    pub fn expand(&mut self, other: &Aabb) {
        *self = Self::surrounding(self, other);
    }

    /// Grow this box to also enclose the point `p`.
    pub fn expand_point(&mut self, p: Vec3) {
        self.x.include(p.x);
        self.y.include(p.y);
        self.z.include(p.z);
    }

    /// True until something has been expanded into the box.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Per-axis size, `max - min`.
    pub fn extent(&self) -> Vec3 {
        self.max() - self.min()
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Whether `other` lies entirely inside this box (boundaries inclusive).
    pub fn contains_box(&self, other: &Aabb) -> bool {
        (0..3).all(|axis| {
            let outer = self.axis_interval(axis);
            let inner = other.axis_interval(axis);
            outer.min <= inner.min && inner.max <= outer.max
        })
    }

    /// Slab test that narrows `ray_t` to the overlap of the ray with the box.
    ///
    /// Returns false when the narrowed interval becomes inverted; `ray_t` may
    /// be partially narrowed in that case. Touching the box at a single
    /// parameter counts as a hit so flat boxes stay hittable.
    pub fn intersect(&self, r: &Ray, ray_t: &mut Interval) -> bool {
        let ray_orig = r.origin;
        let inv_dir = r.inv_direction();

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = inv_dir[axis];
            let mut t0 = (slab.min - ray_orig[axis]) * adinv;
            let mut t1 = (slab.max - ray_orig[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            // f32::max/min drop the NaN produced by 0 * inf, leaving the
            // interval untouched on that axis.
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.min > ray_t.max {
                return false;
            }
        }

        true
    }

    /// Test if a ray intersects this AABB within the given interval.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        self.intersect(r, &mut ray_t)
    }

    /// Widen every axis thinner than `delta` to exactly `delta`.
    pub fn padded(&self, delta: f32) -> Aabb {
        let pad = |i: Interval| if i.size() < delta { i.expand(delta - i.size()) } else { i };
        Aabb::new(pad(self.x), pad(self.y), pad(self.z))
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the largest extent.
    ///
    /// Ties go to the lowest axis: X beats Y beats Z.
    pub fn max_extent_axis(&self) -> usize {
        let e = self.extent();

        if e.x >= e.y && e.x >= e.z {
            0
        } else if e.y >= e.z {
            1
        } else {
            2
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(self.x.midpoint(), self.y.midpoint(), self.z.midpoint())
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl FromIterator<Aabb> for Aabb {
    fn from_iter<I: IntoIterator<Item = Aabb>>(iter: I) -> Self {
        iter.into_iter().fold(Aabb::EMPTY, |acc, b| Aabb::surrounding(&acc, &b))
    }
}
