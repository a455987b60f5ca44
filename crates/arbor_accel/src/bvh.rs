//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over borrowed primitives. Construction splits at the
//! midpoint of the centroid bounds along the longest axis of the node's
//! bounding box; traversal prunes every subtree whose box the ray misses.

use crate::{BvhConfig, BvhError, BvhStats, Intersection, IntersectionCounter, Primitive};
use arbor_math::{Aabb, Ray};
use rayon::prelude::*;

/// BVH node - either a branch with two children or a leaf with primitives.
///
/// A branch always owns exactly two children and its box is the exact union
/// of its subtree's primitive boxes.
pub enum BvhNode<'p, P: ?Sized> {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode<'p, P>>,
        right: Box<BvhNode<'p, P>>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf { primitives: Vec<&'p P>, bbox: Aabb },
}

impl<'p, P: Primitive + ?Sized> BvhNode<'p, P> {
    /// Recursive BVH construction.
    ///
    /// Primitives whose box centroid lies strictly below the split plane go
    /// left, the rest go right. A split that leaves one side empty would
    /// recurse on the same set forever, so that node becomes a leaf even if
    /// it exceeds `max_leaf_size`.
    fn build(primitives: Vec<&'p P>, max_leaf_size: usize) -> Self {
        let mut bbox = Aabb::EMPTY;
        let mut centroid_bounds = Aabb::EMPTY;
        for primitive in &primitives {
            let b = primitive.bounding_box();
            bbox.expand(&b);
            centroid_bounds.expand_point(b.centroid());
        }

        // Create leaf for small sets
        if primitives.len() <= max_leaf_size {
            return BvhNode::Leaf { primitives, bbox };
        }

        let axis = bbox.max_extent_axis();
        let split = centroid_bounds.axis_interval(axis).midpoint();

        let (left, right): (Vec<&'p P>, Vec<&'p P>) = primitives
            .into_iter()
            .partition(|p| p.bounding_box().centroid()[axis] < split);

        if left.is_empty() || right.is_empty() {
            let primitives = if left.is_empty() { right } else { left };
            log::debug!(
                "BVH: degenerate split on axis {} at {}, keeping {} primitives in one leaf",
                axis,
                split,
                primitives.len()
            );
            return BvhNode::Leaf { primitives, bbox };
        }

        BvhNode::Branch {
            left: Box::new(Self::build(left, max_leaf_size)),
            right: Box::new(Self::build(right, max_leaf_size)),
            bbox,
        }
    }

    /// Existence query: true as soon as any primitive in the subtree is hit.
    fn any_hit(&self, ray: &Ray, counter: &IntersectionCounter) -> bool {
        // Local copy; the ray's own range is never narrowed.
        let mut ray_t = ray.range();
        if !self.bbox().intersect(ray, &mut ray_t) {
            return false;
        }

        match self {
            BvhNode::Leaf { primitives, .. } => primitives.iter().any(|p| {
                counter.record();
                p.any_hit(ray)
            }),
            BvhNode::Branch { left, right, .. } => {
                let hit_left = left.any_hit(ray, counter);
                let hit_right = right.any_hit(ray, counter);
                hit_left || hit_right
            }
        }
    }

    /// Nearest-hit query. Both children share `rec`, so the closest hit wins
    /// regardless of visiting order.
    fn closest_hit<'a>(
        &'a self,
        ray: &Ray,
        rec: &mut Intersection<'a>,
        counter: &IntersectionCounter,
    ) -> bool {
        let mut ray_t = ray.range();
        if !self.bbox().intersect(ray, &mut ray_t) {
            return false;
        }

        match self {
            BvhNode::Leaf { primitives, .. } => {
                let mut hit_anything = false;
                for p in primitives {
                    counter.record();
                    if p.closest_hit(ray, rec) {
                        hit_anything = true;
                    }
                }
                hit_anything
            }
            BvhNode::Branch { left, right, .. } => {
                let hit_left = left.closest_hit(ray, rec, counter);
                let hit_right = right.closest_hit(ray, rec, counter);
                hit_left || hit_right
            }
        }
    }
}

impl<'p, P: ?Sized> BvhNode<'p, P> {
    pub fn bbox(&self) -> &Aabb {
        match self {
            BvhNode::Leaf { bbox, .. } => bbox,
            BvhNode::Branch { bbox, .. } => bbox,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhNode::Leaf { .. })
    }

    /// `(left, right)` for a branch, `None` for a leaf.
    pub fn children(&self) -> Option<(&BvhNode<'p, P>, &BvhNode<'p, P>)> {
        match self {
            BvhNode::Branch { left, right, .. } => Some((left.as_ref(), right.as_ref())),
            BvhNode::Leaf { .. } => None,
        }
    }

    /// Primitives stored at a leaf; empty for a branch.
    pub fn primitives(&self) -> &[&'p P] {
        match self {
            BvhNode::Leaf { primitives, .. } => primitives,
            BvhNode::Branch { .. } => &[],
        }
    }

    fn visit<F>(&self, depth: usize, f: &mut F)
    where
        F: FnMut(&BvhNode<'p, P>, usize),
    {
        f(self, depth);
        if let Some((left, right)) = self.children() {
            left.visit(depth + 1, f);
            right.visit(depth + 1, f);
        }
    }
}

/// A BVH over borrowed primitives.
///
/// The tree never owns the primitives; they must outlive it. After
/// construction it is read-only, so queries may run from many threads.
pub struct Bvh<'p, P: ?Sized> {
    root: BvhNode<'p, P>,
    config: BvhConfig,
    primitive_count: usize,
    intersection_tests: IntersectionCounter,
}

impl<'p, P: Primitive + ?Sized> Bvh<'p, P> {
    /// Build a BVH from a list of primitives.
    pub fn new(primitives: &[&'p P], config: BvhConfig) -> Result<Self, BvhError> {
        config.validate()?;
        if primitives.is_empty() {
            return Err(BvhError::EmptyPrimitiveSet);
        }

        let bvh = Self {
            root: BvhNode::build(primitives.to_vec(), config.max_leaf_size),
            config,
            primitive_count: primitives.len(),
            intersection_tests: IntersectionCounter::new(),
        };

        log::info!("BVH built: {}", bvh.stats());
        Ok(bvh)
    }

    /// Build with the given leaf size.
    pub fn build_tree(primitives: &[&'p P], max_leaf_size: usize) -> Result<Self, BvhError> {
        Self::new(primitives, BvhConfig { max_leaf_size })
    }

    /// Bounding box enclosing every primitive in the tree.
    pub fn overall_bounds(&self) -> Aabb {
        *self.root.bbox()
    }

    pub fn root(&self) -> &BvhNode<'p, P> {
        &self.root
    }

    pub fn config(&self) -> &BvhConfig {
        &self.config
    }

    pub fn primitive_count(&self) -> usize {
        self.primitive_count
    }

    /// Primitive tests performed by queries since construction or the last reset.
    pub fn intersection_tests(&self) -> u64 {
        self.intersection_tests.get()
    }

    /// Zero the test counter, returning its previous value.
    pub fn reset_intersection_tests(&self) -> u64 {
        self.intersection_tests.reset()
    }

    /// Walk every node in pre-order (node, left subtree, right subtree),
    /// passing the node and its depth (root = 0).
    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&BvhNode<'p, P>, usize),
    {
        self.root.visit(0, &mut f);
    }

    /// Iterate leaves left to right as `(bbox, primitives)` pairs.
    pub fn leaves(&self) -> Leaves<'_, 'p, P> {
        Leaves {
            stack: vec![&self.root],
        }
    }

    /// Shape summary of the tree.
    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats::default();
        self.for_each_node(|node, depth| stats.record(node, depth, self.config.max_leaf_size));
        stats
    }

    /// Run [`Primitive::any_hit`] for every ray in parallel.
    pub fn any_hit_batch(&self, rays: &[Ray]) -> Vec<bool> {
        log::trace!("BVH any-hit batch of {} rays", rays.len());
        rays.par_iter().map(|ray| self.any_hit(ray)).collect()
    }

    /// Run [`Primitive::closest_hit`] for every ray in parallel, each with a
    /// fresh record. Misses come back as records with no primitive.
    pub fn closest_hit_batch(&self, rays: &[Ray]) -> Vec<Intersection<'_>> {
        log::trace!("BVH closest-hit batch of {} rays", rays.len());
        rays.par_iter()
            .map(|ray| {
                let mut rec = Intersection::default();
                self.closest_hit(ray, &mut rec);
                rec
            })
            .collect()
    }
}

impl<'p, P: Primitive + ?Sized> Primitive for Bvh<'p, P> {
    fn bounding_box(&self) -> Aabb {
        self.overall_bounds()
    }

    fn any_hit(&self, ray: &Ray) -> bool {
        self.root.any_hit(ray, &self.intersection_tests)
    }

    fn closest_hit<'a>(&'a self, ray: &Ray, rec: &mut Intersection<'a>) -> bool {
        self.root.closest_hit(ray, rec, &self.intersection_tests)
    }
}

/// Left-to-right iterator over the leaves of a [`Bvh`].
pub struct Leaves<'t, 'p, P: ?Sized> {
    stack: Vec<&'t BvhNode<'p, P>>,
}

impl<'t, 'p, P: ?Sized> Iterator for Leaves<'t, 'p, P> {
    type Item = (&'t Aabb, &'t [&'p P]);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                BvhNode::Leaf { primitives, bbox } => return Some((bbox, primitives.as_slice())),
                BvhNode::Branch { left, right, .. } => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cuboid, Sphere};
    use arbor_math::Vec3;

    fn row_of_spheres(n: usize) -> Vec<Sphere> {
        (0..n).map(|i| Sphere::new(Vec3::new(i as f32, 0.0, -5.0), 0.5)).collect()
    }

    #[test]
    fn test_bvh_empty_is_error() {
        let empty: Vec<&Sphere> = Vec::new();
        assert_eq!(
            Bvh::new(&empty, BvhConfig::default()).err(),
            Some(BvhError::EmptyPrimitiveSet)
        );
    }

    #[test]
    fn test_bvh_zero_leaf_size_is_error() {
        let spheres = row_of_spheres(2);
        let refs: Vec<&Sphere> = spheres.iter().collect();
        assert_eq!(Bvh::build_tree(&refs, 0).err(), Some(BvhError::InvalidLeafSize(0)));
    }

    #[test]
    fn test_bvh_single_sphere() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let bvh = Bvh::new(&[&sphere], BvhConfig::default()).unwrap();

        // Should create a leaf
        assert!(bvh.root().is_leaf());
        assert_eq!(bvh.overall_bounds(), sphere.bounding_box());

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
            .with_range(0.001, f32::INFINITY);
        let mut rec = Intersection::default();
        assert!(bvh.closest_hit(&ray, &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let spheres = row_of_spheres(10);
        let refs: Vec<&Sphere> = spheres.iter().collect();
        let bvh = Bvh::new(&refs, BvhConfig::default()).unwrap();

        assert!(!bvh.root().is_leaf());

        // Test ray that hits sphere at x=5
        let ray = Ray::new_simple(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = Intersection::default();
        assert!(bvh.closest_hit(&ray, &mut rec));

        // Hit point should be near z = -4.5 (sphere at z=-5, radius 0.5)
        assert!((rec.p.z - (-4.5)).abs() < 0.01);
        assert_eq!(rec.primitive.map(|p| p.bounding_box()), Some(spheres[5].bounding_box()));
    }

    #[test]
    fn test_split_uses_bbox_extent_and_centroid_midpoint() {
        // Spread along x; centroids at 0, 1, 2, 10 so the midpoint is 5.
        let cubes: Vec<Cuboid> = [0.0, 1.0, 2.0, 10.0]
            .into_iter()
            .map(|x| Cuboid::new(Vec3::new(x - 0.5, -0.5, -0.5), Vec3::new(x + 0.5, 0.5, 0.5)))
            .collect();
        let refs: Vec<&Cuboid> = cubes.iter().collect();
        let bvh = Bvh::build_tree(&refs, 1).unwrap();

        let (left, right) = bvh.root().children().expect("root should split");
        assert_eq!(left.bbox().x.max, 2.5);
        assert_eq!(right.bbox().x.min, 9.5);
        assert!(right.is_leaf());
        assert_eq!(right.primitives().len(), 1);
    }

    #[test]
    fn test_coincident_centroids_terminate_as_oversized_leaf() {
        let spheres: Vec<Sphere> = (1..=20)
            .map(|i| Sphere::new(Vec3::ZERO, i as f32 * 0.1))
            .collect();
        let refs: Vec<&Sphere> = spheres.iter().collect();
        let bvh = Bvh::build_tree(&refs, 2).unwrap();

        assert!(bvh.root().is_leaf());
        assert_eq!(bvh.root().primitives().len(), 20);
        assert_eq!(bvh.stats().oversized_leaves, 1);
    }

    #[test]
    fn test_distinct_centroids_near_max_float_still_split() {
        // The centroid sum overflows f32 here; the split plane must not.
        let cubes: Vec<Cuboid> = [2e38_f32, 2.5e38, 3e38]
            .into_iter()
            .map(|x| Cuboid::new(Vec3::new(x - 0.5, -0.5, -0.5), Vec3::new(x + 0.5, 0.5, 0.5)))
            .collect();
        let refs: Vec<&Cuboid> = cubes.iter().collect();
        let stats = Bvh::build_tree(&refs, 1).unwrap().stats();

        assert_eq!(stats.leaf_count, 3);
        assert_eq!(stats.largest_leaf, 1);
        assert_eq!(stats.oversized_leaves, 0);
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn test_sibling_pruning_does_not_narrow_ray() {
        let spheres = row_of_spheres(8);
        let refs: Vec<&Sphere> = spheres.iter().collect();
        let bvh = Bvh::build_tree(&refs, 1).unwrap();

        // Along the row: every sphere is hit, the nearest is x=0.
        let ray = Ray::new_simple(Vec3::new(-5.0, 0.0, -5.0), Vec3::X);
        let mut rec = Intersection::default();
        assert!(bvh.closest_hit(&ray, &mut rec));
        assert!((rec.t - 4.5).abs() < 1e-4);

        // Every leaf box lies on the ray, so every leaf was tested even
        // after the nearest hit was found.
        assert_eq!(bvh.intersection_tests(), 8);
    }

    #[test]
    fn test_leaves_iterate_left_to_right() {
        let spheres = row_of_spheres(6);
        let refs: Vec<&Sphere> = spheres.iter().collect();
        let bvh = Bvh::build_tree(&refs, 1).unwrap();

        let xs: Vec<f32> = bvh
            .leaves()
            .flat_map(|(_, prims)| prims.iter().map(|p| p.center().x))
            .collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_for_each_node_is_preorder_with_depth() {
        let spheres = row_of_spheres(3);
        let refs: Vec<&Sphere> = spheres.iter().collect();
        let bvh = Bvh::build_tree(&refs, 1).unwrap();

        // Centroids 0, 1, 2 split at 1: {0} | {1, 2}, then {1} | {2}.
        let mut visited = Vec::new();
        bvh.for_each_node(|node, depth| visited.push((node.is_leaf(), depth)));
        assert_eq!(
            visited,
            vec![(false, 0), (true, 1), (false, 1), (true, 2), (true, 2)]
        );
    }

    #[test]
    fn test_batch_matches_single_queries() {
        let spheres = row_of_spheres(16);
        let refs: Vec<&Sphere> = spheres.iter().collect();
        let bvh = Bvh::build_tree(&refs, 3).unwrap();

        let rays: Vec<Ray> = (0..32)
            .map(|i| Ray::new_simple(Vec3::new(i as f32 * 0.5, 0.0, 0.0), Vec3::NEG_Z))
            .collect();

        let any = bvh.any_hit_batch(&rays);
        let closest = bvh.closest_hit_batch(&rays);
        for (i, ray) in rays.iter().enumerate() {
            assert_eq!(any[i], bvh.any_hit(ray));
            assert_eq!(closest[i].is_hit(), any[i]);
        }
    }

    #[test]
    fn test_nested_bvh_as_primitive() {
        let spheres = row_of_spheres(4);
        let refs: Vec<&Sphere> = spheres.iter().collect();
        let inner = Bvh::build_tree(&refs, 1).unwrap();

        let outer = Bvh::build_tree(&[&inner as &dyn Primitive], 1).unwrap();
        assert_eq!(outer.overall_bounds(), inner.overall_bounds());

        let ray = Ray::new_simple(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(outer.any_hit(&ray));
        assert!(inner.intersection_tests() > 0);
    }
}
