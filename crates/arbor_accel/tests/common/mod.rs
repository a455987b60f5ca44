//! Random scenes shared by the integration tests.

#![allow(dead_code)]

use arbor_accel::{Cuboid, Primitive, Ray, Sphere, Triangle, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn point_in_cube(rng: &mut StdRng, half: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-half..half),
        rng.gen_range(-half..half),
        rng.gen_range(-half..half),
    )
}

/// A mixed scene of spheres, triangles and boxes scattered in a 20-unit cube.
pub fn random_scene(rng: &mut StdRng, count: usize) -> Vec<Box<dyn Primitive>> {
    (0..count)
        .map(|i| {
            let center = point_in_cube(rng, 10.0);
            let object: Box<dyn Primitive> = match i % 3 {
                0 => Box::new(Sphere::new(center, rng.gen_range(0.1..1.0))),
                1 => Box::new(Triangle::new(
                    center + point_in_cube(rng, 1.0),
                    center + point_in_cube(rng, 1.0),
                    center + point_in_cube(rng, 1.0),
                )),
                _ => {
                    let half = Vec3::new(
                        rng.gen_range(0.05..0.8),
                        rng.gen_range(0.05..0.8),
                        rng.gen_range(0.05..0.8),
                    );
                    Box::new(Cuboid::new(center - half, center + half))
                }
            };
            object
        })
        .collect()
}

/// Rays starting outside the scene, aimed at random points inside it.
pub fn random_rays(rng: &mut StdRng, count: usize) -> Vec<Ray> {
    (0..count)
        .map(|_| {
            let origin =
                point_in_cube(rng, 1.0).normalize_or_zero() * 30.0 + point_in_cube(rng, 2.0);
            let target = point_in_cube(rng, 10.0);
            let ray = Ray::new_simple(origin, target - origin);
            if rng.gen_bool(0.25) {
                // Clip some rays so range checks are exercised too
                ray.with_range(0.2, rng.gen_range(0.5..1.2))
            } else {
                ray
            }
        })
        .collect()
}

pub fn as_refs(objects: &[Box<dyn Primitive>]) -> Vec<&(dyn Primitive + 'static)> {
    objects.iter().map(|o| o.as_ref()).collect()
}

/// Address of a primitive, for identity comparisons.
pub fn addr(p: &dyn Primitive) -> *const () {
    p as *const _ as *const ()
}
