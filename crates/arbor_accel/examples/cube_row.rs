//! Builds a BVH over a row of cubes and fires a few rays at it.
//!
//! Run with `RUST_LOG=debug` to see construction logging.

use anyhow::Result;
use arbor_accel::{Bvh, BvhConfig, Cuboid, Intersection, Primitive, Ray, Vec3};

fn main() -> Result<()> {
    env_logger::init();

    let cubes: Vec<Cuboid> = (0..5).map(|i| Cuboid::unit(Vec3::new(i as f32, 0.0, 0.0))).collect();
    let refs: Vec<&Cuboid> = cubes.iter().collect();

    let config: BvhConfig = match std::env::args().nth(1) {
        Some(json) => serde_json::from_str(&json)?,
        None => BvhConfig::new(2),
    };
    let bvh = Bvh::new(&refs, config)?;

    println!("Bounds: {:?}", bvh.overall_bounds());
    println!("Stats:  {}", bvh.stats());

    let rays = [
        ("through cube 2", Ray::new_simple(Vec3::new(2.5, 0.5, -5.0), Vec3::Z)),
        ("along the row", Ray::new_simple(Vec3::new(-3.0, 0.5, 0.5), Vec3::X)),
        ("above the row", Ray::new_simple(Vec3::new(2.5, 5.0, -5.0), Vec3::Z)),
    ];

    for (name, ray) in &rays {
        bvh.reset_intersection_tests();
        let any = bvh.any_hit(ray);

        let mut rec = Intersection::default();
        let closest = bvh.closest_hit(ray, &mut rec);

        if closest {
            println!(
                "{:>15}: hit at t={} p={} ({} primitive tests)",
                name,
                rec.t,
                rec.p,
                bvh.intersection_tests()
            );
        } else {
            println!(
                "{:>15}: any={} miss ({} primitive tests)",
                name,
                any,
                bvh.intersection_tests()
            );
        }
    }

    Ok(())
}
