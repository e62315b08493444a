//! Foot placement
//!
//! Feet rest on voxel-aligned targets around the creature's root. When the
//! root has walked far enough away from a foot's target, the foot picks a new
//! one by rejection sampling candidates on the terrain surface, keeping a
//! minimum distance to every other foot's target.

use glam::Vec3;
use rand::Rng;

use crate::config::RigConfig;
use crate::rig::Rig;
use crate::traits::TerrainAccess;

/// Whether a foot with `target` has fallen too far behind the root
pub fn needs_retarget(target: Vec3, root: Vec3, config: &RigConfig) -> bool {
    target.distance(root) > config.retarget_distance
}

/// Random horizontal offset around the root, before scaling by the step radius.
///
/// Each horizontal axis lies in `[0.5, 1.5)` with an independent random sign;
/// the vertical axis lies in `[0, 1)` so the ground query starts above the root.
fn sample_offset(rng: &mut impl Rng) -> Vec3 {
    let mut offset = Vec3::new(
        0.5 + rng.random::<f32>(),
        rng.random::<f32>(),
        0.5 + rng.random::<f32>(),
    );
    if rng.random_bool(0.5) {
        offset.x = -offset.x;
    }
    if rng.random_bool(0.5) {
        offset.z = -offset.z;
    }
    offset
}

/// Pick a new target for foot `index`.
///
/// Returns true when a candidate was accepted. After `retarget_attempts`
/// rejected candidates the old target is kept; the next trigger tries again.
pub fn retarget(
    rig: &mut Rig,
    index: usize,
    terrain: &impl TerrainAccess,
    config: &RigConfig,
    rng: &mut impl Rng,
) -> bool {
    let root = rig.position;
    let lift = rig.feet()[index].scale.y;

    for _ in 0..config.retarget_attempts {
        let voxel = (root + sample_offset(rng) * config.step_radius)
            .floor()
            .as_ivec3();

        let Some(height) = terrain.ground(voxel, config.clearance) else {
            continue;
        };
        if height <= 0 {
            continue;
        }

        // Rest the foot on the surface, centered in its voxel column
        let candidate = Vec3::new(
            voxel.x as f32 + 0.5,
            height as f32 + lift,
            voxel.z as f32 + 0.5,
        );

        let crowded = rig
            .targets()
            .iter()
            .enumerate()
            .any(|(other, target)| other != index && target.distance(candidate) <= config.foot_spacing);
        if crowded {
            continue;
        }

        rig.set_target(index, candidate);
        return true;
    }

    log::trace!(
        "Foot {} kept its target after {} rejected candidates",
        index,
        config.retarget_attempts
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FlatTerrain;
    use crate::types::Palette;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn test_rig(limbs: usize, rng: &mut Xoshiro256StarStar) -> Rig {
        let palette = Palette::random(rng);
        Rig::new(limbs, &palette, Vec3::new(32.5, 5.0, 32.5), 2.0, rng)
    }

    #[test]
    fn test_retarget_trigger_threshold() {
        let config = RigConfig::default();
        let root = Vec3::new(10.0, 5.0, 10.0);

        assert!(needs_retarget(root + Vec3::X * 11.0, root, &config));
        assert!(!needs_retarget(root + Vec3::X * 9.0, root, &config));
        assert!(!needs_retarget(root + Vec3::X * 10.0, root, &config));
    }

    #[test]
    fn test_sample_offset_bounds() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let mut seen_negative_x = false;
        let mut seen_positive_x = false;

        for _ in 0..200 {
            let offset = sample_offset(&mut rng);
            assert!((0.5..1.5).contains(&offset.x.abs()));
            assert!((0.5..1.5).contains(&offset.z.abs()));
            assert!((0.0..1.0).contains(&offset.y));
            if offset.x < 0.0 {
                seen_negative_x = true;
            } else {
                seen_positive_x = true;
            }
        }

        assert!(seen_negative_x);
        assert!(seen_positive_x);
    }

    #[test]
    fn test_retarget_lands_on_surface() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(11);
        let mut rig = test_rig(1, &mut rng);
        let terrain = FlatTerrain::new(5);
        let config = RigConfig::default();

        assert!(retarget(&mut rig, 0, &terrain, &config, &mut rng));

        let target = rig.target(0);
        let lift = rig.feet()[0].scale.y;
        assert!((target.y - (5.0 + lift)).abs() < 1e-6);
        assert_eq!(target.x.fract(), 0.5);
        assert_eq!(target.z.fract(), 0.5);

        // Horizontal offset is at least half a step radius on each axis
        assert!((target.x - rig.position.x).abs() >= 2.0);
        assert!((target.z - rig.position.z).abs() >= 2.0);
    }

    #[test]
    fn test_retarget_without_ground_keeps_target() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let mut rig = test_rig(2, &mut rng);
        let terrain = FlatTerrain::void();
        let config = RigConfig::default();
        let before = rig.target(0);

        assert!(!retarget(&mut rig, 0, &terrain, &config, &mut rng));
        assert_eq!(rig.target(0), before);
    }

    #[test]
    fn test_retarget_rejects_non_positive_ground() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(5);
        let mut rig = test_rig(1, &mut rng);
        let terrain = FlatTerrain::new(0);
        let config = RigConfig::default();
        let before = rig.target(0);

        assert!(!retarget(&mut rig, 0, &terrain, &config, &mut rng));
        assert_eq!(rig.target(0), before);
    }

    #[test]
    fn test_retargeted_feet_keep_spacing() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(99);
        let mut rig = test_rig(9, &mut rng);
        let terrain = FlatTerrain::new(5);
        let config = RigConfig::default();

        let mut placed = Vec::new();
        for index in 0..rig.limbs() {
            if retarget(&mut rig, index, &terrain, &config, &mut rng) {
                placed.push(index);
            }
        }
        assert!(!placed.is_empty());

        // Only successfully placed feet are guaranteed to be spaced out
        for &i in &placed {
            for &j in &placed {
                if i != j {
                    assert!(rig.target(i).distance(rig.target(j)) > config.foot_spacing);
                }
            }
        }
    }
}
