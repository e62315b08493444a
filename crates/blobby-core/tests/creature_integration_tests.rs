//! Integration tests for creature-terrain interactions
//!
//! These tests need both the voxel volume and the creature, so they live in
//! blobby-core which has access to both.

use blobby_core::creature::{Blobby, FollowerState, RigConfig, TerrainAccess};
use blobby_core::world::{TerrainGenerator, Volume, WorldGenConfig, voxel};
use glam::{IVec3, Vec3};

fn flat_volume(height: i32) -> Volume {
    let mut volume = Volume::new(64, 32, 64).expect("valid dimensions");
    for x in 0..64 {
        for z in 0..64 {
            volume.fill_column(x, z, height, voxel::STONE);
        }
    }
    volume
}

fn spawn(volume: &Volume, seed: u64) -> Blobby {
    Blobby::new(RigConfig::default(), None, volume, seed).expect("valid config")
}

fn walk_until_idle(blobby: &mut Blobby, volume: &Volume, time: &mut f32) {
    let mut frames = 0;
    while blobby.state() == FollowerState::Following {
        blobby.tick(volume, 1.0 / 60.0, *time);
        *time += 1.0 / 60.0;
        frames += 1;
        assert!(frames < 60 * 30, "path never completed");
    }
}

// ============================================================================
// Spawning
// ============================================================================

#[test]
fn test_spawns_on_ground_at_center() {
    let volume = flat_volume(5);
    let blobby = spawn(&volume, 1);

    assert_eq!(blobby.position(), Vec3::new(32.5, 5.0, 32.5));
    assert_eq!(blobby.entities().len(), 30);
    assert_eq!(blobby.state(), FollowerState::Idle);
}

#[test]
fn test_spawned_feet_rest_on_surface_and_keep_spacing() {
    let volume = flat_volume(5);
    let blobby = spawn(&volume, 2);
    let rig = blobby.rig();
    let config = blobby.config();

    // Feet that found a spot sit on the surface; the rest stay on the root
    let placed: Vec<usize> = (0..rig.limbs())
        .filter(|&i| rig.target(i) != blobby.position())
        .collect();
    assert!(!placed.is_empty());

    for &i in &placed {
        let target = rig.target(i);
        assert!((target.y - (5.0 + rig.feet()[i].scale.y)).abs() < 1e-5);
        for &j in &placed {
            if i != j {
                assert!(target.distance(rig.target(j)) > config.foot_spacing);
            }
        }
    }
}

#[test]
fn test_spawn_over_generated_terrain() {
    let config = WorldGenConfig {
        width: 48,
        height: 48,
        depth: 48,
        ..Default::default()
    };
    let volume = TerrainGenerator::from_config(5, config)
        .generate()
        .expect("valid config");
    let blobby = spawn(&volume, 5);

    let root = blobby.position().floor().as_ivec3();
    assert_eq!(volume.ground(IVec3::new(root.x, 47, root.z), 4), Some(root.y));
}

// ============================================================================
// Movement
// ============================================================================

#[test]
fn test_move_to_walks_the_corridor() {
    let volume = flat_volume(5);
    let mut blobby = spawn(&volume, 3);

    let target = blobby
        .move_to(&volume, Vec3::new(40.5, 9.0, 32.5))
        .expect("reachable destination");
    assert_eq!(target, Vec3::new(40.5, 5.0, 32.5));

    let path = blobby.follower().path().expect("following");
    assert_eq!(path.positions().len(), 9);
    assert_eq!(path.positions()[0], Vec3::new(32.5, 5.0, 32.5));

    let mut time = 0.0;
    walk_until_idle(&mut blobby, &volume, &mut time);
    assert_eq!(blobby.position(), target);
}

#[test]
fn test_move_to_raycast_hit() {
    let volume = flat_volume(5);
    let mut blobby = spawn(&volume, 4);

    let hit = volume
        .raycast(Vec3::new(20.5, 40.0, 25.5), Vec3::NEG_Y, 100.0)
        .expect("ray hits the floor");
    let target = blobby
        .move_to(&volume, hit.surface_point())
        .expect("reachable destination");
    assert_eq!(target, Vec3::new(20.5, 5.0, 25.5));
}

#[test]
fn test_walks_up_steps() {
    let mut volume = flat_volume(5);
    for (i, x) in (35..39).enumerate() {
        for z in 0..64 {
            volume.fill_column(x, z, 6 + i as i32, voxel::STONE);
        }
    }
    let mut blobby = spawn(&volume, 6);

    let target = blobby
        .move_to(&volume, Vec3::new(38.5, 20.0, 32.5))
        .expect("reachable destination");
    assert_eq!(target.y, 9.0);

    let mut time = 0.0;
    walk_until_idle(&mut blobby, &volume, &mut time);
    assert_eq!(blobby.position(), target);
}

#[test]
fn test_unreachable_destination_keeps_current_path() {
    let mut volume = flat_volume(5);
    // Sealed pit floor at (10, _, 10)
    for x in 9..12 {
        for z in 9..12 {
            volume.fill_column(x, z, 20, voxel::STONE);
        }
    }
    for y in 5..20 {
        volume.set(IVec3::new(10, y, 10), voxel::AIR);
    }
    let mut blobby = spawn(&volume, 7);

    let first = blobby
        .move_to(&volume, Vec3::new(36.5, 5.0, 32.5))
        .expect("reachable destination");

    // Ground exists at the bottom of the shaft, but nothing leads there
    assert!(blobby.move_to(&volume, Vec3::new(10.5, 8.0, 10.5)).is_none());
    assert_eq!(blobby.follower().path().map(|p| p.destination()), Some(first));
}

#[test]
fn test_destination_without_ground() {
    let volume = flat_volume(5);
    let mut blobby = spawn(&volume, 8);

    assert!(blobby.move_to(&volume, Vec3::new(-4.0, 10.0, 5.0)).is_none());
    assert!(blobby.move_to(&volume, Vec3::new(5.0, 2.0, 5.0)).is_none());
    assert_eq!(blobby.state(), FollowerState::Idle);
}

#[test]
fn test_move_to_current_voxel_is_rejected() {
    let volume = flat_volume(5);
    let mut blobby = spawn(&volume, 9);
    let here = blobby.position();
    assert!(blobby.move_to(&volume, here).is_none());
    // One step away leaves only one waypoint past the origin
    let next = blobby.position() + Vec3::X;
    assert!(blobby.move_to(&volume, next).is_none());
}

#[test]
fn test_new_request_replaces_path_mid_walk() {
    let volume = flat_volume(5);
    let mut blobby = spawn(&volume, 10);

    blobby
        .move_to(&volume, Vec3::new(50.5, 5.0, 32.5))
        .expect("reachable destination");
    for frame in 0..20 {
        blobby.tick(&volume, 1.0 / 60.0, frame as f32 / 60.0);
    }

    let second = blobby
        .move_to(&volume, Vec3::new(32.5, 5.0, 20.5))
        .expect("reachable destination");
    let path = blobby.follower().path().expect("following");
    assert_eq!(path.step(), 0.0);
    assert_eq!(path.destination(), second);
    assert_eq!(path.positions()[0], blobby.position());
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn test_feet_follow_the_walk() {
    let volume = flat_volume(5);
    let config = RigConfig {
        limbs: 4,
        ..Default::default()
    };
    let mut blobby = Blobby::new(config, None, &volume, 11).expect("valid config");
    blobby
        .move_to(&volume, Vec3::new(55.5, 5.0, 32.5))
        .expect("reachable destination");

    let mut time = 0.0;
    walk_until_idle(&mut blobby, &volume, &mut time);
    // Let the damping settle
    for _ in 0..600 {
        blobby.tick(&volume, 1.0 / 60.0, time);
        time += 1.0 / 60.0;
    }

    let config = blobby.config().clone();
    let root = blobby.position();
    for (i, foot) in blobby.rig().feet().iter().enumerate() {
        assert!(blobby.rig().target(i).distance(root) <= config.retarget_distance);
        assert!(foot.position.distance(blobby.rig().target(i)) < 0.01);
    }
}

#[test]
fn test_pose_stays_finite() {
    let volume = flat_volume(5);
    let mut blobby = spawn(&volume, 12);
    blobby
        .move_to(&volume, Vec3::new(20.5, 5.0, 45.5))
        .expect("reachable destination");

    for frame in 0..300 {
        blobby.tick(&volume, 1.0 / 30.0, frame as f32 / 30.0);
        assert_eq!(blobby.entities().len(), 30);
        for entity in blobby.entities() {
            assert!(entity.position.is_finite());
            assert!(entity.scale.is_finite());
            assert!(entity.rotation.is_finite());
        }
    }
}

#[test]
fn test_same_seed_same_walk() {
    let volume = flat_volume(5);
    let mut a = spawn(&volume, 13);
    let mut b = spawn(&volume, 13);

    for blobby in [&mut a, &mut b] {
        blobby
            .move_to(&volume, Vec3::new(44.5, 5.0, 40.5))
            .expect("reachable destination");
        for frame in 0..120 {
            blobby.tick(&volume, 1.0 / 60.0, frame as f32 / 60.0);
        }
    }

    assert_eq!(a.entities(), b.entities());
}

#[test]
fn test_volume_reports_dimensions() {
    let volume = flat_volume(5);
    assert_eq!(TerrainAccess::dimensions(&volume), glam::UVec3::new(64, 32, 64));
}
