//! Main creature entity
//!
//! Combines the rig, foot placement, limb solver and path follower, and
//! drives them once per frame.

use std::f32::consts::PI;

use glam::Vec3;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::config::{RigConfig, RigError};
use crate::feet;
use crate::limb;
use crate::path::{self, FollowerState, Path, PathFollower};
use crate::rig::{self, Rig};
use crate::traits::TerrainAccess;
use crate::types::{Entity, Palette};

// Breathing: head scale oscillates around its base
const HEAD_BASE_SCALE: f32 = 2.5;
const HEAD_PULSE: f32 = 0.25;
const HEAD_PULSE_RATE: f32 = 4.0;
/// Gap between the root and the bottom of the head
const HEAD_CLEARANCE: f32 = 2.0;

const EYE_HEIGHT: f32 = 1.5;

// Per-leg thickness wobble of the upper segment
const LEG_BASE_THICKNESS: f32 = 0.3;
const LEG_PULSE: f32 = 0.2;
const LEG_PULSE_RATE: f32 = 2.0;

/// A walking creature
pub struct Blobby {
    config: RigConfig,
    rig: Rig,
    follower: PathFollower,
    rng: Xoshiro256StarStar,
}

impl Blobby {
    /// Spawn a creature at the center of `terrain`.
    ///
    /// Without a palette every color is drawn from the seeded RNG. All feet
    /// are retargeted once so they start on valid ground.
    pub fn new(
        config: RigConfig,
        palette: Option<Palette>,
        terrain: &impl TerrainAccess,
        seed: u64,
    ) -> Result<Self, RigError> {
        config.validate()?;

        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let palette = palette.unwrap_or_else(|| Palette::random(&mut rng));
        let position = rig::spawn_position(terrain, config.clearance);
        let mut rig = Rig::new(config.limbs, &palette, position, config.head_scale, &mut rng);

        let placed = (0..rig.limbs())
            .filter(|&index| feet::retarget(&mut rig, index, terrain, &config, &mut rng))
            .count();

        log::info!(
            "Spawned creature with {} limbs at ({:.1}, {:.1}, {:.1}), {}/{} feet placed",
            config.limbs,
            position.x,
            position.y,
            position.z,
            placed,
            config.limbs
        );

        Ok(Self {
            config,
            rig,
            follower: PathFollower::new(),
            rng,
        })
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    /// Root position of the creature
    pub fn position(&self) -> Vec3 {
        self.rig.position
    }

    /// Entities in renderer order; length and order never change
    pub fn entities(&self) -> &[Entity] {
        self.rig.entities()
    }

    pub fn follower(&self) -> &PathFollower {
        &self.follower
    }

    pub fn state(&self) -> FollowerState {
        self.follower.state()
    }

    /// Plan a path to `destination` without touching the active one
    pub fn plan_path(&mut self, terrain: &impl TerrainAccess, destination: Vec3) -> Option<Path> {
        path::plan_path(
            self.rig.position,
            destination,
            terrain,
            self.config.clearance,
            &mut self.rng,
        )
    }

    /// Start walking `path`, replacing any active one.
    ///
    /// Paths resolved off-frame can be attached here once they arrive.
    pub fn follow(&mut self, path: Path) -> Vec3 {
        self.follower.follow(path)
    }

    /// Walk to the ground under `destination`.
    ///
    /// Returns the final point of the new path, or None when there is no
    /// ground there or no usable corridor. A failed request leaves the
    /// active path untouched.
    pub fn move_to(&mut self, terrain: &impl TerrainAccess, destination: Vec3) -> Option<Vec3> {
        let path = self.plan_path(terrain, destination)?;
        Some(self.follow(path))
    }

    /// Advance one frame.
    ///
    /// `delta` is the frame time in seconds, already clamped by the caller;
    /// `time` is the absolute elapsed time driving the idle animation.
    pub fn tick(&mut self, terrain: &impl TerrainAccess, delta: f32, time: f32) {
        if let Some(position) = self.follower.update(delta, self.config.path_speed) {
            self.rig.position = position;
        }
        let root = self.rig.position;

        let head_scale = HEAD_BASE_SCALE + (time * HEAD_PULSE_RATE).sin() * HEAD_PULSE;
        let head_position = root + Vec3::Y * (HEAD_CLEARANCE + head_scale);
        {
            let head = self.rig.head_mut();
            head.scale = Vec3::splat(head_scale);
            head.position = head_position;
        }

        for (index, eye) in self.rig.eyes_mut().iter_mut().enumerate() {
            let angle = time + index as f32 * PI;
            eye.scale = Vec3::splat(head_scale * 0.5);
            eye.position = head_position + Vec3::new(angle.sin(), EYE_HEIGHT, angle.cos());
        }

        let follow = 1.0 - (-self.config.foot_damping * delta).exp();
        for index in 0..self.rig.limbs() {
            if feet::needs_retarget(self.rig.target(index), root, &self.config) {
                feet::retarget(&mut self.rig, index, terrain, &self.config, &mut self.rng);
            }
            let target = self.rig.target(index);

            let (foot, bottom, top) = self.rig.limb_mut(index);
            foot.position = foot.position.lerp(target, follow);
            top.scale.x =
                LEG_BASE_THICKNESS + (time * LEG_PULSE_RATE + index as f32).sin() * LEG_PULSE;

            let pose = limb::solve(foot.position, head_position);
            pose.lower.apply_to(bottom);
            pose.upper.apply_to(top);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FlatTerrain;
    use glam::IVec3;

    fn spawn(terrain: &FlatTerrain) -> Blobby {
        Blobby::new(RigConfig::default(), None, terrain, 42).expect("valid config")
    }

    #[test]
    fn test_spawn_layout_and_ground() {
        let terrain = FlatTerrain::new(6);
        let blobby = spawn(&terrain);

        assert_eq!(blobby.entities().len(), 3 + 9 * 3);
        assert_eq!(blobby.position(), Vec3::new(32.5, 6.0, 32.5));
        assert_eq!(blobby.state(), FollowerState::Idle);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let terrain = FlatTerrain::new(6);
        let config = RigConfig {
            limbs: 0,
            ..Default::default()
        };
        assert!(matches!(
            Blobby::new(config, None, &terrain, 1),
            Err(RigError::NoLimbs)
        ));
    }

    #[test]
    fn test_same_seed_same_creature() {
        let terrain = FlatTerrain::new(6);
        let a = spawn(&terrain);
        let b = spawn(&terrain);
        assert_eq!(a.entities(), b.entities());
        assert_eq!(a.rig().targets(), b.rig().targets());
    }

    #[test]
    fn test_tick_poses_head_and_eyes() {
        let terrain = FlatTerrain::new(6);
        let mut blobby = spawn(&terrain);
        blobby.tick(&terrain, 0.016, 0.0);

        let head = blobby.rig().head();
        assert_eq!(head.scale, Vec3::splat(2.5));
        assert_eq!(head.position, blobby.position() + Vec3::Y * 4.5);

        let eyes = blobby.rig().eyes();
        assert_eq!(eyes[0].scale, Vec3::splat(1.25));
        assert!(eyes[0].position.abs_diff_eq(head.position + Vec3::new(0.0, 1.5, 1.0), 1e-5));
        assert!(eyes[1].position.abs_diff_eq(head.position + Vec3::new(0.0, 1.5, -1.0), 1e-5));
    }

    #[test]
    fn test_tick_damps_feet_and_solves_legs() {
        let terrain = FlatTerrain::new(6);
        let mut blobby = spawn(&terrain);
        let before: Vec<Vec3> = blobby.rig().feet().iter().map(|foot| foot.position).collect();

        blobby.tick(&terrain, 0.1, 1.0);

        let follow = 1.0 - (-4.0_f32 * 0.1).exp();
        let rig = blobby.rig();
        let head = rig.head().position;
        for i in 0..rig.limbs() {
            let foot = rig.feet()[i].position;
            assert!(foot.abs_diff_eq(before[i].lerp(rig.target(i), follow), 1e-4));

            let knee = limb::knee(foot, head);
            assert!((rig.legs_bottom()[i].scale.y - foot.distance(knee)).abs() < 1e-4);
            assert!((rig.legs_top()[i].scale.y - knee.distance(head)).abs() < 1e-4);
            assert!(rig.legs_top()[i].scale.x > 0.0);
        }
    }

    #[test]
    fn test_move_to_returns_path_destination() {
        let corridor = vec![
            IVec3::new(32, 6, 32),
            IVec3::new(33, 6, 32),
            IVec3::new(34, 6, 33),
            IVec3::new(35, 6, 33),
        ];
        let terrain = FlatTerrain::new(6).with_corridor(corridor);
        let mut blobby = spawn(&terrain);

        let target = blobby
            .move_to(&terrain, Vec3::new(35.5, 6.5, 33.5))
            .expect("accepted move");
        let path = blobby.follower().path().expect("following");
        assert_eq!(target, path.destination());
        assert_eq!(target, Vec3::new(35.5, 6.0, 33.5));
        assert_eq!(path.positions().len(), 4);
        assert_eq!(blobby.state(), FollowerState::Following);
    }

    #[test]
    fn test_failed_move_creates_no_path() {
        let terrain = FlatTerrain::new(6);
        let mut blobby = spawn(&terrain);

        // Outside the terrain columns there is no ground
        assert!(blobby.move_to(&terrain, Vec3::new(-10.0, 5.0, 3.0)).is_none());
        assert_eq!(blobby.state(), FollowerState::Idle);

        // Ground exists, but the corridor is empty
        assert!(blobby.move_to(&terrain, Vec3::new(40.0, 10.0, 40.0)).is_none());
        assert!(blobby.follower().path().is_none());
    }

    #[test]
    fn test_walks_to_destination_then_idles() {
        let corridor = vec![
            IVec3::new(32, 6, 32),
            IVec3::new(33, 6, 32),
            IVec3::new(34, 6, 32),
        ];
        let terrain = FlatTerrain::new(6).with_corridor(corridor);
        let mut blobby = spawn(&terrain);
        let target = blobby
            .move_to(&terrain, Vec3::new(34.5, 6.0, 32.5))
            .expect("accepted move");

        let mut time = 0.0;
        let mut previous_step = 0.0;
        while blobby.state() == FollowerState::Following {
            blobby.tick(&terrain, 0.05, time);
            time += 0.05;
            if let Some(path) = blobby.follower().path() {
                assert!(path.step() >= previous_step);
                previous_step = path.step();
            }
            assert!(time < 10.0, "path never completed");
        }

        assert_eq!(blobby.position(), target);
        blobby.tick(&terrain, 0.05, time);
        assert_eq!(blobby.position(), target);
    }

    #[test]
    fn test_far_foot_is_retargeted() {
        let terrain = FlatTerrain::new(6);
        let config = RigConfig {
            limbs: 2,
            ..Default::default()
        };
        let mut blobby = Blobby::new(config, None, &terrain, 42).expect("valid config");
        let root = blobby.position();

        blobby.rig.set_target(0, root + Vec3::new(11.0, 0.0, 0.0));
        blobby.rig.set_target(1, root + Vec3::new(0.0, 0.0, 9.0));
        blobby.tick(&terrain, 0.016, 0.0);

        assert_ne!(blobby.rig().target(0), root + Vec3::new(11.0, 0.0, 0.0));
        assert_eq!(blobby.rig().target(1), root + Vec3::new(0.0, 0.0, 9.0));
    }
}
