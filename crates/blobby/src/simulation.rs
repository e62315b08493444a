//! Frame loop
//!
//! Each frame drains the pending move request, hands it to the creature,
//! then ticks the creature. Headless runs generate their own requests by
//! picking random terrain from above at a fixed interval.

use anyhow::Result;
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::clock::{FrameClock, FrameTime};
use crate::config::AppConfig;
use crate::input::{InputQueue, MoveRequest};
use crate::render::{FrameSnapshot, RenderResources, TerrainAtlas};
use crate::scene::Scene;

/// Counters over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub accepted: u32,
    pub rejected: u32,
}

pub struct Simulation {
    scene: Scene,
    resources: RenderResources,
    clock: FrameClock,
    input: InputQueue,
    rng: Xoshiro256StarStar,
    move_interval: f32,
    next_move_at: f32,
    stats: RunStats,
}

impl Simulation {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let scene = Scene::new(config)?;
        let clock = if config.sim.realtime {
            FrameClock::realtime(config.sim.max_delta)
        } else {
            FrameClock::fixed(1.0 / config.sim.frame_rate, config.sim.max_delta)
        };
        Ok(Self::from_scene(
            scene,
            clock,
            config.sim.move_interval,
            config.world.seed,
        ))
    }

    pub fn from_scene(scene: Scene, clock: FrameClock, move_interval: f32, seed: u64) -> Self {
        // Independent of the creature's stream
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
        let resources = RenderResources::new(TerrainAtlas::random(&mut rng));
        Self {
            scene,
            resources,
            clock,
            input: InputQueue::new(),
            rng,
            move_interval,
            next_move_at: 0.0,
            stats: RunStats::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn resources(&self) -> &RenderResources {
        &self.resources
    }

    pub fn input_mut(&mut self) -> &mut InputQueue {
        &mut self.input
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Restart the wall clock, e.g. when the window becomes visible again
    pub fn resume(&mut self) {
        self.clock.start();
    }

    /// Run one frame
    pub fn step(&mut self) -> FrameTime {
        let frame = self.clock.tick();

        if let Some(request) = self.input.take() {
            match self.scene.request_move(request.destination) {
                Some(target) => {
                    self.stats.accepted += 1;
                    log::debug!(
                        "Walking to ({:.1}, {:.1}, {:.1})",
                        target.x,
                        target.y,
                        target.z
                    );
                }
                None => {
                    self.stats.rejected += 1;
                    log::debug!("No path to {:?}", request.destination);
                }
            }
        }

        self.scene.tick(frame);
        self.stats.frames += 1;
        frame
    }

    /// Run one frame, queueing a random move request first when one is due
    pub fn run_frame(&mut self) -> FrameTime {
        if self.move_interval > 0.0 && self.clock.time() >= self.next_move_at {
            self.next_move_at = self.clock.time() + self.move_interval;
            if let Some(request) = self.random_request() {
                self.input.push(request);
            }
        }
        self.step()
    }

    /// Run `frames` frames back to back
    pub fn run(&mut self, frames: u32) -> RunStats {
        for _ in 0..frames {
            self.run_frame();
        }
        self.stats
    }

    /// Pick a random column from above, like a pointer click on the terrain
    fn random_request(&mut self) -> Option<MoveRequest> {
        let volume = &self.scene.volume;
        let origin = Vec3::new(
            self.rng.random_range(0.0..volume.width() as f32),
            volume.height() as f32 + 16.0,
            self.rng.random_range(0.0..volume.depth() as f32),
        );
        let hit = self.scene.pick(origin, Vec3::NEG_Y)?;
        Some(MoveRequest::from_hit(&hit))
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(
            &self.scene,
            &self.resources,
            self.stats.frames,
            self.clock.time(),
        )
    }
}
