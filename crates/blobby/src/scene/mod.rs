//! Scene - terrain, creature and the props around them

mod indicator;
mod ocean;

pub use indicator::Indicator;
pub use ocean::{OCEAN_SIZE, Ocean};

use anyhow::{Context, Result};
use blobby_core::creature::{Blobby, RigConfig};
use blobby_core::world::{TerrainGenerator, Volume, VoxelHit};
use glam::Vec3;

use crate::clock::FrameTime;
use crate::config::AppConfig;

/// Longest pointer ray considered when picking terrain
pub const MAX_PICK_DISTANCE: f32 = 1000.0;

pub struct Scene {
    pub volume: Volume,
    pub blobby: Blobby,
    pub indicator: Indicator,
    pub ocean: Ocean,
}

impl Scene {
    /// Generate terrain and spawn the creature from `config`
    pub fn new(config: &AppConfig) -> Result<Self> {
        let generator =
            TerrainGenerator::from_config(config.world.seed, config.world.generation.clone());
        let volume = generator
            .generate()
            .context("Failed to generate terrain")?;
        Self::from_volume(volume, config.creature.clone(), config.world.seed)
    }

    /// Spawn the creature on an existing volume
    pub fn from_volume(volume: Volume, rig: RigConfig, seed: u64) -> Result<Self> {
        let blobby = Blobby::new(rig, None, &volume, seed).context("Failed to spawn creature")?;
        let indicator = Indicator::new(&volume);
        let ocean = Ocean::new(&volume);
        Ok(Self {
            volume,
            blobby,
            indicator,
            ocean,
        })
    }

    /// First terrain voxel under a pointer ray
    pub fn pick(&self, origin: Vec3, direction: Vec3) -> Option<VoxelHit> {
        self.volume.raycast(origin, direction, MAX_PICK_DISTANCE)
    }

    /// Send the creature towards `destination`.
    /// The indicator only moves when the request is accepted.
    pub fn request_move(&mut self, destination: Vec3) -> Option<Vec3> {
        let target = self.blobby.move_to(&self.volume, destination)?;
        self.indicator.place(target);
        Some(target)
    }

    pub fn tick(&mut self, frame: FrameTime) {
        self.blobby.tick(&self.volume, frame.delta, frame.time);
    }
}

/// 48x24x48 scene with a flat floor whose surface is at y = 4
#[cfg(test)]
pub(crate) fn flat_scene() -> Scene {
    use blobby_core::world::voxel;

    let mut volume = Volume::new(48, 24, 48).expect("valid dimensions");
    for x in 0..48 {
        for z in 0..48 {
            volume.fill_column(x, z, 4, voxel::SOIL);
        }
    }
    Scene::from_volume(volume, RigConfig::default(), 3).expect("valid scene")
}
