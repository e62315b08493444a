//! Heightmap terrain generation

use fastnoise_lite::FastNoiseLite;
use glam::IVec3;

use super::volume::{Volume, VolumeError, voxel};
use super::worldgen_config::WorldGenConfig;

/// Fills a volume with noise-driven columns: stone capped by a soil layer
pub struct TerrainGenerator {
    pub seed: u64,
    config: WorldGenConfig,
    height_noise: FastNoiseLite,
}

impl TerrainGenerator {
    pub fn new(seed: u64) -> Self {
        Self::from_config(seed, WorldGenConfig::default())
    }

    pub fn from_config(seed: u64, config: WorldGenConfig) -> Self {
        let height_noise = config.height_noise.to_fastnoise(seed);
        Self {
            seed,
            config,
            height_noise,
        }
    }

    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    /// Column height at (x, z), clamped to [1, volume height - 1]
    pub fn column_height(&self, x: i32, z: i32) -> i32 {
        // Noise is in [-1, 1]
        let noise = self.height_noise.get_noise_2d(x as f32, z as f32);
        let height = self.config.base_height as f32 + (noise * 0.5 + 0.5) * self.config.amplitude;
        let top = (self.config.height as i32 - 1).max(1);
        (height.round() as i32).clamp(1, top)
    }

    /// Build a new volume sized by the config and fill it.
    /// The volume must be at least two voxels high to hold ground and air.
    pub fn generate(&self) -> Result<Volume, VolumeError> {
        if self.config.height < 2 {
            return Err(VolumeError::TooShallow {
                height: self.config.height,
            });
        }
        let mut volume = Volume::new(self.config.width, self.config.height, self.config.depth)?;
        self.fill(&mut volume);
        log::info!(
            "Generated {}x{}x{} terrain (seed {}, {} solid voxels)",
            self.config.width,
            self.config.height,
            self.config.depth,
            self.seed,
            volume.solid_count()
        );
        Ok(volume)
    }

    /// Fill every column of an existing volume
    pub fn fill(&self, volume: &mut Volume) {
        for z in 0..volume.depth() as i32 {
            for x in 0..volume.width() as i32 {
                let top = self.column_height(x, z);
                let soil_start = (top - self.config.soil_depth).max(0);
                volume.fill_column(x, z, soil_start, voxel::STONE);
                for y in soil_start..top {
                    volume.set(IVec3::new(x, y, z), voxel::SOIL);
                }
            }
        }
    }
}
