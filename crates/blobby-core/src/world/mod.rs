//! Voxel world - storage, surface queries, pathfinding and generation

pub mod generation;
mod pathfinding;
mod raycasting;
mod volume;
pub mod worldgen_config;

pub use generation::TerrainGenerator;
pub use pathfinding::MAX_EXPANSIONS;
pub use raycasting::VoxelHit;
pub use volume::{Volume, VolumeError, voxel};
pub use worldgen_config::{FractalTypeConfig, NoiseLayerConfig, NoiseTypeConfig, WorldGenConfig};
