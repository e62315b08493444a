//! Terrain access trait for creature-terrain interaction
//!
//! The creature never owns or inspects voxel storage. Everything it needs
//! from the world goes through this trait, so any voxel backend can drive it.

use glam::{IVec3, UVec3};

/// Read-only terrain queries used for spawning, foot placement and pathing
pub trait TerrainAccess {
    /// Size of the volume in voxels (width, height, depth)
    fn dimensions(&self) -> UVec3;

    /// Highest walkable surface at or below `voxel` with `clearance` empty
    /// voxels above it. Returns the y of the first empty voxel above the
    /// surface, or None if the column has no such surface.
    fn ground(&self, voxel: IVec3, clearance: i32) -> Option<i32>;

    /// Walkable corridor from `from` to `to` respecting `clearance`.
    /// The corridor includes both endpoints; empty when unreachable.
    fn find_path(&self, from: IVec3, to: IVec3, clearance: i32) -> Vec<IVec3>;
}

/// Flatten a corridor into `[x0, y0, z0, x1, y1, z1, ...]`
pub fn flatten_corridor(corridor: &[IVec3]) -> Vec<i32> {
    corridor.iter().flat_map(|voxel| voxel.to_array()).collect()
}
