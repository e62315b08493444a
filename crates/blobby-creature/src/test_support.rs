//! Scripted terrain used by unit tests

use glam::{IVec3, UVec3};

use crate::traits::TerrainAccess;

/// Flat floor whose first empty layer is `surface`, with a scripted corridor
pub(crate) struct FlatTerrain {
    pub dimensions: UVec3,
    pub surface: Option<i32>,
    pub corridor: Vec<IVec3>,
}

impl FlatTerrain {
    pub fn new(surface: i32) -> Self {
        Self {
            dimensions: UVec3::new(64, 32, 64),
            surface: Some(surface),
            corridor: Vec::new(),
        }
    }

    /// Terrain with no walkable surface anywhere
    pub fn void() -> Self {
        Self {
            surface: None,
            ..Self::new(0)
        }
    }

    pub fn with_corridor(mut self, corridor: Vec<IVec3>) -> Self {
        self.corridor = corridor;
        self
    }

    fn contains_column(&self, voxel: IVec3) -> bool {
        voxel.x >= 0
            && voxel.z >= 0
            && voxel.x < self.dimensions.x as i32
            && voxel.z < self.dimensions.z as i32
    }
}

impl TerrainAccess for FlatTerrain {
    fn dimensions(&self) -> UVec3 {
        self.dimensions
    }

    fn ground(&self, voxel: IVec3, _clearance: i32) -> Option<i32> {
        if !self.contains_column(voxel) {
            return None;
        }
        self.surface.filter(|&surface| voxel.y >= surface)
    }

    fn find_path(&self, _from: IVec3, _to: IVec3, _clearance: i32) -> Vec<IVec3> {
        self.corridor.clone()
    }
}
