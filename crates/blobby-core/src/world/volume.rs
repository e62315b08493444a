//! Dense voxel volume

use blobby_creature::TerrainAccess;
use glam::{IVec3, UVec3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::pathfinding;
use super::raycasting::{self, VoxelHit};

/// Voxel values
pub mod voxel {
    pub const AIR: u8 = 0;
    pub const STONE: u8 = 1;
    pub const SOIL: u8 = 2;
}

/// Errors raised while building a volume
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VolumeError {
    #[error("volume dimensions must be non-zero, got {width}x{height}x{depth}")]
    EmptyDimension { width: u32, height: u32, depth: u32 },
    #[error("volume of {width}x{height}x{depth} voxels does not fit in memory")]
    TooLarge { width: u32, height: u32, depth: u32 },
    #[error("expected {expected} voxels, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("terrain needs a height of at least 2 voxels, got {height}")]
    TooShallow { height: u32 },
}

/// Box of voxels indexed as `x + z * width + y * width * depth`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    width: u32,
    height: u32,
    depth: u32,
    voxels: Vec<u8>,
}

impl Volume {
    /// Create an empty (all air) volume
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self, VolumeError> {
        let len = Self::checked_len(width, height, depth)?;
        Ok(Self {
            width,
            height,
            depth,
            voxels: vec![voxel::AIR; len],
        })
    }

    /// Wrap existing voxel data laid out in volume order
    pub fn from_voxels(
        width: u32,
        height: u32,
        depth: u32,
        voxels: Vec<u8>,
    ) -> Result<Self, VolumeError> {
        let expected = Self::checked_len(width, height, depth)?;
        if voxels.len() != expected {
            return Err(VolumeError::LengthMismatch {
                expected,
                actual: voxels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            voxels,
        })
    }

    fn checked_len(width: u32, height: u32, depth: u32) -> Result<usize, VolumeError> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(VolumeError::EmptyDimension {
                width,
                height,
                depth,
            });
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(depth as usize))
            .filter(|&n| n <= i32::MAX as usize)
            .ok_or(VolumeError::TooLarge {
                width,
                height,
                depth,
            })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Horizontal center of the volume, in world units
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.width as f32 * 0.5, 0.0, self.depth as f32 * 0.5)
    }

    pub fn contains(&self, position: IVec3) -> bool {
        self.contains_column(position.x, position.z)
            && position.y >= 0
            && position.y < self.height as i32
    }

    pub fn contains_column(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && x < self.width as i32 && z < self.depth as i32
    }

    fn index(&self, position: IVec3) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let (w, d) = (self.width as usize, self.depth as usize);
        Some(position.x as usize + position.z as usize * w + position.y as usize * w * d)
    }

    /// Voxel at `position`, None outside the volume
    pub fn get(&self, position: IVec3) -> Option<u8> {
        self.index(position).map(|i| self.voxels[i])
    }

    /// Set the voxel at `position`; returns false outside the volume
    pub fn set(&mut self, position: IVec3, value: u8) -> bool {
        match self.index(position) {
            Some(i) => {
                self.voxels[i] = value;
                true
            }
            None => false,
        }
    }

    /// Whether `position` holds a non-air voxel. Outside the volume is air.
    pub fn is_solid(&self, position: IVec3) -> bool {
        self.get(position).is_some_and(|v| v != voxel::AIR)
    }

    /// Fill the column at (x, z) with `value` from y = 0 up to (not including) `top`
    pub fn fill_column(&mut self, x: i32, z: i32, top: i32, value: u8) {
        for y in 0..top.min(self.height as i32) {
            self.set(IVec3::new(x, y, z), value);
        }
    }

    /// Air voxel resting on a solid one with `clearance` air voxels from it upward
    pub fn is_walkable(&self, position: IVec3, clearance: i32) -> bool {
        if position.y < 1 || !self.contains_column(position.x, position.z) {
            return false;
        }
        self.is_solid(position - IVec3::Y)
            && (0..clearance.max(1)).all(|dy| !self.is_solid(position + IVec3::Y * dy))
    }

    /// Highest walkable voxel at or below `position` in its column
    pub fn ground(&self, position: IVec3, clearance: i32) -> Option<i32> {
        if !self.contains_column(position.x, position.z) {
            return None;
        }
        let top = position.y.min(self.height as i32 - 1);
        (1..=top)
            .rev()
            .find(|&y| self.is_walkable(IVec3::new(position.x, y, position.z), clearance))
    }

    /// Walkable corridor between two voxels, both endpoints included
    pub fn find_path(&self, from: IVec3, to: IVec3, clearance: i32) -> Vec<IVec3> {
        pathfinding::find_path(self, from, to, clearance, pathfinding::MAX_EXPANSIONS)
    }

    /// First solid voxel along a ray
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<VoxelHit> {
        raycasting::raycast(self, origin, direction, max_distance)
    }

    /// Number of solid voxels
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|&&v| v != voxel::AIR).count()
    }
}

impl TerrainAccess for Volume {
    fn dimensions(&self) -> UVec3 {
        UVec3::new(self.width, self.height, self.depth)
    }

    fn ground(&self, voxel: IVec3, clearance: i32) -> Option<i32> {
        Volume::ground(self, voxel, clearance)
    }

    fn find_path(&self, from: IVec3, to: IVec3, clearance: i32) -> Vec<IVec3> {
        Volume::find_path(self, from, to, clearance)
    }
}
