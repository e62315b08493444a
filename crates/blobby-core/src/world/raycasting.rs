//! Voxel raycasting for pointer picking

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use super::volume::Volume;

/// First solid voxel hit by a ray
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoxelHit {
    /// The solid voxel
    pub voxel: IVec3,
    /// Where the ray entered the voxel
    pub point: Vec3,
    /// Face normal of the entered side; zero when the ray starts inside
    pub normal: IVec3,
    pub distance: f32,
}

impl VoxelHit {
    /// Point just outside the hit face, used as a walk destination
    pub fn surface_point(&self) -> Vec3 {
        self.point + self.normal.as_vec3() * 0.5
    }
}

/// Walk the voxel grid along a ray (Amanatides & Woo DDA).
///
/// Voxels outside the volume count as air.
pub fn raycast(
    volume: &Volume,
    origin: Vec3,
    direction: Vec3,
    max_distance: f32,
) -> Option<VoxelHit> {
    let direction = direction.try_normalize()?;
    let mut voxel = origin.floor().as_ivec3();
    let step = direction.signum().as_ivec3();

    let mut t_max = Vec3::splat(f32::INFINITY);
    let mut t_delta = Vec3::splat(f32::INFINITY);
    for axis in 0..3 {
        if direction[axis] != 0.0 {
            let boundary = voxel[axis] as f32 + if step[axis] > 0 { 1.0 } else { 0.0 };
            t_max[axis] = (boundary - origin[axis]) / direction[axis];
            t_delta[axis] = (1.0 / direction[axis]).abs();
        }
    }

    let mut distance = 0.0;
    let mut normal = IVec3::ZERO;
    while distance <= max_distance {
        if volume.is_solid(voxel) {
            return Some(VoxelHit {
                voxel,
                point: origin + direction * distance,
                normal,
                distance,
            });
        }

        let axis = if t_max.x < t_max.y {
            if t_max.x < t_max.z { 0 } else { 2 }
        } else if t_max.y < t_max.z {
            1
        } else {
            2
        };

        distance = t_max[axis];
        t_max[axis] += t_delta[axis];
        voxel[axis] += step[axis];
        normal = IVec3::ZERO;
        normal[axis] = -step[axis];
    }

    None
}
