//! Path following
//!
//! A path is a list of positions plus a continuous progress index. The
//! follower either holds one active path or none; a new path always replaces
//! the current one.

use glam::{IVec3, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::TerrainAccess;

/// Rejected path data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("a path needs at least 2 positions, got {0}")]
    TooShort(usize),
    #[error("step {step} is outside [0, {last}]")]
    StepOutOfRange { step: f32, last: f32 },
}

/// Interpolated walk along a list of positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPath")]
pub struct Path {
    positions: Vec<Vec3>,
    step: f32,
}

#[derive(Deserialize)]
struct RawPath {
    positions: Vec<Vec3>,
    step: f32,
}

impl TryFrom<RawPath> for Path {
    type Error = PathError;

    fn try_from(raw: RawPath) -> Result<Self, Self::Error> {
        let count = raw.positions.len();
        let mut path = Path::new(raw.positions).ok_or(PathError::TooShort(count))?;
        let last = path.last_step();
        if !(0.0..=last).contains(&raw.step) {
            return Err(PathError::StepOutOfRange {
                step: raw.step,
                last,
            });
        }
        path.step = raw.step;
        Ok(path)
    }
}

impl Path {
    /// Path over `positions`, starting at the first one.
    /// Returns None with fewer than two positions.
    pub fn new(positions: Vec<Vec3>) -> Option<Self> {
        if positions.len() < 2 {
            return None;
        }
        Some(Self {
            positions,
            step: 0.0,
        })
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Progress index; `floor(step)` is the current segment
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Step value at which the path is complete
    pub fn last_step(&self) -> f32 {
        (self.positions.len() - 1) as f32
    }

    /// Final position of the path
    pub fn destination(&self) -> Vec3 {
        self.positions[self.positions.len() - 1]
    }

    pub fn is_complete(&self) -> bool {
        self.step >= self.last_step()
    }

    /// Interpolated position at the current step
    pub fn position(&self) -> Vec3 {
        if self.is_complete() {
            return self.destination();
        }
        let segment = (self.step.floor() as usize).min(self.positions.len() - 2);
        let t = self.step - segment as f32;
        self.positions[segment].lerp(self.positions[segment + 1], t)
    }

    /// Move `delta * speed` steps forward, clamped to the end of the path
    pub fn advance(&mut self, delta: f32, speed: f32) -> Vec3 {
        self.step = (self.step + delta.max(0.0) * speed).min(self.last_step());
        self.position()
    }
}

/// Follower state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowerState {
    /// No active path
    Idle,
    /// Walking an active path
    Following,
}

/// Holds at most one active path and advances it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathFollower {
    path: Option<Path>,
}

impl PathFollower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FollowerState {
        if self.path.is_some() {
            FollowerState::Following
        } else {
            FollowerState::Idle
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Start following `path`, dropping any path in flight.
    /// Returns the destination of the new path.
    pub fn follow(&mut self, path: Path) -> Vec3 {
        let destination = path.destination();
        if self.path.is_some() {
            log::debug!("Replacing active path");
        }
        self.path = Some(path);
        destination
    }

    /// Drop the active path, if any
    pub fn cancel(&mut self) {
        self.path = None;
    }

    /// Advance the active path.
    ///
    /// Returns the new root position while following, None when idle. The
    /// path is dropped on the tick it reaches its end.
    pub fn update(&mut self, delta: f32, speed: f32) -> Option<Vec3> {
        let path = self.path.as_mut()?;
        let position = path.advance(delta, speed);
        if path.is_complete() {
            log::debug!(
                "Arrived at ({:.1}, {:.1}, {:.1})",
                position.x,
                position.y,
                position.z
            );
            self.path = None;
        }
        Some(position)
    }
}

/// Plan a path from `root` to the ground under `destination`.
///
/// Returns None when the destination column has no ground, or when the
/// corridor holds fewer than two waypoints past its origin (already there,
/// or unreachable). Intermediate waypoints are jittered inside their voxel;
/// the last one sits at its voxel center.
pub fn plan_path(
    root: Vec3,
    destination: Vec3,
    terrain: &impl TerrainAccess,
    clearance: i32,
    rng: &mut impl Rng,
) -> Option<Path> {
    let from: IVec3 = root.floor().as_ivec3();
    let mut to: IVec3 = destination.floor().as_ivec3();
    to.y = to.y.min(terrain.dimensions().y as i32 - 1);
    to.y = terrain.ground(to, clearance).filter(|&height| height > 0)?;

    let corridor = terrain.find_path(from, to, clearance);
    if corridor.len() < 3 {
        log::debug!(
            "No usable corridor to ({}, {}, {}): {} waypoints",
            to.x,
            to.y,
            to.z,
            corridor.len()
        );
        return None;
    }

    let last = corridor.len() - 1;
    let mut positions = Vec::with_capacity(corridor.len());
    positions.push(root);
    for (index, voxel) in corridor.iter().enumerate().skip(1) {
        let (offset_x, offset_z) = if index == last {
            (0.5, 0.5)
        } else {
            (
                0.25 + rng.random::<f32>() * 0.5,
                0.25 + rng.random::<f32>() * 0.5,
            )
        };
        positions.push(Vec3::new(
            voxel.x as f32 + offset_x,
            voxel.y as f32,
            voxel.z as f32 + offset_z,
        ));
    }

    Path::new(positions)
}
