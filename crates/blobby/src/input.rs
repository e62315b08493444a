//! Pointer input

use blobby_core::world::VoxelHit;
use glam::Vec3;

/// Request to walk to a point on the terrain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    pub destination: Vec3,
}

impl MoveRequest {
    pub fn new(destination: Vec3) -> Self {
        Self { destination }
    }

    /// Request targeting the air just outside a picked voxel face
    pub fn from_hit(hit: &VoxelHit) -> Self {
        Self::new(hit.surface_point())
    }
}

/// Holds the pending move request between frames.
///
/// Only the latest request survives; the frame loop drains it once per frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Option<MoveRequest>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: MoveRequest) {
        if self.pending.replace(request).is_some() {
            log::trace!("Dropped superseded move request");
        }
    }

    pub fn take(&mut self) -> Option<MoveRequest> {
        self.pending.take()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
