use blobby_core::world::Volume;
use glam::Vec3;

/// Marker showing where the creature was last sent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicator {
    pub position: Vec3,
}

impl Indicator {
    /// Parked one unit under the center of `volume`, out of sight until the
    /// first accepted move
    pub fn new(volume: &Volume) -> Self {
        Self {
            position: volume.center() - Vec3::Y,
        }
    }

    pub fn place(&mut self, target: Vec3) {
        self.position = target;
    }

    pub fn is_visible(&self) -> bool {
        self.position.y >= 0.0
    }
}
