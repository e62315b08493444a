use blobby_core::world::Volume;
use glam::Vec3;

/// Side length of the ocean plane
pub const OCEAN_SIZE: f32 = 1000.0;

/// Horizontal water plane at sea level, centered on the terrain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ocean {
    pub position: Vec3,
}

impl Ocean {
    pub fn new(volume: &Volume) -> Self {
        Self {
            position: volume.center(),
        }
    }

    pub fn level(&self) -> f32 {
        self.position.y
    }

    /// Whether `point` lies inside the plane's footprint and below its surface
    pub fn is_submerged(&self, point: Vec3) -> bool {
        let half = OCEAN_SIZE * 0.5;
        point.y < self.level()
            && (point.x - self.position.x).abs() <= half
            && (point.z - self.position.z).abs() <= half
    }
}
