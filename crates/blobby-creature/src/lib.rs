//! Procedurally rigged creature for Blobby
//!
//! This crate implements:
//! - The rig model: head, eyes, feet and two-segment legs as render entities
//! - Foot placement with minimum spacing between feet
//! - A limb solver that poses leg segments from foot and head positions
//! - A path follower that walks the creature along terrain corridors
//! - The per-frame orchestrator tying everything together
//!
//! Terrain is reached only through [`TerrainAccess`], so the creature can be
//! driven by any voxel backend.

pub mod config;
pub mod creature;
pub mod feet;
pub mod limb;
pub mod path;
pub mod rig;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types for convenience
pub use config::{RigConfig, RigError};
pub use creature::Blobby;
pub use limb::{LimbPose, Segment};
pub use path::{FollowerState, Path, PathError, PathFollower};
pub use rig::Rig;
pub use traits::{TerrainAccess, flatten_corridor};
pub use types::{BlendOperation, Color, Entity, Palette, Shape};
