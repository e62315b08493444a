//! Blobby host
//!
//! Generates voxel terrain, spawns the creature on it and drives the frame
//! loop: pointer picks become move requests, accepted moves place the
//! indicator, and every frame ticks the creature.

pub mod clock;
pub mod config;
pub mod input;
pub mod render;
pub mod scene;
pub mod simulation;

// Re-export the core crates so downstream code only needs this one
pub use blobby_core::{creature, world};

pub use clock::{FrameClock, FrameTime};
pub use config::AppConfig;
pub use input::{InputQueue, MoveRequest};
pub use scene::Scene;
pub use simulation::{RunStats, Simulation};
