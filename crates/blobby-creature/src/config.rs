//! Rig tuning parameters

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a rig
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RigError {
    #[error("a rig needs at least one limb")]
    NoLimbs,
    #[error("retargeting needs at least one sampling attempt")]
    NoRetargetAttempts,
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

/// Tuning for rig construction and animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Number of feet (and of leg pairs)
    pub limbs: usize,
    /// Empty voxels required above a surface for it to be walkable
    pub clearance: i32,
    /// Minimum distance between the targets of two feet
    pub foot_spacing: f32,
    /// Radius of the random offsets sampled around the root for new targets
    pub step_radius: f32,
    /// Candidates sampled per retarget before giving up
    pub retarget_attempts: u32,
    /// A foot whose target is farther than this from the root gets retargeted
    pub retarget_distance: f32,
    /// Exponential damping rate of feet toward their targets
    pub foot_damping: f32,
    /// Path steps advanced per second
    pub path_speed: f32,
    /// Head scale at spawn, before the first tick starts pulsing it
    pub head_scale: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            limbs: 9,
            clearance: 4,
            foot_spacing: 4.0,
            step_radius: 5.0,
            retarget_attempts: 10,
            retarget_distance: 10.0,
            foot_damping: 4.0,
            path_speed: 8.0,
            head_scale: 2.0,
        }
    }
}

impl RigConfig {
    /// Check the config can drive a rig
    pub fn validate(&self) -> Result<(), RigError> {
        if self.limbs == 0 {
            return Err(RigError::NoLimbs);
        }
        if self.retarget_attempts == 0 {
            return Err(RigError::NoRetargetAttempts);
        }
        for (name, value) in [
            ("step_radius", self.step_radius),
            ("foot_damping", self.foot_damping),
            ("path_speed", self.path_speed),
            ("head_scale", self.head_scale),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(RigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}
