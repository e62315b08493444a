//! Two-segment limb solver
//!
//! Legs have no joints or bones. Each frame both segments are derived from
//! the foot and head positions alone: a control point is placed between them,
//! raised a little, and each segment is stretched between its two endpoints.

use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::Entity;

/// How far above the foot the knee control point is pulled
const KNEE_LIFT: f32 = 2.0;

/// Above this |cos| between a segment and world up, the basis uses +Z as up
const COLINEAR_THRESHOLD: f32 = 0.9999;

/// Pose of one capsule segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Midpoint between the endpoints
    pub position: Vec3,
    /// Distance between the endpoints, mapped onto the capsule's Y scale
    pub length: f32,
    /// None for a zero-length segment, whose orientation is undefined
    pub rotation: Option<Quat>,
}

impl Segment {
    /// Segment stretched from `from` to `to`
    pub fn between(from: Vec3, to: Vec3) -> Self {
        let forward = from - to;
        Self {
            position: (from + to) * 0.5,
            length: forward.length(),
            rotation: orientation(forward),
        }
    }

    /// Write this pose into a capsule entity, keeping its thickness.
    /// A degenerate segment leaves the entity's previous rotation in place.
    pub fn apply_to(&self, entity: &mut Entity) {
        entity.position = self.position;
        entity.scale.y = self.length;
        if let Some(rotation) = self.rotation {
            entity.rotation = rotation;
        }
    }
}

/// Lower and upper segment of one leg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimbPose {
    pub lower: Segment,
    pub upper: Segment,
}

/// Knee control point between `foot` and `head`
pub fn knee(foot: Vec3, head: Vec3) -> Vec3 {
    (foot + (foot + Vec3::Y * KNEE_LIFT + head) * 0.5) * 0.5
}

/// Pose both segments of the leg joining `foot` to `head`
pub fn solve(foot: Vec3, head: Vec3) -> LimbPose {
    let knee = knee(foot, head);
    LimbPose {
        lower: Segment::between(foot, knee),
        upper: Segment::between(knee, head),
    }
}

/// Rotation taking the entity's Y axis onto `forward`.
///
/// The remaining axes follow a look-at basis against world up. When
/// `forward` is vertical, +Z stands in for up so the basis stays finite.
pub fn orientation(forward: Vec3) -> Option<Quat> {
    let forward = forward.try_normalize()?;
    let up = if forward.dot(Vec3::Y).abs() > COLINEAR_THRESHOLD {
        Vec3::Z
    } else {
        Vec3::Y
    };

    let right = forward.cross(up).normalize();
    let back = right.cross(forward);
    Some(Quat::from_mat3(&Mat3::from_cols(right, forward, back)))
}
