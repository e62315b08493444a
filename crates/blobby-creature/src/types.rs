//! Render descriptors shared between the rig and whatever draws it

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// RGBA color, one byte per channel
pub type Color = [u8; 4];

/// How an entity is combined with the ones before it by the blend renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BlendOperation {
    #[default]
    Union,
    Subtraction,
    Intersection,
}

/// Signed distance primitive used to draw an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Shape {
    Box,
    Capsule,
    #[default]
    Sphere,
}

impl Shape {
    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Box => "box",
            Shape::Capsule => "capsule",
            Shape::Sphere => "sphere",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single renderable primitive.
///
/// Entities are plain values: the rig owns them and rewrites their pose every
/// tick, and the renderer re-reads them without looking at any other state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub color: Color,
    pub operation: BlendOperation,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub shape: Shape,
}

impl Entity {
    /// Create a unioned entity at `position` with identity rotation
    pub fn new(color: Color, shape: Shape, position: Vec3, scale: Vec3) -> Self {
        Self {
            color,
            operation: BlendOperation::Union,
            position,
            rotation: Quat::IDENTITY,
            scale,
            shape,
        }
    }
}

/// Colors for each body group of the creature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub head: Color,
    pub eyes: Color,
    pub feet: Color,
    pub legs_bottom: Color,
    pub legs_top: Color,
}

impl Palette {
    /// Draw every color channel uniformly; alpha is always opaque
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut color = || -> Color { [rng.random(), rng.random(), rng.random(), 0xFF] };
        Self {
            head: color(),
            eyes: color(),
            feet: color(),
            legs_bottom: color(),
            legs_top: color(),
        }
    }
}
