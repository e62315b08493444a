//! Rig model: the fixed set of entities that make up one creature
//!
//! All entities live in a single vector laid out as
//! `[head, eyes.., feet.., legs_bottom.., legs_top..]`. The layout never
//! changes after construction, so the renderer can batch on it directly.

use std::ops::Range;

use glam::{IVec3, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::traits::TerrainAccess;
use crate::types::{Entity, Palette, Shape};

const HEAD: usize = 0;
const EYES: Range<usize> = 1..3;

/// Eye scale at spawn
const EYE_SCALE: f32 = 1.5;
/// Upper leg thickness at spawn
const LEG_TOP_THICKNESS: f32 = 0.2;

/// Procedural rig of one creature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rig {
    /// Logical ground anchor of the creature
    pub position: Vec3,
    entities: Vec<Entity>,
    /// Resting point each foot damps toward, index-aligned with the feet
    targets: Vec<Vec3>,
    limbs: usize,
}

impl Rig {
    /// Build a rig with `limbs` feet at `position`.
    ///
    /// Every entity starts on the root. Foot targets start on the spawn
    /// position; callers retarget them once terrain is known.
    pub fn new(
        limbs: usize,
        palette: &Palette,
        position: Vec3,
        head_scale: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let mut entities = Vec::with_capacity(3 + limbs * 3);

        entities.push(Entity::new(
            palette.head,
            Shape::Sphere,
            position,
            Vec3::splat(head_scale),
        ));
        for _ in EYES {
            entities.push(Entity::new(
                palette.eyes,
                Shape::Sphere,
                position,
                Vec3::splat(EYE_SCALE),
            ));
        }

        // Feet get a random, non-uniform footprint
        for _ in 0..limbs {
            let scale = Vec3::new(
                0.1 + rng.random::<f32>() * 0.2,
                0.1 + rng.random::<f32>() * 0.2,
                0.1 + rng.random::<f32>() * 0.2,
            );
            entities.push(Entity::new(palette.feet, Shape::Sphere, position, scale));
        }

        // Leg segments have no length until the first solve
        for _ in 0..limbs {
            let thickness = 0.1 + rng.random::<f32>() * 0.1;
            entities.push(Entity::new(
                palette.legs_bottom,
                Shape::Capsule,
                position,
                Vec3::new(thickness, 0.0, 0.0),
            ));
        }
        for _ in 0..limbs {
            entities.push(Entity::new(
                palette.legs_top,
                Shape::Capsule,
                position,
                Vec3::new(LEG_TOP_THICKNESS, 0.0, 0.0),
            ));
        }

        Self {
            position,
            entities,
            targets: vec![position; limbs],
            limbs,
        }
    }

    /// Number of feet
    pub fn limbs(&self) -> usize {
        self.limbs
    }

    /// All entities in renderer order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn head(&self) -> &Entity {
        &self.entities[HEAD]
    }

    pub fn head_mut(&mut self) -> &mut Entity {
        &mut self.entities[HEAD]
    }

    pub fn eyes(&self) -> &[Entity] {
        &self.entities[EYES]
    }

    pub fn eyes_mut(&mut self) -> &mut [Entity] {
        &mut self.entities[EYES]
    }

    pub fn feet(&self) -> &[Entity] {
        &self.entities[self.feet_range()]
    }

    pub fn feet_mut(&mut self) -> &mut [Entity] {
        let range = self.feet_range();
        &mut self.entities[range]
    }

    pub fn legs_bottom(&self) -> &[Entity] {
        &self.entities[self.legs_bottom_range()]
    }

    pub fn legs_top(&self) -> &[Entity] {
        &self.entities[self.legs_top_range()]
    }

    /// Foot `index` together with its lower and upper leg segments
    pub fn limb_mut(&mut self, index: usize) -> (&mut Entity, &mut Entity, &mut Entity) {
        let foot = self.feet_range().start + index;
        let bottom = self.legs_bottom_range().start + index;
        let top = self.legs_top_range().start + index;

        let (head, rest) = self.entities.split_at_mut(bottom);
        let (bottom_part, top_part) = rest.split_at_mut(top - bottom);
        (&mut head[foot], &mut bottom_part[0], &mut top_part[0])
    }

    /// Current target of foot `index`
    pub fn target(&self, index: usize) -> Vec3 {
        self.targets[index]
    }

    /// Targets of all feet
    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    pub(crate) fn set_target(&mut self, index: usize, target: Vec3) {
        self.targets[index] = target;
    }

    fn feet_range(&self) -> Range<usize> {
        EYES.end..EYES.end + self.limbs
    }

    fn legs_bottom_range(&self) -> Range<usize> {
        let start = EYES.end + self.limbs;
        start..start + self.limbs
    }

    fn legs_top_range(&self) -> Range<usize> {
        let start = EYES.end + self.limbs * 2;
        start..start + self.limbs
    }
}

/// Spawn point at the horizontal center of the terrain, dropped to the ground.
///
/// Falls back to y = 0 when the center column has no walkable surface.
pub fn spawn_position(terrain: &impl TerrainAccess, clearance: i32) -> Vec3 {
    let dimensions = terrain.dimensions().as_vec3();
    let mut position = Vec3::new(
        dimensions.x * 0.5 + 0.5,
        dimensions.y - 1.0,
        dimensions.z * 0.5 + 0.5,
    );

    let voxel: IVec3 = position.floor().as_ivec3();
    match terrain.ground(voxel, clearance) {
        Some(height) => position.y = height as f32,
        None => {
            log::warn!(
                "No ground under spawn column ({}, {}), spawning at y = 0",
                voxel.x,
                voxel.z
            );
            position.y = 0.0;
        }
    }
    position
}
