//! Serializable dump of one frame, including the prop draws built from
//! the shared render resources

use std::path::Path;

use anyhow::{Context, Result};
use blobby_core::creature::{Entity, FollowerState, flatten_corridor};
use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use super::resources::{RenderResources, Renderable};
use crate::scene::Scene;

/// Active path at capture time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSnapshot {
    pub step: f32,
    pub destination: Vec3,
    /// Voxels the path passes through, as flat x, y, z triples
    pub voxels: Vec<i32>,
}

/// One prop draw: shared mesh placed at `position`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSnapshot {
    pub position: Vec3,
    pub visible: bool,
    pub diffuse: [f32; 3],
    pub vertex_bytes: usize,
    pub index_bytes: usize,
}

impl PropSnapshot {
    fn new(renderable: &Renderable, position: Vec3, visible: bool) -> Self {
        Self {
            position,
            visible,
            diffuse: renderable.material.diffuse,
            vertex_bytes: renderable.mesh.vertex_bytes().len(),
            index_bytes: renderable.mesh.index_bytes().len(),
        }
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub frame: u64,
    pub time: f32,
    pub root: Vec3,
    pub state: FollowerState,
    pub indicator: Vec3,
    pub path: Option<PathSnapshot>,
    pub entities: Vec<Entity>,
    pub background: [f32; 3],
    /// Indicator then ocean
    pub props: Vec<PropSnapshot>,
}

impl FrameSnapshot {
    pub fn capture(scene: &Scene, resources: &RenderResources, frame: u64, time: f32) -> Self {
        let blobby = &scene.blobby;
        let path = blobby.follower().path().map(|path| {
            let voxels: Vec<IVec3> = path
                .positions()
                .iter()
                .map(|position| position.floor().as_ivec3())
                .collect();
            PathSnapshot {
                step: path.step(),
                destination: path.destination(),
                voxels: flatten_corridor(&voxels),
            }
        });

        Self {
            frame,
            time,
            root: blobby.position(),
            state: blobby.state(),
            indicator: scene.indicator.position,
            path,
            entities: blobby.entities().to_vec(),
            background: resources.background(),
            props: vec![
                PropSnapshot::new(
                    resources.indicator(),
                    scene.indicator.position,
                    scene.indicator.is_visible(),
                ),
                PropSnapshot::new(resources.ocean(), scene.ocean.position, true),
            ],
        }
    }

    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize snapshot")
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let text = self.to_ron()?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))
    }
}
