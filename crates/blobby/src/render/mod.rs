//! Render-side data: prop meshes, materials and frame snapshots

pub mod resources;
pub mod snapshot;

pub use resources::{Fog, Material, Mesh, RenderResources, Renderable, TerrainAtlas, Vertex};
pub use snapshot::{FrameSnapshot, PathSnapshot, PropSnapshot};
