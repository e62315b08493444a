//! Shared meshes and materials for the scene props
//!
//! Geometry is built on first use and cached for the lifetime of the
//! resources; every indicator and ocean instance shares the same data.

use blobby_core::creature::Color;
use blobby_core::world::voxel;
use glam::Vec3;
use once_cell::unsync::OnceCell;
use rand::Rng;

use crate::scene::OCEAN_SIZE;

/// Edge length of the indicator cube
pub const INDICATOR_SIZE: f32 = 0.5;
pub const INDICATOR_COLOR: u32 = 0xFF0000;
pub const OCEAN_COLOR: u32 = 0x112233;
/// Clear color; also the color the ocean fades into
pub const BACKGROUND_COLOR: u32 = 0x1a2a3a;
pub const OCEAN_FOG_DENSITY: f32 = 0.005;

/// Mesh vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle list, counter-clockwise front faces
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    /// Vertex buffer contents
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer contents
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), vertex| {
                let position = Vec3::from_array(vertex.position);
                (min.min(position), max.max(position))
            },
        )
    }

    /// Cube of edge `size` resting on the origin plane
    pub fn cube(size: f32) -> Self {
        let half = size * 0.5;
        let center = Vec3::Y * half;
        // (normal, u, v) with u x v = normal
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::Y, Vec3::X),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let base = vertices.len() as u16;
            let face_center = center + normal * half;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                vertices.push(Vertex {
                    position: (face_center + (u * su + v * sv) * half).to_array(),
                    normal: normal.to_array(),
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    /// Horizontal square of side `size` centered on the origin, facing +Y
    pub fn plane(size: f32) -> Self {
        let half = size * 0.5;
        let normal = Vec3::Y.to_array();
        let vertices = [(-half, half), (half, half), (half, -half), (-half, -half)]
            .into_iter()
            .map(|(x, z)| Vertex {
                position: [x, 0.0, z],
                normal,
            })
            .collect();

        Self {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }
}

/// Unlit material parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: [f32; 3],
    /// Exponential-squared fade by distance from the mesh origin
    pub fog: Option<Fog>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub density: f32,
}

impl Fog {
    /// Blend factor towards the fog color at `distance`
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 - (-self.density * self.density * distance * distance).exp()
    }
}

/// 0xRRGGBB to normalized RGB
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// A mesh with the material it is drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    pub mesh: Mesh,
    pub material: Material,
}

/// Voxel colors, one layer per solid voxel value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainAtlas {
    pub layers: [Color; 2],
}

impl TerrainAtlas {
    /// Random muted colors; channels stay below 0xAA
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut layer = || -> Color {
            [
                rng.random_range(0..0xAA),
                rng.random_range(0..0xAA),
                rng.random_range(0..0xAA),
                0xFF,
            ]
        };
        Self {
            layers: [layer(), layer()],
        }
    }

    /// Color of a voxel value; None for air and unknown values
    pub fn color(&self, value: u8) -> Option<Color> {
        match value {
            voxel::STONE => Some(self.layers[0]),
            voxel::SOIL => Some(self.layers[1]),
            _ => None,
        }
    }

    /// Texture array contents: 1x1 RGBA texel per layer
    pub fn as_bytes(&self) -> &[u8] {
        self.layers.as_flattened()
    }
}

/// Lazily built GPU-side data for the scene props
pub struct RenderResources {
    indicator: OnceCell<Renderable>,
    ocean: OnceCell<Renderable>,
    atlas: TerrainAtlas,
}

impl RenderResources {
    pub fn new(atlas: TerrainAtlas) -> Self {
        Self {
            indicator: OnceCell::new(),
            ocean: OnceCell::new(),
            atlas,
        }
    }

    pub fn atlas(&self) -> &TerrainAtlas {
        &self.atlas
    }

    pub fn background(&self) -> [f32; 3] {
        rgb(BACKGROUND_COLOR)
    }

    pub fn indicator(&self) -> &Renderable {
        self.indicator.get_or_init(|| {
            log::debug!("Building indicator mesh");
            Renderable {
                mesh: Mesh::cube(INDICATOR_SIZE),
                material: Material {
                    diffuse: rgb(INDICATOR_COLOR),
                    fog: None,
                },
            }
        })
    }

    pub fn ocean(&self) -> &Renderable {
        self.ocean.get_or_init(|| {
            log::debug!("Building ocean mesh");
            Renderable {
                mesh: Mesh::plane(OCEAN_SIZE),
                material: Material {
                    diffuse: rgb(OCEAN_COLOR),
                    fog: Some(Fog {
                        color: rgb(BACKGROUND_COLOR),
                        density: OCEAN_FOG_DENSITY,
                    }),
                },
            }
        })
    }

    pub fn is_built(&self) -> bool {
        self.indicator.get().is_some() && self.ocean.get().is_some()
    }
}
