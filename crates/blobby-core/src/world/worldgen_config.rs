//! World generation configuration - serializable parameters for terrain generation
//!
//! The seed is NOT part of the config - same config + different seed = different world.

use serde::{Deserialize, Serialize};

/// Complete terrain generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// Volume size along x
    pub width: u32,
    /// Volume size along y
    pub height: u32,
    /// Volume size along z
    pub depth: u32,
    /// Lowest column height
    pub base_height: i32,
    /// Column height added at full noise
    pub amplitude: f32,
    /// Soil layer thickness above stone
    pub soil_depth: i32,
    /// Noise driving column heights
    pub height_noise: NoiseLayerConfig,
}

/// Configuration for a single noise layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseLayerConfig {
    /// Offset added to world seed for this layer
    pub seed_offset: i32,
    pub noise_type: NoiseTypeConfig,
    /// Base frequency (lower = larger features)
    pub frequency: f32,
    pub fractal_type: FractalTypeConfig,
    /// Number of fractal octaves (1-8)
    pub octaves: u8,
    /// Frequency multiplier per octave
    pub lacunarity: f32,
    /// Amplitude multiplier per octave
    pub gain: f32,
}

/// Noise algorithm types (maps to FastNoiseLite::NoiseType)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoiseTypeConfig {
    OpenSimplex2,
    OpenSimplex2S,
    Perlin,
    Value,
}

/// Fractal combination types (maps to FastNoiseLite::FractalType)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FractalTypeConfig {
    None,
    FBm,
    Ridged,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            width: 192,
            height: 64,
            depth: 192,
            base_height: 2,
            amplitude: 32.0,
            soil_depth: 3,
            height_noise: NoiseLayerConfig::default(),
        }
    }
}

impl Default for NoiseLayerConfig {
    fn default() -> Self {
        Self {
            seed_offset: 0,
            noise_type: NoiseTypeConfig::OpenSimplex2,
            frequency: 0.005,
            fractal_type: FractalTypeConfig::FBm,
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.5,
        }
    }
}

impl NoiseTypeConfig {
    pub fn to_fastnoise(self) -> fastnoise_lite::NoiseType {
        match self {
            NoiseTypeConfig::OpenSimplex2 => fastnoise_lite::NoiseType::OpenSimplex2,
            NoiseTypeConfig::OpenSimplex2S => fastnoise_lite::NoiseType::OpenSimplex2S,
            NoiseTypeConfig::Perlin => fastnoise_lite::NoiseType::Perlin,
            NoiseTypeConfig::Value => fastnoise_lite::NoiseType::Value,
        }
    }
}

impl FractalTypeConfig {
    pub fn to_fastnoise(self) -> fastnoise_lite::FractalType {
        match self {
            FractalTypeConfig::None => fastnoise_lite::FractalType::None,
            FractalTypeConfig::FBm => fastnoise_lite::FractalType::FBm,
            FractalTypeConfig::Ridged => fastnoise_lite::FractalType::Ridged,
        }
    }
}

impl NoiseLayerConfig {
    /// Create a FastNoiseLite instance from this config
    pub fn to_fastnoise(&self, base_seed: u64) -> fastnoise_lite::FastNoiseLite {
        let mut noise = fastnoise_lite::FastNoiseLite::with_seed(
            (base_seed as i32).wrapping_add(self.seed_offset),
        );
        noise.set_noise_type(Some(self.noise_type.to_fastnoise()));
        noise.set_frequency(Some(self.frequency));
        noise.set_fractal_type(Some(self.fractal_type.to_fastnoise()));
        noise.set_fractal_octaves(Some(self.octaves as i32));
        noise.set_fractal_lacunarity(Some(self.lacunarity));
        noise.set_fractal_gain(Some(self.gain));
        noise
    }
}
