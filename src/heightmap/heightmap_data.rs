//! Heightmap Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in heightmap_operations.rs

/// Decoded heightmap, row-major, values normalised to [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<f32>,
}

/// Decoded normal map, row-major, components in [-1, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct NormalMap {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<[f32; 3]>,
}

/// How height is packed into RGBA8 texels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeightEncoding {
    /// 8-bit height in the red channel
    Red8,
    /// 16-bit height, red = high byte, green = low byte
    #[default]
    RedGreen16,
}
