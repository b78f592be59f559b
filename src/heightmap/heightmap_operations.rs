//! Heightmap Operations - Pure DOP Functions
//!
//! Construction, decoding and sampling. Sampling outside the map returns
//! sentinels rather than clamping; callers treat sentinels as undefined area.

use super::heightmap_data::{HeightEncoding, Heightmap, NormalMap};
use crate::constants::sampling::{HEIGHT_SENTINEL, NORMAL_SENTINEL};
use crate::error::{TerrainError, TerrainResult};
use std::path::Path;

fn validate_dims(width: u32, height: u32, found: usize) -> TerrainResult<()> {
    if width < 2 || height < 2 {
        return Err(TerrainError::HeightmapTooSmall { width, height });
    }
    let expected = width as usize * height as usize;
    if expected != found {
        return Err(TerrainError::HeightmapDataMismatch { expected, found });
    }
    Ok(())
}

/// Create heightmap from normalised row-major texels
pub fn create_heightmap(width: u32, height: u32, texels: Vec<f32>) -> TerrainResult<Heightmap> {
    validate_dims(width, height, texels.len())?;
    Ok(Heightmap {
        width,
        height,
        texels,
    })
}

/// Create heightmap with the same value everywhere
pub fn create_constant_heightmap(width: u32, height: u32, value: f32) -> TerrainResult<Heightmap> {
    create_heightmap(width, height, vec![value; width as usize * height as usize])
}

/// Decode a single RGBA8 texel into a normalised height
pub fn decode_height(pixel: [u8; 4], encoding: HeightEncoding) -> f32 {
    match encoding {
        HeightEncoding::Red8 => pixel[0] as f32 / 255.0,
        HeightEncoding::RedGreen16 => {
            ((pixel[0] as u32) << 8 | pixel[1] as u32) as f32 / 65535.0
        }
    }
}

/// Decode heightmap from an RGBA8 image
pub fn heightmap_from_rgba8(
    image: &image::RgbaImage,
    encoding: HeightEncoding,
) -> TerrainResult<Heightmap> {
    let texels = image
        .pixels()
        .map(|p| decode_height(p.0, encoding))
        .collect();
    create_heightmap(image.width(), image.height(), texels)
}

/// Load and decode a heightmap image from disk
pub fn load_heightmap(path: &Path, encoding: HeightEncoding) -> TerrainResult<Heightmap> {
    let image = image::open(path)?.to_rgba8();
    let heightmap = heightmap_from_rgba8(&image, encoding)?;
    log::info!(
        "[load_heightmap] Decoded {} ({}x{})",
        path.display(),
        heightmap.width,
        heightmap.height
    );
    Ok(heightmap)
}

/// Exact texel read; `None` outside the map
pub fn texel(heightmap: &Heightmap, x: u32, y: u32) -> Option<f32> {
    if x >= heightmap.width || y >= heightmap.height {
        return None;
    }
    Some(heightmap.texels[(y * heightmap.width + x) as usize])
}

fn texel_unchecked(heightmap: &Heightmap, x: u32, y: u32) -> f32 {
    heightmap.texels[(y * heightmap.width + x) as usize]
}

/// True if `(x, y)` lies inside the sampleable range `[0, size - 1]`
pub fn in_bounds(width: u32, height: u32, x: f32, y: f32) -> bool {
    x.is_finite()
        && y.is_finite()
        && x >= 0.0
        && y >= 0.0
        && x <= (width - 1) as f32
        && y <= (height - 1) as f32
}

/// Bilinear height sample in texel coordinates
///
/// Returns [`HEIGHT_SENTINEL`] outside `[0, width - 1] x [0, height - 1]`.
/// Integer coordinates return the stored texel exactly.
pub fn sample_height(heightmap: &Heightmap, x: f32, y: f32) -> f32 {
    if !in_bounds(heightmap.width, heightmap.height, x, y) {
        return HEIGHT_SENTINEL;
    }

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(heightmap.width - 1);
    let y1 = (y0 + 1).min(heightmap.height - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let h00 = texel_unchecked(heightmap, x0, y0);
    let h10 = texel_unchecked(heightmap, x1, y0);
    let h01 = texel_unchecked(heightmap, x0, y1);
    let h11 = texel_unchecked(heightmap, x1, y1);

    let top = h00 * (1.0 - fx) + h10 * fx;
    let bottom = h01 * (1.0 - fx) + h11 * fx;
    top * (1.0 - fy) + bottom * fy
}

/// Check a sample against the sentinel
pub fn is_height_sentinel(value: f32) -> bool {
    value == HEIGHT_SENTINEL
}

/// CRC32 over dimensions and texel bits, used for rebuild checks
pub fn content_hash(heightmap: &Heightmap) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&heightmap.width.to_le_bytes());
    hasher.update(&heightmap.height.to_le_bytes());
    hasher.update(bytemuck::cast_slice(&heightmap.texels));
    hasher.finalize()
}

/// Create normal map from row-major texels
pub fn create_normal_map(
    width: u32,
    height: u32,
    texels: Vec<[f32; 3]>,
) -> TerrainResult<NormalMap> {
    validate_dims(width, height, texels.len())?;
    Ok(NormalMap {
        width,
        height,
        texels,
    })
}

/// Decode normal map from an RGBA8 image (rgb * 2 - 1)
pub fn normal_map_from_rgba8(image: &image::RgbaImage) -> TerrainResult<NormalMap> {
    let texels = image
        .pixels()
        .map(|p| {
            [
                p.0[0] as f32 / 255.0 * 2.0 - 1.0,
                p.0[1] as f32 / 255.0 * 2.0 - 1.0,
                p.0[2] as f32 / 255.0 * 2.0 - 1.0,
            ]
        })
        .collect();
    create_normal_map(image.width(), image.height(), texels)
}

/// Bilinear normal sample in texel coordinates, renormalised
///
/// Returns [`NORMAL_SENTINEL`] outside the map.
pub fn sample_normal(normal_map: &NormalMap, x: f32, y: f32) -> [f32; 3] {
    if !in_bounds(normal_map.width, normal_map.height, x, y) {
        return NORMAL_SENTINEL;
    }

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(normal_map.width - 1);
    let y1 = (y0 + 1).min(normal_map.height - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let at = |tx: u32, ty: u32| {
        glam::Vec3::from(normal_map.texels[(ty * normal_map.width + tx) as usize])
    };
    let top = at(x0, y0) * (1.0 - fx) + at(x1, y0) * fx;
    let bottom = at(x0, y1) * (1.0 - fx) + at(x1, y1) * fx;
    let n = top * (1.0 - fy) + bottom * fy;

    n.try_normalize().unwrap_or(n).to_array()
}
