//! Terrain configuration
//!
//! Every field has a default so partial TOML files are valid.

use crate::constants::{clipmap, patch, quadtree};
use crate::error::{invalid_config, ErrorContext, TerrainResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry clipmap settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipmapConfig {
    /// Quads per edge of a tile
    pub tile_resolution: u32,
    /// Number of concentric rings
    pub level_count: u32,
}

impl Default for ClipmapConfig {
    fn default() -> Self {
        Self {
            tile_resolution: clipmap::TILE_RESOLUTION,
            level_count: clipmap::LEVEL_COUNT,
        }
    }
}

/// Main terrain configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// World-space edge length of the (square) terrain
    pub terrain_size: f32,
    /// World-space origin of the terrain on the xz plane
    pub origin: [f32; 2],
    /// Multiplier from normalised heightmap values to world units
    pub height_scale: f32,
    /// Quadtree depth
    pub mip_level_count: u32,
    /// Quads per edge of the reference patch mesh
    pub patch_grid_resolution: u32,
    /// Patches per accepted node, per axis
    pub patches_per_node_axis: u32,
    /// Subdivide while projected error exceeds this many pixels
    pub screen_error_threshold: f32,
    /// Nodes smaller than this on screen are accepted as-is
    pub lod_floor_pixels: f32,
    /// Weight of the node height range in the error metric
    pub height_error_weight: f32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Maximum number of shadow-casting directional lights
    pub max_shadow_lights: u32,
    /// Capacity of each view's packed patch buffer
    pub max_visible_patches: u32,
    pub clipmap: ClipmapConfig,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            terrain_size: 1024.0,
            origin: [0.0, 0.0],
            height_scale: 1.0,
            mip_level_count: quadtree::TERRAIN_MIP_LEVEL,
            patch_grid_resolution: patch::PATCH_GRID_RESOLUTION,
            patches_per_node_axis: patch::PATCHES_PER_NODE_AXIS,
            screen_error_threshold: patch::SCREEN_ERROR_THRESHOLD_PX,
            lod_floor_pixels: patch::LOD_FLOOR_PX,
            height_error_weight: patch::HEIGHT_ERROR_WEIGHT,
            viewport_height: patch::VIEWPORT_HEIGHT,
            max_shadow_lights: 1,
            max_visible_patches: patch::MAX_VISIBLE_PATCHES,
            clipmap: ClipmapConfig::default(),
        }
    }
}

impl TerrainConfig {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(text: &str) -> TerrainResult<Self> {
        let config: TerrainConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> TerrainResult<Self> {
        let text = std::fs::read_to_string(path).with_path(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("[TerrainConfig::load] Loaded {}", path.display());
        Ok(config)
    }

    /// Write configuration as TOML
    pub fn save(&self, path: &Path) -> TerrainResult<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).with_path(path)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> TerrainResult<()> {
        if !(self.terrain_size.is_finite() && self.terrain_size > 0.0) {
            return Err(invalid_config(
                "terrain_size",
                self.terrain_size,
                "must be a positive finite number",
            ));
        }

        if !(self.height_scale.is_finite() && self.height_scale > 0.0) {
            return Err(invalid_config(
                "height_scale",
                self.height_scale,
                "must be a positive finite number",
            ));
        }

        crate::quadtree::validate_mip_count(self.mip_level_count)?;

        if self.patch_grid_resolution == 0 || self.patch_grid_resolution > 255 {
            return Err(invalid_config(
                "patch_grid_resolution",
                self.patch_grid_resolution,
                "must be between 1 and 255",
            ));
        }

        if self.patches_per_node_axis == 0 || self.patches_per_node_axis > 16 {
            return Err(invalid_config(
                "patches_per_node_axis",
                self.patches_per_node_axis,
                "must be between 1 and 16",
            ));
        }

        if !(self.screen_error_threshold.is_finite() && self.screen_error_threshold > 0.0) {
            return Err(invalid_config(
                "screen_error_threshold",
                self.screen_error_threshold,
                "must be a positive finite number",
            ));
        }

        if !(self.lod_floor_pixels.is_finite() && self.lod_floor_pixels >= 0.0) {
            return Err(invalid_config(
                "lod_floor_pixels",
                self.lod_floor_pixels,
                "must be a finite, non-negative number",
            ));
        }

        if !(self.height_error_weight.is_finite() && self.height_error_weight >= 0.0) {
            return Err(invalid_config(
                "height_error_weight",
                self.height_error_weight,
                "must be a finite, non-negative number",
            ));
        }

        if self.max_visible_patches == 0 {
            return Err(invalid_config("max_visible_patches", 0, "cannot be 0"));
        }

        if self.viewport_height == 0 {
            return Err(invalid_config("viewport_height", 0, "cannot be 0"));
        }

        if self.clipmap.tile_resolution < 2 {
            return Err(invalid_config(
                "clipmap.tile_resolution",
                self.clipmap.tile_resolution,
                "must be at least 2",
            ));
        }

        if self.clipmap.level_count == 0
            || self.clipmap.level_count as usize > clipmap::MAX_LEVEL_COUNT
        {
            return Err(invalid_config(
                "clipmap.level_count",
                self.clipmap.level_count,
                "must be between 1 and 16",
            ));
        }

        Ok(())
    }

    /// World width of the finest quadtree node
    pub fn finest_node_size(&self) -> f32 {
        crate::quadtree::specific_mip_level_width(self.terrain_size, self.mip_level_count - 1)
    }
}
