//! Terrain constants
//!
//! Shared compile-time values for quadtree addressing, sampling sentinels,
//! patch generation and clipmap defaults.

/// Quadtree layout
pub mod quadtree {
    /// Root mip holds `1 << ROOT_LEVEL_NODE_COUNT_BIT` nodes (8x8)
    pub const ROOT_LEVEL_NODE_COUNT_BIT: u32 = 6;

    /// Every finer mip multiplies the node count by `1 << SUB_LEVEL_NODE_COUNT_BIT`
    pub const SUB_LEVEL_NODE_COUNT_BIT: u32 = 2;

    /// Nodes per row of the root mip
    pub const ROOT_LEVEL_NODE_WIDTH: u32 = 1 << (ROOT_LEVEL_NODE_COUNT_BIT / 2);

    /// Default number of mip levels in the quadtree
    pub const TERRAIN_MIP_LEVEL: u32 = 6;

    /// Upper bound accepted by config validation (keeps offsets inside u32)
    pub const MAX_TERRAIN_MIP_LEVEL: u32 = 8;
}

/// Sampling sentinels for undefined terrain
pub mod sampling {
    /// Returned by height sampling outside the heightmap
    pub const HEIGHT_SENTINEL: f32 = -1.0;

    /// Returned by normal sampling outside the normal map
    pub const NORMAL_SENTINEL: [f32; 3] = [-1.0, -1.0, -1.0];
}

/// Per-frame patch generation defaults
pub mod patch {
    /// Quads per edge of the reference patch mesh
    pub const PATCH_GRID_RESOLUTION: u32 = 16;

    /// Patches emitted per accepted node, per axis
    pub const PATCHES_PER_NODE_AXIS: u32 = 8;

    /// Subdivide while projected error exceeds this many pixels
    pub const SCREEN_ERROR_THRESHOLD_PX: f32 = 4.0;

    /// Nodes smaller than this on screen are accepted without further checks
    pub const LOD_FLOOR_PX: f32 = 1.0;

    /// Weight of the node height range in the error metric
    pub const HEIGHT_ERROR_WEIGHT: f32 = 1.0;

    /// Default viewport height used for projected error
    pub const VIEWPORT_HEIGHT: u32 = 1080;

    /// Default capacity of a view's packed patch buffer
    pub const MAX_VISIBLE_PATCHES: u32 = 1 << 16;
}

/// Geometry clipmap defaults
pub mod clipmap {
    /// Quads per edge of a clipmap tile
    pub const TILE_RESOLUTION: u32 = 48;

    /// Number of concentric rings
    pub const LEVEL_COUNT: u32 = 7;

    /// Hard cap so per-ring state lives in fixed arrays
    pub const MAX_LEVEL_COUNT: usize = 16;

    /// Tiles per ring: 4x4 grid
    pub const TILES_PER_RING: usize = 16;
}
