// Hearth Terrain - Data-Oriented Programming (DOP) Architecture
//
// GPU-driven terrain LOD and culling core, modelled on host-side structured
// buffers whose byte layout matches what the GPU consumes.
// - Data lives in *_data modules, transformations in *_operations modules
// - One explicit TerrainRenderContext owns every per-terrain and per-view resource
// - Pure functions over methods
//
// Frame flow:
//   heightmap -> min/max pyramid -> quadtree (once per heightmap)
//   camera + lights -> traversal -> LOD map -> patches -> indirect commands (every frame)
//   camera -> clipmap ring transforms (independent path)

// Constants module
pub mod constants;

// Core
pub mod config;
pub mod error;
pub mod gpu_buffer;
pub mod terrain_space;

// Math
pub mod bounds;
pub mod camera;

// Terrain data, built once
pub mod heightmap;
pub mod quadtree;

// Per-frame pipeline
pub mod culling;
pub mod indirect;
pub mod patch_mesh;
pub mod render_context;

// Alternative LOD path
pub mod clipmap;

pub use camera::{CameraData, DirectionalLight};
pub use clipmap::{create_clipmap, snap, ClipmapState, ResnapMask};
pub use config::{ClipmapConfig, TerrainConfig};
pub use culling::{FrameCullStats, RenderPatch};
pub use error::{ErrorContext, TerrainError, TerrainResult};
pub use heightmap::{HeightEncoding, Heightmap, MinMaxPyramid};
pub use indirect::{DrawTarget, IndirectDrawCommand};
pub use quadtree::{QuadTree, TNode};
pub use render_context::{
    consume_draw, create_render_context, cull_frame, update_terrain, DrawPacket, TerrainMaterial,
    TerrainRenderContext,
};
pub use terrain_space::TerrainSpace;
