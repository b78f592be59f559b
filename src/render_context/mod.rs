/// Render Context Module - explicit owner of all terrain resources
///
/// - context_data.rs: context, per-view resources, material table, descriptor
/// - context_operations.rs: terrain rebuild, per-frame culling, draw consumption

pub mod context_data;
pub mod context_operations;

pub use context_data::{
    DrawPacket, TerrainDescriptor, TerrainMaterial, TerrainRenderContext, TerrainResources,
    ViewResources, MAX_TERRAIN_MATERIALS,
};
pub use context_operations::{
    consume_draw, create_render_context, cull_frame, describe_terrain, material_bytes,
    set_materials, update_terrain,
};
