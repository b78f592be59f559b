/// Clipmap Module - concentric ring terrain meshes around the camera
///
/// - clipmap_data.rs: archetype meshes, instances, ring state
/// - clipmap_meshes.rs: one-time tile / filler / trim / cross / seam generation
/// - clipmap_operations.rs: per-frame snapping

pub mod clipmap_data;
pub mod clipmap_meshes;
pub mod clipmap_operations;

pub use clipmap_data::{
    ClipmapDrawCounts, ClipmapInstance, ClipmapMesh, ClipmapMeshes, ClipmapRing, ClipmapState,
    ResnapMask,
};
pub use clipmap_meshes::{generate, hole_vertex_resolution};
pub use clipmap_operations::{
    active_rings, create_clipmap, draw_counts, instance_to_world, instance_vertices, level_scale,
    snap, snapped_position, trim_rotation,
};
