/// Culling Module - per-frame quadtree traversal and patch emission
///
/// - culling_data.rs: patches, views, queues, counters and stats
/// - traversal.rs: breadth-first accept / subdivide / cull
/// - lod_map.rs: selected mip per cell for neighbour lookups
/// - patch_builder.rs: final nodes to packed visible patches

pub mod culling_data;
pub mod lod_map;
pub mod patch_builder;
pub mod traversal;

pub use culling_data::{
    FrameCullStats, LevelStats, LodMap, LodSettings, NodeDecision, PatchBuildStats, RenderPatch,
    Side, TraversalBuffers, TraversalStats, TraversalView, ViewCullStats, VisiblePatchCounter,
    ALL_SIDES, LOD_UNSET,
};
pub use lod_map::{create_lod_map, lod_at, lod_transition, reset_lod_map, write_lod_map};
pub use patch_builder::{build_patches, create_patch_buffer, finalize_counter};
pub use traversal::{
    accepted_area, camera_view, create_traversal_buffers, evaluate_node, light_view,
    lod_settings, region_height_bounds, screen_space_error, traverse,
};
