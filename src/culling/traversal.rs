//! Quadtree traversal - breadth-first, one mip level at a time
//!
//! Level L is drained completely before level L+1 starts; the next level only
//! ever sees the children pushed by level L.

use super::culling_data::{
    LevelStats, LodSettings, NodeDecision, TraversalBuffers, TraversalStats, TraversalView,
};
use crate::bounds::{aabb_distance_to_point, aabb_from_rect, Aabb, Frustum};
use crate::camera::{build_view_projection, projection_scale, CameraData};
use crate::config::TerrainConfig;
use crate::error::TerrainResult;
use crate::gpu_buffer::StructuredBuffer;
use crate::heightmap::{is_height_sentinel, MinMaxPyramid};
use crate::quadtree::{
    child_indices, is_empty, specific_mip_level_node_count,
    specific_mip_level_node_in_array_offset, validate_mip_count, QuadTree, TNode,
};
use crate::terrain_space::TerrainSpace;
use glam::{Mat4, Vec2};

/// Keeps the error metric finite when the eye is inside a node's box
const MIN_LOD_DISTANCE: f32 = 1e-3;

pub fn lod_settings(config: &TerrainConfig) -> LodSettings {
    LodSettings {
        mip_count: config.mip_level_count,
        quads_per_node_edge: config.patches_per_node_axis * config.patch_grid_resolution,
        screen_error_threshold: config.screen_error_threshold,
        lod_floor_pixels: config.lod_floor_pixels,
        height_error_weight: config.height_error_weight,
    }
}

/// Main camera view
pub fn camera_view(camera: &CameraData, viewport_height: u32) -> TraversalView {
    let view_proj = build_view_projection(camera);
    TraversalView {
        view_proj,
        frustum: Frustum::from_view_projection(&view_proj),
        lod_origin: camera.position,
        projection_scale: projection_scale(camera, viewport_height),
    }
}

/// Shadow view: culls against `view_proj`, selects LOD like `main`
pub fn light_view(view_proj: Mat4, main: &TraversalView) -> TraversalView {
    TraversalView {
        view_proj,
        frustum: Frustum::from_view_projection(&view_proj),
        lod_origin: main.lod_origin,
        projection_scale: main.projection_scale,
    }
}

/// Queues sized so no level can overflow
pub fn create_traversal_buffers(mip_count: u32) -> TerrainResult<TraversalBuffers> {
    validate_mip_count(mip_count)?;
    let finest = specific_mip_level_node_count(mip_count - 1) as usize;
    Ok(TraversalBuffers {
        current: StructuredBuffer::new("traversal_current", finest),
        next: StructuredBuffer::new("traversal_next", finest),
        final_nodes: StructuredBuffer::new("final_nodes", finest),
    })
}

/// Conservative world height range over a world rectangle
///
/// Returns `None` when every texel under the rectangle is a hole.
pub fn region_height_bounds(
    pyramid: &MinMaxPyramid,
    space: &TerrainSpace,
    rect: [f32; 4],
) -> Option<(f32, f32)> {
    let min = Vec2::new(rect[0], rect[1]);
    let max = min + Vec2::new(rect[2], rect[3]);
    let (x0, y0, x1, y1) = space.texel_rect(min, max);
    let (lo, hi) = pyramid.bounds_for_texel_rect(x0, y0, x1, y1);
    if is_height_sentinel(hi) {
        return None;
    }
    Some((lo * space.height_scale, hi * space.height_scale))
}

/// Projected geometric error of a node, in pixels
pub fn screen_space_error(
    node: &TNode,
    aabb: &Aabb,
    view: &TraversalView,
    settings: &LodSettings,
) -> f32 {
    let spacing = node.rect[2] / settings.quads_per_node_edge as f32;
    let height_range = (node.max_height - node.min_height).max(0.0);
    let distance = aabb_distance_to_point(aabb, view.lod_origin).max(MIN_LOD_DISTANCE);
    (spacing + height_range * settings.height_error_weight) * view.projection_scale / distance
}

/// Cull / accept / subdivide for one node
pub fn evaluate_node(
    node: &TNode,
    aabb: Option<&Aabb>,
    view: &TraversalView,
    settings: &LodSettings,
) -> NodeDecision {
    let aabb = match aabb {
        Some(aabb) if !is_empty(node) => aabb,
        _ => return NodeDecision::Cull,
    };

    if !view.frustum.intersects_aabb(aabb) {
        return NodeDecision::Cull;
    }

    if node.mip + 1 >= settings.mip_count {
        return NodeDecision::Accept;
    }

    let distance = aabb_distance_to_point(aabb, view.lod_origin).max(MIN_LOD_DISTANCE);
    let projected_size = node.rect[2] * view.projection_scale / distance;
    if projected_size < settings.lod_floor_pixels {
        return NodeDecision::Accept;
    }

    if screen_space_error(node, aabb, view, settings) <= settings.screen_error_threshold {
        NodeDecision::Accept
    } else {
        NodeDecision::Subdivide
    }
}

/// Walk the quadtree for one view, filling `buffers.final_nodes`
pub fn traverse(
    tree: &QuadTree,
    pyramid: &MinMaxPyramid,
    space: &TerrainSpace,
    view: &TraversalView,
    settings: &LodSettings,
    buffers: &mut TraversalBuffers,
) -> TerrainResult<TraversalStats> {
    let TraversalBuffers {
        current,
        next,
        final_nodes,
    } = buffers;

    current.clear();
    final_nodes.clear();
    for index in 0..specific_mip_level_node_count(0) {
        current.push(specific_mip_level_node_in_array_offset(0, index))?;
    }

    let mut stats = TraversalStats {
        level_count: tree.mip_count,
        ..Default::default()
    };

    for mip in 0..tree.mip_count {
        next.clear();
        let mut level = LevelStats::default();

        for &offset in current.as_slice() {
            let node = &tree.nodes[offset as usize];
            level.visited += 1;

            let aabb = region_height_bounds(pyramid, space, node.rect)
                .map(|(lo, hi)| aabb_from_rect(node.rect, lo, hi));

            match evaluate_node(node, aabb.as_ref(), view, settings) {
                NodeDecision::Cull => level.culled += 1,
                NodeDecision::Accept => {
                    level.accepted += 1;
                    final_nodes.push(offset)?;
                }
                NodeDecision::Subdivide => {
                    level.subdivided += 1;
                    for child in child_indices(node.mip, node.index) {
                        next.push(specific_mip_level_node_in_array_offset(node.mip + 1, child))?;
                    }
                }
            }
        }

        if let Some(slot) = stats.levels.get_mut(mip as usize) {
            *slot = level;
        }
        std::mem::swap(current, next);
    }

    stats.final_nodes = final_nodes.len() as u32;

    log::debug!(
        "[traverse] {} final nodes from {} levels (eye {:?})",
        stats.final_nodes,
        stats.level_count,
        view.lod_origin
    );

    Ok(stats)
}

/// World-space area covered by the accepted nodes
pub fn accepted_area(tree: &QuadTree, final_nodes: &[u32]) -> f32 {
    final_nodes
        .iter()
        .map(|&offset| {
            let rect = tree.nodes[offset as usize].rect;
            rect[2] * rect[3]
        })
        .sum()
}
