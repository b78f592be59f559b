//! Patch builder - final nodes to packed, visible render patches

use super::culling_data::{
    LodMap, PatchBuildStats, RenderPatch, TraversalView, VisiblePatchCounter, ALL_SIDES,
};
use super::lod_map::lod_transition;
use super::traversal::region_height_bounds;
use crate::bounds::aabb_from_rect;
use crate::error::TerrainResult;
use crate::gpu_buffer::StructuredBuffer;
use crate::heightmap::MinMaxPyramid;
use crate::quadtree::{specific_mip_level_node_in_array_offset, QuadTree, TNode};
use crate::terrain_space::TerrainSpace;

pub fn create_patch_buffer(capacity: u32) -> StructuredBuffer<RenderPatch> {
    StructuredBuffer::new("visible_patches", capacity as usize)
}

/// Per-side transitions for the patch at `(px, pz)` inside its node
///
/// Only patches on the node border can touch a coarser neighbour.
fn patch_transitions(map: &LodMap, node: &TNode, px: u32, pz: u32, per_axis: u32) -> [u32; 4] {
    let on_border = [px == 0, px + 1 == per_axis, pz == 0, pz + 1 == per_axis];
    let mut transitions = [0; 4];
    for side in ALL_SIDES {
        let slot = side as usize;
        if on_border[slot] {
            transitions[slot] = lod_transition(map, node, side);
        }
    }
    transitions
}

/// Expand every final node into `per_axis^2` patches and keep the visible ones
///
/// `patches` is cleared first; holes are dropped before the frustum test.
#[allow(clippy::too_many_arguments)]
pub fn build_patches(
    tree: &QuadTree,
    pyramid: &MinMaxPyramid,
    space: &TerrainSpace,
    view: &TraversalView,
    lod_map: &LodMap,
    final_nodes: &[u32],
    per_axis: u32,
    material_index: u32,
    patches: &mut StructuredBuffer<RenderPatch>,
) -> TerrainResult<PatchBuildStats> {
    patches.clear();
    let mut stats = PatchBuildStats::default();

    for &offset in final_nodes {
        let node = &tree.nodes[offset as usize];
        let size = node.rect[2] / per_axis as f32;

        for pz in 0..per_axis {
            for px in 0..per_axis {
                stats.tested += 1;
                let rect = [
                    node.rect[0] + px as f32 * size,
                    node.rect[1] + pz as f32 * size,
                    size,
                    size,
                ];

                let Some((min_height, max_height)) = region_height_bounds(pyramid, space, rect)
                else {
                    stats.holes += 1;
                    continue;
                };

                if !view.frustum.intersects_aabb(&aabb_from_rect(rect, min_height, max_height)) {
                    continue;
                }

                patches.push(RenderPatch {
                    position: [rect[0], rect[1]],
                    size,
                    lod: node.mip,
                    min_height,
                    max_height,
                    lod_transition: patch_transitions(lod_map, node, px, pz, per_axis),
                    material_index,
                    node_offset: specific_mip_level_node_in_array_offset(node.mip, node.index),
                })?;
                stats.visible += 1;
            }
        }
    }

    log::debug!(
        "[build_patches] {}/{} patches visible ({} holes)",
        stats.visible,
        stats.tested,
        stats.holes
    );

    Ok(stats)
}

/// Freeze the visible count for `frame`
pub fn finalize_counter(
    patches: &StructuredBuffer<RenderPatch>,
    frame: u64,
) -> VisiblePatchCounter {
    VisiblePatchCounter {
        count: patches.len() as u32,
        frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::init_camera;
    use crate::config::TerrainConfig;
    use crate::culling::lod_map::{create_lod_map, write_lod_map};
    use crate::culling::traversal::{camera_view, create_traversal_buffers, lod_settings, traverse};
    use crate::error::TerrainError;
    use crate::heightmap::{create_constant_heightmap, create_heightmap, Heightmap};
    use crate::quadtree::build_quadtree;
    use glam::{Vec2, Vec3};

    struct Frame {
        tree: QuadTree,
        pyramid: MinMaxPyramid,
        space: TerrainSpace,
        final_nodes: Vec<u32>,
        lod_map: LodMap,
    }

    fn cull(heightmap: &Heightmap, view: &TraversalView) -> Frame {
        let config = TerrainConfig {
            mip_level_count: 3,
            ..Default::default()
        };
        let space = TerrainSpace::new(Vec2::ZERO, 1024.0, 10.0, heightmap.width, heightmap.height);
        let tree = build_quadtree(heightmap, &space, 3).unwrap();
        let pyramid = MinMaxPyramid::build(heightmap);
        let mut buffers = create_traversal_buffers(3).unwrap();
        traverse(&tree, &pyramid, &space, view, &lod_settings(&config), &mut buffers).unwrap();
        let mut lod_map = create_lod_map(3).unwrap();
        write_lod_map(&mut lod_map, &tree, buffers.final_nodes.as_slice());
        Frame {
            final_nodes: buffers.final_nodes.as_slice().to_vec(),
            tree,
            pyramid,
            space,
            lod_map,
        }
    }

    fn overhead() -> TraversalView {
        let camera =
            init_camera(Vec3::new(512.0, 3000.0, 512.0), 0.0, -std::f32::consts::FRAC_PI_2);
        camera_view(&camera, 1080)
    }

    fn build(
        frame: &Frame,
        view: &TraversalView,
        per_axis: u32,
        capacity: u32,
    ) -> TerrainResult<(PatchBuildStats, StructuredBuffer<RenderPatch>)> {
        let mut patches = create_patch_buffer(capacity);
        let stats = build_patches(
            &frame.tree,
            &frame.pyramid,
            &frame.space,
            view,
            &frame.lod_map,
            &frame.final_nodes,
            per_axis,
            0,
            &mut patches,
        )?;
        Ok((stats, patches))
    }

    #[test]
    fn test_overhead_patches_tile_terrain() {
        let hm = create_constant_heightmap(65, 65, 0.5).unwrap();
        let view = overhead();
        let frame = cull(&hm, &view);
        let (stats, patches) = build(&frame, &view, 4, 1 << 14).unwrap();

        assert_eq!(stats.tested, frame.final_nodes.len() as u32 * 16);
        assert_eq!(stats.visible, stats.tested);
        let area: f32 = patches.as_slice().iter().map(|p| p.size * p.size).sum();
        assert!((area - 1024.0 * 1024.0).abs() < 1.0);
        for patch in patches.as_slice() {
            assert_eq!(patch.min_height, 5.0);
            assert_eq!(patch.max_height, 5.0);
            assert_eq!(patch.lod_transition, [0; 4]);
        }

        let counter = finalize_counter(&patches, 7);
        assert_eq!(counter, VisiblePatchCounter { count: stats.visible, frame: 7 });
    }

    #[test]
    fn test_partially_visible_node_drops_patches() {
        let hm = create_constant_heightmap(65, 65, 0.0).unwrap();
        let view = overhead();
        let frame = cull(&hm, &view);
        // Cull the same nodes against a camera that only sees part of the terrain
        let camera = init_camera(Vec3::new(64.0, 20.0, 64.0), std::f32::consts::FRAC_PI_4, -0.3);
        let narrow = camera_view(&camera, 1080);
        let (stats, _) = build(&frame, &narrow, 4, 1 << 14).unwrap();
        assert!(stats.visible > 0);
        assert!(stats.visible < stats.tested);
    }

    #[test]
    fn test_hole_patches_are_skipped() {
        let texels = (0..65 * 65)
            .map(|i| if i % 65 < 4 { -1.0 } else { 0.25 })
            .collect();
        let hm = create_heightmap(65, 65, texels).unwrap();
        let view = overhead();
        let frame = cull(&hm, &view);
        let (stats, patches) = build(&frame, &view, 4, 1 << 14).unwrap();
        assert!(stats.holes > 0);
        assert!(patches.as_slice().iter().all(|p| p.position[0] >= 32.0));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let hm = create_constant_heightmap(65, 65, 0.5).unwrap();
        let view = overhead();
        let frame = cull(&hm, &view);
        let err = build(&frame, &view, 4, 8).unwrap_err();
        assert!(matches!(err, TerrainError::BufferOverflow { capacity: 8, .. }));
    }
}
