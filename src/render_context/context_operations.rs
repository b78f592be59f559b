//! Terrain Render Context Operations
//!
//! Frame order per view: traversal, LOD map, patch build, counter finalize,
//! template copy, instance-count patch. The draw side reads through
//! `consume_draw`, which only accepts arguments written this frame.

use super::context_data::{
    DrawPacket, TerrainDescriptor, TerrainMaterial, TerrainRenderContext, TerrainResources,
    ViewResources, MAX_TERRAIN_MATERIALS,
};
use crate::camera::{build_light_view_projection, CameraData, DirectionalLight};
use crate::config::TerrainConfig;
use crate::culling::{
    build_patches, camera_view, create_lod_map, create_patch_buffer, create_traversal_buffers,
    finalize_counter, light_view, lod_settings, traverse, write_lod_map, FrameCullStats,
    LodSettings, TraversalView, ViewCullStats, VisiblePatchCounter,
};
use crate::error::{TerrainError, TerrainResult};
use crate::gpu_buffer::StructuredBuffer;
use crate::heightmap::{content_hash, Heightmap, MinMaxPyramid};
use crate::indirect::{
    consume, copy_template, create_command_buffer, create_command_template, patch_instance_count,
    DrawTarget, IndirectDrawCommand,
};
use crate::patch_mesh::{create_patch_mesh, patch_vertex_buffer_view, patch_vertex_bytes};
use crate::quadtree::{build_quadtree, get_stats};
use crate::terrain_space::TerrainSpace;
use glam::Vec2;

/// Material index written into every patch
const DEFAULT_MATERIAL_INDEX: u32 = 0;

fn create_view_resources(
    config: &TerrainConfig,
    target: DrawTarget,
) -> TerrainResult<ViewResources> {
    Ok(ViewResources {
        target,
        traversal: create_traversal_buffers(config.mip_level_count)?,
        lod_map: create_lod_map(config.mip_level_count)?,
        patches: create_patch_buffer(config.max_visible_patches),
        counter: VisiblePatchCounter::default(),
        commands: create_command_buffer(target),
    })
}

/// Create the context; terrain data arrives later through `update_terrain`
///
/// Buffer locations in the command template are byte offsets into the
/// static geometry upload: vertices first, indices right after.
pub fn create_render_context(config: TerrainConfig) -> TerrainResult<TerrainRenderContext> {
    config.validate()?;

    let patch_mesh = create_patch_mesh(config.patch_grid_resolution);
    let vertex_view = patch_vertex_buffer_view(&patch_mesh, 0);
    let index_location = patch_vertex_bytes(&patch_mesh).len() as u64;
    let command_template =
        create_command_template(vertex_view, index_location, patch_mesh.indices.len() as u32);

    let shadow_views = (0..config.max_shadow_lights as usize)
        .map(|i| create_view_resources(&config, DrawTarget::DirectionalLight(i)))
        .collect::<TerrainResult<Vec<_>>>()?;
    let main_view = create_view_resources(&config, DrawTarget::MainCamera)?;

    log::info!(
        "[TerrainRenderContext::create] {} mips, {} shadow views, {} patches per view",
        config.mip_level_count,
        config.max_shadow_lights,
        config.max_visible_patches
    );

    Ok(TerrainRenderContext {
        main_view,
        shadow_views,
        patch_mesh,
        command_template,
        materials: StructuredBuffer::new("terrain_materials", MAX_TERRAIN_MATERIALS),
        terrain: None,
        frame: 0,
        config,
    })
}

pub fn describe_terrain(config: &TerrainConfig, heightmap: &Heightmap) -> TerrainDescriptor {
    TerrainDescriptor {
        heightmap_hash: content_hash(heightmap),
        width: heightmap.width,
        height: heightmap.height,
        terrain_size: config.terrain_size,
        origin: config.origin,
        height_scale: config.height_scale,
        mip_count: config.mip_level_count,
    }
}

/// Rebuild pyramid and quadtree if the terrain differs from the cached one
///
/// Returns true when a rebuild happened.
pub fn update_terrain(
    context: &mut TerrainRenderContext,
    heightmap: &Heightmap,
) -> TerrainResult<bool> {
    let descriptor = describe_terrain(&context.config, heightmap);
    if let Some(terrain) = &context.terrain {
        if terrain.descriptor == descriptor {
            return Ok(false);
        }
    }

    let config = &context.config;
    let space = TerrainSpace::new(
        Vec2::from(config.origin),
        config.terrain_size,
        config.height_scale,
        heightmap.width,
        heightmap.height,
    );
    let pyramid = MinMaxPyramid::build(heightmap);
    let quadtree = build_quadtree(heightmap, &space, config.mip_level_count)?;
    let stats = get_stats(&quadtree);

    log::info!(
        "[update_terrain] Rebuilt {}x{} terrain: {} nodes ({} empty), {:.1} KB",
        heightmap.width,
        heightmap.height,
        stats.node_count,
        stats.empty_nodes,
        stats.memory_usage_kb
    );

    context.terrain = Some(TerrainResources {
        descriptor,
        heightmap: heightmap.clone(),
        space,
        pyramid,
        quadtree,
    });
    Ok(true)
}

/// Copy the material table verbatim
pub fn set_materials(
    context: &mut TerrainRenderContext,
    materials: &[TerrainMaterial],
) -> TerrainResult<()> {
    context.materials.write(materials)
}

pub fn material_bytes(context: &TerrainRenderContext) -> &[u8] {
    context.materials.as_bytes()
}

#[allow(clippy::too_many_arguments)]
fn cull_view(
    terrain: &TerrainResources,
    settings: &LodSettings,
    patches_per_axis: u32,
    template: &IndirectDrawCommand,
    view: &TraversalView,
    resources: &mut ViewResources,
    frame: u64,
) -> TerrainResult<ViewCullStats> {
    let traversal = traverse(
        &terrain.quadtree,
        &terrain.pyramid,
        &terrain.space,
        view,
        settings,
        &mut resources.traversal,
    )?;

    write_lod_map(
        &mut resources.lod_map,
        &terrain.quadtree,
        resources.traversal.final_nodes.as_slice(),
    );

    let patches = build_patches(
        &terrain.quadtree,
        &terrain.pyramid,
        &terrain.space,
        view,
        &resources.lod_map,
        resources.traversal.final_nodes.as_slice(),
        patches_per_axis,
        DEFAULT_MATERIAL_INDEX,
        &mut resources.patches,
    )?;

    resources.counter = finalize_counter(&resources.patches, frame);
    copy_template(&mut resources.commands, template);
    patch_instance_count(&mut resources.commands, &resources.counter, frame)?;

    Ok(ViewCullStats {
        traversal,
        patches,
        instance_count: resources.counter.count,
    })
}

/// Cull the terrain for the main camera and each shadow light
///
/// Lights beyond `max_shadow_lights` are ignored.
pub fn cull_frame(
    context: &mut TerrainRenderContext,
    camera: &CameraData,
    lights: &[DirectionalLight],
) -> TerrainResult<FrameCullStats> {
    let terrain = context.terrain.as_ref().ok_or(TerrainError::TerrainNotBuilt)?;

    context.frame += 1;
    let frame = context.frame;
    let settings = lod_settings(&context.config);
    let per_axis = context.config.patches_per_node_axis;

    let main = camera_view(camera, context.config.viewport_height);
    let main_stats = cull_view(
        terrain,
        &settings,
        per_axis,
        &context.command_template,
        &main,
        &mut context.main_view,
        frame,
    )?;

    if lights.len() > context.shadow_views.len() {
        log::warn!(
            "[cull_frame] {} shadow lights supplied, only {} shadow views; extra lights ignored",
            lights.len(),
            context.shadow_views.len()
        );
    }

    let mut light_stats = Vec::with_capacity(lights.len().min(context.shadow_views.len()));
    for (light, resources) in lights.iter().zip(context.shadow_views.iter_mut()) {
        let view = light_view(build_light_view_projection(light, camera.position), &main);
        light_stats.push(cull_view(
            terrain,
            &settings,
            per_axis,
            &context.command_template,
            &view,
            resources,
            frame,
        )?);
    }

    log::debug!(
        "[cull_frame] Frame {}: {} main patches, {} shadow views",
        frame,
        main_stats.instance_count,
        light_stats.len()
    );

    Ok(FrameCullStats {
        frame,
        main: main_stats,
        lights: light_stats,
    })
}

/// Indirect arguments and packed patches for `target`, for the current frame
pub fn consume_draw(
    context: &TerrainRenderContext,
    target: DrawTarget,
) -> TerrainResult<DrawPacket<'_>> {
    let resources = match target {
        DrawTarget::MainCamera => &context.main_view,
        DrawTarget::DirectionalLight(index) => {
            context
                .shadow_views
                .get(index)
                .ok_or_else(|| TerrainError::DrawTargetOutOfRange {
                    target: target.to_string(),
                    count: context.shadow_views.len(),
                })?
        }
    };

    let command = consume(&resources.commands, context.frame)?;
    Ok(DrawPacket {
        frame: context.frame,
        command,
        patches: resources.patches.as_slice(),
    })
}
