//! End-to-end terrain frames through the public API

use glam::Vec3;
use hearth_terrain::camera::init_camera;
use hearth_terrain::culling::region_height_bounds;
use hearth_terrain::heightmap::create_heightmap;
use hearth_terrain::indirect::INSTANCE_COUNT_PLACEHOLDER;
use hearth_terrain::quadtree::{
    child_indices, specific_mip_level_node_in_array_offset, specific_mip_level_width,
    to_mip_level_node_count,
};
use hearth_terrain::{
    consume_draw, create_render_context, cull_frame, update_terrain, DirectionalLight, DrawTarget,
    Heightmap, TerrainConfig, TerrainError,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn rolling_hills(size: u32) -> Heightmap {
    let texels = (0..size * size)
        .map(|i| {
            let x = (i % size) as f32 / size as f32;
            let z = (i / size) as f32 / size as f32;
            0.5 + 0.25 * (x * 6.0).sin() * (z * 4.0).cos()
        })
        .collect();
    create_heightmap(size, size, texels).unwrap()
}

#[test]
fn full_terrain_node_array_has_exact_length() {
    let config = TerrainConfig::default();
    assert_eq!(config.terrain_size, 1024.0);
    assert_eq!(config.mip_level_count, 6);
    assert_eq!(specific_mip_level_width(config.terrain_size, 0), 128.0);

    let mut context = create_render_context(config).unwrap();
    assert!(update_terrain(&mut context, &rolling_hills(1025)).unwrap());

    let terrain = context.terrain.as_ref().unwrap();
    assert_eq!(terrain.quadtree.nodes.len() as u32, to_mip_level_node_count(5));
    assert_eq!(terrain.quadtree.nodes.len(), 87_360);
}

#[test]
fn leaving_the_terrain_zeroes_the_instance_count() {
    let mut context = create_render_context(TerrainConfig::default()).unwrap();
    update_terrain(&mut context, &rolling_hills(257)).unwrap();

    // Frame 1: looking down onto the terrain
    let camera = init_camera(Vec3::new(512.0, 400.0, 512.0), 0.7, -1.0);
    let stats = cull_frame(&mut context, &camera, &[]).unwrap();
    assert!(stats.main.instance_count > 0);
    let draw = consume_draw(&context, DrawTarget::MainCamera).unwrap();
    assert_eq!(draw.frame, 1);
    assert_eq!(draw.command.draw.instance_count, stats.main.instance_count);

    // Frame 2: far away, looking further away
    let camera = init_camera(Vec3::new(5000.0, 50.0, 5000.0), 0.0, 0.0);
    let stats = cull_frame(&mut context, &camera, &[]).unwrap();
    assert_eq!(stats.main.traversal.final_nodes, 0);
    assert_eq!(stats.main.patches.visible, 0);

    let draw = consume_draw(&context, DrawTarget::MainCamera).unwrap();
    assert_eq!(draw.frame, 2);
    assert!(draw.patches.is_empty());
    assert_eq!(draw.command.draw.instance_count, 0);
    assert_ne!(draw.command.draw.instance_count, INSTANCE_COUNT_PLACEHOLDER);
}

#[test]
fn shadow_view_draws_what_the_light_sees() {
    let config = TerrainConfig {
        max_shadow_lights: 2,
        ..Default::default()
    };
    let mut context = create_render_context(config).unwrap();
    update_terrain(&mut context, &rolling_hills(257)).unwrap();

    let camera = init_camera(Vec3::new(100.0, 60.0, 100.0), 0.8, -0.3);
    let overhead = DirectionalLight {
        direction: Vec3::new(0.0, -1.0, 0.0),
        shadow_half_extent: 600.0,
        ..Default::default()
    };
    let lights = [overhead, DirectionalLight::default()];
    let stats = cull_frame(&mut context, &camera, &lights).unwrap();
    assert_eq!(stats.lights.len(), 2);

    for index in 0..2 {
        let draw = consume_draw(&context, DrawTarget::DirectionalLight(index)).unwrap();
        assert_eq!(draw.command.draw.instance_count as usize, draw.patches.len());
        assert_eq!(draw.command.draw.instance_count, stats.lights[index].instance_count);
    }
    assert!(stats.lights[0].instance_count > 0);
}

#[test]
fn cull_frame_requires_terrain() {
    let mut context = create_render_context(TerrainConfig::default()).unwrap();
    let camera = init_camera(Vec3::new(0.0, 10.0, 0.0), 0.0, 0.0);
    assert!(matches!(
        cull_frame(&mut context, &camera, &[]),
        Err(TerrainError::TerrainNotBuilt)
    ));
    assert!(consume_draw(&context, DrawTarget::MainCamera).is_err());
}

#[test]
fn random_terrain_bounds_nest_and_stay_conservative() {
    let mut rng = StdRng::seed_from_u64(0x7e44a1);
    let size = 129;
    let texels = (0..size * size).map(|_| rng.gen_range(0.0..1.0)).collect();
    let heightmap = create_heightmap(size, size, texels).unwrap();

    let config = TerrainConfig {
        mip_level_count: 4,
        height_scale: 50.0,
        ..Default::default()
    };
    let mut context = create_render_context(config).unwrap();
    update_terrain(&mut context, &heightmap).unwrap();
    let terrain = context.terrain.as_ref().unwrap();
    let tree = &terrain.quadtree;

    for node in &tree.nodes {
        assert!(node.min_height <= node.max_height);

        let (lo, hi) = region_height_bounds(&terrain.pyramid, &terrain.space, node.rect).unwrap();
        assert!(lo <= node.min_height && hi >= node.max_height);

        if node.mip + 1 < tree.mip_count {
            let children = child_indices(node.mip, node.index).map(|child| {
                &tree.nodes[specific_mip_level_node_in_array_offset(node.mip + 1, child) as usize]
            });
            let min = children.iter().map(|c| c.min_height).fold(f32::MAX, f32::min);
            let max = children.iter().map(|c| c.max_height).fold(f32::MIN, f32::max);
            assert_eq!(node.min_height, min);
            assert_eq!(node.max_height, max);
        }
    }
}
