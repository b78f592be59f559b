//! Fly a camera across a procedural terrain and log what each frame draws.
//!
//! Usage: cargo run --example terrain_flythrough [config.toml] [heightmap.png]

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};
use hearth_terrain::camera::{init_camera, move_forward, rotate};
use hearth_terrain::clipmap::draw_counts;
use hearth_terrain::heightmap::{create_heightmap, load_heightmap};
use hearth_terrain::{
    consume_draw, create_clipmap, create_render_context, cull_frame, snap, update_terrain,
    DirectionalLight, DrawTarget, HeightEncoding, Heightmap, TerrainConfig,
};
use std::path::Path;

const FRAME_COUNT: u32 = 120;

fn procedural_heightmap(size: u32) -> Result<Heightmap> {
    let texels = (0..size * size)
        .map(|i| {
            let x = (i % size) as f32 / size as f32;
            let z = (i / size) as f32 / size as f32;
            let ridges = (x * 9.0).sin() * (z * 7.0).cos() * 0.2;
            let swell = ((x - 0.5).powi(2) + (z - 0.5).powi(2)).sqrt() * 0.4;
            (0.4 + ridges + swell).clamp(0.0, 1.0)
        })
        .collect();
    Ok(create_heightmap(size, size, texels)?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => TerrainConfig::load(Path::new(path))
            .with_context(|| format!("loading terrain config {}", path))?,
        None => TerrainConfig::default(),
    };
    let heightmap = match args.get(2) {
        Some(path) => load_heightmap(Path::new(path), HeightEncoding::default())
            .with_context(|| format!("loading heightmap {}", path))?,
        None => procedural_heightmap(config.terrain_size as u32 + 1)?,
    };

    let mut context = create_render_context(config.clone())?;
    update_terrain(&mut context, &heightmap)?;
    let mut clipmap = create_clipmap(&config.clipmap)?;

    let sun = DirectionalLight {
        direction: Vec3::new(0.4, -1.0, 0.3),
        ..Default::default()
    };

    let mut camera = init_camera(Vec3::new(64.0, 120.0, 64.0), 0.8, -0.35);
    for _ in 0..FRAME_COUNT {
        camera = move_forward(&camera, 6.0);
        camera = rotate(&camera, 0.01, 0.0);

        let stats = cull_frame(&mut context, &camera, &[sun])?;
        let main = consume_draw(&context, DrawTarget::MainCamera)?;
        let shadow = consume_draw(&context, DrawTarget::DirectionalLight(0))?;

        let resnapped = snap(&mut clipmap, Vec2::new(camera.position.x, camera.position.z));
        let counts = draw_counts(&clipmap);

        log::info!(
            "[Flythrough] Frame {}: {} nodes, {} patches ({} shadow), {} resnaps, {} tiles",
            stats.frame,
            stats.main.traversal.final_nodes,
            main.command.draw.instance_count,
            shadow.command.draw.instance_count,
            resnapped.count(),
            counts.tiles
        );
    }

    Ok(())
}
