//! Clipmap archetype meshes
//!
//! With tile resolution `T` a ring is `4T + 1` cells wide: 4x4 tiles of `T`
//! cells plus one filler cell column and row through the centre. The next
//! coarser ring's hole is `4T + 2` cells of this ring wide, which the trim
//! covers on two sides.

use super::clipmap_data::{ClipmapMesh, ClipmapMeshes};

/// Vertices per edge of the next ring's hole, in this ring's cells
pub fn hole_vertex_resolution(tile_resolution: u32) -> u32 {
    tile_resolution * 4 + 2
}

fn push_vertex(mesh: &mut ClipmapMesh, x: f32, z: f32) -> u32 {
    mesh.vertices.push([x, z]);
    mesh.vertices.len() as u32 - 1
}

/// Push a triangle, flipped if needed so it faces +y
fn push_triangle(mesh: &mut ClipmapMesh, a: u32, b: u32, c: u32) {
    let p = |i: u32| mesh.vertices[i as usize];
    let (pa, pb, pc) = (p(a), p(b), p(c));
    let cross = (pb[0] - pa[0]) * (pc[1] - pa[1]) - (pb[1] - pa[1]) * (pc[0] - pa[0]);
    if cross > 0.0 {
        mesh.indices.extend_from_slice(&[a, c, b]);
    } else {
        mesh.indices.extend_from_slice(&[a, b, c]);
    }
}

fn push_quad(mesh: &mut ClipmapMesh, a0: u32, a1: u32, b0: u32, b1: u32) {
    push_triangle(mesh, a0, a1, b0);
    push_triangle(mesh, b0, a1, b1);
}

/// Strip of quads between consecutive rail pairs
fn push_strip(
    mesh: &mut ClipmapMesh,
    rails: impl IntoIterator<Item = [[f32; 2]; 2]>,
    skip: Option<usize>,
) {
    let mut previous: Option<(u32, u32)> = None;
    for (step, [a, b]) in rails.into_iter().enumerate() {
        let a = push_vertex(mesh, a[0], a[1]);
        let b = push_vertex(mesh, b[0], b[1]);
        if let Some((pa, pb)) = previous {
            if skip != Some(step - 1) {
                push_quad(mesh, pa, pb, a, b);
            }
        }
        previous = Some((a, b));
    }
}

/// T x T grid with its corner at the origin
pub fn generate_tile(tile_resolution: u32) -> ClipmapMesh {
    let row = tile_resolution + 1;
    let mut mesh = ClipmapMesh::default();
    for z in 0..row {
        for x in 0..row {
            push_vertex(&mut mesh, x as f32, z as f32);
        }
    }
    for z in 0..tile_resolution {
        for x in 0..tile_resolution {
            let i = z * row + x;
            push_quad(&mut mesh, i, i + 1, i + row, i + row + 1);
        }
    }
    mesh
}

/// One-cell strips through the outer tiles of a ring along both axes
pub fn generate_filler(tile_resolution: u32) -> ClipmapMesh {
    let t = tile_resolution as f32;
    let steps = 0..=tile_resolution;
    let mut mesh = ClipmapMesh::default();
    let ahead = |i: u32| t + 1.0 + i as f32;
    let behind = |i: u32| -(t + i as f32);
    push_strip(&mut mesh, steps.clone().map(|i| [[ahead(i), 0.0], [ahead(i), 1.0]]), None);
    push_strip(&mut mesh, steps.clone().map(|i| [[0.0, ahead(i)], [1.0, ahead(i)]]), None);
    push_strip(&mut mesh, steps.clone().map(|i| [[behind(i), 0.0], [behind(i), 1.0]]), None);
    push_strip(&mut mesh, steps.map(|i| [[0.0, behind(i)], [1.0, behind(i)]]), None);
    mesh
}

/// Centre cross of the finest ring
///
/// Spans the whole ring so the finest level needs no filler.
pub fn generate_cross(tile_resolution: u32) -> ClipmapMesh {
    let half = 2 * tile_resolution;
    let steps = 0..=(2 * half + 1);
    let mut mesh = ClipmapMesh::default();
    let offset = |i: u32| i as f32 - half as f32;
    push_strip(&mut mesh, steps.clone().map(|i| [[offset(i), 0.0], [offset(i), 1.0]]), None);
    // Centre cell already covered by the horizontal arm
    push_strip(
        &mut mesh,
        steps.map(|i| [[0.0, offset(i)], [1.0, offset(i)]]),
        Some(half as usize),
    );
    mesh
}

/// L-shaped strip along -x and -z of the hole, centred on the origin
pub fn generate_trim(tile_resolution: u32) -> ClipmapMesh {
    let n = hole_vertex_resolution(tile_resolution);
    let mut mesh = ClipmapMesh::default();
    push_strip(&mut mesh, (0..=n).map(|i| [[0.0, (n - i) as f32], [1.0, (n - i) as f32]]), None);
    push_strip(&mut mesh, (1..=n).map(|i| [[i as f32, 0.0], [i as f32, 1.0]]), None);

    let centre = 0.5 * (n + 1) as f32;
    for vertex in &mut mesh.vertices {
        vertex[0] -= centre;
        vertex[1] -= centre;
    }
    mesh
}

/// Degenerate triangles around the hole border, closing T-junctions
pub fn generate_seam(tile_resolution: u32) -> ClipmapMesh {
    let n = hole_vertex_resolution(tile_resolution);
    let nf = n as f32;
    let mut mesh = ClipmapMesh::default();
    for i in 0..n {
        push_vertex(&mut mesh, i as f32, 0.0);
    }
    for i in 0..n {
        push_vertex(&mut mesh, nf, i as f32);
    }
    for i in 0..n {
        push_vertex(&mut mesh, nf - i as f32, nf);
    }
    for i in 0..n {
        push_vertex(&mut mesh, 0.0, nf - i as f32);
    }

    let count = 4 * n;
    for i in (0..count).step_by(2) {
        mesh.indices.extend_from_slice(&[i + 1, i, (i + 2) % count]);
    }
    mesh
}

/// Build all archetypes for one tile resolution
pub fn generate(tile_resolution: u32) -> ClipmapMeshes {
    let meshes = ClipmapMeshes {
        tile: generate_tile(tile_resolution),
        filler: generate_filler(tile_resolution),
        trim: generate_trim(tile_resolution),
        cross: generate_cross(tile_resolution),
        seam: generate_seam(tile_resolution),
    };

    log::info!(
        "[Clipmap::generate] T={}: tile {} / filler {} / trim {} / cross {} / seam {} indices",
        tile_resolution,
        meshes.tile.indices.len(),
        meshes.filler.indices.len(),
        meshes.trim.indices.len(),
        meshes.cross.indices.len(),
        meshes.seam.indices.len()
    );

    meshes
}
