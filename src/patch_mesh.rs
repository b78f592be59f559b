//! Reference patch mesh
//!
//! One N x N quad grid over the unit square on the xz plane. Every visible
//! patch instances this mesh, scaled and offset by its `RenderPatch`.
//! The colour channels flag vertices on the -x, +x, -z and +z edges (same
//! order as `RenderPatch::lod_transition`) so the vertex stage can collapse
//! odd edge vertices against a coarser neighbour.

use crate::indirect::VertexBufferView;
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PatchVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 4],
    pub uv0: [f32; 2],
    pub color: [f32; 4],
}

static_assertions::const_assert_eq!(std::mem::size_of::<PatchVertex>(), 64);

#[derive(Debug, Clone, PartialEq)]
pub struct PatchMesh {
    /// Quads per edge
    pub resolution: u32,
    pub vertices: Vec<PatchVertex>,
    pub indices: Vec<u32>,
}

/// Build the grid; counter-clockwise seen from +y
pub fn create_patch_mesh(resolution: u32) -> PatchMesh {
    let n = resolution.max(1);
    let row = n + 1;
    let step = 1.0 / n as f32;

    let mut vertices = Vec::with_capacity((row * row) as usize);
    for z in 0..=n {
        for x in 0..=n {
            let u = x as f32 * step;
            let v = z as f32 * step;
            let edge = |on: bool| if on { 1.0 } else { 0.0 };
            vertices.push(PatchVertex {
                position: [u, 0.0, v],
                normal: [0.0, 1.0, 0.0],
                tangent: [1.0, 0.0, 0.0, 1.0],
                uv0: [u, v],
                color: [edge(x == 0), edge(x == n), edge(z == 0), edge(z == n)],
            });
        }
    }

    let mut indices = Vec::with_capacity((n * n * 6) as usize);
    for z in 0..n {
        for x in 0..n {
            let i = z * row + x;
            indices.extend_from_slice(&[i, i + row, i + 1, i + 1, i + row, i + row + 1]);
        }
    }

    log::info!(
        "[create_patch_mesh] {}x{} grid: {} vertices, {} indices",
        n,
        n,
        vertices.len(),
        indices.len()
    );

    PatchMesh {
        resolution: n,
        vertices,
        indices,
    }
}

pub fn patch_vertex_bytes(mesh: &PatchMesh) -> &[u8] {
    bytemuck::cast_slice(&mesh.vertices)
}

pub fn patch_index_bytes(mesh: &PatchMesh) -> &[u8] {
    bytemuck::cast_slice(&mesh.indices)
}

/// Vertex buffer view for the mesh uploaded at `location`
pub fn patch_vertex_buffer_view(mesh: &PatchMesh, location: u64) -> VertexBufferView {
    VertexBufferView {
        buffer_location: location,
        size_in_bytes: patch_vertex_bytes(mesh).len() as u32,
        stride_in_bytes: std::mem::size_of::<PatchVertex>() as u32,
    }
}
