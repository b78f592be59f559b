//! Indirect Draw Data - Pure DOP
//!
//! NO METHODS. Just data.
//! Record layouts follow the indexed-indirect command signature: vertex
//! buffer view, index buffer view, then the draw arguments.

use bytemuck::{Pod, Zeroable};

pub const INDEX_FORMAT_U32: u32 = 1;

/// Written into the template; never valid to draw with
pub const INSTANCE_COUNT_PLACEHOLDER: u32 = u32::MAX;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct VertexBufferView {
    pub buffer_location: u64,
    pub size_in_bytes: u32,
    pub stride_in_bytes: u32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct IndexBufferView {
    pub buffer_location: u64,
    pub size_in_bytes: u32,
    /// INDEX_FORMAT_U32
    pub format: u32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct DrawIndexedArguments {
    pub index_count_per_instance: u32,
    /// Overwritten every frame with the visible patch count
    pub instance_count: u32,
    pub start_index_location: u32,
    pub base_vertex_location: i32,
    pub start_instance_location: u32,
}

/// One command-signature record
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct IndirectDrawCommand {
    pub vertex_buffer: VertexBufferView,
    pub index_buffer: IndexBufferView,
    pub draw: DrawIndexedArguments,
    pub _padding: u32,
}

/// Byte offset of `draw.instance_count` inside a command record
pub const INSTANCE_COUNT_OFFSET: usize = std::mem::offset_of!(IndirectDrawCommand, draw)
    + std::mem::offset_of!(DrawIndexedArguments, instance_count);

static_assertions::const_assert_eq!(std::mem::size_of::<VertexBufferView>(), 16);
static_assertions::const_assert_eq!(std::mem::size_of::<IndexBufferView>(), 16);
static_assertions::const_assert_eq!(std::mem::size_of::<DrawIndexedArguments>(), 20);
static_assertions::const_assert_eq!(std::mem::size_of::<IndirectDrawCommand>(), 56);
static_assertions::const_assert_eq!(INSTANCE_COUNT_OFFSET, 36);

/// Which view a command buffer draws for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawTarget {
    MainCamera,
    DirectionalLight(usize),
}

/// Per-target command buffer
///
/// `written_frame` records the frame whose counter was patched in; it is
/// cleared by every template copy.
#[derive(Debug, Clone, PartialEq)]
pub struct IndirectCommandBuffer {
    pub target: DrawTarget,
    pub command: IndirectDrawCommand,
    pub written_frame: Option<u64>,
}
