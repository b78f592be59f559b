/// Indirect Module - indirect draw command assembly
///
/// - indirect_data.rs: command-signature records and per-target buffers
/// - indirect_operations.rs: template copy, instance-count patch, consume

pub mod indirect_data;
pub mod indirect_operations;

pub use indirect_data::{
    DrawIndexedArguments, DrawTarget, IndexBufferView, IndirectCommandBuffer, IndirectDrawCommand,
    VertexBufferView, INDEX_FORMAT_U32, INSTANCE_COUNT_OFFSET,
    INSTANCE_COUNT_PLACEHOLDER,
};
pub use indirect_operations::{
    command_bytes, consume, copy_template, create_command_buffer, create_command_template,
    patch_instance_count,
};
