//! Indirect Draw Operations - Pure DOP Functions
//!
//! Per frame and per target: copy the static template, then patch the
//! 4-byte instance count from a counter finalized for the same frame. The
//! draw side only reads arguments stamped with its own frame.

use super::indirect_data::{
    DrawIndexedArguments, DrawTarget, IndexBufferView, IndirectCommandBuffer, IndirectDrawCommand,
    VertexBufferView, INDEX_FORMAT_U32, INSTANCE_COUNT_OFFSET, INSTANCE_COUNT_PLACEHOLDER,
};
use crate::culling::VisiblePatchCounter;
use crate::error::{TerrainError, TerrainResult};
use std::fmt;

impl fmt::Display for DrawTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawTarget::MainCamera => write!(f, "main camera"),
            DrawTarget::DirectionalLight(index) => write!(f, "directional light {}", index),
        }
    }
}

/// Build the static template for a u32-indexed mesh
pub fn create_command_template(
    vertex_buffer: VertexBufferView,
    index_location: u64,
    index_count: u32,
) -> IndirectDrawCommand {
    IndirectDrawCommand {
        vertex_buffer,
        index_buffer: IndexBufferView {
            buffer_location: index_location,
            size_in_bytes: index_count * std::mem::size_of::<u32>() as u32,
            format: INDEX_FORMAT_U32,
        },
        draw: DrawIndexedArguments {
            index_count_per_instance: index_count,
            instance_count: INSTANCE_COUNT_PLACEHOLDER,
            start_index_location: 0,
            base_vertex_location: 0,
            start_instance_location: 0,
        },
        _padding: 0,
    }
}

pub fn create_command_buffer(target: DrawTarget) -> IndirectCommandBuffer {
    IndirectCommandBuffer {
        target,
        command: IndirectDrawCommand::default(),
        written_frame: None,
    }
}

/// Step 1: restore the template (instance count back to the placeholder)
pub fn copy_template(buffer: &mut IndirectCommandBuffer, template: &IndirectDrawCommand) {
    buffer.command = *template;
    buffer.command.draw.instance_count = INSTANCE_COUNT_PLACEHOLDER;
    buffer.written_frame = None;
}

/// Step 2: overwrite only the instance count field
///
/// The counter must have been finalized for `frame`.
pub fn patch_instance_count(
    buffer: &mut IndirectCommandBuffer,
    counter: &VisiblePatchCounter,
    frame: u64,
) -> TerrainResult<()> {
    if counter.frame != frame {
        return Err(TerrainError::CounterNotFinalized {
            target: buffer.target.to_string(),
            frame,
        });
    }

    let bytes = bytemuck::bytes_of_mut(&mut buffer.command);
    bytes[INSTANCE_COUNT_OFFSET..INSTANCE_COUNT_OFFSET + 4]
        .copy_from_slice(&counter.count.to_ne_bytes());
    buffer.written_frame = Some(frame);
    Ok(())
}

/// Draw-side read of the arguments for `frame`
pub fn consume(buffer: &IndirectCommandBuffer, frame: u64) -> TerrainResult<&IndirectDrawCommand> {
    if buffer.written_frame != Some(frame) {
        return Err(TerrainError::StaleIndirectArguments {
            target: buffer.target.to_string(),
            expected: frame,
            found: buffer.written_frame,
        });
    }
    Ok(&buffer.command)
}

/// Raw command bytes as uploaded
pub fn command_bytes(buffer: &IndirectCommandBuffer) -> &[u8] {
    bytemuck::bytes_of(&buffer.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> IndirectDrawCommand {
        let vertex = VertexBufferView {
            buffer_location: 0x1000,
            size_in_bytes: 64 * 289,
            stride_in_bytes: 64,
        };
        create_command_template(vertex, 0x8000, 1536)
    }

    #[test]
    fn test_patch_touches_only_instance_count() {
        let template = template();
        let mut buffer = create_command_buffer(DrawTarget::MainCamera);
        copy_template(&mut buffer, &template);
        let before = command_bytes(&buffer).to_vec();

        patch_instance_count(&mut buffer, &VisiblePatchCounter { count: 42, frame: 3 }, 3).unwrap();
        let after = command_bytes(&buffer);

        for (i, (a, b)) in before.iter().zip(after).enumerate() {
            if !(INSTANCE_COUNT_OFFSET..INSTANCE_COUNT_OFFSET + 4).contains(&i) {
                assert_eq!(a, b, "byte {} changed", i);
            }
        }
        assert_eq!(consume(&buffer, 3).unwrap().draw.instance_count, 42);
        assert_eq!(buffer.command.index_buffer.size_in_bytes, 1536 * 4);
    }

    #[test]
    fn test_counter_from_other_frame_rejected() {
        let mut buffer = create_command_buffer(DrawTarget::DirectionalLight(0));
        copy_template(&mut buffer, &template());
        let err = patch_instance_count(&mut buffer, &VisiblePatchCounter { count: 5, frame: 1 }, 2)
            .unwrap_err();
        assert!(matches!(err, TerrainError::CounterNotFinalized { frame: 2, .. }));
        assert_eq!(buffer.command.draw.instance_count, INSTANCE_COUNT_PLACEHOLDER);
    }

    #[test]
    fn test_stale_arguments_not_consumable() {
        let mut buffer = create_command_buffer(DrawTarget::MainCamera);
        assert!(consume(&buffer, 0).is_err());

        copy_template(&mut buffer, &template());
        patch_instance_count(&mut buffer, &VisiblePatchCounter { count: 9, frame: 1 }, 1).unwrap();

        // Next frame: template copied but count not yet patched
        copy_template(&mut buffer, &template());
        let err = consume(&buffer, 2).unwrap_err();
        assert!(matches!(
            err,
            TerrainError::StaleIndirectArguments { expected: 2, found: None, .. }
        ));

        patch_instance_count(&mut buffer, &VisiblePatchCounter { count: 0, frame: 2 }, 2).unwrap();
        assert_eq!(consume(&buffer, 2).unwrap().draw.instance_count, 0);
        assert!(consume(&buffer, 1).is_err());
    }

    #[test]
    fn test_target_names() {
        assert_eq!(DrawTarget::MainCamera.to_string(), "main camera");
        assert_eq!(DrawTarget::DirectionalLight(2).to_string(), "directional light 2");
    }
}
