//! Fixed-capacity structured buffers
//!
//! Host-side mirror of a GPU structured buffer: storage is allocated once at
//! creation and reused every frame. Exceeding the capacity is a sizing error,
//! not something the frame recovers from.

use crate::error::{TerrainError, TerrainResult};
use bytemuck::Pod;

#[derive(Debug, Clone)]
pub struct StructuredBuffer<T: Pod> {
    label: String,
    capacity: usize,
    data: Vec<T>,
}

impl<T: Pod> StructuredBuffer<T> {
    pub fn new(label: impl Into<String>, capacity: usize) -> Self {
        Self {
            label: label.into(),
            capacity,
            data: Vec::with_capacity(capacity),
        }
    }

    /// Reset the live count without releasing storage
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Append one element (the append-buffer counter increment)
    pub fn push(&mut self, value: T) -> TerrainResult<()> {
        if self.data.len() >= self.capacity {
            return Err(TerrainError::BufferOverflow {
                buffer: self.label.clone(),
                capacity: self.capacity,
                requested: self.data.len() + 1,
            });
        }
        self.data.push(value);
        Ok(())
    }

    /// Replace contents verbatim
    pub fn write(&mut self, values: &[T]) -> TerrainResult<()> {
        if values.len() > self.capacity {
            return Err(TerrainError::BufferOverflow {
                buffer: self.label.clone(),
                capacity: self.capacity,
                requested: values.len(),
            });
        }
        self.data.clear();
        self.data.extend_from_slice(values);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Bytes of the live elements, as they would be uploaded
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Size of the whole allocation in bytes
    pub fn allocation_size(&self) -> usize {
        self.capacity * std::mem::size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut buffer = StructuredBuffer::<u32>::new("counter", 2);
        buffer.push(1).unwrap();
        buffer.push(2).unwrap();
        let err = buffer.push(3).unwrap_err();
        assert!(matches!(err, TerrainError::BufferOverflow { capacity: 2, requested: 3, .. }));
        assert_eq!(buffer.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_clear_keeps_storage() {
        let mut buffer = StructuredBuffer::<[f32; 4]>::new("patches", 8);
        buffer.write(&[[1.0; 4]; 8]).unwrap();
        assert_eq!(buffer.as_bytes().len(), 128);
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.allocation_size(), 128);
        assert!(buffer.write(&[[0.0; 4]; 9]).is_err());
    }
}
