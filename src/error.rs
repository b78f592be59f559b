//! Error handling for the terrain core
//!
//! One error type for every fallible terrain operation. Sampling outside the
//! heightmap is not an error (it returns sentinels); these variants cover
//! configuration, asset input and frame-ordering violations.

use std::path::{Path, PathBuf};

/// Main error type for terrain operations
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Heightmap too small: {width}x{height} (min 2x2)")]
    HeightmapTooSmall { width: u32, height: u32 },

    #[error("Heightmap data mismatch: expected {expected} texels, found {found}")]
    HeightmapDataMismatch { expected: usize, found: usize },

    #[error("Node index out of range: mip {mip}, index {index}")]
    NodeIndexOutOfRange { mip: u32, index: u64 },

    #[error("Buffer '{buffer}' overflow: capacity {capacity}, requested {requested}")]
    BufferOverflow {
        buffer: String,
        capacity: usize,
        requested: usize,
    },

    #[error("Visible patch counter for {target} not finalized for frame {frame}")]
    CounterNotFinalized { target: String, frame: u64 },

    #[error("Indirect args for {target} are stale: expected frame {expected}, found {found:?}")]
    StaleIndirectArguments {
        target: String,
        expected: u64,
        found: Option<u64>,
    },

    #[error("Terrain has not been built; call update_terrain first")]
    TerrainNotBuilt,

    #[error("Draw target {target} out of range ({count} shadow views)")]
    DrawTargetOutOfRange { target: String, count: usize },
}

/// Type alias for Results in the terrain core
pub type TerrainResult<T> = Result<T, TerrainError>;

/// Attach a path to IO errors
pub trait ErrorContext<T> {
    fn with_path(self, path: &Path) -> TerrainResult<T>;
}

impl<T> ErrorContext<T> for Result<T, std::io::Error> {
    fn with_path(self, path: &Path) -> TerrainResult<T> {
        self.map_err(|source| TerrainError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Build an `InvalidConfig` error
pub fn invalid_config(
    field: &str,
    value: impl std::fmt::Display,
    reason: &str,
) -> TerrainError {
    TerrainError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
