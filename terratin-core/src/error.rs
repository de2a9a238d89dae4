//! Error types for terratin

use thiserror::Error;

/// Errors reported while binding terrain data to a tile grid.
///
/// All validation happens at construction time; once a grid and a tile are
/// built, the error sweep and mesh extraction are total functions of their
/// inputs and cannot fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("grid size must be 2^n+1 for n >= 1, got {grid_size}")]
    InvalidGridSize { grid_size: u32 },

    #[error("expected {expected} height samples for a {grid_size}x{grid_size} grid, got {actual}")]
    HeightmapSizeMismatch {
        grid_size: u32,
        expected: usize,
        actual: usize,
    },
}

/// Result type alias for terratin operations
pub type Result<T> = std::result::Result<T, Error>;
