//! # terratin
//!
//! Adaptive level-of-detail meshing for square heightfield tiles.
//!
//! terratin approximates a `2^n + 1` sample grid with the fewest right
//! triangles that stay within a vertical error tolerance, using the
//! right-triangulated irregular network (RTIN) scheme. The output is always
//! a conforming triangulation with no cracks or T-junctions, and its borders
//! line up with neighbouring tiles meshed at any tolerance.
//!
//! The work splits across two crates, re-exported here:
//!
//! - **terratin-core**: heightmap and mesh data structures, error types
//! - **terratin-rtin**: the triangle hierarchy and the extraction engine
//!
//! ## Quick Start
//!
//! ```rust
//! use terratin::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // One grid per tile size, reused across tiles
//! let grid = TileGrid::new(257)?;
//!
//! // Bind a heightmap to the grid and extract meshes at any tolerance
//! let heightmap = Heightmap::from_fn(257, |x, y| (x as f32 / 16.0).sin() * y as f32);
//! let tile = grid.create_tile(heightmap.as_ref())?;
//!
//! let detailed = tile.get_mesh(0.5);
//! let coarse = tile.get_mesh(20.0);
//! assert!(coarse.triangle_count() <= detailed.triangle_count());
//! # Ok(())
//! # }
//! ```

pub use terratin_core::*;

pub use terratin_rtin as rtin;

/// Convenient imports for common use cases
pub mod prelude {
    pub use terratin_core::*;
    pub use terratin_rtin::*;
}
