//! Right-triangulated irregular network (RTIN) meshing
//!
//! This crate turns a square heightfield tile into an adaptive triangle mesh
//! that stays within a caller-supplied vertical error tolerance, following
//! the RTIN scheme (<https://www.cs.ubc.ca/~will/papers/rtin.pdf>): a binary
//! hierarchy of right triangles over a `2^n + 1` sample grid, refined only
//! where the terrain demands it and guaranteed free of T-junctions.
//!
//! A [`TileGrid`] precomputes the triangle hierarchy once per grid size; a
//! [`Tile`] binds terrain samples to it and extracts meshes at any number of
//! error thresholds.

pub mod grid;
pub mod tile;

pub use grid::*;
pub use tile::*;
