//! Core data structures and error types for terratin
//!
//! This crate provides the fundamental types shared across the terratin
//! workspace: the heightmap sample container, the extracted terrain mesh,
//! and the library error type.

pub mod error;
pub mod heightmap;
pub mod mesh;

pub use error::*;
pub use heightmap::*;
pub use mesh::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector2, Vector3};
