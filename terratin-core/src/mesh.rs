//! Terrain mesh data structures

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::heightmap::Heightmap;

/// An indexed triangle mesh over a terrain tile.
///
/// `vertices` is a flat buffer of `(x, y)` pairs in grid coordinates;
/// `triangles` is a flat buffer of 0-based index triples into the vertex
/// buffer. Winding follows the order the extraction recursion emits and is
/// consistent across the mesh but not uniformly CW or CCW; callers that need
/// a fixed orientation must reorient by the sign of the 2D cross product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainMesh {
    pub vertices: Vec<u16>,
    pub triangles: Vec<u32>,
}

impl TerrainMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }

    /// Iterate over vertex positions in grid coordinates
    pub fn positions(&self) -> impl Iterator<Item = Point2<u16>> + '_ {
        self.vertices
            .chunks_exact(2)
            .map(|v| Point2::new(v[0], v[1]))
    }

    /// Iterate over triangles as vertex-index triples
    pub fn faces(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.triangles.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Elevate the grid-space vertices against a heightmap, producing
    /// `(x, y, height)` positions in grid units.
    ///
    /// The heightmap must cover the tile the mesh was extracted from;
    /// indexing out of its bounds is a programming error and panics.
    pub fn positions_3d(&self, heightmap: &Heightmap) -> Vec<Point3<f32>> {
        self.positions()
            .map(|p| {
                let height = heightmap.get(u32::from(p.x), u32::from(p.y));
                Point3::new(f32::from(p.x), f32::from(p.y), height)
            })
            .collect()
    }

    /// Vertex buffer as raw bytes, ready for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes, ready for GPU upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}
