//! Terrain tiles: error field computation and adaptive mesh extraction

use log::debug;
use terratin_core::{Error, Result, TerrainMesh};

use crate::grid::{apex, midpoint, TileGrid};

/// Thresholds controlling mesh extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    /// Maximum allowed vertical error of the approximation. Zero extracts an
    /// exact triangulation; negative values force the full-resolution mesh.
    pub max_error: f32,
    /// Maximum allowed L1 leg length of emitted triangles, in grid cells.
    /// `None` leaves edge lengths unconstrained. Legs are at least one cell
    /// long, so values below 1.0 behave like 1.0.
    pub max_length: Option<f32>,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            max_error: 0.0,
            max_length: None,
        }
    }
}

/// A terrain sample buffer bound to a [`TileGrid`], with its error field.
///
/// Construction runs one bottom-up sweep over the triangle hierarchy and
/// stores, per grid pixel, the largest vertical error committed by any
/// triangle whose hypotenuse midpoint is that pixel if it were left unsplit.
/// Child errors fold into their parents, so a single threshold comparison at
/// any midpoint accounts for the whole subtree beneath it.
///
/// A tile is immutable after construction; [`Tile::get_mesh`] allocates its
/// own scratch state per call, so tiles sharing one grid may extract meshes
/// concurrently from multiple threads.
///
/// Non-finite samples (NaN or infinity) are not rejected and leave the
/// extraction behaviour undefined.
pub struct Tile<'a> {
    grid: &'a TileGrid,
    terrain: &'a [f32],
    errors: Vec<f32>,
}

impl<'a> Tile<'a> {
    /// Bind `terrain` to `grid` and compute the error field.
    ///
    /// `terrain` must hold exactly `grid_size^2` row-major samples.
    pub fn new(grid: &'a TileGrid, terrain: &'a [f32]) -> Result<Self> {
        let size = grid.grid_size() as usize;
        if terrain.len() != size * size {
            return Err(Error::HeightmapSizeMismatch {
                grid_size: grid.grid_size(),
                expected: size * size,
                actual: terrain.len(),
            });
        }

        let mut tile = Self {
            grid,
            terrain,
            errors: vec![0.0; terrain.len()],
        };
        tile.compute_errors();
        debug!(
            "computed error field over {} samples (grid size {})",
            tile.terrain.len(),
            grid.grid_size()
        );
        Ok(tile)
    }

    /// The grid this tile is bound to.
    pub fn grid(&self) -> &TileGrid {
        self.grid
    }

    /// The terrain samples this tile was built from.
    pub fn terrain(&self) -> &[f32] {
        self.terrain
    }

    /// The per-pixel error field, indexed `y * grid_size + x`.
    pub fn errors(&self) -> &[f32] {
        &self.errors
    }

    /// One bottom-up pass over the whole hierarchy, leaves first. A parent
    /// is visited only after both of its children, so folding the child
    /// midpoints' errors into the parent midpoint sees final child values.
    fn compute_errors(&mut self) {
        let size = self.grid.grid_size() as usize;

        for i in (0..self.grid.num_triangles()).rev() {
            let (a, b) = self.grid.legs(i);
            let m = midpoint(a, b);
            let c = apex(a, b);

            // Height the unsplit triangle would assign to the midpoint,
            // versus what the terrain actually has there
            let interpolated =
                (self.terrain[sample_index(a, size)] + self.terrain[sample_index(b, size)]) / 2.0;
            let mid = sample_index(m, size);
            let error = (interpolated - self.terrain[mid]).abs();
            self.errors[mid] = self.errors[mid].max(error);

            if i < self.grid.num_parent_triangles() {
                let left_mid = sample_index(midpoint(a, c), size);
                let right_mid = sample_index(midpoint(b, c), size);
                self.errors[mid] = self.errors[mid]
                    .max(self.errors[left_mid])
                    .max(self.errors[right_mid]);
            }
        }
    }

    /// Extract an adaptive mesh with the given maximum vertical error.
    pub fn get_mesh(&self, max_error: f32) -> TerrainMesh {
        self.get_mesh_with(&MeshOptions {
            max_error,
            ..MeshOptions::default()
        })
    }

    /// Extract an adaptive mesh honouring both thresholds in `options`.
    ///
    /// The traversal runs twice over the two root triangles: the first pass
    /// assigns dense vertex indices and counts emitted triangles, the second
    /// fills exactly sized buffers. Identical inputs always produce
    /// identical buffers.
    pub fn get_mesh_with(&self, options: &MeshOptions) -> TerrainMesh {
        let size = self.grid.grid_size() as usize;
        let t = size - 1;

        let mut extractor = MeshExtractor {
            errors: &self.errors,
            size,
            max_error: options.max_error,
            // No leg is ever longer than the tile side, so the grid size
            // stands in for "unconstrained"
            max_scale: options.max_length.unwrap_or(size as f32),
            indices: vec![0; size * size],
            vertex_count: 0,
            triangle_count: 0,
            vertices: Vec::new(),
            triangles: Vec::new(),
            cursor: 0,
        };

        extractor.count([0, 0], [t, t], [t, 0]);
        extractor.count([t, t], [0, 0], [0, t]);

        extractor.vertices = vec![0; 2 * extractor.vertex_count as usize];
        extractor.triangles = vec![0; 3 * extractor.triangle_count];
        extractor.fill([0, 0], [t, t], [t, 0]);
        extractor.fill([t, t], [0, 0], [0, t]);

        debug!(
            "extracted {} triangles over {} vertices (max_error {}, max_length {:?})",
            extractor.triangle_count, extractor.vertex_count, options.max_error, options.max_length
        );

        TerrainMesh {
            vertices: extractor.vertices,
            triangles: extractor.triangles,
        }
    }
}

#[inline]
fn sample_index(p: [usize; 2], size: usize) -> usize {
    p[1] * size + p[0]
}

/// Mutable state threaded through the two extraction passes.
///
/// `indices` maps grid pixels to 1-based vertex indices, zero meaning
/// unassigned; emitted indices are 0-based. Both passes make identical split
/// decisions, so the buffers allocated between them are exact.
struct MeshExtractor<'t> {
    errors: &'t [f32],
    size: usize,
    max_error: f32,
    max_scale: f32,
    indices: Vec<u32>,
    vertex_count: u32,
    triangle_count: usize,
    vertices: Vec<u16>,
    triangles: Vec<u32>,
    cursor: usize,
}

impl MeshExtractor<'_> {
    /// Split when the subtree under the hypotenuse midpoint still exceeds
    /// the error budget, or the triangle's legs are longer than allowed.
    /// Unit triangles never split; the recursion bottoms out there.
    fn should_split(&self, a: [usize; 2], c: [usize; 2], m: [usize; 2]) -> bool {
        let leg = a[0].abs_diff(c[0]) + a[1].abs_diff(c[1]);
        leg > 1
            && (self.errors[sample_index(m, self.size)] > self.max_error
                || leg as f32 > self.max_scale)
    }

    fn count(&mut self, a: [usize; 2], b: [usize; 2], c: [usize; 2]) {
        let m = midpoint(a, b);
        if self.should_split(a, c, m) {
            self.count(c, a, m);
            self.count(b, c, m);
        } else {
            for v in [a, b, c] {
                let idx = sample_index(v, self.size);
                if self.indices[idx] == 0 {
                    self.vertex_count += 1;
                    self.indices[idx] = self.vertex_count;
                }
            }
            self.triangle_count += 1;
        }
    }

    fn fill(&mut self, a: [usize; 2], b: [usize; 2], c: [usize; 2]) {
        let m = midpoint(a, b);
        if self.should_split(a, c, m) {
            self.fill(c, a, m);
            self.fill(b, c, m);
        } else {
            let ia = self.indices[sample_index(a, self.size)] - 1;
            let ib = self.indices[sample_index(b, self.size)] - 1;
            let ic = self.indices[sample_index(c, self.size)] - 1;

            for (index, v) in [(ia, a), (ib, b), (ic, c)] {
                self.vertices[2 * index as usize] = v[0] as u16;
                self.vertices[2 * index as usize + 1] = v[1] as u16;
            }

            self.triangles[self.cursor] = ia;
            self.triangles[self.cursor + 1] = ib;
            self.triangles[self.cursor + 2] = ic;
            self.cursor += 3;
        }
    }
}
