//! Implicit binary triangle tree over a square tile
//!
//! A tile of side `T = grid_size - 1` (a power of two) is covered by two
//! large right triangles, each of which splits along its hypotenuse into two
//! smaller right triangles, down to single-pixel leaves. The whole hierarchy
//! is addressed by integer ids without allocating any nodes: ids 2 and 3 are
//! the two roots, each halving of the triangles doubles the id range, and an
//! id's bits encode its chain of splits. Iterating ids in descending order
//! therefore visits every triangle before its parent, which is all the error
//! sweep needs.

use log::debug;
use terratin_core::{Error, Result};

use crate::tile::Tile;

/// Hypotenuse midpoint of the triangle with leg endpoints `a` and `b`.
///
/// Exact in integers: every hypotenuse in the hierarchy has endpoints whose
/// coordinate sums are even.
#[inline]
pub(crate) fn midpoint(a: [usize; 2], b: [usize; 2]) -> [usize; 2] {
    [(a[0] + b[0]) / 2, (a[1] + b[1]) / 2]
}

/// Right-angle apex of the triangle with stored leg endpoints `a` and `b`:
/// the vector from the hypotenuse midpoint to `a`, rotated 90 degrees around
/// that midpoint. Only `a` and `b` are stored per triangle; the apex is
/// recovered through this identity wherever it is needed.
#[inline]
pub(crate) fn apex(a: [usize; 2], b: [usize; 2]) -> [usize; 2] {
    let m = midpoint(a, b);
    [m[0] + m[1] - a[1], m[1] + a[0] - m[0]]
}

/// Precomputed triangle hierarchy for one grid size.
///
/// Construction walks every triangle id once and records the two leg
/// endpoints in a flat `u16` table; everything else about a triangle is
/// recovered arithmetically. A `TileGrid` is immutable after construction
/// and can be shared freely, including across threads, by any number of
/// tiles of the same size.
#[derive(Debug, Clone)]
pub struct TileGrid {
    grid_size: u32,
    num_triangles: usize,
    num_parent_triangles: usize,
    coords: Vec<u16>,
}

impl TileGrid {
    /// Build the triangle coordinate table for `grid_size` sample points per
    /// side.
    ///
    /// `grid_size` must be `2^n + 1` for `n >= 1`, and small enough that
    /// coordinates fit the `u16` table (up to 32769).
    pub fn new(grid_size: u32) -> Result<Self> {
        if grid_size < 3
            || !(grid_size - 1).is_power_of_two()
            || grid_size - 1 > u32::from(u16::MAX)
        {
            return Err(Error::InvalidGridSize { grid_size });
        }

        let tile_size = (grid_size - 1) as usize;
        let num_triangles = 2 * tile_size * tile_size - 2;
        let num_parent_triangles = num_triangles - tile_size * tile_size;

        let mut coords = vec![0u16; num_triangles * 4];
        for i in 0..num_triangles {
            let (a, b) = leg_endpoints(i + 2, tile_size);
            coords[i * 4] = a[0] as u16;
            coords[i * 4 + 1] = a[1] as u16;
            coords[i * 4 + 2] = b[0] as u16;
            coords[i * 4 + 3] = b[1] as u16;
        }

        debug!("built coordinate table for {num_triangles} triangles (grid size {grid_size})");

        Ok(Self {
            grid_size,
            num_triangles,
            num_parent_triangles,
            coords,
        })
    }

    /// Number of sample points per tile side.
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Tile side length in cells (always a power of two).
    pub fn tile_size(&self) -> u32 {
        self.grid_size - 1
    }

    /// Total number of triangles in the hierarchy.
    pub fn num_triangles(&self) -> usize {
        self.num_triangles
    }

    /// Number of internal (splittable into stored children) triangles; the
    /// remaining `tile_size^2` entries of the table are leaves.
    pub fn num_parent_triangles(&self) -> usize {
        self.num_parent_triangles
    }

    /// Leg endpoints of the triangle at table position `i` (id `i + 2`).
    pub(crate) fn legs(&self, i: usize) -> ([usize; 2], [usize; 2]) {
        let k = i * 4;
        (
            [self.coords[k] as usize, self.coords[k + 1] as usize],
            [self.coords[k + 2] as usize, self.coords[k + 3] as usize],
        )
    }

    /// Bind a terrain sample buffer to this grid, computing its error field.
    ///
    /// `terrain` must hold `grid_size^2` row-major samples.
    pub fn create_tile<'a>(&'a self, terrain: &'a [f32]) -> Result<Tile<'a>> {
        Tile::new(self, terrain)
    }
}

/// Leg endpoints of triangle `id`, found by walking the id's bits from the
/// root downward. The id's parity selects the root half of the tile; each
/// further bit selects the left or right child of the previous triangle,
/// whose apex becomes one leg endpoint and whose hypotenuse midpoint becomes
/// the new apex.
fn leg_endpoints(mut id: usize, tile_size: usize) -> ([usize; 2], [usize; 2]) {
    let t = tile_size;
    let (mut a, mut b, mut c) = if id & 1 == 1 {
        // bottom-left half, hypotenuse on the main diagonal
        ([0, 0], [t, t], [t, 0])
    } else {
        // top-right half
        ([t, t], [0, 0], [0, t])
    };

    loop {
        id >>= 1;
        if id <= 1 {
            break;
        }
        let m = midpoint(a, b);
        if id & 1 == 1 {
            // left child
            b = a;
            a = c;
        } else {
            // right child
            a = b;
            b = c;
        }
        c = m;
    }

    (a, b)
}
