//! Integration tests for terratin-rtin
//!
//! End-to-end checks of the grid/tile pipeline through the public API,
//! covering reference meshes for tiny tiles as well as conformity and
//! threshold monotonicity on rough terrain.

use std::collections::HashSet;

use terratin_core::{Error, TerrainMesh};
use terratin_rtin::{MeshOptions, TileGrid};

fn wave_terrain(size: usize, amplitude: f32) -> Vec<f32> {
    let n = (size - 1) as f32;
    let mut terrain = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / n * std::f32::consts::PI * 2.0;
            let fy = y as f32 / n * std::f32::consts::PI * 2.0;
            terrain.push(fx.sin() * fy.sin() * amplitude);
        }
    }
    terrain
}

fn vertex_set(mesh: &TerrainMesh) -> HashSet<(u16, u16)> {
    mesh.positions().map(|p| (p.x, p.y)).collect()
}

/// No mesh vertex may lie strictly inside any emitted edge; that is exactly
/// a T-junction, which the shared split predicate rules out.
fn assert_crack_free(mesh: &TerrainMesh) {
    let positions: Vec<(i64, i64)> = mesh
        .positions()
        .map(|p| (i64::from(p.x), i64::from(p.y)))
        .collect();

    let mut edges = HashSet::new();
    for [a, b, c] in mesh.faces() {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            edges.insert(if u < v { (u, v) } else { (v, u) });
        }
    }

    for &(u, v) in &edges {
        let p = positions[u as usize];
        let q = positions[v as usize];
        for (w, &r) in positions.iter().enumerate() {
            if w == u as usize || w == v as usize {
                continue;
            }
            let cross = (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0);
            if cross != 0 {
                continue;
            }
            let dot = (r.0 - p.0) * (q.0 - p.0) + (r.1 - p.1) * (q.1 - p.1);
            let len2 = (q.0 - p.0).pow(2) + (q.1 - p.1).pow(2);
            assert!(
                dot <= 0 || dot >= len2,
                "vertex {r:?} lies inside edge {p:?}-{q:?}"
            );
        }
    }
}

#[test]
fn smallest_flat_tile_is_two_triangles() {
    let grid = TileGrid::new(3).unwrap();
    let terrain = vec![0.0; 9];
    let tile = grid.create_tile(&terrain).unwrap();
    let mesh = tile.get_mesh(0.0);

    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(
        vertex_set(&mesh),
        [(0, 0), (2, 2), (2, 0), (0, 2)].into_iter().collect()
    );
}

#[test]
fn flat_tiles_collapse_regardless_of_size() {
    for grid_size in [5u32, 9, 17, 33] {
        let grid = TileGrid::new(grid_size).unwrap();
        let terrain = vec![0.0; (grid_size as usize).pow(2)];
        let tile = grid.create_tile(&terrain).unwrap();
        let mesh = tile.get_mesh(0.0);

        let t = (grid_size - 1) as u16;
        assert_eq!(mesh.triangle_count(), 2, "grid size {grid_size}");
        assert_eq!(
            vertex_set(&mesh),
            [(0, 0), (t, t), (t, 0), (0, t)].into_iter().collect()
        );
    }
}

#[test]
fn invalid_grid_size_is_rejected() {
    assert!(matches!(
        TileGrid::new(4),
        Err(Error::InvalidGridSize { grid_size: 4 })
    ));
}

#[test]
fn full_resolution_mesh_uses_every_sample() {
    let grid = TileGrid::new(9).unwrap();
    let terrain = wave_terrain(9, 10.0);
    let tile = grid.create_tile(&terrain).unwrap();
    let mesh = tile.get_mesh(-1.0);

    assert_eq!(mesh.triangle_count(), 2 * 8 * 8);
    assert_eq!(mesh.vertex_count(), 9 * 9);
    assert_crack_free(&mesh);
}

#[test]
fn adaptive_meshes_are_crack_free() {
    let grid = TileGrid::new(17).unwrap();
    let terrain = wave_terrain(17, 20.0);
    let tile = grid.create_tile(&terrain).unwrap();

    for max_error in [0.0, 0.5, 2.0, 8.0] {
        let mesh = tile.get_mesh(max_error);
        assert!(!mesh.is_empty());
        assert_crack_free(&mesh);
    }
}

#[test]
fn max_length_is_honoured_on_rough_terrain() {
    let grid = TileGrid::new(17).unwrap();
    let terrain = wave_terrain(17, 20.0);
    let tile = grid.create_tile(&terrain).unwrap();
    let mesh = tile.get_mesh_with(&MeshOptions {
        max_error: 50.0,
        max_length: Some(4.0),
    });

    let positions: Vec<_> = mesh.positions().collect();
    for [ia, _, ic] in mesh.faces() {
        let a = positions[ia as usize];
        let c = positions[ic as usize];
        assert!(a.x.abs_diff(c.x) + a.y.abs_diff(c.y) <= 4);
    }
    assert_crack_free(&mesh);
}

#[test]
fn tighter_tolerance_never_produces_fewer_triangles() {
    let grid = TileGrid::new(17).unwrap();
    let terrain = wave_terrain(17, 20.0);
    let tile = grid.create_tile(&terrain).unwrap();

    let thresholds = [0.0f32, 0.25, 1.0, 4.0, 16.0, 64.0];
    let meshes: Vec<_> = thresholds.iter().map(|&e| tile.get_mesh(e)).collect();

    for pair in meshes.windows(2) {
        let (finer, coarser) = (&pair[0], &pair[1]);
        assert!(finer.triangle_count() >= coarser.triangle_count());
        // The coarser mesh's vertices all survive into the finer mesh
        assert!(vertex_set(coarser).is_subset(&vertex_set(finer)));
    }
}

#[test]
fn tile_corners_survive_every_threshold() {
    let grid = TileGrid::new(17).unwrap();
    let terrain = wave_terrain(17, 20.0);
    let tile = grid.create_tile(&terrain).unwrap();

    for max_error in [0.0, 1.0, 100.0] {
        let vertices = vertex_set(&tile.get_mesh(max_error));
        for corner in [(0, 0), (16, 0), (0, 16), (16, 16)] {
            assert!(vertices.contains(&corner), "missing corner {corner:?}");
        }
    }
}

#[test]
fn winding_is_consistent_across_the_mesh() {
    let grid = TileGrid::new(17).unwrap();
    let terrain = wave_terrain(17, 20.0);
    let tile = grid.create_tile(&terrain).unwrap();

    for max_error in [0.0, 2.0] {
        let mesh = tile.get_mesh(max_error);
        let positions: Vec<(i64, i64)> = mesh
            .positions()
            .map(|p| (i64::from(p.x), i64::from(p.y)))
            .collect();

        for [ia, ib, ic] in mesh.faces() {
            let a = positions[ia as usize];
            let b = positions[ib as usize];
            let c = positions[ic as usize];
            let cross = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);
            // Every emitted triangle winds the same way in grid coordinates;
            // whether that reads CW or CCW depends on the caller's axes
            assert!(cross < 0, "unexpected winding for ({ia}, {ib}, {ic})");
        }
    }
}
