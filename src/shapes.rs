//! Flat-shaded 2D meshes shared by Bob, planets, field halos and particles.
//!
//! Everything is a triangle fan around the origin, built once and stored as a
//! `Mesh2d` asset.  Colours come from `ColorMaterial`s so the same disc mesh
//! can be reused at any tint.

use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

/// Segment count used for planets and halos.
pub const DISC_SEGMENTS: usize = 48;

/// Fan-triangulate a convex polygon into a renderable [`Mesh`].
///
/// Triangle fan from vertex 0: triangles `(0, i, i+1)` for `i ∈ 1..n-2`.
pub fn filled_polygon_mesh(vertices: &[Vec2]) -> Mesh {
    let n = vertices.len();
    debug_assert!(n >= 3, "polygon must have ≥ 3 vertices");

    let extent = vertices
        .iter()
        .fold(0.0_f32, |acc, v| acc.max(v.x.abs()).max(v.y.abs()))
        .max(f32::EPSILON);
    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| [v.x, v.y, 0.0]).collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; n];
    let uvs: Vec<[f32; 2]> = vertices
        .iter()
        .map(|v| [v.x / (2.0 * extent) + 0.5, v.y / (2.0 * extent) + 0.5])
        .collect();

    let mut indices: Vec<u32> = Vec::with_capacity((n - 2) * 3);
    for i in 1..(n as u32 - 1) {
        indices.extend_from_slice(&[0, i, i + 1]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

/// Rim vertices of a regular `segments`-gon of the given radius.
pub fn disc_vertices(radius: f32, segments: usize) -> Vec<Vec2> {
    (0..segments)
        .map(|i| {
            let angle = (i as f32) * std::f32::consts::TAU / (segments as f32);
            Vec2::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}

/// A disc approximated by a regular polygon.
pub fn disc_mesh(radius: f32, segments: usize) -> Mesh {
    filled_polygon_mesh(&disc_vertices(radius, segments))
}

/// Solid-colour material; alpha below 1 is blended.
pub fn tinted(materials: &mut Assets<ColorMaterial>, color: Color) -> Handle<ColorMaterial> {
    materials.add(ColorMaterial::from_color(color))
}
