//! Procedural meshes used by the examples.
use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use mesh_scatter::prelude::Mesh;

/// UV sphere centered at the origin with outward normals.
pub fn uv_sphere(radius: f32, rings: u32, segments: u32) -> Mesh {
    let rings = rings.max(2);
    let segments = segments.max(3);
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();

    for r in 0..=rings {
        let v = r as f32 / rings as f32;
        let theta = v * PI;
        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let phi = u * TAU;
            let n = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            positions.push(n * radius);
            normals.push(n);
            uvs.push(Vec2::new(u, v));
        }
    }

    let row = segments + 1;
    let mut indices = Vec::new();
    for r in 0..rings {
        for s in 0..segments {
            let i = r * row + s;
            indices.extend([i, i + 1, i + row, i + 1, i + row + 1, i + row]);
        }
    }

    Mesh::new(positions, normals, indices).with_uvs(uvs)
}

/// Square grid of `size` x `size` units on the XZ plane with gentle sine waves.
pub fn wavy_plane(size: f32, divisions: u32, amplitude: f32) -> Mesh {
    let divisions = divisions.max(1);
    let row = divisions + 1;
    let step = size / divisions as f32;
    let height = |x: f32, z: f32| amplitude * (x * 0.7).sin() * (z * 0.5).cos();

    let mut positions = Vec::with_capacity((row * row) as usize);
    let mut normals = Vec::with_capacity((row * row) as usize);
    for zi in 0..row {
        for xi in 0..row {
            let x = xi as f32 * step - size * 0.5;
            let z = zi as f32 * step - size * 0.5;
            positions.push(Vec3::new(x, height(x, z), z));
            let dx = height(x + 0.01, z) - height(x - 0.01, z);
            let dz = height(x, z + 0.01) - height(x, z - 0.01);
            normals.push(Vec3::new(-dx, 0.02, -dz).normalize());
        }
    }

    let mut indices = Vec::with_capacity((divisions * divisions * 6) as usize);
    for z in 0..divisions {
        for x in 0..divisions {
            let i = z * row + x;
            indices.extend([i, i + row, i + 1, i + 1, i + row, i + row + 1]);
        }
    }

    Mesh::new(positions, normals, indices)
}

/// A two-sided tuft of three crossed blades, growing along +Y from the origin.
pub fn grass_blade(height: f32, width: f32) -> Mesh {
    let mut mesh = Mesh::default();
    for k in 0..3 {
        let angle = k as f32 * PI / 3.0;
        let side = Vec3::new(angle.cos(), 0.0, angle.sin()) * (width * 0.5);
        let facing = Vec3::new(-angle.sin(), 0.0, angle.cos());
        let base = mesh.positions.len() as u32;
        mesh.positions
            .extend([-side, side, Vec3::Y * height]);
        mesh.normals.extend([facing; 3]);
        mesh.uvs
            .extend([Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)]);
        mesh.indices
            .extend([base, base + 1, base + 2, base + 1, base, base + 2]);
    }
    mesh
}

/// A small flattened octahedron resting on the origin.
pub fn pebble(radius: f32) -> Mesh {
    let squash = Vec3::new(1.0, 0.5, 0.8);
    let dirs = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    let positions = dirs
        .iter()
        .map(|d| *d * squash * radius + Vec3::Y * (0.5 * radius))
        .collect();
    let normals = dirs.to_vec();
    let indices = vec![
        0, 2, 4, 4, 2, 1, 1, 2, 5, 5, 2, 0, 4, 3, 0, 1, 3, 4, 5, 3, 1, 0, 3, 5,
    ];
    Mesh::new(positions, normals, indices)
}
