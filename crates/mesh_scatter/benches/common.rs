use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec3;
use mesh_scatter::prelude::Mesh;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Flat `n` x `n` quad grid on the XZ plane with unit spacing.
#[allow(dead_code)]
pub fn grid(n: u32) -> Mesh {
    let row = n + 1;
    let positions: Vec<Vec3> = (0..row * row)
        .map(|i| Vec3::new((i % row) as f32, 0.0, (i / row) as f32))
        .collect();
    let mut indices = Vec::with_capacity((n * n * 6) as usize);
    for z in 0..n {
        for x in 0..n {
            let i = z * row + x;
            indices.extend([i, i + row, i + 1, i + 1, i + row, i + row + 1]);
        }
    }
    let normals = vec![Vec3::Y; positions.len()];
    Mesh::new(positions, normals, indices)
}
