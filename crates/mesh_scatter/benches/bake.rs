mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Affine3A, Quat, Vec3};
use mesh_scatter::prelude::{
    bake, generate, materialize, MemoryHost, Prototype, ScatterSettings, SpawnType,
};

fn bake_benches(c: &mut Criterion) {
    let surface = common::grid(128);
    let prototype = Prototype::new(common::grid(4)).with_material("bench");
    let target_to_world = Affine3A::from_rotation_translation(
        Quat::from_rotation_y(0.5),
        Vec3::new(10.0, 0.0, -4.0),
    );

    let mut group = c.benchmark_group("bake");

    for distance in [8.0_f32, 4.0, 2.0] {
        let settings = ScatterSettings::new(distance)
            .with_spawn_type(SpawnType::Face)
            .with_seed(0xBEEF);
        let samples = generate(&surface, &settings).unwrap_or_default();
        let mut host = MemoryHost::new();
        let instances = materialize(&samples, &prototype, &mut host);
        group.throughput(common::elements_throughput(
            instances.len() * prototype.mesh.vertex_count(),
        ));

        group.bench_with_input(
            BenchmarkId::from_parameter(instances.len()),
            &instances,
            |b, instances| {
                b.iter(|| {
                    let baked = bake(instances, target_to_world, prototype.material.clone());
                    black_box(baked.map(|m| m.vertex_count()).unwrap_or_default());
                });
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = bake_benches
}
criterion_main!(benches);
