use std::path::PathBuf;

use glam::{Affine3A, Vec3};
use mesh_scatter::prelude::*;
use mesh_scatter_examples::{grass_blade, init_tracing, load_settings, uv_sphere, write_obj};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Optional RON settings path; falls back to the bundled asset values.
    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    let fallback = ScatterSettings::new(0.15)
        .with_spawn_type(SpawnType::Face)
        .with_scale(0.8)
        .with_scale_randomness(0.6)
        .with_seed(2025);
    let settings = load_settings(settings_path.as_deref(), fallback)?;

    // Sphere placed somewhere in the world to show baking back into local space.
    let sphere = uv_sphere(2.0, 24, 48);
    let target_to_world = Affine3A::from_translation(Vec3::new(0.0, 2.0, -5.0));
    let blade = Prototype::new(grass_blade(0.25, 0.04)).with_material("grass");

    let mut scatterer = MeshScatterer::new(sphere, blade, MemoryHost::new())
        .with_target_transform(target_to_world)
        .with_settings(settings);

    let mut rejected = 0usize;
    let mut sink = FnSink::new(|event: ScatterEvent| match event {
        ScatterEvent::CandidateRejected { .. } => rejected += 1,
        ScatterEvent::RunFinished { accepted, .. } => info!("Placed {} blades.", accepted),
        _ => {}
    });
    let count = scatterer.preview_with_events(&mut sink)?;
    drop(sink);
    info!("Preview holds {} instances after {} rejections.", count, rejected);

    let baked = scatterer.bake()?;
    let out = "scatter-sphere-grass-face.obj";
    write_obj(&baked, "grass", out)?;
    info!(
        "Wrote {} ({} vertices, {} indices).",
        out,
        baked.vertex_count(),
        baked.index_count()
    );

    Ok(())
}
