use mesh_scatter::prelude::*;
use mesh_scatter_examples::{init_tracing, pebble, wavy_plane, write_obj};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Vertex spawning: every pebble sits on a grid vertex of the plane.
    let plane = wavy_plane(20.0, 40, 0.4);
    let settings = ScatterSettings::new(1.5)
        .with_spawn_type(SpawnType::Vertex)
        .with_scale(1.0)
        .with_scale_randomness(0.5)
        .with_seed(7);

    let mut scatterer = MeshScatterer::new(plane, Prototype::new(pebble(0.2)), MemoryHost::new())
        .with_settings(settings);

    let mut sink = VecSink::only([
        ScatterEventKind::RunStarted,
        ScatterEventKind::RunFinished,
        ScatterEventKind::BakeFinished,
    ]);
    let count = scatterer.preview_with_events(&mut sink)?;
    info!("Live pebbles on host: {}.", scatterer.host().live_count());

    let baked = scatterer.bake_with_events(&mut sink)?;
    for event in sink.as_slice() {
        info!("{:?}", event);
    }

    let out = "scatter-plane-pebbles-vertex.obj";
    write_obj(&baked, "pebbles", out)?;
    info!("Wrote {} pebbles to {}.", count, out);

    Ok(())
}
