#![forbid(unsafe_code)]

mod obj;
mod shapes;

use std::path::Path;

use anyhow::Context;
use mesh_scatter::prelude::ScatterSettings;
pub use obj::{write_obj, write_obj_to};
pub use shapes::{grass_blade, pebble, uv_sphere, wavy_plane};
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Reads [`ScatterSettings`] from a RON file, or returns `fallback` when no path is given.
pub fn load_settings(path: Option<&Path>, fallback: ScatterSettings) -> anyhow::Result<ScatterSettings> {
    let Some(path) = path else {
        return Ok(fallback);
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    let settings: ScatterSettings =
        ron::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    settings.validate()?;
    Ok(settings)
}
