#![forbid(unsafe_code)]
//! mesh_scatter: Scatter copies of a prototype mesh across a target surface and bake them.
//!
//! Modules:
//! - mesh: triangle mesh buffers, prototypes and baked output
//! - sampling: candidate generation on a surface (vertex and face strategies)
//! - scatter: settings, placement, instances, baking, events and the stateful scatterer
//!
//! For examples, see the `mesh_scatter_examples` crate.
pub mod error;
pub mod mesh;
pub mod sampling;
pub mod scatter;

/// Convenient re-exports for common types. Import with `use mesh_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::mesh::{BakedMesh, MaterialId, Mesh, Prototype};
    pub use crate::sampling::{
        FaceSampling, SpawnType, SurfacePoint, SurfaceSampling, VertexSampling,
    };
    pub use crate::scatter::bake::{bake, bake_with_events};
    pub use crate::scatter::events::{
        EventSink, FnSink, ScatterEvent, ScatterEventKind, VecSink,
    };
    pub use crate::scatter::instance::{
        clear, materialize, ClearSummary, Instance, InstanceHandle, InstanceHost, MemoryHost,
        Transform,
    };
    pub use crate::scatter::placement::{
        generate, generate_with_rng, PlacementResult, PlacementSample,
    };
    pub use crate::scatter::scatterer::MeshScatterer;
    pub use crate::scatter::settings::ScatterSettings;
    pub use crate::scatter::MAX_CONSECUTIVE_REJECTIONS;
}
