//! Stateful front end exposing the preview, clear and bake commands.
use std::sync::Arc;

use glam::Affine3A;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::error::Result;
use crate::mesh::{BakedMesh, Mesh, Prototype};
use crate::scatter::bake;
use crate::scatter::events::{EventSink, ScatterEvent, ScatterEventKind};
use crate::scatter::instance::{self, ClearSummary, Instance, InstanceHost};
use crate::scatter::placement::generate_with_rng;
use crate::scatter::report;
use crate::scatter::settings::ScatterSettings;

/// Scatters a prototype over a target surface and tracks the resulting instances.
///
/// Every command takes `&mut self`, so preview, clear and bake on one scatterer can
/// never interleave. Failed commands leave the tracked instances untouched.
pub struct MeshScatterer<H: InstanceHost> {
    target: Arc<Mesh>,
    target_to_world: Affine3A,
    prototype: Prototype,
    settings: ScatterSettings,
    host: H,
    instances: Vec<Instance>,
}

impl<H: InstanceHost> MeshScatterer<H> {
    pub fn new(target: impl Into<Arc<Mesh>>, prototype: Prototype, host: H) -> Self {
        Self {
            target: target.into(),
            target_to_world: Affine3A::IDENTITY,
            prototype,
            settings: ScatterSettings::default(),
            host,
            instances: Vec::new(),
        }
    }

    /// Sets the scatter settings.
    pub fn with_settings(mut self, settings: ScatterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the world transform of the target surface.
    pub fn with_target_transform(mut self, target_to_world: Affine3A) -> Self {
        self.target_to_world = target_to_world;
        self
    }

    pub fn settings(&self) -> &ScatterSettings {
        &self.settings
    }

    /// Replaces the settings used by the next preview. Tracked instances are kept.
    pub fn set_settings(&mut self, settings: ScatterSettings) {
        self.settings = settings;
    }

    pub fn target(&self) -> &Mesh {
        &self.target
    }

    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }

    /// Instances created by the last successful preview, in placement order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the scatterer, returning the host. Tracked instances are not destroyed.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Runs placement and replaces the tracked instances. Returns the instance count.
    pub fn preview(&mut self) -> Result<usize> {
        self.preview_with_events(&mut ())
    }

    pub fn preview_with_events(&mut self, sink: &mut dyn EventSink) -> Result<usize> {
        self.prototype
            .mesh
            .validate()
            .map_err(|e| report(&mut *sink, "preview", e))?;

        let mut rng = StdRng::seed_from_u64(self.settings.seed);
        let placement = generate_with_rng(&self.target, &self.settings, &mut rng, sink)?;

        let fresh = instance::materialize(&placement.samples, &self.prototype, &mut self.host);
        if sink.wants(ScatterEventKind::InstancesMaterialized) {
            sink.send(ScatterEvent::InstancesMaterialized { count: fresh.len() });
        }

        self.clear_preview_with_events(sink);
        self.instances = fresh;
        Ok(self.instances.len())
    }

    /// Destroys all tracked instances. A no-op when nothing is tracked.
    pub fn clear_preview(&mut self) -> ClearSummary {
        self.clear_preview_with_events(&mut ())
    }

    pub fn clear_preview_with_events(&mut self, sink: &mut dyn EventSink) -> ClearSummary {
        if self.instances.is_empty() {
            return ClearSummary::default();
        }
        let summary = instance::clear(&mut self.instances, &mut self.host);
        if sink.wants(ScatterEventKind::InstancesCleared) {
            sink.send(ScatterEvent::InstancesCleared {
                destroyed: summary.destroyed,
                missing: summary.missing,
            });
        }
        summary
    }

    /// Merges the tracked instances into one mesh in the target's local space, then
    /// clears them.
    pub fn bake(&mut self) -> Result<BakedMesh> {
        self.bake_with_events(&mut ())
    }

    pub fn bake_with_events(&mut self, sink: &mut dyn EventSink) -> Result<BakedMesh> {
        let baked = bake::bake_with_events(
            &self.instances,
            self.target_to_world,
            self.prototype.material.clone(),
            sink,
        )?;
        let summary = self.clear_preview_with_events(sink);
        info!(
            "Bake finished; released {} preview instances.",
            summary.destroyed + summary.missing
        );
        Ok(baked)
    }
}
