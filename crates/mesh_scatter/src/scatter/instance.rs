//! Instance management: turning placement samples into host-side copies of the prototype.
//!
//! The host that actually owns scene objects is abstracted behind [`InstanceHost`]; this
//! crate only keeps the returned [`InstanceHandle`]s together with the transform and
//! geometry needed for baking. [`MemoryHost`] is a self-contained host for tools and tests.
use std::collections::BTreeMap;
use std::sync::Arc;

use glam::{Affine3A, Quat, Vec3};
use tracing::debug;

use crate::mesh::{Mesh, Prototype};
use crate::scatter::placement::PlacementSample;

/// Opaque identifier of an instance owned by an [`InstanceHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceHandle(pub u64);

/// Position, orientation and uniform scale of an instance relative to the target surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: 1.0,
    };

    /// Places the local +Y axis along the sample normal.
    ///
    /// The twist around the normal is whatever the shortest-arc rotation from +Y yields.
    pub fn from_sample(sample: &PlacementSample) -> Self {
        Self {
            translation: sample.position,
            rotation: Quat::from_rotation_arc(Vec3::Y, sample.normal.normalize_or(Vec3::Y)),
            scale: sample.scale,
        }
    }

    /// The instance's local +Y axis expressed in target space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.translation,
        )
    }
}

/// Scene-side capability to create and remove copies of the prototype.
pub trait InstanceHost {
    /// Spawns a copy of `prototype` parented to the target surface at `transform`.
    fn spawn_copy(&mut self, prototype: &Prototype, transform: &Transform) -> InstanceHandle;

    /// Removes an instance. Returns `false` when the host no longer knows the handle.
    fn destroy(&mut self, handle: InstanceHandle) -> bool;
}

impl<H: InstanceHost + ?Sized> InstanceHost for &mut H {
    fn spawn_copy(&mut self, prototype: &Prototype, transform: &Transform) -> InstanceHandle {
        (**self).spawn_copy(prototype, transform)
    }

    fn destroy(&mut self, handle: InstanceHandle) -> bool {
        (**self).destroy(handle)
    }
}

/// A materialized copy of the prototype.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Host handle used to destroy the copy.
    pub handle: InstanceHandle,
    /// Transform relative to the target surface.
    pub transform: Transform,
    /// The sample this instance was created from.
    pub sample: PlacementSample,
    /// Prototype geometry in the instance's local space.
    pub mesh: Arc<Mesh>,
}

/// Spawns one prototype copy per sample, in sample order.
pub fn materialize<H: InstanceHost + ?Sized>(
    samples: &[PlacementSample],
    prototype: &Prototype,
    host: &mut H,
) -> Vec<Instance> {
    let instances: Vec<Instance> = samples
        .iter()
        .map(|sample| {
            let transform = Transform::from_sample(sample);
            Instance {
                handle: host.spawn_copy(prototype, &transform),
                transform,
                sample: *sample,
                mesh: prototype.mesh.clone(),
            }
        })
        .collect();
    debug!("Materialized {} instances.", instances.len());
    instances
}

/// Counts reported by [`clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearSummary {
    /// Instances the host destroyed.
    pub destroyed: usize,
    /// Instances that were already gone on the host side.
    pub missing: usize,
}

/// Destroys every instance and empties the list. Safe to call on an empty list.
pub fn clear<H: InstanceHost + ?Sized>(instances: &mut Vec<Instance>, host: &mut H) -> ClearSummary {
    let mut summary = ClearSummary::default();
    for instance in instances.drain(..) {
        if host.destroy(instance.handle) {
            summary.destroyed += 1;
        } else {
            debug!("Instance {:?} was already destroyed.", instance.handle);
            summary.missing += 1;
        }
    }
    summary
}

/// In-memory [`InstanceHost`] that records live instances and their transforms.
#[derive(Debug, Default)]
pub struct MemoryHost {
    next_id: u64,
    live: BTreeMap<InstanceHandle, Transform>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn contains(&self, handle: InstanceHandle) -> bool {
        self.live.contains_key(&handle)
    }

    pub fn transform(&self, handle: InstanceHandle) -> Option<&Transform> {
        self.live.get(&handle)
    }
}

impl InstanceHost for MemoryHost {
    fn spawn_copy(&mut self, _prototype: &Prototype, transform: &Transform) -> InstanceHandle {
        let handle = InstanceHandle(self.next_id);
        self.next_id += 1;
        self.live.insert(handle, *transform);
        handle
    }

    fn destroy(&mut self, handle: InstanceHandle) -> bool {
        self.live.remove(&handle).is_some()
    }
}
