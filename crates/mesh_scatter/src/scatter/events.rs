//! Event types and sinks for observing scatter operations.
//!
//! This module defines [`ScatterEvent`] and a set of sinks to emit, collect, or forward
//! events while running placement via [`crate::scatter::placement::generate_with_rng`],
//! baking via [`crate::scatter::bake::bake_with_events`], or driving a
//! [`crate::scatter::scatterer::MeshScatterer`].
use glam::Vec3;

use crate::sampling::SpawnType;
use crate::scatter::placement::PlacementSample;

/// Describes events emitted by scatter operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ScatterEvent {
    /// Emitted when a placement run starts.
    RunStarted {
        /// Strategy used to draw candidates.
        spawn_type: SpawnType,
        /// Minimum distance enforced between accepted samples.
        minimal_distance: f32,
        /// Number of vertices or triangles candidates are drawn from.
        candidate_pool: usize,
    },

    /// Emitted when a candidate was accepted.
    SampleAccepted {
        /// Index of the sample in the run's output.
        index: usize,
        /// The accepted sample.
        sample: PlacementSample,
    },

    /// Emitted when a candidate was too close to an accepted sample.
    CandidateRejected {
        /// Rejected candidate position in target-local space.
        position: Vec3,
        /// Consecutive rejections since the last acceptance, including this one.
        consecutive: usize,
    },

    /// Emitted when a placement run terminates.
    RunFinished {
        /// Number of accepted samples.
        accepted: usize,
        /// Total candidates drawn.
        candidates_evaluated: usize,
        /// Total candidates rejected.
        candidates_rejected: usize,
    },

    /// Emitted after samples were turned into host instances.
    InstancesMaterialized {
        /// Number of spawned instances.
        count: usize,
    },

    /// Emitted after tracked instances were released.
    InstancesCleared {
        /// Instances the host destroyed.
        destroyed: usize,
        /// Instances the host no longer knew about.
        missing: usize,
    },

    /// Emitted after a successful bake.
    BakeFinished {
        /// Number of merged instances.
        instances: usize,
        /// Vertex count of the merged mesh.
        vertices: usize,
        /// Index count of the merged mesh.
        indices: usize,
    },

    /// A validation failure that aborted an operation without changing state.
    Error {
        /// Operation that failed (e.g. "placement", "bake").
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of a [`ScatterEvent`], used by sinks to filter what they receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScatterEventKind {
    RunStarted,
    SampleAccepted,
    CandidateRejected,
    RunFinished,
    InstancesMaterialized,
    InstancesCleared,
    BakeFinished,
    Error,
}

impl ScatterEvent {
    pub fn kind(&self) -> ScatterEventKind {
        match self {
            ScatterEvent::RunStarted { .. } => ScatterEventKind::RunStarted,
            ScatterEvent::SampleAccepted { .. } => ScatterEventKind::SampleAccepted,
            ScatterEvent::CandidateRejected { .. } => ScatterEventKind::CandidateRejected,
            ScatterEvent::RunFinished { .. } => ScatterEventKind::RunFinished,
            ScatterEvent::InstancesMaterialized { .. } => ScatterEventKind::InstancesMaterialized,
            ScatterEvent::InstancesCleared { .. } => ScatterEventKind::InstancesCleared,
            ScatterEvent::BakeFinished { .. } => ScatterEventKind::BakeFinished,
            ScatterEvent::Error { .. } => ScatterEventKind::Error,
        }
    }
}

/// A generic event sink that accepts [`ScatterEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ScatterEvent);

    /// Whether events of `kind` should be built at all. Producers skip constructing
    /// events the sink does not want.
    #[inline]
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ScatterEvent) {}

    #[inline]
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ScatterEvent>,
    only: Option<Vec<ScatterEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect only events of the given kinds.
    pub fn only(kinds: impl IntoIterator<Item = ScatterEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<ScatterEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ScatterEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: ScatterEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: ScatterEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}
