//! Placement engine: bounded-retry rejection sampling over a target surface.
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info};

use crate::error::Result;
use crate::mesh::Mesh;
use crate::sampling::{rand01, SpawnType};
use crate::scatter::events::{EventSink, ScatterEvent, ScatterEventKind};
use crate::scatter::settings::ScatterSettings;
use crate::scatter::{report, MAX_CONSECUTIVE_REJECTIONS};

/// An accepted location for one prototype copy, in target-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSample {
    pub position: Vec3,
    /// Unit surface normal at `position`.
    pub normal: Vec3,
    /// Uniform scale in `[scale, scale + scale_randomness]`.
    pub scale: f32,
}

/// Result of a placement run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct PlacementResult {
    /// Accepted samples in acceptance order.
    pub samples: Vec<PlacementSample>,
    /// Total candidates drawn from the surface.
    pub candidates_evaluated: usize,
    /// Candidates discarded for being too close to an accepted sample.
    pub candidates_rejected: usize,
}

/// Places samples on `surface` using a random source seeded from `settings.seed`.
///
/// The number of samples is not requested up front: candidates are drawn until
/// [`MAX_CONSECUTIVE_REJECTIONS`] of them in a row land closer than
/// `settings.minimal_distance` to an accepted sample.
pub fn generate(surface: &Mesh, settings: &ScatterSettings) -> Result<Vec<PlacementSample>> {
    let mut rng = StdRng::seed_from_u64(settings.seed);
    generate_with_rng(surface, settings, &mut rng, &mut ()).map(|r| r.samples)
}

/// Places samples on `surface` drawing from `rng`, reporting progress to `sink`.
///
/// `settings.seed` is ignored; the caller owns the random source.
pub fn generate_with_rng<R: RngCore>(
    surface: &Mesh,
    settings: &ScatterSettings,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<PlacementResult> {
    settings
        .validate()
        .map_err(|e| report(&mut *sink, "placement", e))?;
    surface
        .validate()
        .map_err(|e| report(&mut *sink, "placement", e))?;
    let sampler = settings.spawn_type.sampler();
    sampler
        .validate(surface)
        .map_err(|e| report(&mut *sink, "placement", e))?;

    if sink.wants(ScatterEventKind::RunStarted) {
        sink.send(ScatterEvent::RunStarted {
            spawn_type: settings.spawn_type,
            minimal_distance: settings.minimal_distance,
            candidate_pool: match settings.spawn_type {
                SpawnType::Vertex => surface.vertex_count(),
                SpawnType::Face => surface.triangle_count(),
            },
        });
    }

    // Squared in f64 so tiny distances do not underflow to zero.
    let min_distance_sq = f64::from(settings.minimal_distance).powi(2);
    let mut result = PlacementResult::default();
    let mut consecutive_rejections = 0;

    while consecutive_rejections < MAX_CONSECUTIVE_REJECTIONS {
        let candidate = sampler.sample(surface, rng);
        result.candidates_evaluated += 1;

        let too_close = result
            .samples
            .iter()
            .any(|s| {
                s.position
                    .as_dvec3()
                    .distance_squared(candidate.position.as_dvec3())
                    < min_distance_sq
            });

        if too_close {
            consecutive_rejections += 1;
            result.candidates_rejected += 1;
            if sink.wants(ScatterEventKind::CandidateRejected) {
                sink.send(ScatterEvent::CandidateRejected {
                    position: candidate.position,
                    consecutive: consecutive_rejections,
                });
            }
            continue;
        }

        let sample = PlacementSample {
            position: candidate.position,
            normal: candidate.normal.normalize_or(Vec3::Y),
            scale: settings.scale + rand01(rng) * settings.scale_randomness,
        };
        if sink.wants(ScatterEventKind::SampleAccepted) {
            sink.send(ScatterEvent::SampleAccepted {
                index: result.samples.len(),
                sample,
            });
        }
        result.samples.push(sample);
        consecutive_rejections = 0;
    }

    debug!(
        "Placement drew {} candidates, rejected {}.",
        result.candidates_evaluated, result.candidates_rejected
    );
    info!(
        "Placed {} samples ({:?} spawn, minimal distance {}).",
        result.samples.len(),
        settings.spawn_type,
        settings.minimal_distance
    );

    if sink.wants(ScatterEventKind::RunFinished) {
        sink.send(ScatterEvent::RunFinished {
            accepted: result.samples.len(),
            candidates_evaluated: result.candidates_evaluated,
            candidates_rejected: result.candidates_rejected,
        });
    }

    Ok(result)
}
