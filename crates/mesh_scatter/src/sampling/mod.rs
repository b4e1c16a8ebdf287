//! Sampling strategies for proposing candidate points on a triangulated surface.
//!
//! This module defines the [`SurfaceSampling`] trait used by the placement engine to
//! draw one candidate position and normal per request, along with the two concrete
//! strategies selectable through [`SpawnType`].
use glam::Vec3;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mesh::Mesh;

pub mod face;
pub mod vertex;

pub use face::FaceSampling;
pub use vertex::VertexSampling;

/// A candidate point on the surface, in the surface's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub position: Vec3,
    /// Surface normal at `position`. Not necessarily unit length for interpolated normals.
    pub normal: Vec3,
}

/// Trait for surface sampling.
pub trait SurfaceSampling: Send + Sync {
    /// Fails with [`crate::error::Error::InvalidParameter`] when the surface offers
    /// nothing to sample from.
    fn validate(&self, surface: &Mesh) -> Result<()>;

    /// Draw one candidate. Only valid after [`SurfaceSampling::validate`] succeeded.
    ///
    /// # Panics
    ///
    /// Panics when the surface has nothing to sample from (no vertices for vertex
    /// sampling, no triangles for face sampling), or when its indices are out of range.
    fn sample(&self, surface: &Mesh, rng: &mut dyn RngCore) -> SurfacePoint;
}

/// Where on the target surface candidates are drawn from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SpawnType {
    /// Existing vertices of the surface.
    #[default]
    Vertex,
    /// Interior points of the surface's triangles.
    Face,
}

impl SpawnType {
    /// The sampling strategy for this spawn type.
    pub fn sampler(self) -> Box<dyn SurfaceSampling> {
        match self {
            SpawnType::Vertex => Box::new(VertexSampling),
            SpawnType::Face => Box::new(FaceSampling),
        }
    }
}

/// Generate a random float in the range [0, 1).
///
/// Keeps the top 24 bits so every result is exactly representable and below 1.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Generate a uniformly distributed index in `0..len`.
///
/// Uses the high half of a 64x64 bit product, which avoids modulo bias.
///
/// # Panics
///
/// Panics when `len` is zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    assert!(len > 0, "rand_index requires a non-empty range");
    ((rng.next_u64() as u128 * len as u128) >> 64) as usize
}
