//! User-facing parameters of a scatter run.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sampling::SpawnType;

/// Configuration for placing prototype copies on a target surface.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSettings {
    /// Where candidates are drawn from.
    pub spawn_type: SpawnType,
    /// Minimum distance between any two placements, in target-local units.
    pub minimal_distance: f32,
    /// Base uniform scale of every placement.
    pub scale: f32,
    /// Upper bound of the random amount added to `scale`.
    pub scale_randomness: f32,
    /// Seed for the random source; equal seeds give equal placements.
    pub seed: u64,
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            spawn_type: SpawnType::Vertex,
            minimal_distance: 1.0,
            scale: 1.0,
            scale_randomness: 0.0,
            seed: 0,
        }
    }
}

impl ScatterSettings {
    /// Creates new [`ScatterSettings`] with the given minimal distance.
    pub fn new(minimal_distance: f32) -> Self {
        Self {
            minimal_distance,
            ..Default::default()
        }
    }

    /// Sets the spawn type.
    pub fn with_spawn_type(mut self, spawn_type: SpawnType) -> Self {
        self.spawn_type = spawn_type;
        self
    }

    /// Sets the minimal distance.
    pub fn with_minimal_distance(mut self, minimal_distance: f32) -> Self {
        self.minimal_distance = minimal_distance;
        self
    }

    /// Sets the base scale.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the scale randomness.
    pub fn with_scale_randomness(mut self, scale_randomness: f32) -> Self {
        self.scale_randomness = scale_randomness;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the settings, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.minimal_distance.is_finite() || self.minimal_distance <= 0.0 {
            return Err(Error::InvalidParameter(
                "minimal_distance should be greater than zero".into(),
            ));
        }
        if !self.scale.is_finite() {
            return Err(Error::InvalidParameter("scale must be finite".into()));
        }
        if !self.scale_randomness.is_finite() {
            return Err(Error::InvalidParameter(
                "scale_randomness must be finite".into(),
            ));
        }

        Ok(())
    }
}
