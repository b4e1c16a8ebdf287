//! Vertex sampling strategy.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::sampling::{rand_index, SurfacePoint, SurfaceSampling};

/// Picks a uniformly random vertex and returns it with its own normal.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexSampling;

impl SurfaceSampling for VertexSampling {
    fn validate(&self, surface: &Mesh) -> Result<()> {
        if surface.positions.is_empty() {
            return Err(Error::InvalidParameter(
                "target surface has no vertices to spawn on".into(),
            ));
        }
        Ok(())
    }

    fn sample(&self, surface: &Mesh, rng: &mut dyn RngCore) -> SurfacePoint {
        let index = rand_index(rng, surface.positions.len());
        SurfacePoint {
            position: surface.positions[index],
            normal: surface.normals[index],
        }
    }
}
