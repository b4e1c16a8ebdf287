//! Face sampling strategy.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::sampling::{rand01, rand_index, SurfacePoint, SurfaceSampling};

/// Picks a uniformly random triangle and a point inside it.
///
/// Triangles are chosen with equal probability regardless of their area. The point is
/// built by two nested interpolations, `lerp(lerp(a, b, u), c, v)`, so it always lies
/// inside the triangle but is biased toward its third corner: the expected position
/// is `0.25 a + 0.25 b + 0.5 c` rather than the centroid. Normals are interpolated
/// with the same `u` and `v`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaceSampling;

impl SurfaceSampling for FaceSampling {
    fn validate(&self, surface: &Mesh) -> Result<()> {
        if surface.triangle_count() == 0 {
            return Err(Error::InvalidParameter(
                "target surface has no triangles to spawn on".into(),
            ));
        }
        Ok(())
    }

    fn sample(&self, surface: &Mesh, rng: &mut dyn RngCore) -> SurfacePoint {
        let [a, b, c] = surface.triangle(rand_index(rng, surface.triangle_count()));
        let (a, b, c) = (a as usize, b as usize, c as usize);
        let u = rand01(rng);
        let v = rand01(rng);

        let p = &surface.positions;
        let n = &surface.normals;
        SurfacePoint {
            position: p[a].lerp(p[b], u).lerp(p[c], v),
            normal: n[a].lerp(n[b], u).lerp(n[c], v),
        }
    }
}
