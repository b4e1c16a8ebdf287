//! Triangle mesh buffers shared by the target surface, the prototype and the baked result.
//!
//! A [`Mesh`] stores parallel per-vertex buffers (positions, normals and optional uvs)
//! and a flat `u32` index list where every three consecutive entries form one triangle.
use std::fmt;
use std::sync::Arc;

use glam::{Vec2, Vec3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Indexed triangle mesh in its own local space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals, parallel to `positions`.
    pub normals: Vec<Vec3>,
    /// Texture coordinates, either empty or parallel to `positions`.
    pub uvs: Vec<Vec2>,
    /// Triangle corner indices, three per triangle.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh without texture coordinates.
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            uvs: Vec::new(),
            indices,
        }
    }

    /// Create a mesh from any math types convertible to `mint` vectors.
    pub fn from_mint<P, N>(
        positions: impl IntoIterator<Item = P>,
        normals: impl IntoIterator<Item = N>,
        indices: impl IntoIterator<Item = u32>,
    ) -> Self
    where
        P: Into<mint::Vector3<f32>>,
        N: Into<mint::Vector3<f32>>,
    {
        Self::new(
            positions
                .into_iter()
                .map(|p| Vec3::from(p.into()))
                .collect(),
            normals.into_iter().map(|n| Vec3::from(n.into())).collect(),
            indices.into_iter().collect(),
        )
    }

    /// Set the texture coordinates.
    pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> Self {
        self.uvs = uvs;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Vertex indices of triangle `index`.
    ///
    /// Panics if `index >= triangle_count()`.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        let start = index * 3;
        [
            self.indices[start],
            self.indices[start + 1],
            self.indices[start + 2],
        ]
    }

    /// Iterate over all triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Checks that the buffers are consistent with each other.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.positions.len();
        if self.normals.len() != vertex_count {
            return Err(Error::InvalidParameter(format!(
                "mesh has {} positions but {} normals",
                vertex_count,
                self.normals.len()
            )));
        }
        if !self.uvs.is_empty() && self.uvs.len() != vertex_count {
            return Err(Error::InvalidParameter(format!(
                "mesh has {} positions but {} uvs",
                vertex_count,
                self.uvs.len()
            )));
        }
        if let Some(i) = self.positions.iter().position(|p| !p.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "mesh position {i} is not finite"
            )));
        }
        if let Some(i) = self.normals.iter().position(|n| !n.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "mesh normal {i} is not finite"
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(Error::InvalidParameter(format!(
                "mesh index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(&bad) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(Error::InvalidParameter(format!(
                "mesh index {bad} is out of range for {vertex_count} vertices"
            )));
        }

        Ok(())
    }
}

/// Opaque reference to a surface appearance owned by the host.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterialId(pub String);

impl MaterialId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaterialId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// The mesh stamped at every placement, plus its optional material.
#[derive(Debug, Clone)]
pub struct Prototype {
    /// Geometry shared by every instance.
    pub mesh: Arc<Mesh>,
    /// Material assigned to the baked result.
    pub material: Option<MaterialId>,
}

impl Prototype {
    pub fn new(mesh: impl Into<Arc<Mesh>>) -> Self {
        Self {
            mesh: mesh.into(),
            material: None,
        }
    }

    /// Set the material carried over to baked meshes.
    pub fn with_material(mut self, material: impl Into<MaterialId>) -> Self {
        self.material = Some(material.into());
        self
    }
}

/// Result of merging all placed instances, expressed in the target's local space.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct BakedMesh {
    /// Merged buffers. Indices are `u32`, so merges may exceed 65535 vertices.
    pub mesh: Mesh,
    /// Material taken from the prototype, if any.
    pub material: Option<MaterialId>,
}

impl BakedMesh {
    pub fn new(mesh: Mesh, material: Option<MaterialId>) -> Self {
        Self { mesh, material }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn index_count(&self) -> usize {
        self.mesh.indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh::from_mint(
            [[0.0_f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[0.0_f32, 1.0, 0.0]; 3],
            [0, 1, 2],
        )
    }

    #[test]
    fn from_mint_converts_arrays() {
        let mesh = triangle();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.positions[1], Vec3::X);
        assert_eq!(mesh.normals[2], Vec3::Y);
        assert!(!mesh.has_uvs());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn triangles_iterates_index_triples() {
        let mut mesh = triangle();
        mesh.positions.push(Vec3::Z);
        mesh.normals.push(Vec3::Y);
        mesh.indices.extend([0, 2, 3]);
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.triangle(1), [0, 2, 3]);
    }

    #[test]
    fn validate_rejects_mismatched_normals() {
        let mut mesh = triangle();
        mesh.normals.pop();
        assert!(matches!(mesh.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn validate_rejects_partial_uvs() {
        let mesh = triangle().with_uvs(vec![Vec2::ZERO]);
        assert!(matches!(mesh.validate(), Err(Error::InvalidParameter(_))));

        let mesh = triangle().with_uvs(vec![Vec2::ZERO; 3]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn validate_rejects_dangling_or_incomplete_triangles() {
        let mut mesh = triangle();
        mesh.indices = vec![0, 1, 3];
        assert!(matches!(mesh.validate(), Err(Error::InvalidParameter(_))));

        mesh.indices = vec![0, 1];
        assert!(matches!(mesh.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn validate_rejects_non_finite_vertices() {
        let mut mesh = triangle();
        mesh.positions[0] = Vec3::NAN;
        assert!(matches!(mesh.validate(), Err(Error::InvalidParameter(_))));

        let mut mesh = triangle();
        mesh.normals[2] = Vec3::new(0.0, f32::INFINITY, 0.0);
        assert!(matches!(mesh.validate(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn prototype_carries_material() {
        let proto = Prototype::new(triangle()).with_material("moss");
        assert_eq!(proto.material.as_ref().map(MaterialId::as_str), Some("moss"));
        assert_eq!(proto.mesh.vertex_count(), 3);
    }
}
