//! Mesh baking: merge every placed instance into one mesh in the target's local space.
use glam::{Affine3A, Vec2};
use tracing::info;

use crate::error::{Error, Result};
use crate::mesh::{BakedMesh, MaterialId, Mesh};
use crate::scatter::events::{EventSink, ScatterEvent, ScatterEventKind};
use crate::scatter::instance::Instance;
use crate::scatter::report;

/// Merges `instances` into one mesh expressed in the target surface's local space.
///
/// `target_to_world` is the target surface's world transform. Instance transforms are
/// relative to the target, so vertices are taken to world space through the target and
/// brought back with its inverse.
pub fn bake(
    instances: &[Instance],
    target_to_world: Affine3A,
    material: Option<MaterialId>,
) -> Result<BakedMesh> {
    bake_with_events(instances, target_to_world, material, &mut ())
}

/// Like [`bake`], reporting the outcome to `sink`.
pub fn bake_with_events(
    instances: &[Instance],
    target_to_world: Affine3A,
    material: Option<MaterialId>,
    sink: &mut dyn EventSink,
) -> Result<BakedMesh> {
    if instances.is_empty() {
        return Err(report(sink, "bake", Error::NothingToBake));
    }
    for instance in instances {
        instance
            .mesh
            .validate()
            .map_err(|e| report(&mut *sink, "bake", e))?;
    }

    let total_vertices: usize = instances.iter().map(|i| i.mesh.vertex_count()).sum();
    let total_indices: usize = instances.iter().map(|i| i.mesh.indices.len()).sum();
    if u32::try_from(total_vertices).is_err() {
        return Err(report(
            sink,
            "bake",
            Error::InvalidParameter(format!(
                "{total_vertices} merged vertices exceed the u32 index range"
            )),
        ));
    }
    let with_uvs = instances.iter().any(|i| i.mesh.has_uvs());

    let world_to_target = target_to_world.inverse();
    let mut merged = Mesh {
        positions: Vec::with_capacity(total_vertices),
        normals: Vec::with_capacity(total_vertices),
        uvs: Vec::with_capacity(if with_uvs { total_vertices } else { 0 }),
        indices: Vec::with_capacity(total_indices),
    };

    for instance in instances {
        let mesh = &instance.mesh;
        // Offset by the vertex count before this instance's vertices are appended.
        let base = merged.positions.len() as u32;
        merged.indices.extend(mesh.indices.iter().map(|&i| i + base));

        let instance_to_world = target_to_world * instance.transform.to_affine();
        merged.positions.extend(mesh.positions.iter().map(|&p| {
            world_to_target.transform_point3(instance_to_world.transform_point3(p))
        }));

        // Normals are copied as-is, not rotated into target space.
        merged.normals.extend_from_slice(&mesh.normals);

        if with_uvs {
            if mesh.has_uvs() {
                merged.uvs.extend_from_slice(&mesh.uvs);
            } else {
                merged
                    .uvs
                    .extend(std::iter::repeat_n(Vec2::ZERO, mesh.vertex_count()));
            }
        }
    }

    info!(
        "Baked {} instances into {} vertices and {} triangles.",
        instances.len(),
        merged.vertex_count(),
        merged.triangle_count()
    );
    if sink.wants(ScatterEventKind::BakeFinished) {
        sink.send(ScatterEvent::BakeFinished {
            instances: instances.len(),
            vertices: merged.vertex_count(),
            indices: merged.indices.len(),
        });
    }

    Ok(BakedMesh::new(merged, material))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::{Quat, Vec3};

    use super::*;
    use crate::scatter::events::VecSink;
    use crate::scatter::instance::{InstanceHandle, Transform};
    use crate::scatter::placement::PlacementSample;

    fn quad() -> Arc<Mesh> {
        Arc::new(
            Mesh::new(
                vec![
                    Vec3::new(-0.5, 0.0, -0.5),
                    Vec3::new(0.5, 0.0, -0.5),
                    Vec3::new(0.5, 0.0, 0.5),
                    Vec3::new(-0.5, 0.0, 0.5),
                ],
                vec![Vec3::Y; 4],
                vec![0, 2, 1, 0, 3, 2],
            )
            .with_uvs(vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ]),
        )
    }

    fn instance(id: u64, mesh: Arc<Mesh>, transform: Transform) -> Instance {
        Instance {
            handle: InstanceHandle(id),
            transform,
            sample: PlacementSample {
                position: transform.translation,
                normal: transform.up(),
                scale: transform.scale,
            },
            mesh,
        }
    }

    fn at(translation: Vec3, scale: f32) -> Transform {
        Transform {
            translation,
            rotation: Quat::IDENTITY,
            scale,
        }
    }

    #[test]
    fn empty_instance_list_is_nothing_to_bake() {
        let mut sink = VecSink::new();
        let err = bake_with_events(&[], Affine3A::IDENTITY, None, &mut sink).unwrap_err();
        assert!(matches!(err, Error::NothingToBake));
        assert_eq!(sink.count(ScatterEventKind::Error), 1);
    }

    #[test]
    fn counts_and_offsets_follow_instance_order() {
        let mesh = quad();
        let instances: Vec<_> = (0..5)
            .map(|i| instance(i, mesh.clone(), at(Vec3::X * i as f32 * 2.0, 1.0)))
            .collect();
        let baked = bake(&instances, Affine3A::IDENTITY, Some("bark".into())).unwrap();

        assert_eq!(baked.vertex_count(), 5 * 4);
        assert_eq!(baked.index_count(), 5 * 6);
        assert!(baked.mesh.indices.iter().all(|&i| (i as usize) < 20));
        assert_eq!(&baked.mesh.indices[6..12], &[4, 6, 5, 4, 7, 6]);
        assert_eq!(baked.mesh.uvs.len(), 20);
        assert_eq!(baked.material, Some(MaterialId::new("bark")));
        assert!(baked.mesh.validate().is_ok());
    }

    #[test]
    fn positions_are_expressed_in_target_space() {
        let mesh = quad();
        let rotation = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        let transform = Transform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            rotation,
            scale: 2.0,
        };
        let target_to_world = Affine3A::from_scale_rotation_translation(
            Vec3::splat(3.0),
            Quat::from_rotation_y(0.7),
            Vec3::new(-10.0, 4.0, 8.0),
        );

        let baked = bake(
            &[instance(0, mesh.clone(), transform)],
            target_to_world,
            None,
        )
        .unwrap();

        for (local, merged) in mesh.positions.iter().zip(&baked.mesh.positions) {
            let expected = transform.to_affine().transform_point3(*local);
            assert!((expected - *merged).length() < 1e-4, "{expected} vs {merged}");
        }
        // Normals are copied unchanged.
        assert_eq!(baked.mesh.normals, mesh.normals);
    }

    #[test]
    fn missing_uvs_are_padded_when_mixed() {
        let plain = Arc::new(Mesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Z],
            vec![Vec3::Y; 3],
            vec![0, 1, 2],
        ));
        let instances = vec![
            instance(0, plain.clone(), at(Vec3::ZERO, 1.0)),
            instance(1, quad(), at(Vec3::X * 3.0, 1.0)),
        ];
        let baked = bake(&instances, Affine3A::IDENTITY, None).unwrap();
        assert_eq!(baked.mesh.uvs.len(), 7);
        assert_eq!(&baked.mesh.uvs[..3], &[Vec2::ZERO; 3]);
        assert!(baked.mesh.validate().is_ok());

        let only_plain = vec![instance(0, plain, at(Vec3::ZERO, 1.0))];
        let baked = bake(&only_plain, Affine3A::IDENTITY, None).unwrap();
        assert!(baked.mesh.uvs.is_empty());
    }

    #[test]
    fn merges_beyond_u16_range_keep_valid_indices() {
        let mesh = quad();
        let count = (u16::MAX as usize / 4) + 10;
        let instances: Vec<_> = (0..count)
            .map(|i| instance(i as u64, mesh.clone(), at(Vec3::X * i as f32, 1.0)))
            .collect();
        let baked = bake(&instances, Affine3A::IDENTITY, None).unwrap();

        assert!(baked.vertex_count() > u16::MAX as usize);
        let max = *baked.mesh.indices.iter().max().unwrap();
        assert_eq!(max as usize, baked.vertex_count() - 1);
    }
}
