//! Minimal Wavefront OBJ writer for baked meshes.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_scatter::prelude::{BakedMesh, Result};

/// Writes `baked` as an OBJ file at `path`.
pub fn write_obj(baked: &BakedMesh, name: &str, path: impl AsRef<Path>) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_obj_to(baked, name, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Writes `baked` as OBJ text to `out`. Face indices are 1-based as the format requires.
pub fn write_obj_to(baked: &BakedMesh, name: &str, out: &mut impl Write) -> std::io::Result<()> {
    let mesh = &baked.mesh;
    writeln!(out, "o {name}")?;
    if let Some(material) = &baked.material {
        writeln!(out, "usemtl {material}")?;
    }
    for p in &mesh.positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for n in &mesh.normals {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for uv in &mesh.uvs {
        writeln!(out, "vt {} {}", uv.x, uv.y)?;
    }
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        if mesh.has_uvs() {
            writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        } else {
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
    }
    Ok(())
}
