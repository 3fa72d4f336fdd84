use crate::core::geometry::{Triangle, Vertex};
use crate::core::math::common::normalize_or_zero;
use crate::error::RenderError;
use crate::scene::model::Model;
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::fs;
use std::path::Path;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        // Separate position/normal/uv index streams, one entry per face corner.
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Loads an OBJ file and merges every object in it into one `Model`.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Model, RenderError> {
    let path_ref = path.as_ref();
    let text = fs::read_to_string(path_ref)
        .map_err(|e| RenderError::Load(format!("Failed to read {:?}: {}", path_ref, e)))?;

    info!("Loading OBJ file: {:?}", path_ref);

    let base_dir = path_ref.parent().unwrap_or_else(|| Path::new(""));
    let (models, materials) = tobj::load_obj_buf(&mut text.as_bytes(), &load_options(), |mtl| {
        tobj::load_mtl(base_dir.join(mtl))
    })
    .map_err(|e| RenderError::Parse(format!("Failed to load OBJ {:?}: {}", path_ref, e)))?;

    // Materials are not used for shading; a broken MTL reference is not fatal.
    if let Err(e) = materials {
        warn!("Ignoring materials of {:?}: {}", path_ref, e);
    }

    build_model(&models, &scan_corners(&text))
}

/// Parses OBJ text already in memory. `mtllib` references are ignored.
pub fn parse_obj(text: &str) -> Result<Model, RenderError> {
    let (models, _materials) = tobj::load_obj_buf(&mut text.as_bytes(), &load_options(), |_| {
        Ok(Default::default())
    })
    .map_err(|e| RenderError::Parse(format!("Failed to parse OBJ: {}", e)))?;

    build_model(&models, &scan_corners(text))
}

/// Which optional indices a face corner spells out (`v/vt/vn`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CornerAttributes {
    uv: bool,
    normal: bool,
}

/// Lists the corners of every triangulated face in file order.
///
/// The loader fills a missing `vt`/`vn` with a neighbouring index, so whether a
/// corner really carried one is read from the text. Faces are fanned from their
/// first corner, the same order the loader triangulates in.
fn scan_corners(text: &str) -> Vec<CornerAttributes> {
    let mut corners = Vec::new();

    for line in text.lines() {
        let mut words = line.split_whitespace();
        if !matches!(words.next(), Some("f") | Some("l")) {
            continue;
        }

        let face: Vec<CornerAttributes> = words
            .map(|word| {
                let mut parts = word.split('/').skip(1);
                let uv = parts.next().is_some_and(|s| !s.is_empty());
                let normal = parts.next().is_some_and(|s| !s.is_empty());
                CornerAttributes { uv, normal }
            })
            .collect();

        // Points and lines are dropped.
        if face.len() < 3 {
            continue;
        }
        for i in 1..face.len() - 1 {
            corners.extend([face[0], face[i], face[i + 1]]);
        }
    }

    corners
}

fn build_model(models: &[tobj::Model], corners: &[CornerAttributes]) -> Result<Model, RenderError> {
    let total_corners: usize = models.iter().map(|m| m.mesh.indices.len()).sum();
    let corners = if corners.len() == total_corners {
        Some(corners)
    } else {
        warn!(
            "Face corner count mismatch ({} scanned, {} loaded). Trusting loader indices.",
            corners.len(),
            total_corners
        );
        None
    };

    let mut triangles = Vec::new();
    let mut offset = 0;

    for model in models {
        let mesh = &model.mesh;
        let mesh_corners = corners.map(|c| &c[offset..offset + mesh.indices.len()]);
        offset += mesh.indices.len();

        let attributes_at = |c: usize| match mesh_corners {
            Some(flags) => flags[c],
            None => CornerAttributes {
                uv: !mesh.texcoord_indices.is_empty(),
                normal: !mesh.normal_indices.is_empty(),
            },
        };

        // Returns the vertex and whether its normal came from the file.
        let vertex_at = |c: usize| -> Result<(Vertex, bool), RenderError> {
            let i = mesh.indices[c] as usize;
            let position = Point3::new(
                mesh.positions[i * 3] as f64,
                mesh.positions[i * 3 + 1] as f64,
                mesh.positions[i * 3 + 2] as f64,
            );
            if !position.iter().all(|coord| coord.is_finite()) {
                return Err(RenderError::Validation(format!(
                    "Mesh '{}' has a non-finite vertex position",
                    model.name
                )));
            }

            let attributes = attributes_at(c);

            let normal = mesh
                .normal_indices
                .get(c)
                .filter(|_| attributes.normal)
                .and_then(|&n| mesh.normals.get(n as usize * 3..n as usize * 3 + 3))
                .map(|n| normalize_or_zero(&Vector3::new(n[0] as f64, n[1] as f64, n[2] as f64)));

            let uv = mesh
                .texcoord_indices
                .get(c)
                .filter(|_| attributes.uv)
                .and_then(|&t| mesh.texcoords.get(t as usize * 2..t as usize * 2 + 2))
                .map_or_else(Vector2::zeros, |t| Vector2::new(t[0] as f64, t[1] as f64));

            let has_normal = normal.is_some();
            let vertex = Vertex::new(position, uv, normal.unwrap_or_else(Vector3::zeros));
            Ok((vertex, has_normal))
        };

        let mut missing_normals = 0;
        for face in 0..mesh.indices.len() / 3 {
            let (mut v0, n0) = vertex_at(face * 3)?;
            let (mut v1, n1) = vertex_at(face * 3 + 1)?;
            let (mut v2, n2) = vertex_at(face * 3 + 2)?;

            if !(n0 && n1 && n2) {
                let face_normal = normalize_or_zero(
                    &(v1.position - v0.position).cross(&(v2.position - v0.position)),
                );
                for (vertex, has_normal) in [(&mut v0, n0), (&mut v1, n1), (&mut v2, n2)] {
                    if !has_normal {
                        vertex.normal = face_normal;
                        missing_normals += 1;
                    }
                }
            }

            triangles.push(Triangle::new(v0, v1, v2));
        }

        if missing_normals > 0 {
            warn!(
                "Mesh '{}' has {} of {} face corners without normals. Using face normals there.",
                model.name,
                missing_normals,
                mesh.indices.len()
            );
        }
    }

    if triangles.is_empty() {
        return Err(RenderError::Validation("No faces found".to_string()));
    }

    info!("OBJ loaded successfully. Total triangles: {}", triangles.len());

    Ok(Model::new(triangles))
}
