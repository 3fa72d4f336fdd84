use crate::core::geometry::{Triangle, Vertex};
use crate::scene::model::Model;

/// Returns a copy of `model` centred on the origin and scaled so its largest
/// bounding-box dimension is 1 (half-extent 0.5).
///
/// A model with zero size in every dimension keeps scale 1. UVs and normals are
/// untouched.
pub fn normalize_model(model: &Model) -> Model {
    let size = model.bounding_box.size();
    let max_dimension = size.x.max(size.y).max(size.z);
    let scale = if max_dimension > 0.0 {
        1.0 / max_dimension
    } else {
        1.0
    };
    let center = model.center;

    let normalize = |v: &Vertex| Vertex {
        position: ((v.position - center) * scale).into(),
        ..*v
    };

    let triangles = model
        .triangles
        .iter()
        .map(|t| Triangle::new(normalize(&t.v0), normalize(&t.v1), normalize(&t.v2)))
        .collect();

    Model::new(triangles)
}
