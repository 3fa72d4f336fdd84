use crate::core::geometry::{ClipVertex, Vertex};
use nalgebra::{Matrix4, Point3};

/// Transforms one model-space vertex for the rasterizer.
///
/// - clip position: `mvp * (position, 1)`
/// - world position: `model * (position, 1)`, xyz only
/// - normal: `model * (normal, 0)`, xyz only
///
/// The normal uses the model matrix rather than its inverse transpose and is not
/// renormalized, so it is skewed under non-uniform scale.
pub fn transform_vertex(
    vertex: &Vertex,
    mvp: &Matrix4<f64>,
    model_matrix: &Matrix4<f64>,
) -> ClipVertex {
    let position = vertex.position.to_homogeneous();

    let clip_pos = mvp * position;
    let world_pos = model_matrix * position;
    let world_normal = model_matrix * vertex.normal.to_homogeneous();

    ClipVertex {
        position: clip_pos,
        uv: vertex.uv,
        normal: world_normal.xyz(),
        world_position: Point3::from(world_pos.xyz()),
    }
}
