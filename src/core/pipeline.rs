use crate::core::geometry::{ClipVertex, Fragment, Vertex};
use nalgebra::Vector4;

/// Shader represents the programmable stages of the pipeline.
///
/// The rasterizer only sees the `ClipVertex` produced by `vertex`; every attribute it
/// carries (uv, normal, world position) is clipped and perspective-interpolated, then
/// handed back to `fragment` inside a `Fragment`.
pub trait Shader {
    /// Vertex stage: model space -> clip space (plus world-space attributes).
    fn vertex(&self, vertex: &Vertex) -> ClipVertex;

    /// Fragment stage: returns a straight (non-premultiplied) RGBA colour in [0, 1].
    fn fragment(&self, fragment: &Fragment) -> Vector4<f64>;
}
