use nalgebra::{Point2, Vector3};
use std::ops::{Add, Mul};

/// Signed edge function for the directed edge `a -> b` evaluated at `c`.
///
/// Twice the signed area of triangle `(a, b, c)` in screen space (y down). Positive
/// for counter-clockwise winding as seen on screen.
#[inline(always)]
pub fn edge_function(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (c.x - a.x) * (b.y - a.y) - (c.y - a.y) * (b.x - a.x)
}

/// Perspective-correct blend of three per-vertex attributes.
///
/// `bary` holds screen-space barycentric weights and `inv_w` the reciprocal clip `w` of
/// each vertex. Every term is weighted by `1/w` and the sum is renormalized by
/// `1 / (b0/w0 + b1/w1 + b2/w2)`.
#[inline]
pub fn perspective_interpolate<T>(bary: &Vector3<f64>, inv_w: &Vector3<f64>, attrs: [T; 3]) -> T
where
    T: Copy + Add<Output = T> + Mul<f64, Output = T>,
{
    let correction = 1.0 / (bary.x * inv_w.x + bary.y * inv_w.y + bary.z * inv_w.z);
    (attrs[0] * (bary.x * inv_w.x) + attrs[1] * (bary.y * inv_w.y) + attrs[2] * (bary.z * inv_w.z))
        * correction
}

/// Plain screen-space barycentric blend of three scalars.
#[inline(always)]
pub fn linear_interpolate(bary: &Vector3<f64>, values: [f64; 3]) -> f64 {
    bary.x * values[0] + bary.y * values[1] + bary.z * values[2]
}
