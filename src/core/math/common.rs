use nalgebra::Vector3;

/// Returns the unit vector pointing along `v`, or the zero vector when `v` has zero length.
#[inline]
pub fn normalize_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    let len = v.norm();
    if len == 0.0 { Vector3::zeros() } else { v / len }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// `max(min, min(max, value))`. No ordering check on the bounds.
#[inline]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}
