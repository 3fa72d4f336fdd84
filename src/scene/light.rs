use crate::core::math::common::normalize_or_zero;
use nalgebra::Vector3;

/// A directional light. `direction` points from the surface towards the light and is
/// used as-is by shading, so it must already be unit length; `new_directional`
/// normalizes for you.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub direction: Vector3<f64>,
    pub color: Vector3<f64>,
    pub intensity: f64,
}

impl Light {
    pub fn new_directional(direction: Vector3<f64>, color: Vector3<f64>, intensity: f64) -> Self {
        Self {
            direction: normalize_or_zero(&direction),
            color,
            intensity,
        }
    }
}

impl Default for Light {
    /// White key light from the upper front right.
    fn default() -> Self {
        Self::new_directional(
            Vector3::new(0.5, 1.0, 0.8),
            Vector3::new(1.0, 1.0, 1.0),
            1.0,
        )
    }
}
