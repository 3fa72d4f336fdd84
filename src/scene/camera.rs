use crate::core::math::common::clamp;
use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};
use std::f64::consts::FRAC_PI_2;

pub const MIN_DISTANCE: f64 = 0.5;
pub const MAX_DISTANCE: f64 = 20.0;
pub const MIN_PITCH: f64 = -FRAC_PI_2 + 0.01;
pub const MAX_PITCH: f64 = FRAC_PI_2 - 0.01;

/// A camera orbiting `target` on a sphere of radius `distance`.
///
/// Updates return a new camera rather than mutating, so a frame in flight always
/// sees one consistent camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Point3<f64>,
    pub distance: f64,
    /// Rotation around +Y, radians. Yaw 0 looks from +Z.
    pub yaw: f64,
    /// Elevation above the XZ plane, radians.
    pub pitch: f64,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Point3::origin(),
            distance: 3.0,
            yaw: 0.0,
            pitch: 0.3,
        }
    }
}

impl OrbitCamera {
    pub fn new(target: Point3<f64>, distance: f64, yaw: f64, pitch: f64) -> Self {
        Self {
            target,
            distance: clamp(distance, MIN_DISTANCE, MAX_DISTANCE),
            yaw,
            pitch: clamp(pitch, MIN_PITCH, MAX_PITCH),
        }
    }

    /// Pitch is kept just short of the poles so the view basis stays defined.
    pub fn orbit(&self, delta_yaw: f64, delta_pitch: f64) -> Self {
        Self {
            yaw: self.yaw + delta_yaw,
            pitch: clamp(self.pitch + delta_pitch, MIN_PITCH, MAX_PITCH),
            ..*self
        }
    }

    pub fn zoom(&self, delta: f64) -> Self {
        Self {
            distance: clamp(self.distance + delta, MIN_DISTANCE, MAX_DISTANCE),
            ..*self
        }
    }

    /// World-space eye position.
    pub fn position(&self) -> Point3<f64> {
        let cos_pitch = self.pitch.cos();
        self.target
            + Vector3::new(
                cos_pitch * self.yaw.sin(),
                self.pitch.sin(),
                cos_pitch * self.yaw.cos(),
            ) * self.distance
    }

    pub fn view_matrix(&self) -> Matrix4<f64> {
        TransformFactory::look_at(&self.position(), &self.target, &Vector3::y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_position() {
        let cam = OrbitCamera::default();
        let p = cam.position();
        assert!((p.x - 0.0).abs() < 1e-12);
        assert!((p.y - 3.0 * 0.3f64.sin()).abs() < 1e-12);
        assert!((p.z - 3.0 * 0.3f64.cos()).abs() < 1e-12);
        assert!(((p - cam.target).norm() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let cam = OrbitCamera::default().orbit(0.5, 10.0);
        assert_eq!(cam.pitch, MAX_PITCH);
        assert_eq!(cam.yaw, 0.5);

        let cam = cam.orbit(0.0, -20.0);
        assert_eq!(cam.pitch, MIN_PITCH);
    }

    #[test]
    fn test_zoom_clamps_distance() {
        let cam = OrbitCamera::default();
        assert_eq!(cam.zoom(-100.0).distance, MIN_DISTANCE);
        assert_eq!(cam.zoom(100.0).distance, MAX_DISTANCE);
        assert_eq!(cam.zoom(1.5).distance, 4.5);
        // Original is untouched.
        assert_eq!(cam.distance, 3.0);
    }

    #[test]
    fn test_view_matrix_looks_at_target() {
        let cam = OrbitCamera::new(Point3::new(1.0, 2.0, 3.0), 5.0, 0.7, -0.2);
        let view = cam.view_matrix();
        let t = view * cam.target.to_homogeneous();
        assert!(t.x.abs() < 1e-9 && t.y.abs() < 1e-9);
        assert!((t.z + 5.0).abs() < 1e-9);
    }
}
