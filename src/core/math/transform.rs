use crate::core::math::common::normalize_or_zero;
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for the 4x4 transforms used by the pipeline.
///
/// Matrices are column-major (`nalgebra` storage), so element `col * 4 + row` of
/// `as_slice()` addresses row `row` of column `col`. The builders that take an input
/// matrix post-multiply it: `translate(m, v)` is `m * T(v)`, so the new transform is
/// applied to vertices before `m`.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    pub fn identity() -> Matrix4<f64> {
        Matrix4::identity()
    }

    /// `a * b`: applies `b` first, then `a`.
    #[inline]
    pub fn multiply(a: &Matrix4<f64>, b: &Matrix4<f64>) -> Matrix4<f64> {
        a * b
    }

    pub fn translate(m: &Matrix4<f64>, v: &Vector3<f64>) -> Matrix4<f64> {
        let t = Matrix4::new(
            1.0, 0.0, 0.0, v.x,
            0.0, 1.0, 0.0, v.y,
            0.0, 0.0, 1.0, v.z,
            0.0, 0.0, 0.0, 1.0,
        );
        m * t
    }

    pub fn rotate_x(m: &Matrix4<f64>, angle_rad: f64) -> Matrix4<f64> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        let r = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m * r
    }

    pub fn rotate_y(m: &Matrix4<f64>, angle_rad: f64) -> Matrix4<f64> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        let r = Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m * r
    }

    pub fn rotate_z(m: &Matrix4<f64>, angle_rad: f64) -> Matrix4<f64> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        let r = Matrix4::new(
            c,  -s,   0.0, 0.0,
            s,   c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m * r
    }

    pub fn scale(m: &Matrix4<f64>, v: &Vector3<f64>) -> Matrix4<f64> {
        let s = Matrix4::new(
            v.x, 0.0, 0.0, 0.0,
            0.0, v.y, 0.0, 0.0,
            0.0, 0.0, v.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        m * s
    }

    /// Right-handed perspective projection mapping the view frustum to NDC [-1, 1].
    /// The bottom row is `(0, 0, -1, 0)`, so clip `w = -z_eye`.
    pub fn perspective(fov_y_rad: f64, aspect_ratio: f64, near: f64, far: f64) -> Matrix4<f64> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,               0.0,
            0.0,              f,   0.0,               0.0,
            0.0,              0.0, (far + near) * nf, 2.0 * far * near * nf,
            0.0,              0.0, -1.0,              0.0,
        )
    }

    /// Right-handed look-at view matrix; the camera looks down its local -Z.
    pub fn look_at(eye: &Point3<f64>, target: &Point3<f64>, up: &Vector3<f64>) -> Matrix4<f64> {
        let z_axis = normalize_or_zero(&(eye - target));
        let x_axis = normalize_or_zero(&up.cross(&z_axis));
        let y_axis = z_axis.cross(&x_axis);
        let eye = eye.coords;

        Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, -x_axis.dot(&eye),
            y_axis.x, y_axis.y, y_axis.z, -y_axis.dot(&eye),
            z_axis.x, z_axis.y, z_axis.z, -z_axis.dot(&eye),
            0.0,      0.0,      0.0,      1.0,
        )
    }

    #[inline]
    pub fn transform_vec4(m: &Matrix4<f64>, v: &Vector4<f64>) -> Vector4<f64> {
        m * v
    }
}
