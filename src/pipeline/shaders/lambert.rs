use crate::core::geometry::{ClipVertex, Fragment, Vertex};
use crate::core::pipeline::Shader;
use crate::pipeline::fragment_stage::shade_fragment_with_wrap;
use crate::pipeline::vertex_stage::transform_vertex;
use crate::scene::light::Light;
use crate::scene::texture::{Texture, WrapMode};
use nalgebra::{Matrix4, Vector4};
use std::sync::Arc;

/// Ambient + Lambertian shading with an optional diffuse texture.
pub struct LambertShader {
    // Matrices
    pub mvp_matrix: Matrix4<f64>,
    pub model_matrix: Matrix4<f64>,

    pub texture: Option<Arc<Texture>>,
    pub light: Light,
    pub wrap_mode: WrapMode,
}

impl LambertShader {
    pub fn new(
        model: Matrix4<f64>,
        view: Matrix4<f64>,
        projection: Matrix4<f64>,
        light: Light,
    ) -> Self {
        Self {
            mvp_matrix: projection * view * model,
            model_matrix: model,
            texture: None,
            light,
            wrap_mode: WrapMode::Repeat,
        }
    }

    pub fn with_texture(mut self, texture: Option<Arc<Texture>>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }
}

impl Shader for LambertShader {
    fn vertex(&self, vertex: &Vertex) -> ClipVertex {
        transform_vertex(vertex, &self.mvp_matrix, &self.model_matrix)
    }

    fn fragment(&self, fragment: &Fragment) -> Vector4<f64> {
        shade_fragment_with_wrap(fragment, self.texture.as_deref(), &self.light, self.wrap_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::transform::TransformFactory;
    use nalgebra::{Point3, Vector2, Vector3};

    #[test]
    fn test_mvp_composes_projection_view_model() {
        let model = TransformFactory::translate(
            &TransformFactory::identity(),
            &Vector3::new(0.0, 0.0, -2.0),
        );
        let view = TransformFactory::rotate_y(&TransformFactory::identity(), 0.3);
        let projection = TransformFactory::perspective(1.0, 1.5, 0.1, 10.0);
        let shader = LambertShader::new(model, view, projection, Light::default());
        assert!((shader.mvp_matrix - projection * view * model).norm() < 1e-12);
    }

    #[test]
    fn test_clamp_wrap_mode_reaches_fragment_stage() {
        #[rustfmt::skip]
        let texture = Texture::new(2, 1, vec![
            255, 0, 0, 255,   0, 0, 255, 255,
        ]).unwrap();
        let light = Light::new_directional(Vector3::z(), Vector3::new(1.0, 1.0, 1.0), 1.0);
        let id = TransformFactory::identity();
        let fragment = Fragment {
            x: 0,
            y: 0,
            depth: 0.0,
            uv: Vector2::new(1.0, 0.5),
            normal: Vector3::z(),
            world_position: Point3::origin(),
        };

        let repeat = LambertShader::new(id, id, id, light).with_texture(Some(Arc::new(texture)));
        // u = 1 wraps to 0 (red) under repeat, stays at the last texel (blue) under clamp.
        assert!(repeat.fragment(&fragment).x > 0.9);
        let clamp = repeat.with_wrap_mode(WrapMode::Clamp);
        assert!(clamp.fragment(&fragment).z > 0.9);
    }
}
