use crate::scene::camera::OrbitCamera;
use crate::scene::light::Light;
use crate::scene::model::Model;
use crate::scene::texture::Texture;
use nalgebra::Matrix4;
use std::sync::Arc;

/// An immutable snapshot of everything one frame needs.
///
/// Updates go through the `with_*` builders, which consume the snapshot and return a
/// new one. The render pass only ever borrows a snapshot, so it never observes a
/// half-applied change.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub model: Option<Arc<Model>>,
    pub texture: Option<Arc<Texture>>,
    pub camera: OrbitCamera,
    pub light: Light,
    pub model_matrix: Matrix4<f64>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            model: None,
            texture: None,
            camera: OrbitCamera::default(),
            light: Light::default(),
            model_matrix: Matrix4::identity(),
        }
    }
}

impl RenderContext {
    pub fn with_model(self, model: Option<Arc<Model>>) -> Self {
        Self { model, ..self }
    }

    pub fn with_texture(self, texture: Option<Arc<Texture>>) -> Self {
        Self { texture, ..self }
    }

    pub fn with_camera(self, camera: OrbitCamera) -> Self {
        Self { camera, ..self }
    }

    pub fn with_light(self, light: Light) -> Self {
        Self { light, ..self }
    }

    pub fn with_model_matrix(self, model_matrix: Matrix4<f64>) -> Self {
        Self {
            model_matrix,
            ..self
        }
    }
}
