use crate::core::math::transform::TransformFactory;
use crate::core::rasterizer::CullMode;
use crate::error::RenderError;
use crate::pipeline::passes::RenderSettings;
use crate::scene::camera::OrbitCamera;
use crate::scene::light::Light;
use crate::scene::texture::WrapMode;
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_output")]
    pub output: String,

    // --- Projection ---
    #[serde(default = "default_fov")]
    pub fov_degrees: f64,
    #[serde(default = "default_near")]
    pub near: f64,
    #[serde(default = "default_far")]
    pub far: f64,

    // --- Pipeline ---
    #[serde(default = "default_clear_color")]
    pub clear_color: [f64; 4],
    #[serde(default = "default_true")]
    pub cull_back_faces: bool,
    #[serde(default)]
    pub wrap_mode: WrapMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: default_output(),
            fov_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            clear_color: default_clear_color(),
            cull_back_faces: true,
            wrap_mode: WrapMode::default(),
        }
    }
}

impl RenderConfig {
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            fov_y: self.fov_degrees.to_radians(),
            near: self.near,
            far: self.far,
            clear_color: Vector4::from(self.clear_color),
            cull_mode: CullMode::from_flag(self.cull_back_faces),
            wrap_mode: self.wrap_mode,
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    600
}
fn default_output() -> String {
    "output.png".to_string()
}
fn default_fov() -> f64 {
    45.0
}
fn default_near() -> f64 {
    0.1
}
fn default_far() -> f64 {
    100.0
}
fn default_clear_color() -> [f64; 4] {
    [0.1, 0.1, 0.15, 1.0]
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_distance")]
    pub distance: f64,
    #[serde(default)]
    pub yaw: f64,
    #[serde(default = "default_pitch")]
    pub pitch: f64,
    #[serde(default)]
    pub target: [f64; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: default_distance(),
            yaw: 0.0,
            pitch: default_pitch(),
            target: [0.0, 0.0, 0.0],
        }
    }
}

impl CameraConfig {
    /// Distance and pitch are clamped into the orbit camera's limits.
    pub fn to_camera(&self) -> OrbitCamera {
        OrbitCamera::new(Point3::from(self.target), self.distance, self.yaw, self.pitch)
    }
}

fn default_distance() -> f64 {
    3.0
}
fn default_pitch() -> f64 {
    0.3
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_direction")]
    pub direction: [f64; 3],
    #[serde(default = "default_light_color")]
    pub color: [f64; 3],
    #[serde(default = "default_intensity")]
    pub intensity: f64,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: default_light_direction(),
            color: default_light_color(),
            intensity: default_intensity(),
        }
    }
}

impl LightConfig {
    pub fn to_light(&self) -> Light {
        Light::new_directional(
            Vector3::from(self.direction),
            Vector3::from(self.color),
            self.intensity,
        )
    }
}

fn default_light_direction() -> [f64; 3] {
    [0.5, 1.0, 0.8]
}
fn default_light_color() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}
fn default_intensity() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelConfig {
    pub path: Option<String>,
    pub texture: Option<String>,
    /// Center the model and scale its largest dimension to 1 before placing it.
    #[serde(default = "default_true")]
    pub normalize: bool,

    // --- Transform ---
    #[serde(default)]
    pub position: [f64; 3],
    /// Euler angles in degrees.
    #[serde(default)]
    pub rotation: [f64; 3],
    #[serde(default = "default_scale")]
    pub scale: [f64; 3],
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: None,
            texture: None,
            normalize: true,
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: default_scale(),
        }
    }
}

impl ModelConfig {
    /// `T * Ry * Rx * Rz * S`.
    pub fn model_matrix(&self) -> Matrix4<f64> {
        let mut m = TransformFactory::translate(
            &TransformFactory::identity(),
            &Vector3::from(self.position),
        );
        m = TransformFactory::rotate_y(&m, self.rotation[1].to_radians());
        m = TransformFactory::rotate_x(&m, self.rotation[0].to_radians());
        m = TransformFactory::rotate_z(&m, self.rotation[2].to_radians());
        TransformFactory::scale(&m, &Vector3::from(self.scale))
    }
}

fn default_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref).map_err(|e| {
            RenderError::Load(format!("Failed to read config file {:?}: {}", path_ref, e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, RenderError> {
        let config: Config = toml::from_str(content)
            .map_err(|e| RenderError::Parse(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the pipeline cannot render with.
    pub fn validate(&self) -> Result<(), RenderError> {
        let render = &self.render;
        if render.width == 0 || render.height == 0 {
            return Err(RenderError::Validation(format!(
                "Output size must be non-zero, got {}x{}",
                render.width, render.height
            )));
        }
        if !(render.fov_degrees > 0.0 && render.fov_degrees < 180.0) {
            return Err(RenderError::Validation(format!(
                "fov_degrees must be in (0, 180), got {}",
                render.fov_degrees
            )));
        }
        if !(render.near > 0.0 && render.far > render.near) {
            return Err(RenderError::Validation(format!(
                "Clip planes need 0 < near < far, got near = {}, far = {}",
                render.near, render.far
            )));
        }
        Ok(())
    }
}
