use crate::core::math::transform::TransformFactory;
use crate::core::rasterizer::CullMode;
use crate::pipeline::renderer::Renderer;
use crate::pipeline::shaders::lambert::LambertShader;
use crate::scene::context::RenderContext;
use crate::scene::texture::WrapMode;
use log::debug;
use nalgebra::Vector4;
use std::f64::consts::FRAC_PI_4;

/// Per-frame projection and output state that is not part of the scene itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Vertical field of view, radians.
    pub fov_y: f64,
    pub near: f64,
    pub far: f64,
    pub clear_color: Vector4<f64>,
    pub cull_mode: CullMode,
    pub wrap_mode: WrapMode,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fov_y: FRAC_PI_4,
            near: 0.1,
            far: 100.0,
            clear_color: Vector4::new(0.1, 0.1, 0.15, 1.0),
            cull_mode: CullMode::Back,
            wrap_mode: WrapMode::Repeat,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub pixels_written: usize,
}

/// Renders one frame of `context` into `renderer`.
///
/// The target is always cleared. Without a model that is all the frame contains.
pub fn render_main_pass(
    settings: &RenderSettings,
    context: &RenderContext,
    renderer: &mut Renderer,
) -> FrameStats {
    renderer.clear(&settings.clear_color);
    renderer.rasterizer.set_cull_mode(settings.cull_mode);

    let Some(model) = &context.model else {
        debug!("No model bound, frame left cleared");
        return FrameStats::default();
    };

    let width = renderer.framebuffer.width;
    let height = renderer.framebuffer.height;
    let aspect = if height > 0 {
        width as f64 / height as f64
    } else {
        1.0
    };

    let projection =
        TransformFactory::perspective(settings.fov_y, aspect, settings.near, settings.far);
    let view = context.camera.view_matrix();

    let shader = LambertShader::new(context.model_matrix, view, projection, context.light)
        .with_texture(context.texture.clone())
        .with_wrap_mode(settings.wrap_mode);

    let pixels_written = renderer.draw_model(model, &shader);

    debug!(
        "Main pass: {} triangles, {} pixels written ({}x{})",
        model.triangle_count(),
        pixels_written,
        width,
        height
    );

    FrameStats {
        triangles: model.triangle_count(),
        pixels_written,
    }
}
