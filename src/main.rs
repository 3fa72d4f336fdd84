use clap::Parser;
use log::{error, info};
use soft_rasterizer::error::RenderError;
use soft_rasterizer::io::config::Config;
use soft_rasterizer::io::image::save_image_data;
use soft_rasterizer::io::obj_loader::load_obj;
use soft_rasterizer::pipeline::passes::render_main_pass;
use soft_rasterizer::pipeline::renderer::Renderer;
use soft_rasterizer::scene::context::RenderContext;
use soft_rasterizer::scene::model::Model;
use soft_rasterizer::scene::texture::Texture;
use soft_rasterizer::scene::utils::normalize_model;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Headless software rasterizer: renders an OBJ model to an image file.
#[derive(Parser, Debug)]
#[command(name = "soft-rasterizer")]
#[command(about = "CPU rasterizer for textured, lit OBJ models")]
struct Cli {
    /// TOML config file. Flags below override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// OBJ model to render. Without one a test triangle is drawn.
    #[arg(short, long, value_name = "OBJ")]
    model: Option<String>,

    /// Diffuse texture image.
    #[arg(short, long, value_name = "IMG")]
    texture: Option<String>,

    /// Output image path; the extension picks the format.
    #[arg(short, long, value_name = "PNG")]
    output: Option<String>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Camera yaw, radians.
    #[arg(long)]
    yaw: Option<f64>,

    /// Camera pitch, radians.
    #[arg(long)]
    pitch: Option<f64>,

    /// Camera distance from the target.
    #[arg(long)]
    distance: Option<f64>,

    /// Number of frames to render, orbiting the camera between them.
    #[arg(long, default_value_t = 1)]
    frames: usize,

    /// Yaw added per frame, radians.
    #[arg(long, default_value_t = 0.1)]
    orbit_step: f64,
}

impl Cli {
    /// Command-line values win over the config file.
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.model.path = Some(model.clone());
        }
        if let Some(texture) = &self.texture {
            config.model.texture = Some(texture.clone());
        }
        if let Some(output) = &self.output {
            config.render.output = output.clone();
        }
        if let Some(width) = self.width {
            config.render.width = width;
        }
        if let Some(height) = self.height {
            config.render.height = height;
        }
        if let Some(yaw) = self.yaw {
            config.camera.yaw = yaw;
        }
        if let Some(pitch) = self.pitch {
            config.camera.pitch = pitch;
        }
        if let Some(distance) = self.distance {
            config.camera.distance = distance;
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("{}", e.user_message());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), RenderError> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config file: {:?}", path);
            Config::load(path)?
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    let model = match &config.model.path {
        Some(path) => load_obj(path)?,
        None => {
            info!("No model given, rendering the test triangle");
            Model::create_test_triangle()
        }
    };
    let model = if config.model.normalize {
        normalize_model(&model)
    } else {
        model
    };

    let texture = config
        .model
        .texture
        .as_ref()
        .map(Texture::load)
        .transpose()?
        .map(Arc::new);

    let mut context = RenderContext::default()
        .with_model(Some(Arc::new(model)))
        .with_texture(texture)
        .with_camera(config.camera.to_camera())
        .with_light(config.light.to_light())
        .with_model_matrix(config.model.model_matrix());

    let settings = config.render.render_settings();
    let mut renderer = Renderer::new(config.render.width, config.render.height);
    let frames = cli.frames.max(1);

    for index in 0..frames {
        let stats = render_main_pass(&settings, &context, &mut renderer);
        let path = frame_path(&config.render.output, index, frames);
        save_image_data(&renderer.framebuffer.image_data(), &path)?;

        info!(
            "Frame {}/{}: {} triangles, {} pixels -> {:?}",
            index + 1,
            frames,
            stats.triangles,
            stats.pixels_written,
            path
        );

        let camera = context.camera.orbit(cli.orbit_step, 0.0);
        context = context.with_camera(camera);
    }

    Ok(())
}

/// `output` itself for a single frame, otherwise `<stem>_<index>.<ext>` beside it.
fn frame_path(output: &str, index: usize, frames: usize) -> PathBuf {
    let path = Path::new(output);
    if frames <= 1 {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{}", stem, index),
    };
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_path_single_frame_is_unchanged() {
        assert_eq!(frame_path("out/render.png", 0, 1), PathBuf::from("out/render.png"));
    }

    #[test]
    fn test_frame_path_numbers_frames() {
        assert_eq!(frame_path("out/render.png", 3, 10), PathBuf::from("out/render_3.png"));
        assert_eq!(frame_path("render", 0, 2), PathBuf::from("render_0"));
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "soft-rasterizer",
            "--width",
            "64",
            "--yaw",
            "1.25",
            "--output",
            "x.png",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.render.width, 64);
        assert_eq!(config.render.height, 600);
        assert_eq!(config.camera.yaw, 1.25);
        assert_eq!(config.render.output, "x.png");
        assert_eq!(cli.frames, 1);
    }
}
