use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::Triangle;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::Rasterizer;
use crate::scene::model::Model;
use nalgebra::Vector4;

/// The high-level renderer that orchestrates the pipeline stages.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    /// Clears colour to `color` and depth to infinity.
    pub fn clear(&mut self, color: &Vector4<f64>) {
        self.framebuffer.clear(color);
    }

    /// Replaces the framebuffer with a fresh one of the new size.
    /// A no-op when the size is unchanged.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.framebuffer.width != width || self.framebuffer.height != height {
            self.framebuffer = FrameBuffer::new(width, height);
        }
    }

    /// Draws every triangle of `model` in order. Returns the number of pixels written.
    pub fn draw_model<S: Shader>(&mut self, model: &Model, shader: &S) -> usize {
        model
            .triangles
            .iter()
            .map(|triangle| self.draw_triangle(triangle, shader))
            .sum()
    }

    /// Runs one triangle through vertex stage, clipping, rasterization, fragment stage and
    /// the depth-tested write. Returns the number of writes that passed the depth test.
    pub fn draw_triangle<S: Shader>(&mut self, triangle: &Triangle, shader: &S) -> usize {
        // 1. Vertex Processing
        let c0 = shader.vertex(&triangle.v0);
        let c1 = shader.vertex(&triangle.v1);
        let c2 = shader.vertex(&triangle.v2);

        // 2. Clipping + Rasterization, 3. Fragment shading + depth test
        let width = self.framebuffer.width;
        let height = self.framebuffer.height;
        let framebuffer = &mut self.framebuffer;
        let mut written = 0;

        self.rasterizer
            .for_each_fragment(&c0, &c1, &c2, width, height, |fragment| {
                let color = shader.fragment(&fragment);
                if framebuffer.set_pixel(
                    fragment.x as f64,
                    fragment.y as f64,
                    &color,
                    fragment.depth,
                ) {
                    written += 1;
                }
            });

        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{ClipVertex, Fragment, Vertex};
    use crate::core::rasterizer::CullMode;
    use nalgebra::{Point3, Vector2, Vector3};

    /// Passes positions straight through as clip coordinates (w = 1) and paints one colour.
    struct FlatShader {
        color: Vector4<f64>,
    }

    impl Shader for FlatShader {
        fn vertex(&self, vertex: &Vertex) -> ClipVertex {
            ClipVertex {
                position: vertex.position.to_homogeneous(),
                uv: vertex.uv,
                normal: vertex.normal,
                world_position: vertex.position,
            }
        }

        fn fragment(&self, _fragment: &Fragment) -> Vector4<f64> {
            self.color
        }
    }

    fn flat(r: f64, g: f64, b: f64) -> FlatShader {
        FlatShader {
            color: Vector4::new(r, g, b, 1.0),
        }
    }

    fn triangle_at_depth(z: f64) -> Triangle {
        let v = |x: f64, y: f64| Vertex::new(Point3::new(x, y, z), Vector2::zeros(), Vector3::z());
        Triangle::new(v(-0.8, -0.8), v(0.8, -0.8), v(0.0, 0.8))
    }

    #[test]
    fn test_draw_triangle_writes_pixels() {
        let mut renderer = Renderer::new(32, 32);
        let written = renderer.draw_triangle(&triangle_at_depth(0.0), &flat(1.0, 0.0, 0.0));
        assert!(written > 0);
        assert_eq!(renderer.framebuffer.get_pixel(16, 16), Some([255, 0, 0, 255]));
        // Corners stay untouched.
        assert_eq!(renderer.framebuffer.get_pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_nearer_triangle_wins_regardless_of_order() {
        let near = triangle_at_depth(-0.5);
        let far = triangle_at_depth(0.5);

        let mut a = Renderer::new(32, 32);
        a.draw_triangle(&far, &flat(0.0, 0.0, 1.0));
        a.draw_triangle(&near, &flat(1.0, 0.0, 0.0));

        let mut b = Renderer::new(32, 32);
        let first = b.draw_triangle(&near, &flat(1.0, 0.0, 0.0));
        let second = b.draw_triangle(&far, &flat(0.0, 0.0, 1.0));

        assert_eq!(a.framebuffer.get_pixel(16, 16), Some([255, 0, 0, 255]));
        assert_eq!(a.framebuffer.color_buffer(), b.framebuffer.color_buffer());
        assert!(first > 0);
        assert_eq!(second, 0);
    }

    #[test]
    fn test_back_faces_respect_cull_mode() {
        let front = triangle_at_depth(0.0);
        let back = Triangle::new(front.v0, front.v2, front.v1);

        let mut renderer = Renderer::new(16, 16);
        assert_eq!(renderer.draw_triangle(&back, &flat(1.0, 1.0, 1.0)), 0);

        renderer.rasterizer.set_cull_mode(CullMode::None);
        assert!(renderer.draw_triangle(&back, &flat(1.0, 1.0, 1.0)) > 0);
    }

    #[test]
    fn test_draw_model_sums_writes() {
        let model = Model::new(vec![triangle_at_depth(0.5), triangle_at_depth(-0.5)]);
        let mut renderer = Renderer::new(16, 16);
        let total = renderer.draw_model(&model, &flat(0.0, 1.0, 0.0));

        let mut single = Renderer::new(16, 16);
        let one = single.draw_triangle(&model.triangles[0], &flat(0.0, 1.0, 0.0));
        // The nearer second triangle overwrites every pixel of the first.
        assert_eq!(total, one * 2);
    }

    #[test]
    fn test_clear_and_resize() {
        let mut renderer = Renderer::new(8, 8);
        renderer.draw_triangle(&triangle_at_depth(0.0), &flat(1.0, 0.0, 0.0));
        renderer.clear(&Vector4::new(0.0, 0.0, 0.0, 1.0));
        assert!(renderer.framebuffer.color_buffer().chunks(4).all(|p| p == [0, 0, 0, 255]));

        renderer.resize(4, 2);
        assert_eq!(renderer.framebuffer.width, 4);
        assert_eq!(renderer.framebuffer.height, 2);
        assert_eq!(renderer.framebuffer.color_buffer().len(), 4 * 2 * 4);
    }
}
