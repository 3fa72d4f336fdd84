use crate::core::clipper::clip_triangle_to_near_plane;
use crate::core::geometry::{ClipVertex, Fragment};
use crate::core::math::interpolation::{edge_function, linear_interpolate, perspective_interpolate};
use nalgebra::{Point2, Point3, Vector3};

/// Triangles whose screen-space edge-function area is below this are skipped.
const MIN_AREA: f64 = 0.5;

/// The Rasterizer turns clip-space triangles into fragments.
pub struct Rasterizer {
    pub cull_mode: CullMode,
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum CullMode {
    /// Discard triangles with non-positive screen area (clockwise on screen).
    Back,
    None,
}

impl CullMode {
    pub fn from_flag(cull_back_faces: bool) -> Self {
        if cull_back_faces {
            CullMode::Back
        } else {
            CullMode::None
        }
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            cull_mode: CullMode::Back,
        }
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    /// Clips and rasterizes one triangle, collecting every covered pixel.
    pub fn rasterize_triangle(
        &self,
        v0: &ClipVertex,
        v1: &ClipVertex,
        v2: &ClipVertex,
        viewport_width: usize,
        viewport_height: usize,
    ) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        self.for_each_fragment(v0, v1, v2, viewport_width, viewport_height, |f| {
            fragments.push(f)
        });
        fragments
    }

    /// Clips one triangle against the near plane and feeds each fragment of the
    /// surviving pieces to `emit`, in row-major order per piece.
    pub fn for_each_fragment<F>(
        &self,
        v0: &ClipVertex,
        v1: &ClipVertex,
        v2: &ClipVertex,
        viewport_width: usize,
        viewport_height: usize,
        mut emit: F,
    ) where
        F: FnMut(Fragment),
    {
        for triangle in clip_triangle_to_near_plane(v0, v1, v2) {
            self.rasterize_clipped(&triangle, viewport_width, viewport_height, &mut emit);
        }
    }

    /// Rasterizes a triangle already clipped against the near plane.
    /// Performs perspective division, viewport mapping, culling and scan conversion.
    fn rasterize_clipped<F>(
        &self,
        vertices: &[ClipVertex; 3],
        viewport_width: usize,
        viewport_height: usize,
        emit: &mut F,
    ) where
        F: FnMut(Fragment),
    {
        // 1. Clipping should already guarantee positive w.
        if vertices.iter().any(|v| v.position.w <= 0.0) {
            return;
        }

        // 2. Perspective division & viewport transform
        let width = viewport_width as f64;
        let height = viewport_height as f64;
        let mut screen = [Point2::origin(); 3];
        let mut ndc_z = [0.0; 3];
        let mut inv_w = Vector3::zeros();

        for (i, v) in vertices.iter().enumerate() {
            let w = v.position.w;
            let ndc = Point3::new(v.position.x / w, v.position.y / w, v.position.z / w);
            screen[i] = ndc_to_screen(ndc.x, ndc.y, width, height);
            ndc_z[i] = ndc.z;
            inv_w[i] = 1.0 / w;
        }

        // 3. Winding & culling
        let area = edge_function(&screen[0], &screen[1], &screen[2]);

        if self.cull_mode == CullMode::Back && area <= 0.0 {
            return;
        }
        if area.abs() < MIN_AREA {
            return;
        }

        // 4. Bounding box, clamped to the viewport
        let min_x = screen.iter().map(|p| p.x).fold(f64::INFINITY, f64::min).floor();
        let max_x = screen.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max).ceil();
        let min_y = screen.iter().map(|p| p.y).fold(f64::INFINITY, f64::min).floor();
        let max_y = screen.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max).ceil();

        let start_x = min_x.max(0.0) as i64;
        let end_x = max_x.min(width - 1.0) as i64;
        let start_y = min_y.max(0.0) as i64;
        let end_y = max_y.min(height - 1.0) as i64;

        let inv_area = 1.0 / area;
        let normals = [vertices[0].normal, vertices[1].normal, vertices[2].normal];
        let uvs = [vertices[0].uv, vertices[1].uv, vertices[2].uv];
        let world = [
            vertices[0].world_position.coords,
            vertices[1].world_position.coords,
            vertices[2].world_position.coords,
        ];

        // 5. Pixel loop
        for y in start_y..=end_y {
            for x in start_x..=end_x {
                let p = Point2::new(x as f64 + 0.5, y as f64 + 0.5);

                let Some(weights) = edge_weights(&screen, &p, area) else {
                    continue;
                };
                let bary = weights * inv_area;

                let depth = linear_interpolate(&bary, ndc_z);
                let uv = perspective_interpolate(&bary, &inv_w, uvs);
                let normal = perspective_interpolate(&bary, &inv_w, normals);
                let world_position = Point3::from(perspective_interpolate(&bary, &inv_w, world));

                emit(Fragment {
                    x: x as usize,
                    y: y as usize,
                    depth,
                    uv,
                    normal,
                    world_position,
                });
            }
        }
    }
}

/// Convenience form of [`Rasterizer::rasterize_triangle`] taking the culling flag directly.
pub fn rasterize_triangle(
    v0: &ClipVertex,
    v1: &ClipVertex,
    v2: &ClipVertex,
    viewport_width: usize,
    viewport_height: usize,
    cull_back_faces: bool,
) -> Vec<Fragment> {
    Rasterizer {
        cull_mode: CullMode::from_flag(cull_back_faces),
    }
    .rasterize_triangle(v0, v1, v2, viewport_width, viewport_height)
}

/// NDC [-1, 1] to screen pixels. Screen rows grow downward, so Y is flipped.
#[inline]
pub fn ndc_to_screen(ndc_x: f64, ndc_y: f64, width: f64, height: f64) -> Point2<f64> {
    Point2::new((ndc_x + 1.0) * width / 2.0, (1.0 - ndc_y) * height / 2.0)
}

/// Unnormalized edge-function weights of `p` against the edges opposite each vertex,
/// or `None` when `p` lies outside. Inside means every weight shares the sign of `area`
/// (zero counts as inside), which accepts either winding.
#[inline]
fn edge_weights(screen: &[Point2<f64>; 3], p: &Point2<f64>, area: f64) -> Option<Vector3<f64>> {
    let w0 = edge_function(&screen[1], &screen[2], p);
    let w1 = edge_function(&screen[2], &screen[0], p);
    let w2 = edge_function(&screen[0], &screen[1], p);

    let inside = if area > 0.0 {
        w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
    } else {
        w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
    };
    inside.then(|| Vector3::new(w0, w1, w2))
}
