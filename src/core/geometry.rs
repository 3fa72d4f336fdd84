use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// A single model-space vertex. Owned by the model, read-only to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f64>,
    /// Texture coordinates (UV).
    pub uv: Vector2<f64>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, uv: Vector2<f64>, normal: Vector3<f64>) -> Self {
        Self {
            position,
            uv,
            normal,
        }
    }
}

/// Three vertices; winding is counter-clockwise for front faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Vertex,
    pub v1: Vertex,
    pub v2: Vertex,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self { v0, v1, v2 }
    }

    pub fn vertices(&self) -> [&Vertex; 3] {
        [&self.v0, &self.v1, &self.v2]
    }
}

/// Output of the vertex stage and input of the clipper and rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipVertex {
    /// Clip-space position (post-MVP, before the perspective divide).
    pub position: Vector4<f64>,
    pub uv: Vector2<f64>,
    /// World-space normal. Transformed by the model matrix, not renormalized.
    pub normal: Vector3<f64>,
    pub world_position: Point3<f64>,
}

impl ClipVertex {
    /// Interpolates every attribute from `self` (t = 0) towards `other` (t = 1).
    pub fn lerp(&self, other: &ClipVertex, t: f64) -> ClipVertex {
        ClipVertex {
            position: self.position + (other.position - self.position) * t,
            uv: self.uv + (other.uv - self.uv) * t,
            normal: self.normal + (other.normal - self.normal) * t,
            world_position: self.world_position + (other.world_position - self.world_position) * t,
        }
    }
}

/// A rasterized sample, consumed immediately by fragment shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub x: usize,
    pub y: usize,
    /// NDC z, blended linearly in screen space. Smaller is nearer.
    pub depth: f64,
    pub uv: Vector2<f64>,
    pub normal: Vector3<f64>,
    pub world_position: Point3<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip_vertex(position: Vector4<f64>, uv: Vector2<f64>) -> ClipVertex {
        ClipVertex {
            position,
            uv,
            normal: Vector3::new(0.0, 0.0, 1.0),
            world_position: Point3::new(position.x, position.y, position.z),
        }
    }

    #[test]
    fn test_clip_vertex_lerp_blends_every_attribute() {
        let a = clip_vertex(Vector4::new(0.0, 0.0, 0.0, 1.0), Vector2::new(0.0, 0.0));
        let mut b = clip_vertex(Vector4::new(2.0, 4.0, -2.0, 3.0), Vector2::new(1.0, 0.5));
        b.normal = Vector3::new(1.0, 0.0, 0.0);

        let m = a.lerp(&b, 0.5);
        assert_eq!(m.position, Vector4::new(1.0, 2.0, -1.0, 2.0));
        assert_eq!(m.uv, Vector2::new(0.5, 0.25));
        assert_eq!(m.normal, Vector3::new(0.5, 0.0, 0.5));
        assert_eq!(m.world_position, Point3::new(1.0, 2.0, -1.0));
    }

    #[test]
    fn test_clip_vertex_lerp_endpoints() {
        let a = clip_vertex(Vector4::new(1.0, 2.0, 3.0, 4.0), Vector2::new(0.1, 0.2));
        let b = clip_vertex(Vector4::new(-1.0, 0.0, 5.0, 2.0), Vector2::new(0.9, 0.8));
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0).position, b.position);
    }
}
