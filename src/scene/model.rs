use crate::core::geometry::{Triangle, Vertex};
use nalgebra::{Point3, Vector2, Vector3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// A triangle soup with its bounds. Produced by the loaders, read-only to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub triangles: Vec<Triangle>,
    pub bounding_box: Aabb,
    pub center: Point3<f64>,
}

impl Model {
    /// Computes bounds over every vertex of `triangles`. An empty list gets a
    /// zero-size box at the origin.
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

        for vertex in triangles.iter().flat_map(|t| t.vertices()) {
            let p = vertex.position;
            min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }

        if triangles.is_empty() {
            min = Point3::origin();
            max = Point3::origin();
        }

        let bounding_box = Aabb { min, max };
        Self {
            center: bounding_box.center(),
            bounding_box,
            triangles,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// A single counter-clockwise triangle in the z = 0 plane, facing +Z.
    pub fn create_test_triangle() -> Self {
        let normal = Vector3::z();
        Self::new(vec![Triangle::new(
            // Bottom left, bottom right, top
            Vertex::new(Point3::new(-0.5, -0.5, 0.0), Vector2::new(0.0, 0.0), normal),
            Vertex::new(Point3::new(0.5, -0.5, 0.0), Vector2::new(1.0, 0.0), normal),
            Vertex::new(Point3::new(0.0, 0.5, 0.0), Vector2::new(0.5, 1.0), normal),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_cover_all_vertices() {
        let v = |x: f64, y: f64, z: f64| {
            Vertex::new(Point3::new(x, y, z), Vector2::zeros(), Vector3::z())
        };
        let model = Model::new(vec![
            Triangle::new(v(0.0, 0.0, 0.0), v(2.0, 0.0, 0.0), v(0.0, 1.0, 0.0)),
            Triangle::new(v(-1.0, 0.0, 3.0), v(0.0, 4.0, 0.0), v(0.0, 0.0, -2.0)),
        ]);
        assert_eq!(model.bounding_box.min, Point3::new(-1.0, 0.0, -2.0));
        assert_eq!(model.bounding_box.max, Point3::new(2.0, 4.0, 3.0));
        assert_eq!(model.center, Point3::new(0.5, 2.0, 0.5));
        assert_eq!(model.bounding_box.size(), Vector3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn test_empty_model_has_zero_bounds() {
        let model = Model::new(Vec::new());
        assert_eq!(model.triangle_count(), 0);
        assert_eq!(model.bounding_box.size(), Vector3::zeros());
        assert_eq!(model.center, Point3::origin());
    }

    #[test]
    fn test_triangle_is_counter_clockwise_from_front() {
        let model = Model::create_test_triangle();
        let t = &model.triangles[0];
        let n = (t.v1.position - t.v0.position).cross(&(t.v2.position - t.v0.position));
        assert!(n.z > 0.0);
        assert_eq!(model.center, Point3::origin());
    }
}
