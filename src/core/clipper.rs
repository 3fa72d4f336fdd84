use crate::core::geometry::ClipVertex;

/// Near-plane distance in clip-space units. A vertex is kept when `z >= -w * NEAR_PLANE`.
pub const NEAR_PLANE: f64 = 1.0;

#[inline(always)]
fn is_inside(v: &ClipVertex) -> bool {
    v.position.z >= -v.position.w * NEAR_PLANE
}

/// Signed distance to the near plane in clip space; non-negative inside.
#[inline(always)]
fn plane_distance(v: &ClipVertex) -> f64 {
    v.position.z + v.position.w * NEAR_PLANE
}

/// Clips a triangle against the near plane, returning 0, 1 or 2 triangles.
///
/// Only the near plane is handled. Geometry outside the side or far planes is left to
/// the rasterizer's bounding-box clamp and coverage test.
///
/// - all inside: the input triangle, unchanged
/// - all outside: nothing
/// - one inside: `(inside, clip(inside, out0), clip(inside, out1))`
/// - two inside: `(in0, in1, c0)` and `(in1, c1, c0)`, tiling the clipped quad
pub fn clip_triangle_to_near_plane(
    v0: &ClipVertex,
    v1: &ClipVertex,
    v2: &ClipVertex,
) -> Vec<[ClipVertex; 3]> {
    let mut inside: Vec<&ClipVertex> = Vec::with_capacity(3);
    let mut outside: Vec<&ClipVertex> = Vec::with_capacity(3);

    for v in [v0, v1, v2] {
        if is_inside(v) {
            inside.push(v);
        } else {
            outside.push(v);
        }
    }

    match (inside.as_slice(), outside.as_slice()) {
        ([_, _, _], []) => vec![[*v0, *v1, *v2]],
        ([], _) => Vec::new(),
        ([i], [o1, o2]) => {
            let t1 = clip_edge(i, o1);
            let t2 = clip_edge(i, o2);
            vec![[**i, t1, t2]]
        }
        ([i1, i2], [o]) => {
            let t1 = clip_edge(i1, o);
            let t2 = clip_edge(i2, o);
            vec![[**i1, **i2, t1], [**i2, t2, t1]]
        }
        _ => unreachable!("three vertices split into inside/outside"),
    }
}

/// Point where the edge from `inside` to `outside` crosses the near plane.
/// Every attribute is interpolated with the same parameter.
fn clip_edge(inside: &ClipVertex, outside: &ClipVertex) -> ClipVertex {
    let d1 = plane_distance(inside);
    let d2 = plane_distance(outside);
    let t = d1 / (d1 - d2);
    inside.lerp(outside, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector2, Vector3, Vector4};

    fn vertex(x: f64, y: f64, z: f64, w: f64) -> ClipVertex {
        ClipVertex {
            position: Vector4::new(x, y, z, w),
            uv: Vector2::new(x, y),
            normal: Vector3::new(0.0, 0.0, 1.0),
            world_position: Point3::new(x, y, z),
        }
    }

    fn on_near_plane(v: &ClipVertex) -> bool {
        (v.position.z + v.position.w * NEAR_PLANE).abs() < 1e-12
    }

    #[test]
    fn test_all_inside_passes_through_unchanged() {
        let a = vertex(0.0, 0.5, 0.0, 1.0);
        let b = vertex(-0.5, -0.5, 0.0, 1.0);
        let c = vertex(0.5, -0.5, 0.0, 1.0);
        let out = clip_triangle_to_near_plane(&a, &b, &c);
        assert_eq!(out, vec![[a, b, c]]);
    }

    #[test]
    fn test_vertex_on_plane_counts_as_inside() {
        let a = vertex(0.0, 0.0, -1.0, 1.0);
        let b = vertex(1.0, 0.0, 0.0, 1.0);
        let c = vertex(0.0, 1.0, 0.0, 1.0);
        assert_eq!(clip_triangle_to_near_plane(&a, &b, &c).len(), 1);
    }

    #[test]
    fn test_all_outside_is_discarded() {
        let a = vertex(0.0, 0.5, -2.0, 1.0);
        let b = vertex(-0.5, -0.5, -2.0, 1.0);
        let c = vertex(0.5, -0.5, -2.0, 1.0);
        assert!(clip_triangle_to_near_plane(&a, &b, &c).is_empty());
    }

    #[test]
    fn test_one_inside_yields_one_triangle() {
        let i = vertex(0.0, 0.0, 1.0, 1.0);
        let o1 = vertex(1.0, 0.0, -3.0, 1.0);
        let o2 = vertex(0.0, 1.0, -3.0, 1.0);

        // Inside vertex listed last to check ordering is by classification.
        let out = clip_triangle_to_near_plane(&o1, &o2, &i);
        assert_eq!(out.len(), 1);

        let [a, b, c] = out[0];
        assert_eq!(a, i);
        assert!(on_near_plane(&b));
        assert!(on_near_plane(&c));

        // d1 = 2, d2 = -2 -> t = 0.5
        assert!((b.position.x - 0.5).abs() < 1e-12);
        assert!((b.uv.x - 0.5).abs() < 1e-12);
        assert!((c.position.y - 0.5).abs() < 1e-12);
        assert!((c.world_position.z - (-1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_two_inside_yields_two_triangles_sharing_the_cut() {
        let i1 = vertex(-1.0, 0.0, 0.0, 1.0);
        let i2 = vertex(1.0, 0.0, 0.0, 1.0);
        let o = vertex(0.0, 1.0, -5.0, 1.0);

        let out = clip_triangle_to_near_plane(&i1, &i2, &o);
        assert_eq!(out.len(), 2);

        let [a0, a1, t1] = out[0];
        let [b0, t2, b2] = out[1];
        assert_eq!(a0, i1);
        assert_eq!(a1, i2);
        assert_eq!(b0, i2);
        assert_eq!(b2, t1);
        assert!(on_near_plane(&t1));
        assert!(on_near_plane(&t2));

        // d1 = 1, d2 = -4 -> t = 0.2
        assert!((t1.position.x - (-0.8)).abs() < 1e-12);
        assert!((t2.position.x - 0.8).abs() < 1e-12);
        assert!((t1.position.y - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_clipped_vertices_keep_positive_w() {
        // Vertex behind the camera (w < 0) is clipped away.
        let i1 = vertex(0.0, 0.0, 2.0, 3.0);
        let i2 = vertex(1.0, 0.0, 2.0, 3.0);
        let o = vertex(0.0, 1.0, -1.0, -1.0);
        for tri in clip_triangle_to_near_plane(&i1, &i2, &o) {
            for v in tri {
                assert!(v.position.w > 0.0);
            }
        }
    }
}
