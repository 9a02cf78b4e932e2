//! Primitive collision shapes and proximity queries
//!
//! Provides the bounding sphere carried by every ball and the static
//! triangle facet balls collide with.

use crate::foundation::math::{utils, Vec2, Vec3};
use crate::physics::error::{PhysicsError, PhysicsResult};
use serde::{Deserialize, Serialize};

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub pos: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(pos: Vec3, radius: f32) -> Self {
        Self { pos, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.pos - other.pos).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check whether a point lies inside or on the sphere
    pub fn contains_point(&self, point: &Vec3) -> bool {
        (point - self.pos).magnitude_squared() <= self.radius * self.radius
    }
}

/// Mesh vertex as supplied by the asset pipeline
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    /// Position in world space
    pub pos: Vec3,
    /// Vertex normal
    pub normal: Vec3,
    /// Texture coordinate
    pub uv: Vec2,
}

impl Vertex {
    /// Vertex with only a position
    pub fn at(pos: Vec3) -> Self {
        Self {
            pos,
            ..Default::default()
        }
    }
}

/// A static triangle facet balls can collide with
///
/// `face_position` anchors the facet's plane and `n` is its face normal.
/// `n` is not required to be unit length; consumers normalize it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// First vertex
    pub a: Vertex,
    /// Second vertex
    pub b: Vertex,
    /// Third vertex
    pub c: Vertex,
    /// Plane anchor (the position of `a`)
    pub face_position: Vec3,
    /// Face normal
    pub n: Vec3,
    /// Surface friction coefficient
    pub friction_constant: f32,
}

impl Triangle {
    /// Creates a triangle, deriving the face normal from the winding (right-hand rule)
    pub fn new(a: Vertex, b: Vertex, c: Vertex, friction_constant: f32) -> Self {
        let n = (b.pos - a.pos).cross(&(c.pos - a.pos));
        Self::with_normal(a, b, c, n, friction_constant)
    }

    /// Creates a triangle with an explicitly supplied face normal
    pub fn with_normal(a: Vertex, b: Vertex, c: Vertex, n: Vec3, friction_constant: f32) -> Self {
        Self {
            a,
            b,
            c,
            face_position: a.pos,
            n,
            friction_constant,
        }
    }

    /// Creates a triangle from bare positions
    pub fn from_points(v0: Vec3, v1: Vec3, v2: Vec3, friction_constant: f32) -> Self {
        Self::new(Vertex::at(v0), Vertex::at(v1), Vertex::at(v2), friction_constant)
    }

    /// Unit face normal
    pub fn unit_normal(&self) -> PhysicsResult<Vec3> {
        utils::try_normalize(&self.n).ok_or(PhysicsError::DegenerateTriangle)
    }

    /// Signed distance from `point` to the facet's plane, along the unit face normal
    pub fn signed_distance(&self, point: &Vec3) -> PhysicsResult<f32> {
        utils::signed_plane_distance(point, &self.face_position, &self.n)
            .ok_or(PhysicsError::DegenerateTriangle)
    }

    /// Get the closest point on the filled triangle to a given point
    ///
    /// Classifies `point` against the vertex, edge and face Voronoi regions.
    pub fn closest_point(&self, point: &Vec3) -> Vec3 {
        let (v0, v1, v2) = (self.a.pos, self.b.pos, self.c.pos);
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let v0_to_point = point - v0;
        let d1 = edge1.dot(&v0_to_point);
        let d2 = edge2.dot(&v0_to_point);
        if d1 <= 0.0 && d2 <= 0.0 {
            return v0;
        }

        let v1_to_point = point - v1;
        let d3 = edge1.dot(&v1_to_point);
        let d4 = edge2.dot(&v1_to_point);
        if d3 >= 0.0 && d4 <= d3 {
            return v1;
        }

        let vc = d1 * d4 - d3 * d2;
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let t = d1 / (d1 - d3);
            return v0 + edge1 * t;
        }

        let v2_to_point = point - v2;
        let d5 = edge1.dot(&v2_to_point);
        let d6 = edge2.dot(&v2_to_point);
        if d6 >= 0.0 && d5 <= d6 {
            return v2;
        }

        let vb = d5 * d2 - d1 * d6;
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let t = d2 / (d2 - d6);
            return v0 + edge2 * t;
        }

        let va = d3 * d6 - d5 * d4;
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let t = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return v1 + (v2 - v1) * t;
        }

        // Inside the face
        let denom = 1.0 / (va + vb + vc);
        let v = vb * denom;
        let w = vc * denom;
        v0 + edge1 * v + edge2 * w
    }

    /// Whether a sphere touches the filled triangle
    pub fn touches_sphere(&self, sphere: &BoundingSphere) -> bool {
        sphere.contains_point(&self.closest_point(&sphere.pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn floor() -> Triangle {
        // Counter-clockwise seen from +Y, so the derived normal points up
        Triangle::from_points(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(4.0, 0.0, 0.0),
            0.3,
        )
    }

    #[test]
    fn test_bounding_sphere_intersection() {
        let a = BoundingSphere::new(Vec3::zeros(), 1.0);
        let b = BoundingSphere::new(Vec3::new(1.5, 0.0, 0.0), 1.0);
        let c = BoundingSphere::new(Vec3::new(3.0, 0.0, 0.0), 1.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_derived_normal_and_anchor() {
        let tri = floor();
        assert_relative_eq!(tri.unit_normal().unwrap(), Vec3::y(), epsilon = 1e-6);
        assert_eq!(tri.face_position, tri.a.pos);
        assert_relative_eq!(tri.signed_distance(&Vec3::new(1.0, 2.5, 1.0)).unwrap(), 2.5, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_triangle() {
        let tri = Triangle::from_points(Vec3::zeros(), Vec3::x(), Vec3::x() * 2.0, 0.0);
        assert_eq!(tri.unit_normal(), Err(PhysicsError::DegenerateTriangle));
        assert!(tri.signed_distance(&Vec3::y()).is_err());
    }

    #[test]
    fn test_closest_point_regions() {
        let tri = floor();

        // Face interior projects straight down
        assert_relative_eq!(
            tri.closest_point(&Vec3::new(1.0, 3.0, 1.0)),
            Vec3::new(1.0, 0.0, 1.0),
            epsilon = 1e-6
        );

        // Vertex region
        assert_relative_eq!(
            tri.closest_point(&Vec3::new(-1.0, 1.0, -1.0)),
            Vec3::zeros(),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            tri.closest_point(&Vec3::new(6.0, 0.0, -1.0)),
            Vec3::new(4.0, 0.0, 0.0),
            epsilon = 1e-6
        );

        // Edge region along the x axis
        assert_relative_eq!(
            tri.closest_point(&Vec3::new(2.0, 1.0, -3.0)),
            Vec3::new(2.0, 0.0, 0.0),
            epsilon = 1e-6
        );

        // Hypotenuse edge
        assert_relative_eq!(
            tri.closest_point(&Vec3::new(3.0, 0.0, 3.0)),
            Vec3::new(2.0, 0.0, 2.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_touches_sphere() {
        let tri = floor();
        assert!(tri.touches_sphere(&BoundingSphere::new(Vec3::new(1.0, 0.9, 1.0), 1.0)));
        assert!(!tri.touches_sphere(&BoundingSphere::new(Vec3::new(1.0, 1.1, 1.0), 1.0)));
        assert!(!tri.touches_sphere(&BoundingSphere::new(Vec3::new(8.0, 0.5, 8.0), 1.0)));
    }
}
