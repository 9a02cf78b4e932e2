//! Contact geometry
//!
//! Normals here always point from the first argument toward the second:
//! from sphere A toward sphere B, or from a sphere's center toward the
//! surface it touches.

use crate::foundation::math::{utils, Vec3};
use crate::physics::collision::Triangle;
use crate::physics::error::{PhysicsError, PhysicsResult};

/// Unit normal pointing from `pos_a` toward `pos_b`
///
/// Coincident positions have no direction and are reported as
/// [`PhysicsError::DegenerateNormal`].
pub fn contact_normal(pos_a: &Vec3, pos_b: &Vec3) -> PhysicsResult<Vec3> {
    utils::try_normalize(&(pos_b - pos_a)).ok_or(PhysicsError::DegenerateNormal)
}

/// Contact between a sphere center and a triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    /// Closest point on the filled triangle
    pub closest_point: Vec3,
    /// Unit normal from the sphere center toward `closest_point`
    pub normal: Vec3,
}

/// Closest point on `triangle` to `center` and the normal pointing at it
///
/// When the center lies on the triangle itself the reversed face normal is
/// used, which still points "into" the surface from the front side.
pub fn surface_contact(center: &Vec3, triangle: &Triangle) -> PhysicsResult<SurfacePoint> {
    let closest_point = triangle.closest_point(center);
    let normal = match utils::try_normalize(&(closest_point - center)) {
        Some(normal) => normal,
        None => -triangle.unit_normal()?,
    };

    Ok(SurfacePoint {
        closest_point,
        normal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_contact_normal_points_a_to_b() {
        let n = contact_normal(&Vec3::zeros(), &Vec3::new(3.0, 0.0, 0.0)).unwrap();
        assert_relative_eq!(n, Vec3::x(), epsilon = 1e-6);

        let n = contact_normal(&Vec3::new(1.0, 1.0, 0.0), &Vec3::zeros()).unwrap();
        assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-6);
        assert!(n.x < 0.0 && n.y < 0.0);
    }

    #[test]
    fn test_contact_normal_coincident_fails() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(contact_normal(&p, &p), Err(PhysicsError::DegenerateNormal));
    }

    #[test]
    fn test_surface_contact_points_at_surface() {
        let tri = Triangle::from_points(
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(5.0, 0.0, -5.0),
            0.0,
        );
        let contact = surface_contact(&Vec3::new(0.0, 2.0, 0.0), &tri).unwrap();
        assert_relative_eq!(contact.closest_point, Vec3::zeros(), epsilon = 1e-6);
        assert_relative_eq!(contact.normal, -Vec3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_surface_contact_on_surface_uses_face_normal() {
        let tri = Triangle::from_points(
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(5.0, 0.0, -5.0),
            0.0,
        );
        let contact = surface_contact(&Vec3::zeros(), &tri).unwrap();
        assert_relative_eq!(contact.normal, -Vec3::y(), epsilon = 1e-6);
    }
}
