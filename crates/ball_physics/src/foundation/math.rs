//! Math utilities and types
//!
//! Thin aliases over nalgebra so the physics code reads in terms of
//! `Vec3`/`Vec2` rather than generic matrix types.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type (texture coordinates)
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Lengths below this are treated as zero when normalizing
pub const EPSILON: f32 = 1.0e-6;

/// Math utility functions
pub mod utils {
    use super::{Vec3, EPSILON};

    /// Normalize `v`, returning `None` if it is too short to carry a direction
    pub fn try_normalize(v: &Vec3) -> Option<Vec3> {
        v.try_normalize(EPSILON)
    }

    /// Signed distance from `point` to the plane through `anchor` with normal `normal`
    ///
    /// `normal` does not have to be unit length; it is normalized here.
    pub fn signed_plane_distance(point: &Vec3, anchor: &Vec3, normal: &Vec3) -> Option<f32> {
        try_normalize(normal).map(|n| (point - anchor).dot(&n))
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_try_normalize_rejects_zero() {
        assert!(try_normalize(&Vec3::zeros()).is_none());
        assert!(try_normalize(&Vec3::new(0.0, 1.0e-9, 0.0)).is_none());
    }

    #[test]
    fn test_signed_plane_distance_non_unit_normal() {
        let d = signed_plane_distance(
            &Vec3::new(3.0, 5.0, -2.0),
            &Vec3::new(0.0, 1.0, 0.0),
            &Vec3::new(0.0, 4.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(d, 4.0, epsilon = 1e-6);

        let below = signed_plane_distance(&Vec3::zeros(), &Vec3::new(0.0, 1.0, 0.0), &Vec3::y())
            .unwrap();
        assert_relative_eq!(below, -1.0, epsilon = 1e-6);
    }
}
