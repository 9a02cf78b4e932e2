//! Physics error types
//!
//! Every variant is a caller bug (a precondition the caller should have
//! guaranteed). Resolvers check them before touching any state and hand
//! them back instead of clamping, so a bad body halts the tick loudly.

use thiserror::Error;

/// Errors reported by the collision resolvers
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PhysicsError {
    /// Mass (or combined mass) is zero, negative or not finite
    #[error("Invalid mass: {mass} (must be finite and > 0)")]
    InvalidMass {
        /// The offending mass
        mass: f32,
    },

    /// Radius is zero, negative or not finite
    #[error("Invalid radius: {radius} (must be finite and > 0)")]
    InvalidRadius {
        /// The offending radius
        radius: f32,
    },

    /// Two positions coincide, so no contact direction exists
    #[error("Degenerate contact normal: positions coincide")]
    DegenerateNormal,

    /// Triangle face normal has zero length
    #[error("Degenerate triangle: face normal has zero length")]
    DegenerateTriangle,
}

/// Result alias for physics operations
pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// Check that a mass is usable as a divisor
pub(crate) fn check_mass(mass: f32) -> PhysicsResult<f32> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(PhysicsError::InvalidMass { mass })
    }
}

/// Check that a radius describes a real sphere
pub(crate) fn check_radius(radius: f32) -> PhysicsResult<f32> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(PhysicsError::InvalidRadius { radius })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_checks() {
        assert_eq!(check_mass(2.0), Ok(2.0));
        assert_eq!(check_mass(0.0), Err(PhysicsError::InvalidMass { mass: 0.0 }));
        assert!(check_mass(-1.0).is_err());
        assert!(check_mass(f32::NAN).is_err());
        assert!(check_mass(f32::INFINITY).is_err());
    }

    #[test]
    fn test_radius_checks() {
        assert_eq!(check_radius(0.5), Ok(0.5));
        assert!(check_radius(0.0).is_err());
        assert!(check_radius(-0.5).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = PhysicsError::InvalidMass { mass: -1.0 };
        assert!(err.to_string().contains("-1"));
        assert_eq!(
            PhysicsError::DegenerateNormal.to_string(),
            "Degenerate contact normal: positions coincide"
        );
    }
}
