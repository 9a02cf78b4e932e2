//! Physics configuration
//!
//! Replaces ambient globals (gravity, resting model) with an explicit value
//! handed to the resolvers and the stepper.

use crate::config::{Config, ConfigError};
use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Standard gravitational pull, Y-up
pub const GRAVITATIONAL_PULL: Vec3 = Vec3::new(0.0, -9.81, 0.0);

/// How the surface resolver places a sphere after contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RestingMode {
    /// Rest exactly `radius` above the triangle's infinite plane
    #[default]
    Plane,
    /// Rest exactly `radius` away from the closest point on the filled triangle
    ClosestPoint,
}

/// Tunables shared by the resolvers and the stepper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Constant acceleration applied by the stepper's integrator
    pub gravity: Vec3,
    /// Resting correction model for sphere-triangle contacts
    pub resting_mode: RestingMode,
    /// Seconds between trail samples once a body has touched a surface
    pub path_sample_interval: f32,
    /// Whether the stepper integrates the advisory friction output
    pub apply_friction: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITATIONAL_PULL,
            resting_mode: RestingMode::Plane,
            path_sample_interval: 0.1,
            apply_friction: true,
        }
    }
}

impl PhysicsConfig {
    /// Set gravity
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the resting correction model
    pub fn with_resting_mode(mut self, mode: RestingMode) -> Self {
        self.resting_mode = mode;
        self
    }

    /// Set the trail sampling interval
    pub fn with_path_sample_interval(mut self, secs: f32) -> Self {
        self.path_sample_interval = secs;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "gravity must be finite, got {:?}",
                self.gravity
            )));
        }

        if !(self.path_sample_interval.is_finite() && self.path_sample_interval > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "path_sample_interval must be > 0, got {}",
                self.path_sample_interval
            )));
        }

        Ok(())
    }
}

impl Config for PhysicsConfig {}
