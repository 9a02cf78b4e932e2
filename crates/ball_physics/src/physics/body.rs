//! Simulated body data
//!
//! A [`CollisionObject`] bundles the three pieces of state a dynamic sphere
//! carries. Resolvers borrow it mutably and update it in place.

use crate::foundation::math::Vec3;
use crate::foundation::time::Timestamp;
use crate::physics::collision::BoundingSphere;
use crate::physics::error::{check_mass, check_radius, PhysicsResult};
use serde::{Deserialize, Serialize};

/// Position in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    /// World-space position
    pub position: Vec3,
}

impl Transform {
    /// Create a transform at `position`
    pub fn from_position(position: Vec3) -> Self {
        Self { position }
    }
}

/// Linear velocity
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Units per second
    pub velocity: Vec3,
}

impl Velocity {
    /// Create a velocity
    pub fn new(velocity: Vec3) -> Self {
        Self { velocity }
    }
}

/// Physical parameters of a sphere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Mass, must be > 0
    pub mass: f32,
    /// Restitution coefficient, expected in [0, 1]
    pub elasticity: f32,
    /// Radius, must be > 0
    pub radius: f32,
    /// Bounding sphere kept in sync with the owning transform
    pub collision_sphere: BoundingSphere,
    path: Vec<Vec3>,
}

impl Ball {
    /// Create a ball centered at `position` with an empty path
    pub fn new(mass: f32, elasticity: f32, radius: f32, position: Vec3) -> Self {
        Self {
            mass,
            elasticity,
            radius,
            collision_sphere: BoundingSphere::new(position, radius),
            path: Vec::new(),
        }
    }

    /// Recorded trail positions, oldest first
    pub fn path(&self) -> &[Vec3] {
        &self.path
    }

    /// Whether nothing has been recorded yet
    pub fn has_empty_path(&self) -> bool {
        self.path.is_empty()
    }

    /// Append a trail position. The path never shrinks.
    pub fn push_path_point(&mut self, position: Vec3) {
        self.path.push(position);
    }

    /// Check mass and radius preconditions
    pub fn validate(&self) -> PhysicsResult<()> {
        check_mass(self.mass)?;
        check_radius(self.radius)?;
        Ok(())
    }
}

/// One dynamic sphere: transform, velocity and ball parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionObject {
    /// Position
    pub transform: Transform,
    /// Velocity
    pub velocity: Velocity,
    /// Sphere parameters
    pub ball: Ball,
}

impl CollisionObject {
    /// Create a body at `position` moving with `velocity`
    pub fn new(position: Vec3, velocity: Vec3, mass: f32, elasticity: f32, radius: f32) -> Self {
        Self {
            transform: Transform::from_position(position),
            velocity: Velocity::new(velocity),
            ball: Ball::new(mass, elasticity, radius, position),
        }
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Move the body, keeping the bounding sphere in sync
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
        self.sync_collision_sphere();
    }

    /// Copy the transform position into the bounding sphere
    pub fn sync_collision_sphere(&mut self) {
        self.ball.collision_sphere.pos = self.transform.position;
    }

    /// Check the ball's preconditions
    pub fn validate(&self) -> PhysicsResult<()> {
        self.ball.validate()
    }
}

/// Timestamp of the last trail sample for one body-vs-surface context
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeComponent {
    /// When the last trail point was recorded
    pub last_point: Timestamp,
}
