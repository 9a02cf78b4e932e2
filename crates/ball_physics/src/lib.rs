//! # Ball Physics
//!
//! Impulse-based collision response for spheres ("balls") against each other
//! and against static triangulated surfaces.
//!
//! ## Features
//!
//! - **Impulse Resolution**: Restitution-based bounces between balls
//! - **Overlap Correction**: Positional push-out with zero residual penetration
//! - **Surface Contact**: Sphere-triangle bounce, friction output and resting correction
//! - **Trails**: Diagnostic path recording per ball
//!
//! ## Quick Start
//!
//! ```rust
//! use ball_physics::prelude::*;
//!
//! fn main() -> Result<(), PhysicsError> {
//!     let a = CollisionObject::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), 1.0, 1.0, 1.0);
//!     let mut b = CollisionObject::new(Vec3::new(1.5, 0.0, 0.0), Vec3::zeros(), 1.0, 1.0, 1.0);
//!
//!     correct_ball_ball_overlap(&a, &mut b)?;
//!     resolve_ball_ball_impulse(&a, &mut b)?;
//!
//!     assert!(b.velocity.velocity.x > 0.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::{
            math::Vec3,
            time::{Clock, ManualClock, SystemClock, Timestamp},
        },
        physics::{
            correct_ball_ball_overlap, resolve_ball_ball_impulse,
            resolve_ball_ball_impulse_mutual, resolve_ball_surface, resolve_ball_triangle, Ball,
            CollisionObject, PhysicsConfig, PhysicsError, PhysicsResult, PhysicsStepper,
            RestingMode, SurfaceContact, TimeComponent, Triangle, Vertex,
        },
    };
}
