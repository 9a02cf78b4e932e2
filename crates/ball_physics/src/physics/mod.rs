//! Physics module for ball collision response
//!
//! Resolves contacts between balls and between balls and static triangles:
//! impulse response, overlap correction, friction output and resting
//! correction. Which pairs get tested is up to the caller; the
//! [`stepper`] module shows one fixed per-tick ordering.

pub mod body;
pub mod collision;
pub mod config;
pub mod contact;
pub mod error;
pub mod response;
pub mod stepper;
pub mod trajectory;

pub use body::{Ball, CollisionObject, TimeComponent, Transform, Velocity};
pub use collision::{BoundingSphere, Triangle, Vertex};
pub use config::{PhysicsConfig, RestingMode, GRAVITATIONAL_PULL};
pub use contact::{contact_normal, surface_contact, SurfacePoint};
pub use error::{PhysicsError, PhysicsResult};
pub use response::{
    ball_ball_impulse, correct_ball_ball_overlap, resolve_ball_ball_impulse,
    resolve_ball_ball_impulse_mutual, resolve_ball_surface, resolve_ball_triangle, SurfaceContact,
};
pub use stepper::{PhysicsStepper, StepReport};
pub use trajectory::{record_first_touch, record_sample, TrajectoryRecorder};
