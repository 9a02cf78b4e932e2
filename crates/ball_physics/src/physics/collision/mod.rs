//! Collision geometry
//!
//! # Key Types
//!
//! - [`BoundingSphere`] - Sphere carried by every ball for quick overlap tests
//! - [`Triangle`] - Static facet with plane anchor, face normal and friction
//! - [`Vertex`] - Mesh vertex the triangle is built from

pub mod primitives;

// Re-export commonly used types
pub use primitives::{BoundingSphere, Triangle, Vertex};
