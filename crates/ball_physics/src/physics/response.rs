//! Collision response for balls
//!
//! Impulse resolution, overlap correction and sphere-triangle contact.
//! Every function validates its inputs before touching any state, so an
//! `Err` always leaves the bodies exactly as they were.
//!
//! # Tick ordering
//!
//! Resolving impulses before or after positional correction gives different
//! results. These functions do not pick an order; callers should use one
//! fixed order per tick (see [`crate::physics::stepper`]).

use crate::foundation::math::Vec3;
use crate::foundation::time::Clock;
use crate::physics::body::{CollisionObject, TimeComponent};
use crate::physics::collision::Triangle;
use crate::physics::config::{PhysicsConfig, RestingMode};
use crate::physics::contact::{contact_normal, surface_contact};
use crate::physics::error::{check_mass, check_radius, PhysicsResult};
use crate::physics::trajectory::record_first_touch;

/// Bounce `b` off `a`, changing only `b`'s velocity
///
/// Uses the combined mass and the product of both elasticities, so both
/// balls have to be bouncy for a bouncy collision. Pairs that are already
/// separating along the contact normal are left alone (`Ok(None)`).
///
/// Only `b` reacts. For a mutual response call it twice with the arguments
/// swapped, or use [`resolve_ball_ball_impulse_mutual`].
///
/// Returns the impulse applied to `b`.
pub fn resolve_ball_ball_impulse(
    a: &CollisionObject,
    b: &mut CollisionObject,
) -> PhysicsResult<Option<Vec3>> {
    check_mass(a.ball.mass)?;
    check_mass(b.ball.mass)?;
    let normal = contact_normal(&a.transform.position, &b.transform.position)?;

    let combined_mass = check_mass(a.ball.mass + b.ball.mass)?;
    let elasticity = a.ball.elasticity * b.ball.elasticity;
    let relative_velocity = b.velocity.velocity - a.velocity.velocity;

    let closing_speed = relative_velocity.dot(&normal);
    if closing_speed >= 0.0 {
        log::trace!("Ball pair separating (closing speed {closing_speed}), no impulse");
        return Ok(None);
    }

    let j = -(1.0 + elasticity) * closing_speed * combined_mass;
    let impulse = normal * j;
    b.velocity.velocity += impulse / combined_mass;

    log::trace!("Ball-ball impulse {:?} (closing speed {closing_speed})", impulse);
    Ok(Some(impulse))
}

/// Impulse that `b` receives in a mutual ball-ball collision
///
/// `a` receives the opposite impulse. Uses reduced mass, so momentum is
/// conserved. Returns `Ok(None)` for separating pairs. Does not mutate.
pub fn ball_ball_impulse(a: &CollisionObject, b: &CollisionObject) -> PhysicsResult<Option<Vec3>> {
    let mass_a = check_mass(a.ball.mass)?;
    let mass_b = check_mass(b.ball.mass)?;
    let normal = contact_normal(&a.transform.position, &b.transform.position)?;

    let elasticity = a.ball.elasticity * b.ball.elasticity;
    let closing_speed = (b.velocity.velocity - a.velocity.velocity).dot(&normal);
    if closing_speed >= 0.0 {
        return Ok(None);
    }

    let j = -(1.0 + elasticity) * closing_speed / (1.0 / mass_a + 1.0 / mass_b);
    Ok(Some(normal * j))
}

/// Apply [`ball_ball_impulse`] to both balls
pub fn resolve_ball_ball_impulse_mutual(
    a: &mut CollisionObject,
    b: &mut CollisionObject,
) -> PhysicsResult<Option<Vec3>> {
    let impulse = ball_ball_impulse(a, b)?;
    if let Some(impulse) = impulse {
        a.velocity.velocity -= impulse / a.ball.mass;
        b.velocity.velocity += impulse / b.ball.mass;
        log::trace!("Mutual ball-ball impulse {:?}", impulse);
    }
    Ok(impulse)
}

/// Push `b` out of `a` so the two spheres just touch
///
/// Moves `b` along the contact normal by the penetration depth and syncs
/// its bounding sphere. Velocities are untouched. Returns the depth that
/// was corrected, or `Ok(None)` if the spheres did not overlap.
pub fn correct_ball_ball_overlap(
    a: &CollisionObject,
    b: &mut CollisionObject,
) -> PhysicsResult<Option<f32>> {
    let radius_sum = check_radius(a.ball.radius)? + check_radius(b.ball.radius)?;
    let distance = (a.transform.position - b.transform.position).magnitude();
    if distance >= radius_sum {
        return Ok(None);
    }

    let normal = contact_normal(&a.transform.position, &b.transform.position)?;
    let depth = radius_sum - distance;
    b.set_position(b.transform.position + normal * depth);

    log::trace!("Corrected ball overlap of {depth}");
    Ok(Some(depth))
}

/// Outcome of a sphere-triangle resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceContact {
    /// Closest point on the triangle before correction
    pub closest_point: Vec3,
    /// Unit normal from the sphere center toward `closest_point`
    pub normal: Vec3,
    /// Impulse applied, `None` if the sphere was moving away from the surface
    pub impulse: Option<Vec3>,
    /// Friction force opposing the new velocity, `None` when at rest
    ///
    /// Advisory: the caller decides whether and how to integrate it.
    pub friction: Option<Vec3>,
    /// Displacement applied by the resting correction
    pub correction: Vec3,
}

/// Resolve a ball against a static triangle, recording its first touch
///
/// Seeds the ball's path on its first surface evaluation, then runs
/// [`resolve_ball_surface`].
pub fn resolve_ball_triangle(
    obj: &mut CollisionObject,
    triangle: &Triangle,
    time_ctx: &mut TimeComponent,
    clock: &dyn Clock,
    config: &PhysicsConfig,
) -> PhysicsResult<SurfaceContact> {
    obj.validate()?;
    triangle.unit_normal()?;

    let position = obj.transform.position;
    record_first_touch(&mut obj.ball, time_ctx, position, clock);
    resolve_ball_surface(obj, triangle, config)
}

/// Resolve a ball against a static triangle
///
/// The triangle is treated as infinitely massive: only the ball's own mass
/// and elasticity enter the impulse. The impulse is only applied while the
/// ball moves toward the surface; a center already behind the face counts
/// as moving toward it when it moves further back. Afterwards the ball is placed exactly one
/// radius off the surface as chosen by [`PhysicsConfig::resting_mode`].
///
/// With [`RestingMode::Plane`] the triangle's infinite plane is used, so a
/// ball hanging over an edge is still lifted to plane height.
pub fn resolve_ball_surface(
    obj: &mut CollisionObject,
    triangle: &Triangle,
    config: &PhysicsConfig,
) -> PhysicsResult<SurfaceContact> {
    obj.validate()?;
    let face_normal = triangle.unit_normal()?;
    let contact = surface_contact(&obj.transform.position, triangle)?;

    let position = obj.transform.position;
    let radius = obj.ball.radius;
    let plane_distance = (position - triangle.face_position).dot(&face_normal);

    // Centers behind the face end up on the front side, so they bounce off the back-facing normal
    let impulse_normal = if plane_distance < 0.0 {
        -face_normal
    } else {
        contact.normal
    };

    let mass = obj.ball.mass;
    let velocity = &mut obj.velocity.velocity;

    let closing_speed = velocity.dot(&impulse_normal);
    let impulse = if closing_speed > 0.0 {
        let j = -(1.0 + obj.ball.elasticity) * closing_speed * mass;
        let impulse = impulse_normal * j;
        *velocity += impulse / mass;
        Some(impulse)
    } else {
        None
    };

    let friction = velocity
        .try_normalize(0.0)
        .map(|direction| -direction * (triangle.friction_constant * mass));

    let plane_correction = face_normal * (radius - plane_distance);

    let correction = match config.resting_mode {
        RestingMode::Plane => plane_correction,
        // Centers behind the face fall back to the plane so they are pushed out the front
        RestingMode::ClosestPoint if plane_distance < 0.0 => plane_correction,
        RestingMode::ClosestPoint => (contact.closest_point - contact.normal * radius) - position,
    };
    obj.set_position(position + correction);

    log::trace!(
        "Ball-triangle contact at {:?}: impulse {:?}, correction {:?}",
        contact.closest_point,
        impulse,
        correction
    );

    Ok(SurfaceContact {
        closest_point: contact.closest_point,
        normal: contact.normal,
        impulse,
        friction,
        correction,
    })
}
