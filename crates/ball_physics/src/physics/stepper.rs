//! Reference per-tick stepper
//!
//! Runs the resolvers in one fixed order every tick:
//!
//! 1. integrate gravity and last tick's friction, then positions
//! 2. ball-ball: detect, resolve impulses, correct overlap
//! 3. ball-triangle: detect, resolve (impulse, friction, resting correction)
//! 4. sample trails
//!
//! Candidate detection is brute force over the slices the caller passes
//! in; there is no spatial acceleration structure.

use crate::foundation::math::Vec3;
use crate::foundation::time::Clock;
use crate::physics::body::{CollisionObject, TimeComponent};
use crate::physics::collision::Triangle;
use crate::physics::config::PhysicsConfig;
use crate::physics::error::PhysicsResult;
use crate::physics::response::{
    correct_ball_ball_overlap, resolve_ball_ball_impulse_mutual, resolve_ball_triangle,
};
use crate::physics::trajectory::TrajectoryRecorder;

/// Counters for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Ball pairs whose bounding spheres touched
    pub ball_contacts: usize,
    /// Ball pairs that received an impulse
    pub ball_impulses: usize,
    /// Ball pairs pushed apart
    pub overlaps_corrected: usize,
    /// Ball-triangle contacts resolved
    pub surface_contacts: usize,
    /// Ball-triangle contacts that received an impulse
    pub surface_impulses: usize,
    /// Trail points appended by interval sampling
    pub trail_samples: usize,
}

/// Drives the resolvers over a set of balls and static triangles
#[derive(Debug, Default)]
pub struct PhysicsStepper {
    config: PhysicsConfig,
    time_ctxs: Vec<TimeComponent>,
    pending_friction: Vec<Vec3>,
}

impl PhysicsStepper {
    /// Create a stepper
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            time_ctxs: Vec::new(),
            pending_friction: Vec::new(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Friction force each ball will feel during the next integration
    pub fn pending_friction(&self) -> &[Vec3] {
        &self.pending_friction
    }

    /// Advance every ball by `dt` seconds
    ///
    /// `objects` must keep the same order between calls; per-ball trail
    /// timing and friction are tracked by index. Any precondition violation
    /// aborts the tick and is returned.
    pub fn step(
        &mut self,
        objects: &mut [CollisionObject],
        triangles: &[Triangle],
        clock: &dyn Clock,
        dt: f32,
    ) -> PhysicsResult<StepReport> {
        self.time_ctxs.resize_with(objects.len(), TimeComponent::default);
        self.pending_friction.resize(objects.len(), Vec3::zeros());

        for obj in objects.iter() {
            obj.validate()?;
        }

        let mut report = StepReport::default();

        self.integrate(objects, dt);
        self.resolve_ball_pairs(objects, &mut report)?;
        self.resolve_surfaces(objects, triangles, clock, &mut report)?;

        let recorder = TrajectoryRecorder::new(clock, self.config.path_sample_interval);
        for (obj, time_ctx) in objects.iter_mut().zip(self.time_ctxs.iter_mut()) {
            let position = obj.transform.position;
            if recorder.sample(&mut obj.ball, time_ctx, position) {
                report.trail_samples += 1;
            }
        }

        log::trace!("Physics step: {:?}", report);
        Ok(report)
    }

    /// Semi-implicit Euler with gravity and advisory friction
    fn integrate(&self, objects: &mut [CollisionObject], dt: f32) {
        for (obj, friction) in objects.iter_mut().zip(self.pending_friction.iter()) {
            let velocity = &mut obj.velocity.velocity;

            if self.config.apply_friction {
                if let Some(direction) = friction.try_normalize(0.0) {
                    // Friction may stop motion along its axis but never reverse it
                    let delta = friction.magnitude() / obj.ball.mass * dt;
                    let opposing_speed = (-velocity.dot(&direction)).max(0.0);
                    *velocity += direction * delta.min(opposing_speed);
                }
            }

            *velocity += self.config.gravity * dt;
            obj.transform.position += *velocity * dt;
            obj.sync_collision_sphere();
        }
    }

    fn resolve_ball_pairs(
        &self,
        objects: &mut [CollisionObject],
        report: &mut StepReport,
    ) -> PhysicsResult<()> {
        for j in 1..objects.len() {
            for i in 0..j {
                let (a, b) = pair_mut(objects, i, j);
                if !a.ball.collision_sphere.intersects(&b.ball.collision_sphere) {
                    continue;
                }
                report.ball_contacts += 1;

                if resolve_ball_ball_impulse_mutual(a, b)?.is_some() {
                    report.ball_impulses += 1;
                }
                if correct_ball_ball_overlap(a, b)?.is_some() {
                    report.overlaps_corrected += 1;
                }
            }
        }
        Ok(())
    }

    fn resolve_surfaces(
        &mut self,
        objects: &mut [CollisionObject],
        triangles: &[Triangle],
        clock: &dyn Clock,
        report: &mut StepReport,
    ) -> PhysicsResult<()> {
        for (index, obj) in objects.iter_mut().enumerate() {
            self.pending_friction[index] = Vec3::zeros();

            for triangle in triangles {
                if !triangle.touches_sphere(&obj.ball.collision_sphere) {
                    continue;
                }

                let contact = resolve_ball_triangle(
                    obj,
                    triangle,
                    &mut self.time_ctxs[index],
                    clock,
                    &self.config,
                )
                .map_err(|err| {
                    log::error!("Ball {index} against triangle failed: {err}");
                    err
                })?;

                report.surface_contacts += 1;
                if contact.impulse.is_some() {
                    report.surface_impulses += 1;
                }
                self.pending_friction[index] = contact.friction.unwrap_or_else(Vec3::zeros);
            }
        }
        Ok(())
    }
}

/// Two distinct mutable elements, `i < j`
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j);
    let (left, right) = items.split_at_mut(j);
    (&mut left[i], &mut right[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::time::ManualClock;
    use crate::physics::error::PhysicsError;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    /// 40x40 quad at y = 0 facing +Y
    fn ground(friction: f32) -> Vec<Triangle> {
        vec![
            Triangle::from_points(
                Vec3::new(-20.0, 0.0, -20.0),
                Vec3::new(-20.0, 0.0, 20.0),
                Vec3::new(20.0, 0.0, -20.0),
                friction,
            ),
            Triangle::from_points(
                Vec3::new(20.0, 0.0, 20.0),
                Vec3::new(20.0, 0.0, -20.0),
                Vec3::new(-20.0, 0.0, 20.0),
                friction,
            ),
        ]
    }

    fn run(
        stepper: &mut PhysicsStepper,
        objects: &mut [CollisionObject],
        triangles: &[Triangle],
        clock: &ManualClock,
        steps: usize,
    ) {
        for _ in 0..steps {
            stepper.step(objects, triangles, clock, DT).unwrap();
            clock.advance(f64::from(DT));
        }
    }

    #[test]
    fn test_dropped_ball_settles_on_ground() {
        let clock = ManualClock::default();
        let mut stepper = PhysicsStepper::new(PhysicsConfig::default());
        let mut objects = vec![CollisionObject::new(Vec3::new(1.0, 3.0, 2.0), Vec3::zeros(), 1.0, 0.5, 1.0)];
        let triangles = ground(0.1);

        run(&mut stepper, &mut objects, &triangles, &clock, 600);

        let ball = &objects[0];
        assert!(ball.position().y >= 1.0 - 1e-4);
        assert!(ball.position().y < 1.05);
        assert_eq!(ball.ball.collision_sphere.pos, ball.position());
        assert!(ball.ball.path().len() > 1);
    }

    #[test]
    fn test_fast_small_ball_never_sinks_through_ground() {
        let clock = ManualClock::default();
        let mut stepper = PhysicsStepper::new(PhysicsConfig::default());
        let mut objects = vec![CollisionObject::new(
            Vec3::new(-5.0, 0.25, -3.0),
            Vec3::new(0.0, -20.0, 0.0),
            1.0,
            0.8,
            0.2,
        )];
        let triangles = ground(0.0);

        let mut impulses = 0;
        for _ in 0..120 {
            let report = stepper.step(&mut objects, &triangles, &clock, DT).unwrap();
            clock.advance(f64::from(DT));
            impulses += report.surface_impulses;
            assert!(objects[0].position().y > 0.0);
        }

        assert!(impulses > 0);
    }

    #[test]
    fn test_head_on_balls_swap_velocities() {
        let clock = ManualClock::default();
        let config = PhysicsConfig::default().with_gravity(Vec3::zeros());
        let mut stepper = PhysicsStepper::new(config);
        let mut objects = vec![
            CollisionObject::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), 1.0, 1.0, 1.0),
            CollisionObject::new(Vec3::new(2.05, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), 1.0, 1.0, 1.0),
        ];

        let report = stepper.step(&mut objects, &[], &clock, 0.1).unwrap();

        assert_eq!(report.ball_contacts, 1);
        assert_eq!(report.ball_impulses, 1);
        assert_eq!(report.overlaps_corrected, 1);
        assert_relative_eq!(objects[0].velocity.velocity, Vec3::new(-1.0, 0.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(objects[1].velocity.velocity, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
        let distance = (objects[1].position() - objects[0].position()).magnitude();
        assert_relative_eq!(distance, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_friction_stops_sliding_ball_without_reversing() {
        let clock = ManualClock::default();
        let mut stepper = PhysicsStepper::new(PhysicsConfig::default());
        let mut objects = vec![CollisionObject::new(Vec3::new(-8.0, 1.0, -8.0), Vec3::new(1.0, 0.0, 0.0), 2.0, 0.0, 1.0)];
        let triangles = ground(0.5);

        let mut last_vx = objects[0].velocity.velocity.x;
        for _ in 0..240 {
            stepper.step(&mut objects, &triangles, &clock, DT).unwrap();
            clock.advance(f64::from(DT));

            let vx = objects[0].velocity.velocity.x;
            assert!(vx <= last_vx + 1e-6);
            assert!(vx >= -1e-6);
            last_vx = vx;
        }

        assert!(last_vx < 1e-4);
        assert!(objects[0].position().x > -7.5);
    }

    #[test]
    fn test_friction_can_be_disabled() {
        let clock = ManualClock::default();
        let config = PhysicsConfig {
            apply_friction: false,
            ..PhysicsConfig::default()
        };
        let mut stepper = PhysicsStepper::new(config);
        let mut objects = vec![CollisionObject::new(Vec3::new(-8.0, 1.0, -8.0), Vec3::new(1.0, 0.0, 0.0), 2.0, 0.0, 1.0)];

        run(&mut stepper, &mut objects, &ground(0.5), &clock, 30);

        assert_relative_eq!(objects[0].velocity.velocity.x, 1.0, epsilon = 1e-5);
        assert!(stepper.pending_friction()[0].x < 0.0);
    }

    #[test]
    fn test_invalid_body_aborts_step() {
        let clock = ManualClock::default();
        let mut stepper = PhysicsStepper::new(PhysicsConfig::default());
        let mut objects = vec![CollisionObject::new(Vec3::new(0.0, 5.0, 0.0), Vec3::zeros(), -1.0, 0.5, 1.0)];

        let result = stepper.step(&mut objects, &ground(0.1), &clock, DT);

        assert_eq!(result, Err(PhysicsError::InvalidMass { mass: -1.0 }));
        assert_eq!(objects[0].position(), Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_pair_mut_returns_distinct_elements() {
        let mut values = [1, 2, 3, 4];
        let (a, b) = pair_mut(&mut values, 1, 3);
        std::mem::swap(a, b);
        assert_eq!(values, [1, 4, 3, 2]);
    }
}
