//! Trail recording for balls
//!
//! Purely diagnostic: nothing here affects the physical state. The path
//! is seeded the first time a ball is evaluated against a surface and can
//! then be sampled at a fixed interval.

use crate::foundation::math::Vec3;
use crate::foundation::time::Clock;
use crate::physics::body::{Ball, TimeComponent};

/// Seed the ball's path on first contact
///
/// Does nothing if the path already has points. Otherwise stamps
/// `time_ctx` with the current time and records `position`. Returns whether
/// a point was recorded.
pub fn record_first_touch(
    ball: &mut Ball,
    time_ctx: &mut TimeComponent,
    position: Vec3,
    clock: &dyn Clock,
) -> bool {
    if !ball.has_empty_path() {
        return false;
    }

    time_ctx.last_point = clock.now();
    ball.push_path_point(position);
    log::debug!("First surface touch recorded at {:?}", position);
    true
}

/// Append `position` once `interval` seconds have passed since the last point
///
/// Paths that have not been seeded yet are left alone.
pub fn record_sample(
    ball: &mut Ball,
    time_ctx: &mut TimeComponent,
    position: Vec3,
    clock: &dyn Clock,
    interval: f32,
) -> bool {
    if ball.has_empty_path() {
        return false;
    }

    let now = clock.now();
    if now.secs_since(time_ctx.last_point) < f64::from(interval) {
        return false;
    }

    time_ctx.last_point = now;
    ball.push_path_point(position);
    true
}

/// Clock plus sampling interval, for callers that record every tick
pub struct TrajectoryRecorder<'a> {
    clock: &'a dyn Clock,
    interval: f32,
}

impl<'a> TrajectoryRecorder<'a> {
    /// Create a recorder sampling every `interval` seconds
    pub fn new(clock: &'a dyn Clock, interval: f32) -> Self {
        Self { clock, interval }
    }

    /// See [`record_first_touch`]
    pub fn first_touch(&self, ball: &mut Ball, time_ctx: &mut TimeComponent, position: Vec3) -> bool {
        record_first_touch(ball, time_ctx, position, self.clock)
    }

    /// See [`record_sample`]
    pub fn sample(&self, ball: &mut Ball, time_ctx: &mut TimeComponent, position: Vec3) -> bool {
        record_sample(ball, time_ctx, position, self.clock, self.interval)
    }
}
