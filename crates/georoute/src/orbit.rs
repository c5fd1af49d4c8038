//! Eased re-orientation of an orbit camera around the globe.
//!
//! The animator swings the camera horizontally (around +Y) to a target
//! azimuth while holding its height and distance. It is a plain state
//! machine: the host starts it, then feeds it the current time once per
//! frame and applies the returned position.

use std::f64::consts::{PI, TAU};

use glam::DVec3;

/// Camera pose relevant to orbiting: where it is and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub position: DVec3,
    pub target: DVec3,
}

impl OrbitCamera {
    pub fn new(position: DVec3, target: DVec3) -> Self {
        Self { position, target }
    }

    /// Distance from the target.
    pub fn radius(&self) -> f64 {
        (self.position - self.target).length()
    }

    /// Horizontal angle of the camera around the target's +Y axis.
    pub fn azimuth(&self) -> Option<f64> {
        let rel = (self.position - self.target).try_normalize()?;
        Some(rel.x.atan2(rel.z))
    }
}

/// Ease-in-out cubic on `[0, 1]`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Signed angle from `from` to `to`, normalized to `(-π, π]`.
pub fn shortest_angle_delta(from: f64, to: f64) -> f64 {
    PI - (PI - (to - from)).rem_euclid(TAU)
}

/// An in-flight re-orientation.
#[derive(Debug, Clone, Copy)]
struct OrbitPhase {
    target: DVec3,
    start_azimuth: f64,
    delta: f64,
    /// Height of the normalized camera offset, held for the whole swing.
    polar_y: f64,
    radius: f64,
    start_time: f64,
    duration: f64,
}

impl OrbitPhase {
    fn progress(&self, now: f64) -> f64 {
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    fn position_at(&self, t: f64) -> DVec3 {
        let azimuth = self.start_azimuth + self.delta * ease_in_out_cubic(t);
        let horizontal = (1.0 - self.polar_y * self.polar_y).max(0.0).sqrt();
        let rel = DVec3::new(
            azimuth.sin() * horizontal,
            self.polar_y,
            azimuth.cos() * horizontal,
        );
        self.target + rel * self.radius
    }
}

/// Drives camera re-orientation animations. At most one is in flight.
#[derive(Debug, Default)]
pub struct OrbitAnimator {
    phase: Option<OrbitPhase>,
}

impl OrbitAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin swinging `camera` to `target_azimuth` over `duration` seconds.
    ///
    /// Replaces any animation already in flight. A camera sitting on its
    /// target has no defined azimuth and is left alone.
    pub fn start(&mut self, camera: OrbitCamera, target_azimuth: f64, now: f64, duration: f64) {
        let Some(rel) = (camera.position - camera.target).try_normalize() else {
            tracing::debug!("Camera coincides with its target, skipping orbit");
            self.phase = None;
            return;
        };

        let start_azimuth = rel.x.atan2(rel.z);
        let delta = shortest_angle_delta(start_azimuth, target_azimuth);
        if self.phase.is_some() {
            tracing::debug!("Preempting in-flight orbit animation");
        }

        self.phase = Some(OrbitPhase {
            target: camera.target,
            start_azimuth,
            delta,
            polar_y: rel.y,
            radius: camera.radius(),
            start_time: now,
            duration: duration.max(f64::EPSILON),
        });
    }

    /// Camera position for `now`, or `None` when idle.
    ///
    /// The call that reaches full progress returns the final position and
    /// ends the animation.
    pub fn step(&mut self, now: f64) -> Option<DVec3> {
        let phase = self.phase?;
        let t = phase.progress(now);
        if t >= 1.0 {
            self.phase = None;
        }
        Some(phase.position_at(t))
    }

    /// Stop the animation where it is.
    pub fn cancel(&mut self) {
        self.phase = None;
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_some()
    }

    /// Progress from 0.0 to 1.0, or `None` if idle.
    pub fn progress(&self, now: f64) -> Option<f64> {
        self.phase.as_ref().map(|p| p.progress(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::clock::{Clock, ManualClock};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_ease_in_out_cubic() {
        assert_close(ease_in_out_cubic(0.0), 0.0);
        assert_close(ease_in_out_cubic(0.25), 0.0625);
        assert_close(ease_in_out_cubic(0.5), 0.5);
        assert_close(ease_in_out_cubic(0.75), 0.9375);
        assert_close(ease_in_out_cubic(1.0), 1.0);
        assert_close(ease_in_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_shortest_angle_delta_range() {
        assert_close(shortest_angle_delta(0.0, 0.5), 0.5);
        assert_close(shortest_angle_delta(0.5, 0.0), -0.5);
        assert_close(shortest_angle_delta(3.0, -3.0), TAU - 6.0);
        assert_close(shortest_angle_delta(-3.0, 3.0), 6.0 - TAU);
        assert_close(shortest_angle_delta(0.0, PI), PI);
        assert_close(shortest_angle_delta(0.0, -PI), PI);
        for i in -20..20 {
            let d = shortest_angle_delta(0.3, f64::from(i) * 0.7);
            assert!(d > -PI && d <= PI);
        }
    }

    #[test]
    fn test_start_and_end_poses() {
        let clock = ManualClock::new(10.0);
        let camera = OrbitCamera::new(DVec3::new(0.0, 1.0, 3.0), DVec3::ZERO);
        let mut animator = OrbitAnimator::new();
        animator.start(camera, PI / 2.0, clock.now_secs(), 0.9);

        let first = animator.step(clock.now_secs()).unwrap();
        assert!((first - camera.position).length() < 1e-9);
        assert_close(animator.progress(clock.now_secs()).unwrap(), 0.0);

        clock.advance(0.45);
        let mid = animator.step(clock.now_secs()).unwrap();
        assert_close(mid.length(), camera.radius());

        clock.advance(0.6);
        let last = animator.step(clock.now_secs()).unwrap();
        let end = OrbitCamera::new(last, DVec3::ZERO);
        assert_close(end.azimuth().unwrap(), PI / 2.0);
        assert_close(end.radius(), camera.radius());
        assert_close(last.y, camera.position.y);

        assert!(!animator.is_active());
        assert!(animator.step(clock.now_secs()).is_none());
    }

    #[test]
    fn test_height_and_radius_are_held() {
        let target = DVec3::new(0.5, -0.2, 0.1);
        let camera = OrbitCamera::new(target + DVec3::new(2.0, 1.5, -1.0), target);
        let mut animator = OrbitAnimator::new();
        animator.start(camera, -2.5, 0.0, 1.0);

        for i in 0..=10 {
            let position = animator.step(f64::from(i) * 0.1).unwrap();
            let rel = position - target;
            assert_close(rel.length(), camera.radius());
            assert_close(
                rel.normalize().y,
                (camera.position - target).normalize().y,
            );
        }
    }

    #[test]
    fn test_second_start_preempts() {
        let clock = ManualClock::new(0.0);
        let camera = OrbitCamera::new(DVec3::new(0.0, 0.0, 4.0), DVec3::ZERO);
        let mut animator = OrbitAnimator::new();
        animator.start(camera, 1.0, clock.now_secs(), 0.9);

        clock.advance(0.3);
        let position = animator.step(clock.now_secs()).unwrap();
        animator.start(
            OrbitCamera::new(position, DVec3::ZERO),
            -1.0,
            clock.now_secs(),
            0.9,
        );
        assert_close(animator.progress(clock.now_secs()).unwrap(), 0.0);

        clock.advance(1.0);
        let last = animator.step(clock.now_secs()).unwrap();
        assert_close(OrbitCamera::new(last, DVec3::ZERO).azimuth().unwrap(), -1.0);
    }

    #[test]
    fn test_stalled_frames_jump_to_the_end() {
        let camera = OrbitCamera::new(DVec3::new(0.0, 0.0, 4.0), DVec3::ZERO);
        let mut animator = OrbitAnimator::new();
        animator.start(camera, 2.0, 0.0, 0.9);
        let last = animator.step(60.0).unwrap();
        assert_close(OrbitCamera::new(last, DVec3::ZERO).azimuth().unwrap(), 2.0);
        assert!(!animator.is_active());
    }

    #[test]
    fn test_cancel_and_degenerate_camera() {
        let mut animator = OrbitAnimator::new();
        animator.start(
            OrbitCamera::new(DVec3::new(0.0, 0.0, 4.0), DVec3::ZERO),
            1.0,
            0.0,
            0.9,
        );
        animator.cancel();
        assert!(!animator.is_active());
        assert!(animator.progress(0.5).is_none());

        animator.start(OrbitCamera::new(DVec3::ONE, DVec3::ONE), 1.0, 0.0, 0.9);
        assert!(!animator.is_active());
    }
}
