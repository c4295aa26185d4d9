//! Fixed-timestep frame driver.
//!
//! Render frames arrive at whatever rate the host manages; the scene is
//! stepped at a fixed 60 Hz from an accumulator, and the leftover fraction
//! is reported as an interpolation alpha.

use std::time::Instant;
use tracing::warn;

/// Fixed simulation step: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame accepted before clamping. Slower frames slow the
/// simulation down instead of queueing a burst of catch-up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

#[derive(Debug)]
pub struct FrameClock {
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Measure wall time since the previous call and step the simulation.
    pub fn tick(&mut self, update_fn: impl FnMut(f64, f64)) -> f64 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(frame_time, update_fn)
    }

    /// Step the simulation by an explicit frame time.
    ///
    /// `update_fn(FIXED_DT, total_sim_time)` runs zero or more times. Returns
    /// the interpolation alpha in `[0, 1)`. Negative or non-finite frame
    /// times count as zero.
    pub fn advance(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, f64)) -> f64 {
        let mut frame_time = if frame_time.is_finite() {
            frame_time.max(0.0)
        } else {
            0.0
        };

        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        self.frame_count += 1;
        self.alpha()
    }

    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Simulated seconds so far.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step() {
        let mut clock = FrameClock::new();
        let mut updates = 0u32;
        clock.advance(FIXED_DT, |_, _| updates += 1);
        assert_eq!(updates, 1);
        assert!(clock.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_multiple_steps_pass_sim_time() {
        let mut clock = FrameClock::new();
        let mut times = Vec::new();
        clock.advance(3.0 * FIXED_DT + 1e-9, |dt, t| {
            assert_eq!(dt, FIXED_DT);
            times.push(t);
        });
        assert_eq!(times.len(), 3);
        assert!((times[2] - 2.0 * FIXED_DT).abs() < 1e-12);
        assert!((clock.total_sim_time() - 3.0 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_partial_frame_reports_alpha() {
        let mut clock = FrameClock::new();
        let mut updates = 0u32;
        let alpha = clock.advance(0.25 * FIXED_DT, |_, _| updates += 1);
        assert_eq!(updates, 0);
        assert!((alpha - 0.25).abs() < 1e-10, "alpha should be ~0.25, got {alpha}");
        assert_eq!(alpha, clock.alpha());
    }

    #[test]
    fn test_max_frame_time_clamp() {
        let mut clock = FrameClock::new();
        let mut updates = 0u32;
        clock.advance(1.0, |_, _| updates += 1);
        let max_updates = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(updates > 0);
        assert!(
            updates <= max_updates,
            "Expected at most {max_updates} updates, got {updates}"
        );
    }

    #[test]
    fn test_bad_frame_times_count_as_zero() {
        let mut clock = FrameClock::new();
        let mut updates = 0u32;
        clock.advance(-1.0, |_, _| updates += 1);
        clock.advance(f64::NAN, |_, _| updates += 1);
        clock.advance(f64::INFINITY, |_, _| updates += 1);
        assert_eq!(updates, 0);
        assert_eq!(clock.frame_count(), 3);
        assert_eq!(clock.alpha(), 0.0);
    }

    #[test]
    fn test_total_sim_time_tracks_updates() {
        let mut clock = FrameClock::new();
        for _ in 0..10 {
            clock.advance(FIXED_DT * 2.0, |_, _| {});
        }
        let expected = clock.update_count() as f64 * FIXED_DT;
        assert!((clock.total_sim_time() - expected).abs() < 1e-10);
        assert_eq!(clock.frame_count(), 10);
    }

    #[test]
    fn test_deterministic_sequence() {
        let frame_times = [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018];
        let mut a = FrameClock::new();
        let mut b = FrameClock::new();
        for &ft in &frame_times {
            let alpha_a = a.advance(ft, |_, _| {});
            let alpha_b = b.advance(ft, |_, _| {});
            assert!((alpha_a - alpha_b).abs() < 1e-15);
        }
        assert_eq!(a.update_count(), b.update_count());
    }

    #[test]
    fn test_wall_clock_tick_runs() {
        let mut clock = FrameClock::default();
        let alpha = clock.tick(|_, _| {});
        assert!((0.0..1.0).contains(&alpha));
        assert_eq!(clock.frame_count(), 1);
    }
}
