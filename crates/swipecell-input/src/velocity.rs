//! 1D pointer velocity estimation.
//!
//! Impulse-strategy estimator: velocity is recovered from the kinetic
//! energy the recent samples would have imparted to a unit mass. This
//! weighs recent movement over old and is robust against a single
//! jittery sample, which a two-point difference is not.

use crate::constants::{VELOCITY_HISTORY_MS, VELOCITY_STOP_GAP_MS};

const HISTORY_SIZE: usize = 20;

#[derive(Clone, Copy)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Tracks recent positions of one pointer along one axis and estimates
/// its current velocity in px/second.
#[derive(Clone)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    /// Records an absolute position at the given timestamp.
    pub fn push(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }

    /// Estimated velocity in px/second; 0.0 when fewer than two usable
    /// samples exist or the pointer has been still past the stop gap.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Walk backwards collecting samples until they become too old,
        // a stop gap appears, or the ring is exhausted.
        let mut window: Vec<Sample> = Vec::with_capacity(HISTORY_SIZE);
        let mut index = self.newest;
        let mut younger = newest;
        while let Some(sample) = self.samples[index] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (younger.time_ms - sample.time_ms).abs();
            if age > VELOCITY_HISTORY_MS || gap > VELOCITY_STOP_GAP_MS {
                break;
            }
            window.push(sample);
            younger = sample;
            index = index.checked_sub(1).unwrap_or(HISTORY_SIZE - 1);
            if window.len() == HISTORY_SIZE {
                break;
            }
        }

        if window.len() < 2 {
            return 0.0;
        }

        // window[0] is the newest sample; iterate oldest -> newest.
        // The oldest segment only contributes half its impulse.
        let mut work = 0.0f32;
        for (segment, pair) in window.windows(2).rev().enumerate() {
            let (older, newer) = (pair[1], pair[0]);
            let dt_ms = (newer.time_ms - older.time_ms) as f32;
            if dt_ms == 0.0 {
                continue;
            }
            let v_curr = (newer.position - older.position) / dt_ms;
            let v_prev = energy_to_velocity(work);
            work += (v_curr - v_prev) * v_curr.abs();
            if segment == 0 {
                work *= 0.5;
            }
        }

        // px/ms -> px/s.
        energy_to_velocity(work) * 1000.0
    }
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// E = m * v^2 / 2 with unit mass, preserving sign.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_samples_is_zero() {
        assert_eq!(VelocityTracker::new().velocity(), 0.0);
    }

    #[test]
    fn single_sample_is_zero() {
        let mut tracker = VelocityTracker::new();
        tracker.push(0, 50.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn constant_motion_recovers_true_velocity() {
        let mut tracker = VelocityTracker::new();
        // 100 px every 10 ms = 10_000 px/s.
        for step in 0..4 {
            tracker.push(step * 10, step as f32 * 100.0);
        }
        let velocity = tracker.velocity();
        assert!(
            (velocity - 10_000.0).abs() < 1_000.0,
            "expected ~10000 px/s, got {velocity}"
        );
    }

    #[test]
    fn leftward_motion_is_negative() {
        let mut tracker = VelocityTracker::new();
        tracker.push(0, 300.0);
        tracker.push(10, 200.0);
        tracker.push(20, 100.0);
        assert!(tracker.velocity() < 0.0);
    }

    #[test]
    fn stop_gap_discards_older_motion() {
        let mut tracker = VelocityTracker::new();
        tracker.push(0, 0.0);
        tracker.push(VELOCITY_STOP_GAP_MS + 1, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn stale_history_is_ignored() {
        let mut tracker = VelocityTracker::new();
        tracker.push(0, 0.0);
        tracker.push(150, 100.0);
        tracker.push(160, 200.0);
        tracker.push(170, 300.0);
        assert!(tracker.velocity() > 0.0);
    }

    #[test]
    fn reset_clears_history() {
        let mut tracker = VelocityTracker::new();
        tracker.push(0, 0.0);
        tracker.push(10, 100.0);
        tracker.reset();
        assert_eq!(tracker.velocity(), 0.0);
    }
}
