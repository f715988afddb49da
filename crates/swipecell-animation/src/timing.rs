//! Velocity-derived timing for swipe-out movements.

/// Minimum speed, in px/ms, a released row travels at. A slow or still
/// finger still produces a brisk exit instead of a crawl.
pub const SUGGESTED_VELOCITY: f32 = 3.0;

/// Duration in ms for a cell to travel from `current` to `target` after
/// the finger lifts.
///
/// The cell keeps the fastest speed the finger achieved during the
/// drag, floored at [`SUGGESTED_VELOCITY`]: a flick exits fast, a
/// hesitant release still exits at the floor. The result is truncated
/// to whole milliseconds.
pub fn swipe_out_duration(current: f32, target: f32, max_velocity: f32) -> u64 {
    let speed = max_velocity.abs().max(SUGGESTED_VELOCITY);
    if speed <= f32::EPSILON {
        return 0;
    }
    ((target - current).abs() / speed) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_release_uses_the_velocity_floor() {
        // 600 px at the 3 px/ms floor.
        assert_eq!(swipe_out_duration(0.0, 600.0, 0.1), 200);
        assert_eq!(swipe_out_duration(0.0, 600.0, 0.0), 200);
    }

    #[test]
    fn fast_flick_shortens_the_duration() {
        assert_eq!(swipe_out_duration(0.0, 600.0, 6.0), 100);
    }

    #[test]
    fn velocity_sign_does_not_matter() {
        assert_eq!(
            swipe_out_duration(0.0, 600.0, -6.0),
            swipe_out_duration(0.0, 600.0, 6.0)
        );
    }

    #[test]
    fn duration_never_increases_with_velocity() {
        let mut previous = u64::MAX;
        for tenths in 0..200 {
            let velocity = tenths as f32 / 10.0;
            let duration = swipe_out_duration(-120.0, 480.0, velocity);
            assert!(
                duration <= previous,
                "duration rose from {previous} to {duration} at velocity {velocity}"
            );
            previous = duration;
        }
    }

    #[test]
    fn duration_never_decreases_with_distance() {
        for velocity in [0.0, 2.0, 5.0, 12.0] {
            let mut previous = 0;
            for step in 0..100 {
                let distance = step as f32 * 9.0;
                let duration = swipe_out_duration(0.0, distance, velocity);
                assert!(
                    duration >= previous,
                    "duration fell from {previous} to {duration} at distance {distance}, velocity {velocity}"
                );
                previous = duration;
            }
        }
    }

    #[test]
    fn zero_distance_is_instant() {
        assert_eq!(swipe_out_duration(250.0, 250.0, 8.0), 0);
    }

    #[test]
    fn fractional_milliseconds_truncate() {
        // 100 px at 3 px/ms is 33.33 ms.
        assert_eq!(swipe_out_duration(0.0, 100.0, 0.0), 33);
    }
}
