//! Pluggable timing for resolved swipes.

use crate::timing::swipe_out_duration;
use crate::transition::TransitionSpec;

/// Decides how a released cell travels to its resting position.
///
/// Implementations see the cell's current offset, the resting target,
/// and the fastest velocity the finger achieved (px/ms, signed) and
/// answer with a [`TransitionSpec`]. A custom strategy may slow a
/// destructive exit down or snap it instantly; it cannot change the
/// target itself.
pub trait TransitionStrategy {
    fn spec(&self, current: f32, target: f32, max_velocity: f32) -> TransitionSpec;
}

/// Stock behavior: linear movement whose duration follows the achieved
/// velocity, floored at the suggested minimum.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSwipeOut;

impl TransitionStrategy for DefaultSwipeOut {
    fn spec(&self, current: f32, target: f32, max_velocity: f32) -> TransitionSpec {
        TransitionSpec::linear(swipe_out_duration(current, target, max_velocity))
    }
}
