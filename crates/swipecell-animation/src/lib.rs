//! Frame-driven animation for Swipecell
//!
//! A [`Transition`] tweens one scalar between two values over the
//! runtime's frame-callback clock; [`swipe_out_duration`] derives how
//! long a released row should take to reach its resting position from
//! the velocity the finger achieved.

mod easing;
mod strategy;
mod timing;
mod transition;

pub use easing::Easing;
pub use strategy::{DefaultSwipeOut, TransitionStrategy};
pub use timing::{swipe_out_duration, SUGGESTED_VELOCITY};
pub use transition::{Transition, TransitionHandle, TransitionSpec};
