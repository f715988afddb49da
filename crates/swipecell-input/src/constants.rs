//! Shared gesture constants.
//!
//! Values are in logical pixels and milliseconds. They are tuned for
//! typical desktop/mobile displays; very high-density touch screens may
//! want to scale the pixel thresholds by the device's DPI factor.

/// Distance a pointer must travel along the allowed axis before a pan is
/// recognized and the first start callback fires.
///
/// This is the disambiguation point between a swipe on a row and a tap
/// or a scroll of the surrounding list. 85 px is deliberately far larger
/// than a touch slop: rows sit inside a scrollable list, and a cheap
/// threshold would steal vertical scrolls that begin with a slight
/// horizontal wobble.
pub const PAN_DRAG_THRESHOLD: f32 = 85.0;

/// Only pointer samples from the last 100 ms contribute to velocity.
pub const VELOCITY_HISTORY_MS: i64 = 100;

/// A gap of this long between samples means the pointer stopped; older
/// samples are discarded from the velocity estimate.
pub const VELOCITY_STOP_GAP_MS: i64 = 40;
