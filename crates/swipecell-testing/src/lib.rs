//! Robot-style testing harness for Swipecell
//!
//! [`SwipeRobot`] owns a runtime, synthesizes pointer sequences against
//! pan gestures, and pumps frames until animations settle. The doubles
//! module provides recording implementations of the host-side traits.

mod doubles;
mod robot;

pub use doubles::{PresetSnooze, RecordingStore, RecordingVisual, StoreAction};
pub use robot::SwipeRobot;
