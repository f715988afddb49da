//! Pointer input and pan gesture recognition for Swipecell
//!
//! The platform feeds raw [`PointerEvent`]s into a [`PanGesture`]; once
//! the pointer travels past the recognition threshold along the allowed
//! axis, the gesture emits a typed start/move/end stream of
//! [`GestureEvent`]s that the swipe state machine consumes.

mod constants;
mod pan;
mod pointer;
mod velocity;

pub use constants::{PAN_DRAG_THRESHOLD, VELOCITY_HISTORY_MS, VELOCITY_STOP_GAP_MS};
pub use pan::{
    DirectionFilter, GestureEvent, GesturePhase, MoveDirection, PanConfig, PanGesture,
    PanGestureController,
};
pub use pointer::{PointerClock, PointerEvent, PointerEventKind, PointerId};
pub use velocity::VelocityTracker;
