//! Core runtime services for Swipecell
//!
//! This crate carries the pieces every other Swipecell crate builds on:
//! the frame-callback runtime that drives animations, geometry
//! primitives, and the shared error type.

mod frame_clock;
mod geometry;
mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use geometry::{Point, Rect, Size};
pub use runtime::{DefaultScheduler, FrameCallbackId, Runtime, RuntimeHandle, RuntimeScheduler};

/// Stable identity of one swipeable row within a list.
///
/// Rows are always addressed by id, never by position, so a removal that
/// shifts the visible order cannot alias another row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// Errors surfaced by the swipe interaction core.
///
/// Stale gesture input and boundary exits are not errors; they are
/// silently dropped or resolved as a reset. This enum covers the broken
/// preconditions a caller must fix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeError {
    /// A row id was used that the list does not (or no longer does) own.
    UnknownRow { row: RowId },
    /// A visual handle was required for an animation but is no longer
    /// reachable, e.g. the runtime behind its frame clock was dropped.
    VisualUnavailable { row: RowId },
}

impl std::fmt::Display for SwipeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwipeError::UnknownRow { row } => write!(f, "{row} is not part of this list"),
            SwipeError::VisualUnavailable { row } => {
                write!(f, "visual handle for {row} is unavailable")
            }
        }
    }
}

impl std::error::Error for SwipeError {}
