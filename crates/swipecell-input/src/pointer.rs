//! Raw pointer events as delivered by the platform.

use swipecell_core::Point;
use web_time::Instant;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (window lost focus, palm
    /// rejection, etc.). Treated like `Up` by recognizers.
    Cancel,
}

/// One reading of pointer state. Immutable once constructed.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Point,
    /// Timestamp in milliseconds on the host's monotonic clock.
    pub time_ms: i64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, time_ms: i64) -> Self {
        Self {
            id: 0,
            kind,
            position,
            time_ms,
        }
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }
}

/// Monotonic millisecond source for stamping live pointer events.
///
/// Backed by `web_time::Instant`, so the same code path works on native
/// targets and wasm.
pub struct PointerClock {
    origin: Instant,
}

impl PointerClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }
}

impl Default for PointerClock {
    fn default() -> Self {
        Self::new()
    }
}
