//! Programmatic driver for swipe interactions.

use swipecell_core::{Point, Runtime, RuntimeHandle};
use swipecell_input::{PanGesture, PointerEvent, PointerEventKind};

const FRAME_NANOS: u64 = 16_666_667;

/// Drives pan gestures and the frame clock the way a finger and a
/// display would, deterministically.
///
/// The robot owns the [`Runtime`]; build the system under test from
/// [`frame_clock`](Runtime::frame_clock) via [`SwipeRobot::runtime`].
pub struct SwipeRobot {
    runtime: Runtime,
    now_ms: i64,
    frame_nanos: u64,
}

impl SwipeRobot {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::default(),
            now_ms: 0,
            frame_nanos: 0,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Synthesizes a full pointer sequence on a gesture: down at
    /// `from`, `steps` evenly spaced moves towards `to` stamped
    /// `step_ms` apart, then up at `to`.
    ///
    /// `step_ms` controls the drag speed: 300 px in 3 steps of 20 ms is
    /// a 5 px/ms flick, the same distance at 100 ms per step is a slow
    /// pull.
    pub fn drag(&mut self, pan: &PanGesture, from: Point, to: Point, steps: u32, step_ms: i64) {
        log::trace!("robot drag {from:?} -> {to:?} in {steps} steps of {step_ms} ms");
        pan.handle_pointer_event(&PointerEvent::new(PointerEventKind::Down, from, self.now_ms));
        for step in 1..=steps {
            self.now_ms += step_ms;
            let fraction = step as f32 / steps as f32;
            let position = Point::new(
                from.x + (to.x - from.x) * fraction,
                from.y + (to.y - from.y) * fraction,
            );
            pan.handle_pointer_event(&PointerEvent::new(
                PointerEventKind::Move,
                position,
                self.now_ms,
            ));
        }
        pan.handle_pointer_event(&PointerEvent::new(PointerEventKind::Up, to, self.now_ms));
    }

    /// Presses and releases without crossing any recognition threshold.
    pub fn tap(&mut self, pan: &PanGesture, at: Point) {
        pan.handle_pointer_event(&PointerEvent::new(PointerEventKind::Down, at, self.now_ms));
        self.now_ms += 10;
        pan.handle_pointer_event(&PointerEvent::new(PointerEventKind::Up, at, self.now_ms));
    }

    /// Drains the frame queue `count` times, one display frame apart.
    pub fn advance_frames(&mut self, count: u32) {
        let handle = self.runtime.handle();
        for _ in 0..count {
            handle.drain_frame_callbacks(self.frame_nanos);
            self.frame_nanos += FRAME_NANOS;
            self.now_ms += (FRAME_NANOS / 1_000_000) as i64;
        }
    }

    /// Pumps frames until no animation wants another one.
    ///
    /// Panics if the system never settles; a transition that keeps
    /// rescheduling forever is a bug the test should surface.
    pub fn run_until_idle(&mut self) {
        let handle = self.runtime.handle();
        for _ in 0..10_000 {
            if !handle.has_frame_callbacks() {
                return;
            }
            self.advance_frames(1);
        }
        panic!("frame queue never went idle");
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }
}

impl Default for SwipeRobot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use swipecell_input::{PanConfig, PanGestureController};

    #[test]
    fn drag_produces_one_recognized_gesture() {
        let mut robot = SwipeRobot::new();
        let pan = PanGestureController::new().create(PanConfig::default());
        let starts = Rc::new(Cell::new(0u32));
        let ends = Rc::new(Cell::new(0u32));

        let starts_in = Rc::clone(&starts);
        pan.on_start(move |_| starts_in.set(starts_in.get() + 1));
        let ends_in = Rc::clone(&ends);
        pan.on_end(move |_| ends_in.set(ends_in.get() + 1));

        robot.drag(&pan, Point::new(250.0, 30.0), Point::new(50.0, 30.0), 4, 10);
        assert_eq!(starts.get(), 1);
        assert_eq!(ends.get(), 1);
    }

    #[test]
    fn tap_is_not_recognized() {
        let mut robot = SwipeRobot::new();
        let pan = PanGestureController::new().create(PanConfig::default());
        let starts = Rc::new(Cell::new(0u32));
        let starts_in = Rc::clone(&starts);
        pan.on_start(move |_| starts_in.set(starts_in.get() + 1));

        robot.tap(&pan, Point::new(150.0, 30.0));
        assert_eq!(starts.get(), 0);
    }

    #[test]
    fn run_until_idle_returns_on_an_empty_queue() {
        let mut robot = SwipeRobot::new();
        robot.run_until_idle();
    }
}
