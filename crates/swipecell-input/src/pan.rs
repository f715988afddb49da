//! Pan gesture recognition.
//!
//! A [`PanGesture`] wraps one interactive surface: the surface routes
//! its raw pointer events into [`PanGesture::handle_pointer_event`] and
//! the gesture emits typed start/move/end callbacks once the pointer
//! travels past the recognition threshold along the allowed axis.
//! Everything before that point looks like a tap or a scroll and never
//! reaches the callbacks.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;
use swipecell_core::Point;

use crate::constants::PAN_DRAG_THRESHOLD;
use crate::pointer::{PointerEvent, PointerEventKind};
use crate::velocity::VelocityTracker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Start,
    Move,
    End,
}

/// Discrete direction of the movement that produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    None,
    Left,
    Right,
    Up,
    Down,
}

impl MoveDirection {
    fn from_delta(dx: f32, dy: f32) -> Self {
        if dx == 0.0 && dy == 0.0 {
            MoveDirection::None
        } else if dx.abs() >= dy.abs() {
            if dx < 0.0 {
                MoveDirection::Left
            } else {
                MoveDirection::Right
            }
        } else if dy < 0.0 {
            MoveDirection::Up
        } else {
            MoveDirection::Down
        }
    }
}

/// One reading of an in-flight pan. Deltas are cumulative since the
/// pointer went down; velocity is px/ms along the filter's primary axis.
#[derive(Clone, Copy, Debug)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub center: Point,
    pub delta_x: f32,
    pub delta_y: f32,
    pub velocity: f32,
    pub direction: MoveDirection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectionFilter {
    Horizontal,
    Vertical,
    All,
}

impl DirectionFilter {
    /// Whether a cumulative movement is far enough, and axis-dominant
    /// enough, to count as a pan under this filter.
    fn recognizes(&self, dx: f32, dy: f32, threshold: f32) -> bool {
        match self {
            DirectionFilter::Horizontal => dx.abs() >= threshold && dx.abs() > dy.abs(),
            DirectionFilter::Vertical => dy.abs() >= threshold && dy.abs() > dx.abs(),
            DirectionFilter::All => dx * dx + dy * dy >= threshold * threshold,
        }
    }

    /// Axis used for velocity tracking: x for Horizontal and All, y for
    /// Vertical.
    fn axis_position(&self, position: Point) -> f32 {
        match self {
            DirectionFilter::Vertical => position.y,
            _ => position.x,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PanConfig {
    pub threshold: f32,
    pub direction: DirectionFilter,
}

impl Default for PanConfig {
    fn default() -> Self {
        Self {
            threshold: PAN_DRAG_THRESHOLD,
            direction: DirectionFilter::Horizontal,
        }
    }
}

type Callback = Rc<dyn Fn(&GestureEvent)>;

struct PanState {
    pointer_down: bool,
    recognized: bool,
    start: Point,
    last: Point,
    tracker: VelocityTracker,
}

impl PanState {
    fn new() -> Self {
        Self {
            pointer_down: false,
            recognized: false,
            start: Point::ZERO,
            last: Point::ZERO,
            tracker: VelocityTracker::new(),
        }
    }
}

struct PanGestureInner {
    config: PanConfig,
    listening: Cell<bool>,
    state: RefCell<PanState>,
    on_start: RefCell<SmallVec<[Callback; 1]>>,
    on_move: RefCell<SmallVec<[Callback; 1]>>,
    on_end: RefCell<SmallVec<[Callback; 1]>>,
}

/// Creates pan gestures. One controller per input domain is enough; it
/// only carries configuration defaults today but is the seam where a
/// platform recognizer (multi-touch normalization, pointer capture)
/// would plug in.
#[derive(Default)]
pub struct PanGestureController;

impl PanGestureController {
    pub fn new() -> Self {
        Self
    }

    pub fn create(&self, config: PanConfig) -> PanGesture {
        PanGesture {
            inner: Rc::new(PanGestureInner {
                config,
                listening: Cell::new(true),
                state: RefCell::new(PanState::new()),
                on_start: RefCell::new(SmallVec::new()),
                on_move: RefCell::new(SmallVec::new()),
                on_end: RefCell::new(SmallVec::new()),
            }),
        }
    }
}

/// Handle to one recognized-pan stream. Cloning shares the stream.
#[derive(Clone)]
pub struct PanGesture {
    inner: Rc<PanGestureInner>,
}

impl PanGesture {
    pub fn on_start(&self, callback: impl Fn(&GestureEvent) + 'static) {
        self.inner.on_start.borrow_mut().push(Rc::new(callback));
    }

    pub fn on_move(&self, callback: impl Fn(&GestureEvent) + 'static) {
        self.inner.on_move.borrow_mut().push(Rc::new(callback));
    }

    pub fn on_end(&self, callback: impl Fn(&GestureEvent) + 'static) {
        self.inner.on_end.borrow_mut().push(Rc::new(callback));
    }

    /// Resumes forwarding recognized events to the callbacks.
    pub fn listen(&self) {
        self.inner.listening.set(true);
    }

    /// Stops forwarding events. The recognizer keeps observing raw
    /// input so its tracking stays coherent, but no callback fires
    /// until [`listen`](Self::listen) is called again.
    pub fn unlisten(&self) {
        self.inner.listening.set(false);
    }

    pub fn is_listening(&self) -> bool {
        self.inner.listening.get()
    }

    /// Feeds one raw pointer event. Returns `true` while the event
    /// belongs to a tracked (down) pointer sequence.
    pub fn handle_pointer_event(&self, event: &PointerEvent) -> bool {
        let inner = &self.inner;
        match event.kind {
            PointerEventKind::Down => {
                let mut state = inner.state.borrow_mut();
                state.pointer_down = true;
                state.recognized = false;
                state.start = event.position;
                state.last = event.position;
                state.tracker.reset();
                state
                    .tracker
                    .push(event.time_ms, inner.config.direction.axis_position(event.position));
                true
            }
            PointerEventKind::Move => {
                let (emit, gesture_event) = {
                    let mut state = inner.state.borrow_mut();
                    if !state.pointer_down {
                        return false;
                    }
                    state
                        .tracker
                        .push(event.time_ms, inner.config.direction.axis_position(event.position));

                    let dx = event.position.x - state.start.x;
                    let dy = event.position.y - state.start.y;

                    let result = if !state.recognized {
                        if inner.config.direction.recognizes(dx, dy, inner.config.threshold) {
                            state.recognized = true;
                            log::trace!("pan recognized at dx={dx:.1} dy={dy:.1}");
                            Some((
                                GesturePhase::Start,
                                MoveDirection::from_delta(dx, dy),
                                state.velocity_px_per_ms(),
                            ))
                        } else {
                            None
                        }
                    } else {
                        let step_x = event.position.x - state.last.x;
                        let step_y = event.position.y - state.last.y;
                        Some((
                            GesturePhase::Move,
                            MoveDirection::from_delta(step_x, step_y),
                            state.velocity_px_per_ms(),
                        ))
                    };
                    state.last = event.position;

                    match result {
                        Some((phase, direction, velocity)) => (
                            true,
                            GestureEvent {
                                phase,
                                center: event.position,
                                delta_x: dx,
                                delta_y: dy,
                                velocity,
                                direction,
                            },
                        ),
                        None => return true,
                    }
                };
                if emit {
                    self.emit(&gesture_event);
                }
                true
            }
            PointerEventKind::Up | PointerEventKind::Cancel => {
                let gesture_event = {
                    let mut state = inner.state.borrow_mut();
                    if !state.pointer_down {
                        return false;
                    }
                    state.pointer_down = false;
                    if !state.recognized {
                        // Never crossed the threshold: a tap, not a pan.
                        return true;
                    }
                    state.recognized = false;
                    let dx = event.position.x - state.start.x;
                    let dy = event.position.y - state.start.y;
                    let step_x = event.position.x - state.last.x;
                    let step_y = event.position.y - state.last.y;
                    GestureEvent {
                        phase: GesturePhase::End,
                        center: event.position,
                        delta_x: dx,
                        delta_y: dy,
                        velocity: state.velocity_px_per_ms(),
                        direction: MoveDirection::from_delta(step_x, step_y),
                    }
                };
                self.emit(&gesture_event);
                true
            }
        }
    }

    fn emit(&self, event: &GestureEvent) {
        if !self.inner.listening.get() {
            log::debug!("pan event suppressed while unlistened: {:?}", event.phase);
            return;
        }
        let callbacks = match event.phase {
            GesturePhase::Start => &self.inner.on_start,
            GesturePhase::Move => &self.inner.on_move,
            GesturePhase::End => &self.inner.on_end,
        };
        // Clone out so a callback may register further callbacks.
        let snapshot: SmallVec<[Callback; 1]> = callbacks.borrow().clone();
        for callback in snapshot {
            callback(event);
        }
    }
}

impl PanState {
    fn velocity_px_per_ms(&self) -> f32 {
        self.tracker.velocity() / 1000.0
    }
}
