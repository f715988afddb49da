//! One-shot scalar transitions driven by the frame clock.

use std::cell::RefCell;
use std::rc::Rc;

use swipecell_core::{FrameCallbackRegistration, FrameClock};

use crate::easing::Easing;

/// How a transition moves: total duration and easing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSpec {
    pub duration_millis: u64,
    pub easing: Easing,
}

impl TransitionSpec {
    pub fn linear(duration_millis: u64) -> Self {
        Self {
            duration_millis,
            easing: Easing::Linear,
        }
    }

    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }
}

/// Tweens a scalar from `from` to `to` over the frame clock.
///
/// The first frame after [`play`](Self::play) latches the start time;
/// every subsequent frame applies the eased value, and the final frame
/// applies `to` exactly and then runs the completion once. A
/// zero-duration spec applies `to` and completes on the first frame.
pub struct Transition {
    clock: FrameClock,
    from: f32,
    to: f32,
    spec: TransitionSpec,
}

struct TransitionState {
    start_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_finish: Option<Box<dyn FnOnce()>>,
    finished: bool,
}

impl Transition {
    pub fn new(clock: FrameClock, from: f32, to: f32, spec: TransitionSpec) -> Self {
        Self {
            clock,
            from,
            to,
            spec,
        }
    }

    /// Starts the transition. `apply` runs every frame with the current
    /// value; `on_finish` runs exactly once, after the final `apply`.
    pub fn play(
        self,
        apply: impl Fn(f32) + 'static,
        on_finish: impl FnOnce() + 'static,
    ) -> TransitionHandle {
        log::trace!(
            "transition {:.1} -> {:.1} over {} ms",
            self.from,
            self.to,
            self.spec.duration_millis
        );
        let state = Rc::new(RefCell::new(TransitionState {
            start_nanos: None,
            registration: None,
            on_finish: Some(Box::new(on_finish)),
            finished: false,
        }));
        schedule_frame(
            self.clock,
            Rc::clone(&state),
            self.from,
            self.to,
            self.spec,
            Rc::new(apply),
        );
        TransitionHandle { state }
    }
}

fn schedule_frame(
    clock: FrameClock,
    state: Rc<RefCell<TransitionState>>,
    from: f32,
    to: f32,
    spec: TransitionSpec,
    apply: Rc<dyn Fn(f32)>,
) {
    let frame_state = Rc::clone(&state);
    let frame_clock = clock.clone();
    let registration = clock.with_frame_nanos(move |nanos| {
        let (value, finish) = {
            let mut state = frame_state.borrow_mut();
            if state.finished {
                return;
            }
            let start = *state.start_nanos.get_or_insert(nanos);
            let duration_nanos = spec.duration_millis.saturating_mul(1_000_000);
            let elapsed = nanos.saturating_sub(start);
            if elapsed >= duration_nanos {
                state.finished = true;
                state.registration = None;
                (to, state.on_finish.take())
            } else {
                let fraction = elapsed as f32 / duration_nanos as f32;
                (from + (to - from) * spec.easing.transform(fraction), None)
            }
        };
        // Callbacks run outside the borrow so they may cancel or start
        // transitions themselves.
        apply(value);
        match finish {
            Some(on_finish) => on_finish(),
            None => schedule_frame(
                frame_clock.clone(),
                Rc::clone(&frame_state),
                from,
                to,
                spec,
                Rc::clone(&apply),
            ),
        }
    });
    state.borrow_mut().registration = Some(registration);
}

/// Handle to a running transition.
pub struct TransitionHandle {
    state: Rc<RefCell<TransitionState>>,
}

impl TransitionHandle {
    pub fn is_finished(&self) -> bool {
        self.state.borrow().finished
    }

    /// Stops applying frames. The completion still runs, immediately;
    /// whoever waits on it must not be stranded by a cancellation.
    pub fn cancel(&self) {
        let (registration, finish) = {
            let mut state = self.state.borrow_mut();
            if state.finished {
                return;
            }
            state.finished = true;
            (state.registration.take(), state.on_finish.take())
        };
        if let Some(registration) = registration {
            registration.cancel();
        }
        if let Some(on_finish) = finish {
            on_finish();
        }
    }
}
