//! Per-row drag session state machine.
//!
//! A [`SwipeItem`] is pure state: it consumes gesture events and
//! answers with what should happen on screen. It never touches a
//! visual or plays an animation itself; the list orchestrator executes
//! the returned [`DragUpdate`]s and calls [`SwipeItem::complete`] when
//! the terminal animation finishes, which is the only point the
//! session re-arms.

use swipecell_core::Rect;
use swipecell_input::{GestureEvent, MoveDirection};

use crate::reveal::{
    accessories_visible, RevealState, INCOMPLETE_DRAG_PERCENTAGE, SHORT_DRAG_PERCENTAGE,
};
use crate::types::{Outcome, Side, SwipeDirection, SwipeLength};

/// Pointer may stray this many pixels above or below the row before
/// the drag is abandoned.
const BOUNDARY_TOLERANCE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    /// A terminal animation is in flight; all gesture input is ignored
    /// until its completion re-arms the session.
    Animating,
}

/// Terminal animation the session asks for at release or abandonment.
///
/// `length` is `None` for a reset. Positions are x-translations of the
/// active reveal cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolveRequest {
    pub side: Side,
    pub length: Option<SwipeLength>,
    pub current: f32,
    pub target: f32,
    pub max_velocity: f32,
}

impl ResolveRequest {
    pub fn outcome(&self) -> Outcome {
        match self.length {
            None => Outcome::Reset,
            Some(SwipeLength::Short) => Outcome::Short(self.side),
            Some(SwipeLength::Long) => Outcome::Long(self.side),
        }
    }
}

/// What a gesture-move event amounts to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragUpdate {
    /// Stale or gated input; nothing changes.
    Ignored,
    /// Live rubber-band tracking: move the cell from `from` to `to`
    /// instantly, no tween.
    Follow { side: Side, from: f32, to: f32 },
    /// The pointer left the drag envelope; the session has entered
    /// `Animating` and wants this reset played.
    Abandon(ResolveRequest),
}

pub struct SwipeItem {
    enabled: bool,
    phase: DragPhase,
    direction: SwipeDirection,
    container: Rect,
    previous_x: Option<f32>,
    current_x: Option<f32>,
    percentage_dragged: f32,
    max_achieved_velocity: f32,
    reveal: RevealState,
}

impl SwipeItem {
    pub fn new() -> Self {
        Self {
            enabled: true,
            phase: DragPhase::Idle,
            direction: SwipeDirection::LeftToRight,
            container: Rect::default(),
            previous_x: None,
            current_x: None,
            percentage_dragged: 0.0,
            max_achieved_velocity: 0.0,
            reveal: RevealState::Inactive,
        }
    }

    /// Begins a session. `container` is the row's layout box at this
    /// instant; it is captured once and never re-read, so mid-drag
    /// layout shifts cannot change classification. Returns `false` when
    /// the event is ignored (disabled, or a session already active).
    pub fn start(&mut self, event: &GestureEvent, container: Rect) -> bool {
        if self.phase != DragPhase::Idle || !self.enabled {
            return false;
        }
        self.container = container;
        self.direction = if event.direction == MoveDirection::Left {
            SwipeDirection::RightToLeft
        } else {
            SwipeDirection::LeftToRight
        };
        self.phase = DragPhase::Dragging;
        log::debug!("drag started, direction {:?}", self.direction);
        true
    }

    /// Consumes one move event.
    pub fn drag(&mut self, event: &GestureEvent) -> DragUpdate {
        if self.phase != DragPhase::Dragging || !self.enabled {
            return DragUpdate::Ignored;
        }

        self.previous_x = Some(self.current_x.unwrap_or(event.center.x));
        self.current_x = Some(event.center.x);
        self.percentage_dragged = (event.delta_x / self.container.width).abs();

        // Pointer outside the row's box abandons the drag, whatever the
        // distance so far.
        let relative_y = event.center.y - self.container.y;
        let relative_x = event.center.x - self.container.x;
        if relative_y < -BOUNDARY_TOLERANCE
            || relative_y > self.container.height + BOUNDARY_TOLERANCE
            || relative_x <= 0.0
            || relative_x >= self.container.width
        {
            log::debug!("pointer left the row at ({relative_x:.0}, {relative_y:.0}), abandoning");
            self.phase = DragPhase::Animating;
            return DragUpdate::Abandon(self.reset_request());
        }

        // So does drifting vertically more than half the row height.
        if event.delta_y.abs() > self.container.height / 2.0 {
            log::debug!("vertical drift {:.0}px, abandoning", event.delta_y);
            self.phase = DragPhase::Animating;
            return DragUpdate::Abandon(self.reset_request());
        }

        self.reveal = RevealState::classify(self.percentage_dragged);
        self.max_achieved_velocity = self.max_achieved_velocity.max(event.velocity.abs());

        let width = self.container.width;
        let (from, to) = match self.direction {
            SwipeDirection::LeftToRight => (
                self.previous_x.unwrap_or(0.0) - width,
                self.current_x.unwrap_or(0.0) - width,
            ),
            SwipeDirection::RightToLeft => {
                (self.previous_x.unwrap_or(0.0), self.current_x.unwrap_or(0.0))
            }
        };
        DragUpdate::Follow {
            side: self.direction.side(),
            from,
            to,
        }
    }

    /// Consumes the release. Classification uses the fraction recorded
    /// by the last move, not the end event itself. Returns the terminal
    /// animation to play, or `None` when the event is stale.
    pub fn end(&mut self, _event: &GestureEvent) -> Option<ResolveRequest> {
        if self.phase != DragPhase::Dragging || !self.enabled {
            return None;
        }

        self.phase = DragPhase::Animating;
        let request = if self.percentage_dragged < INCOMPLETE_DRAG_PERCENTAGE {
            self.reset_request()
        } else if self.percentage_dragged < SHORT_DRAG_PERCENTAGE {
            self.commit_request(SwipeLength::Short)
        } else {
            self.commit_request(SwipeLength::Long)
        };
        log::debug!(
            "drag ended at {:.0}% as {}",
            self.percentage_dragged * 100.0,
            request.outcome()
        );
        Some(request)
    }

    /// Completion barrier: re-arms the session once the terminal
    /// animation has finished. The next drag starts with no residual
    /// state.
    pub fn complete(&mut self) {
        self.phase = DragPhase::Idle;
        self.reveal = RevealState::Inactive;
        self.previous_x = None;
        self.current_x = None;
        self.percentage_dragged = 0.0;
        self.max_achieved_velocity = 0.0;
    }

    fn reset_request(&self) -> ResolveRequest {
        let width = self.container.width;
        let (current, target) = match self.direction {
            SwipeDirection::LeftToRight => (self.anchor_x() - width, -width),
            SwipeDirection::RightToLeft => (self.anchor_x(), width),
        };
        ResolveRequest {
            side: self.direction.side(),
            length: None,
            current,
            target,
            max_velocity: self.max_achieved_velocity,
        }
    }

    fn commit_request(&self, length: SwipeLength) -> ResolveRequest {
        let width = self.container.width;
        let (current, target) = match self.direction {
            SwipeDirection::LeftToRight => (self.anchor_x() - width, width * 2.0),
            SwipeDirection::RightToLeft => (self.anchor_x(), -width),
        };
        ResolveRequest {
            side: self.direction.side(),
            length: Some(length),
            current,
            target,
            max_velocity: self.max_achieved_velocity,
        }
    }

    /// Last pointer x the cell was following. A session that saw no
    /// move events animates from the cell's parked position.
    fn anchor_x(&self) -> f32 {
        self.previous_x.or(self.current_x).unwrap_or_else(|| {
            match self.direction {
                SwipeDirection::LeftToRight => 0.0,
                SwipeDirection::RightToLeft => self.container.width,
            }
        })
    }

    /// External gate. While disabled every gesture event is dropped.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn direction(&self) -> SwipeDirection {
        self.direction
    }

    pub fn reveal_state(&self) -> RevealState {
        self.reveal
    }

    pub fn percentage_dragged(&self) -> f32 {
        self.percentage_dragged
    }

    pub fn max_achieved_velocity(&self) -> f32 {
        self.max_achieved_velocity
    }

    /// Whether a release right now would commit the short action.
    pub fn is_short_drag(&self) -> bool {
        self.percentage_dragged < SHORT_DRAG_PERCENTAGE
    }

    pub fn accessories_visible(&self) -> bool {
        accessories_visible(self.percentage_dragged)
    }
}

impl Default for SwipeItem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swipecell_core::Point;
    use swipecell_input::GesturePhase;

    const ROW: Rect = Rect::new(0.0, 0.0, 300.0, 60.0);

    fn event(phase: GesturePhase, x: f32, y: f32, dx: f32, dy: f32, velocity: f32) -> GestureEvent {
        GestureEvent {
            phase,
            center: Point::new(x, y),
            delta_x: dx,
            delta_y: dy,
            velocity,
            direction: if dx < 0.0 {
                MoveDirection::Left
            } else {
                MoveDirection::Right
            },
        }
    }

    fn start_event(dx: f32) -> GestureEvent {
        event(GesturePhase::Start, 150.0, 30.0, dx, 0.0, 0.0)
    }

    fn move_event(x: f32, dx: f32, velocity: f32) -> GestureEvent {
        event(GesturePhase::Move, x, 30.0, dx, 0.0, velocity)
    }

    fn end_event() -> GestureEvent {
        event(GesturePhase::End, 150.0, 30.0, 0.0, 0.0, 0.0)
    }

    /// Runs a right-to-left drag from x=250 to the given final dx and
    /// returns the terminal request.
    fn leftward_drag(item: &mut SwipeItem, final_dx: f32, velocity: f32) -> ResolveRequest {
        assert!(item.start(&start_event(-10.0), ROW));
        let steps = 4;
        for step in 1..=steps {
            let dx = final_dx * step as f32 / steps as f32;
            item.drag(&move_event(250.0 + dx, dx, velocity));
        }
        item.end(&end_event()).expect("drag should resolve")
    }

    #[test]
    fn incomplete_drag_resets_regardless_of_velocity() {
        for velocity in [0.0, 2.0, 50.0] {
            let mut item = SwipeItem::new();
            let request = leftward_drag(&mut item, -100.0, velocity);
            assert_eq!(request.outcome(), Outcome::Reset, "velocity {velocity}");
        }
    }

    #[test]
    fn middle_bucket_is_short_and_top_bucket_is_long() {
        let mut item = SwipeItem::new();
        // 150 / 300 = 0.50.
        let request = leftward_drag(&mut item, -150.0, 1.0);
        assert_eq!(request.outcome(), Outcome::Short(Side::Right));

        let mut item = SwipeItem::new();
        // 200 / 300 ≈ 0.667.
        let request = leftward_drag(&mut item, -200.0, 1.0);
        assert_eq!(request.outcome(), Outcome::Long(Side::Right));
    }

    #[test]
    fn threshold_boundaries_commit_the_higher_bucket() {
        let mut item = SwipeItem::new();
        // Exactly 0.40.
        let request = leftward_drag(&mut item, -120.0, 1.0);
        assert_eq!(request.outcome(), Outcome::Short(Side::Right));

        let mut item = SwipeItem::new();
        // Exactly 0.60.
        let request = leftward_drag(&mut item, -180.0, 1.0);
        assert_eq!(request.outcome(), Outcome::Long(Side::Right));
    }

    #[test]
    fn direction_is_fixed_from_the_first_movement() {
        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(10.0), ROW));
        assert_eq!(item.direction(), SwipeDirection::LeftToRight);

        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(-10.0), ROW));
        assert_eq!(item.direction(), SwipeDirection::RightToLeft);
    }

    #[test]
    fn start_is_rejected_while_not_idle() {
        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(-10.0), ROW));
        item.drag(&move_event(200.0, -50.0, 4.0));
        let achieved = item.max_achieved_velocity();

        // Second start mid-drag is a no-op.
        assert!(!item.start(&start_event(10.0), ROW));
        assert_eq!(item.direction(), SwipeDirection::RightToLeft);

        item.end(&end_event()).unwrap();
        assert_eq!(item.phase(), DragPhase::Animating);

        // And mid-animation, without touching the achieved velocity.
        assert!(!item.start(&start_event(10.0), ROW));
        assert_eq!(item.max_achieved_velocity(), achieved);
    }

    #[test]
    fn disabled_item_ignores_everything() {
        let mut item = SwipeItem::new();
        item.set_enabled(false);
        assert!(!item.start(&start_event(-10.0), ROW));
        assert_eq!(item.drag(&move_event(100.0, -50.0, 1.0)), DragUpdate::Ignored);
        assert!(item.end(&end_event()).is_none());
    }

    #[test]
    fn max_velocity_is_a_running_maximum_of_magnitudes() {
        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(-10.0), ROW));
        item.drag(&move_event(240.0, -10.0, -2.0));
        item.drag(&move_event(230.0, -20.0, -6.0));
        item.drag(&move_event(220.0, -30.0, -1.0));
        assert_eq!(item.max_achieved_velocity(), 6.0);
    }

    #[test]
    fn follow_tracks_the_pointer_one_to_one() {
        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(-10.0), ROW));
        // First move seeds previous_x from its own position.
        assert_eq!(
            item.drag(&move_event(240.0, -10.0, 1.0)),
            DragUpdate::Follow {
                side: Side::Right,
                from: 240.0,
                to: 240.0
            }
        );
        assert_eq!(
            item.drag(&move_event(220.0, -30.0, 1.0)),
            DragUpdate::Follow {
                side: Side::Right,
                from: 240.0,
                to: 220.0
            }
        );
    }

    #[test]
    fn left_to_right_follow_offsets_by_the_container_width() {
        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(10.0), ROW));
        item.drag(&move_event(60.0, 10.0, 1.0));
        assert_eq!(
            item.drag(&move_event(90.0, 40.0, 1.0)),
            DragUpdate::Follow {
                side: Side::Left,
                from: -240.0,
                to: -210.0
            }
        );
    }

    #[test]
    fn pointer_exiting_horizontally_abandons_even_a_long_drag() {
        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(-10.0), ROW));
        item.drag(&move_event(50.0, -200.0, 5.0));
        assert_eq!(item.reveal_state(), RevealState::Long);

        // Pointer crosses the left edge.
        let update = item.drag(&move_event(-5.0, -255.0, 5.0));
        match update {
            DragUpdate::Abandon(request) => assert_eq!(request.outcome(), Outcome::Reset),
            other => panic!("expected abandonment, got {other:?}"),
        }
        assert_eq!(item.phase(), DragPhase::Animating);
    }

    #[test]
    fn vertical_tolerance_is_ten_pixels() {
        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(-10.0), ROW));
        // 9 px above the row is still fine.
        assert!(matches!(
            item.drag(&event(GesturePhase::Move, 200.0, -9.0, -50.0, -9.0, 1.0)),
            DragUpdate::Follow { .. }
        ));
        // 11 px above is out.
        assert!(matches!(
            item.drag(&event(GesturePhase::Move, 195.0, -11.0, -55.0, -11.0, 1.0)),
            DragUpdate::Abandon(_)
        ));
    }

    #[test]
    fn vertical_drift_past_half_height_abandons() {
        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(-10.0), ROW));
        // Row is 60 tall; a drift of 31 px in either direction is too
        // much even while the pointer stays inside the box.
        assert!(matches!(
            item.drag(&event(GesturePhase::Move, 200.0, 55.0, -50.0, 31.0, 1.0)),
            DragUpdate::Abandon(_)
        ));
    }

    #[test]
    fn abandonment_ignores_further_input() {
        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(-10.0), ROW));
        item.drag(&move_event(-5.0, -255.0, 5.0));
        assert_eq!(item.drag(&move_event(100.0, -150.0, 5.0)), DragUpdate::Ignored);
        assert!(item.end(&end_event()).is_none());
    }

    #[test]
    fn reset_positions_park_the_cell_off_screen() {
        let mut item = SwipeItem::new();
        let request = leftward_drag(&mut item, -60.0, 1.0);
        // Right cell sits at the last pointer x and exits to +width.
        assert_eq!(request.side, Side::Right);
        assert_eq!(request.target, 300.0);

        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(10.0), ROW));
        item.drag(&move_event(100.0, 60.0, 1.0));
        let request = item.end(&end_event()).unwrap();
        // Left cell is width-offset and exits to -width.
        assert_eq!(request.side, Side::Left);
        assert_eq!(request.target, -300.0);
    }

    #[test]
    fn commit_positions_cross_the_full_row() {
        let mut item = SwipeItem::new();
        let request = leftward_drag(&mut item, -200.0, 5.0);
        assert_eq!(request.target, -300.0);

        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(10.0), ROW));
        item.drag(&move_event(290.0, 200.0, 5.0));
        let request = item.end(&end_event()).unwrap();
        assert_eq!(request.target, 600.0);
    }

    #[test]
    fn reveal_state_follows_the_live_fraction() {
        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(-10.0), ROW));
        item.drag(&move_event(230.0, -20.0, 1.0));
        assert_eq!(item.reveal_state(), RevealState::Disabled);
        assert!(!item.accessories_visible());

        item.drag(&move_event(100.0, -150.0, 1.0));
        assert_eq!(item.reveal_state(), RevealState::Short);
        assert!(item.accessories_visible());
        assert!(item.is_short_drag());
    }

    #[test]
    fn completion_returns_a_clean_idle_session() {
        let mut item = SwipeItem::new();
        let first = leftward_drag(&mut item, -200.0, 5.0);
        item.complete();

        assert_eq!(item.phase(), DragPhase::Idle);
        assert_eq!(item.reveal_state(), RevealState::Inactive);
        assert_eq!(item.percentage_dragged(), 0.0);
        assert_eq!(item.max_achieved_velocity(), 0.0);

        // An identical drag classifies identically.
        let second = leftward_drag(&mut item, -200.0, 5.0);
        assert_eq!(second, first);
    }

    #[test]
    fn end_without_moves_resets_from_the_parked_position() {
        let mut item = SwipeItem::new();
        assert!(item.start(&start_event(-10.0), ROW));
        let request = item.end(&end_event()).unwrap();
        assert_eq!(request.outcome(), Outcome::Reset);
        assert_eq!(request.current, request.target);
    }
}
