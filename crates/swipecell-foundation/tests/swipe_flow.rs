//! End-to-end swipe flows: pointer input through pan recognition,
//! drag sessions, terminal animations, and store mutations.

use std::cell::RefCell;
use std::rc::Rc;

use swipecell_core::{Point, Rect, RowId};
use swipecell_foundation::{
    Email, MailStore, Outcome, RowVisual, Side, SnoozePresenter, SnoozeUntil, SwipeList,
};
use swipecell_input::{PanConfig, PanGesture, PanGestureController};
use swipecell_testing::{PresetSnooze, RecordingStore, RecordingVisual, StoreAction, SwipeRobot};

const ROW_RECT: Rect = Rect::new(0.0, 0.0, 300.0, 60.0);

struct App {
    robot: SwipeRobot,
    list: SwipeList,
    store: Rc<RecordingStore>,
    rows: Vec<(RowId, Rc<RecordingVisual>, PanGesture)>,
    outcomes: Rc<RefCell<Vec<(RowId, Outcome)>>>,
}

fn app_with_snooze(row_count: u64, snooze: Rc<dyn SnoozePresenter>) -> App {
    let robot = SwipeRobot::new();
    let store = RecordingStore::new();
    let list = SwipeList::new(
        robot.runtime().frame_clock(),
        Rc::clone(&store) as Rc<dyn MailStore>,
        snooze,
    );

    let controller = PanGestureController::new();
    let mut rows = Vec::new();
    for id in 1..=row_count {
        let visual = RecordingVisual::new(ROW_RECT);
        let row = list.push_row(
            Email {
                id,
                sender: format!("sender-{id}"),
                subject: format!("subject {id}"),
                preview: String::new(),
                favorited: false,
            },
            Rc::clone(&visual) as Rc<dyn RowVisual>,
        );
        let pan = controller.create(PanConfig::default());
        list.attach(row, &pan).unwrap();
        rows.push((row, visual, pan));
    }

    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let outcomes_in = Rc::clone(&outcomes);
    list.set_on_outcome(move |row, outcome| outcomes_in.borrow_mut().push((row, outcome)));

    App {
        robot,
        list,
        store,
        rows,
        outcomes,
    }
}

fn app(row_count: u64) -> App {
    app_with_snooze(row_count, PresetSnooze::dismissing())
}

/// Leftward drag across two thirds of a 300 px row at 5 px/ms.
fn fast_left_long(app: &mut App, index: usize) {
    let pan = app.rows[index].2.clone();
    app.robot
        .drag(&pan, Point::new(250.0, 30.0), Point::new(50.0, 30.0), 4, 10);
}

#[test]
fn right_long_swipe_fires_exactly_once_after_completion() {
    let mut app = app(1);
    let (row, visual, _) = app.rows[0].clone_refs();

    fast_left_long(&mut app, 0);
    // The cell followed the finger during the drag.
    assert!(!visual.cell_offsets().is_empty());
    // The outcome waits for the exit animation.
    assert!(app.outcomes.borrow().is_empty());

    app.robot.run_until_idle();
    assert_eq!(*app.outcomes.borrow(), vec![(row, Outcome::Long(Side::Right))]);
    // Right side is observer-only: the row and the store are untouched.
    assert!(app.store.is_empty());
    assert_eq!(app.list.len(), 1);
    // The cell crossed the full row.
    assert_eq!(visual.last_cell_offset(), Some((Side::Right, -300.0)));
}

#[test]
fn slow_release_exits_at_the_velocity_floor() {
    let mut app = app(1);
    let pan = app.rows[0].2.clone();

    // 50 px every 100 ms: too slow for the tracker to even register,
    // so the exit runs at the suggested floor of 3 px/ms. The cell
    // travels 400 px (last follow position 100 to target -300), which
    // is 133 ms.
    app.robot
        .drag(&pan, Point::new(250.0, 30.0), Point::new(50.0, 30.0), 4, 100);

    // 8 frames is ~117 ms: still animating.
    app.robot.advance_frames(8);
    assert!(app.outcomes.borrow().is_empty());

    // Two more frames pass the 133 ms mark.
    app.robot.advance_frames(2);
    assert_eq!(app.outcomes.borrow().len(), 1);
}

#[test]
fn short_right_drag_archives_and_collapses() {
    let mut app = app(1);
    let (row, visual, pan) = app.rows[0].clone_refs();

    // 150 px rightward is half the row: left-short, bound to archive.
    app.robot
        .drag(&pan, Point::new(50.0, 30.0), Point::new(200.0, 30.0), 4, 10);
    app.robot.run_until_idle();

    assert_eq!(*app.outcomes.borrow(), vec![(row, Outcome::Short(Side::Left))]);
    assert_eq!(app.store.actions(), vec![StoreAction::Archive(1)]);
    assert!(app.list.is_empty());
    // The collapse ran the height all the way down before the removal.
    assert_eq!(visual.height(), 0.0);
}

#[test]
fn long_right_drag_deletes() {
    let mut app = app(1);
    let pan = app.rows[0].2.clone();

    app.robot
        .drag(&pan, Point::new(50.0, 30.0), Point::new(250.0, 30.0), 4, 10);
    app.robot.run_until_idle();

    assert_eq!(app.store.actions(), vec![StoreAction::Delete(1)]);
    assert!(app.list.is_empty());
}

#[test]
fn snooze_choice_flows_through_the_dialog() {
    let snooze = PresetSnooze::choosing(SnoozeUntil(86_400_000));
    let mut app = app_with_snooze(1, Rc::clone(&snooze) as Rc<dyn SnoozePresenter>);
    let pan = app.rows[0].2.clone();

    // Half the row leftward: right-short, bound to snooze.
    app.robot
        .drag(&pan, Point::new(250.0, 30.0), Point::new(100.0, 30.0), 4, 10);
    app.robot.run_until_idle();

    assert_eq!(snooze.presentations(), 1);
    assert_eq!(
        app.store.actions(),
        vec![StoreAction::Snooze(1, SnoozeUntil(86_400_000))]
    );
    assert!(app.list.is_empty());
}

#[test]
fn dismissed_snooze_dialog_keeps_the_row() {
    let mut app = app(1);
    let pan = app.rows[0].2.clone();

    app.robot
        .drag(&pan, Point::new(250.0, 30.0), Point::new(100.0, 30.0), 4, 10);
    app.robot.run_until_idle();

    assert!(app.store.is_empty());
    assert_eq!(app.list.len(), 1);
}

#[test]
fn taps_reach_nothing() {
    let mut app = app(1);
    let pan = app.rows[0].2.clone();
    app.robot.tap(&pan, Point::new(150.0, 30.0));
    app.robot.run_until_idle();
    assert!(app.outcomes.borrow().is_empty());
    assert!(app.rows[0].1.cell_offsets().is_empty());
}

#[test]
fn input_gate_holds_other_rows_until_the_barrier() {
    let mut app = app(2);
    let first_pan = app.rows[0].2.clone();
    let second_pan = app.rows[1].2.clone();

    // A sub-threshold drag on the first row: resolves as reset, but the
    // list is gated until that reset finishes.
    app.robot
        .drag(&first_pan, Point::new(250.0, 30.0), Point::new(150.0, 30.0), 4, 10);
    assert!(app.list.is_input_locked());

    app.robot
        .drag(&second_pan, Point::new(250.0, 30.0), Point::new(50.0, 30.0), 4, 10);
    // The second drag was swallowed whole.
    assert!(app.rows[1].1.cell_offsets().is_empty());

    app.robot.run_until_idle();
    assert_eq!(app.outcomes.borrow().len(), 1);
    assert!(!app.list.is_input_locked());

    // After the barrier the second row is interactive again.
    app.robot
        .drag(&second_pan, Point::new(250.0, 30.0), Point::new(50.0, 30.0), 4, 10);
    app.robot.run_until_idle();
    assert_eq!(app.outcomes.borrow().len(), 2);
}

#[test]
fn pointer_escaping_the_row_resets_even_a_long_drag() {
    let mut app = app(1);
    let (row, _, pan) = app.rows[0].clone_refs();

    // Crosses the left edge of the row on the final move.
    app.robot
        .drag(&pan, Point::new(250.0, 30.0), Point::new(-30.0, 30.0), 4, 10);
    app.robot.run_until_idle();

    assert_eq!(*app.outcomes.borrow(), vec![(row, Outcome::Reset)]);
    assert_eq!(app.list.len(), 1);
    assert!(app.store.is_empty());
}

#[test]
fn removals_address_rows_by_identity() {
    let mut app = app(3);

    // Delete the middle row, then the last one. The second removal must
    // hit email 3 even though every position shifted after the first.
    let middle_pan = app.rows[1].2.clone();
    app.robot
        .drag(&middle_pan, Point::new(50.0, 30.0), Point::new(250.0, 30.0), 4, 10);
    app.robot.run_until_idle();

    let last_pan = app.rows[2].2.clone();
    app.robot
        .drag(&last_pan, Point::new(50.0, 30.0), Point::new(250.0, 30.0), 4, 10);
    app.robot.run_until_idle();

    assert_eq!(
        app.store.actions(),
        vec![StoreAction::Delete(2), StoreAction::Delete(3)]
    );
    let remaining: Vec<u64> = app.list.emails().iter().map(|email| email.id).collect();
    assert_eq!(remaining, vec![1]);
}

#[test]
fn sessions_round_trip_cleanly() {
    let mut app = app(1);
    let pan = app.rows[0].2.clone();

    // Reset, then an identical committed drag, twice over.
    app.robot
        .drag(&pan, Point::new(250.0, 30.0), Point::new(150.0, 30.0), 4, 10);
    app.robot.run_until_idle();
    app.robot
        .drag(&pan, Point::new(250.0, 30.0), Point::new(50.0, 30.0), 4, 10);
    app.robot.run_until_idle();

    let outcomes: Vec<Outcome> = app.outcomes.borrow().iter().map(|(_, o)| *o).collect();
    assert_eq!(outcomes, vec![Outcome::Reset, Outcome::Long(Side::Right)]);
}

trait CloneRefs {
    fn clone_refs(&self) -> (RowId, Rc<RecordingVisual>, PanGesture);
}

impl CloneRefs for (RowId, Rc<RecordingVisual>, PanGesture) {
    fn clone_refs(&self) -> (RowId, Rc<RecordingVisual>, PanGesture) {
        (self.0, Rc::clone(&self.1), self.2.clone())
    }
}
