//! Headless inbox walkthrough.
//!
//! Builds a swipe list over an in-memory mail store, synthesizes
//! pointer drags against each row's pan gesture, and pumps the frame
//! clock so every exit and collapse animation plays to completion.
//! Run with RUST_LOG=debug to watch the drag sessions classify.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swipecell_animation::{Easing, TransitionSpec, TransitionStrategy};
use swipecell_core::{Point, Rect, Runtime};
use swipecell_foundation::{
    Email, MailStore, RowVisual, Side, SnoozePresenter, SnoozeUntil, SwipeLength, SwipeList,
    TransitionOverrides,
};
use swipecell_input::{PanConfig, PanGesture, PanGestureController, PointerEvent, PointerEventKind};

const ROW_WIDTH: f32 = 320.0;
const ROW_HEIGHT: f32 = 64.0;
const FRAME_NANOS: u64 = 16_666_667;

/// Stand-in for a rendered row; remembers what the list does to it.
struct DemoVisual {
    rect: Cell<Rect>,
    height: Cell<f32>,
}

impl DemoVisual {
    fn new(index: usize) -> Rc<Self> {
        Rc::new(Self {
            rect: Cell::new(Rect::new(
                0.0,
                index as f32 * ROW_HEIGHT,
                ROW_WIDTH,
                ROW_HEIGHT,
            )),
            height: Cell::new(ROW_HEIGHT),
        })
    }
}

impl RowVisual for DemoVisual {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(self.rect.get())
    }

    fn set_cell_offset(&self, side: Side, x: f32) {
        log::trace!("{side} cell at {x:.1}px");
    }

    fn set_row_height(&self, height: f32) {
        self.height.set(height);
    }

    fn measured_height(&self) -> f32 {
        self.height.get()
    }
}

/// In-memory mail shelves.
#[derive(Default)]
struct InboxStore {
    archived: RefCell<Vec<String>>,
    trash: RefCell<Vec<String>>,
    snoozed: RefCell<Vec<(String, SnoozeUntil)>>,
}

impl MailStore for InboxStore {
    fn archive(&self, email: &Email) {
        log::info!("archived '{}'", email.subject);
        self.archived.borrow_mut().push(email.subject.clone());
    }

    fn delete(&self, email: &Email) {
        log::info!("deleted '{}'", email.subject);
        self.trash.borrow_mut().push(email.subject.clone());
    }

    fn snooze(&self, email: &Email, until: SnoozeUntil) {
        log::info!("snoozed '{}' until t+{}ms", email.subject, until.0);
        self.snoozed.borrow_mut().push((email.subject.clone(), until));
    }
}

/// Date picker that always chooses "tomorrow".
struct TomorrowSnooze;

impl SnoozePresenter for TomorrowSnooze {
    fn present(&self, on_dismiss: Box<dyn FnOnce(Option<SnoozeUntil>)>) {
        log::info!("snooze dialog shown, picking tomorrow");
        on_dismiss(Some(SnoozeUntil(24 * 60 * 60 * 1000)));
    }
}

/// Override example: deletes exit with a fixed, eased sweep instead of
/// the velocity-derived linear one.
struct DeliberateDelete;

impl TransitionStrategy for DeliberateDelete {
    fn spec(&self, _current: f32, _target: f32, _max_velocity: f32) -> TransitionSpec {
        TransitionSpec::tween(150, Easing::FastOutSlowIn)
    }
}

struct Driver {
    runtime: Runtime,
    now_ms: i64,
    frame_nanos: u64,
}

impl Driver {
    fn new() -> Self {
        Self {
            runtime: Runtime::default(),
            now_ms: 0,
            frame_nanos: 0,
        }
    }

    /// One finger drag: down, six timed moves, up.
    fn drag(&mut self, pan: &PanGesture, from: Point, to: Point, step_ms: i64) {
        pan.handle_pointer_event(&PointerEvent::new(PointerEventKind::Down, from, self.now_ms));
        let steps = 6;
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

    /// Plays frames until every animation has settled.
    fn settle(&mut self) {
        let handle = self.runtime.handle();
        while handle.has_frame_callbacks() {
            handle.drain_frame_callbacks(self.frame_nanos);
            self.frame_nanos += FRAME_NANOS;
            self.now_ms += (FRAME_NANOS / 1_000_000) as i64;
        }
    }
}

fn seed_emails() -> Vec<Email> {
    [
        ("Ada", "Team standup notes"),
        ("Grace", "Quarterly planning doc"),
        ("Edsger", "Re: code review"),
        ("Barbara", "Conference CFP closes Friday"),
        ("Donald", "Weekend hike?"),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (sender, subject))| Email {
        id: index as u64 + 1,
        sender: sender.to_string(),
        subject: subject.to_string(),
        preview: format!("{subject}..."),
        favorited: index == 4,
    })
    .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut driver = Driver::new();
    let store = Rc::new(InboxStore::default());

    let mut overrides = TransitionOverrides::default();
    overrides.set(Side::Left, SwipeLength::Long, DeliberateDelete);

    let list = SwipeList::with_overrides(
        driver.runtime.frame_clock(),
        Rc::clone(&store) as Rc<dyn MailStore>,
        Rc::new(TomorrowSnooze),
        overrides,
    );
    list.set_on_outcome(|row, outcome| log::info!("{row} resolved as {outcome}"));
    {
        let list_for_observer = list.clone();
        list.set_on_rows_changed(move || {
            log::info!("{} row(s) remain", list_for_observer.len());
        });
    }

    let controller = PanGestureController::new();
    let mut pans = Vec::new();
    let mut row_ids = Vec::new();
    for (index, email) in seed_emails().into_iter().enumerate() {
        let visual = DemoVisual::new(index);
        let row = list.push_row(email, visual as Rc<dyn RowVisual>);
        let pan = controller.create(PanConfig::default());
        list.attach(row, &pan).expect("freshly pushed row");
        pans.push(pan);
        row_ids.push(row);
    }

    // Rows sit stacked 64px apart; each drag runs along its own row's
    // vertical center.
    let center_y = |index: usize| index as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0;

    println!("=== Swipecell inbox demo ===");

    // Half the row rightward: left-short, archive.
    driver.drag(
        &pans[0],
        Point::new(40.0, center_y(0)),
        Point::new(200.0, center_y(0)),
        12,
    );
    driver.settle();

    // All the way rightward, briskly: left-long, delete (with the
    // overridden exit).
    driver.drag(
        &pans[1],
        Point::new(30.0, center_y(1)),
        Point::new(280.0, center_y(1)),
        8,
    );
    driver.settle();

    // Half leftward: right-short, snooze via the dialog.
    driver.drag(
        &pans[2],
        Point::new(280.0, center_y(2)),
        Point::new(120.0, center_y(2)),
        12,
    );
    driver.settle();

    // Long leftward: right-long, secondary action only.
    driver.drag(
        &pans[3],
        Point::new(290.0, center_y(3)),
        Point::new(60.0, center_y(3)),
        8,
    );
    driver.settle();

    // A timid pull snaps back.
    driver.drag(
        &pans[4],
        Point::new(200.0, center_y(4)),
        Point::new(100.0, center_y(4)),
        20,
    );
    driver.settle();

    // A tap on the star rather than a swipe: the CFP is worth keeping.
    match list.toggle_favorite(row_ids[3]) {
        Ok(starred) => log::info!("favorite toggled to {starred}"),
        Err(error) => log::warn!("favorite toggle failed: {error}"),
    }

    println!();
    println!("inbox:");
    for email in list.emails() {
        let star = if email.favorited { " *" } else { "" };
        println!("  {} - {}{star}", email.sender, email.subject);
    }
    println!("archived: {:?}", store.archived.borrow());
    println!("trash:    {:?}", store.trash.borrow());
    println!(
        "snoozed:  {:?}",
        store
            .snoozed
            .borrow()
            .iter()
            .map(|(subject, _)| subject.clone())
            .collect::<Vec<_>>()
    );
}
