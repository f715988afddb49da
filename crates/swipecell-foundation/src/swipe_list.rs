//! List orchestration: rows, outcome bindings, and removal collapse.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use swipecell_animation::{
    DefaultSwipeOut, Easing, Transition, TransitionSpec, TransitionStrategy,
};
use swipecell_core::{FrameClock, RowId, SwipeError};
use swipecell_input::{GestureEvent, PanGesture};

use crate::reveal::{CellAppearance, RevealCellConfig};
use crate::swipe_item::{DragPhase, DragUpdate, ResolveRequest, SwipeItem};
use crate::traits::{Email, MailStore, RowVisual, SnoozePresenter};
use crate::types::{Outcome, Side, SwipeLength};

/// Removal collapse: row height shrinks to zero over this long before
/// the store is mutated.
pub const COLLAPSE_DURATION_MS: u64 = 300;

/// Caller-supplied replacements for the stock swipe-out timing, keyed
/// by the exact (side, length) combination. Resets always use the
/// stock timing; only committed outcomes can be restyled.
#[derive(Default)]
pub struct TransitionOverrides {
    left_short: Option<Box<dyn TransitionStrategy>>,
    left_long: Option<Box<dyn TransitionStrategy>>,
    right_short: Option<Box<dyn TransitionStrategy>>,
    right_long: Option<Box<dyn TransitionStrategy>>,
}

impl TransitionOverrides {
    pub fn set(
        &mut self,
        side: Side,
        length: SwipeLength,
        strategy: impl TransitionStrategy + 'static,
    ) {
        *self.slot(side, length) = Some(Box::new(strategy));
    }

    fn slot(&mut self, side: Side, length: SwipeLength) -> &mut Option<Box<dyn TransitionStrategy>> {
        match (side, length) {
            (Side::Left, SwipeLength::Short) => &mut self.left_short,
            (Side::Left, SwipeLength::Long) => &mut self.left_long,
            (Side::Right, SwipeLength::Short) => &mut self.right_short,
            (Side::Right, SwipeLength::Long) => &mut self.right_long,
        }
    }

    fn get(&self, side: Side, length: SwipeLength) -> Option<&dyn TransitionStrategy> {
        match (side, length) {
            (Side::Left, SwipeLength::Short) => self.left_short.as_deref(),
            (Side::Left, SwipeLength::Long) => self.left_long.as_deref(),
            (Side::Right, SwipeLength::Short) => self.right_short.as_deref(),
            (Side::Right, SwipeLength::Long) => self.right_long.as_deref(),
        }
    }
}

struct SwipeRow {
    email: Email,
    visual: Rc<dyn RowVisual>,
    cells: RevealCellConfig,
    item: RefCell<SwipeItem>,
}

struct SwipeListInner {
    clock: FrameClock,
    store: Rc<dyn MailStore>,
    snooze: Rc<dyn SnoozePresenter>,
    overrides: TransitionOverrides,
    rows: RefCell<IndexMap<RowId, SwipeRow>>,
    next_row_id: Cell<u64>,
    /// List-wide input gate: set while any row is mid-session, released
    /// at that row's completion barrier. At most one drag is live per
    /// list.
    input_locked: Cell<bool>,
    on_outcome: RefCell<Option<Box<dyn Fn(RowId, Outcome)>>>,
    on_rows_changed: RefCell<Option<Box<dyn Fn()>>>,
}

/// Ordered set of swipeable rows bound to a mail store.
///
/// Committed swipes map to actions: left-short archives, left-long
/// deletes, right-short opens the snooze dialog, right-long is
/// observer-only. Rows are addressed by [`RowId`], never by position;
/// two removal flows finishing out of order cannot alias each other.
#[derive(Clone)]
pub struct SwipeList {
    inner: Rc<SwipeListInner>,
}

impl SwipeList {
    pub fn new(
        clock: FrameClock,
        store: Rc<dyn MailStore>,
        snooze: Rc<dyn SnoozePresenter>,
    ) -> Self {
        Self::with_overrides(clock, store, snooze, TransitionOverrides::default())
    }

    pub fn with_overrides(
        clock: FrameClock,
        store: Rc<dyn MailStore>,
        snooze: Rc<dyn SnoozePresenter>,
        overrides: TransitionOverrides,
    ) -> Self {
        Self {
            inner: Rc::new(SwipeListInner {
                clock,
                store,
                snooze,
                overrides,
                rows: RefCell::new(IndexMap::new()),
                next_row_id: Cell::new(0),
                input_locked: Cell::new(false),
                on_outcome: RefCell::new(None),
                on_rows_changed: RefCell::new(None),
            }),
        }
    }

    /// Appends a row with the stock reveal-cell labels and returns its
    /// stable id.
    pub fn push_row(&self, email: Email, visual: Rc<dyn RowVisual>) -> RowId {
        self.push_row_with_cells(email, visual, RevealCellConfig::default())
    }

    /// Appends a row with custom reveal-cell labels and icons.
    pub fn push_row_with_cells(
        &self,
        email: Email,
        visual: Rc<dyn RowVisual>,
        cells: RevealCellConfig,
    ) -> RowId {
        let id = RowId(self.inner.next_row_id.get());
        self.inner.next_row_id.set(id.0 + 1);
        self.inner.rows.borrow_mut().insert(
            id,
            SwipeRow {
                email,
                visual,
                cells,
                item: RefCell::new(SwipeItem::new()),
            },
        );
        id
    }

    /// Appearance of the reveal cell the live drag on `row_id` would
    /// commit if released now, or `None` while no accessories should
    /// render (no drag, under the incomplete threshold, or already
    /// resolving).
    pub fn active_cell(&self, row_id: RowId) -> Result<Option<CellAppearance>, SwipeError> {
        let rows = self.inner.rows.borrow();
        let row = rows
            .get(&row_id)
            .ok_or(SwipeError::UnknownRow { row: row_id })?;
        let item = row.item.borrow();
        if item.phase() != DragPhase::Dragging || !item.accessories_visible() {
            return Ok(None);
        }
        let length = if item.is_short_drag() {
            SwipeLength::Short
        } else {
            SwipeLength::Long
        };
        Ok(Some(
            row.cells.appearance(item.direction().side(), length).clone(),
        ))
    }

    /// Flips the row's favorite flag and returns the new value.
    pub fn toggle_favorite(&self, row_id: RowId) -> Result<bool, SwipeError> {
        let mut rows = self.inner.rows.borrow_mut();
        let row = rows
            .get_mut(&row_id)
            .ok_or(SwipeError::UnknownRow { row: row_id })?;
        row.email.favorited = !row.email.favorited;
        log::debug!("{row_id} favorited = {}", row.email.favorited);
        Ok(row.email.favorited)
    }

    /// Wires a row to a pan gesture. Each recognized drag on the
    /// gesture drives that row's session; errors inside the stream are
    /// logged, not propagated, since the recognizer has nowhere to
    /// return them.
    pub fn attach(&self, row_id: RowId, pan: &PanGesture) -> Result<(), SwipeError> {
        if !self.inner.rows.borrow().contains_key(&row_id) {
            return Err(SwipeError::UnknownRow { row: row_id });
        }
        let weak = Rc::downgrade(&self.inner);
        pan.on_start(move |event| {
            if let Some(list) = Self::upgrade(&weak) {
                if let Err(error) = list.drag_started(row_id, event) {
                    log::warn!("drag start on {row_id} failed: {error}");
                }
            }
        });
        let weak = Rc::downgrade(&self.inner);
        pan.on_move(move |event| {
            if let Some(list) = Self::upgrade(&weak) {
                if let Err(error) = list.drag_moved(row_id, event) {
                    log::warn!("drag move on {row_id} failed: {error}");
                }
            }
        });
        let weak = Rc::downgrade(&self.inner);
        pan.on_end(move |event| {
            if let Some(list) = Self::upgrade(&weak) {
                if let Err(error) = list.drag_ended(row_id, event) {
                    log::warn!("drag end on {row_id} failed: {error}");
                }
            }
        });
        Ok(())
    }

    fn upgrade(weak: &Weak<SwipeListInner>) -> Option<SwipeList> {
        weak.upgrade().map(|inner| SwipeList { inner })
    }

    /// Feeds a gesture start into a row's session. Returns whether a
    /// drag actually began; `false` covers the list gate and a session
    /// that is not idle.
    pub fn drag_started(&self, row_id: RowId, event: &GestureEvent) -> Result<bool, SwipeError> {
        if self.inner.input_locked.get() {
            log::debug!("drag start on {row_id} ignored, another row is mid-session");
            return Ok(false);
        }
        let started = {
            let rows = self.inner.rows.borrow();
            let row = rows
                .get(&row_id)
                .ok_or(SwipeError::UnknownRow { row: row_id })?;
            let rect = row
                .visual
                .bounding_rect()
                .ok_or(SwipeError::VisualUnavailable { row: row_id })?;
            let started = row.item.borrow_mut().start(event, rect);
            started
        };
        if started {
            self.inner.input_locked.set(true);
        }
        Ok(started)
    }

    pub fn drag_moved(&self, row_id: RowId, event: &GestureEvent) -> Result<(), SwipeError> {
        let (update, visual) = {
            let rows = self.inner.rows.borrow();
            let row = rows
                .get(&row_id)
                .ok_or(SwipeError::UnknownRow { row: row_id })?;
            let update = row.item.borrow_mut().drag(event);
            (update, Rc::clone(&row.visual))
        };
        match update {
            DragUpdate::Ignored => Ok(()),
            DragUpdate::Follow { side, from: _, to } => {
                visual.set_cell_offset(side, to);
                Ok(())
            }
            DragUpdate::Abandon(request) => self.resolve(row_id, request),
        }
    }

    pub fn drag_ended(&self, row_id: RowId, event: &GestureEvent) -> Result<(), SwipeError> {
        let request = {
            let rows = self.inner.rows.borrow();
            let row = rows
                .get(&row_id)
                .ok_or(SwipeError::UnknownRow { row: row_id })?;
            let request = row.item.borrow_mut().end(event);
            request
        };
        match request {
            Some(request) => self.resolve(row_id, request),
            None => Ok(()),
        }
    }

    /// Plays the terminal animation for a resolved session and attaches
    /// the completion barrier to it.
    fn resolve(&self, row_id: RowId, request: ResolveRequest) -> Result<(), SwipeError> {
        let visual = {
            let rows = self.inner.rows.borrow();
            let row = rows
                .get(&row_id)
                .ok_or(SwipeError::UnknownRow { row: row_id })?;
            Rc::clone(&row.visual)
        };

        let spec = request
            .length
            .and_then(|length| self.inner.overrides.get(request.side, length))
            .unwrap_or(&DefaultSwipeOut)
            .spec(request.current, request.target, request.max_velocity);
        log::debug!(
            "{row_id} resolving {} over {} ms",
            request.outcome(),
            spec.duration_millis
        );

        let side = request.side;
        let outcome = request.outcome();
        let apply_visual = Rc::clone(&visual);
        let weak = Rc::downgrade(&self.inner);
        Transition::new(self.inner.clock.clone(), request.current, request.target, spec).play(
            move |x| apply_visual.set_cell_offset(side, x),
            move || {
                if let Some(list) = Self::upgrade(&weak) {
                    list.finish(row_id, outcome);
                }
            },
        );
        Ok(())
    }

    /// Completion barrier: re-arms the session, releases the list gate,
    /// notifies observers, then performs the bound action.
    fn finish(&self, row_id: RowId, outcome: Outcome) {
        if let Some(row) = self.inner.rows.borrow().get(&row_id) {
            row.item.borrow_mut().complete();
        }
        self.inner.input_locked.set(false);
        if let Some(callback) = self.inner.on_outcome.borrow().as_ref() {
            callback(row_id, outcome);
        }
        self.dispatch(row_id, outcome);
    }

    fn dispatch(&self, row_id: RowId, outcome: Outcome) {
        match outcome {
            Outcome::Reset => {}
            Outcome::Short(Side::Left) => {
                self.remove_then(row_id, Box::new(|store, email| store.archive(email)));
            }
            Outcome::Long(Side::Left) => {
                self.remove_then(row_id, Box::new(|store, email| store.delete(email)));
            }
            Outcome::Short(Side::Right) => {
                let weak = Rc::downgrade(&self.inner);
                self.inner.snooze.present(Box::new(move |choice| {
                    let Some(list) = Self::upgrade(&weak) else {
                        return;
                    };
                    match choice {
                        Some(until) => list.remove_then(
                            row_id,
                            Box::new(move |store, email| store.snooze(email, until)),
                        ),
                        None => log::debug!("snooze dismissed without a date for {row_id}"),
                    }
                }));
            }
            // Observer-only secondary action; the row stays.
            Outcome::Long(Side::Right) => {}
        }
    }

    /// Collapses the row's height to zero, then mutates the store and
    /// drops the row. The store is never touched while the row's visual
    /// is still animating.
    fn remove_then(&self, row_id: RowId, mutate: Box<dyn FnOnce(&dyn MailStore, &Email)>) {
        let visual = match self.inner.rows.borrow().get(&row_id) {
            Some(row) => Rc::clone(&row.visual),
            None => return,
        };
        let height = visual.measured_height();
        let apply_visual = Rc::clone(&visual);
        let weak = Rc::downgrade(&self.inner);
        Transition::new(
            self.inner.clock.clone(),
            height,
            0.0,
            TransitionSpec::tween(COLLAPSE_DURATION_MS, Easing::EaseInOut),
        )
        .play(
            move |h| apply_visual.set_row_height(h),
            move || {
                let Some(list) = Self::upgrade(&weak) else {
                    return;
                };
                let removed = list.inner.rows.borrow_mut().shift_remove(&row_id);
                if let Some(row) = removed {
                    mutate(list.inner.store.as_ref(), &row.email);
                    log::info!("{row_id} removed ({})", row.email.subject);
                    if let Some(callback) = list.inner.on_rows_changed.borrow().as_ref() {
                        callback();
                    }
                }
            },
        );
    }

    /// Per-row gate on top of the list-wide one.
    pub fn set_row_enabled(&self, row_id: RowId, enabled: bool) -> Result<(), SwipeError> {
        let rows = self.inner.rows.borrow();
        let row = rows
            .get(&row_id)
            .ok_or(SwipeError::UnknownRow { row: row_id })?;
        row.item.borrow_mut().set_enabled(enabled);
        Ok(())
    }

    /// Observer for every terminal outcome, fired after the completion
    /// barrier and before the bound action runs.
    pub fn set_on_outcome(&self, callback: impl Fn(RowId, Outcome) + 'static) {
        *self.inner.on_outcome.borrow_mut() = Some(Box::new(callback));
    }

    /// Observer fired after a removal has mutated the store.
    pub fn set_on_rows_changed(&self, callback: impl Fn() + 'static) {
        *self.inner.on_rows_changed.borrow_mut() = Some(Box::new(callback));
    }

    pub fn is_input_locked(&self) -> bool {
        self.inner.input_locked.get()
    }

    pub fn len(&self) -> usize {
        self.inner.rows.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.rows.borrow().is_empty()
    }

    pub fn contains(&self, row_id: RowId) -> bool {
        self.inner.rows.borrow().contains_key(&row_id)
    }

    pub fn row_ids(&self) -> Vec<RowId> {
        self.inner.rows.borrow().keys().copied().collect()
    }

    /// Snapshot of the visible rows in order, for rendering.
    pub fn emails(&self) -> Vec<Email> {
        self.inner
            .rows
            .borrow()
            .values()
            .map(|row| row.email.clone())
            .collect()
    }

    pub fn email(&self, row_id: RowId) -> Result<Email, SwipeError> {
        self.inner
            .rows
            .borrow()
            .get(&row_id)
            .map(|row| row.email.clone())
            .ok_or(SwipeError::UnknownRow { row: row_id })
    }
}
