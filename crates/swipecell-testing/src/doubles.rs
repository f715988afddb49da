//! Recording implementations of the host-side traits.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swipecell_core::Rect;
use swipecell_foundation::{Email, MailStore, RowVisual, Side, SnoozePresenter, SnoozeUntil};

/// Row visual that records everything the orchestrator does to it.
pub struct RecordingVisual {
    rect: Cell<Option<Rect>>,
    cell_offsets: RefCell<Vec<(Side, f32)>>,
    height: Cell<f32>,
}

impl RecordingVisual {
    pub fn new(rect: Rect) -> Rc<Self> {
        Rc::new(Self {
            rect: Cell::new(Some(rect)),
            cell_offsets: RefCell::new(Vec::new()),
            height: Cell::new(rect.height),
        })
    }

    /// Simulates the row leaving the widget tree.
    pub fn unmount(&self) {
        self.rect.set(None);
    }

    /// Every `set_cell_offset` call in order.
    pub fn cell_offsets(&self) -> Vec<(Side, f32)> {
        self.cell_offsets.borrow().clone()
    }

    pub fn last_cell_offset(&self) -> Option<(Side, f32)> {
        self.cell_offsets.borrow().last().copied()
    }

    pub fn height(&self) -> f32 {
        self.height.get()
    }
}

impl RowVisual for RecordingVisual {
    fn bounding_rect(&self) -> Option<Rect> {
        self.rect.get()
    }

    fn set_cell_offset(&self, side: Side, x: f32) {
        self.cell_offsets.borrow_mut().push((side, x));
    }

    fn set_row_height(&self, height: f32) {
        self.height.set(height);
    }

    fn measured_height(&self) -> f32 {
        self.height.get()
    }
}

/// One mutation the store received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreAction {
    Archive(u64),
    Delete(u64),
    Snooze(u64, SnoozeUntil),
}

/// Mail store that records mutations instead of performing them.
#[derive(Default)]
pub struct RecordingStore {
    actions: RefCell<Vec<StoreAction>>,
}

impl RecordingStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn actions(&self) -> Vec<StoreAction> {
        self.actions.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.borrow().is_empty()
    }
}

impl MailStore for RecordingStore {
    fn archive(&self, email: &Email) {
        self.actions.borrow_mut().push(StoreAction::Archive(email.id));
    }

    fn delete(&self, email: &Email) {
        self.actions.borrow_mut().push(StoreAction::Delete(email.id));
    }

    fn snooze(&self, email: &Email, until: SnoozeUntil) {
        self.actions
            .borrow_mut()
            .push(StoreAction::Snooze(email.id, until));
    }
}

/// Snooze dialog that dismisses itself immediately with a preset
/// choice, counting how many times it was shown.
pub struct PresetSnooze {
    choice: Option<SnoozeUntil>,
    presentations: Cell<u32>,
}

impl PresetSnooze {
    pub fn choosing(until: SnoozeUntil) -> Rc<Self> {
        Rc::new(Self {
            choice: Some(until),
            presentations: Cell::new(0),
        })
    }

    pub fn dismissing() -> Rc<Self> {
        Rc::new(Self {
            choice: None,
            presentations: Cell::new(0),
        })
    }

    pub fn presentations(&self) -> u32 {
        self.presentations.get()
    }
}

impl SnoozePresenter for PresetSnooze {
    fn present(&self, on_dismiss: Box<dyn FnOnce(Option<SnoozeUntil>)>) {
        self.presentations.set(self.presentations.get() + 1);
        on_dismiss(self.choice);
    }
}
