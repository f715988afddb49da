//! Seams to the surrounding application.
//!
//! The swipe core never touches a widget tree or a mail backend
//! directly; it talks to them through these traits. Hosts implement
//! them over whatever rendering and storage they have, tests implement
//! them with recording doubles.

use swipecell_core::Rect;

use crate::types::Side;

pub type EmailId = u64;

/// One message as the list renders it. Opaque to the interaction core;
/// only the orchestrator's action bindings hand it to the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Email {
    pub id: EmailId,
    pub sender: String,
    pub subject: String,
    pub preview: String,
    pub favorited: bool,
}

/// Moment a snoozed message should resurface, in ms since the epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnoozeUntil(pub i64);

/// Handle onto one row's rendered representation.
///
/// Implementations must stay valid from drag start until the completion
/// of any animation played on the row; the orchestrator only mutates
/// the row set after that barrier.
pub trait RowVisual {
    /// Current layout box of the row, or `None` when the row is not
    /// mounted. A drag cannot start on an unmounted row.
    fn bounding_rect(&self) -> Option<Rect>;

    /// Positions one reveal cell at the given x-translation, applied
    /// immediately without animation.
    fn set_cell_offset(&self, side: Side, x: f32);

    /// Sets the rendered row height, used by the removal collapse.
    fn set_row_height(&self, height: f32);

    /// Height the collapse starts from.
    fn measured_height(&self) -> f32;
}

/// Mail mutations bound to committed swipes. Fire-and-forget: the exit
/// animation has already played, so failures are the store's problem
/// to surface.
pub trait MailStore {
    fn archive(&self, email: &Email);
    fn delete(&self, email: &Email);
    fn snooze(&self, email: &Email, until: SnoozeUntil);
}

/// Modal date-picker collaborator for the snooze binding.
///
/// `present` shows the dialog and later calls `on_dismiss` exactly
/// once: `Some(until)` if the user picked a date, `None` if they backed
/// out.
pub trait SnoozePresenter {
    fn present(&self, on_dismiss: Box<dyn FnOnce(Option<SnoozeUntil>)>);
}
