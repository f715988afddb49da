//! Swipe-to-reveal interaction for list rows.
//!
//! Each row runs a [`SwipeItem`] drag session: the pan gesture feeds it
//! moves, it classifies how far the finger travelled, and on release it
//! asks for a terminal animation. The [`SwipeList`] owns the rows,
//! plays those animations, turns committed swipes into mail actions,
//! and collapses removed rows before mutating the underlying list.

mod reveal;
mod swipe_item;
mod swipe_list;
mod traits;
mod types;

pub use reveal::{
    CellAppearance, RevealCellConfig, RevealState, INCOMPLETE_DRAG_PERCENTAGE,
    SHORT_DRAG_PERCENTAGE,
};
pub use swipe_item::{DragPhase, DragUpdate, ResolveRequest, SwipeItem};
pub use swipe_list::{SwipeList, TransitionOverrides, COLLAPSE_DURATION_MS};
pub use traits::{Email, EmailId, MailStore, RowVisual, SnoozePresenter, SnoozeUntil};
pub use types::{Outcome, Side, SwipeDirection, SwipeLength};
