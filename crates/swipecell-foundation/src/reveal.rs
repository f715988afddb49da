//! Reveal-cell styling state and configuration.
//!
//! While a drag is live, the exposed cell advertises what releasing
//! would do: greyed out under the incomplete threshold, the short
//! action's label and icon past it, the long action's past the short
//! threshold. This is presentation only; the terminal decision is made
//! by the drag session at release.

use crate::types::{Side, SwipeLength};

/// A release under this fraction of the container width commits
/// nothing.
pub const INCOMPLETE_DRAG_PERCENTAGE: f32 = 0.40;

/// A release at or past this fraction commits the long action instead
/// of the short one.
pub const SHORT_DRAG_PERCENTAGE: f32 = 0.60;

/// Live styling state of the active reveal cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    /// No drag in progress.
    Inactive,
    /// Dragging, but under the incomplete threshold.
    Disabled,
    Short,
    Long,
}

impl RevealState {
    /// Classifies a live drag fraction. Boundary values fall into the
    /// higher bucket.
    pub fn classify(percentage_dragged: f32) -> Self {
        if percentage_dragged < INCOMPLETE_DRAG_PERCENTAGE {
            RevealState::Disabled
        } else if percentage_dragged < SHORT_DRAG_PERCENTAGE {
            RevealState::Short
        } else {
            RevealState::Long
        }
    }
}

/// Label and icon shown inside a reveal cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellAppearance {
    pub label: String,
    pub icon: String,
}

impl CellAppearance {
    pub fn new(label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: icon.into(),
        }
    }
}

/// Per-row appearance of the four (side, length) reveal combinations.
#[derive(Clone, Debug)]
pub struct RevealCellConfig {
    pub left_short: CellAppearance,
    pub left_long: CellAppearance,
    pub right_short: CellAppearance,
    pub right_long: CellAppearance,
}

impl Default for RevealCellConfig {
    fn default() -> Self {
        Self {
            left_short: CellAppearance::new("Archive", "archive"),
            left_long: CellAppearance::new("Delete", "trash"),
            right_short: CellAppearance::new("Snooze", "clock"),
            right_long: CellAppearance::new("More", "ellipsis-horizontal"),
        }
    }
}

impl RevealCellConfig {
    pub fn appearance(&self, side: Side, length: SwipeLength) -> &CellAppearance {
        match (side, length) {
            (Side::Left, SwipeLength::Short) => &self.left_short,
            (Side::Left, SwipeLength::Long) => &self.left_long,
            (Side::Right, SwipeLength::Short) => &self.right_short,
            (Side::Right, SwipeLength::Long) => &self.right_long,
        }
    }
}

/// Whether the cell's label and icon should render at this drag
/// fraction. Hidden under the incomplete threshold so a barely-moved
/// row does not flash an action it will not commit.
pub fn accessories_visible(percentage_dragged: f32) -> bool {
    percentage_dragged >= INCOMPLETE_DRAG_PERCENTAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_buckets() {
        assert_eq!(RevealState::classify(0.0), RevealState::Disabled);
        assert_eq!(RevealState::classify(0.39), RevealState::Disabled);
        assert_eq!(RevealState::classify(0.41), RevealState::Short);
        assert_eq!(RevealState::classify(0.59), RevealState::Short);
        assert_eq!(RevealState::classify(0.61), RevealState::Long);
        assert_eq!(RevealState::classify(2.5), RevealState::Long);
    }

    #[test]
    fn boundaries_resolve_to_the_higher_bucket() {
        assert_eq!(RevealState::classify(0.40), RevealState::Short);
        assert_eq!(RevealState::classify(0.60), RevealState::Long);
    }

    #[test]
    fn accessories_appear_at_the_incomplete_threshold() {
        assert!(!accessories_visible(0.39));
        assert!(accessories_visible(0.40));
        assert!(accessories_visible(0.80));
    }
}
