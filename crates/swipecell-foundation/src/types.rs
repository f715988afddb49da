//! Shared vocabulary of the swipe interaction.

/// Which reveal cell a drag exposes. A left-to-right drag pulls the
/// left cell across the row; a right-to-left drag pulls the right one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Left => "left",
            Side::Right => "right",
        })
    }
}

/// Committed swipe magnitude past the incomplete threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeLength {
    Short,
    Long,
}

/// Horizontal travel direction of one drag session, fixed at drag
/// start from the first recognized movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    LeftToRight,
    RightToLeft,
}

impl SwipeDirection {
    pub fn side(self) -> Side {
        match self {
            SwipeDirection::LeftToRight => Side::Left,
            SwipeDirection::RightToLeft => Side::Right,
        }
    }
}

/// Terminal result of one drag session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The drag ended under the incomplete threshold or was abandoned;
    /// the row snapped back and nothing happened.
    Reset,
    Short(Side),
    Long(Side),
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Reset => f.write_str("reset"),
            Outcome::Short(side) => write!(f, "{side}-short"),
            Outcome::Long(side) => write!(f, "{side}-long"),
        }
    }
}
