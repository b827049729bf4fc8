//! Board positions and square sets for tic-tac-toe.
//!
//! Squares are identified by the numbers 1 through 9 in row-major order,
//! which is also how they are written to the stored document.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// A square id outside of 1..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Invalid square id {_0}: expected 1-9")]
pub struct InvalidSquare(#[error(not(source))] pub u8);

/// A position on the tic-tac-toe board.
///
/// Serialized as its square id (1-9).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Position {
    /// Top-left (square 1)
    TopLeft,
    /// Top-center (square 2)
    TopCenter,
    /// Top-right (square 3)
    TopRight,
    /// Middle-left (square 4)
    MiddleLeft,
    /// Center (square 5)
    Center,
    /// Middle-right (square 6)
    MiddleRight,
    /// Bottom-left (square 7)
    BottomLeft,
    /// Bottom-center (square 8)
    BottomCenter,
    /// Bottom-right (square 9)
    BottomRight,
}

impl Position {
    /// All 9 positions in square id order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Get label for this position (for display).
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Returns the square id (1-9).
    pub const fn square_id(self) -> u8 {
        self as u8 + 1
    }

    /// Returns the zero-based board index (0-8).
    pub const fn to_index(self) -> usize {
        self as usize
    }

    /// Creates a position from a square id (1-9).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSquare`] if the id is outside 1-9.
    pub fn from_square_id(id: u8) -> Result<Self, InvalidSquare> {
        id.checked_sub(1)
            .and_then(|index| Self::ALL.get(index as usize).copied())
            .ok_or(InvalidSquare(id))
    }

    /// Parse from a square id (`"5"`) or a label (`"center"`).
    #[instrument]
    pub fn parse(s: &str) -> Option<Position> {
        if let Ok(id) = s.trim().parse::<u8>() {
            return Self::from_square_id(id).ok();
        }

        let s_lower = s.trim().to_lowercase();
        Position::iter().find(|pos| pos.label().to_lowercase() == s_lower)
    }
}

impl TryFrom<u8> for Position {
    type Error = InvalidSquare;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_square_id(id)
    }
}

impl From<Position> for u8 {
    fn from(pos: Position) -> Self {
        pos.square_id()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.square_id())
    }
}

/// A set of board positions, stored as a 9-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u16);

impl SquareSet {
    /// The empty set.
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Builds a set from a fixed list of positions.
    pub const fn of(positions: &[Position]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < positions.len() {
            bits |= 1 << positions[i] as u16;
            i += 1;
        }
        Self(bits)
    }

    /// Adds a position. Returns `false` if it was already present.
    pub fn insert(&mut self, pos: Position) -> bool {
        let was_present = self.contains(pos);
        self.0 |= 1 << pos as u16;
        !was_present
    }

    /// Checks whether the position is in the set.
    pub fn contains(self, pos: Position) -> bool {
        self.0 & (1 << pos as u16) != 0
    }

    /// Checks whether every position of `other` is also in `self`.
    pub fn is_superset(self, other: SquareSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Number of positions in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if no position is in the set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the positions in square id order.
    pub fn iter(self) -> impl Iterator<Item = Position> {
        Position::ALL.into_iter().filter(move |pos| self.contains(*pos))
    }
}

impl FromIterator<Position> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}
