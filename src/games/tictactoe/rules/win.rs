//! Win detection logic for tic-tac-toe.

use super::super::{Player, Position, SquareSet};
use tracing::instrument;

/// One of the 8 fixed three-square lines that wins the game.
///
/// Variants are declared in evaluation order: rows, columns, then diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum WinPattern {
    /// Squares 1, 2, 3.
    TopRow,
    /// Squares 4, 5, 6.
    MiddleRow,
    /// Squares 7, 8, 9.
    BottomRow,
    /// Squares 1, 4, 7.
    LeftColumn,
    /// Squares 2, 5, 8.
    CenterColumn,
    /// Squares 3, 6, 9.
    RightColumn,
    /// Squares 1, 5, 9.
    Diagonal,
    /// Squares 3, 5, 7.
    AntiDiagonal,
}

impl WinPattern {
    /// All patterns in evaluation order.
    pub const ALL: [WinPattern; 8] = [
        WinPattern::TopRow,
        WinPattern::MiddleRow,
        WinPattern::BottomRow,
        WinPattern::LeftColumn,
        WinPattern::CenterColumn,
        WinPattern::RightColumn,
        WinPattern::Diagonal,
        WinPattern::AntiDiagonal,
    ];

    /// The three positions making up this line.
    pub const fn positions(self) -> [Position; 3] {
        use Position::*;
        match self {
            WinPattern::TopRow => [TopLeft, TopCenter, TopRight],
            WinPattern::MiddleRow => [MiddleLeft, Center, MiddleRight],
            WinPattern::BottomRow => [BottomLeft, BottomCenter, BottomRight],
            WinPattern::LeftColumn => [TopLeft, MiddleLeft, BottomLeft],
            WinPattern::CenterColumn => [TopCenter, Center, BottomCenter],
            WinPattern::RightColumn => [TopRight, MiddleRight, BottomRight],
            WinPattern::Diagonal => [TopLeft, Center, BottomRight],
            WinPattern::AntiDiagonal => [TopRight, Center, BottomLeft],
        }
    }

    /// The line as a square set.
    pub const fn squares(self) -> SquareSet {
        SquareSet::of(&self.positions())
    }
}

/// The squares one player occupies in the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy<'a> {
    /// The player.
    pub player: &'a Player,
    /// Squares claimed by the player.
    pub squares: SquareSet,
}

impl<'a> Occupancy<'a> {
    /// Creates an occupancy record.
    pub fn new(player: &'a Player, squares: SquareSet) -> Self {
        Self { player, squares }
    }
}

/// Finds the first player, in the given order, whose squares cover a winning
/// pattern, together with the first such pattern.
///
/// Players are checked in slice order and patterns in [`WinPattern::ALL`]
/// order, so the result is deterministic even if two players both hold a line.
#[instrument(skip(occupancy))]
pub fn winning_pattern<'a>(occupancy: &[Occupancy<'a>]) -> Option<(&'a Player, WinPattern)> {
    occupancy.iter().find_map(|occ| {
        WinPattern::ALL
            .into_iter()
            .find(|pattern| occ.squares.is_superset(pattern.squares()))
            .map(|pattern| (occ.player, pattern))
    })
}

/// Returns the winning player, if any.
///
/// A player wins when their occupied squares are a superset of any
/// [`WinPattern`]. The first such player in `occupancy` order wins ties.
#[instrument(skip(occupancy))]
pub fn check_winner<'a>(occupancy: &[Occupancy<'a>]) -> Option<&'a Player> {
    winning_pattern(occupancy).map(|(player, _)| player)
}
