//! Core domain types for tic-tac-toe.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::position::Position;
use crate::config::ConfigError;

/// A player, as supplied by the player configuration.
///
/// The whole player record is embedded in every stored move, so it is
/// serialized with the camelCase field names of the stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Player id (1 or 2).
    id: u32,
    /// Display name.
    name: String,
    /// Icon class used by renderers.
    icon_class: String,
    /// Color class used by renderers.
    color_class: String,
}

impl Player {
    /// Creates a new player.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        icon_class: impl Into<String>,
        color_class: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            icon_class: icon_class.into(),
            color_class: color_class.into(),
        }
    }

    /// Returns true if `other` is the same player (by id).
    pub fn is(&self, other: &Player) -> bool {
        self.id == other.id
    }
}

/// The fixed, ordered list of players taking turns.
///
/// Turn order is never stored: the player to move is
/// `players[moves_played % players.len()]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Number of players in a game.
    pub const SIZE: usize = 2;

    /// Player ids a roster may use.
    pub const IDS: [u32; 2] = [1, 2];

    /// Creates a roster from the configured players.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] unless there are exactly two players with
    /// distinct ids drawn from [`Roster::IDS`].
    #[instrument(skip(players), fields(count = players.len()))]
    pub fn new(players: Vec<Player>) -> Result<Self, ConfigError> {
        if players.len() != Self::SIZE {
            return Err(ConfigError::new(format!(
                "Expected {} players, got {}",
                Self::SIZE,
                players.len()
            )));
        }

        for (i, player) in players.iter().enumerate() {
            if !Self::IDS.contains(&player.id) {
                return Err(ConfigError::new(format!(
                    "Player id {} is not one of {:?}",
                    player.id,
                    Self::IDS
                )));
            }
            if players[..i].iter().any(|earlier| earlier.is(player)) {
                return Err(ConfigError::new(format!(
                    "Duplicate player id {}",
                    player.id
                )));
            }
        }

        Ok(Self { players })
    }

    /// Returns the players in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Returns the player whose turn it is after `moves_played` moves.
    pub fn for_turn(&self, moves_played: usize) -> &Player {
        &self.players[moves_played % self.players.len()]
    }

    /// Looks up a player by id.
    pub fn by_id(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            players: vec![
                Player::new(1, "Player 1", "fa-x", "turquoise"),
                Player::new(2, "Player 2", "fa-o", "yellow"),
            ],
        }
    }
}

/// One square claimed by one player during the current game.
///
/// Created once per turn and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    /// The claimed square, stored as its id (1-9).
    square_id: Position,
    /// The player who claimed it.
    player: Player,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player.name, self.square_id.label())
    }
}
