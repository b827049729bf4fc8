//! Game configuration: storage key and player list.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::games::tictactoe::{Player, Roster};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "live-t3-storage-key";

/// One configured player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Player id (1 or 2).
    id: u32,
    /// Display name.
    name: String,
    /// Icon class used by renderers.
    icon_class: String,
    /// Color class used by renderers.
    color_class: String,
}

impl From<&Player> for PlayerConfig {
    fn from(player: &Player) -> Self {
        Self {
            id: *player.id(),
            name: player.name().clone(),
            icon_class: player.icon_class().clone(),
            color_class: player.color_class().clone(),
        }
    }
}

impl From<PlayerConfig> for Player {
    fn from(cfg: PlayerConfig) -> Self {
        Player::new(cfg.id, cfg.name, cfg.icon_class, cfg.color_class)
    }
}

/// Configuration for a game store.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Key the game document is stored under.
    #[serde(default = "default_storage_key")]
    storage_key: String,

    /// Players in turn order.
    #[serde(default = "default_players")]
    players: Vec<PlayerConfig>,
}

#[instrument]
fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

#[instrument]
fn default_players() -> Vec<PlayerConfig> {
    Roster::default()
        .players()
        .iter()
        .map(PlayerConfig::from)
        .collect()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            players: default_players(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(storage_key = %config.storage_key, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Builds the validated player roster.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] unless exactly two players with distinct ids are configured.
    #[instrument(skip(self))]
    pub fn roster(&self) -> Result<Roster, ConfigError> {
        Roster::new(self.players.iter().cloned().map(Player::from).collect())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config.storage_key(), DEFAULT_STORAGE_KEY);
        assert_eq!(config.roster().unwrap(), Roster::default());
    }

    #[test]
    fn test_custom_players() {
        let config = GameConfig::from_toml(
            r#"
            storage_key = "office-game"

            [[players]]
            id = 1
            name = "Ada"
            icon_class = "fa-x"
            color_class = "red"

            [[players]]
            id = 2
            name = "Grace"
            icon_class = "fa-o"
            color_class = "blue"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage_key(), "office-game");
        let roster = config.roster().unwrap();
        assert_eq!(roster.players()[1].name(), "Grace");
        assert_eq!(roster.players()[0].color_class(), "red");
    }

    #[test]
    fn test_single_player_rejected() {
        let config = GameConfig::from_toml(
            r#"
            [[players]]
            id = 1
            name = "Solo"
            icon_class = "fa-x"
            color_class = "red"
            "#,
        )
        .unwrap();
        assert!(config.roster().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(GameConfig::from_toml("storage_key = [").is_err());
    }
}
