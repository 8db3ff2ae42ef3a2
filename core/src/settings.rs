use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Config(#[from] GameError),
}

/// Board size and mine count for a custom difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSettings {
    pub width: u32,
    pub height: u32,
    pub mines: u32,
}

/// Session settings, usually read from TOML:
///
/// ```toml
/// preset = "expert"
/// seed = 42
///
/// [board]
/// width = 12
/// height = 10
/// mines = 20
/// ```
///
/// A custom `[board]` wins over `preset`; without either the intermediate preset is used.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub preset: Option<Preset>,
    pub board: Option<BoardSettings>,
    pub seed: Option<u64>,
}

impl TryFrom<BoardSettings> for GameConfig {
    type Error = GameError;

    fn try_from(board: BoardSettings) -> Result<Self> {
        Self::new(board.width, board.height, board.mines)
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> core::result::Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn game_config(&self) -> Result<GameConfig> {
        match (self.board, self.preset) {
            (Some(board), _) => GameConfig::try_from(board),
            (None, Some(preset)) => Ok(preset.config()),
            (None, None) => Ok(GameConfig::default()),
        }
    }
}

impl GameSession {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let config = settings.game_config()?;
        Ok(match settings.seed {
            Some(seed) => Self::with_seed(config, seed),
            None => Self::new(config),
        })
    }

    /// Parses settings and builds the session they describe.
    pub fn from_toml_str(text: &str) -> core::result::Result<Self, SettingsError> {
        Ok(Self::from_settings(&Settings::from_toml_str(text)?)?)
    }
}
