// Couleurs – A colour-naming game for young children
// Copyright (C) 2023  The Couleurs authors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::fmt;
use serde::Deserialize;
use super::catalog::{Language, Level};

pub static DEFAULT_CONFIG: &str = include_str!("../../data/config.toml");

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub speech: SpeechConfig,
    pub sounds: SoundConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Time to leave the feedback on screen before the next round
    pub next_round_delay_ms: i64,
    pub level: Level,
    pub language: Language,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    pub rate: f32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SoundConfig {
    pub success: String,
    pub failure: String,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            next_round_delay_ms: 1500,
            level: Level::Beginner,
            language: Language::Fr,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> SpeechConfig {
        // Slightly slower than normal so small children can follow
        SpeechConfig { rate: 0.9 }
    }
}

impl Default for SoundConfig {
    fn default() -> SoundConfig {
        SoundConfig {
            success: "son-succes.wav".to_string(),
            failure: "son-echec.wav".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(String, std::io::Error),
    Parse(toml::de::Error),
    BadValue(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(filename, e) => write!(f, "{}: {}", filename, e),
            ConfigError::Parse(e) => write!(f, "{}", e),
            ConfigError::BadValue(key) => write!(f, "invalid value for {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_toml(source: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(source)
            .map_err(ConfigError::Parse)?;

        config.validate()?;

        Ok(config)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(filename: &std::path::Path) -> Result<Config, ConfigError> {
        let source = std::fs::read_to_string(filename).map_err(|e| {
            ConfigError::Io(filename.display().to_string(), e)
        })?;

        Config::from_toml(&source)
    }

    /// The configuration built into the binary. Falls back to the
    /// defaults if it somehow doesn’t parse.
    pub fn embedded() -> Config {
        match Config::from_toml(DEFAULT_CONFIG) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("built-in configuration is invalid: {}", e);
                Config::default()
            },
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.game.next_round_delay_ms < 0 {
            return Err(ConfigError::BadValue("game.next_round_delay_ms"));
        }

        // Browsers only accept rates between 0.1 and 10
        if !(0.1..=10.0).contains(&self.speech.rate) {
            return Err(ConfigError::BadValue("speech.rate"));
        }

        Ok(())
    }
}
