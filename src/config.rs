//! Engine configuration
//!
//! Board dimensions, difficulty, Easy-mode randomness, think delay and the
//! score table, read from a TOML file. Missing keys take their defaults.

use std::path::Path;

use crate::board::{DEFAULT_BOARD_SIZE, DEFAULT_WIN_LENGTH, MAX_BOARD_SIZE};
use crate::error::ConfigError;
use crate::eval::ScoreTable;
use crate::policy::Difficulty;

/// Engine configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub board_size: usize,
    pub win_length: usize,
    pub difficulty: Difficulty,
    /// Probability that Easy plays a random nearby move instead of searching
    pub random_move_chance: f64,
    /// Minimum time the background search takes before reporting a move
    pub think_delay_ms: u64,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    pub scores: ScoreTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            board_size: DEFAULT_BOARD_SIZE,
            win_length: DEFAULT_WIN_LENGTH,
            difficulty: Difficulty::default(),
            random_move_chance: 0.3,
            think_delay_ms: 500,
            seed: None,
            scores: ScoreTable::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dimensions(self.board_size, self.win_length)?;
        if !(0.0..=1.0).contains(&self.random_move_chance) {
            return Err(ConfigError::Validation(
                "random_move_chance must be in [0, 1]".into(),
            ));
        }
        self.scores.validate()
    }
}

/// Check a board size and win length pair.
pub fn validate_dimensions(board_size: usize, win_length: usize) -> Result<(), ConfigError> {
    if win_length < 2 {
        return Err(ConfigError::InvalidWinLength(win_length));
    }
    if board_size < win_length || board_size > MAX_BOARD_SIZE {
        return Err(ConfigError::InvalidBoardSize {
            size: board_size,
            win_length,
            max: MAX_BOARD_SIZE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
difficulty = "hard"

[scores]
open_three = 12000
"#;
        let config: EngineConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.scores.open_three, 12_000);
        // Other fields should be defaults
        assert_eq!(config.board_size, 15);
        assert_eq!(config.scores.open_four, 100_000);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig {
            board_size: 19,
            difficulty: Difficulty::Easy,
            seed: Some(99),
            ..EngineConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validation_rejects_bad_dimensions() {
        let mut config = EngineConfig::default();
        config.board_size = 4;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBoardSize { size: 4, .. })
        ));

        config.board_size = 27;
        assert!(config.validate().is_err());

        config.board_size = 15;
        config.win_length = 1;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWinLength(1))));
    }

    #[test]
    fn test_validation_rejects_invalid_chance() {
        let mut config = EngineConfig::default();
        config.random_move_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_checks_score_order() {
        let mut config = EngineConfig::default();
        config.scores.blocked_two = 5_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = EngineConfig::load_or_default(Path::new("nonexistent_gomoku.toml")).unwrap();
        assert_eq!(config.win_length, 5);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gomoku.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "board_size = 9\nwin_length = 4\nthink_delay_ms = 0").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.board_size, 9);
        assert_eq!(config.win_length, 4);
        assert_eq!(config.think_delay_ms, 0);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "random_move_chance = -0.5\n").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "board_size = [").unwrap();
        assert!(matches!(EngineConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }
}
