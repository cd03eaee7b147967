use std::path::PathBuf;

/// Errors that can occur when building or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board size {size} is invalid (must be between {win_length} and {max})")]
    InvalidBoardSize {
        size: usize,
        win_length: usize,
        max: usize,
    },

    #[error("win length {0} is invalid (must be at least 2)")]
    InvalidWinLength(usize),

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors reported by the move-selection engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("board has {actual} cells, expected {expected}")]
    BoardSizeMismatch { expected: usize, actual: usize },

    #[error("no legal move: the board is full")]
    NoLegalMove,

    #[error("cell index {index} is outside the board ({cells} cells)")]
    IndexOutOfRange { index: usize, cells: usize },

    #[error("the engine must play Black or White")]
    NotEngineStone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("random_move_chance must be in [0, 1]".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: random_move_chance must be in [0, 1]"
        );
    }

    #[test]
    fn test_board_size_error_display() {
        let err = ConfigError::InvalidBoardSize {
            size: 3,
            win_length: 5,
            max: 26,
        };
        assert_eq!(
            err.to_string(),
            "board size 3 is invalid (must be between 5 and 26)"
        );
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::BoardSizeMismatch {
            expected: 225,
            actual: 10,
        };
        assert_eq!(err.to_string(), "board has 10 cells, expected 225");
        assert_eq!(
            EngineError::NoLegalMove.to_string(),
            "no legal move: the board is full"
        );
    }

    #[test]
    fn test_engine_error_wraps_config() {
        let err: EngineError = ConfigError::InvalidWinLength(1).into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: win length 1 is invalid (must be at least 2)"
        );
    }
}
