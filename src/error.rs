use std::io;

use thiserror::Error;

/// Rejected game setup. Raised before the first turn is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("maze must be at least 3x3, got {width}x{height}")]
    TooSmall { width: usize, height: usize },
    #[error("maze dimensions must be odd so the exit is carved, got {width}x{height}")]
    EvenDimension { width: usize, height: usize },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}
