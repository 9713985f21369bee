//! Turn-based maze escape: carve a maze, dodge wandering minotaurs, collect
//! arrows, and reach the exit in the bottom-right corner.

pub mod command;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod grid;
pub mod input;
pub mod maze;
pub mod ports;
pub mod render;

pub use command::Command;
pub use config::GameConfig;
pub use engine::{GameEngine, GameState, Outcome, TurnEvent, TurnReport};
pub use error::{ConfigError, GameError};
pub use grid::{Direction, Grid, Position};
pub use ports::{play, run, InputPort, RenderPort};
