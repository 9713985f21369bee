//! Seams between the engine and the terminal.

use std::io;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::command::Command;
use crate::config::GameConfig;
use crate::engine::{GameEngine, GameState, Outcome, TurnReport};
use crate::error::GameError;

pub trait RenderPort {
    /// Draws the whole board. `last` is the report of the turn just resolved,
    /// `None` before the first turn.
    fn draw(&mut self, state: &GameState, last: Option<&TurnReport>) -> io::Result<()>;
}

pub trait InputPort {
    /// Blocks until the operator produces one token. No validation happens here.
    fn read_command(&mut self) -> io::Result<String>;
}

impl<T: RenderPort + ?Sized> RenderPort for &mut T {
    fn draw(&mut self, state: &GameState, last: Option<&TurnReport>) -> io::Result<()> {
        (**self).draw(state, last)
    }
}

impl<T: InputPort + ?Sized> InputPort for &mut T {
    fn read_command(&mut self) -> io::Result<String> {
        (**self).read_command()
    }
}

/// Runs render, read, resolve until the game ends, then draws the final board.
pub fn play<R, D, I>(engine: &mut GameEngine<R>, mut render: D, mut input: I) -> io::Result<Outcome>
where
    R: Rng,
    D: RenderPort,
    I: InputPort,
{
    let mut last: Option<TurnReport> = None;
    while !engine.outcome().is_terminal() {
        render.draw(engine.state(), last.as_ref())?;
        let token = input.read_command()?;
        let command = Command::parse(&token);
        debug!("token {:?} parsed as {:?}", token, command);
        last = Some(engine.resolve_turn(command));
    }
    render.draw(engine.state(), last.as_ref())?;
    Ok(engine.outcome())
}

/// Builds a game from `config` and plays it to the end. Without a configured
/// seed one is drawn and logged so the maze can be replayed.
pub fn run<D, I>(config: &GameConfig, render: D, input: I) -> Result<Outcome, GameError>
where
    D: RenderPort,
    I: InputPort,
{
    let seed = config.seed.unwrap_or_else(rand::random);
    info!("starting {}x{} maze with seed {}", config.width, config.height, seed);
    let mut engine = GameEngine::new(config, ChaCha8Rng::seed_from_u64(seed))?;
    let outcome = play(&mut engine, render, input)?;
    info!("game over after {} turns: {:?}", engine.state().turn, outcome);
    Ok(outcome)
}
