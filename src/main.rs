use std::io::{self, BufRead, Stdout, Write};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;

use maze_escape::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH, RECOMMENDED_MAX_ENEMIES};
use maze_escape::input::{KeyInput, LineInput};
use maze_escape::render::TerminalRenderer;
use maze_escape::{run, GameConfig, Outcome};

/// Escape a randomly carved maze before the minotaurs find you.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells (odd, at least 3)
    #[arg(long, env = "MAZE_WIDTH", default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Maze height in cells (odd, at least 3)
    #[arg(long, env = "MAZE_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Number of minotaurs; asked for on stdin when omitted
    #[arg(long, env = "MAZE_ENEMIES")]
    enemies: Option<usize>,

    /// Random seed, for replaying a maze
    #[arg(long, env = "MAZE_SEED")]
    seed: Option<u64>,

    /// Read one command per line instead of single key presses
    #[arg(long)]
    line_mode: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let enemy_count = match args.enemies {
        Some(n) => n,
        None => prompt_enemy_count()?,
    };
    let config = GameConfig {
        width: args.width,
        height: args.height,
        enemy_count,
        seed: args.seed,
    };
    config.validate()?;

    let mut stdout = io::stdout();
    enter_terminal(&mut stdout, args.line_mode)?;
    let result = play_in_terminal(&config, args.line_mode);
    leave_terminal(&mut stdout, args.line_mode)?;

    let outcome = result?;
    if let Some(message) = outcome.message() {
        println!("{}", message);
    }
    Ok(())
}

fn play_in_terminal(config: &GameConfig, line_mode: bool) -> Result<Outcome> {
    let renderer = TerminalRenderer::new(io::stdout());
    let outcome = if line_mode {
        let input = LineInput::new(io::stdin().lock(), io::stdout());
        run(config, renderer, input)?
    } else {
        run(config, renderer, KeyInput)?
    };
    Ok(outcome)
}

fn prompt_enemy_count() -> Result<usize> {
    print!("Enter the number of minotaurs (0-{}): ", RECOMMENDED_MAX_ENEMIES);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    line.trim()
        .parse()
        .with_context(|| format!("not a minotaur count: {:?}", line.trim()))
}

fn enter_terminal(stdout: &mut Stdout, line_mode: bool) -> io::Result<()> {
    if !line_mode {
        terminal::enable_raw_mode()?;
        stdout.execute(Hide)?;
    }
    stdout.execute(EnterAlternateScreen)?;
    Ok(())
}

fn leave_terminal(stdout: &mut Stdout, line_mode: bool) -> io::Result<()> {
    stdout.execute(LeaveAlternateScreen)?;
    if !line_mode {
        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
    }
    Ok(())
}
