use std::collections::VecDeque;
use std::io;

use maze_escape::entity::Player;
use maze_escape::render::TerminalRenderer;
use maze_escape::{
    play, run, ConfigError, GameConfig, GameEngine, GameError, GameState, Grid, InputPort,
    Outcome, Position, RenderPort, TurnReport,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

struct Script(VecDeque<&'static str>);

impl Script {
    fn new(tokens: &[&'static str]) -> Self {
        Self(tokens.iter().copied().collect())
    }
}

impl InputPort for Script {
    fn read_command(&mut self) -> io::Result<String> {
        self.0
            .pop_front()
            .map(str::to_string)
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

#[derive(Default)]
struct Recorder {
    frames: Vec<(Position, Option<TurnReport>)>,
}

impl RenderPort for Recorder {
    fn draw(&mut self, state: &GameState, last: Option<&TurnReport>) -> io::Result<()> {
        self.frames.push((state.player.position, last.cloned()));
        Ok(())
    }
}

fn corridor_game() -> GameEngine<ChaCha8Rng> {
    let grid = Grid::from_rows(&["#######", "#.....#", "#######"]);
    let mut state = GameState::new(grid, Player::new(Position::new(1, 1)));
    state.spawn_pickup(Position::new(3, 1));
    GameEngine::from_state(state, ChaCha8Rng::seed_from_u64(8))
}

#[test]
fn walking_the_corridor_escapes() {
    let mut game = corridor_game();
    let mut recorder = Recorder::default();
    let outcome = play(&mut game, &mut recorder, Script::new(&["d", "x", "d", "d", "d"])).unwrap();

    assert_eq!(outcome, Outcome::Escaped);
    assert_eq!(game.state().turn, 5);
    assert_eq!(game.state().player.ammo, 1);
    // One frame per turn plus the closing frame.
    assert_eq!(recorder.frames.len(), 6);
    assert!(recorder.frames[0].1.is_none());
    let (final_pos, final_report) = recorder.frames.last().unwrap();
    assert_eq!(*final_pos, Position::new(5, 1));
    assert_eq!(final_report.as_ref().map(|r| r.outcome), Some(Outcome::Escaped));
}

#[test]
fn quit_ends_the_loop_without_reading_more() {
    let mut game = corridor_game();
    let mut recorder = Recorder::default();
    let outcome = play(&mut game, &mut recorder, Script::new(&["q"])).unwrap();
    assert_eq!(outcome, Outcome::Quit);
    assert_eq!(recorder.frames.len(), 2);
    assert_eq!(game.state().player.position, Position::new(1, 1));
}

#[test]
fn closed_input_surfaces_as_error() {
    let mut game = corridor_game();
    let err = play(&mut game, Recorder::default(), Script::new(&["d"])).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    assert_eq!(game.outcome(), Outcome::Ongoing);
}

#[test]
fn run_rejects_even_dimensions_before_playing() {
    let config = GameConfig {
        width: 30,
        height: 10,
        enemy_count: 1,
        seed: Some(1),
    };
    let mut recorder = Recorder::default();
    let err = run(&config, &mut recorder, Script::new(&[])).unwrap_err();
    assert!(matches!(
        err,
        GameError::Config(ConfigError::EvenDimension { width: 30, height: 10 })
    ));
    assert!(recorder.frames.is_empty());
}

#[test]
fn seeded_runs_render_identically() {
    let config = GameConfig {
        width: 15,
        height: 9,
        enemy_count: 2,
        seed: Some(21),
    };
    let render = || {
        let mut renderer = TerminalRenderer::new(Vec::new()).with_viewport(60, 20);
        let outcome = run(&config, &mut renderer, Script::new(&["s", "d", "q"])).unwrap();
        (outcome, renderer.into_inner())
    };
    let (first_outcome, first) = render();
    let (second_outcome, second) = render();
    assert_eq!(first, second);
    assert!(first_outcome.is_terminal());
    assert_eq!(first_outcome, second_outcome);
}

#[test]
fn run_plays_the_configured_seed() {
    let config = GameConfig {
        width: 15,
        height: 9,
        enemy_count: 3,
        seed: Some(1),
    };
    let script = ["d", "s", "i", "q"];

    let mut via_run = TerminalRenderer::new(Vec::new()).with_viewport(60, 20);
    run(&config, &mut via_run, Script::new(&script)).unwrap();

    let mut engine = GameEngine::new(&config, ChaCha8Rng::seed_from_u64(1)).unwrap();
    let mut direct = TerminalRenderer::new(Vec::new()).with_viewport(60, 20);
    play(&mut engine, &mut direct, Script::new(&script)).unwrap();

    assert_eq!(via_run.into_inner(), direct.into_inner());
}
