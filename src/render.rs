use std::collections::HashSet;
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::engine::{GameState, TurnEvent, TurnReport};
use crate::entity::{EntityKind, OccupancyIndex};
use crate::grid::{Cell as Terrain, Direction, Position};
use crate::ports::RenderPort;

const CELL_W: usize = 2;
const KEY_HELP: &str = "WASD move, IJKL shoot, Q quit";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Glyph {
    Exit,
    Player,
    Enemy,
    Pickup,
    Trail(Direction),
    Wall,
    Open,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

const BLANK: Cell = Cell {
    glyph: Glyph::Open,
    color: Color::Reset,
};

/// Diffing crossterm renderer: only cells that changed since the previous
/// frame are redrawn, unless the viewport moved.
pub struct TerminalRenderer<W: Write> {
    out: W,
    last: Vec<Cell>,
    last_hud: String,
    last_message: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    viewport: Option<(u16, u16)>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: Vec::new(),
            last_hud: String::new(),
            last_message: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 2,
            viewport: None,
        }
    }

    /// Pins the viewport size instead of asking the terminal each frame.
    pub fn with_viewport(mut self, cols: u16, rows: u16) -> Self {
        self.viewport = Some((cols, rows));
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn viewport(&self) -> io::Result<(u16, u16)> {
        match self.viewport {
            Some(size) => Ok(size),
            None => terminal::size(),
        }
    }

    fn render(&mut self, state: &GameState, last: Option<&TurnReport>) -> io::Result<()> {
        let width = state.grid.width();
        let height = state.grid.height();
        // Two rows above the board for HUD and message, two below for the prompt
        // and the newline it echoes.
        let cols = width * CELL_W;
        let rows = height + 4;

        if self.last.len() != width * height {
            self.last = vec![BLANK; width * height];
            self.needs_full = true;
        }

        self.out.queue(MoveTo(0, 0))?;
        let (term_w, term_h) = self.viewport()?;
        let fits = match (u16::try_from(cols), u16::try_from(rows)) {
            (Ok(w), Ok(h)) if w <= term_w && h <= term_h => Some((w, h)),
            _ => None,
        };
        let Some((needed_w, needed_h)) = fits else {
            self.out.queue(Clear(ClearType::All))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                cols, rows, term_w, term_h
            );
            self.out.queue(Print(msg))?;
            self.out.flush()?;
            self.needs_full = true;
            return Ok(());
        };

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2 + 2;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            self.out.queue(Clear(ClearType::All))?;
        }

        let hud = hud_line(state);
        if self.needs_full || hud != self.last_hud {
            self.print_line(self.origin_y - 2, Color::White, &hud)?;
            self.last_hud = hud;
        }
        let message = last.map(message_line).unwrap_or_default();
        if self.needs_full || message != self.last_message {
            self.print_line(self.origin_y - 1, Color::Yellow, &message)?;
            self.last_message = message;
        }

        let occupancy = OccupancyIndex::build(&state.player, &state.enemies, &state.pickups);
        let trail = shot_trail(last);
        for y in 0..height {
            for x in 0..width {
                let pos = Position::new(x, y);
                let cell = cell_for(state, &occupancy, trail.as_ref(), pos);
                let idx = y * width + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(x, y, cell)?;
                }
            }
        }
        self.needs_full = false;

        // Park the cursor under the board so line prompts land there.
        self.out.queue(MoveTo(self.origin_x, self.origin_y + height as u16))?;
        self.out.queue(Clear(ClearType::CurrentLine))?;
        self.out.flush()
    }

    fn print_line(&mut self, row: u16, color: Color, text: &str) -> io::Result<()> {
        self.out.queue(MoveTo(self.origin_x, row))?;
        self.out.queue(SetForegroundColor(color))?;
        self.out.queue(Clear(ClearType::CurrentLine))?;
        self.out.queue(Print(text))?;
        self.out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_cell(&mut self, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = glyph_text(cell.glyph);
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        self.out.queue(MoveTo(x_pos, y_pos))?;
        self.out.queue(SetForegroundColor(cell.color))?;
        self.out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        for _ in w..CELL_W {
            self.out.queue(Print(' '))?;
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }
}

impl<W: Write> RenderPort for TerminalRenderer<W> {
    fn draw(&mut self, state: &GameState, last: Option<&TurnReport>) -> io::Result<()> {
        self.render(state, last)
    }
}

fn hud_line(state: &GameState) -> String {
    format!(
        "Turn: {}  Arrows: {}  Minotaurs: {}  ({})",
        state.turn,
        state.player.ammo,
        state.enemies.len(),
        KEY_HELP
    )
}

fn message_line(report: &TurnReport) -> String {
    let mut parts = Vec::new();
    for event in &report.events {
        match event {
            TurnEvent::EnemyHit { .. } => parts.push("You hit a minotaur!".to_string()),
            TurnEvent::ShotMissed => parts.push("Your arrow hit a wall.".to_string()),
            TurnEvent::NoAmmo => parts.push("You have no arrows.".to_string()),
            TurnEvent::PickupCollected { ammo } => {
                parts.push(format!("You collected an arrow! Total arrows: {}", ammo))
            }
            TurnEvent::Moved { .. } | TurnEvent::Blocked | TurnEvent::Unrecognized => {}
        }
    }
    if let Some(msg) = report.outcome.message() {
        parts.push(msg.to_string());
    }
    parts.join(" ")
}

/// Cells the last arrow flew through; shown for a single frame.
struct Trail {
    direction: Direction,
    cells: HashSet<Position>,
}

fn shot_trail(last: Option<&TurnReport>) -> Option<Trail> {
    let shot = last?.shot.as_ref()?;
    Some(Trail {
        direction: shot.direction,
        cells: shot.path.iter().copied().collect(),
    })
}

fn cell_for(
    state: &GameState,
    occupancy: &OccupancyIndex,
    trail: Option<&Trail>,
    pos: Position,
) -> Cell {
    if pos == state.exit() {
        return Cell {
            glyph: Glyph::Exit,
            color: Color::Cyan,
        };
    }
    let occupant = occupancy.at(pos).map(|kind| match kind {
        EntityKind::Player => Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        },
        EntityKind::Enemy => Cell {
            glyph: Glyph::Enemy,
            color: Color::Red,
        },
        EntityKind::Pickup => Cell {
            glyph: Glyph::Pickup,
            color: Color::Green,
        },
    });
    if let Some(cell) = occupant {
        return cell;
    }
    if let Some(trail) = trail.filter(|trail| trail.cells.contains(&pos)) {
        return Cell {
            glyph: Glyph::Trail(trail.direction),
            color: Color::Magenta,
        };
    }
    match state.grid.get(pos) {
        Some(Terrain::Wall) | None => Cell {
            glyph: Glyph::Wall,
            color: Color::White,
        },
        Some(Terrain::Open) => Cell {
            glyph: Glyph::Open,
            color: Color::DarkGrey,
        },
    }
}

fn glyph_text(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Exit => "🚪",
        Glyph::Player => "🧝",
        Glyph::Enemy => "🐂",
        Glyph::Pickup => "🏹",
        Glyph::Trail(Direction::Up | Direction::Down) => "│ ",
        Glyph::Trail(Direction::Left | Direction::Right) => "──",
        Glyph::Wall => "██",
        Glyph::Open => "· ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Outcome, Shot};
    use crate::entity::Player;
    use crate::grid::Grid;

    fn state() -> GameState {
        let grid = Grid::from_rows(&["#######", "#.....#", "#######"]);
        let mut state = GameState::new(grid, Player::new(Position::new(1, 1)));
        state.spawn_enemy(Position::new(3, 1));
        state.spawn_pickup(Position::new(2, 1));
        state
    }

    fn glyph_at(state: &GameState, last: Option<&TurnReport>, pos: Position) -> Glyph {
        let occupancy = OccupancyIndex::build(&state.player, &state.enemies, &state.pickups);
        let trail = shot_trail(last);
        cell_for(state, &occupancy, trail.as_ref(), pos).glyph
    }

    #[test]
    fn overlay_priority_follows_exit_player_enemy_pickup() {
        let mut state = state();
        assert_eq!(glyph_at(&state, None, Position::new(1, 1)), Glyph::Player);
        assert_eq!(glyph_at(&state, None, Position::new(2, 1)), Glyph::Pickup);
        assert_eq!(glyph_at(&state, None, Position::new(3, 1)), Glyph::Enemy);
        assert_eq!(glyph_at(&state, None, Position::new(4, 1)), Glyph::Open);
        assert_eq!(glyph_at(&state, None, Position::new(0, 0)), Glyph::Wall);

        state.player.position = state.exit();
        state.enemies[0].position = Position::new(2, 1);
        assert_eq!(glyph_at(&state, None, state.exit()), Glyph::Exit);
        assert_eq!(glyph_at(&state, None, Position::new(2, 1)), Glyph::Enemy);
    }

    #[test]
    fn shot_trail_draws_under_entities() {
        let state = state();
        let report = TurnReport {
            turn: 1,
            events: vec![TurnEvent::ShotMissed],
            shot: Some(Shot {
                direction: Direction::Right,
                path: vec![Position::new(2, 1), Position::new(4, 1)],
                hit: None,
            }),
            outcome: Outcome::Ongoing,
        };
        assert_eq!(
            glyph_at(&state, Some(&report), Position::new(4, 1)),
            Glyph::Trail(Direction::Right)
        );
        assert_eq!(glyph_at(&state, Some(&report), Position::new(2, 1)), Glyph::Pickup);
    }

    #[test]
    fn messages_describe_events_and_outcome() {
        let report = TurnReport {
            turn: 4,
            events: vec![TurnEvent::PickupCollected { ammo: 2 }],
            shot: None,
            outcome: Outcome::Caught,
        };
        assert_eq!(
            message_line(&report),
            "You collected an arrow! Total arrows: 2 Game Over! You were caught by a minotaur."
        );
    }

    #[test]
    fn second_frame_only_redraws_changes() {
        let mut state = state();
        let mut renderer = TerminalRenderer::new(Vec::new()).with_viewport(80, 24);
        renderer.draw(&state, None).unwrap();
        let first = renderer.out.len();
        let text = String::from_utf8_lossy(&renderer.out).into_owned();
        assert!(text.contains("Turn: 0  Arrows: 0  Minotaurs: 1"));
        assert!(text.contains("🚪"));

        renderer.out.clear();
        renderer.draw(&state, None).unwrap();
        let unchanged = renderer.out.len();
        assert!(unchanged < first);

        state.player.position = Position::new(4, 1);
        renderer.out.clear();
        renderer.draw(&state, None).unwrap();
        assert!(renderer.out.len() > unchanged);
    }

    #[test]
    fn small_viewport_shows_a_warning() {
        let mut renderer = TerminalRenderer::new(Vec::new()).with_viewport(5, 2);
        renderer.draw(&state(), None).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.contains("Terminal too small"));
    }

    #[test]
    fn board_needs_spare_rows_under_the_prompt() {
        // 7x3 board: 14 columns, 3 rows plus two above and two below.
        let mut renderer = TerminalRenderer::new(Vec::new()).with_viewport(14, 6);
        renderer.draw(&state(), None).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.contains("Need at least 14x7"));

        let mut renderer = TerminalRenderer::new(Vec::new()).with_viewport(14, 7);
        renderer.draw(&state(), None).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(!text.contains("Terminal too small"));
    }

    #[test]
    fn oversized_board_does_not_wrap_the_size_check() {
        let grid = Grid::filled(40_000, 3);
        let state = GameState::new(grid, Player::new(Position::new(1, 1)));
        let mut renderer = TerminalRenderer::new(Vec::new()).with_viewport(u16::MAX, u16::MAX);
        renderer.draw(&state, None).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.contains("Need at least 80000x7"));
    }
}
