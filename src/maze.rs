//! Randomized depth-first maze carving.
//!
//! Carving starts at the entrance and moves in steps of two cells, opening the
//! wall between each pair, so the open cells always form a single tree. The
//! walk keeps its own frame stack instead of recursing; a frame remembers the
//! shuffled direction order of its cell and how far through it the walk got.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ConfigError;
use crate::grid::{Cell, Direction, Grid, Position};

pub const MIN_SIDE: usize = 3;

struct Frame {
    cell: Position,
    dirs: [Direction; 4],
    next: usize,
}

impl Frame {
    fn new(cell: Position, rng: &mut impl Rng) -> Self {
        let mut dirs = Direction::ALL;
        dirs.shuffle(rng);
        Self { cell, dirs, next: 0 }
    }
}

pub fn generate(width: usize, height: usize, rng: &mut impl Rng) -> Result<Grid, ConfigError> {
    if width < MIN_SIDE || height < MIN_SIDE {
        return Err(ConfigError::TooSmall { width, height });
    }

    let mut grid = Grid::filled(width, height);
    let start = grid.entrance();
    grid.set(start, Cell::Open);

    let mut stack = vec![Frame::new(start, rng)];
    let mut deepest = 1;
    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.dirs.len() {
            stack.pop();
            continue;
        }
        let dir = frame.dirs[frame.next];
        frame.next += 1;
        let from = frame.cell;

        let Some(target) = grid.offset(from, dir, 2) else {
            continue;
        };
        if !grid.is_interior(target) || grid.is_open(target) {
            continue;
        }
        if let Some(between) = grid.step(from, dir) {
            grid.set(between, Cell::Open);
        }
        grid.set(target, Cell::Open);
        stack.push(Frame::new(target, rng));
        deepest = deepest.max(stack.len());
    }

    debug!(
        "carved {}x{} maze, {} open cells, max depth {}",
        width,
        height,
        grid.open_cells().count(),
        deepest
    );
    Ok(grid)
}
