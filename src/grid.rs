//! Fixed-size wall/open cell store shared by generation, the engine and rendering.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell walled in.
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Wall; width * height],
        }
    }

    /// Builds a grid from text rows: `#` is a wall, anything else is open.
    ///
    /// Rows shorter than the longest one are padded with walls.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::filled(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != '#' {
                    grid.set(Position::new(x, y), Cell::Open);
                }
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// True for cells off the border ring.
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.y >= 1 && pos.x + 1 < self.width && pos.y + 1 < self.height
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[pos.y * self.width + pos.x])
        } else {
            None
        }
    }

    pub fn is_open(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Open)
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if self.in_bounds(pos) {
            self.cells[pos.y * self.width + pos.x] = cell;
        }
    }

    /// Offsets `pos` by `distance` cells along `dir`, or `None` when that leaves the grid.
    pub fn offset(&self, pos: Position, dir: Direction, distance: usize) -> Option<Position> {
        let (dx, dy) = dir.delta();
        let nx = pos.x as isize + dx * distance as isize;
        let ny = pos.y as isize + dy * distance as isize;
        if nx < 0 || ny < 0 {
            return None;
        }
        let next = Position::new(nx as usize, ny as usize);
        self.in_bounds(next).then_some(next)
    }

    pub fn step(&self, pos: Position, dir: Direction) -> Option<Position> {
        self.offset(pos, dir, 1)
    }

    /// Destination of a one-cell move, if it is in bounds and open.
    pub fn walkable_step(&self, pos: Position, dir: Direction) -> Option<Position> {
        self.step(pos, dir).filter(|next| self.is_open(*next))
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Open)
            .map(move |(idx, _)| Position::new(idx % self.width, idx / self.width))
    }

    /// The fixed exit cell, one in from the bottom-right corner.
    pub fn exit(&self) -> Position {
        Position::new(self.width.saturating_sub(2), self.height.saturating_sub(2))
    }

    pub fn entrance(&self) -> Position {
        Position::new(1, 1)
    }
}
