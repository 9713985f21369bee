use crate::grid::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Shoot(Direction),
    Quit,
    Unrecognized,
}

impl Command {
    /// Interprets one raw token from the operator. Never fails: anything
    /// unknown becomes `Unrecognized`, which still costs a turn.
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "w" | "up" => Command::Move(Direction::Up),
            "s" | "down" => Command::Move(Direction::Down),
            "a" | "left" => Command::Move(Direction::Left),
            "d" | "right" => Command::Move(Direction::Right),
            "i" => Command::Shoot(Direction::Up),
            "k" => Command::Shoot(Direction::Down),
            "j" => Command::Shoot(Direction::Left),
            "l" => Command::Shoot(Direction::Right),
            "q" => Command::Quit,
            _ => Command::Unrecognized,
        }
    }
}
