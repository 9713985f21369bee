use std::io::{self, BufRead, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::ports::InputPort;

/// One token per key press, read from crossterm events. Expects raw mode.
#[derive(Debug, Default)]
pub struct KeyInput;

impl InputPort for KeyInput {
    fn read_command(&mut self) -> io::Result<String> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let token = match key.code {
                    KeyCode::Char(c) => c.to_string(),
                    KeyCode::Up => "up".to_string(),
                    KeyCode::Down => "down".to_string(),
                    KeyCode::Left => "left".to_string(),
                    KeyCode::Right => "right".to_string(),
                    KeyCode::Esc => "q".to_string(),
                    _ => continue,
                };
                return Ok(token);
            }
        }
    }
}

/// Line-oriented input: prints a prompt and takes one line per turn.
pub struct LineInput<B, W> {
    reader: B,
    prompt: W,
}

pub const PROMPT: &str = "Enter command (WASD to move, IJKL to shoot, Q to quit): ";

impl<B: BufRead, W: Write> LineInput<B, W> {
    pub fn new(reader: B, prompt: W) -> Self {
        Self { reader, prompt }
    }
}

impl<B: BufRead, W: Write> InputPort for LineInput<B, W> {
    fn read_command(&mut self) -> io::Result<String> {
        self.prompt.write_all(PROMPT.as_bytes())?;
        self.prompt.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before the game ended",
            ));
        }
        Ok(line.trim().to_string())
    }
}
