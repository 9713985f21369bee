use crate::error::ConfigError;
use crate::maze::MIN_SIDE;

pub const DEFAULT_WIDTH: usize = 79;
pub const DEFAULT_HEIGHT: usize = 21;
pub const DEFAULT_ENEMIES: usize = 3;
pub const PICKUP_COUNT: usize = 3;
/// Above this the maze gets crowded; accepted, but worth a warning.
pub const RECOMMENDED_MAX_ENEMIES: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub enemy_count: usize,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            enemy_count: DEFAULT_ENEMIES,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(ConfigError::TooSmall { width, height });
        }
        // Carving only reaches odd coordinates, so an even side leaves the exit walled.
        if width % 2 == 0 || height % 2 == 0 {
            return Err(ConfigError::EvenDimension { width, height });
        }
        if self.enemy_count > RECOMMENDED_MAX_ENEMIES {
            log::warn!(
                "{} enemies requested, more than the recommended {}",
                self.enemy_count,
                RECOMMENDED_MAX_ENEMIES
            );
        }
        Ok(())
    }
}
