use std::collections::HashMap;

use rand::Rng;

use crate::grid::{Grid, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy,
    Pickup,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub position: Position,
    pub ammo: u32,
}

impl Player {
    pub fn new(position: Position) -> Self {
        Self { position, ammo: 0 }
    }

    pub fn with_ammo(mut self, ammo: u32) -> Self {
        self.ammo = ammo;
        self
    }
}

/// A roaming minotaur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Position,
}

/// An arrow lying in the maze, worth one shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pickup {
    pub id: EntityId,
    pub position: Position,
}

/// Samples interior cells until one is open.
///
/// The grid must contain at least one open interior cell or this never returns;
/// every generated maze has the entrance open.
pub fn place_random(grid: &Grid, rng: &mut impl Rng) -> Position {
    loop {
        let x = rng.gen_range(1..=grid.width() - 2);
        let y = rng.gen_range(1..=grid.height() - 2);
        let pos = Position::new(x, y);
        if grid.is_open(pos) {
            return pos;
        }
    }
}

/// Which entity shows on each occupied cell.
///
/// When several share a cell the player wins over enemies, and enemies over
/// pickups.
#[derive(Debug, Default)]
pub struct OccupancyIndex {
    cells: HashMap<Position, EntityKind>,
}

impl OccupancyIndex {
    pub fn build(player: &Player, enemies: &[Enemy], pickups: &[Pickup]) -> Self {
        let mut index = Self::default();
        for pickup in pickups {
            index.cells.insert(pickup.position, EntityKind::Pickup);
        }
        for enemy in enemies {
            index.cells.insert(enemy.position, EntityKind::Enemy);
        }
        index.cells.insert(player.position, EntityKind::Player);
        index
    }

    pub fn at(&self, pos: Position) -> Option<EntityKind> {
        self.cells.get(&pos).copied()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn place_random_lands_on_open_interior_cells() {
        let grid = Grid::from_rows(&["#######", "#.#####", "#####.#", "#######"]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let pos = place_random(&grid, &mut rng);
            assert!(pos == Position::new(1, 1) || pos == Position::new(5, 2));
        }
    }

    #[test]
    fn occupancy_prefers_player_then_enemy_then_pickup() {
        let shared = Position::new(2, 2);
        let player = Player::new(shared);
        let enemies = [
            Enemy {
                id: EntityId(1),
                position: shared,
            },
            Enemy {
                id: EntityId(2),
                position: Position::new(3, 3),
            },
        ];
        let pickups = [
            Pickup {
                id: EntityId(3),
                position: Position::new(3, 3),
            },
            Pickup {
                id: EntityId(4),
                position: Position::new(1, 3),
            },
        ];
        let index = OccupancyIndex::build(&player, &enemies, &pickups);
        assert_eq!(index.at(shared), Some(EntityKind::Player));
        assert_eq!(index.at(Position::new(3, 3)), Some(EntityKind::Enemy));
        assert_eq!(index.at(Position::new(1, 3)), Some(EntityKind::Pickup));
        assert_eq!(index.at(Position::new(1, 1)), None);
        assert_eq!(index.at(Position::new(2, 3)), None);
    }
}
