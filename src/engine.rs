//! Turn resolution.
//!
//! One command resolves in a fixed order: the player's action, pickup
//! collection, enemy random walk, then the caught check ahead of the escape
//! check. Terminal outcomes are absorbing.

use log::{debug, info};
use rand::Rng;

use crate::command::Command;
use crate::config::{GameConfig, PICKUP_COUNT};
use crate::entity::{place_random, Enemy, EntityId, Pickup, Player};
use crate::error::ConfigError;
use crate::grid::{Direction, Grid, Position};
use crate::maze;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Escaped,
    Caught,
    Quit,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    pub fn message(self) -> Option<&'static str> {
        match self {
            Outcome::Ongoing => None,
            Outcome::Escaped => Some("Congratulations! You have escaped the maze."),
            Outcome::Caught => Some("Game Over! You were caught by a minotaur."),
            Outcome::Quit => Some("You quit the game."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    Moved { to: Position },
    Blocked,
    NoAmmo,
    EnemyHit { id: EntityId, at: Position },
    ShotMissed,
    PickupCollected { ammo: u32 },
    Unrecognized,
}

/// Cells an arrow crossed this turn. Never stored between turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shot {
    pub direction: Direction,
    pub path: Vec<Position>,
    pub hit: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u64,
    pub events: Vec<TurnEvent>,
    pub shot: Option<Shot>,
    pub outcome: Outcome,
}

impl TurnReport {
    fn new(turn: u64, outcome: Outcome) -> Self {
        Self {
            turn,
            events: Vec::new(),
            shot: None,
            outcome,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub pickups: Vec<Pickup>,
    pub outcome: Outcome,
    pub turn: u64,
    next_id: u32,
}

impl GameState {
    pub fn new(grid: Grid, player: Player) -> Self {
        Self {
            grid,
            player,
            enemies: Vec::new(),
            pickups: Vec::new(),
            outcome: Outcome::Ongoing,
            turn: 0,
            next_id: 0,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId(self.next_id)
    }

    pub fn spawn_enemy(&mut self, position: Position) -> EntityId {
        let id = self.allocate_id();
        self.enemies.push(Enemy { id, position });
        id
    }

    pub fn spawn_pickup(&mut self, position: Position) -> EntityId {
        let id = self.allocate_id();
        self.pickups.push(Pickup { id, position });
        id
    }

    pub fn exit(&self) -> Position {
        self.grid.exit()
    }
}

/// Steps from `origin` along `direction` until the arrow leaves the grid, meets a
/// wall, or reaches the first enemy.
pub fn cast_ray(grid: &Grid, enemies: &[Enemy], origin: Position, direction: Direction) -> Shot {
    let mut path = Vec::new();
    let mut hit = None;
    let mut cursor = origin;
    while let Some(next) = grid.walkable_step(cursor, direction) {
        path.push(next);
        if let Some(enemy) = enemies.iter().find(|enemy| enemy.position == next) {
            hit = Some(enemy.id);
            break;
        }
        cursor = next;
    }
    Shot {
        direction,
        path,
        hit,
    }
}

pub struct GameEngine<R> {
    state: GameState,
    rng: R,
}

impl<R: Rng> GameEngine<R> {
    /// Carves a fresh maze and scatters enemies and pickups over it.
    pub fn new(config: &GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = maze::generate(config.width, config.height, &mut rng)?;
        let player = Player::new(grid.entrance());
        let mut state = GameState::new(grid, player);
        for _ in 0..config.enemy_count {
            let pos = place_random(&state.grid, &mut rng);
            state.spawn_enemy(pos);
        }
        for _ in 0..PICKUP_COUNT {
            let pos = place_random(&state.grid, &mut rng);
            state.spawn_pickup(pos);
        }
        info!(
            "new game {}x{}: {} enemies, {} pickups",
            config.width,
            config.height,
            state.enemies.len(),
            state.pickups.len()
        );
        Ok(Self { state, rng })
    }

    pub fn from_state(state: GameState, rng: R) -> Self {
        Self { state, rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.state.outcome
    }

    pub fn resolve_turn(&mut self, command: Command) -> TurnReport {
        if self.state.outcome.is_terminal() {
            return TurnReport::new(self.state.turn, self.state.outcome);
        }
        self.state.turn += 1;
        let mut report = TurnReport::new(self.state.turn, Outcome::Ongoing);

        match command {
            Command::Quit => {
                self.state.outcome = Outcome::Quit;
                report.outcome = Outcome::Quit;
                debug!("turn {}: quit", report.turn);
                return report;
            }
            Command::Move(dir) => self.move_player(dir, &mut report),
            Command::Shoot(dir) => self.shoot(dir, &mut report),
            Command::Unrecognized => report.events.push(TurnEvent::Unrecognized),
        }

        self.collect_pickups(&mut report);
        self.move_enemies();

        let player = self.state.player.position;
        if self.state.enemies.iter().any(|enemy| enemy.position == player) {
            self.state.outcome = Outcome::Caught;
        } else if player == self.state.exit() {
            self.state.outcome = Outcome::Escaped;
        }
        report.outcome = self.state.outcome;

        debug!(
            "turn {}: {:?} -> {:?}, events {:?}",
            report.turn, command, report.outcome, report.events
        );
        report
    }

    fn move_player(&mut self, dir: Direction, report: &mut TurnReport) {
        match self.state.grid.walkable_step(self.state.player.position, dir) {
            Some(next) => {
                self.state.player.position = next;
                report.events.push(TurnEvent::Moved { to: next });
            }
            None => report.events.push(TurnEvent::Blocked),
        }
    }

    fn shoot(&mut self, dir: Direction, report: &mut TurnReport) {
        if self.state.player.ammo == 0 {
            report.events.push(TurnEvent::NoAmmo);
            return;
        }
        self.state.player.ammo -= 1;

        let shot = cast_ray(
            &self.state.grid,
            &self.state.enemies,
            self.state.player.position,
            dir,
        );
        let hit = shot.hit.and_then(|id| {
            let idx = self.state.enemies.iter().position(|enemy| enemy.id == id)?;
            Some(self.state.enemies.remove(idx))
        });
        match hit {
            Some(enemy) => report.events.push(TurnEvent::EnemyHit {
                id: enemy.id,
                at: enemy.position,
            }),
            None => report.events.push(TurnEvent::ShotMissed),
        }
        report.shot = Some(shot);
    }

    fn collect_pickups(&mut self, report: &mut TurnReport) {
        let here = self.state.player.position;
        let before = self.state.pickups.len();
        self.state.pickups.retain(|pickup| pickup.position != here);
        let collected = before - self.state.pickups.len();
        for _ in 0..collected {
            self.state.player.ammo += 1;
            report.events.push(TurnEvent::PickupCollected {
                ammo: self.state.player.ammo,
            });
        }
    }

    fn move_enemies(&mut self) {
        let GameState { grid, enemies, .. } = &mut self.state;
        for enemy in enemies.iter_mut() {
            let dir = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
            if let Some(next) = grid.walkable_step(enemy.position, dir) {
                enemy.position = next;
            }
        }
    }
}
