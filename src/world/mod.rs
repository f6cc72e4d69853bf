//! the mutable world state and its queries
mod resolver;

pub use resolver::AgentOutcome;

use crate::config::{ConfigError, WorldConfig};
use crate::snake::Snake;
use crate::types::{
    Action, Colour, Direction, FoodGettableGame, HeadGettableGame, HealthGettableGame,
    LengthGettableGame, Position, RandomReasonableMovesGame, ScoreGettableGame,
    SizeDeterminableGame, SnakeBodyGettableGame, SnakeId, SnakeIDGettableGame, Steering,
    TurnDeterminableGame, VictorDeterminableGame,
};
use itertools::Itertools;
use rand::prelude::IteratorRandom;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::instrument;

/// The world: one square grid, its fruit, its snakes, and the RNG that
/// drives placement. All mutation happens through [`GridWorld::reset`] and
/// the step entry points in the resolver; everything else is a read-only
/// query. One logical caller drives one world, serially.
pub struct GridWorld {
    pub(crate) config: WorldConfig,
    pub(crate) snakes: Vec<Snake>,
    pub(crate) fruit: Vec<Position>,
    pub(crate) scores: Vec<u32>,
    pub(crate) time_steps: u64,
    pub(crate) rng: SmallRng,
}

impl fmt::Debug for GridWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridWorld")
            .field("config", &self.config)
            .field("snakes", &self.snakes)
            .field("fruit", &self.fruit)
            .field("scores", &self.scores)
            .field("time_steps", &self.time_steps)
            .finish()
    }
}

impl GridWorld {
    /// builds a world from an entropy-seeded RNG and deals the first episode
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// builds a world whose placement stream is reproducible: two worlds
    /// seeded identically reset to identical states
    pub fn seeded(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    pub(crate) fn with_rng(config: WorldConfig, rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self {
            config,
            snakes: Vec::new(),
            fruit: Vec::new(),
            scores: Vec::new(),
            time_steps: 0,
            rng,
        };
        world.reset();
        Ok(world)
    }

    /// Rebuilds the episode wholesale: zeroes the step counter and scores,
    /// deals every snake onto an independently random cell (overlapping
    /// spawns are allowed, as in the original game), and samples a fresh
    /// fruit set from the free cells. Only the RNG stream survives.
    #[instrument(level = "debug", skip_all)]
    pub fn reset(&mut self) {
        self.time_steps = 0;
        self.scores = vec![0; self.config.num_snakes];

        let n = self.config.grid_size as i32;
        let mut snakes = Vec::with_capacity(self.config.num_snakes);
        for _ in 0..self.config.num_snakes {
            let x = self.rng.gen_range(0..n);
            let y = self.rng.gen_range(0..n);
            snakes.push(Snake::new(
                Position { x, y },
                self.config.init_health,
                self.config.init_length,
                self.config.steering,
                Colour::Red,
            ));
        }
        if self.config.num_teams == 2 {
            for (i, snake) in snakes.iter_mut().enumerate() {
                if (i + 1) % 2 == 0 {
                    snake.colour = Colour::Blue;
                }
            }
        }
        self.snakes = snakes;

        self.fruit.clear();
        self.place_fruit();
    }

    /// the config this world was built with
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// side length of the square grid
    pub fn grid_size(&self) -> u32 {
        self.config.grid_size
    }

    /// current fruit cells, placement order
    pub fn fruit(&self) -> &[Position] {
        &self.fruit
    }

    /// all snakes, index = agent id
    pub fn snakes(&self) -> &[Snake] {
        &self.snakes
    }

    /// one snake by id. Panics on an unknown id, that is a caller bug.
    pub fn snake(&self, snake_id: &SnakeId) -> &Snake {
        &self.snakes[snake_id.as_usize()]
    }

    /// cumulative per-agent scores for this episode
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// true iff the position lies outside the playable grid
    pub fn off_grid(&self, position: Position) -> bool {
        position.x < 0
            || position.x >= self.config.grid_size as i32
            || position.y < 0
            || position.y >= self.config.grid_size as i32
    }

    /// every cell covered by a snake head or body, flattened across agents
    pub fn occupied_cells(&self) -> Vec<Position> {
        self.snakes
            .iter()
            .flat_map(|snake| snake.occupied_cells())
            .collect()
    }

    /// manhattan distance from an agent's head to the nearest fruit, or
    /// None when the board has no fruit. A reward-shaping input.
    pub fn min_fruit_distance(&self, snake_id: &SnakeId) -> Option<i32> {
        let head = self.snakes[snake_id.as_usize()].head;
        self.fruit
            .iter()
            .map(|fruit| head.manhattan_distance(fruit))
            .min()
    }

    /// A snake counts as dead once its last move left it outside the grid,
    /// inside a body, starved, or (multi-agent) overlapping another snake.
    pub(crate) fn agent_is_dead(&self, agent: usize) -> bool {
        let snake = &self.snakes[agent];
        if snake.health <= 0 || self.off_grid(snake.head) || snake.self_collision() {
            return true;
        }
        if self.snakes.len() > 1 {
            let hits = self
                .occupied_cells()
                .into_iter()
                .filter(|cell| *cell == snake.head)
                .count();
            if hits > 1 {
                return true;
            }
        }
        false
    }
}

impl fmt::Display for GridWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for y in 0..self.config.grid_size as i32 {
            for x in 0..self.config.grid_size as i32 {
                let position = Position { x, y };
                if self.fruit.contains(&position) {
                    write!(f, "f")?;
                } else if self.snakes.iter().any(|s| s.head == position) {
                    write!(f, "H")?;
                } else if self.snakes.iter().any(|s| s.body.contains(&position)) {
                    write!(f, "s")?;
                } else {
                    write!(f, ".")?;
                }
                write!(f, " ")?;
            }
            writeln!(f)?;
        }
        for (id, snake) in self.snakes.iter().enumerate() {
            write!(
                f,
                "({} health: {} head: {:?}) ",
                id, snake.health, snake.head
            )?;
        }
        Ok(())
    }
}

impl SnakeIDGettableGame for GridWorld {
    type SnakeIDType = SnakeId;

    fn get_snake_ids(&self) -> Vec<Self::SnakeIDType> {
        (0..self.snakes.len()).map(|i| SnakeId(i as u8)).collect()
    }
}

impl SizeDeterminableGame for GridWorld {
    fn get_width(&self) -> u32 {
        self.config.grid_size
    }

    fn get_height(&self) -> u32 {
        self.config.grid_size
    }
}

impl TurnDeterminableGame for GridWorld {
    fn turn(&self) -> u64 {
        self.time_steps
    }
}

impl HealthGettableGame for GridWorld {
    type HealthType = i32;
    const ZERO: Self::HealthType = 0;

    fn get_health(&self, snake_id: &Self::SnakeIDType) -> Self::HealthType {
        self.snakes[snake_id.as_usize()].health
    }

    fn get_health_i64(&self, snake_id: &Self::SnakeIDType) -> i64 {
        self.get_health(snake_id) as i64
    }

    fn is_alive(&self, snake_id: &Self::SnakeIDType) -> bool {
        // health decays below zero, so the default != ZERO check is wrong here
        self.get_health(snake_id) > 0
    }
}

impl LengthGettableGame for GridWorld {
    type LengthType = u16;

    fn get_length(&self, snake_id: &Self::SnakeIDType) -> Self::LengthType {
        self.snakes[snake_id.as_usize()].target_len
    }

    fn get_length_i64(&self, snake_id: &Self::SnakeIDType) -> i64 {
        self.get_length(snake_id) as i64
    }
}

impl HeadGettableGame for GridWorld {
    fn get_head_position(&self, snake_id: &Self::SnakeIDType) -> Position {
        self.snakes[snake_id.as_usize()].head
    }
}

impl FoodGettableGame for GridWorld {
    fn get_all_food_as_positions(&self) -> Vec<Position> {
        self.fruit.clone()
    }
}

impl ScoreGettableGame for GridWorld {
    fn get_score(&self, snake_id: &Self::SnakeIDType) -> u32 {
        self.scores[snake_id.as_usize()]
    }
}

impl SnakeBodyGettableGame for GridWorld {
    fn get_snake_body_vec(&self, snake_id: &Self::SnakeIDType) -> Vec<Position> {
        self.snakes[snake_id.as_usize()].occupied_cells().collect()
    }
}

impl VictorDeterminableGame for GridWorld {
    fn is_over(&self) -> bool {
        self.fruit.is_empty() || (0..self.snakes.len()).any(|i| self.agent_is_dead(i))
    }

    fn get_winner(&self) -> Option<Self::SnakeIDType> {
        if self.fruit.is_empty() {
            return Some(SnakeId(0));
        }
        if self.snakes.len() == 2 {
            let dead = (0..2).filter(|i| self.agent_is_dead(*i)).collect_vec();
            if dead.len() == 1 {
                return Some(SnakeId(((dead[0] + 1) % 2) as u8));
            }
        }
        None
    }
}

impl RandomReasonableMovesGame for GridWorld {
    fn random_reasonable_move_for_each_snake(
        &self,
        rng: &mut SmallRng,
    ) -> Vec<(Self::SnakeIDType, Action)> {
        let occupied = self.occupied_cells();
        self.snakes
            .iter()
            .enumerate()
            .map(|(i, snake)| {
                let candidates: Vec<(Action, Direction)> = match snake.steering {
                    Steering::Absolute => vec![
                        (Action::Up, Direction::Up),
                        (Action::Down, Direction::Down),
                        (Action::Left, Direction::Left),
                        (Action::Right, Direction::Right),
                    ],
                    Steering::Relative => vec![
                        (Action::Left, snake.facing.turn_left()),
                        (Action::Right, snake.facing.turn_right()),
                        (Action::Straight, snake.facing),
                    ],
                };
                let action = candidates
                    .into_iter()
                    .filter(|(_, direction)| {
                        let new_head = snake.head.add_vec(direction.to_vector());
                        !self.off_grid(new_head) && !occupied.contains(&new_head)
                    })
                    .map(|(action, _)| action)
                    .choose(rng)
                    .unwrap_or(Action::Straight);
                (SnakeId(i as u8), action)
            })
            .collect()
    }
}
