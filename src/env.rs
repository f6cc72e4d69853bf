//! the thin reinforcement-learning face of the engine
//!
//! Training harnesses drive [`GridWorldEnv`] through `reset`/`step` and get
//! back per-agent observations, rewards and the raw engine outcomes. All
//! reward and observation encoding lives here; the engine itself only knows
//! states, health and lengths.
use crate::config::{ConfigError, WorldConfig};
use crate::types::{
    Action, FoodGettableGame, HeadGettableGame, HealthGettableGame, LengthGettableGame,
    Position, ScoreGettableGame, SizeDeterminableGame, SnakeBodyGettableGame, SnakeId,
    SnakeIDGettableGame, SnakeState, TurnDeterminableGame,
};
use crate::world::{AgentOutcome, GridWorld};
use serde::Serialize;

/// observation code for an empty cell
pub const CELL_EMPTY: u8 = 0;
/// observation code for a fruit cell
pub const CELL_FRUIT: u8 = 1;
/// observation code for the observing agent's head
pub const CELL_OWN_HEAD: u8 = 2;
/// observation code for the observing agent's body
pub const CELL_OWN_BODY: u8 = 3;
/// observation code for any other snake's cell
pub const CELL_FOE: u8 = 4;

/// what one agent sees after a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// row-major grid of cell codes, `grid_size * grid_size` entries
    pub grid: Vec<u8>,
    /// the agent's health
    pub health: i32,
    /// the agent's target body length
    pub length: u16,
    /// numeric code of the agent's heading (up=1, down=2, left=3, right=4)
    pub facing: u8,
    /// the agent's cumulative score
    pub score: u32,
}

/// scalar rewards handed out per resolution state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RewardTable {
    /// eating a fruit
    pub ate: f32,
    /// dying, by any cause
    pub died: f32,
    /// winning, by elimination or board fill
    pub won: f32,
    /// everything else, a per-step shaping term
    pub step: f32,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            ate: 1.0,
            died: -1.0,
            won: 1.0,
            step: 0.0,
        }
    }
}

impl RewardTable {
    fn for_outcome(&self, outcome: &AgentOutcome) -> f32 {
        match outcome.state {
            SnakeState::Ate => self.ate,
            SnakeState::Dead => self.died,
            SnakeState::Won => self.won,
            SnakeState::Ok => self.step,
        }
    }
}

/// everything a harness needs from one environment step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvStep {
    /// one observation per agent
    pub observations: Vec<Observation>,
    /// one reward per agent
    pub rewards: Vec<f32>,
    /// the raw engine outcomes the rewards were derived from
    pub outcomes: Vec<AgentOutcome>,
    /// true once any agent's stream has ended; callers then `reset`
    pub done: bool,
    /// elapsed steps this episode
    pub turn: u64,
}

/// a [`GridWorld`] dressed as an RL environment
#[derive(Debug)]
pub struct GridWorldEnv {
    world: GridWorld,
    /// reward encoding, tweakable between episodes
    pub rewards: RewardTable,
}

impl GridWorldEnv {
    /// an environment over a fresh entropy-seeded world
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            world: GridWorld::new(config)?,
            rewards: RewardTable::default(),
        })
    }

    /// an environment whose episodes are reproducible
    pub fn seeded(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            world: GridWorld::seeded(config, seed)?,
            rewards: RewardTable::default(),
        })
    }

    /// read-only view of the wrapped world, e.g. for rendering
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// starts a new episode and returns what every agent sees
    pub fn reset(&mut self) -> Vec<Observation> {
        self.world.reset();
        self.observe_all()
    }

    /// Advances one full round with one action per agent.
    /// Panics unless exactly one action per agent is supplied.
    pub fn step(&mut self, actions: &[Action]) -> EnvStep {
        let outcomes = self.world.step_all(actions);
        let rewards = outcomes
            .iter()
            .map(|outcome| self.rewards.for_outcome(outcome))
            .collect();
        let done = outcomes.iter().any(|outcome| outcome.state.is_terminal());
        EnvStep {
            observations: self.observe_all(),
            rewards,
            outcomes,
            done,
            turn: self.world.turn(),
        }
    }

    fn observe_all(&self) -> Vec<Observation> {
        self.world
            .get_snake_ids()
            .iter()
            .map(|id| self.observe(id))
            .collect()
    }

    /// encodes the board from one agent's point of view
    pub fn observe(&self, snake_id: &SnakeId) -> Observation {
        let n = self.world.get_width() as usize;
        let mut grid = vec![CELL_EMPTY; n * n];
        let paint = |cell: Position, code: u8, grid: &mut Vec<u8>| {
            if !self.world.off_grid(cell) {
                grid[cell.y as usize * n + cell.x as usize] = code;
            }
        };

        for fruit in self.world.get_all_food_as_positions() {
            paint(fruit, CELL_FRUIT, &mut grid);
        }
        for other in self.world.get_snake_ids() {
            if other == *snake_id {
                continue;
            }
            for cell in self.world.get_snake_body_vec(&other) {
                paint(cell, CELL_FOE, &mut grid);
            }
        }
        let own = self.world.get_snake_body_vec(snake_id);
        for cell in own.iter().skip(1) {
            paint(*cell, CELL_OWN_BODY, &mut grid);
        }
        paint(
            self.world.get_head_position(snake_id),
            CELL_OWN_HEAD,
            &mut grid,
        );

        Observation {
            grid,
            health: self.world.get_health(snake_id),
            length: self.world.get_length(snake_id),
            facing: self.world.snake(snake_id).facing.as_code(),
            score: self.world.get_score(snake_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn pinned_env() -> GridWorldEnv {
        let mut env = GridWorldEnv::seeded(
            WorldConfig {
                grid_size: 5,
                num_fruits: 1,
                num_snakes: 2,
                ..Default::default()
            },
            42,
        )
        .unwrap();
        let world = &mut env.world;
        world.snakes[0].head = Position { x: 1, y: 2 };
        world.snakes[0].facing = Direction::Right;
        world.snakes[0].body.clear();
        world.snakes[1].head = Position { x: 3, y: 4 };
        world.snakes[1].facing = Direction::Up;
        world.snakes[1].body.clear();
        world.fruit = vec![Position { x: 2, y: 2 }];
        env
    }

    #[test]
    fn test_observation_encodes_the_board() {
        let env = pinned_env();
        let obs = env.observe(&SnakeId(0));
        assert_eq!(obs.grid.len(), 25);
        assert_eq!(obs.grid[2 * 5 + 1], CELL_OWN_HEAD);
        assert_eq!(obs.grid[2 * 5 + 2], CELL_FRUIT);
        assert_eq!(obs.grid[4 * 5 + 3], CELL_FOE);
        assert_eq!(obs.grid[0], CELL_EMPTY);
        assert_eq!(obs.facing, 4);
        assert_eq!(obs.health, 100);

        // the same board flips perspective for the other agent
        let obs = env.observe(&SnakeId(1));
        assert_eq!(obs.grid[4 * 5 + 3], CELL_OWN_HEAD);
        assert_eq!(obs.grid[2 * 5 + 1], CELL_FOE);
        assert_eq!(obs.facing, 1);
    }

    #[test]
    fn test_step_rewards_eating() {
        let mut env = pinned_env();
        let step = env.step(&[Action::Right, Action::Straight]);
        assert_eq!(step.outcomes[0].state, SnakeState::Ate);
        assert_eq!(step.rewards[0], 1.0);
        assert_eq!(step.rewards[1], 0.0);
        assert!(!step.done);
        assert_eq!(step.turn, 1);
    }

    #[test]
    fn test_step_flags_terminal_rounds() {
        let mut env = pinned_env();
        env.world.snakes[1].head = Position { x: 0, y: 0 };
        let step = env.step(&[Action::Right, Action::Up]);
        // agent 1 walked off the grid; the duel ends this round
        assert_eq!(step.outcomes[1].state, SnakeState::Dead);
        assert_eq!(step.outcomes[0].state, SnakeState::Won);
        assert_eq!(step.rewards[1], -1.0);
        assert_eq!(step.rewards[0], 1.0);
        assert!(step.done);
    }

    #[test]
    fn test_reset_returns_fresh_observations() {
        let mut env = GridWorldEnv::seeded(WorldConfig::default(), 9).unwrap();
        let observations = env.reset();
        assert_eq!(observations.len(), 1);
        let fruit_cells = observations[0]
            .grid
            .iter()
            .filter(|code| **code == CELL_FRUIT)
            .count();
        assert_eq!(fruit_cells, 5);
        assert_eq!(observations[0].score, 0);
    }
}
