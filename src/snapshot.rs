//! a serde representation of the world, for fixtures and external consumers
//!
//! The engine itself persists nothing. Snapshots exist so that tests can pin
//! exact board states as JSON fixtures and so that external renderers or
//! harnesses can consume the full observable state in one structure.
use crate::config::ConfigError;
use crate::config::WorldConfig;
use crate::snake::Snake;
use crate::types::Position;
use crate::world::GridWorld;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// the full observable state of a world at one instant
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WorldSnapshot {
    /// the construction-time parameters
    pub config: WorldConfig,
    /// fruit cells, placement order
    pub fruit: Vec<Position>,
    /// all snakes, index = agent id
    pub snakes: Vec<Snake>,
    /// cumulative per-agent scores
    pub scores: Vec<u32>,
    /// elapsed steps this episode
    pub time_steps: u64,
}

impl WorldSnapshot {
    /// rebuilds a live world in exactly this state, with a fresh
    /// entropy-seeded RNG for its future fruit placement
    pub fn into_world(self) -> Result<GridWorld, ConfigError> {
        self.build(SmallRng::from_entropy())
    }

    /// rebuilds a live world in exactly this state with a reproducible RNG
    pub fn into_world_seeded(self, seed: u64) -> Result<GridWorld, ConfigError> {
        self.build(SmallRng::seed_from_u64(seed))
    }

    fn build(self, rng: SmallRng) -> Result<GridWorld, ConfigError> {
        self.config.validate()?;
        if self.snakes.len() != self.config.num_snakes
            || self.scores.len() != self.config.num_snakes
        {
            return Err(ConfigError::SnapshotMismatch);
        }
        Ok(GridWorld {
            config: self.config,
            snakes: self.snakes,
            fruit: self.fruit,
            scores: self.scores,
            time_steps: self.time_steps,
            rng,
        })
    }
}

impl GridWorld {
    /// capture the observable state of this world
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            config: self.config,
            fruit: self.fruit.clone(),
            snakes: self.snakes.clone(),
            scores: self.scores.clone(),
            time_steps: self.time_steps,
        }
    }
}
