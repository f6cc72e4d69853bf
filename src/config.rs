//! construction-time configuration for a world
use crate::types::Steering;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Construction-time parameters for a [`GridWorld`](crate::world::GridWorld).
/// None of these are runtime-mutable; build a new world to change them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// side length of the square grid
    pub grid_size: u32,
    /// how many fruit the resolver keeps on the board
    pub num_fruits: usize,
    /// number of agents
    pub num_snakes: usize,
    /// number of teams, only 2 has an effect (alternating colours)
    pub num_teams: u32,
    /// starting health of every snake
    pub init_health: i32,
    /// starting target body length of every snake
    pub init_length: u16,
    /// how actions are interpreted for every snake
    pub steering: Steering,
    /// health decays by one every `decay_interval` steps; zero disables decay
    pub decay_interval: u32,
    /// health restored by eating a fruit
    pub fruit_heal: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            num_fruits: 5,
            num_snakes: 1,
            num_teams: 1,
            init_health: 100,
            init_length: 4,
            steering: Steering::Absolute,
            decay_interval: 1,
            fruit_heal: 20,
        }
    }
}

impl WorldConfig {
    /// a config for a duel on the default grid
    pub fn two_player() -> Self {
        Self {
            num_snakes: 2,
            num_teams: 2,
            ..Default::default()
        }
    }

    /// total number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.grid_size as usize * self.grid_size as usize
    }

    /// checks the parameters this config was built with. The original
    /// implementation accepted anything and misbehaved later; construction
    /// is the only place these are enforced.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::ZeroGrid);
        }
        if self.num_snakes == 0 {
            return Err(ConfigError::NoSnakes);
        }
        if self.num_snakes > u8::MAX as usize + 1 {
            return Err(ConfigError::TooManySnakes);
        }
        if self.num_snakes > self.cell_count() {
            return Err(ConfigError::TooManySnakes);
        }
        if self.num_fruits > self.cell_count() {
            return Err(ConfigError::TooManyFruit);
        }
        Ok(())
    }
}

/// why a [`WorldConfig`] was rejected at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// grid side length must be positive
    ZeroGrid,
    /// at least one snake is required
    NoSnakes,
    /// more snakes than the grid (or the id space) can hold
    TooManySnakes,
    /// more fruit requested than grid cells
    TooManyFruit,
    /// a snapshot's snakes or scores disagree with its config
    SnapshotMismatch,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroGrid => write!(f, "grid size must be positive"),
            ConfigError::NoSnakes => write!(f, "at least one snake is required"),
            ConfigError::TooManySnakes => write!(f, "more snakes than the grid can hold"),
            ConfigError::TooManyFruit => write!(f, "more fruit than grid cells"),
            ConfigError::SnapshotMismatch => {
                write!(f, "snapshot does not agree with its own config")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(WorldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_grid_rejected() {
        let config = WorldConfig {
            grid_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroGrid));
    }

    #[test]
    fn test_no_snakes_rejected() {
        let config = WorldConfig {
            num_snakes: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoSnakes));
    }

    #[test]
    fn test_overfull_board_rejected() {
        let config = WorldConfig {
            grid_size: 2,
            num_snakes: 5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TooManySnakes));

        let config = WorldConfig {
            grid_size: 2,
            num_snakes: 1,
            num_fruits: 5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TooManyFruit));
    }
}
