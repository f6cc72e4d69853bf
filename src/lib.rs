#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! A deterministic multi-agent snake gridworld for reinforcement learning.
//!
//! The engine owns the whole transition function: grid occupancy, snake
//! movement/growth/decay, fruit spawning, collision detection (self, wall,
//! inter-snake) and win/loss resolution for one or many simultaneous agents.
//! [`env`] dresses it up as an RL environment and [`render`] draws it; both
//! are thin, stateless views over [`world::GridWorld`].
//!
//! ```
//! use snake_gridworld::config::WorldConfig;
//! use snake_gridworld::types::{Action, SnakeId};
//! use snake_gridworld::world::GridWorld;
//!
//! let mut world = GridWorld::seeded(WorldConfig::default(), 7).unwrap();
//! let outcomes = world.step(Action::Up, SnakeId(0));
//! assert_eq!(outcomes.len(), 1);
//! ```
//!
//! Worlds are single-caller and single-threaded: `reset` and the step entry
//! points are the only mutating operations and must be called serially.
//! Seed the world (`GridWorld::seeded`) for reproducible episodes.

use snapshot::WorldSnapshot;
use world::GridWorld;

pub mod config;
pub mod env;
pub mod render;
pub mod snake;
pub mod snapshot;
pub mod types;
pub mod world;

/// Loads a world fixture from a JSON snapshot string
pub fn world_fixture(world_fixture: &str) -> GridWorld {
    let snapshot: Result<WorldSnapshot, _> = serde_json::from_str(world_fixture);
    snapshot
        .expect("the json literal is valid")
        .into_world_seeded(0)
        .expect("the fixture is consistent")
}
