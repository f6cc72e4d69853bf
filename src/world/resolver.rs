//! the per-step transition function
use super::GridWorld;
use crate::types::{Action, Position, SnakeId, SnakeState};
use fxhash::FxHashSet;
use itertools::Itertools;
use rand::prelude::IteratorRandom;
use serde::Serialize;
use tracing::{debug, instrument, trace};

/// what one step did to one agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentOutcome {
    /// resolution state for this step
    pub state: SnakeState,
    /// health after the step
    pub health: i32,
    /// target body length after the step
    pub target_len: u16,
}

impl GridWorld {
    /// Advances a single named agent and resolves the round.
    ///
    /// This is the original game's per-agent entry point: the shared
    /// resolution (inter-snake collisions, elimination, fruit replenishment,
    /// board-full) runs after every call, and the step counter advances by
    /// one. With several agents the caller is responsible for sequencing one
    /// call per agent in id order; the engine does not enforce that, and the
    /// collision rules really describe a completed round. Prefer
    /// [`GridWorld::step_all`] for multi-agent play.
    ///
    /// Panics when `snake_id` is out of range, that is a caller bug.
    #[instrument(level = "trace", skip_all, fields(agent = snake_id.as_usize()))]
    pub fn step(&mut self, action: Action, snake_id: SnakeId) -> Vec<AgentOutcome> {
        let decay = self.decay_due();
        let mut states = vec![SnakeState::Ok; self.snakes.len()];
        states[snake_id.as_usize()] = self.advance_agent(action, snake_id.as_usize(), decay);
        self.resolve_round(&mut states);
        self.time_steps += 1;
        self.report(states)
    }

    /// Advances every agent in id order with one action each, then resolves
    /// the round once. One call is one full round: the step counter advances
    /// by one regardless of the number of agents.
    ///
    /// Panics unless exactly one action per agent is supplied.
    #[instrument(level = "trace", skip_all)]
    pub fn step_all(&mut self, actions: &[Action]) -> Vec<AgentOutcome> {
        assert_eq!(
            actions.len(),
            self.snakes.len(),
            "one action per agent is required"
        );
        let decay = self.decay_due();
        let mut states = Vec::with_capacity(actions.len());
        for (agent, action) in actions.iter().enumerate() {
            states.push(self.advance_agent(*action, agent, decay));
        }
        self.resolve_round(&mut states);
        self.time_steps += 1;
        self.report(states)
    }

    /// health decays on steps aligned to the decay interval; a zero
    /// interval disables decay entirely
    fn decay_due(&self) -> bool {
        self.config.decay_interval != 0
            && self.time_steps % u64::from(self.config.decay_interval) == 0
    }

    /// steer, move, eat, trim, and check the solo death conditions for one
    /// agent. Inter-snake effects are left to `resolve_round`.
    fn advance_agent(&mut self, action: Action, agent: usize, decay: bool) -> SnakeState {
        let snake = &mut self.snakes[agent];
        snake.apply_steer(action);
        snake.advance(decay);
        let head = snake.head;

        let mut state = SnakeState::Ok;
        if let Some(index) = self.fruit.iter().position(|fruit| *fruit == head) {
            self.fruit.remove(index);
            let snake = &mut self.snakes[agent];
            snake.target_len += 1;
            snake.health += self.config.fruit_heal;
            self.scores[agent] += 1;
            state = SnakeState::Ate;
            trace!(agent, "ate a fruit");
        }

        let snake = &mut self.snakes[agent];
        snake.trim();
        let starved = snake.health <= 0;
        let self_hit = snake.self_collision();
        let head = snake.head;
        if self.off_grid(head) || self_hit || starved {
            debug!(agent, starved, self_hit, "snake died");
            state = SnakeState::Dead;
        }
        state
    }

    /// The shared tail of a round: inter-snake collisions, the two-agent
    /// elimination rule, fruit replenishment, and the board-full win.
    /// Applied in that order; later rules overwrite Ok/Ate states only,
    /// except the board-full win which is unconditional for agent 0.
    fn resolve_round(&mut self, states: &mut [SnakeState]) {
        if self.snakes.len() > 1 {
            let occupied = self.occupied_cells();
            for (agent, snake) in self.snakes.iter().enumerate() {
                if states[agent].is_terminal() {
                    continue;
                }
                let hits = occupied.iter().filter(|cell| **cell == snake.head).count();
                if hits > 1 {
                    debug!(agent, "killed by snake collision");
                    states[agent] = SnakeState::Dead;
                }
            }

            // Elimination is defined for duels only and is deliberately not
            // generalized: with three or more agents nothing is awarded.
            if self.snakes.len() == 2 {
                let dead_non_primary = states
                    .iter()
                    .enumerate()
                    .skip(1)
                    .filter(|(_, state)| **state == SnakeState::Dead)
                    .map(|(agent, _)| agent)
                    .collect_vec();
                if dead_non_primary.len() == 1 {
                    let winner = (dead_non_primary[0] + 1) % 2;
                    debug!(agent = winner, "won by elimination");
                    states[winner] = SnakeState::Won;
                }
            }
        }

        self.place_fruit();
        if self.fruit.is_empty() {
            debug!("no fruit can be placed, the board is full");
            states[0] = SnakeState::Won;
        }
    }

    /// Samples free cells uniformly without replacement until the board
    /// holds the configured fruit count. Cells under snakes or existing
    /// fruit are never chosen; when fewer free cells remain than requested,
    /// that many are placed and nothing is reported.
    pub(crate) fn place_fruit(&mut self) {
        let want = self.config.num_fruits.saturating_sub(self.fruit.len());
        if want == 0 {
            return;
        }
        let mut taken: FxHashSet<Position> = self.occupied_cells().into_iter().collect();
        taken.extend(self.fruit.iter().copied());

        let n = self.config.grid_size as i32;
        let free = (0..n)
            .cartesian_product(0..n)
            .map(|(x, y)| Position { x, y })
            .filter(|cell| !taken.contains(cell));
        let new_fruit = free.choose_multiple(&mut self.rng, want);
        self.fruit.extend(new_fruit);
    }

    fn report(&self, states: Vec<SnakeState>) -> Vec<AgentOutcome> {
        states
            .into_iter()
            .zip(self.snakes.iter())
            .map(|(state, snake)| AgentOutcome {
                state,
                health: snake.health,
                target_len: snake.target_len,
            })
            .collect()
    }
}
