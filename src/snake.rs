//! the per-agent snake entity
use crate::types::{Action, Colour, Direction, Position, Steering};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One agent's mutable state. The body holds segments behind the head,
/// oldest at the front of the deque, newest (the cell the head just left)
/// at the back. Growth happens by deferring [`Snake::trim`], not by an
/// explicit grow step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// head cell, may sit outside the grid after a fatal move
    pub head: Position,
    /// body segments behind the head, oldest first
    pub body: VecDeque<Position>,
    /// the length the body is trimmed to after each move
    pub target_len: u16,
    /// remaining health; non-positive means starved
    pub health: i32,
    /// current heading
    pub facing: Direction,
    /// how [`Snake::apply_steer`] interprets actions
    pub steering: Steering,
    /// identity colour, cosmetic only
    pub colour: Colour,
}

impl Snake {
    /// a new snake at `head`, facing up, with an empty body
    pub fn new(
        head: Position,
        health: i32,
        target_len: u16,
        steering: Steering,
        colour: Colour,
    ) -> Self {
        Self {
            head,
            body: VecDeque::new(),
            target_len,
            health,
            facing: Direction::Up,
            steering,
            colour,
        }
    }

    /// Re-aims the snake for the coming move. Absolute steering sets the
    /// heading directly, full reversals included. Relative steering only
    /// recognizes left/right turns; any other action keeps the heading.
    pub fn apply_steer(&mut self, action: Action) {
        match self.steering {
            Steering::Absolute => match action {
                Action::Up => self.facing = Direction::Up,
                Action::Down => self.facing = Direction::Down,
                Action::Left => self.facing = Direction::Left,
                Action::Right => self.facing = Direction::Right,
                Action::Straight => {}
            },
            Steering::Relative => match action {
                Action::Left => self.facing = self.facing.turn_left(),
                Action::Right => self.facing = self.facing.turn_right(),
                _ => {}
            },
        }
    }

    /// Moves one cell along the current heading. The old head becomes the
    /// newest body segment; the body is NOT trimmed here, so the segment
    /// count grows by one until [`Snake::trim`] runs.
    pub fn advance(&mut self, decay: bool) {
        let new_head = self.head.add_vec(self.facing.to_vector());
        self.body.push_back(self.head);
        self.head = new_head;
        if decay {
            self.health -= 1;
        }
    }

    /// drops segments from the tail end (oldest first) until the body is
    /// back at `target_len`; a zero target clears the body entirely
    pub fn trim(&mut self) {
        while self.body.len() > self.target_len as usize {
            self.body.pop_front();
        }
    }

    /// true iff the head sits on one of the current body segments
    pub fn self_collision(&self) -> bool {
        self.body.iter().any(|segment| *segment == self.head)
    }

    /// every cell this snake occupies, head first then body newest-to-oldest
    pub fn occupied_cells(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().rev().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_snake() -> Snake {
        Snake::new(
            Position { x: 5, y: 5 },
            100,
            2,
            Steering::Absolute,
            Colour::Red,
        )
    }

    #[test]
    fn test_advance_moves_head_and_grows_body() {
        let mut snake = fixture_snake();
        snake.advance(false);
        assert_eq!(snake.head, Position { x: 5, y: 4 });
        assert_eq!(snake.body.len(), 1);
        assert_eq!(snake.body[0], Position { x: 5, y: 5 });
        assert_eq!(snake.health, 100);

        snake.advance(true);
        assert_eq!(snake.head, Position { x: 5, y: 3 });
        assert_eq!(snake.body.len(), 2);
        assert_eq!(snake.health, 99);
    }

    #[test]
    fn test_absolute_steering_allows_full_reversal() {
        let mut snake = fixture_snake();
        snake.apply_steer(Action::Down);
        assert_eq!(snake.facing, Direction::Down);
        snake.apply_steer(Action::Up);
        assert_eq!(snake.facing, Direction::Up);
        snake.apply_steer(Action::Straight);
        assert_eq!(snake.facing, Direction::Up);
    }

    #[test]
    fn test_relative_steering_only_turns() {
        let mut snake = fixture_snake();
        snake.steering = Steering::Relative;
        snake.apply_steer(Action::Left);
        assert_eq!(snake.facing, Direction::Left);
        snake.apply_steer(Action::Right);
        assert_eq!(snake.facing, Direction::Up);
        // up/down/straight are not recognized in relative mode
        snake.apply_steer(Action::Down);
        assert_eq!(snake.facing, Direction::Up);
        snake.apply_steer(Action::Straight);
        assert_eq!(snake.facing, Direction::Up);
    }

    #[test]
    fn test_trim_keeps_newest_segments() {
        let mut snake = fixture_snake();
        for _ in 0..4 {
            snake.advance(false);
        }
        assert_eq!(snake.body.len(), 4);
        snake.trim();
        assert_eq!(snake.body.len(), 2);
        // the survivors are the two most recently vacated cells
        assert_eq!(snake.body[0], Position { x: 5, y: 3 });
        assert_eq!(snake.body[1], Position { x: 5, y: 2 });
    }

    #[test]
    fn test_trim_to_zero_clears_body() {
        let mut snake = fixture_snake();
        snake.target_len = 0;
        snake.advance(false);
        snake.advance(false);
        snake.trim();
        assert!(snake.body.is_empty());
    }

    #[test]
    fn test_self_collision_in_tight_loop() {
        let mut snake = fixture_snake();
        snake.target_len = 4;
        // a clockwise box: up, right, down, left lands on the starting cell
        for action in [Action::Up, Action::Right, Action::Down, Action::Left] {
            snake.apply_steer(action);
            snake.advance(false);
            snake.trim();
        }
        assert_eq!(snake.head, Position { x: 5, y: 5 });
        assert!(snake.self_collision());
    }

    #[test]
    fn test_no_self_collision_on_straight_run() {
        let mut snake = fixture_snake();
        for _ in 0..3 {
            snake.advance(false);
            snake.trim();
        }
        assert!(!snake.self_collision());
    }
}
