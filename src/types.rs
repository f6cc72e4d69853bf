//! various types that are useful for working with the gridworld
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Debug};

/// A vector with which to do positional math
#[derive(Debug, Clone, Copy)]
pub struct Vector {
    /// x offset
    pub x: i64,
    /// y offset
    pub y: i64,
}

/// A cell on the grid. The origin is the top-left corner; y grows downward,
/// matching the renderer's row order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// x coordinate
    pub x: i32,
    /// y coordinate
    pub y: i32,
}

impl Position {
    /// offset this position by a vector
    pub fn add_vec(&self, v: Vector) -> Position {
        Position {
            x: (self.x as i64 + v.x) as i32,
            y: (self.y as i64 + v.y) as i32,
        }
    }

    /// offset this position by the negation of a vector
    pub fn sub_vec(&self, v: Vector) -> Position {
        Position {
            x: (self.x as i64 - v.x) as i32,
            y: (self.y as i64 - v.y) as i32,
        }
    }

    /// converts this position to a vector
    pub fn to_vector(&self) -> Vector {
        Vector {
            x: self.x as i64,
            y: self.y as i64,
        }
    }

    /// the manhattan distance to another position
    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Represents a heading on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

impl Direction {
    /// convert this direction to its unit vector
    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Up => Vector { x: 0, y: -1 },
            Direction::Down => Vector { x: 0, y: 1 },
            Direction::Left => Vector { x: -1, y: 0 },
            Direction::Right => Vector { x: 1, y: 0 },
        }
    }

    /// create a Direction from the given unit vector
    pub fn from_vector(vector: Vector) -> Self {
        match vector {
            Vector { x: 0, y: -1 } => Self::Up,
            Vector { x: 0, y: 1 } => Self::Down,
            Vector { x: -1, y: 0 } => Self::Left,
            Vector { x: 1, y: 0 } => Self::Right,
            _ => panic!(),
        }
    }

    /// returns a vec of all four directions
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    /// converts this direction to a usize index. indices are in the same order as `Direction::all()`
    pub fn as_index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// converts a usize index to a direction
    pub fn from_index(index: usize) -> Direction {
        match index {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            3 => Direction::Right,
            _ => panic!("invalid index"),
        }
    }

    /// the fixed numeric code for this direction (up=1, down=2, left=3, right=4)
    pub fn as_code(&self) -> u8 {
        match self {
            Direction::Up => 1,
            Direction::Down => 2,
            Direction::Left => 3,
            Direction::Right => 4,
        }
    }

    /// the heading after a 90 degree turn to the left
    pub fn turn_left(self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// the heading after a 90 degree turn to the right
    pub fn turn_right(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// The steering token an agent submits each step.
///
/// Under absolute steering the four directional actions name a world heading
/// and `Straight` is a no-op. Under relative steering only `Left` and `Right`
/// are recognized (as turns from the current heading); everything else steers
/// straight. Unrecognized text tokens degrade to `Straight` rather than
/// raising, which silently absorbs caller typos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[allow(missing_docs)]
    Up,
    #[allow(missing_docs)]
    Down,
    #[allow(missing_docs)]
    Left,
    #[allow(missing_docs)]
    Right,
    #[allow(missing_docs)]
    Straight,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Up => write!(f, "up"),
            Action::Down => write!(f, "down"),
            Action::Left => write!(f, "left"),
            Action::Right => write!(f, "right"),
            Action::Straight => write!(f, "straight"),
        }
    }
}

impl Action {
    /// returns a vec of all possible actions
    pub fn all() -> Vec<Action> {
        vec![
            Action::Up,
            Action::Down,
            Action::Left,
            Action::Right,
            Action::Straight,
        ]
    }

    /// converts this action to a usize index. indices are in the same order as `Action::all()`
    pub fn as_index(&self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
            Action::Straight => 4,
        }
    }

    /// converts a usize index to an action
    pub fn from_index(index: usize) -> Action {
        match index {
            0 => Action::Up,
            1 => Action::Down,
            2 => Action::Left,
            3 => Action::Right,
            4 => Action::Straight,
            _ => panic!("invalid index"),
        }
    }

    /// parses an action token. Unknown tokens steer straight, never error.
    pub fn from_token(token: &str) -> Action {
        match token {
            "up" => Action::Up,
            "down" => Action::Down,
            "left" => Action::Left,
            "right" => Action::Right,
            _ => Action::Straight,
        }
    }
}

/// token to represent a snake id
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SnakeId(pub u8);

impl SnakeId {
    /// convert this snake ID to a usize
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl Serialize for SnakeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

/// how an agent's actions are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Steering {
    /// actions name a world heading directly, full reversals included
    Absolute,
    /// left/right turn from the current heading, everything else goes straight
    Relative,
}

/// per-agent resolution state for a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnakeState {
    /// moved without incident
    Ok,
    /// ate a fruit this step
    Ate,
    /// hit a wall, a snake, or starved
    Dead,
    /// won by elimination or by filling the board
    Won,
}

impl SnakeState {
    /// whether this state ends the agent's episode stream
    pub fn is_terminal(&self) -> bool {
        matches!(self, SnakeState::Dead | SnakeState::Won)
    }
}

/// identity colour of a snake, cosmetic only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    #[allow(missing_docs)]
    Red,
    #[allow(missing_docs)]
    Green,
    #[allow(missing_docs)]
    Blue,
    #[allow(missing_docs)]
    Yellow,
}

impl Colour {
    /// the RGB triple for this colour
    pub fn as_rgb(&self) -> [u8; 3] {
        match self {
            Colour::Red => [255, 0, 0],
            Colour::Green => [0, 255, 0],
            Colour::Blue => [0, 0, 255],
            Colour::Yellow => [255, 255, 0],
        }
    }
}

/// A game for which one can get the snake ids
pub trait SnakeIDGettableGame {
    #[allow(missing_docs)]
    type SnakeIDType: PartialEq + Debug + Clone + Send;

    #[allow(missing_docs)]
    fn get_snake_ids(&self) -> Vec<Self::SnakeIDType>;
}

/// A game which can have its winner determined
pub trait VictorDeterminableGame: std::fmt::Debug + SnakeIDGettableGame {
    #[allow(missing_docs)]
    fn is_over(&self) -> bool;

    /// get the winner for a given game, will return None if there is no winner yet
    fn get_winner(&self) -> Option<Self::SnakeIDType>;
}

/// A game for which the head of a snake can be got.
pub trait HeadGettableGame: SnakeIDGettableGame {
    /// get the head position for a given snake id
    fn get_head_position(&self, snake_id: &Self::SnakeIDType) -> Position;
}

/// A game for which the fruit on the board can be queried
pub trait FoodGettableGame: SnakeIDGettableGame {
    /// get all fruit positions on the board
    fn get_all_food_as_positions(&self) -> Vec<Position>;
}

/// A game for which the length of a snake can be got.
pub trait LengthGettableGame: SnakeIDGettableGame {
    /// the length type for this game
    type LengthType: Ord + PartialOrd;

    /// get the target length for a given snake
    fn get_length(&self, snake_id: &Self::SnakeIDType) -> Self::LengthType;

    /// get the target length for a given snake as an i64
    fn get_length_i64(&self, snake_id: &Self::SnakeIDType) -> i64;
}

/// A game for which the health of a snake can be got.
pub trait HealthGettableGame: SnakeIDGettableGame {
    /// the health type for this game
    type HealthType: PartialEq;

    /// A constant that defines what zero health means for the given game
    const ZERO: Self::HealthType;

    /// get the health for a given snake
    fn get_health(&self, snake_id: &Self::SnakeIDType) -> Self::HealthType;

    /// get the health for a given snake as an i64
    fn get_health_i64(&self, snake_id: &Self::SnakeIDType) -> i64;

    /// check whether a given snake has health left
    fn is_alive(&self, snake_id: &Self::SnakeIDType) -> bool {
        self.get_health(snake_id) != Self::ZERO
    }
}

/// A game for which cumulative per-agent scores can be got
pub trait ScoreGettableGame: SnakeIDGettableGame {
    /// the cumulative score for a given snake
    fn get_score(&self, snake_id: &Self::SnakeIDType) -> u32;
}

/// a game for which random reasonable actions for each snake can be determined,
/// e.g. do not run into a wall or a snake
pub trait RandomReasonableMovesGame: SnakeIDGettableGame {
    #[allow(missing_docs)]
    fn random_reasonable_move_for_each_snake(
        &self,
        rng: &mut rand::rngs::SmallRng,
    ) -> Vec<(Self::SnakeIDType, Action)>;
}

/// a game for which the size of the game board can be determined
pub trait SizeDeterminableGame {
    #[allow(missing_docs)]
    fn get_width(&self) -> u32;
    #[allow(missing_docs)]
    fn get_height(&self) -> u32;
}

/// a game for which the current turn is determinable
pub trait TurnDeterminableGame {
    #[allow(missing_docs)]
    fn turn(&self) -> u64;
}

/// A game where an entire snake body is gettable
pub trait SnakeBodyGettableGame: SnakeIDGettableGame {
    /// return a Vec of the positions for a given snake body, in order from head to tail
    fn get_snake_body_vec(&self, snake_id: &Self::SnakeIDType) -> Vec<Position>;
}
