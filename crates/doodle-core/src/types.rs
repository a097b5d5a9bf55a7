//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an organism instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrganismId(pub u64);

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 2D position in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn add(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Position one step away in `direction`. No bounds are applied.
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.to_delta();
        self.add(dx, dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Number of orthogonal directions an organism can look or move in.
pub const DIRECTION_COUNT: usize = 4;

/// Orthogonal movement direction.
///
/// The declaration order is the canonical scan order used for every
/// "first available neighbor" tie-break: up, down, left, right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in canonical order.
    pub const CANONICAL: [Direction; DIRECTION_COUNT] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction at `index` in canonical order, taken modulo four.
    pub fn from_index(index: usize) -> Direction {
        Self::CANONICAL[index % DIRECTION_COUNT]
    }
}

/// The two kinds of organism that live on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrganismKind {
    /// Doodlebug: eats adjacent prey and starves without it
    Predator,
    /// Ant: wanders at random
    Prey,
}

impl OrganismKind {
    /// Cell marker written for an organism of this kind.
    pub fn cell_state(&self) -> CellState {
        match self {
            OrganismKind::Predator => CellState::Predator,
            OrganismKind::Prey => CellState::Prey,
        }
    }
}

impl fmt::Display for OrganismKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrganismKind::Predator => write!(f, "predator"),
            OrganismKind::Prey => write!(f, "prey"),
        }
    }
}

/// Contents of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Prey,
    Predator,
}

impl CellState {
    /// Character used when printing the grid.
    pub fn symbol(&self) -> char {
        match self {
            CellState::Empty => '-',
            CellState::Prey => 'O',
            CellState::Predator => 'X',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<CellState> {
        match symbol {
            '-' => Some(CellState::Empty),
            'O' => Some(CellState::Prey),
            'X' => Some(CellState::Predator),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == CellState::Empty
    }
}
