//! 2D grid for the world.

use doodle_core::{CellState, Direction, Error, Position, Result};
use serde::{Deserialize, Serialize};

/// A bounded square grid of cells. Edges do not wrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: i32,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(size: i32) -> Self {
        let side = size.max(0) as usize;
        Self {
            size: size.max(0),
            cells: vec![CellState::Empty; side * side],
        }
    }

    /// Side length of the grid
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Whether `pos` lies inside the grid
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.size && pos.y >= 0 && pos.y < self.size
    }

    /// Get the cell at position
    pub fn get(&self, pos: Position) -> Result<CellState> {
        let index = self.pos_to_index(pos)?;
        Ok(self.cells[index])
    }

    /// Overwrite the cell at position
    pub fn set(&mut self, pos: Position, state: CellState) -> Result<()> {
        let index = self.pos_to_index(pos)?;
        self.cells[index] = state;
        Ok(())
    }

    pub fn is_empty(&self, pos: Position) -> Result<bool> {
        Ok(self.get(pos)?.is_empty())
    }

    /// The cell one step from `pos`, or `None` when it falls off the grid
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let target = pos.step(direction);
        self.contains(target).then_some(target)
    }

    /// Number of cells holding `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// All empty cells in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(pos, _)| pos)
            .collect()
    }

    fn pos_to_index(&self, pos: Position) -> Result<usize> {
        if !self.contains(pos) {
            return Err(Error::OutOfBounds {
                x: pos.x,
                y: pos.y,
                size: self.size,
            });
        }
        let side = self.size as usize;
        Ok(pos.y as usize * side + pos.x as usize)
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let side = self.size.max(1) as usize;
        Position::new((index % side) as i32, (index / side) as i32)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    /// Rows from top (y = 0) to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.size.max(1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(10);
        assert_eq!(grid.size(), 10);
        assert_eq!(grid.cells.len(), 100);
        assert_eq!(grid.count(CellState::Empty), 100);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(5);
        let pos = Position::new(3, 1);

        grid.set(pos, CellState::Predator).unwrap();
        assert_eq!(grid.get(pos).unwrap(), CellState::Predator);
        assert!(!grid.is_empty(pos).unwrap());
        assert_eq!(grid.cells[5 + 3], CellState::Predator);

        grid.set(pos, CellState::Empty).unwrap();
        assert!(grid.is_empty(pos).unwrap());
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut grid = Grid::new(4);

        for pos in [
            Position::new(-1, 0),
            Position::new(0, -1),
            Position::new(4, 0),
            Position::new(0, 4),
        ] {
            assert!(matches!(grid.get(pos), Err(Error::OutOfBounds { .. })));
            assert!(matches!(
                grid.set(pos, CellState::Prey),
                Err(Error::OutOfBounds { size: 4, .. })
            ));
        }

        // Nothing wrapped onto the opposite edge
        assert_eq!(grid.count(CellState::Empty), 16);
    }

    #[test]
    fn test_neighbors_at_corner() {
        let grid = Grid::new(20);
        let corner = Position::new(0, 0);

        assert_eq!(grid.neighbor(corner, Direction::Up), None);
        assert_eq!(grid.neighbor(corner, Direction::Left), None);
        assert_eq!(grid.neighbor(corner, Direction::Down), Some(Position::new(0, 1)));
        assert_eq!(grid.neighbor(corner, Direction::Right), Some(Position::new(1, 0)));

        let far = Position::new(19, 19);
        assert_eq!(grid.neighbor(far, Direction::Down), None);
        assert_eq!(grid.neighbor(far, Direction::Right), None);
    }

    #[test]
    fn test_empty_positions_and_rows() {
        let mut grid = Grid::new(3);
        grid.set(Position::new(1, 0), CellState::Prey).unwrap();
        grid.set(Position::new(2, 2), CellState::Predator).unwrap();

        let empty = grid.empty_positions();
        assert_eq!(empty.len(), 7);
        assert!(!empty.contains(&Position::new(1, 0)));
        assert_eq!(empty[0], Position::new(0, 0));

        let rows: Vec<&[CellState]> = grid.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][1], CellState::Prey);
        assert_eq!(rows[2][2], CellState::Predator);
    }

    #[test]
    fn test_index_round_trip() {
        let grid = Grid::new(7);
        for (i, (pos, _)) in grid.iter().enumerate() {
            assert_eq!(grid.pos_to_index(pos).unwrap(), i);
        }
    }

    #[test]
    fn test_index_math_past_i32_square() {
        // Index math only; no cells are allocated
        let grid = Grid {
            size: 46341,
            cells: Vec::new(),
        };
        let corner = Position::new(46340, 46340);

        let index = grid.pos_to_index(corner).unwrap();
        assert_eq!(index, 46341 * 46341 - 1);
        assert!(index > i32::MAX as usize);
        assert_eq!(grid.index_to_pos(index), corner);
    }
}
