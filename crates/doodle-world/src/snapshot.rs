//! Serializable view of a simulation at one tick.

use crate::grid::Grid;
use crate::organism::Organism;
use crate::rng::RandomSource;
use crate::simulation::Simulation;
use doodle_core::{CellState, Error, PopulationCounts, Position, Result};
use serde::{Deserialize, Serialize};

/// Grid rows as symbol strings plus the organism records behind them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub size: i32,
    /// One string per row, top first, using the cell symbols
    pub rows: Vec<String>,
    pub organisms: Vec<Organism>,
    pub population: PopulationCounts,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild the grid described by `rows`
    pub fn to_grid(&self) -> Result<Grid> {
        let mut grid = Grid::new(self.size);

        if self.rows.len() != self.size.max(0) as usize {
            return Err(Error::Serialization(format!(
                "expected {} rows, found {}",
                self.size,
                self.rows.len()
            )));
        }

        for (y, row) in self.rows.iter().enumerate() {
            let symbols: Vec<char> = row.chars().collect();
            if symbols.len() != self.size as usize {
                return Err(Error::Serialization(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    symbols.len(),
                    self.size
                )));
            }

            for (x, symbol) in symbols.into_iter().enumerate() {
                let state = CellState::from_symbol(symbol).ok_or_else(|| {
                    Error::Serialization(format!("unknown cell symbol {:?}", symbol))
                })?;
                grid.set(Position::new(x as i32, y as i32), state)?;
            }
        }

        Ok(grid)
    }
}

impl<R: RandomSource> From<&Simulation<R>> for WorldSnapshot {
    fn from(sim: &Simulation<R>) -> Self {
        let grid = sim.grid();
        Self {
            tick: sim.tick(),
            size: grid.size(),
            rows: grid
                .rows()
                .map(|row| row.iter().map(CellState::symbol).collect())
                .collect(),
            organisms: sim.organisms().to_vec(),
            population: sim.population(),
        }
    }
}

impl<R: RandomSource> Simulation<R> {
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::from(self)
    }
}
