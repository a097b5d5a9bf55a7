//! Text rendering of the grid.

use doodle_core::RunSummary;
use doodle_world::Grid;
use std::io::{self, Write};

/// Write every cell as its symbol followed by two spaces, one row per line.
pub fn render_grid<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    for row in grid.rows() {
        for cell in row {
            write!(out, "{}  ", cell.symbol())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn render_summary<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    writeln!(out, "Ticks run:          {}", summary.ticks)?;
    writeln!(out, "Prey eaten:         {}", summary.total_prey_eaten)?;
    writeln!(out, "Predators starved:  {}", summary.total_predators_starved)?;
    writeln!(out, "Breedings:          {}", summary.total_breedings)?;
    writeln!(out, "Peak predators:     {}", summary.peak_predators)?;
    writeln!(out, "Peak prey:          {}", summary.peak_prey)?;
    if let Some(tick) = summary.predator_extinction_tick {
        writeln!(out, "Predators extinct at tick {}", tick)?;
    }
    if let Some(tick) = summary.prey_extinction_tick {
        writeln!(out, "Prey extinct at tick {}", tick)?;
    }
    Ok(())
}
