//! Interactive and batch drivers around a simulation.

use crate::display::{render_grid, render_summary};
use anyhow::Result;
use doodle_world::{RandomSource, Simulation, SimulationResult, WorldSnapshot};
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, info};

const PROMPT: &str = "Press enter to continue, enter in any other key to stop: ";

#[derive(Serialize)]
struct BatchReport<'a> {
    snapshot: WorldSnapshot,
    result: &'a SimulationResult,
}

/// Step the world one tick per empty input line.
///
/// Stops on the first non-empty line or at end of input. Returns the number
/// of ticks advanced.
pub fn run_interactive<R, I, W>(sim: &mut Simulation<R>, input: &mut I, out: &mut W) -> Result<u64>
where
    R: RandomSource,
    I: BufRead,
    W: Write,
{
    let mut line = String::new();
    let mut advanced = 0;

    loop {
        writeln!(out, "World at time {}:", sim.tick())?;
        let grid = sim.advance()?;
        advanced += 1;
        render_grid(out, grid)?;
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("Input closed");
            break;
        }
        if !line.trim_end_matches(['\r', '\n']).is_empty() {
            break;
        }
    }

    info!(ticks = advanced, population = sim.population().total(), "Interactive session ended");
    Ok(advanced)
}

/// Run a fixed number of ticks, then print the final grid and summary.
pub fn run_batch<R, W>(sim: &mut Simulation<R>, ticks: u64, json: bool, out: &mut W) -> Result<()>
where
    R: RandomSource,
    W: Write,
{
    let result = sim.run(ticks)?;

    if json {
        let report = BatchReport {
            snapshot: sim.snapshot(),
            result: &result,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "World at time {}:", sim.tick())?;
        render_grid(out, sim.grid())?;
        writeln!(out)?;
        render_summary(out, &result.summary)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doodle_core::{OrganismKind, Position, SimulationConfig, WorldConfig};
    use doodle_world::ScriptedRandom;
    use std::io::Cursor;

    fn lone_prey() -> Simulation<ScriptedRandom> {
        let config = SimulationConfig {
            world: WorldConfig { size: 2 },
            ..Default::default()
        };
        Simulation::from_placements(
            config,
            ScriptedRandom::constant(0),
            [(OrganismKind::Prey, Position::new(0, 1))],
        )
        .unwrap()
    }

    #[test]
    fn test_interactive_steps_until_other_key() {
        let mut sim = lone_prey();
        let mut input = Cursor::new("\n\nq\n");
        let mut out = Vec::new();

        let ticks = run_interactive(&mut sim, &mut input, &mut out).unwrap();

        assert_eq!(ticks, 3);
        assert_eq!(sim.tick(), 3);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("World at time 0:\nO  -  \n-  -  \n"));
        assert!(text.contains("World at time 2:"));
        assert_eq!(text.matches(PROMPT).count(), 3);
    }

    #[test]
    fn test_interactive_stops_at_end_of_input() {
        let mut sim = lone_prey();
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        assert_eq!(run_interactive(&mut sim, &mut input, &mut out).unwrap(), 1);
    }

    #[test]
    fn test_batch_text_output() {
        let mut sim = lone_prey();
        let mut out = Vec::new();

        run_batch(&mut sim, 4, false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("World at time 4:"));
        assert!(text.contains("Ticks run:          4"));
    }

    #[test]
    fn test_batch_json_output() {
        let mut sim = lone_prey();
        let mut out = Vec::new();

        run_batch(&mut sim, 2, true, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["snapshot"]["tick"], 2);
        assert_eq!(value["result"]["total_ticks"], 2);
        assert_eq!(value["result"]["final_population"]["prey"], 1);
    }
}
