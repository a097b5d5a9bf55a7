//! Terminal driver for the doodlebug predator/prey simulation.

mod display;
mod session;
mod telemetry;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use doodle_core::{BreedingMode, PreyBreedMark, SimulationConfig};
use doodle_world::Simulation;
use std::io;
use std::path::PathBuf;
use tracing::info;

/// Cell mark written when a prey breeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PreyMark {
    /// Mark the cell as a predator, as the classic program does
    Predator,
    /// Mark the cell as prey
    Prey,
}

impl From<PreyMark> for PreyBreedMark {
    fn from(mark: PreyMark) -> Self {
        match mark {
            PreyMark::Predator => PreyBreedMark::Predator,
            PreyMark::Prey => PreyBreedMark::Prey,
        }
    }
}

#[derive(Parser)]
#[command(name = "doodlebug")]
#[command(version)]
#[command(about = "Predator/prey cellular automaton: doodlebugs hunt ants on a bounded grid")]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility (drawn at random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Side length of the square grid
    #[arg(long)]
    size: Option<i32>,

    /// Number of predators (doodlebugs) at start
    #[arg(long)]
    predators: Option<usize>,

    /// Number of prey (ants) at start
    #[arg(long)]
    prey: Option<usize>,

    /// Run this many ticks without prompting, then print the result
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Breeding spawns offspring instead of relocating the parent
    #[arg(long)]
    spawn: bool,

    /// Cell mark a breeding prey leaves behind
    #[arg(long, value_enum)]
    prey_mark: Option<PreyMark>,

    /// Print the batch result as JSON
    #[arg(long, requires = "ticks")]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn load_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        // A config file's seed is kept unless overridden; otherwise draw one
        // so the run can be repeated from the logged value
        match self.seed {
            Some(seed) => config.seed = seed,
            None if self.config.is_none() => config.seed = rand::random(),
            None => {}
        }
        if let Some(size) = self.size {
            config.world.size = size;
        }
        if let Some(predators) = self.predators {
            config.population.predators = predators;
        }
        if let Some(prey) = self.prey {
            config.population.prey = prey;
        }
        if let Some(ticks) = self.ticks {
            config.num_ticks = ticks;
        }
        if self.spawn {
            config.rules.breeding = BreedingMode::Spawn;
        }
        if let Some(mark) = self.prey_mark {
            config.rules.prey_breed_mark = mark.into();
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    telemetry::init_telemetry(cli.log_json)?;

    let config = cli.load_config()?;
    info!(
        seed = config.seed,
        size = config.world.size,
        predators = config.population.predators,
        prey = config.population.prey,
        "Starting doodlebug simulation"
    );

    let mut sim = Simulation::new(config)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.ticks {
        Some(_) => {
            let ticks = sim.config().num_ticks;
            session::run_batch(&mut sim, ticks, cli.json, &mut out)?;
        }
        None => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            session::run_interactive(&mut sim, &mut input, &mut out)?;
        }
    }

    Ok(())
}
