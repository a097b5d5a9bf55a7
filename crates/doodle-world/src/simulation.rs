//! Simulation engine driving one grid of predators and prey.

use crate::behavior::{self, ActOutcome, BreedOutcome};
use crate::grid::Grid;
use crate::organism::Organism;
use crate::rng::{RandomSource, SeededRandom};
use doodle_core::{
    BreedingMode, CellState, Error, OrganismId, OrganismKind, PopulationCounts, Position,
    PreyBreedMark, Result, RunSummary, SimulationConfig, TickReport,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, event, info, instrument, trace, Level};

/// Ticks between periodic population log lines
const PROGRESS_INTERVAL: u64 = 100;

pub struct Simulation<R: RandomSource = SeededRandom> {
    grid: Grid,
    /// Turn order. Initial predators come first, then initial prey; records
    /// created later are appended.
    organisms: Vec<Organism>,
    config: SimulationConfig,
    rng: R,
    tick: u64,
    next_id: u64,
    summary: RunSummary,
}

impl Simulation<SeededRandom> {
    /// Create a simulation seeded from `config.seed`
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let rng = SeededRandom::new(config.seed);
        Self::with_rng(config, rng)
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Populate a fresh grid from the configured counts. Each organism lands
    /// on a cell drawn uniformly from the cells still empty.
    pub fn with_rng(config: SimulationConfig, rng: R) -> Result<Self> {
        config.validate()?;

        let mut sim = Self::empty(config, rng);

        for _ in 0..sim.config.population.predators {
            sim.spawn_random(OrganismKind::Predator)?;
        }
        for _ in 0..sim.config.population.prey {
            sim.spawn_random(OrganismKind::Prey)?;
        }

        sim.summary = RunSummary::new(sim.population());

        info!(
            size = sim.grid.size(),
            predators = sim.config.population.predators,
            prey = sim.config.population.prey,
            seed = sim.config.seed,
            "Simulation initialized"
        );

        Ok(sim)
    }

    /// Build a simulation with organisms at fixed positions, in the given
    /// turn order. The population counts in `config` are ignored.
    pub fn from_placements(
        config: SimulationConfig,
        rng: R,
        placements: impl IntoIterator<Item = (OrganismKind, Position)>,
    ) -> Result<Self> {
        config.world.validate()?;

        let placements: Vec<_> = placements.into_iter().collect();
        let capacity = config.world.capacity();
        if placements.len() > capacity {
            return Err(Error::CapacityExceeded {
                requested: placements.len(),
                capacity,
            });
        }

        let mut sim = Self::empty(config, rng);
        for (kind, pos) in placements {
            sim.insert(kind, pos)?;
        }
        sim.summary = RunSummary::new(sim.population());

        Ok(sim)
    }

    fn empty(config: SimulationConfig, rng: R) -> Self {
        Self {
            grid: Grid::new(config.world.size),
            organisms: Vec::new(),
            config,
            rng,
            tick: 0,
            next_id: 0,
            summary: RunSummary::default(),
        }
    }

    /// Advance one tick and return the updated grid
    pub fn advance(&mut self) -> Result<&Grid> {
        self.step()?;
        Ok(&self.grid)
    }

    /// Advance one tick and report what happened
    pub fn step(&mut self) -> Result<TickReport> {
        // Snapshot the turn order so records removed mid-tick are skipped and
        // records created mid-tick wait for the next one
        let order: Vec<OrganismId> = self.organisms.iter().map(|o| o.id).collect();
        let mut report = TickReport::default();

        for id in order {
            self.process_organism(id, &mut report)?;
        }

        self.tick += 1;
        report.tick = self.tick;
        report.population = self.population();
        self.summary.update(&report);

        if self.tick % PROGRESS_INTERVAL == 0 {
            info!(
                tick = self.tick,
                predators = report.population.predators,
                prey = report.population.prey,
                "Population snapshot"
            );
        }

        Ok(report)
    }

    /// Run `num_ticks` ticks and collect the per-tick reports
    #[instrument(skip(self), fields(start_tick = self.tick))]
    pub fn run(&mut self, num_ticks: u64) -> Result<SimulationResult> {
        info!("Starting simulation for {} ticks", num_ticks);

        let mut history = Vec::new();
        for _ in 0..num_ticks {
            history.push(self.step()?);
        }

        self.emit_run_summary();

        Ok(SimulationResult {
            history,
            summary: self.summary.clone(),
            final_population: self.population(),
            total_ticks: self.tick,
        })
    }

    fn process_organism(&mut self, id: OrganismId, report: &mut TickReport) -> Result<()> {
        // Eaten earlier in this tick
        let Some(index) = self.index_of(id) else {
            return Ok(());
        };

        let organism = &mut self.organisms[index];
        let from = organism.position;
        let outcome = behavior::act(&mut self.grid, organism, &mut self.rng, &self.config.rules)?;

        match outcome {
            ActOutcome::Ate { prey_at } => {
                report.moves += 1;
                report.prey_eaten += 1;
                self.remove_eaten(prey_at, id);
                trace!(organism_id = %id, from = %from, to = %prey_at, tick = self.tick, "Predator ate prey");
            }
            ActOutcome::Moved { to } => {
                report.moves += 1;
                trace!(organism_id = %id, from = %from, to = %to, "Organism moved");
            }
            ActOutcome::Stayed => {}
        }

        // Removing the eaten prey may have shifted this record
        let Some(index) = self.index_of(id) else {
            return Ok(());
        };

        let organism = &mut self.organisms[index];
        match behavior::breed(&mut self.grid, organism, &self.config.rules)? {
            BreedOutcome::Relocated { to } => {
                report.breedings += 1;
                debug!(organism_id = %id, kind = %organism.kind(), to = %to, tick = self.tick, "Organism bred by relocating");
            }
            BreedOutcome::Spawned { kind, at } => {
                report.breedings += 1;
                let child = self.register(kind, at);
                debug!(parent_id = %id, child_id = %child, kind = %kind, at = %at, tick = self.tick, "Organism spawned offspring");
            }
            BreedOutcome::NoRoom => {
                trace!(organism_id = %id, "Breeding skipped: no empty neighbor");
            }
            BreedOutcome::NotReady => {}
        }

        if behavior::starve(&mut self.grid, &self.organisms[index], &self.config.rules)? {
            let organism = self.organisms.remove(index);
            report.predators_starved += 1;
            debug!(
                organism_id = %id,
                position = %organism.position,
                move_counter = organism.move_counter,
                tick = self.tick,
                "Predator starved"
            );
        }

        Ok(())
    }

    fn remove_eaten(&mut self, prey_at: Position, eater: OrganismId) {
        if let Some(index) = self
            .organisms
            .iter()
            .position(|o| o.id != eater && o.position == prey_at)
        {
            self.organisms.remove(index);
        }
    }

    fn spawn_random(&mut self, kind: OrganismKind) -> Result<OrganismId> {
        let empty = self.grid.empty_positions();
        if empty.is_empty() {
            return Err(Error::CapacityExceeded {
                requested: self.organisms.len() + 1,
                capacity: self.config.world.capacity(),
            });
        }

        let pos = empty[self.rng.next_index(empty.len())];
        self.insert(kind, pos)
    }

    /// Mark the cell and add a record at the end of the turn order
    fn insert(&mut self, kind: OrganismKind, pos: Position) -> Result<OrganismId> {
        if !self.grid.is_empty(pos)? {
            return Err(Error::Occupied { x: pos.x, y: pos.y });
        }
        self.grid.set(pos, kind.cell_state())?;
        Ok(self.register(kind, pos))
    }

    /// Add a record for a cell that is already marked
    fn register(&mut self, kind: OrganismKind, pos: Position) -> OrganismId {
        let id = OrganismId(self.next_id);
        self.next_id += 1;
        self.organisms.push(Organism::new(id, kind, pos));
        id
    }

    fn index_of(&self, id: OrganismId) -> Option<usize> {
        self.organisms.iter().position(|o| o.id == id)
    }

    fn emit_run_summary(&self) {
        let population = self.population();

        info!(
            event = "run_summary",
            final_tick = self.tick,
            predators = population.predators,
            prey = population.prey,
            total_moves = self.summary.total_moves,
            prey_eaten = self.summary.total_prey_eaten,
            predators_starved = self.summary.total_predators_starved,
            breedings = self.summary.total_breedings,
            peak_predators = self.summary.peak_predators,
            peak_prey = self.summary.peak_prey,
            "Simulation complete"
        );

        if let Some(tick) = self.summary.predator_extinction_tick {
            event!(Level::INFO, extinct = "predators", tick = tick, "Predators died out");
        }
        if let Some(tick) = self.summary.prey_extinction_tick {
            event!(Level::INFO, extinct = "prey", tick = tick, "Prey died out");
        }
    }

    /// Check that grid cells and organism records agree.
    ///
    /// Every record must sit on its own in-bounds cell marked with its kind,
    /// and no marked cell may lack a record. With relocating breeding and the
    /// predator mark for prey, a prey may sit on a predator-marked cell.
    pub fn verify_consistency(&self) -> Result<()> {
        let rules = &self.config.rules;
        let prey_may_wear_predator_mark = rules.breeding == BreedingMode::Relocate
            && rules.prey_breed_mark == PreyBreedMark::Predator;

        let mut seen = HashSet::with_capacity(self.organisms.len());
        for organism in &self.organisms {
            let pos = organism.position;
            let cell = self.grid.get(pos)?;

            if !seen.insert(pos) {
                return Err(Error::InvalidState(format!(
                    "more than one organism at {}",
                    pos
                )));
            }

            let expected = organism.kind().cell_state();
            let tolerated = prey_may_wear_predator_mark
                && organism.kind() == OrganismKind::Prey
                && cell == CellState::Predator;
            if cell != expected && !tolerated {
                return Err(Error::InvalidState(format!(
                    "organism {} ({}) at {} but cell holds {:?}",
                    organism.id,
                    organism.kind(),
                    pos,
                    cell
                )));
            }
        }

        let marked = self.grid.iter().filter(|(_, cell)| !cell.is_empty()).count();
        if marked != self.organisms.len() {
            return Err(Error::InvalidState(format!(
                "{} marked cells for {} organisms",
                marked,
                self.organisms.len()
            )));
        }

        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Live organisms in turn order
    pub fn organisms(&self) -> &[Organism] {
        &self.organisms
    }

    pub fn organism(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.iter().find(|o| o.id == id)
    }

    /// Organism record occupying `pos`, if any
    pub fn organism_at(&self, pos: Position) -> Option<&Organism> {
        self.organisms.iter().find(|o| o.position == pos)
    }

    pub fn population(&self) -> PopulationCounts {
        let predators = self.organisms.iter().filter(|o| o.is_predator()).count();
        PopulationCounts {
            predators,
            prey: self.organisms.len() - predators,
        }
    }

    /// Number of completed ticks
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub history: Vec<TickReport>,
    pub summary: RunSummary,
    pub final_population: PopulationCounts,
    pub total_ticks: u64,
}
