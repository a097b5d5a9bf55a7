//! Population statistics collected while the simulation runs.

use serde::{Deserialize, Serialize};

/// Live organism counts by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub predators: usize,
    pub prey: usize,
}

impl PopulationCounts {
    pub fn total(&self) -> usize {
        self.predators + self.prey
    }
}

/// What happened during a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number after the tick completed (first tick reports 1)
    pub tick: u64,
    /// Organisms that changed cell during the act phase, eating included
    pub moves: u32,
    pub prey_eaten: u32,
    pub predators_starved: u32,
    pub breedings: u32,
    /// Population at the end of the tick
    pub population: PopulationCounts,
}

/// Aggregate over every tick of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub total_moves: u64,
    pub total_prey_eaten: u64,
    pub total_predators_starved: u64,
    pub total_breedings: u64,
    pub peak_predators: usize,
    pub peak_prey: usize,
    /// First tick that ended with no predators left
    pub predator_extinction_tick: Option<u64>,
    /// First tick that ended with no prey left
    pub prey_extinction_tick: Option<u64>,
}

impl RunSummary {
    /// Start a summary from the population present before the first tick.
    pub fn new(initial: PopulationCounts) -> Self {
        Self {
            peak_predators: initial.predators,
            peak_prey: initial.prey,
            ..Default::default()
        }
    }

    /// Fold one tick report into the summary
    pub fn update(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.total_moves += report.moves as u64;
        self.total_prey_eaten += report.prey_eaten as u64;
        self.total_predators_starved += report.predators_starved as u64;
        self.total_breedings += report.breedings as u64;

        self.peak_predators = self.peak_predators.max(report.population.predators);
        self.peak_prey = self.peak_prey.max(report.population.prey);

        if report.population.predators == 0 && self.predator_extinction_tick.is_none() {
            self.predator_extinction_tick = Some(report.tick);
        }
        if report.population.prey == 0 && self.prey_extinction_tick.is_none() {
            self.prey_extinction_tick = Some(report.tick);
        }
    }
}
