//! World simulation engine.
//!
//! This module implements the bounded 2D grid where predators hunt, prey
//! wander, and both breed and die by fixed local rules applied once per tick.

pub mod behavior;
pub mod grid;
pub mod organism;
pub mod rng;
pub mod simulation;
pub mod snapshot;

pub use grid::Grid;
pub use organism::{Organism, Role};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use simulation::{Simulation, SimulationResult};
pub use snapshot::WorldSnapshot;
