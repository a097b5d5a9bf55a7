//! Organism state.

use doodle_core::{OrganismId, OrganismKind, Position};
use serde::{Deserialize, Serialize};

/// Kind-specific state carried alongside the shared counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Predator {
        /// Consecutive ticks without eating
        starve_counter: u32,
    },
    Prey,
}

/// An organism in the simulation.
///
/// The position is the only link to the grid: the organism occupies the cell
/// at `position` and the engine keeps that cell's state in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organism {
    pub id: OrganismId,
    pub position: Position,
    /// Drives breeding: incremented once per tick for predators and once
    /// per movement attempt for prey
    pub move_counter: u32,
    pub role: Role,
}

impl Organism {
    pub fn new(id: OrganismId, kind: OrganismKind, position: Position) -> Self {
        let role = match kind {
            OrganismKind::Predator => Role::Predator { starve_counter: 0 },
            OrganismKind::Prey => Role::Prey,
        };

        Self {
            id,
            position,
            move_counter: 0,
            role,
        }
    }

    pub fn predator(id: OrganismId, position: Position) -> Self {
        Self::new(id, OrganismKind::Predator, position)
    }

    pub fn prey(id: OrganismId, position: Position) -> Self {
        Self::new(id, OrganismKind::Prey, position)
    }

    pub fn kind(&self) -> OrganismKind {
        match self.role {
            Role::Predator { .. } => OrganismKind::Predator,
            Role::Prey => OrganismKind::Prey,
        }
    }

    pub fn is_predator(&self) -> bool {
        matches!(self.role, Role::Predator { .. })
    }

    /// `None` for prey
    pub fn starve_counter(&self) -> Option<u32> {
        match self.role {
            Role::Predator { starve_counter } => Some(starve_counter),
            Role::Prey => None,
        }
    }

    pub fn move_to(&mut self, new_position: Position) {
        self.position = new_position;
    }

    /// Update the starvation counter after the act phase. No-op for prey.
    pub fn record_meal(&mut self, ate: bool) {
        if let Role::Predator { starve_counter } = &mut self.role {
            if ate {
                *starve_counter = 0;
            } else {
                *starve_counter += 1;
            }
        }
    }

    /// Whether a predator has gone hungry for `limit` ticks or more
    pub fn is_starved(&self, limit: u32) -> bool {
        self.starve_counter().is_some_and(|count| count >= limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organism_creation() {
        let predator = Organism::predator(OrganismId(1), Position::new(5, 5));
        assert_eq!(predator.kind(), OrganismKind::Predator);
        assert_eq!(predator.starve_counter(), Some(0));
        assert_eq!(predator.move_counter, 0);
        assert!(predator.is_predator());

        let prey = Organism::prey(OrganismId(2), Position::new(1, 1));
        assert_eq!(prey.kind(), OrganismKind::Prey);
        assert_eq!(prey.starve_counter(), None);
        assert!(!prey.is_predator());
    }

    #[test]
    fn test_starvation_tracking() {
        let mut predator = Organism::predator(OrganismId(1), Position::new(0, 0));

        predator.record_meal(false);
        predator.record_meal(false);
        assert_eq!(predator.starve_counter(), Some(2));
        assert!(!predator.is_starved(3));

        predator.record_meal(false);
        assert!(predator.is_starved(3));

        predator.record_meal(true);
        assert_eq!(predator.starve_counter(), Some(0));
    }

    #[test]
    fn test_prey_never_starves() {
        let mut prey = Organism::prey(OrganismId(1), Position::new(0, 0));
        for _ in 0..10 {
            prey.record_meal(false);
        }
        assert!(!prey.is_starved(3));
    }

    #[test]
    fn test_movement() {
        let mut organism = Organism::prey(OrganismId(3), Position::new(0, 0));
        organism.move_to(Position::new(1, 0));
        assert_eq!(organism.position, Position::new(1, 0));
    }

    #[test]
    fn test_organism_serialization() {
        let organism = Organism::predator(OrganismId(9), Position::new(5, 5));
        let json = serde_json::to_string(&organism).unwrap();
        let restored: Organism = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, organism);
    }
}
