//! Per-organism turn logic.
//!
//! Each phase takes the grid explicitly and keeps it in step with the
//! organism's position: a cell is cleared and its target written before the
//! organism's coordinates change. Record bookkeeping (removing eaten prey,
//! inserting offspring, dropping starved predators) is left to the engine,
//! which acts on the returned outcomes.

use crate::grid::Grid;
use crate::organism::{Organism, Role};
use crate::rng::RandomSource;
use doodle_core::{
    BreedingMode, CellState, Direction, OrganismKind, Position, PreyBreedMark, Result, RuleConfig,
};

/// Result of the act phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActOutcome {
    /// Predator moved onto the prey that occupied `prey_at`
    Ate { prey_at: Position },
    Moved { to: Position },
    Stayed,
}

/// Result of the breed phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreedOutcome {
    NotReady,
    /// Ready to breed but every neighbor was occupied or off the grid
    NoRoom,
    /// Parent moved into the free neighbor
    Relocated { to: Position },
    /// The free neighbor now holds a new organism of `kind` that the engine
    /// must register
    Spawned { kind: OrganismKind, at: Position },
}

/// Run the act phase for either kind.
pub fn act<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    organism: &mut Organism,
    rng: &mut R,
    rules: &RuleConfig,
) -> Result<ActOutcome> {
    match organism.role {
        Role::Predator { .. } => act_predator(grid, organism, rng, rules),
        Role::Prey => act_prey(grid, organism, rng, rules),
    }
}

/// Eat the first adjacent prey in canonical order, otherwise wander.
pub fn act_predator<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    organism: &mut Organism,
    rng: &mut R,
    rules: &RuleConfig,
) -> Result<ActOutcome> {
    let mut outcome = ActOutcome::Stayed;

    for direction in Direction::CANONICAL {
        let Some(target) = grid.neighbor(organism.position, direction) else {
            continue;
        };
        if grid.get(target)? == CellState::Prey {
            relocate(grid, organism, target, CellState::Predator)?;
            outcome = ActOutcome::Ate { prey_at: target };
            break;
        }
    }

    if outcome == ActOutcome::Stayed {
        for _ in 0..rules.predator_move_attempts {
            let direction = Direction::from_index(rng.next_direction_index());
            if let Some(target) = open_neighbor(grid, organism.position, direction)? {
                relocate(grid, organism, target, CellState::Predator)?;
                outcome = ActOutcome::Moved { to: target };
                break;
            }
        }
    }

    organism.record_meal(matches!(outcome, ActOutcome::Ate { .. }));
    organism.move_counter += 1;

    Ok(outcome)
}

/// Random walk with a bounded number of attempts. Every attempt counts
/// toward the breeding counter, successful or not.
pub fn act_prey<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    organism: &mut Organism,
    rng: &mut R,
    rules: &RuleConfig,
) -> Result<ActOutcome> {
    for _ in 0..rules.prey_move_attempts {
        organism.move_counter += 1;

        let direction = Direction::from_index(rng.next_direction_index());
        if let Some(target) = open_neighbor(grid, organism.position, direction)? {
            relocate(grid, organism, target, CellState::Prey)?;
            return Ok(ActOutcome::Moved { to: target });
        }
    }

    Ok(ActOutcome::Stayed)
}

/// Breed when the move counter equals the kind's breeding age exactly.
pub fn breed(grid: &mut Grid, organism: &mut Organism, rules: &RuleConfig) -> Result<BreedOutcome> {
    let (breed_age, relocation_mark) = match organism.role {
        Role::Predator { .. } => (rules.predator_breed_age, CellState::Predator),
        Role::Prey => {
            let mark = match rules.prey_breed_mark {
                PreyBreedMark::Predator => CellState::Predator,
                PreyBreedMark::Prey => CellState::Prey,
            };
            (rules.prey_breed_age, mark)
        }
    };

    if organism.move_counter != breed_age {
        return Ok(BreedOutcome::NotReady);
    }

    let Some(target) = first_open_neighbor(grid, organism.position)? else {
        return Ok(BreedOutcome::NoRoom);
    };

    match rules.breeding {
        BreedingMode::Relocate => {
            relocate(grid, organism, target, relocation_mark)?;
            Ok(BreedOutcome::Relocated { to: target })
        }
        BreedingMode::Spawn => {
            let kind = organism.kind();
            grid.set(target, kind.cell_state())?;
            organism.move_counter = 0;
            Ok(BreedOutcome::Spawned { kind, at: target })
        }
    }
}

/// Clear the cell of a predator that has gone hungry too long. Returns true
/// when the engine should drop the record.
pub fn starve(grid: &mut Grid, organism: &Organism, rules: &RuleConfig) -> Result<bool> {
    if organism.is_starved(rules.starve_limit) {
        grid.set(organism.position, CellState::Empty)?;
        return Ok(true);
    }
    Ok(false)
}

/// First empty in-bounds neighbor in canonical order
pub fn first_open_neighbor(grid: &Grid, pos: Position) -> Result<Option<Position>> {
    for direction in Direction::CANONICAL {
        if let Some(target) = open_neighbor(grid, pos, direction)? {
            return Ok(Some(target));
        }
    }
    Ok(None)
}

fn open_neighbor(grid: &Grid, pos: Position, direction: Direction) -> Result<Option<Position>> {
    match grid.neighbor(pos, direction) {
        Some(target) if grid.is_empty(target)? => Ok(Some(target)),
        _ => Ok(None),
    }
}

fn relocate(grid: &mut Grid, organism: &mut Organism, target: Position, mark: CellState) -> Result<()> {
    grid.set(organism.position, CellState::Empty)?;
    grid.set(target, mark)?;
    organism.move_to(target);
    Ok(())
}
