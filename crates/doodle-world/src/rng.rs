//! Randomness sources consumed by the simulation.
//!
//! The engine only asks for two kinds of choice: an index into the canonical
//! direction order and a uniform index into a list (used when placing the
//! initial population). Every call advances the source, so the order of
//! calls is part of what makes a run reproducible.

use doodle_core::DIRECTION_COUNT;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of random choices for the engine
pub trait RandomSource {
    /// Index into the canonical direction order, in `0..4`
    fn next_direction_index(&mut self) -> usize;

    /// Uniform index in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_direction_index(&mut self) -> usize {
        (**self).next_direction_index()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// ChaCha8-backed source seeded from a `u64`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_direction_index(&mut self) -> usize {
        self.rng.gen_range(0..DIRECTION_COUNT)
    }

    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Replays a fixed sequence of values, cycling when it runs out.
///
/// Each value is reduced modulo the requested range, so a script of
/// direction indices can also drive placement.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<usize>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always produce the same value
    pub fn constant(value: usize) -> Self {
        Self::new(vec![value])
    }

    /// Number of values consumed so far
    pub fn draws(&self) -> usize {
        self.cursor
    }

    fn next_value(&mut self) -> usize {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl RandomSource for ScriptedRandom {
    fn next_direction_index(&mut self) -> usize {
        self.next_value() % DIRECTION_COUNT
    }

    fn next_index(&mut self, bound: usize) -> usize {
        self.next_value() % bound
    }
}
