//! Excursion Store
//!
//! Append-only histories of excursion magnitudes. The store is cleared and
//! rebuilt at the start of every analysis pass.

use super::direction::Direction;

/// Which history to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    All,
    Up,
    Down,
}

/// Chronological magnitude histories: combined and per direction
#[derive(Debug, Clone, Default)]
pub struct ExcursionStore {
    all: Vec<f64>,
    up: Vec<f64>,
    down: Vec<f64>,
}

impl ExcursionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.all.clear();
        self.up.clear();
        self.down.clear();
    }

    /// Append a magnitude to its directional history and the combined one
    pub fn append(&mut self, direction: Direction, magnitude: f64) {
        self.all.push(magnitude);
        match direction {
            Direction::Up => self.up.push(magnitude),
            Direction::Down => self.down.push(magnitude),
        }
    }

    /// Last `count` entries of a history; all of them when `count` is 0 or
    /// not smaller than the history length
    pub fn tail(&self, sequence: Sequence, count: usize) -> &[f64] {
        let values = self.sequence(sequence);
        if count == 0 || count >= values.len() {
            values
        } else {
            &values[values.len() - count..]
        }
    }

    pub fn sequence(&self, sequence: Sequence) -> &[f64] {
        match sequence {
            Sequence::All => &self.all,
            Sequence::Up => &self.up,
            Sequence::Down => &self.down,
        }
    }

    pub fn len(&self, sequence: Sequence) -> usize {
        self.sequence(sequence).len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
