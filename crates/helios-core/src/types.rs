//! Fundamental simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::TIME_QUANTUM_MS;

/// Simulation time tracking.
///
/// The quantum is the wall-clock pacing hint handed to the frame driver;
/// the simulation itself always advances by exactly one tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimClock {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Index into the time-quantum table.
    pub quantum_index: usize,
}

impl SimClock {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    /// Milliseconds the frame driver should wait between ticks.
    pub fn quantum_ms(&self) -> u64 {
        TIME_QUANTUM_MS[self.quantum_index]
    }

    /// Step to the next entry in the quantum table, wrapping around.
    pub fn cycle_quantum(&mut self) {
        self.quantum_index = (self.quantum_index + 1) % TIME_QUANTUM_MS.len();
    }
}
