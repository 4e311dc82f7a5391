//! Fundamental grid and simulation time types.

use serde::{Deserialize, Serialize};

use crate::constants::{GRID_COLUMNS, GRID_LANES, TICK_MS};

/// A plantable grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub lane: i32,
    pub column: i32,
}

impl Cell {
    pub fn new(lane: i32, column: i32) -> Self {
        Self { lane, column }
    }

    /// Whether the cell lies on the field.
    pub fn in_bounds(&self) -> bool {
        (0..GRID_LANES).contains(&self.lane) && (0..GRID_COLUMNS).contains(&self.column)
    }

    /// Column as a continuous coordinate, for distance checks against attackers.
    pub fn x(&self) -> f64 {
        f64::from(self.column)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: u64,
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_ms += u64::from(TICK_MS);
    }
}
