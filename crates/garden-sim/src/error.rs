//! Error types for tick phases and rejected commands.

use std::fmt;

use hecs::{ComponentError, Entity};
use thiserror::Error;

use garden_core::enums::{DefenderKind, SessionState, Tool};
use garden_core::types::Cell;

/// Tick phase that can fail, for error reporting. Accrual, spawning and
/// cleanup never look up a missing component and cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Defenders,
    Projectiles,
    Attackers,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Defenders => "defenders",
            Phase::Projectiles => "projectiles",
            Phase::Attackers => "attackers",
        };
        f.write_str(name)
    }
}

/// A tick phase hit an inconsistent world. Effects applied by earlier phases
/// of the same tick are kept.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("{phase}: entity {entity:?} lost a component mid-tick: {source}")]
    Component {
        phase: Phase,
        entity: Entity,
        #[source]
        source: ComponentError,
    },
    #[error("{phase}: no failsafe for lane {lane}")]
    NoFailsafe { phase: Phase, lane: i32 },
    #[error("{phase}: entity {entity:?} has a non-finite position")]
    NonFinite { phase: Phase, entity: Entity },
}

impl TickError {
    pub fn phase(&self) -> Phase {
        match self {
            TickError::Component { phase, .. }
            | TickError::NoFailsafe { phase, .. }
            | TickError::NonFinite { phase, .. } => *phase,
        }
    }
}

/// Attach phase and entity to a hecs component lookup failure.
pub(crate) trait PhaseContext<T> {
    fn in_phase(self, phase: Phase, entity: Entity) -> Result<T, TickError>;
}

impl<T> PhaseContext<T> for Result<T, ComponentError> {
    fn in_phase(self, phase: Phase, entity: Entity) -> Result<T, TickError> {
        self.map_err(|source| TickError::Component {
            phase,
            entity,
            source,
        })
    }
}

/// Why a player command was not applied. Rejections leave the world untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("session is {0:?}, not playing")]
    NotPlaying(SessionState),
    #[error("cannot go from {from:?} to {to:?}")]
    InvalidTransition {
        from: SessionState,
        to: SessionState,
    },
    #[error("{0:?} is locked")]
    Locked(DefenderKind),
    #[error("cell {0:?} is off the field")]
    OutOfBounds(Cell),
    #[error("cell {0:?} is occupied")]
    Occupied(Cell),
    #[error("need {cost} sun, have {balance}")]
    InsufficientSun { cost: u32, balance: u32 },
    #[error("need {cost} coins, have {balance}")]
    InsufficientCoins { cost: u32, balance: u32 },
    #[error("no pickup with id {0}")]
    UnknownPickup(u64),
    #[error("pickup {0} is already being collected")]
    AlreadyCollecting(u64),
    #[error("{tool:?} found nothing at {cell:?}")]
    NothingThere { tool: Tool, cell: Cell },
    #[error("no defender is held")]
    NothingHeld,
    #[error("a defender is already held")]
    AlreadyHolding,
    #[error("hammer cooling down for {remaining_ms} ms")]
    CoolingDown { remaining_ms: u32 },
    #[error("invalid speed multiplier {0}")]
    InvalidSpeed(f64),
}
