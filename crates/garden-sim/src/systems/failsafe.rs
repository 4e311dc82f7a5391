//! Lane failsafe: a one-shot device that sweeps its lane clear.

use garden_core::components::{Attacker, Health};
use garden_core::constants::*;
use garden_core::enums::{FailsafeState, MarkerKind};

use crate::error::{Phase, TickError};
use crate::world::World;

/// Advance every running failsafe and kill what it touches.
pub fn sweep(world: &mut World) {
    let mut passes = Vec::new();
    for failsafe in world.failsafes.iter_mut() {
        if failsafe.state != FailsafeState::Running {
            continue;
        }
        failsafe.column += FAILSAFE_SPEED;
        passes.push((failsafe.lane, failsafe.column));
        if failsafe.column > f64::from(GRID_COLUMNS) {
            failsafe.state = FailsafeState::Spent;
            tracing::debug!(lane = failsafe.lane, "failsafe spent");
        }
    }

    for (lane, column) in passes {
        let mut kills = Vec::new();
        for (_, (attacker, health)) in world.ecs.query_mut::<(&Attacker, &mut Health)>() {
            if attacker.lane == lane
                && health.current > 0.0
                && (attacker.column - column).abs() < FAILSAFE_REACH
            {
                health.current = 0.0;
                kills.push(attacker.column);
            }
        }
        for killed in kills {
            world.mark(MarkerKind::Smash, f64::from(lane), killed);
        }
    }
}

/// What happened when an attacker reached the defense line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breach {
    /// The lane's failsafe was ready and is now running.
    Triggered,
    /// The failsafe is already running.
    Held,
    /// The failsafe is spent and the attacker passed the loss line.
    Lost,
    /// The failsafe is spent but the attacker has not reached the loss line yet.
    Pending,
}

/// Respond to an attacker at `column` in `lane` that crossed the defense line.
pub fn breach(world: &mut World, lane: i32, column: f64) -> Result<Breach, TickError> {
    let failsafe = world.failsafe_mut(lane).ok_or(TickError::NoFailsafe {
        phase: Phase::Attackers,
        lane,
    })?;
    Ok(match failsafe.state {
        FailsafeState::Ready => {
            failsafe.state = FailsafeState::Running;
            tracing::info!(lane, "failsafe triggered");
            Breach::Triggered
        }
        FailsafeState::Running => Breach::Held,
        FailsafeState::Spent if column < LOSS_LINE => Breach::Lost,
        FailsafeState::Spent => Breach::Pending,
    })
}
