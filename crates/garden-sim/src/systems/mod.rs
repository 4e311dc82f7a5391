//! Systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World`. They do not own state;
//! everything they touch lives in the world. [`advance`] runs them in the
//! fixed phase order.

pub mod attackers;
pub mod cleanup;
pub mod defenders;
pub mod failsafe;
pub mod projectiles;
pub mod snapshot;
pub mod spawn_director;

use hecs::Entity;
use rand::Rng;

use garden_core::components::Attacker;
use garden_core::enums::GameMode;
use garden_core::progression::ProgressionState;

use crate::economy;
use crate::error::TickError;
use crate::world::World;

/// Read-only inputs to a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub progression: &'a ProgressionState,
}

/// What a tick did, for the session state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub spawned: Option<Entity>,
    pub kills: u32,
    /// An attacker got past a spent failsafe.
    pub breached: bool,
    /// Campaign budget exhausted and the field is clear.
    pub wave_cleared: bool,
    /// Wave progress in percent.
    pub wave_progress: f64,
}

/// Run one fixed tick: accrual, spawn, defenders, projectiles, attackers,
/// cleanup. A phase error aborts the rest of the tick.
pub fn advance<R: Rng + ?Sized>(
    world: &mut World,
    ctx: TickContext<'_>,
    rng: &mut R,
) -> Result<TickReport, TickError> {
    let mut despawn_buffer = Vec::new();

    economy::accrue(world, ctx.progression, rng);
    let spawned = spawn_director::run(world, rng);
    defenders::run(world, ctx.progression)?;
    projectiles::run(world, &mut despawn_buffer)?;
    let outcome = attackers::run(world, rng, &mut despawn_buffer)?;
    cleanup::run(world, &mut despawn_buffer);

    let wave_cleared = world.mode == GameMode::Campaign
        && world.director.budget_exhausted()
        && world.ecs.query::<&Attacker>().iter().next().is_none();

    Ok(TickReport {
        spawned,
        kills: outcome.kills,
        breached: outcome.breached,
        wave_cleared,
        wave_progress: world.director.progress(),
    })
}
