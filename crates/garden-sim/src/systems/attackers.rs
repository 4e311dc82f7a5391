//! Attacker phase: failsafe sweep, freeze, eat-or-walk and kill drops.

use glam::DVec2;
use hecs::Entity;
use rand::Rng;

use garden_core::catalog;
use garden_core::components::*;
use garden_core::constants::*;
use garden_core::enums::Currency;
use garden_core::types::Cell;

use crate::error::{Phase, PhaseContext, TickError};
use crate::systems::failsafe::{self, Breach};
use crate::world::World;

const PHASE: Phase = Phase::Attackers;

/// Result of the attacker phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackerOutcome {
    /// An attacker passed a lane whose failsafe was already spent.
    pub breached: bool,
    pub kills: u32,
}

/// Move, feed and retire every attacker.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    despawn_buffer: &mut Vec<Entity>,
) -> Result<AttackerOutcome, TickError> {
    despawn_buffer.clear();
    failsafe::sweep(world);

    let edible: Vec<(Entity, Cell)> = world
        .ecs
        .query::<(&Defender, &Cell)>()
        .iter()
        .filter(|(_, (defender, _))| catalog::defender(defender.kind).is_edible())
        .map(|(entity, (_, cell))| (entity, *cell))
        .collect();

    let attackers: Vec<Entity> = world
        .ecs
        .query::<&Attacker>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    let mut outcome = AttackerOutcome::default();
    for entity in attackers {
        let mut attacker = world
            .ecs
            .get::<&Attacker>(entity)
            .map(|component| (*component).clone())
            .in_phase(PHASE, entity)?;
        if !attacker.column.is_finite() {
            return Err(TickError::NonFinite {
                phase: PHASE,
                entity,
            });
        }

        let dead = world
            .ecs
            .get::<&Health>(entity)
            .in_phase(PHASE, entity)?
            .current
            <= 0.0;
        if dead {
            despawn_buffer.push(entity);
            outcome.kills += 1;
            if rng.gen::<f64>() < COIN_DROP_CHANCE {
                let position = DVec2::new(
                    attacker.column * 11.0 + 2.0,
                    f64::from(attacker.lane) * 20.0 + 2.0,
                );
                world.spawn_pickup(Currency::Coin, position, COIN_DROP_VALUE);
            }
            continue;
        }

        attacker.eating = false;
        let mut speed = attacker.speed;
        if attacker.freeze_ms > 0.0 {
            attacker.freeze_ms -= f64::from(TICK_MS);
            speed *= 0.5;
            if attacker.freeze_ms > DEEP_FREEZE_MS {
                speed = 0.0;
            }
        }

        if attacker.column <= DEFENSE_LINE
            && failsafe::breach(world, attacker.lane, attacker.column)? == Breach::Lost
        {
            outcome.breached = true;
        }

        let meal = edible.iter().find(|(defender, cell)| {
            cell.lane == attacker.lane
                && (cell.x() - attacker.column).abs() < EAT_REACH
                && world
                    .ecs
                    .get::<&Health>(*defender)
                    .is_ok_and(|health| health.current > 0.0)
        });
        match meal {
            Some(&(defender, _)) => {
                attacker.eating = true;
                world
                    .ecs
                    .get::<&mut Health>(defender)
                    .in_phase(PHASE, defender)?
                    .current -= attacker.damage * DT;
            }
            None => attacker.column -= speed * DT,
        }

        *world
            .ecs
            .get::<&mut Attacker>(entity)
            .in_phase(PHASE, entity)? = attacker;
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.ecs.despawn(entity);
    }
    Ok(outcome)
}
