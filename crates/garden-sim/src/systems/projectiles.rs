//! Projectile phase: empowerment, flight and hit resolution.

use glam::DVec2;
use hecs::Entity;

use garden_core::catalog::{self, Behavior};
use garden_core::components::*;
use garden_core::constants::*;
use garden_core::enums::{MarkerKind, StatusEffect};
use garden_core::types::Cell;

use crate::error::{Phase, PhaseContext, TickError};
use crate::world::World;

const PHASE: Phase = Phase::Projectiles;

/// Advance every projectile one tick.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> Result<(), TickError> {
    despawn_buffer.clear();

    let buffs: Vec<Cell> = world
        .ecs
        .query::<(&Defender, &Cell, &Health)>()
        .iter()
        .filter(|(_, (defender, _, health))| {
            health.current > 0.0
                && matches!(catalog::defender(defender.kind).behavior, Behavior::PassiveBuff)
        })
        .map(|(_, (_, cell, _))| *cell)
        .collect();

    let projectiles: Vec<Entity> = world
        .ecs
        .query::<&Projectile>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();

    for entity in projectiles {
        let mut projectile = world
            .ecs
            .get::<&Projectile>(entity)
            .map(|component| (*component).clone())
            .in_phase(PHASE, entity)?;
        if !projectile.position.is_finite() {
            return Err(TickError::NonFinite {
                phase: PHASE,
                entity,
            });
        }

        empower(&mut projectile, &buffs);

        let spent = match projectile.flight {
            Flight::Lobbed {
                target,
                progress,
                blast_radius,
            } => {
                let progress = progress + LOB_PROGRESS_STEP;
                projectile.velocity =
                    DVec2::new((target.x - projectile.position.x) * LOB_BLEND, 0.0);
                projectile.position += projectile.velocity;
                projectile.flight = Flight::Lobbed {
                    target,
                    progress,
                    blast_radius,
                };
                if progress >= 1.0 {
                    world.area_damage(
                        projectile.lane,
                        target.x,
                        blast_radius,
                        projectile.damage,
                    );
                    true
                } else {
                    false
                }
            }
            Flight::Straight => {
                projectile.position += projectile.velocity;
                strike(world, &projectile)? || out_of_bounds(&projectile)
            }
        };

        if spent {
            despawn_buffer.push(entity);
        } else {
            *world
                .ecs
                .get::<&mut Projectile>(entity)
                .in_phase(PHASE, entity)? = projectile;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.ecs.despawn(entity);
    }
    Ok(())
}

/// Double a plain projectile's damage once when it passes a buff defender in
/// its current lane.
fn empower(projectile: &mut Projectile, buffs: &[Cell]) {
    if projectile.empowered
        || projectile.effect.is_some()
        || matches!(projectile.flight, Flight::Lobbed { .. })
    {
        return;
    }
    let lane = projectile.position.y.round() as i32;
    let passing = buffs
        .iter()
        .any(|cell| cell.lane == lane && (cell.x() - projectile.position.x).abs() < BUFF_REACH);
    if passing {
        projectile.damage *= 2.0;
        projectile.empowered = true;
    }
}

/// Hit the first live attacker under the projectile. Returns whether it hit.
fn strike(world: &mut World, projectile: &Projectile) -> Result<bool, TickError> {
    let position = projectile.position;
    let hit = world
        .ecs
        .query::<(&Attacker, &Health)>()
        .iter()
        .find(|(_, (attacker, health))| {
            health.current > 0.0
                && (f64::from(attacker.lane) - position.y).abs() < HIT_LANE_TOLERANCE
                && (attacker.column - position.x).abs() < HIT_COLUMN_TOLERANCE
        })
        .map(|(entity, (attacker, _))| (entity, attacker.lane, attacker.column));
    let Some((target, lane, column)) = hit else {
        return Ok(false);
    };

    world
        .ecs
        .get::<&mut Health>(target)
        .in_phase(PHASE, target)?
        .current -= projectile.damage;

    let marker = match projectile.effect {
        Some(StatusEffect::Slow) => {
            world
                .ecs
                .get::<&mut Attacker>(target)
                .in_phase(PHASE, target)?
                .freeze_ms = SLOW_FREEZE_MS;
            MarkerKind::SlowHit
        }
        None if projectile.empowered => MarkerKind::EmpoweredHit,
        None => MarkerKind::Hit,
    };
    world.mark(marker, f64::from(lane), column);
    Ok(true)
}

fn out_of_bounds(projectile: &Projectile) -> bool {
    let p = projectile.position;
    !(p.x > -1.0 && p.x < f64::from(GRID_COLUMNS) && p.y > -1.0 && p.y < f64::from(GRID_LANES))
}
