//! Defender phase: every placed defender resolves its behavior variant.

use glam::DVec2;
use hecs::Entity;

use garden_core::catalog::{self, Behavior, FirePattern, InstantEffect};
use garden_core::components::*;
use garden_core::constants::*;
use garden_core::enums::*;
use garden_core::progression::{scale, ProgressionState, StatKind};
use garden_core::types::Cell;

use crate::error::{Phase, PhaseContext, TickError};
use crate::world::World;

const PHASE: Phase = Phase::Defenders;

/// A defender's stats after upgrade scaling.
#[derive(Debug, Clone, Copy)]
struct Stats {
    damage: f64,
    interval_ms: u32,
}

/// Run every live, placed defender once.
pub fn run(world: &mut World, progression: &ProgressionState) -> Result<(), TickError> {
    let defenders: Vec<(Entity, DefenderKind, Cell)> = world
        .ecs
        .query::<(&Defender, &Cell, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| health.current > 0.0)
        .map(|(entity, (defender, cell, _))| (entity, defender.kind, *cell))
        .collect();

    for (entity, kind, cell) in defenders {
        let archetype = catalog::defender(kind);
        let level = progression.level_of(kind);
        let stats = Stats {
            damage: f64::from(scale(archetype.base_damage, level, StatKind::Damage)),
            interval_ms: scale(archetype.action_interval_ms, level, StatKind::Cooldown),
        };

        match archetype.behavior {
            Behavior::Blocker | Behavior::PassiveBuff => {}
            Behavior::Shooter { pattern, effect } => {
                shoot(world, entity, kind, cell, stats, pattern, effect)?
            }
            Behavior::Producer { sun_value } => produce(world, entity, cell, stats, sun_value)?,
            Behavior::Disarm {
                lane_reach,
                column_reach,
                health_cap,
            } => disarm(world, entity, cell, stats, lane_reach, column_reach, health_cap)?,
            Behavior::LaneClear => clear_lane(world, entity, cell, stats)?,
            Behavior::Melee { reach, windup_ms } => {
                crush(world, entity, cell, stats, reach, windup_ms)?
            }
            Behavior::Instant(effect) => detonate(world, entity, cell, stats, effect)?,
            Behavior::Trap {
                trigger_reach,
                blast_radius,
            } => trap(world, entity, cell, stats, trigger_reach, blast_radius)?,
        }
    }
    Ok(())
}

/// Accrue one tick on the action timer and return the new value.
fn accrue(world: &mut World, entity: Entity) -> Result<u32, TickError> {
    let mut defender = world.ecs.get::<&mut Defender>(entity).in_phase(PHASE, entity)?;
    defender.action_timer_ms += TICK_MS;
    Ok(defender.action_timer_ms)
}

fn reset(world: &mut World, entity: Entity) -> Result<(), TickError> {
    world
        .ecs
        .get::<&mut Defender>(entity)
        .in_phase(PHASE, entity)?
        .action_timer_ms = 0;
    Ok(())
}

/// Single-use defenders zero their health and are removed by cleanup.
fn consume(world: &mut World, entity: Entity) -> Result<(), TickError> {
    world
        .ecs
        .get::<&mut Health>(entity)
        .in_phase(PHASE, entity)?
        .current = 0.0;
    Ok(())
}

/// Live attackers in a lane as (entity, column).
fn lane_attackers(world: &World, lane: i32) -> Vec<(Entity, f64)> {
    world
        .ecs
        .query::<(&Attacker, &Health)>()
        .iter()
        .filter(|(_, (attacker, health))| attacker.lane == lane && health.current > 0.0)
        .map(|(entity, (attacker, _))| (entity, attacker.column))
        .collect()
}

fn hurt(world: &mut World, entity: Entity, damage: f64) -> Result<(), TickError> {
    world
        .ecs
        .get::<&mut Health>(entity)
        .in_phase(PHASE, entity)?
        .current -= damage;
    Ok(())
}

fn shoot(
    world: &mut World,
    entity: Entity,
    kind: DefenderKind,
    cell: Cell,
    stats: Stats,
    pattern: FirePattern,
    effect: Option<StatusEffect>,
) -> Result<(), TickError> {
    let timer = accrue(world, entity)?;
    let in_lane = lane_attackers(world, cell.lane);
    let has_target = match pattern {
        FirePattern::Straight { .. } | FirePattern::ThreeLane => {
            in_lane.iter().any(|&(_, column)| column > cell.x())
        }
        FirePattern::Lobbed { .. } => !in_lane.is_empty(),
        FirePattern::Star => world
            .ecs
            .query::<(&Attacker, &Health)>()
            .iter()
            .any(|(_, (_, health))| health.current > 0.0),
    };
    if !has_target || timer < stats.interval_ms {
        return Ok(());
    }

    let lane = f64::from(cell.lane);
    let straight = |lane: i32, x: f64, velocity: DVec2| Projectile {
        source: kind,
        lane,
        position: DVec2::new(x, f64::from(lane)),
        velocity,
        damage: stats.damage,
        effect,
        flight: Flight::Straight,
        empowered: false,
    };

    match pattern {
        FirePattern::Straight { shots } => {
            for i in 0..shots {
                let x = cell.x() + 0.6 + 0.2 * f64::from(i);
                world.spawn_projectile(straight(cell.lane, x, DVec2::new(PEA_SPEED, 0.0)));
            }
        }
        FirePattern::ThreeLane => {
            for target in [cell.lane - 1, cell.lane, cell.lane + 1] {
                if (0..GRID_LANES).contains(&target) {
                    world.spawn_projectile(straight(
                        target,
                        cell.x() + 0.6,
                        DVec2::new(PEA_SPEED, 0.0),
                    ));
                }
            }
        }
        FirePattern::Star => {
            const DIRECTIONS: [(f64, f64); 5] =
                [(1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.5, -0.5), (0.5, 0.5)];
            for (dx, dy) in DIRECTIONS {
                world.spawn_projectile(straight(
                    cell.lane,
                    cell.x() + 0.5,
                    DVec2::new(dx, dy) * STAR_SPEED,
                ));
            }
        }
        FirePattern::Lobbed { blast_radius } => {
            // Farthest attacker in the lane.
            let aim = in_lane
                .iter()
                .map(|&(_, column)| column)
                .fold(f64::NEG_INFINITY, f64::max);
            world.spawn_projectile(Projectile {
                source: kind,
                lane: cell.lane,
                position: DVec2::new(cell.x() + 0.5, lane),
                velocity: DVec2::ZERO,
                damage: stats.damage,
                effect,
                flight: Flight::Lobbed {
                    target: DVec2::new(aim, lane),
                    progress: 0.0,
                    blast_radius,
                },
                empowered: false,
            });
        }
    }
    reset(world, entity)
}

fn produce(
    world: &mut World,
    entity: Entity,
    cell: Cell,
    stats: Stats,
    sun_value: u32,
) -> Result<(), TickError> {
    if accrue(world, entity)? < stats.interval_ms {
        return Ok(());
    }
    let position = DVec2::new(cell.x() * 11.0 + 2.0, f64::from(cell.lane) * 20.0 + 2.0);
    world.spawn_pickup(Currency::Sun, position, sun_value);
    reset(world, entity)
}

fn disarm(
    world: &mut World,
    entity: Entity,
    cell: Cell,
    stats: Stats,
    lane_reach: i32,
    column_reach: f64,
    health_cap: f64,
) -> Result<(), TickError> {
    if accrue(world, entity)? < stats.interval_ms {
        return Ok(());
    }
    let stripped = world
        .ecs
        .query_mut::<(&mut Attacker, &mut Health)>()
        .into_iter()
        .find(|(_, (attacker, health))| {
            attacker.armored
                && health.current > 0.0
                && (attacker.lane - cell.lane).abs() <= lane_reach
                && (attacker.column - cell.x()).abs() <= column_reach
        })
        .map(|(_, (attacker, health))| {
            attacker.armored = false;
            health.current = health.current.min(health_cap);
            health.max = health.max.min(health_cap);
        });
    if stripped.is_none() {
        return Ok(());
    }
    world.mark(MarkerKind::Disarm, f64::from(cell.lane), cell.x());
    reset(world, entity)
}

fn clear_lane(world: &mut World, entity: Entity, cell: Cell, stats: Stats) -> Result<(), TickError> {
    if accrue(world, entity)? < stats.interval_ms {
        return Ok(());
    }
    for (target, _) in lane_attackers(world, cell.lane) {
        hurt(world, target, stats.damage)?;
    }
    for column in 0..GRID_COLUMNS {
        world.mark(MarkerKind::Explosion, f64::from(cell.lane), f64::from(column));
    }
    consume(world, entity)
}

fn crush(
    world: &mut World,
    entity: Entity,
    cell: Cell,
    stats: Stats,
    reach: f64,
    windup_ms: u32,
) -> Result<(), TickError> {
    let prey = lane_attackers(world, cell.lane)
        .into_iter()
        .find(|&(_, column)| (column - cell.x()).abs() < reach);
    let Some((prey, column)) = prey else {
        return Ok(());
    };
    if accrue(world, entity)? <= windup_ms {
        return Ok(());
    }
    hurt(world, prey, stats.damage)?;
    world.mark(MarkerKind::Smash, f64::from(cell.lane), column);
    consume(world, entity)
}

fn detonate(
    world: &mut World,
    entity: Entity,
    cell: Cell,
    stats: Stats,
    effect: InstantEffect,
) -> Result<(), TickError> {
    if accrue(world, entity)? < stats.interval_ms {
        return Ok(());
    }
    match effect {
        InstantEffect::Explode { radius } => {
            world.area_damage(cell.lane, cell.x(), radius, stats.damage);
        }
        InstantEffect::GlobalFreeze { duration_ms } => {
            for (_, attacker) in world.ecs.query_mut::<&mut Attacker>() {
                attacker.freeze_ms = duration_ms;
            }
            world.mark(
                MarkerKind::Freeze,
                f64::from(GRID_LANES / 2),
                f64::from(GRID_COLUMNS / 2),
            );
        }
    }
    consume(world, entity)
}

fn trap(
    world: &mut World,
    entity: Entity,
    cell: Cell,
    stats: Stats,
    trigger_reach: f64,
    blast_radius: f64,
) -> Result<(), TickError> {
    let state = world
        .ecs
        .get::<&Defender>(entity)
        .in_phase(PHASE, entity)?
        .trap;
    match state {
        TrapState::Unarmed => {
            if accrue(world, entity)? >= stats.interval_ms {
                world
                    .ecs
                    .get::<&mut Defender>(entity)
                    .in_phase(PHASE, entity)?
                    .trap = TrapState::Armed;
            }
            Ok(())
        }
        TrapState::Armed => {
            let triggered = lane_attackers(world, cell.lane)
                .iter()
                .any(|&(_, column)| (column - cell.x()).abs() < trigger_reach);
            if !triggered {
                return Ok(());
            }
            world.area_damage(cell.lane, cell.x(), blast_radius, stats.damage);
            consume(world, entity)
        }
    }
}
