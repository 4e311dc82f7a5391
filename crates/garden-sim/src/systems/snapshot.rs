//! Snapshot system: queries the world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use garden_core::components::*;
use garden_core::enums::*;
use garden_core::events::GameEvent;
use garden_core::progression::ProgressionState;
use garden_core::state::*;
use garden_core::types::{Cell, SimTime};

use crate::world::{entity_id, World};

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    state: SessionState,
    speed_multiplier: f64,
    progression: &ProgressionState,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        state,
        mode: world.mode,
        level: world.level,
        speed_multiplier,
        sun: world.ledger.sun,
        coins: progression.coins.saturating_add(world.ledger.coins_earned),
        wave_progress: world.director.progress(),
        hammer_cooldown_ms: world.hammer_cooldown_ms,
        auto_collect: world.auto_collect,
        held: world
            .held
            .and_then(|entity| world.ecs.get::<&Defender>(entity).ok().map(|d| d.kind)),
        defenders: build_defenders(world),
        attackers: build_attackers(world),
        projectiles: build_projectiles(world),
        pickups: build_pickups(world),
        markers: build_markers(world),
        failsafes: world
            .failsafes
            .iter()
            .map(|f| FailsafeView {
                lane: f.lane,
                state: f.state,
                column: f.column,
            })
            .collect(),
        progression: progression.clone(),
        events,
    }
}

fn build_defenders(world: &World) -> Vec<DefenderView> {
    let mut views: Vec<DefenderView> = world
        .ecs
        .query::<(&Defender, &Cell, &Health)>()
        .iter()
        .map(|(entity, (defender, cell, health))| DefenderView {
            id: entity_id(entity),
            kind: defender.kind,
            cell: *cell,
            health: health.current.max(0.0),
            max_health: health.max,
            armed: defender.trap == TrapState::Armed,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_attackers(world: &World) -> Vec<AttackerView> {
    let mut views: Vec<AttackerView> = world
        .ecs
        .query::<(&Attacker, &Health)>()
        .iter()
        .map(|(entity, (attacker, health))| AttackerView {
            id: entity_id(entity),
            kind: attacker.kind,
            lane: attacker.lane,
            column: attacker.column,
            health: health.current.max(0.0),
            max_health: health.max,
            eating: attacker.eating,
            frozen: attacker.freeze_ms > 0.0,
            armored: attacker.armored,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .ecs
        .query::<&Projectile>()
        .iter()
        .map(|(entity, projectile)| ProjectileView {
            id: entity_id(entity),
            source: projectile.source,
            position: projectile.position,
            lobbed: matches!(projectile.flight, Flight::Lobbed { .. }),
            empowered: projectile.empowered,
            effect: projectile.effect,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    let mut views: Vec<PickupView> = world
        .ecs
        .query::<&Pickup>()
        .iter()
        .map(|(entity, pickup)| PickupView {
            id: entity_id(entity),
            currency: pickup.currency,
            position: pickup.position,
            value: pickup.value,
            collecting: pickup.collecting,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_markers(world: &World) -> Vec<MarkerView> {
    world
        .ecs
        .query::<&Marker>()
        .iter()
        .map(|(_, marker)| MarkerView {
            kind: marker.kind,
            lane: marker.lane,
            column: marker.column,
        })
        .collect()
}
