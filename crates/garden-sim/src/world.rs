//! The simulation world: ECS storage plus the per-session state that is not
//! an entity (failsafes, ledger, spawn director, tool timers).
//!
//! Spawn factories live here so every system builds entities the same way.

use glam::DVec2;
use hecs::Entity;

use garden_core::catalog;
use garden_core::components::*;
use garden_core::constants::*;
use garden_core::enums::*;
use garden_core::types::Cell;

use crate::economy::Ledger;
use crate::systems::spawn_director::SpawnDirector;

/// All mutable simulation state for one session.
pub struct World {
    pub ecs: hecs::World,
    /// One failsafe per lane, indexed by lane.
    pub failsafes: Vec<Failsafe>,
    pub ledger: Ledger,
    pub director: SpawnDirector,
    pub mode: GameMode,
    /// Campaign level being played (1 in endless mode).
    pub level: u32,
    /// Milliseconds since the last sky sun.
    pub sky_sun_timer_ms: u32,
    pub hammer_cooldown_ms: u32,
    pub auto_collect: bool,
    /// Defender lifted off the field by the relocate tool.
    pub held: Option<Entity>,
}

impl World {
    /// A fresh session world: starting sun, ready failsafes, no entities.
    pub fn new(mode: GameMode, level: u32) -> Self {
        let level = level.max(1);
        let director = match mode {
            GameMode::Campaign => SpawnDirector::campaign(level),
            GameMode::Endless => SpawnDirector::endless(),
        };
        Self {
            ecs: hecs::World::new(),
            failsafes: (0..GRID_LANES)
                .map(|lane| Failsafe {
                    lane,
                    state: FailsafeState::Ready,
                    column: FAILSAFE_START,
                })
                .collect(),
            ledger: Ledger::new(STARTING_SUN),
            director,
            mode,
            level: match mode {
                GameMode::Campaign => level,
                GameMode::Endless => 1,
            },
            sky_sun_timer_ms: 0,
            hammer_cooldown_ms: 0,
            auto_collect: false,
            held: None,
        }
    }

    pub fn campaign(level: u32) -> Self {
        Self::new(GameMode::Campaign, level)
    }

    pub fn endless() -> Self {
        Self::new(GameMode::Endless, 1)
    }

    /// Place a defender directly, bypassing the economy.
    pub fn spawn_defender(&mut self, kind: DefenderKind, cell: Cell, health: f64) -> Entity {
        self.ecs.spawn((
            Defender {
                kind,
                action_timer_ms: 0,
                trap: TrapState::Unarmed,
            },
            cell,
            Health {
                current: health,
                max: health,
            },
        ))
    }

    /// Spawn an attacker with its archetype's base stats.
    pub fn spawn_attacker(&mut self, kind: AttackerKind, lane: i32, column: f64) -> Entity {
        let archetype = catalog::attacker(kind);
        self.ecs.spawn((
            Attacker {
                kind,
                lane,
                column,
                speed: archetype.speed,
                damage: archetype.damage,
                eating: false,
                freeze_ms: 0.0,
                armored: archetype.armored,
            },
            Health {
                current: archetype.health,
                max: archetype.health,
            },
        ))
    }

    pub fn spawn_projectile(&mut self, projectile: Projectile) -> Entity {
        self.ecs.spawn((projectile,))
    }

    /// Drop a pickup with its currency's lifetime.
    pub fn spawn_pickup(&mut self, currency: Currency, position: DVec2, value: u32) -> Entity {
        let ttl_ms = match currency {
            Currency::Sun => SUN_TTL_MS,
            Currency::Coin => COIN_TTL_MS,
        };
        self.ecs.spawn((Pickup {
            currency,
            position,
            value,
            ttl_ms,
            collecting: false,
        },))
    }

    /// Leave a transient visual marker.
    pub fn mark(&mut self, kind: MarkerKind, lane: f64, column: f64) {
        let life_ms = match kind {
            MarkerKind::Explosion => EXPLOSION_MARKER_MS,
            _ => MARKER_MS,
        };
        self.ecs.spawn((Marker {
            kind,
            lane,
            column,
            life_ms,
        },));
    }

    pub fn failsafe(&self, lane: i32) -> Option<&Failsafe> {
        usize::try_from(lane).ok().and_then(|i| self.failsafes.get(i))
    }

    pub fn failsafe_mut(&mut self, lane: i32) -> Option<&mut Failsafe> {
        usize::try_from(lane)
            .ok()
            .and_then(|i| self.failsafes.get_mut(i))
    }

    /// Attackers currently on the field, dead or alive.
    pub fn attacker_count(&self) -> usize {
        self.ecs.query::<&Attacker>().iter().count()
    }

    pub fn defender_count(&self) -> usize {
        self.ecs.query::<&Defender>().iter().count()
    }

    /// Placed defenders in a cell, in storage order.
    pub fn defenders_at(&self, cell: Cell) -> Vec<(Entity, DefenderKind)> {
        self.ecs
            .query::<(&Defender, &Cell)>()
            .iter()
            .filter(|(_, (_, at))| **at == cell)
            .map(|(entity, (defender, _))| (entity, defender.kind))
            .collect()
    }

    /// Damage every attacker with `|lane - r| <= 1` and `|column - c| <= radius`.
    /// Returns how many were hit.
    pub fn area_damage(&mut self, lane: i32, column: f64, radius: f64, damage: f64) -> usize {
        let mut hits = 0;
        for (_, (attacker, health)) in self.ecs.query_mut::<(&Attacker, &mut Health)>() {
            if (attacker.lane - lane).abs() <= 1 && (attacker.column - column).abs() <= radius {
                health.current -= damage;
                hits += 1;
            }
        }
        self.mark(MarkerKind::Explosion, f64::from(lane), column);
        hits
    }
}

/// Stable wire id of an entity.
pub fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

/// Resolve a wire id back to an entity handle.
pub fn entity_from_id(id: u64) -> Option<Entity> {
    Entity::from_bits(id)
}
