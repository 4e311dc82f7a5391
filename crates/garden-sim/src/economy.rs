//! Economy: the sun/coin ledger, placement, upgrades, pickups and ambient
//! accrual.

use glam::DVec2;
use hecs::Entity;
use rand::Rng;
use serde::{Deserialize, Serialize};

use garden_core::catalog;
use garden_core::components::Pickup;
use garden_core::constants::*;
use garden_core::enums::*;
use garden_core::progression::{scale, ProgressionState, StatKind};
use garden_core::types::Cell;

use crate::error::Rejection;
use crate::world::{entity_from_id, World};

/// Session currency balances.
///
/// Sun is spent inside the session. Coins collected here are owed to the
/// player's progression and drained by the engine after each tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub sun: u32,
    /// Coins collected but not yet moved to progression.
    pub coins_earned: u32,
}

impl Ledger {
    pub fn new(sun: u32) -> Self {
        Self {
            sun,
            coins_earned: 0,
        }
    }

    pub fn credit(&mut self, currency: Currency, value: u32) {
        match currency {
            Currency::Sun => self.sun = self.sun.saturating_add(value),
            Currency::Coin => self.coins_earned = self.coins_earned.saturating_add(value),
        }
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.sun >= cost
    }

    /// Deduct sun, refusing to go negative.
    pub fn spend(&mut self, cost: u32) -> Result<(), Rejection> {
        self.sun = self
            .sun
            .checked_sub(cost)
            .ok_or(Rejection::InsufficientSun {
                cost,
                balance: self.sun,
            })?;
        Ok(())
    }

    /// Take the coins owed to progression.
    pub fn take_coins(&mut self) -> u32 {
        std::mem::take(&mut self.coins_earned)
    }
}

/// Plant a defender if it is unlocked, the cell is free and sun suffices.
///
/// A floor defender may share a cell with one non-floor defender; two of the
/// same layer may not.
pub fn place_defender(
    world: &mut World,
    progression: &ProgressionState,
    kind: DefenderKind,
    cell: Cell,
) -> Result<Entity, Rejection> {
    if !progression.is_unlocked(kind) {
        return Err(Rejection::Locked(kind));
    }
    if !cell.in_bounds() {
        return Err(Rejection::OutOfBounds(cell));
    }
    let archetype = catalog::defender(kind);
    let blocked = world
        .defenders_at(cell)
        .into_iter()
        .any(|(_, other)| catalog::defender(other).is_floor() == archetype.is_floor());
    if blocked {
        return Err(Rejection::Occupied(cell));
    }
    world.ledger.spend(archetype.cost)?;

    let level = progression.level_of(kind);
    let health = f64::from(scale(archetype.base_health, level, StatKind::Health));
    let entity = world.spawn_defender(kind, cell, health);
    world.mark(MarkerKind::Planted, f64::from(cell.lane), cell.x());
    Ok(entity)
}

/// Spend coins on the next upgrade level of an archetype. Returns the new level.
pub fn buy_upgrade(progression: &mut ProgressionState, kind: DefenderKind) -> Result<u32, Rejection> {
    let cost = progression.upgrade_cost(kind);
    progression.coins = progression
        .coins
        .checked_sub(cost)
        .ok_or(Rejection::InsufficientCoins {
            cost,
            balance: progression.coins,
        })?;
    let level = progression.level_of(kind) + 1;
    progression.levels.insert(kind, level);
    Ok(level)
}

/// Claim a pickup by wire id: credit it now and start its collect animation.
pub fn collect_pickup(world: &mut World, id: u64) -> Result<(Currency, u32), Rejection> {
    let entity = entity_from_id(id).ok_or(Rejection::UnknownPickup(id))?;
    let (currency, value) = {
        let mut pickup = world
            .ecs
            .get::<&mut Pickup>(entity)
            .map_err(|_| Rejection::UnknownPickup(id))?;
        if pickup.collecting {
            return Err(Rejection::AlreadyCollecting(id));
        }
        pickup.collecting = true;
        (pickup.currency, pickup.value)
    };
    world.ledger.credit(currency, value);
    Ok((currency, value))
}

/// Claim every pickup that is not already being collected.
pub fn collect_all(world: &mut World) -> u32 {
    let mut claimed = 0;
    for (_, pickup) in world.ecs.query_mut::<&mut Pickup>() {
        if !pickup.collecting {
            pickup.collecting = true;
            world.ledger.credit(pickup.currency, pickup.value);
            claimed += 1;
        }
    }
    claimed
}

/// Ambient accrual: hammer cooldown and sky sun.
///
/// Sky sun falls every 5 s while the Sunflower is still locked, every 10 s
/// afterwards.
pub fn accrue<R: Rng + ?Sized>(world: &mut World, progression: &ProgressionState, rng: &mut R) {
    world.hammer_cooldown_ms = world.hammer_cooldown_ms.saturating_sub(TICK_MS);

    world.sky_sun_timer_ms += TICK_MS;
    let interval = if progression.is_unlocked(DefenderKind::Sunflower) {
        SKY_SUN_INTERVAL_MS
    } else {
        SKY_SUN_INTERVAL_EARLY_MS
    };
    if world.sky_sun_timer_ms > interval {
        world.sky_sun_timer_ms = 0;
        let x = rng.gen::<f64>() * 80.0 + 5.0;
        world.spawn_pickup(Currency::Sun, DVec2::new(x, -10.0), SKY_SUN_VALUE);
    }
}
