//! Cleanup: depleted defenders, pickup drift/collection/expiry and marker decay.

use glam::DVec2;
use hecs::Entity;

use garden_core::components::{Defender, Health, Marker, Pickup};
use garden_core::constants::*;
use garden_core::enums::Currency;
use garden_core::types::Cell;

use crate::economy;
use crate::world::World;

/// Counter each currency animates toward once collected.
fn collect_target(currency: Currency) -> DVec2 {
    match currency {
        Currency::Sun => DVec2::new(5.0, 5.0),
        Currency::Coin => DVec2::new(15.0, 5.0),
    }
}

/// Remove what finished this tick. Uses a pre-allocated buffer.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    // Placed defenders with no health left. Held defenders have no cell.
    for (entity, (_, _, health)) in world.ecs.query_mut::<(&Defender, &Cell, &Health)>() {
        if health.current <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    if world.auto_collect {
        economy::collect_all(world);
    }

    for (entity, pickup) in world.ecs.query_mut::<&mut Pickup>() {
        if pickup.collecting {
            let target = collect_target(pickup.currency);
            pickup.position += (target - pickup.position) * PICKUP_COLLECT_BLEND;
            if (pickup.position.x - target.x).abs() < PICKUP_COLLECT_EPSILON {
                despawn_buffer.push(entity);
            }
            continue;
        }
        pickup.ttl_ms -= TICK_MS as i32;
        if pickup.position.y < PICKUP_FLOOR {
            pickup.position.y = (pickup.position.y + PICKUP_DRIFT).min(PICKUP_FLOOR);
        }
        if pickup.ttl_ms <= 0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, marker) in world.ecs.query_mut::<&mut Marker>() {
        marker.life_ms -= TICK_MS as i32;
        if marker.life_ms <= 0 {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.ecs.despawn(entity);
    }
}
