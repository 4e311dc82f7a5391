//! Field tools: shovel, glove and hammer.

use garden_core::components::{Attacker, Health};
use garden_core::constants::*;
use garden_core::enums::{Currency, MarkerKind, Tool};
use garden_core::types::Cell;

use crate::error::Rejection;
use crate::world::World;

/// Apply a tool to a cell.
pub fn use_tool(world: &mut World, tool: Tool, cell: Cell) -> Result<(), Rejection> {
    if !cell.in_bounds() {
        return Err(Rejection::OutOfBounds(cell));
    }
    match tool {
        Tool::Remove => remove(world, cell),
        Tool::RelocatePick => pick(world, cell),
        Tool::RelocatePlace => place(world, cell),
        Tool::ForcedKill => smash(world, cell),
    }
}

fn remove(world: &mut World, cell: Cell) -> Result<(), Rejection> {
    let (entity, _) = world
        .defenders_at(cell)
        .into_iter()
        .next()
        .ok_or(Rejection::NothingThere {
            tool: Tool::Remove,
            cell,
        })?;
    let _ = world.ecs.despawn(entity);
    world.ledger.credit(Currency::Sun, SHOVEL_REFUND);
    world.mark(MarkerKind::Removed, f64::from(cell.lane), cell.x());
    Ok(())
}

fn pick(world: &mut World, cell: Cell) -> Result<(), Rejection> {
    if world.held.is_some() {
        return Err(Rejection::AlreadyHolding);
    }
    let (entity, _) = world
        .defenders_at(cell)
        .into_iter()
        .next()
        .ok_or(Rejection::NothingThere {
            tool: Tool::RelocatePick,
            cell,
        })?;
    world
        .ecs
        .remove_one::<Cell>(entity)
        .map_err(|_| Rejection::NothingThere {
            tool: Tool::RelocatePick,
            cell,
        })?;
    world.held = Some(entity);
    Ok(())
}

fn place(world: &mut World, cell: Cell) -> Result<(), Rejection> {
    let entity = world.held.ok_or(Rejection::NothingHeld)?;
    if !world.defenders_at(cell).is_empty() {
        return Err(Rejection::Occupied(cell));
    }
    world
        .ecs
        .insert_one(entity, cell)
        .map_err(|_| Rejection::NothingHeld)?;
    world.held = None;
    world.mark(MarkerKind::Planted, f64::from(cell.lane), cell.x());
    Ok(())
}

fn smash(world: &mut World, cell: Cell) -> Result<(), Rejection> {
    if world.hammer_cooldown_ms > 0 {
        return Err(Rejection::CoolingDown {
            remaining_ms: world.hammer_cooldown_ms,
        });
    }
    let mut hits = Vec::new();
    for (_, (attacker, health)) in world.ecs.query_mut::<(&Attacker, &mut Health)>() {
        if attacker.lane == cell.lane
            && health.current > 0.0
            && (attacker.column - cell.x()).abs() < HAMMER_REACH
        {
            health.current = 0.0;
            hits.push(attacker.column);
        }
    }
    if hits.is_empty() {
        return Err(Rejection::NothingThere {
            tool: Tool::ForcedKill,
            cell,
        });
    }
    for column in hits {
        world.mark(MarkerKind::Explosion, f64::from(cell.lane), column);
    }
    world.hammer_cooldown_ms = HAMMER_COOLDOWN_MS;
    Ok(())
}
