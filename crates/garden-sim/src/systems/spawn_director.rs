//! Spawn director: schedules attackers for campaign waves and endless mode.

use hecs::Entity;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use garden_core::catalog::{self, CampaignWave};
use garden_core::constants::*;
use garden_core::enums::{AttackerKind, GameMode};

use crate::world::World;

/// Spawn scheduling state for one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnDirector {
    pub mode: GameMode,
    /// Campaign level whose wave table row is used.
    pub level: u32,
    pub spawned: u32,
    /// Spawn budget. `None` is unbounded (endless).
    pub target: Option<u32>,
    /// Milliseconds until the next spawn.
    pub countdown_ms: f64,
    /// Endless difficulty multiplier.
    pub difficulty: f64,
}

impl SpawnDirector {
    pub fn campaign(level: u32) -> Self {
        let level = level.max(1);
        Self {
            mode: GameMode::Campaign,
            level,
            spawned: 0,
            target: Some(catalog::campaign_wave(level).total),
            countdown_ms: FIRST_SPAWN_DELAY_MS,
            difficulty: 1.0,
        }
    }

    pub fn endless() -> Self {
        Self {
            mode: GameMode::Endless,
            level: 1,
            spawned: 0,
            target: None,
            countdown_ms: FIRST_SPAWN_DELAY_MS,
            difficulty: 1.0,
        }
    }

    fn wave(&self) -> CampaignWave {
        catalog::campaign_wave(self.level)
    }

    /// Whether the spawn budget is used up. Never true in endless mode.
    pub fn budget_exhausted(&self) -> bool {
        self.target.is_some_and(|target| self.spawned >= target)
    }

    /// Wave progress in percent.
    pub fn progress(&self) -> f64 {
        match self.target {
            Some(0) => 100.0,
            Some(target) => (f64::from(self.spawned) / f64::from(target) * 100.0).min(100.0),
            None => f64::from((self.spawned % ENDLESS_PROGRESS_PERIOD) * 2).min(100.0),
        }
    }

    fn pool(&self) -> &'static [AttackerKind] {
        match self.mode {
            GameMode::Campaign => self.wave().pool,
            GameMode::Endless => catalog::endless_pool(self.spawned),
        }
    }

    /// Countdown to the next spawn, after `spawned` was incremented.
    fn next_countdown<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        match self.target {
            Some(target) => {
                let ratio = f64::from(self.spawned) / f64::from(target.max(1));
                let interval = (self.wave().base_interval_ms - ratio * CAMPAIGN_INTERVAL_RAMP_MS)
                    .max(CAMPAIGN_MIN_INTERVAL_MS);
                interval + rng.gen::<f64>() * SPAWN_JITTER_MS
            }
            None => {
                self.difficulty += ENDLESS_DIFFICULTY_STEP;
                (ENDLESS_BASE_INTERVAL_MS / self.difficulty).max(ENDLESS_MIN_INTERVAL_MS)
            }
        }
    }
}

/// Count down and spawn at most one attacker. Returns the spawned entity.
pub fn run<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> Option<Entity> {
    let director = &mut world.director;
    director.countdown_ms -= f64::from(TICK_MS);
    if director.countdown_ms > 0.0 || director.budget_exhausted() {
        return None;
    }

    let lane = rng.gen_range(0..GRID_LANES);
    let kind = *director.pool().choose(rng)?;
    let column = f64::from(GRID_COLUMNS) + rng.gen::<f64>();
    director.spawned += 1;
    director.countdown_ms = director.next_countdown(rng);

    tracing::trace!(?kind, lane, spawned = director.spawned, "attacker spawned");
    Some(world.spawn_attacker(kind, lane, column))
}
