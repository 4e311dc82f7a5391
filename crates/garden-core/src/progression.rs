//! Persistent player progression and the stat scaler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::UPGRADE_UNIT_COST;
use crate::enums::DefenderKind;

/// Which stat a value scales as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatKind {
    Health,
    Damage,
    Cooldown,
}

/// Upper bound on cooldown reduction from upgrades.
pub const MAX_COOLDOWN_REDUCTION: f64 = 0.5;

/// Scale a base stat by upgrade level.
///
/// Health and damage grow 20% per level past the first. Cooldowns shrink 5%
/// per level, capped at half the base. Levels below 1 count as 1.
pub fn scale(base: u32, level: u32, kind: StatKind) -> u32 {
    let steps = f64::from(level.max(1) - 1);
    let base = f64::from(base);
    let scaled = match kind {
        StatKind::Health | StatKind::Damage => base * (1.0 + steps * 0.2),
        StatKind::Cooldown => {
            let reduction = (steps * 0.05).min(MAX_COOLDOWN_REDUCTION);
            base * (1.0 - reduction)
        }
    };
    scaled.floor() as u32
}

/// Player progression persisted between sessions.
///
/// Missing fields deserialize to their defaults, so partially written saves
/// still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionState {
    /// Kill-drop currency, spent on upgrades.
    pub coins: u32,
    /// Defender archetypes available for placement, in unlock order.
    pub unlocked: Vec<DefenderKind>,
    /// Upgrade level per archetype. Absent means level 1.
    pub levels: BTreeMap<DefenderKind, u32>,
    pub max_level_reached: u32,
    pub current_level: u32,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            coins: 0,
            unlocked: vec![DefenderKind::Peashooter],
            levels: BTreeMap::new(),
            max_level_reached: 1,
            current_level: 1,
        }
    }
}

impl ProgressionState {
    /// Upgrade level of an archetype (at least 1).
    pub fn level_of(&self, kind: DefenderKind) -> u32 {
        self.levels.get(&kind).copied().unwrap_or(1).max(1)
    }

    pub fn is_unlocked(&self, kind: DefenderKind) -> bool {
        self.unlocked.contains(&kind)
    }

    /// Unlock an archetype. Returns false if it was already unlocked.
    pub fn unlock(&mut self, kind: DefenderKind) -> bool {
        if self.is_unlocked(kind) {
            return false;
        }
        self.unlocked.push(kind);
        true
    }

    /// Coin cost of the next upgrade step for an archetype.
    pub fn upgrade_cost(&self, kind: DefenderKind) -> u32 {
        self.level_of(kind) * UPGRADE_UNIT_COST
    }

    /// Replace nonsensical values with their defaults: an empty unlock list,
    /// zero levels and duplicate unlocks.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let mut seen = Vec::with_capacity(self.unlocked.len());
        self.unlocked.retain(|kind| {
            if seen.contains(kind) {
                false
            } else {
                seen.push(*kind);
                true
            }
        });
        if self.unlocked.is_empty() {
            self.unlocked = defaults.unlocked;
        }
        self.levels.retain(|_, level| *level >= 1);
        if self.max_level_reached == 0 {
            self.max_level_reached = defaults.max_level_reached;
        }
        if self.current_level == 0 {
            self.current_level = defaults.current_level;
        }
        self
    }
}
