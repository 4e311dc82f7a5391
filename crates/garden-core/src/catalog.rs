//! Static archetype tables: defenders, attackers and the campaign wave table.
//!
//! Everything here is immutable reference data. Runtime state lives in
//! components; per-player scaling goes through [`crate::progression::scale`].

use crate::enums::*;

/// Projectile pattern of a shooting defender.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FirePattern {
    /// `shots` projectiles straight down the defender's own lane.
    Straight { shots: u8 },
    /// One projectile in each of the three adjacent lanes.
    ThreeLane,
    /// Five projectiles in a star from the defender's cell.
    Star,
    /// An arcing shot at the farthest attacker in the lane.
    Lobbed { blast_radius: f64 },
}

/// One-shot effect of an instant defender.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InstantEffect {
    /// Area damage around the defender's cell.
    Explode { radius: f64 },
    /// Freeze every attacker on the field.
    GlobalFreeze { duration_ms: f64 },
}

/// Behavior variant of a defender archetype.
///
/// Exactly one variant per archetype, so behaviors are mutually exclusive
/// by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    Shooter {
        pattern: FirePattern,
        effect: Option<StatusEffect>,
    },
    Producer {
        sun_value: u32,
    },
    /// Does nothing but soak up eating.
    Blocker,
    /// Empowers projectiles passing through its cell.
    PassiveBuff,
    /// Strips armor from a nearby attacker and caps its health.
    Disarm {
        lane_reach: i32,
        column_reach: f64,
        health_cap: f64,
    },
    /// Damages every attacker in the lane, then is consumed.
    LaneClear,
    /// Crushes an adjacent attacker after a windup, then is consumed.
    Melee { reach: f64, windup_ms: u32 },
    /// Fires once when its fuse runs out, then is consumed.
    Instant(InstantEffect),
    /// Arms after its interval, then detonates on contact.
    Trap { trigger_reach: f64, blast_radius: f64 },
}

/// Immutable defender archetype record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefenderArchetype {
    pub kind: DefenderKind,
    pub name: &'static str,
    /// Sun cost of placement.
    pub cost: u32,
    pub base_health: u32,
    pub base_damage: u32,
    /// Milliseconds between actions (or fuse / arming time).
    pub action_interval_ms: u32,
    /// Campaign level at which the archetype is unlocked (0 = from the start).
    pub unlock_level: u32,
    /// Lies flat on the ground: shares a cell with one upright defender and
    /// is walked over rather than eaten.
    pub floor: bool,
    pub behavior: Behavior,
}

impl DefenderArchetype {
    pub fn is_floor(&self) -> bool {
        self.floor
    }

    pub fn is_trap(&self) -> bool {
        matches!(self.behavior, Behavior::Trap { .. })
    }

    /// Whether attackers stop to eat this defender.
    pub fn is_edible(&self) -> bool {
        !self.is_floor() && !self.is_trap()
    }
}

/// Immutable attacker archetype record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackerArchetype {
    pub kind: AttackerKind,
    pub health: f64,
    /// Columns per second.
    pub speed: f64,
    /// Health eaten per second.
    pub damage: f64,
    /// Carries metal armor a disarming defender can strip.
    pub armored: bool,
}

const fn shooter(pattern: FirePattern, effect: Option<StatusEffect>) -> Behavior {
    Behavior::Shooter { pattern, effect }
}

static DEFENDERS: [DefenderArchetype; 18] = [
    DefenderArchetype {
        kind: DefenderKind::Peashooter,
        name: "Peashooter",
        cost: 100,
        base_health: 300,
        base_damage: 20,
        action_interval_ms: 1500,
        unlock_level: 0,
        floor: false,
        behavior: shooter(FirePattern::Straight { shots: 1 }, None),
    },
    DefenderArchetype {
        kind: DefenderKind::Sunflower,
        name: "Sunflower",
        cost: 50,
        base_health: 300,
        base_damage: 0,
        action_interval_ms: 10_000,
        unlock_level: 2,
        floor: false,
        behavior: Behavior::Producer { sun_value: 25 },
    },
    DefenderArchetype {
        kind: DefenderKind::CherryBomb,
        name: "Cherry Bomb",
        cost: 150,
        base_health: 9999,
        base_damage: 1800,
        action_interval_ms: 1000,
        unlock_level: 3,
        floor: false,
        behavior: Behavior::Instant(InstantEffect::Explode { radius: 1.5 }),
    },
    DefenderArchetype {
        kind: DefenderKind::WallNut,
        name: "Wall-nut",
        cost: 50,
        base_health: 4000,
        base_damage: 0,
        action_interval_ms: 0,
        unlock_level: 4,
        floor: false,
        behavior: Behavior::Blocker,
    },
    DefenderArchetype {
        kind: DefenderKind::PotatoMine,
        name: "Potato Mine",
        cost: 25,
        base_health: 300,
        base_damage: 1800,
        action_interval_ms: 14_000,
        unlock_level: 5,
        floor: false,
        behavior: Behavior::Trap {
            trigger_reach: 0.3,
            blast_radius: 0.5,
        },
    },
    DefenderArchetype {
        kind: DefenderKind::SnowPea,
        name: "Snow Pea",
        cost: 175,
        base_health: 300,
        base_damage: 20,
        action_interval_ms: 1500,
        unlock_level: 6,
        floor: false,
        behavior: shooter(FirePattern::Straight { shots: 1 }, Some(StatusEffect::Slow)),
    },
    DefenderArchetype {
        kind: DefenderKind::Repeater,
        name: "Repeater",
        cost: 200,
        base_health: 300,
        base_damage: 20,
        action_interval_ms: 1500,
        unlock_level: 7,
        floor: false,
        behavior: shooter(FirePattern::Straight { shots: 2 }, None),
    },
    DefenderArchetype {
        kind: DefenderKind::Torchwood,
        name: "Torchwood",
        cost: 175,
        base_health: 400,
        base_damage: 0,
        action_interval_ms: 0,
        unlock_level: 8,
        floor: false,
        behavior: Behavior::PassiveBuff,
    },
    DefenderArchetype {
        kind: DefenderKind::Threepeater,
        name: "Threepeater",
        cost: 325,
        base_health: 300,
        base_damage: 20,
        action_interval_ms: 1500,
        unlock_level: 9,
        floor: false,
        behavior: shooter(FirePattern::ThreeLane, None),
    },
    DefenderArchetype {
        kind: DefenderKind::Squash,
        name: "Squash",
        cost: 50,
        base_health: 1000,
        base_damage: 1800,
        action_interval_ms: 500,
        unlock_level: 10,
        floor: false,
        behavior: Behavior::Melee {
            reach: 1.2,
            windup_ms: 500,
        },
    },
    DefenderArchetype {
        kind: DefenderKind::Spikeweed,
        name: "Spikeweed",
        cost: 100,
        base_health: 9999,
        base_damage: 10,
        action_interval_ms: 1000,
        unlock_level: 11,
        floor: true,
        behavior: shooter(FirePattern::Straight { shots: 1 }, None),
    },
    DefenderArchetype {
        kind: DefenderKind::Jalapeno,
        name: "Jalapeno",
        cost: 125,
        base_health: 9999,
        base_damage: 2000,
        action_interval_ms: 1000,
        unlock_level: 12,
        floor: false,
        behavior: Behavior::LaneClear,
    },
    DefenderArchetype {
        kind: DefenderKind::TwinSunflower,
        name: "Twin Sunflower",
        cost: 150,
        base_health: 300,
        base_damage: 0,
        action_interval_ms: 10_000,
        unlock_level: 13,
        floor: false,
        behavior: Behavior::Producer { sun_value: 50 },
    },
    DefenderArchetype {
        kind: DefenderKind::MelonPult,
        name: "Melon-pult",
        cost: 300,
        base_health: 300,
        base_damage: 80,
        action_interval_ms: 2800,
        unlock_level: 14,
        floor: false,
        behavior: shooter(FirePattern::Lobbed { blast_radius: 1.5 }, None),
    },
    DefenderArchetype {
        kind: DefenderKind::Gatling,
        name: "Gatling Pea",
        cost: 450,
        base_health: 400,
        base_damage: 20,
        action_interval_ms: 1500,
        unlock_level: 15,
        floor: false,
        behavior: shooter(FirePattern::Straight { shots: 4 }, None),
    },
    DefenderArchetype {
        kind: DefenderKind::Magnet,
        name: "Magnet-shroom",
        cost: 100,
        base_health: 300,
        base_damage: 0,
        action_interval_ms: 5000,
        unlock_level: 16,
        floor: false,
        behavior: Behavior::Disarm {
            lane_reach: 1,
            column_reach: 2.0,
            health_cap: 200.0,
        },
    },
    DefenderArchetype {
        kind: DefenderKind::Starfruit,
        name: "Starfruit",
        cost: 125,
        base_health: 300,
        base_damage: 20,
        action_interval_ms: 1400,
        unlock_level: 17,
        floor: false,
        behavior: shooter(FirePattern::Star, None),
    },
    DefenderArchetype {
        kind: DefenderKind::IceShroom,
        name: "Ice-shroom",
        cost: 75,
        base_health: 200,
        base_damage: 20,
        action_interval_ms: 1000,
        unlock_level: 18,
        floor: false,
        behavior: Behavior::Instant(InstantEffect::GlobalFreeze {
            duration_ms: 10_000.0,
        }),
    },
];

static ATTACKERS: [AttackerArchetype; 6] = [
    AttackerArchetype {
        kind: AttackerKind::Normal,
        health: 200.0,
        speed: 0.1,
        damage: 100.0,
        armored: false,
    },
    AttackerArchetype {
        kind: AttackerKind::Cone,
        health: 560.0,
        speed: 0.1,
        damage: 100.0,
        armored: false,
    },
    AttackerArchetype {
        kind: AttackerKind::Bucket,
        health: 1300.0,
        speed: 0.08,
        damage: 100.0,
        armored: true,
    },
    AttackerArchetype {
        kind: AttackerKind::Football,
        health: 1600.0,
        speed: 0.25,
        damage: 100.0,
        armored: true,
    },
    AttackerArchetype {
        kind: AttackerKind::Flag,
        health: 250.0,
        speed: 0.22,
        damage: 150.0,
        armored: false,
    },
    AttackerArchetype {
        kind: AttackerKind::Gargantuar,
        health: 3000.0,
        speed: 0.05,
        damage: 9999.0,
        armored: false,
    },
];

/// Look up a defender archetype.
pub fn defender(kind: DefenderKind) -> &'static DefenderArchetype {
    &DEFENDERS[kind as usize]
}

/// Look up an attacker archetype.
pub fn attacker(kind: AttackerKind) -> &'static AttackerArchetype {
    &ATTACKERS[kind as usize]
}

/// The defender archetype unlocked by reaching `level`, if any.
pub fn unlocked_at_level(level: u32) -> Option<DefenderKind> {
    DEFENDERS
        .iter()
        .find(|archetype| archetype.unlock_level == level)
        .map(|archetype| archetype.kind)
}

// --- Waves ---

/// One campaign level's wave definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CampaignWave {
    /// Attackers to spawn before the wave can complete.
    pub total: u32,
    /// Spawn pool, picked uniformly (duplicates weight the choice).
    pub pool: &'static [AttackerKind],
    /// Base spawn interval before the progress ramp (ms).
    pub base_interval_ms: f64,
}

use crate::enums::AttackerKind::{Bucket, Cone, Flag, Football, Gargantuar, Normal};

static LEVEL_POOLS: [&[AttackerKind]; 5] = [
    &[Normal],
    &[Normal, Normal, Cone],
    &[Normal, Cone],
    &[Normal, Cone, Bucket],
    &[Normal, Cone, Bucket, Flag],
];

static LEVEL_INTERVALS: [f64; 5] = [8000.0, 7000.0, 6000.0, 5000.0, 4500.0];

/// Base spawn interval for levels past the table.
const LATE_INTERVAL_MS: f64 = 3000.0;

/// Wave definition for a campaign level. Levels past the hand-made table
/// keep the last row's pool with a growing total and a fixed interval.
pub fn campaign_wave(level: u32) -> CampaignWave {
    let level = level.max(1);
    match level {
        1..=5 => {
            let index = (level - 1) as usize;
            CampaignWave {
                total: level * 5,
                pool: LEVEL_POOLS[index],
                base_interval_ms: LEVEL_INTERVALS[index],
            }
        }
        _ => CampaignWave {
            total: 25 + level * 5,
            pool: LEVEL_POOLS[LEVEL_POOLS.len() - 1],
            base_interval_ms: LATE_INTERVAL_MS,
        },
    }
}

static ENDLESS_ORDER: [AttackerKind; 6] = [Normal, Cone, Bucket, Football, Flag, Gargantuar];

/// Spawn counts after which the next endless archetype joins the pool.
const ENDLESS_THRESHOLDS: [u32; 5] = [10, 30, 50, 80, 120];

/// Endless-mode spawn pool after `spawned` attackers.
pub fn endless_pool(spawned: u32) -> &'static [AttackerKind] {
    let unlocked = ENDLESS_THRESHOLDS
        .iter()
        .filter(|&&threshold| spawned > threshold)
        .count();
    &ENDLESS_ORDER[..=unlocked]
}
