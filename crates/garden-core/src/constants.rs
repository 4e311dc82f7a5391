//! Simulation constants and tuning parameters.

/// Simulated milliseconds per tick.
pub const TICK_MS: u32 = 50;

/// Seconds per tick.
pub const DT: f64 = TICK_MS as f64 / 1000.0;

// --- Field ---

/// Number of lanes (rows) on the field.
pub const GRID_LANES: i32 = 5;

/// Number of plantable columns per lane.
pub const GRID_COLUMNS: i32 = 9;

// --- Economy ---

/// Sun balance at the start of every session.
pub const STARTING_SUN: u32 = 150;

/// Sun refunded when the shovel removes a defender.
pub const SHOVEL_REFUND: u32 = 25;

/// Coin cost of one upgrade step, multiplied by the current level.
pub const UPGRADE_UNIT_COST: u32 = 100;

/// Value of a sun dropped from the sky.
pub const SKY_SUN_VALUE: u32 = 25;

/// Sky sun interval before the Sunflower is unlocked (ms).
pub const SKY_SUN_INTERVAL_EARLY_MS: u32 = 5_000;

/// Sky sun interval once the Sunflower is unlocked (ms).
pub const SKY_SUN_INTERVAL_MS: u32 = 10_000;

/// Value of a coin dropped by a defeated attacker.
pub const COIN_DROP_VALUE: u32 = 10;

/// Probability that a defeated attacker drops a coin.
pub const COIN_DROP_CHANCE: f64 = 0.3;

// --- Pickups ---

/// Lifetime of an uncollected sun (ms).
pub const SUN_TTL_MS: i32 = 10_000;

/// Lifetime of an uncollected coin (ms).
pub const COIN_TTL_MS: i32 = 8_000;

/// Downward drift of an uncollected pickup per tick (percent of field).
pub const PICKUP_DRIFT: f64 = 0.3;

/// Lowest point an uncollected pickup drifts to (percent of field).
pub const PICKUP_FLOOR: f64 = 85.0;

/// Blend factor of a collecting pickup toward its counter.
pub const PICKUP_COLLECT_BLEND: f64 = 0.2;

/// Horizontal distance at which a collecting pickup is removed.
pub const PICKUP_COLLECT_EPSILON: f64 = 2.0;

// --- Projectiles ---

/// Straight projectile speed (columns per tick).
pub const PEA_SPEED: f64 = 0.25;

/// Star projectile speed (units per tick, before direction scaling).
pub const STAR_SPEED: f64 = 0.3;

/// Lobbed projectile progress gained per tick.
pub const LOB_PROGRESS_STEP: f64 = 0.04;

/// Lobbed projectile horizontal blend toward its aim point per tick.
pub const LOB_BLEND: f64 = 0.1;

/// Lane tolerance for a straight projectile hit.
pub const HIT_LANE_TOLERANCE: f64 = 0.5;

/// Column tolerance for a straight projectile hit.
pub const HIT_COLUMN_TOLERANCE: f64 = 0.3;

/// Column reach within which a passive buff empowers a projectile.
pub const BUFF_REACH: f64 = 0.5;

/// Freeze applied by a slowing projectile (ms).
pub const SLOW_FREEZE_MS: f64 = 3_000.0;

// --- Attackers ---

/// Column at which an attacker triggers its lane's failsafe.
pub const DEFENSE_LINE: f64 = -0.2;

/// Column past which an attacker in a lane without failsafe ends the session.
pub const LOSS_LINE: f64 = -0.8;

/// Column reach within which an attacker eats a defender.
pub const EAT_REACH: f64 = 0.2;

/// Freeze above which an attacker cannot move at all (ms).
pub const DEEP_FREEZE_MS: f64 = 8_000.0;

// --- Failsafe ---

/// Starting column of an idle failsafe.
pub const FAILSAFE_START: f64 = -1.2;

/// Failsafe travel per tick (columns).
pub const FAILSAFE_SPEED: f64 = 0.4;

/// Column reach within which a running failsafe kills.
pub const FAILSAFE_REACH: f64 = 0.8;

// --- Tools ---

/// Hammer cooldown after a successful strike (ms).
pub const HAMMER_COOLDOWN_MS: u32 = 60_000;

/// Column reach of a hammer strike.
pub const HAMMER_REACH: f64 = 0.8;

// --- Markers ---

/// Lifetime of an explosion marker (ms).
pub const EXPLOSION_MARKER_MS: i32 = 800;

/// Lifetime of every other marker (ms).
pub const MARKER_MS: i32 = 300;

// --- Spawning ---

/// Countdown before the first attacker of a session (ms).
pub const FIRST_SPAWN_DELAY_MS: f64 = 3_000.0;

/// Shortest campaign spawn interval before jitter (ms).
pub const CAMPAIGN_MIN_INTERVAL_MS: f64 = 1_000.0;

/// Interval reduction over the course of a campaign wave (ms).
pub const CAMPAIGN_INTERVAL_RAMP_MS: f64 = 2_000.0;

/// Upper bound of the random jitter added to campaign intervals (ms).
pub const SPAWN_JITTER_MS: f64 = 1_000.0;

/// Endless base interval, divided by the difficulty multiplier (ms).
pub const ENDLESS_BASE_INTERVAL_MS: f64 = 4_000.0;

/// Shortest endless spawn interval (ms).
pub const ENDLESS_MIN_INTERVAL_MS: f64 = 500.0;

/// Endless difficulty gained per spawn.
pub const ENDLESS_DIFFICULTY_STEP: f64 = 0.005;

/// Endless wave progress wraps every this many spawns.
pub const ENDLESS_PROGRESS_PERIOD: u32 = 50;
