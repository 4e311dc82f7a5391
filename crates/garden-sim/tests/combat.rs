//! Tick-level combat tests driving `advance` on a hand-built world.

use glam::DVec2;
use hecs::Entity;
use proptest::prelude::*;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use garden_core::components::*;
use garden_core::enums::*;
use garden_core::progression::ProgressionState;
use garden_core::types::Cell;
use garden_sim::systems::spawn_director::{self, SpawnDirector};
use garden_sim::world::entity_id;
use garden_sim::{advance, economy, TickContext, TickReport, World};

/// A world that never spawns attackers on its own.
fn quiet_world() -> World {
    let mut world = World::campaign(1);
    world.director.countdown_ms = f64::INFINITY;
    world
}

struct Harness {
    world: World,
    progression: ProgressionState,
    rng: ChaCha8Rng,
}

impl Harness {
    fn new() -> Self {
        Self {
            world: quiet_world(),
            progression: ProgressionState::default(),
            rng: ChaCha8Rng::seed_from_u64(7),
        }
    }

    fn tick(&mut self) -> TickReport {
        advance(
            &mut self.world,
            TickContext {
                progression: &self.progression,
            },
            &mut self.rng,
        )
        .unwrap()
    }

    fn defender(&mut self, kind: DefenderKind, lane: i32, column: i32) -> Entity {
        let health = f64::from(garden_core::catalog::defender(kind).base_health);
        self.world.spawn_defender(kind, Cell::new(lane, column), health)
    }

    /// A defender whose action timer fires on the next tick.
    fn primed(&mut self, kind: DefenderKind, lane: i32, column: i32) -> Entity {
        let entity = self.defender(kind, lane, column);
        let interval = garden_core::catalog::defender(kind).action_interval_ms;
        self.world
            .ecs
            .get::<&mut Defender>(entity)
            .unwrap()
            .action_timer_ms = interval - 50;
        entity
    }

    /// An attacker that stays where it was put.
    fn still(&mut self, kind: AttackerKind, lane: i32, column: f64) -> Entity {
        let entity = self.world.spawn_attacker(kind, lane, column);
        self.world.ecs.get::<&mut Attacker>(entity).unwrap().speed = 0.0;
        entity
    }

    fn health(&self, entity: Entity) -> Option<f64> {
        self.world
            .ecs
            .get::<&Health>(entity)
            .ok()
            .map(|health| health.current)
    }

    fn attacker(&self, entity: Entity) -> Attacker {
        (*self.world.ecs.get::<&Attacker>(entity).unwrap()).clone()
    }

    fn projectiles(&self) -> Vec<Projectile> {
        self.world
            .ecs
            .query::<&Projectile>()
            .iter()
            .map(|(_, p)| p.clone())
            .collect()
    }
}

// ---- Attacker health ----

#[test]
fn test_ten_peas_kill_on_the_tenth_hit_tick() {
    let mut h = Harness::new();
    h.defender(DefenderKind::Peashooter, 2, 0);
    let target = h.still(AttackerKind::Normal, 2, 5.0);

    let mut hits = 0;
    for _ in 0..3000 {
        let before = h.health(target).unwrap();
        h.tick();
        match h.health(target) {
            Some(after) if after < before => {
                assert_eq!(before - after, 20.0);
                hits += 1;
            }
            Some(_) => {}
            None => {
                hits += 1;
                assert_eq!(before, 20.0, "removed on the hit that reached zero");
                break;
            }
        }
    }
    assert_eq!(hits, 10);
}

// ---- Area damage ----

#[test]
fn test_cherry_bomb_area_selection() {
    let mut h = Harness::new();
    let bomb = h.primed(DefenderKind::CherryBomb, 2, 4);
    let diagonal = h.still(AttackerKind::Gargantuar, 1, 5.5);
    let behind = h.still(AttackerKind::Gargantuar, 3, 2.5);
    let too_far = h.still(AttackerKind::Gargantuar, 2, 5.6);
    let two_lanes = h.still(AttackerKind::Gargantuar, 4, 4.0);

    h.tick();

    assert_eq!(h.health(diagonal), Some(1200.0));
    assert_eq!(h.health(behind), Some(1200.0));
    assert_eq!(h.health(too_far), Some(3000.0));
    assert_eq!(h.health(two_lanes), Some(3000.0));
    assert!(!h.world.ecs.contains(bomb), "instant defenders are consumed");
}

proptest! {
    #[test]
    fn prop_area_damage_hits_exactly_the_neighbourhood(
        lane in 0i32..5,
        column in -1.0f64..10.0,
        r in 0i32..5,
        c in 0.0f64..9.0,
        radius in 0.1f64..2.0,
    ) {
        let mut world = quiet_world();
        let attacker = world.spawn_attacker(AttackerKind::Gargantuar, lane, column);
        world.area_damage(r, c, radius, 10.0);
        let hit = world.ecs.get::<&Health>(attacker).unwrap().current < 3000.0;
        prop_assert_eq!(hit, (lane - r).abs() <= 1 && (column - c).abs() <= radius);
    }
}

// ---- Traps ----

#[test]
fn test_trap_fires_once_and_is_removed() {
    let mut h = Harness::new();
    let mine = h.defender(DefenderKind::PotatoMine, 1, 2);
    h.world.ecs.get::<&mut Defender>(mine).unwrap().trap = TrapState::Armed;
    let victim = h.still(AttackerKind::Gargantuar, 1, 2.1);
    let neighbour = h.still(AttackerKind::Gargantuar, 2, 2.4);
    let far_lane = h.still(AttackerKind::Gargantuar, 3, 2.0);
    let far_column = h.still(AttackerKind::Gargantuar, 1, 2.6);

    h.tick();
    assert!(!h.world.ecs.contains(mine));
    assert_eq!(h.health(victim), Some(1200.0));
    assert_eq!(h.health(neighbour), Some(1200.0));
    assert_eq!(h.health(far_lane), Some(3000.0));
    assert_eq!(h.health(far_column), Some(3000.0));

    h.tick();
    assert_eq!(h.health(victim), Some(1200.0), "no second detonation");
}

#[test]
fn test_trap_arms_after_its_interval() {
    let mut h = Harness::new();
    let mine = h.primed(DefenderKind::PotatoMine, 0, 0);
    h.tick();
    assert_eq!(
        h.world.ecs.get::<&Defender>(mine).unwrap().trap,
        TrapState::Armed
    );
    h.tick();
    assert!(h.world.ecs.contains(mine), "armed mine waits for contact");
}

#[test]
fn test_unarmed_trap_ignores_contact() {
    let mut h = Harness::new();
    let mine = h.defender(DefenderKind::PotatoMine, 1, 2);
    let walker = h.still(AttackerKind::Normal, 1, 2.0);
    h.tick();
    assert!(h.world.ecs.contains(mine));
    assert_eq!(h.health(walker), Some(200.0));
}

// ---- Failsafe ----

#[test]
fn test_failsafe_triggers_once_and_sweeps_its_lane() {
    let mut h = Harness::new();
    let intruder = h.world.spawn_attacker(AttackerKind::Normal, 1, -0.3);
    let in_lane = h.still(AttackerKind::Normal, 1, 5.0);
    let other_lane = h.still(AttackerKind::Normal, 2, 0.3);

    let report = h.tick();
    assert!(!report.breached);
    assert_eq!(h.world.failsafe(1).unwrap().state, FailsafeState::Running);

    h.tick();
    assert!(h.health(intruder).is_none(), "first sweep kills the intruder");

    for _ in 0..30 {
        h.tick();
    }
    assert_eq!(h.world.failsafe(1).unwrap().state, FailsafeState::Spent);
    assert!(h.health(in_lane).is_none());
    assert_eq!(h.health(other_lane), Some(200.0));
    assert_eq!(h.world.failsafe(2).unwrap().state, FailsafeState::Ready);

    // A spent failsafe stays spent.
    h.still(AttackerKind::Normal, 1, -0.3);
    let report = h.tick();
    assert!(!report.breached);
    assert_eq!(h.world.failsafe(1).unwrap().state, FailsafeState::Spent);
}

#[test]
fn test_crossing_after_spent_failsafe_breaches() {
    let mut h = Harness::new();
    h.world.failsafes[0].state = FailsafeState::Spent;
    h.world.failsafes[0].column = 9.2;

    h.still(AttackerKind::Normal, 0, -0.5);
    assert!(!h.tick().breached, "not past the loss line yet");

    h.still(AttackerKind::Normal, 0, -0.9);
    assert!(h.tick().breached);
}

// ---- Attackers ----

#[test]
fn test_attacker_eats_edible_defender() {
    let mut h = Harness::new();
    let nut = h.defender(DefenderKind::WallNut, 2, 3);
    let eater = h.world.spawn_attacker(AttackerKind::Normal, 2, 3.1);

    h.tick();
    assert_eq!(h.health(nut), Some(3995.0));
    let attacker = h.attacker(eater);
    assert!(attacker.eating);
    assert_eq!(attacker.column, 3.1);
}

#[test]
fn test_floor_defender_is_walked_over() {
    let mut h = Harness::new();
    let spikes = h.defender(DefenderKind::Spikeweed, 2, 3);
    let walker = h.world.spawn_attacker(AttackerKind::Normal, 2, 3.1);

    for _ in 0..20 {
        h.tick();
        assert!(!h.attacker(walker).eating);
    }
    assert!((h.attacker(walker).column - (3.1 - 20.0 * 0.1 * 0.05)).abs() < 1e-9);
    assert_eq!(h.health(spikes), Some(9999.0));
    assert_eq!(h.health(walker), Some(200.0), "peas fly away from it");
}

#[test]
fn test_spikeweed_shoots_down_its_lane() {
    let mut h = Harness::new();
    h.primed(DefenderKind::Spikeweed, 2, 0);
    let target = h.still(AttackerKind::Normal, 2, 5.0);

    h.tick();
    let peas = h.projectiles();
    assert_eq!(peas.len(), 1);
    assert_eq!(peas[0].lane, 2);
    assert_eq!(peas[0].damage, 10.0);
    assert!((peas[0].position.x - 0.85).abs() < 1e-12);

    for _ in 0..20 {
        h.tick();
    }
    assert_eq!(h.health(target), Some(190.0));
}

#[test]
fn test_frozen_attacker_moves_at_half_speed() {
    let mut h = Harness::new();
    let walker = h.world.spawn_attacker(AttackerKind::Normal, 4, 6.0);
    h.world.ecs.get::<&mut Attacker>(walker).unwrap().freeze_ms = 3000.0;

    h.tick();
    let attacker = h.attacker(walker);
    assert!((attacker.column - (6.0 - 0.1 * 0.5 * 0.05)).abs() < 1e-12);
    assert_eq!(attacker.freeze_ms, 2950.0);
}

#[test]
fn test_kill_drop_follows_rng() {
    let mut world = quiet_world();
    let progression = ProgressionState::default();
    let doomed = world.spawn_attacker(AttackerKind::Normal, 1, 4.0);
    world.ecs.get::<&mut Health>(doomed).unwrap().current = 0.0;

    let report = advance(
        &mut world,
        TickContext {
            progression: &progression,
        },
        &mut StepRng::new(0, 0),
    )
    .unwrap();
    assert_eq!(report.kills, 1);
    let coins: Vec<Pickup> = world
        .ecs
        .query::<&Pickup>()
        .iter()
        .map(|(_, p)| p.clone())
        .collect();
    assert_eq!(coins.len(), 1);
    assert_eq!(coins[0].currency, Currency::Coin);
    assert_eq!(coins[0].value, 10);
    // Dropped at the attacker's cell, then drifted once during cleanup.
    assert_eq!(coins[0].position.x, 46.0);
    assert!((coins[0].position.y - 22.3).abs() < 1e-9);

    let mut world = quiet_world();
    let doomed = world.spawn_attacker(AttackerKind::Normal, 1, 4.0);
    world.ecs.get::<&mut Health>(doomed).unwrap().current = 0.0;
    advance(
        &mut world,
        TickContext {
            progression: &progression,
        },
        &mut StepRng::new(u64::MAX, 0),
    )
    .unwrap();
    assert_eq!(world.ecs.query::<&Pickup>().iter().count(), 0);
}

// ---- Defender behaviors ----

#[test]
fn test_torchwood_doubles_passing_peas() {
    let mut h = Harness::new();
    h.defender(DefenderKind::Peashooter, 2, 0);
    h.defender(DefenderKind::Torchwood, 2, 2);
    let target = h.still(AttackerKind::Gargantuar, 2, 6.0);

    for _ in 0..200 {
        h.tick();
        if h.health(target) != Some(3000.0) {
            break;
        }
    }
    assert_eq!(h.health(target), Some(2960.0));
}

#[test]
fn test_slow_projectile_freezes_target() {
    let mut h = Harness::new();
    h.defender(DefenderKind::SnowPea, 2, 0);
    let target = h.world.spawn_attacker(AttackerKind::Normal, 2, 3.0);

    for _ in 0..200 {
        h.tick();
        if h.health(target) != Some(200.0) {
            break;
        }
    }
    assert_eq!(h.health(target), Some(180.0));
    assert_eq!(h.attacker(target).freeze_ms, 2950.0);
}

#[test]
fn test_fresh_spawn_is_a_target_in_its_first_tick() {
    let mut world = World::campaign(1);
    world.director.countdown_ms = 50.0;
    let shooter = world.spawn_defender(DefenderKind::Peashooter, Cell::new(0, 0), 300.0);
    world.ecs.get::<&mut Defender>(shooter).unwrap().action_timer_ms = 1450;
    let progression = ProgressionState::default();

    let report = advance(
        &mut world,
        TickContext {
            progression: &progression,
        },
        &mut StepRng::new(0, 0),
    )
    .unwrap();

    let spawned = report.spawned.expect("countdown elapsed");
    let attacker = (*world.ecs.get::<&Attacker>(spawned).unwrap()).clone();
    assert_eq!(attacker.lane, 0);
    assert_eq!(attacker.column, 9.0 - 0.1 * 0.05);
    assert_eq!(world.ecs.get::<&Health>(spawned).unwrap().current, 200.0);

    let peas: Vec<Projectile> = world
        .ecs
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| p.clone())
        .collect();
    assert_eq!(peas.len(), 1, "defender phase saw the new attacker");
    assert!((peas[0].position.x - 0.85).abs() < 1e-12, "fired and moved once");
}

#[test]
fn test_shooter_holds_fire_without_target_ahead() {
    let mut h = Harness::new();
    h.primed(DefenderKind::Peashooter, 2, 5);
    h.still(AttackerKind::Normal, 2, 3.0);
    h.still(AttackerKind::Normal, 1, 8.0);
    h.tick();
    assert!(h.projectiles().is_empty());
}

#[test]
fn test_threepeater_covers_existing_lanes() {
    let mut h = Harness::new();
    h.primed(DefenderKind::Threepeater, 0, 1);
    h.still(AttackerKind::Normal, 0, 8.0);
    h.tick();
    let mut lanes: Vec<i32> = h.projectiles().iter().map(|p| p.lane).collect();
    lanes.sort_unstable();
    assert_eq!(lanes, vec![0, 1]);
}

#[test]
fn test_gatling_fires_four_staggered_peas() {
    let mut h = Harness::new();
    h.primed(DefenderKind::Gatling, 3, 0);
    h.still(AttackerKind::Normal, 3, 8.0);
    h.tick();
    let mut xs: Vec<f64> = h.projectiles().iter().map(|p| p.position.x).collect();
    xs.sort_by(f64::total_cmp);
    assert_eq!(xs.len(), 4);
    for (i, x) in xs.iter().enumerate() {
        let expected = 0.6 + 0.2 * i as f64 + 0.25;
        assert!((x - expected).abs() < 1e-9);
    }
}

#[test]
fn test_star_volley_leaves_the_field() {
    let mut h = Harness::new();
    h.primed(DefenderKind::Starfruit, 2, 4);
    h.still(AttackerKind::Gargantuar, 0, 8.5);

    h.tick();
    assert_eq!(h.projectiles().len(), 5);

    for _ in 0..11 {
        h.tick();
    }
    let remaining = h.projectiles();
    assert_eq!(remaining.len(), 4);
    assert!(remaining.iter().all(|p| p.velocity.x != 0.0));
}

#[test]
fn test_lobbed_shot_bursts_at_aim_point() {
    let mut h = Harness::new();
    h.primed(DefenderKind::MelonPult, 2, 0);
    let aimed = h.still(AttackerKind::Gargantuar, 2, 6.0);
    let nearby = h.still(AttackerKind::Gargantuar, 3, 6.5);
    let closer = h.still(AttackerKind::Gargantuar, 2, 3.0);

    for _ in 0..40 {
        h.tick();
    }
    assert_eq!(h.health(aimed), Some(2920.0));
    assert_eq!(h.health(nearby), Some(2920.0));
    assert_eq!(h.health(closer), Some(3000.0), "lobbed shots fly over");
    assert!(h.projectiles().is_empty());
}

#[test]
fn test_lobbed_shot_velocity_tracks_its_aim() {
    let mut h = Harness::new();
    h.primed(DefenderKind::MelonPult, 2, 0);
    h.still(AttackerKind::Gargantuar, 2, 6.0);

    h.tick();
    let shots = h.projectiles();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].lane, 2);
    assert!((shots[0].velocity.x - 0.55).abs() < 1e-12);
    assert!((shots[0].position.x - 1.05).abs() < 1e-12);

    h.tick();
    let shot = &h.projectiles()[0];
    assert!((shot.velocity.x - (6.0 - 1.05) * 0.1).abs() < 1e-12);
    assert_eq!(shot.velocity.y, 0.0);
}

#[test]
fn test_attacker_and_projectile_state_carry_across_ticks() {
    let mut h = Harness::new();
    h.primed(DefenderKind::Peashooter, 1, 0);
    let walker = h.world.spawn_attacker(AttackerKind::Normal, 1, 8.0);

    for _ in 0..3 {
        h.tick();
    }
    assert!((h.attacker(walker).column - (8.0 - 3.0 * 0.1 * 0.05)).abs() < 1e-12);
    let peas = h.projectiles();
    assert_eq!(peas.len(), 1);
    assert!((peas[0].position.x - (0.6 + 3.0 * 0.25)).abs() < 1e-12);
}

#[test]
fn test_producer_drops_sun_at_its_cell() {
    let mut h = Harness::new();
    h.primed(DefenderKind::Sunflower, 1, 2);
    h.tick();
    let suns: Vec<Pickup> = h
        .world
        .ecs
        .query::<&Pickup>()
        .iter()
        .map(|(_, p)| p.clone())
        .collect();
    assert_eq!(suns.len(), 1);
    assert_eq!(suns[0].currency, Currency::Sun);
    assert_eq!(suns[0].value, 25);
    assert_eq!(suns[0].position.x, 24.0);
}

#[test]
fn test_magnet_strips_armor_in_reach() {
    let mut h = Harness::new();
    h.primed(DefenderKind::Magnet, 2, 2);
    let bucket = h.still(AttackerKind::Bucket, 1, 3.0);
    let distant = h.still(AttackerKind::Football, 4, 3.0);

    h.tick();
    assert!(!h.attacker(bucket).armored);
    assert_eq!(h.health(bucket), Some(200.0));
    assert!(h.attacker(distant).armored);
    assert_eq!(h.health(distant), Some(1600.0));
}

#[test]
fn test_lane_clear_hits_whole_lane() {
    let mut h = Harness::new();
    let pepper = h.primed(DefenderKind::Jalapeno, 3, 5);
    let near = h.still(AttackerKind::Normal, 3, 1.0);
    let far = h.still(AttackerKind::Normal, 3, 7.0);
    let spared = h.still(AttackerKind::Normal, 2, 4.0);

    h.tick();
    assert!(h.health(near).is_none());
    assert!(h.health(far).is_none());
    assert_eq!(h.health(spared), Some(200.0));
    assert!(!h.world.ecs.contains(pepper));
}

#[test]
fn test_melee_waits_out_windup_then_crushes() {
    let mut h = Harness::new();
    let squash = h.defender(DefenderKind::Squash, 0, 2);
    let prey = h.still(AttackerKind::Gargantuar, 0, 3.0);

    for _ in 0..10 {
        h.tick();
    }
    assert_eq!(h.health(prey), Some(3000.0));
    h.tick();
    assert_eq!(h.health(prey), Some(1200.0));
    assert!(!h.world.ecs.contains(squash));
}

#[test]
fn test_global_freeze_stops_everyone() {
    let mut h = Harness::new();
    h.primed(DefenderKind::IceShroom, 0, 0);
    let a = h.world.spawn_attacker(AttackerKind::Normal, 1, 5.0);
    let b = h.world.spawn_attacker(AttackerKind::Football, 4, 7.0);

    h.tick();
    for (entity, column) in [(a, 5.0), (b, 7.0)] {
        let attacker = h.attacker(entity);
        assert_eq!(attacker.freeze_ms, 9950.0);
        assert_eq!(attacker.column, column);
    }
}

// ---- Pickups ----

#[test]
fn test_pickup_drifts_then_expires() {
    let mut h = Harness::new();
    let sun = h
        .world
        .spawn_pickup(Currency::Sun, DVec2::new(50.0, 84.9), 25);

    h.tick();
    assert_eq!(h.world.ecs.get::<&Pickup>(sun).unwrap().position.y, 85.0);

    for _ in 0..198 {
        h.tick();
    }
    assert!(h.world.ecs.contains(sun));
    h.tick();
    assert!(!h.world.ecs.contains(sun));
}

#[test]
fn test_collected_pickup_credits_and_flies_home() {
    let mut h = Harness::new();
    let sun = h
        .world
        .spawn_pickup(Currency::Sun, DVec2::new(50.0, 40.0), 25);

    let credited = economy::collect_pickup(&mut h.world, entity_id(sun)).unwrap();
    assert_eq!(credited, (Currency::Sun, 25));
    assert_eq!(h.world.ledger.sun, 175);
    assert!(economy::collect_pickup(&mut h.world, entity_id(sun)).is_err());
    assert_eq!(h.world.ledger.sun, 175);

    for _ in 0..20 {
        h.tick();
    }
    assert!(!h.world.ecs.contains(sun));
}

#[test]
fn test_auto_collect_claims_new_pickups() {
    let mut h = Harness::new();
    h.world.auto_collect = true;
    h.world
        .spawn_pickup(Currency::Coin, DVec2::new(30.0, 30.0), 10);
    h.tick();
    assert_eq!(h.world.ledger.coins_earned, 10);
}

#[test]
fn test_sky_sun_falls_once_the_interval_has_passed() {
    let mut h = Harness::new();
    for _ in 0..100 {
        h.tick();
    }
    assert_eq!(h.world.ecs.query::<&Pickup>().iter().count(), 0);

    h.tick();
    let suns: Vec<Pickup> = h
        .world
        .ecs
        .query::<&Pickup>()
        .iter()
        .map(|(_, p)| p.clone())
        .collect();
    assert_eq!(suns.len(), 1);
    assert_eq!(suns[0].currency, Currency::Sun);
    assert_eq!(suns[0].value, 25);
    assert_eq!(h.world.sky_sun_timer_ms, 0);
}

// ---- Spawn director ----

#[test]
fn test_campaign_countdown_ramps_with_progress() {
    let mut world = World::campaign(1);
    world.director.countdown_ms = 50.0;
    let spawned = spawn_director::run(&mut world, &mut StepRng::new(0, 0));
    assert!(spawned.is_some());
    assert_eq!(world.director.spawned, 1);
    assert_eq!(world.director.countdown_ms, 7600.0);
    assert_eq!(world.director.progress(), 20.0);
}

#[test]
fn test_campaign_budget_caps_spawns() {
    let mut world = World::campaign(1);
    world.director.spawned = 5;
    world.director.countdown_ms = 0.0;
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert!(spawn_director::run(&mut world, &mut rng).is_none());
    assert!(world.director.budget_exhausted());
    assert_eq!(world.attacker_count(), 0);
}

#[test]
fn test_endless_difficulty_ramp() {
    let mut world = World::endless();
    world.director.countdown_ms = 50.0;
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    spawn_director::run(&mut world, &mut rng).unwrap();
    assert!((world.director.difficulty - 1.005).abs() < 1e-12);
    assert!((world.director.countdown_ms - 4000.0 / 1.005).abs() < 1e-9);
    assert!(!world.director.budget_exhausted());
}

#[test]
fn test_endless_progress_wraps() {
    let mut director = SpawnDirector::endless();
    director.spawned = 75;
    assert_eq!(director.progress(), 50.0);
    director.spawned = 100;
    assert_eq!(director.progress(), 0.0);
}

#[test]
fn test_first_spawn_after_three_seconds() {
    let mut h = Harness::new();
    h.world.director = SpawnDirector::campaign(1);
    for _ in 0..59 {
        assert!(h.tick().spawned.is_none());
    }
    assert!(h.tick().spawned.is_some());
}

#[test]
fn test_wave_cleared_only_when_budget_spent_and_field_empty() {
    let mut h = Harness::new();
    h.world.director.spawned = 5;
    let last = h.still(AttackerKind::Normal, 2, 6.0);
    assert!(!h.tick().wave_cleared);

    h.world.ecs.get::<&mut Health>(last).unwrap().current = 0.0;
    let report = h.tick();
    assert!(report.wave_cleared);
    assert_eq!(report.wave_progress, 100.0);
}
