//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the world, the session state machine, player
//! progression and the progression store. It processes player commands, runs
//! the tick systems and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use garden_campaign::ProgressionStore;
use garden_core::catalog;
use garden_core::commands::{PlayerCommand, RequestedState};
use garden_core::enums::{GameMode, SessionState, TickErrorPolicy};
use garden_core::events::GameEvent;
use garden_core::progression::ProgressionState;
use garden_core::state::GameStateSnapshot;
use garden_core::types::{Cell, SimTime};

use crate::economy;
use crate::error::{Rejection, TickError};
use crate::session::{Outcome, SessionStateMachine};
use crate::systems::{self, TickContext, TickReport};
use crate::tools;
use crate::world::World;

/// Slowest and fastest allowed speed multipliers.
const SPEED_RANGE: (f64, f64) = (0.25, 4.0);

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial speed multiplier (1.0 = normal).
    pub speed_multiplier: f64,
    pub error_policy: TickErrorPolicy,
    /// Campaign level whose completion wins the game. `None` = unbounded.
    pub final_level: Option<u32>,
    /// Whether new sessions start with auto-collect on.
    pub auto_collect: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            speed_multiplier: 1.0,
            error_policy: TickErrorPolicy::Contain,
            final_level: None,
            auto_collect: false,
        }
    }
}

/// The simulation engine. Owns the world and all session state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    session: SessionStateMachine,
    progression: ProgressionState,
    store: Box<dyn ProgressionStore>,
    config: SimConfig,
    speed_multiplier: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
    last_percent: Option<u32>,
}

impl SimulationEngine {
    /// Create an engine, loading progression from `store`.
    pub fn new(config: SimConfig, mut store: Box<dyn ProgressionStore>) -> Self {
        let progression = store.load();
        let mut world = World::campaign(progression.current_level);
        world.auto_collect = config.auto_collect;
        Self {
            world,
            time: SimTime::default(),
            session: SessionStateMachine::new(),
            progression,
            store,
            speed_multiplier: clamp_speed(config.speed_multiplier).unwrap_or(1.0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            last_percent: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Process queued commands, advance one tick if playing, and return the
    /// resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.session.state() == SessionState::Playing {
            self.run_systems();
            self.time.advance();
        }
        self.settle_coins();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.session.state(),
            self.speed_multiplier,
            &self.progression,
            events,
        )
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    /// The tick error that halted the session, if any.
    pub fn last_error(&self) -> Option<&TickError> {
        self.session.last_error()
    }

    /// Mutable world access for test setup.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(rejection) = self.handle_command(command.clone()) {
                tracing::debug!(?command, %rejection, "command rejected");
            }
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) -> Result<(), Rejection> {
        match command {
            PlayerCommand::PlaceDefender { kind, lane, column } => {
                self.session.require_playing()?;
                economy::place_defender(
                    &mut self.world,
                    &self.progression,
                    kind,
                    Cell::new(lane, column),
                )?;
            }
            PlayerCommand::UseTool { tool, lane, column } => {
                self.session.require_playing()?;
                tools::use_tool(&mut self.world, tool, Cell::new(lane, column))?;
            }
            PlayerCommand::CollectPickup { id } => {
                self.session.require_playing()?;
                economy::collect_pickup(&mut self.world, id)?;
                self.settle_coins();
            }
            PlayerCommand::SetAutoCollect { enabled } => {
                self.world.auto_collect = enabled;
                self.config.auto_collect = enabled;
            }
            PlayerCommand::StartSession { level, mode } => {
                if self.session.state() == SessionState::Playing {
                    return Err(Rejection::InvalidTransition {
                        from: SessionState::Playing,
                        to: SessionState::Playing,
                    });
                }
                self.start_session(level, mode)?;
            }
            PlayerCommand::SetSessionState { state } => {
                let (from, to) = match state {
                    RequestedState::Playing => (SessionState::Paused, SessionState::Playing),
                    RequestedState::Paused => (SessionState::Playing, SessionState::Paused),
                };
                if self.session.state() != from {
                    return Err(Rejection::InvalidTransition {
                        from: self.session.state(),
                        to,
                    });
                }
                self.session.transition(to)?;
            }
            PlayerCommand::NextLevel => {
                if self.session.state() != SessionState::LevelTransition {
                    return Err(Rejection::InvalidTransition {
                        from: self.session.state(),
                        to: SessionState::Playing,
                    });
                }
                self.start_session(self.world.level + 1, GameMode::Campaign)?;
            }
            PlayerCommand::ReturnToMenu => {
                self.session.transition(SessionState::Idle)?;
            }
            PlayerCommand::SetSpeedMultiplier { multiplier } => {
                self.speed_multiplier = clamp_speed(multiplier)?;
            }
            PlayerCommand::BuyUpgrade { kind } => {
                let level = economy::buy_upgrade(&mut self.progression, kind)?;
                tracing::info!(?kind, level, "upgrade bought");
                self.persist();
            }
        }
        Ok(())
    }

    /// Replace the world with a fresh session and start playing.
    fn start_session(&mut self, level: u32, mode: GameMode) -> Result<(), Rejection> {
        self.session.transition(SessionState::Playing)?;
        self.settle_coins();

        self.world = World::new(mode, level);
        self.world.auto_collect = self.config.auto_collect;
        self.time = SimTime::default();
        self.last_percent = None;
        tracing::info!(?mode, level = self.world.level, "session started");

        if mode == GameMode::Campaign && self.progression.current_level != self.world.level {
            self.progression.current_level = self.world.level;
            self.persist();
        }
        Ok(())
    }

    /// Run all systems in order and let the session react.
    fn run_systems(&mut self) {
        let ctx = TickContext {
            progression: &self.progression,
        };
        match systems::advance(&mut self.world, ctx, &mut self.rng) {
            Ok(report) => self.resolve(&report),
            Err(error) => self.session.on_tick_error(error, self.config.error_policy),
        }
    }

    fn resolve(&mut self, report: &TickReport) {
        let percent = report.wave_progress.floor() as u32;
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            self.events.push(GameEvent::WaveProgress { percent });
        }
        self.settle_coins();

        let outcome = self.session.evaluate(
            report,
            self.world.mode,
            self.world.level,
            self.config.final_level,
        );
        match outcome {
            Some(Outcome::Lost) => {
                tracing::info!(level = self.world.level, tick = self.time.tick, "game over");
                self.events.push(GameEvent::GameOver);
            }
            Some(Outcome::LevelComplete) => self.complete_level(),
            Some(Outcome::Victory) => {
                let level = self.world.level;
                tracing::info!(level, "campaign won");
                self.progression.max_level_reached = self.progression.max_level_reached.max(level);
                self.persist();
                self.events.push(GameEvent::Victory { level });
            }
            None => {}
        }
    }

    /// Advance progression past a cleared campaign level.
    fn complete_level(&mut self) {
        let level = self.world.level;
        let next = level + 1;
        let unlocked =
            catalog::unlocked_at_level(next).filter(|&kind| self.progression.unlock(kind));
        self.progression.max_level_reached = self.progression.max_level_reached.max(next);
        self.progression.current_level = next;
        self.persist();
        tracing::info!(level, ?unlocked, "level complete");
        self.events.push(GameEvent::LevelComplete { level, unlocked });
    }

    /// Move collected coins into progression.
    fn settle_coins(&mut self) {
        let coins = self.world.ledger.take_coins();
        if coins > 0 {
            self.progression.coins = self.progression.coins.saturating_add(coins);
            self.persist();
        }
    }

    fn persist(&mut self) {
        if let Err(error) = self.store.save(&self.progression) {
            tracing::warn!(%error, "failed to save progression");
        }
    }
}

fn clamp_speed(multiplier: f64) -> Result<f64, Rejection> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(Rejection::InvalidSpeed(multiplier));
    }
    Ok(multiplier.clamp(SPEED_RANGE.0, SPEED_RANGE.1))
}
