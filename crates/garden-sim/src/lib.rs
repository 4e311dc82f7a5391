//! Tick simulation for GARDEN DEFENSE.
//!
//! [`World`] holds every entity and per-session counter; [`systems::advance`]
//! runs one fixed tick over it in phase order. [`SimulationEngine`] wraps the
//! world with the session state machine, command processing and progression
//! persistence.

pub mod economy;
pub mod engine;
pub mod error;
pub mod session;
pub mod systems;
pub mod tools;
pub mod world;

pub use engine::{SimConfig, SimulationEngine};
pub use error::{Phase, Rejection, TickError};
pub use systems::{advance, TickContext, TickReport};
pub use world::World;
