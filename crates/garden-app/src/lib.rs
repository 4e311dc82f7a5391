//! Garden host application.
//!
//! Wires the simulation, campaign persistence and a real-time game loop
//! together for the `garden` command-line driver.

pub mod game_loop;
pub mod script;
pub mod state;

pub use garden_core as core;
