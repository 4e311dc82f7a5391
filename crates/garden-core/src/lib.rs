//! Core types and definitions for the GARDEN DEFENSE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, archetype catalogs, commands, state snapshots, events,
//! progression and constants. It has no dependency on any runtime.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod progression;
pub mod state;
pub mod types;
