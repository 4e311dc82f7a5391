//! Campaign persistence for GARDEN DEFENSE.
//!
//! The simulation talks to durable storage only through the
//! [`ProgressionStore`] trait: load once at session start, save after every
//! progression mutation. Missing or malformed data never reaches the core;
//! stores substitute the documented default instead.

pub mod error;
pub mod store;

pub use error::StoreError;
pub use store::{JsonFileStore, MemoryStore, ProgressionStore};

#[cfg(test)]
mod tests;
