//! Scripted player input: commands scheduled against simulation ticks.
//!
//! A script is a JSON array of `{ "tick": N, "command": { "type": ... } }`
//! entries. Each command is queued before the engine runs the tick whose
//! number matches.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use garden_core::commands::PlayerCommand;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub tick: u64,
    pub command: PlayerCommand,
}

/// Commands ordered by tick, consumed as time advances.
#[derive(Debug, Clone, Default)]
pub struct CommandScript {
    entries: Vec<ScriptEntry>,
    cursor: usize,
}

impl CommandScript {
    pub fn new(mut entries: Vec<ScriptEntry>) -> Self {
        entries.sort_by_key(|entry| entry.tick);
        Self { entries, cursor: 0 }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading command script {}", path.display()))?;
        let entries: Vec<ScriptEntry> = serde_json::from_str(&json)
            .with_context(|| format!("parsing command script {}", path.display()))?;
        Ok(Self::new(entries))
    }

    /// Commands scheduled at or before `tick` that have not been taken yet.
    pub fn take_due(&mut self, tick: u64) -> Vec<PlayerCommand> {
        let start = self.cursor;
        while self
            .entries
            .get(self.cursor)
            .is_some_and(|entry| entry.tick <= tick)
        {
            self.cursor += 1;
        }
        self.entries[start..self.cursor]
            .iter()
            .map(|entry| entry.command.clone())
            .collect()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.entries.len()
    }
}
