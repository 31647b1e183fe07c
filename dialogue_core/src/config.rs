//! Engine configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dialogue::Position;
use crate::error::Result;
use crate::random::{RandomPort, SeededRandom, SystemRandom};

/// Where a freshly created child lands relative to its parent.
pub const DEFAULT_NEW_NODE_OFFSET: Position = Position { x: 250.0, y: 0.0 };

/// Configuration for graphs and sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Speaker name shown while the player is choosing.
    pub player_name: String,

    /// Offset added to a parent's position when creating a child node.
    pub new_node_offset: Position,

    /// Seed for non-player branch selection. `None` uses the thread RNG.
    pub random_seed: Option<u64>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            new_node_offset: DEFAULT_NEW_NODE_OFFSET,
            random_seed: None,
        }
    }
}

impl DialogueConfig {
    /// Parse a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Build the random source this configuration asks for.
    pub fn random_source(&self) -> Box<dyn RandomPort> {
        match self.random_seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(SystemRandom::new()),
        }
    }
}
