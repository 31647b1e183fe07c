//! Dialogue asset persistence.
//!
//! Assets are stored as pretty-printed JSON. The graph's id index is never
//! written; it is rebuilt on load, and an asset with no nodes comes back
//! with a single fresh root.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dialogue::DialogueGraph;
use crate::error::{DialogueError, Result};

/// Current asset format version.
const ASSET_VERSION: u32 = 1;

/// A named dialogue graph as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueAsset {
    /// Format version for compatibility checking.
    pub version: u32,

    pub name: String,

    pub graph: DialogueGraph,
}

impl DialogueAsset {
    pub fn new(name: impl Into<String>, graph: DialogueGraph) -> Self {
        Self {
            version: ASSET_VERSION,
            name: name.into(),
            graph,
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from a JSON string, checking the format version.
    pub fn from_json(source: &str) -> Result<Self> {
        let asset: Self = serde_json::from_str(source)?;
        if asset.version != ASSET_VERSION {
            return Err(DialogueError::VersionMismatch {
                expected: ASSET_VERSION,
                found: asset.version,
            });
        }
        Ok(asset)
    }

    /// Save to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::{Condition, Position, Predicate};

    fn sample_asset() -> DialogueAsset {
        let mut graph = DialogueGraph::new();
        let root = graph.root_node().unwrap().id();
        graph.set_text(&root, "Welcome to the guild.").unwrap();
        let reply = graph.create_node(Some(root), Position::default()).unwrap();
        let node = graph.node_mut(&reply).unwrap();
        node.set_text("I want to join.");
        node.on_enter_action = "open_ledger".to_string();
        node.condition = Condition::when(Predicate::new("IsAdventurer").negated());

        DialogueAsset::new("guild_intro", graph)
    }

    #[test]
    fn test_json_round_trip_preserves_structure() {
        let asset = sample_asset();
        let loaded = DialogueAsset::from_json(&asset.to_json().unwrap()).unwrap();

        assert_eq!(loaded.name, "guild_intro");
        assert_eq!(loaded.graph.all_nodes(), asset.graph.all_nodes());

        let root = loaded.graph.root_node().unwrap();
        let children = loaded.graph.children_of(root);
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].on_enter_action, "open_ledger");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guild_intro.json");

        sample_asset().save(&path).unwrap();
        let loaded = DialogueAsset::load(&path).unwrap();

        assert_eq!(loaded.graph.node_count(), 2);
    }

    #[test]
    fn test_empty_asset_is_healed() {
        let json = r#"{"version":1,"name":"blank","graph":{"nodes":[]}}"#;
        let loaded = DialogueAsset::from_json(json).unwrap();

        assert_eq!(loaded.graph.node_count(), 1);
        assert!(loaded.graph.root_node().is_ok());
    }

    #[test]
    fn test_minimal_node_records() {
        let json = r#"{
            "version": 1,
            "name": "bark",
            "graph": {
                "nodes": [{ "id": "6c1f2a52-8a62-4f5e-9a8e-0d3c1b3f9c11", "text": "Hmph." }],
                "new_node_offset": { "x": 100.0, "y": 0.0 }
            }
        }"#;
        let loaded = DialogueAsset::from_json(json).unwrap();
        let root = loaded.graph.root_node().unwrap();

        assert_eq!(root.text, "Hmph.");
        assert!(!root.is_player_speaking);
        assert!(root.condition.is_unconditional());
        assert_eq!(loaded.graph.new_node_offset(), Position::new(100.0, 0.0));
    }

    #[test]
    fn test_version_mismatch() {
        let json = r#"{"version":99,"name":"future","graph":{"nodes":[]}}"#;
        assert!(matches!(
            DialogueAsset::from_json(json),
            Err(DialogueError::VersionMismatch {
                expected: 1,
                found: 99
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            DialogueAsset::load(dir.path().join("nope.json")),
            Err(DialogueError::Io(_))
        ));
    }
}
