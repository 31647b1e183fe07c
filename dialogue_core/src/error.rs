//! Error types for graph editing, sessions and asset loading.

use thiserror::Error;

use crate::dialogue::NodeId;

pub type Result<T> = std::result::Result<T, DialogueError>;

#[derive(Debug, Error)]
pub enum DialogueError {
    /// The graph has no nodes to take a root or last node from.
    #[error("Dialogue graph has no nodes")]
    EmptyGraph,

    #[error("Dialogue node not found: {0}")]
    NodeNotFound(NodeId),

    /// The only remaining node of a graph cannot be deleted.
    #[error("Cannot delete the last node of a dialogue graph")]
    LastNode,

    #[error("Node {0} is not one of the currently offered choices")]
    ChoiceNotOffered(NodeId),

    #[error("No conversation is active")]
    NotInConversation,

    /// The player has to pick a choice before the conversation can advance.
    #[error("Conversation is waiting for the player to choose")]
    AwaitingChoice,

    #[error("Conversation is not waiting for a choice")]
    NotAwaitingChoice,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}
