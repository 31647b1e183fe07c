//! Conversant definitions.

use serde::{Deserialize, Serialize};

use super::ActorId;

/// An actor that can be addressed in a conversation, player or partner.
///
/// The session only needs identity and a display name from either side;
/// everything the partner *does* in response to dialogue is wired up through
/// action triggers registered against [`Conversant::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversant {
    pub id: ActorId,
    pub name: String,
}

impl Conversant {
    /// Create a new conversant with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
        }
    }

    /// Name to show above the conversant's lines.
    pub fn display_name(&self) -> &str {
        &self.name
    }
}
