//! Dialogue node definitions - single beats of a conversation.

use conversants::PredicateEvaluator;
use serde::{Deserialize, Serialize};
use std::ops::Add;
use uuid::Uuid;

use super::Condition;

/// Unique, stable identifier for nodes. Edges refer to nodes by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point on the authoring canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Editor-only layout of a node. Irrelevant to traversal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Vertical space the node header and link buttons take up.
const NODE_CHROME_HEIGHT: f32 = 60.0;

impl Default for Rect {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 150.0,
        }
    }
}

impl Rect {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Height left for the text box once the node chrome is drawn.
    pub fn text_box_height(&self) -> f32 {
        (self.height - NODE_CHROME_HEIGHT).max(0.0)
    }
}

/// A single conversation beat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueNode {
    id: NodeId,

    /// `true` for the player's lines, `false` for the partner's.
    #[serde(default)]
    pub is_player_speaking: bool,

    #[serde(default)]
    pub text: String,

    /// Action fired when the node becomes current. Empty means none.
    #[serde(default)]
    pub on_enter_action: String,

    /// Action fired when the node is left. Empty means none.
    #[serde(default)]
    pub on_exit_action: String,

    /// Guard deciding whether the node is reachable right now.
    #[serde(default)]
    pub condition: Condition,

    /// Child node ids in presentation order.
    #[serde(default)]
    children: Vec<NodeId>,

    #[serde(default)]
    pub rect: Rect,
}

impl DialogueNode {
    /// Create a detached non-player node with a fresh id.
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            is_player_speaking: false,
            text: String::new(),
            on_enter_action: String::new(),
            on_exit_action: String::new(),
            condition: Condition::always(),
            children: Vec::new(),
            rect: Rect::default(),
        }
    }

    /// Set the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Mark the node as spoken by the player.
    pub fn spoken_by_player(mut self) -> Self {
        self.is_player_speaking = true;
        self
    }

    pub fn with_enter_action(mut self, action: impl Into<String>) -> Self {
        self.on_enter_action = action.into();
        self
    }

    pub fn with_exit_action(mut self, action: impl Into<String>) -> Self {
        self.on_exit_action = action.into();
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Add child links. Only usable before the node joins a graph; graphs
    /// validate links through `DialogueGraph::link_child`.
    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeId>) -> Self {
        for child in children {
            self.add_child(child);
        }
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_child(&self, id: &NodeId) -> bool {
        self.children.contains(id)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn position(&self) -> Position {
        self.rect.position()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_player_speaking(&mut self, is_player_speaking: bool) {
        self.is_player_speaking = is_player_speaking;
    }

    pub fn set_position(&mut self, position: Position) {
        self.rect.x = position.x;
        self.rect.y = position.y;
    }

    /// Check this node's guard.
    pub fn check_condition(&self, evaluators: &[&dyn PredicateEvaluator]) -> bool {
        self.condition.check(evaluators)
    }

    /// Duplicate links carry no meaning, so a repeated id is ignored.
    pub(crate) fn add_child(&mut self, id: NodeId) -> bool {
        if self.children.contains(&id) {
            return false;
        }
        self.children.push(id);
        true
    }

    /// Idempotent: removing an absent id is a no-op.
    pub(crate) fn remove_child(&mut self, id: &NodeId) -> bool {
        let before = self.children.len();
        self.children.retain(|child| child != id);
        self.children.len() != before
    }
}

impl Default for DialogueNode {
    fn default() -> Self {
        Self::new()
    }
}
