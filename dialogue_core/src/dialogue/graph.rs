//! Dialogue graph - owns every node of one conversation asset.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

use super::{DialogueNode, NodeId, Position};
use crate::config::{DialogueConfig, DEFAULT_NEW_NODE_OFFSET};
use crate::error::{DialogueError, Result};

/// How an authoring surface should present a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// One of the player's lines.
    Player,
    /// The root the conversation starts from.
    Start,
    /// A non-player leaf.
    End,
    Normal,
}

/// The main dialogue graph structure.
///
/// Nodes are stored in insertion order; the first one is the root. Edges are
/// node ids, resolved through an id -> position index that is recomputed
/// from scratch after every insert or removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "GraphRecord")]
pub struct DialogueGraph {
    nodes: Vec<DialogueNode>,

    /// Offset from a parent at which new children are placed.
    new_node_offset: Position,

    /// Index: NodeId -> position in `nodes`.
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
}

/// Persisted shape of a graph, before healing and indexing.
#[derive(Deserialize)]
struct GraphRecord {
    #[serde(default)]
    nodes: Vec<DialogueNode>,
    #[serde(default = "default_new_node_offset")]
    new_node_offset: Position,
}

fn default_new_node_offset() -> Position {
    DEFAULT_NEW_NODE_OFFSET
}

impl From<GraphRecord> for DialogueGraph {
    fn from(record: GraphRecord) -> Self {
        Self::from_parts(record.nodes, record.new_node_offset)
    }
}

impl Default for DialogueGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueGraph {
    /// Create a graph holding a single empty root node.
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), DEFAULT_NEW_NODE_OFFSET)
    }

    /// Create a single-root graph using the configured new-node offset.
    pub fn with_config(config: &DialogueConfig) -> Self {
        Self::from_parts(Vec::new(), config.new_node_offset)
    }

    /// Build a graph from prepared nodes. The first node becomes the root.
    pub fn from_nodes(nodes: impl IntoIterator<Item = DialogueNode>) -> Self {
        Self::from_parts(nodes.into_iter().collect(), DEFAULT_NEW_NODE_OFFSET)
    }

    fn from_parts(nodes: Vec<DialogueNode>, new_node_offset: Position) -> Self {
        let mut graph = Self {
            nodes,
            new_node_offset,
            index: HashMap::new(),
        };
        if graph.nodes.is_empty() {
            debug!("dialogue graph has no nodes, adding a root");
            graph.nodes.push(DialogueNode::new());
        }
        graph.rebuild_index();
        graph
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id(), position))
            .collect();
    }

    /// All nodes in insertion order.
    pub fn all_nodes(&self) -> &[DialogueNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn new_node_offset(&self) -> Position {
        self.new_node_offset
    }

    pub fn set_new_node_offset(&mut self, offset: Position) {
        self.new_node_offset = offset;
    }

    /// The node every conversation starts from.
    pub fn root_node(&self) -> Result<&DialogueNode> {
        self.nodes.first().ok_or(DialogueError::EmptyGraph)
    }

    /// The most recently added node.
    pub fn last_node(&self) -> Result<&DialogueNode> {
        self.nodes.last().ok_or(DialogueError::EmptyGraph)
    }

    /// Get node by ID.
    pub fn node(&self, id: &NodeId) -> Option<&DialogueNode> {
        self.index.get(id).map(|&position| &self.nodes[position])
    }

    /// Get mutable node by ID, for text, speaker, layout, action and guard edits.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut DialogueNode> {
        let position = *self.index.get(id)?;
        Some(&mut self.nodes[position])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Resolve a node's children in order, skipping ids that no longer exist.
    pub fn children_of(&self, node: &DialogueNode) -> Vec<&DialogueNode> {
        node.children()
            .iter()
            .filter_map(|id| {
                let child = self.node(id);
                if child.is_none() {
                    trace!(parent = %node.id(), child = %id, "skipping dangling child reference");
                }
                child
            })
            .collect()
    }

    /// Children spoken by the player, in order.
    pub fn player_children_of(&self, node: &DialogueNode) -> Vec<&DialogueNode> {
        self.children_of(node)
            .into_iter()
            .filter(|child| child.is_player_speaking)
            .collect()
    }

    /// Children spoken by the non-player partner, in order.
    pub fn npc_children_of(&self, node: &DialogueNode) -> Vec<&DialogueNode> {
        self.children_of(node)
            .into_iter()
            .filter(|child| !child.is_player_speaking)
            .collect()
    }

    /// Create a node with a fresh id.
    ///
    /// With a parent, the node takes the opposite speaker, is linked as the
    /// parent's last child, and is placed at the parent's position plus the
    /// graph's new-node offset. Without one, it is placed at `offset` and
    /// left unlinked.
    pub fn create_node(&mut self, parent: Option<NodeId>, offset: Position) -> Result<NodeId> {
        let mut node = DialogueNode::new();
        let id = node.id();

        match parent {
            Some(parent_id) => {
                let new_node_offset = self.new_node_offset;
                let parent = self
                    .node_mut(&parent_id)
                    .ok_or(DialogueError::NodeNotFound(parent_id))?;
                parent.add_child(id);
                node.set_player_speaking(!parent.is_player_speaking);
                node.set_position(parent.position() + new_node_offset);
            }
            None => node.set_position(offset),
        }

        self.nodes.push(node);
        self.rebuild_index();
        debug!(node = %id, parent = ?parent.map(|p| p.to_string()), "created dialogue node");
        Ok(id)
    }

    /// Delete a node and every link pointing at it.
    pub fn delete_node(&mut self, id: &NodeId) -> Result<DialogueNode> {
        let position = *self.index.get(id).ok_or(DialogueError::NodeNotFound(*id))?;
        if self.nodes.len() == 1 {
            return Err(DialogueError::LastNode);
        }

        let removed = self.nodes.remove(position);
        self.rebuild_index();
        for node in &mut self.nodes {
            node.remove_child(id);
        }

        debug!(node = %id, "deleted dialogue node");
        Ok(removed)
    }

    /// Link `child` under `parent`. Returns `false` if the link already existed.
    pub fn link_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<bool> {
        if !self.contains(child) {
            return Err(DialogueError::NodeNotFound(*child));
        }
        let parent = self
            .node_mut(parent)
            .ok_or(DialogueError::NodeNotFound(*parent))?;
        Ok(parent.add_child(*child))
    }

    /// Remove the `parent` -> `child` link. Returns `false` if there was none.
    pub fn unlink_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<bool> {
        let parent = self
            .node_mut(parent)
            .ok_or(DialogueError::NodeNotFound(*parent))?;
        Ok(parent.remove_child(child))
    }

    pub fn set_text(&mut self, id: &NodeId, text: impl Into<String>) -> Result<()> {
        self.edit(id, |node| node.set_text(text))
    }

    pub fn set_player_speaking(&mut self, id: &NodeId, is_player_speaking: bool) -> Result<()> {
        self.edit(id, |node| node.set_player_speaking(is_player_speaking))
    }

    pub fn set_position(&mut self, id: &NodeId, position: Position) -> Result<()> {
        self.edit(id, |node| node.set_position(position))
    }

    fn edit(&mut self, id: &NodeId, apply: impl FnOnce(&mut DialogueNode)) -> Result<()> {
        let node = self.node_mut(id).ok_or(DialogueError::NodeNotFound(*id))?;
        apply(node);
        Ok(())
    }

    /// The topmost node under a canvas point. Later nodes draw over earlier ones.
    pub fn node_at_point(&self, point: Position) -> Option<&DialogueNode> {
        self.nodes.iter().rev().find(|node| node.rect.contains(point))
    }

    pub fn node_kind(&self, node: &DialogueNode) -> NodeKind {
        if node.is_player_speaking {
            NodeKind::Player
        } else if self.nodes.first().map(DialogueNode::id) == Some(node.id()) {
            NodeKind::Start
        } else if node.is_leaf() {
            NodeKind::End
        } else {
            NodeKind::Normal
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Edit {
        /// Create a child under the node at this (wrapped) position.
        CreateChild(usize),
        CreateDetached,
        /// Delete the node at this (wrapped) position.
        Delete(usize),
        /// Link two nodes by (wrapped) position.
        Link(usize, usize),
    }

    fn edit_strategy() -> impl Strategy<Value = Edit> {
        prop_oneof![
            (0..16usize).prop_map(Edit::CreateChild),
            Just(Edit::CreateDetached),
            (0..16usize).prop_map(Edit::Delete),
            (0..16usize, 0..16usize).prop_map(|(a, b)| Edit::Link(a, b)),
        ]
    }

    fn id_at(graph: &DialogueGraph, position: usize) -> NodeId {
        graph.all_nodes()[position % graph.node_count()].id()
    }

    fn apply(graph: &mut DialogueGraph, edit: &Edit) -> Option<NodeId> {
        match *edit {
            Edit::CreateChild(p) => {
                let parent = id_at(graph, p);
                graph.create_node(Some(parent), Position::default()).ok();
                None
            }
            Edit::CreateDetached => {
                graph.create_node(None, Position::default()).ok();
                None
            }
            Edit::Delete(p) => {
                let id = id_at(graph, p);
                graph.delete_node(&id).ok().map(|node| node.id())
            }
            Edit::Link(a, b) => {
                let (parent, child) = (id_at(graph, a), id_at(graph, b));
                graph.link_child(&parent, &child).ok();
                None
            }
        }
    }

    proptest! {
        #[test]
        fn prop_children_match_existing_links(edits in proptest::collection::vec(edit_strategy(), 0..40)) {
            let mut graph = DialogueGraph::new();
            for edit in &edits {
                apply(&mut graph, edit);
            }

            prop_assert!(graph.node_count() >= 1);
            prop_assert_eq!(graph.root_node().unwrap().id(), graph.all_nodes()[0].id());

            for node in graph.all_nodes() {
                let expected: Vec<NodeId> = node
                    .children()
                    .iter()
                    .copied()
                    .filter(|id| graph.all_nodes().iter().any(|n| n.id() == *id))
                    .collect();
                let resolved: Vec<NodeId> = graph.children_of(node).iter().map(|n| n.id()).collect();
                prop_assert_eq!(resolved, expected);
            }
        }

        #[test]
        fn prop_no_dangling_links_after_delete(edits in proptest::collection::vec(edit_strategy(), 0..40)) {
            let mut graph = DialogueGraph::new();
            let mut deleted = Vec::new();
            for edit in &edits {
                deleted.extend(apply(&mut graph, edit));
            }

            for id in &deleted {
                prop_assert!(graph.all_nodes().iter().all(|n| !n.has_child(id)));
                prop_assert!(graph.node(id).is_none());
            }
        }
    }
}
