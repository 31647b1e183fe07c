//! Conversation session - the player's side of an active conversation.
//!
//! A session walks a [`DialogueGraph`] one beat at a time:
//! 1. **Start**: enter the root node
//! 2. **Next**: if the player has condition-passing replies, wait for a choice;
//!    otherwise pick one condition-passing partner line at random
//! 3. **Select**: enter the chosen reply and immediately advance past it
//! 4. **Quit**: leave the current node and return to idle
//!
//! Every completed transition fires exactly one update notification.

mod dispatch;

pub use dispatch::*;

use conversants::{ActorId, Conversant, PredicateEvaluator};
use std::rc::Rc;
use tracing::{debug, warn};

use crate::config::DialogueConfig;
use crate::dialogue::{DialogueGraph, DialogueNode, NodeId};
use crate::error::{DialogueError, Result};
use crate::events::{SubscriptionId, UpdateNotifier};
use crate::random::{RandomPort, SystemRandom};

/// Where a session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    InConversation { awaiting_choice: bool },
}

/// What a call to [`ConversationSession::next`] led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The player now has to pick one of the offered choices.
    AwaitingChoice,
    /// The partner continued with this node.
    Continued(NodeId),
    /// The conversation had nowhere to go and was closed.
    Ended,
}

/// Runtime traversal state for one player talking to one partner.
///
/// The graph is shared through an `Rc`, so it cannot be edited while a
/// conversation over it is running.
pub struct ConversationSession {
    player: Conversant,
    graph: Option<Rc<DialogueGraph>>,
    current_node: Option<NodeId>,
    partner: Option<Conversant>,
    /// Replies offered to the player, fixed when the choice is entered.
    /// Non-empty exactly while the session awaits a choice.
    choices: Vec<NodeId>,
    evaluators: Vec<Box<dyn PredicateEvaluator>>,
    dispatcher: ActionDispatcher,
    random: Box<dyn RandomPort>,
    notifier: UpdateNotifier,
}

impl ConversationSession {
    /// Create an idle session for the named player.
    pub fn new(player_name: impl Into<String>) -> Self {
        Self::with_player(Conversant::new(player_name))
    }

    /// Create an idle session for an existing player conversant.
    pub fn with_player(player: Conversant) -> Self {
        Self {
            player,
            graph: None,
            current_node: None,
            partner: None,
            choices: Vec::new(),
            evaluators: Vec::new(),
            dispatcher: ActionDispatcher::new(),
            random: Box::new(SystemRandom::new()),
            notifier: UpdateNotifier::new(),
        }
    }

    /// Create an idle session from configuration.
    pub fn from_config(config: &DialogueConfig) -> Self {
        Self::new(config.player_name.clone()).with_random(config.random_source())
    }

    /// Replace the random source used for partner lines.
    pub fn with_random(mut self, random: Box<dyn RandomPort>) -> Self {
        self.random = random;
        self
    }

    /// Register an evaluator consulted by every guard condition.
    pub fn add_evaluator(&mut self, evaluator: impl PredicateEvaluator + 'static) {
        self.evaluators.push(Box::new(evaluator));
    }

    /// Register an action trigger on an actor.
    pub fn register_trigger(&mut self, actor: ActorId, trigger: ActionTrigger) {
        self.dispatcher.register(actor, trigger);
    }

    /// Direct access to the registered triggers.
    pub fn dispatcher_mut(&mut self) -> &mut ActionDispatcher {
        &mut self.dispatcher
    }

    /// Subscribe to conversation-updated notifications.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        self.notifier.subscribe(callback)
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // --- queries ---

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        if self.is_active() {
            SessionState::InConversation {
                awaiting_choice: self.is_choosing(),
            }
        } else {
            SessionState::Idle
        }
    }

    /// Whether a conversation is running.
    pub fn is_active(&self) -> bool {
        self.graph.is_some()
    }

    /// Whether the player must pick a choice before the conversation moves on.
    pub fn is_choosing(&self) -> bool {
        !self.choices.is_empty()
    }

    pub fn player(&self) -> &Conversant {
        &self.player
    }

    pub fn partner(&self) -> Option<&Conversant> {
        self.partner.as_ref()
    }

    pub fn graph(&self) -> Option<&DialogueGraph> {
        self.graph.as_deref()
    }

    pub fn current_node(&self) -> Option<&DialogueNode> {
        self.graph.as_ref()?.node(self.current_node.as_ref()?)
    }

    /// Text of the current node, or an empty string when idle.
    pub fn current_text(&self) -> &str {
        self.current_node().map(|node| node.text.as_str()).unwrap_or("")
    }

    /// The player's name while choosing, otherwise the partner's.
    pub fn current_speaker_name(&self) -> &str {
        if self.is_choosing() {
            self.player.display_name()
        } else {
            self.partner
                .as_ref()
                .map(Conversant::display_name)
                .unwrap_or("")
        }
    }

    /// Player replies offered by the last [`next`](Self::next). Empty unless
    /// the session is choosing.
    ///
    /// Guards are judged once, when the choice is entered. Actions fired
    /// afterwards do not change the offer.
    pub fn offered_choices(&self) -> Vec<&DialogueNode> {
        match self.graph.as_deref() {
            Some(graph) => self.choices.iter().filter_map(|id| graph.node(id)).collect(),
            None => Vec::new(),
        }
    }

    /// Whether the current node has any condition-passing child at all.
    pub fn has_next(&self) -> bool {
        match (self.graph.as_deref(), self.current_node()) {
            (Some(graph), Some(node)) => !self.filter_on_condition(graph.children_of(node)).is_empty(),
            _ => false,
        }
    }

    // --- transitions ---

    /// Start a conversation at the graph's root.
    ///
    /// An already running conversation is quit first.
    pub fn start(&mut self, partner: Conversant, graph: Rc<DialogueGraph>) -> Result<()> {
        let root = graph.root_node()?.id();

        if self.is_active() {
            debug!(partner = %partner.id, "restarting conversation");
            self.quit();
        }

        debug!(partner = %partner.id, node = %root, "starting conversation");
        self.graph = Some(graph);
        self.partner = Some(partner);
        self.current_node = Some(root);
        self.choices.clear();
        self.trigger_enter_action();
        self.notifier.notify();
        Ok(())
    }

    /// Advance past the current node.
    pub fn next(&mut self) -> Result<Advance> {
        let graph = self.graph.clone().ok_or(DialogueError::NotInConversation)?;
        if self.is_choosing() {
            return Err(DialogueError::AwaitingChoice);
        }
        let current_id = self.current_node.ok_or(DialogueError::NotInConversation)?;
        let current = graph
            .node(&current_id)
            .ok_or(DialogueError::NodeNotFound(current_id))?;

        let choices: Vec<NodeId> = self
            .filter_on_condition(graph.player_children_of(current))
            .into_iter()
            .map(DialogueNode::id)
            .collect();
        if !choices.is_empty() {
            self.choices = choices;
            self.trigger_exit_action();
            self.notifier.notify();
            return Ok(Advance::AwaitingChoice);
        }

        let candidates: Vec<NodeId> = self
            .filter_on_condition(graph.npc_children_of(current))
            .into_iter()
            .map(DialogueNode::id)
            .collect();
        self.trigger_exit_action();

        if candidates.is_empty() {
            warn!(
                node = %current_id,
                "a non-player node must not be a terminal node, ending conversation"
            );
            self.end_conversation();
            return Ok(Advance::Ended);
        }

        let index = self.random.gen_index(candidates.len()).min(candidates.len() - 1);
        let next = candidates[index];
        self.current_node = Some(next);
        self.trigger_enter_action();
        self.notifier.notify();
        Ok(Advance::Continued(next))
    }

    /// Take one of the offered player replies and continue past it.
    pub fn select_choice(&mut self, chosen: &NodeId) -> Result<Advance> {
        if !self.is_active() {
            return Err(DialogueError::NotInConversation);
        }
        if !self.is_choosing() {
            return Err(DialogueError::NotAwaitingChoice);
        }
        if !self.choices.contains(chosen) {
            return Err(DialogueError::ChoiceNotOffered(*chosen));
        }

        debug!(node = %chosen, "player selected choice");
        self.current_node = Some(*chosen);
        self.choices.clear();
        self.trigger_enter_action();
        self.next()
    }

    /// End the conversation, firing the current node's exit action. Does
    /// nothing when idle.
    pub fn quit(&mut self) {
        if !self.is_active() {
            return;
        }
        self.trigger_exit_action();
        self.end_conversation();
    }

    fn end_conversation(&mut self) {
        debug!(
            partner = ?self.partner.as_ref().map(|p| p.id.to_string()),
            "conversation ended"
        );
        self.graph = None;
        self.current_node = None;
        self.partner = None;
        self.choices.clear();
        self.notifier.notify();
    }

    fn filter_on_condition<'a>(&self, nodes: Vec<&'a DialogueNode>) -> Vec<&'a DialogueNode> {
        let evaluators: Vec<&dyn PredicateEvaluator> =
            self.evaluators.iter().map(|evaluator| evaluator.as_ref()).collect();
        nodes
            .into_iter()
            .filter(|node| node.check_condition(&evaluators))
            .collect()
    }

    fn trigger_enter_action(&mut self) {
        if let Some(action) = self.current_node().map(|node| node.on_enter_action.clone()) {
            self.trigger_action(&action);
        }
    }

    fn trigger_exit_action(&mut self) {
        if let Some(action) = self.current_node().map(|node| node.on_exit_action.clone()) {
            self.trigger_action(&action);
        }
    }

    fn trigger_action(&mut self, action: &str) {
        if action.is_empty() {
            return;
        }
        if let Some(partner) = self.partner.as_ref().map(|p| p.id) {
            self.dispatcher.dispatch(&partner, action);
        }
    }
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("player", &self.player)
            .field("state", &self.state())
            .field("current_node", &self.current_node)
            .field("partner", &self.partner)
            .field("choices", &self.choices)
            .field("evaluators", &self.evaluators.len())
            .finish_non_exhaustive()
    }
}
