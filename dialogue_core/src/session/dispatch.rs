//! Action dispatch - routes node enter/exit actions to the partner's triggers.

use conversants::ActorId;
use std::collections::HashMap;
use tracing::debug;

/// A handler that reacts to one named action.
pub struct ActionTrigger {
    action: String,
    on_trigger: Box<dyn FnMut()>,
}

impl ActionTrigger {
    pub fn new(action: impl Into<String>, on_trigger: impl FnMut() + 'static) -> Self {
        Self {
            action: action.into(),
            on_trigger: Box::new(on_trigger),
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Run the handler if `action_to_trigger` is the one it listens for.
    pub fn trigger(&mut self, action_to_trigger: &str) -> bool {
        if action_to_trigger != self.action {
            return false;
        }
        (self.on_trigger)();
        true
    }
}

impl std::fmt::Debug for ActionTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionTrigger")
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

/// Triggers registered per conversation partner.
#[derive(Debug, Default)]
pub struct ActionDispatcher {
    triggers: HashMap<ActorId, Vec<ActionTrigger>>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger on an actor.
    pub fn register(&mut self, actor: ActorId, trigger: ActionTrigger) {
        self.triggers.entry(actor).or_default().push(trigger);
    }

    /// Drop every trigger registered on an actor.
    pub fn clear(&mut self, actor: &ActorId) -> usize {
        self.triggers.remove(actor).map(|t| t.len()).unwrap_or(0)
    }

    pub fn trigger_count(&self, actor: &ActorId) -> usize {
        self.triggers.get(actor).map(Vec::len).unwrap_or(0)
    }

    /// Fire `action` on every matching trigger of `actor`.
    ///
    /// An empty action is a no-op. Returns how many triggers ran.
    pub fn dispatch(&mut self, actor: &ActorId, action: &str) -> usize {
        if action.is_empty() {
            return 0;
        }

        let fired = self
            .triggers
            .get_mut(actor)
            .map(|triggers| {
                triggers
                    .iter_mut()
                    .map(|trigger| trigger.trigger(action))
                    .filter(|&ran| ran)
                    .count()
            })
            .unwrap_or(0);

        debug!(partner = %actor, action, fired, "dispatched dialogue action");
        fired
    }
}
