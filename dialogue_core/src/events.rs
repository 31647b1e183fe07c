//! Conversation-updated notifications for presentation layers.
//!
//! Notifications carry no payload; subscribers re-query the session's
//! accessors to find out what changed.

/// Handle returned by [`UpdateNotifier::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Synchronous fan-out of "conversation updated" notifications.
#[derive(Default)]
pub struct UpdateNotifier {
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut()>)>,
    next_id: u64,
}

impl UpdateNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback, invoked once per completed session transition.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Call every subscriber in registration order.
    pub fn notify(&mut self) {
        for (_, callback) in &mut self.subscribers {
            callback();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for UpdateNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateNotifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
