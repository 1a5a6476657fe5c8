use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use super::InputEvent;

type Listener = Box<dyn FnMut(&InputEvent)>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    once: bool,
    callback: Listener,
}

/// Synchronous publish/subscribe keyed by string topic.
///
/// Listeners run inline inside [`publish`](EventBus::publish) in the order
/// they subscribed. One-shot listeners are dropped after their first call.
#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<String, Vec<Subscription>>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, topic: impl Into<String>, callback: F) -> SubscriptionId
    where
        F: FnMut(&InputEvent) + 'static,
    {
        self.insert(topic.into(), false, Box::new(callback))
    }

    /// Subscribe a listener that is removed after it fires once.
    pub fn once<F>(&mut self, topic: impl Into<String>, callback: F) -> SubscriptionId
    where
        F: FnMut(&InputEvent) + 'static,
    {
        self.insert(topic.into(), true, Box::new(callback))
    }

    /// Remove one listener. Returns `false` if it was not registered on `topic`.
    pub fn unsubscribe(&mut self, topic: &str, id: SubscriptionId) -> bool {
        let Some(subscriptions) = self.listeners.get_mut(topic) else {
            return false;
        };
        let before = subscriptions.len();
        subscriptions.retain(|sub| sub.id != id);
        let removed = subscriptions.len() != before;
        if subscriptions.is_empty() {
            self.listeners.remove(topic);
        }
        removed
    }

    /// Remove every listener on `topic`, returning how many were dropped.
    pub fn clear(&mut self, topic: &str) -> usize {
        self.listeners.remove(topic).map_or(0, |subs| subs.len())
    }

    pub fn listener_count(&self, topic: &str) -> usize {
        self.listeners.get(topic).map_or(0, Vec::len)
    }

    pub fn publish(&mut self, topic: &str, event: &InputEvent) {
        let Some(subscriptions) = self.listeners.get_mut(topic) else {
            return;
        };
        trace!(topic, listeners = subscriptions.len(), "dispatching event");
        subscriptions.retain_mut(|sub| {
            (sub.callback)(event);
            !sub.once
        });
        if subscriptions.is_empty() {
            self.listeners.remove(topic);
        }
    }

    fn insert(&mut self, topic: String, once: bool, callback: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.entry(topic).or_default().push(Subscription {
            id,
            once,
            callback,
        });
        id
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut topics: Vec<(&str, usize)> = self
            .listeners
            .iter()
            .map(|(topic, subs)| (topic.as_str(), subs.len()))
            .collect();
        topics.sort_unstable();
        f.debug_struct("EventBus")
            .field("topics", &topics)
            .field("next_id", &self.next_id)
            .finish()
    }
}
