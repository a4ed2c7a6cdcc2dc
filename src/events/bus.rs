//! Multi-subscriber event bus.
//!
//! Subscribers are plain callbacks invoked in subscription order. The bus
//! also keeps a log that a presentation layer can poll with `drain`
//! instead of subscribing. Having no subscribers is the normal case for
//! headless simulation and never changes rules outcomes.

use super::event::BattleEvent;

type Subscriber = Box<dyn FnMut(&BattleEvent)>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u32,
    log: Vec<BattleEvent>,
    emitted: u64,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every event.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&BattleEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every subscriber and append it to the log.
    pub fn emit(&mut self, event: BattleEvent) {
        tracing::trace!(target: "card_battle::events", event = event.name(), "event.emit");
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&event);
        }
        self.emitted += 1;
        self.log.push(event);
    }

    /// Take every logged event since the last drain.
    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.log)
    }

    /// Logged events not yet drained.
    #[must_use]
    pub fn pending(&self) -> &[BattleEvent] {
        &self.log
    }

    /// Total events emitted over the bus lifetime.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("pending", &self.log.len())
            .field("emitted", &self.emitted)
            .finish()
    }
}
