//! Barriers the ball can slip through while dodging

use std::cell::Cell;
use std::rc::Rc;

use super::events::{EventBus, EventKind, SubscriptionId};

/// Collision toggle driven by dodge notifications
#[derive(Debug, Clone)]
pub struct Barrier {
    pub name: String,
    collision: Rc<Cell<bool>>,
    subscriptions: Vec<SubscriptionId>,
}

impl Barrier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collision: Rc::new(Cell::new(true)),
            subscriptions: Vec::new(),
        }
    }

    pub fn collision_enabled(&self) -> bool {
        self.collision.get()
    }

    /// Start listening for dodges
    pub fn attach(&mut self, bus: &mut EventBus) {
        if !self.subscriptions.is_empty() {
            return;
        }
        let on_begin = self.collision.clone();
        let on_end = self.collision.clone();
        self.subscriptions = vec![
            bus.subscribe(EventKind::DodgeBegan, move |_| on_begin.set(false)),
            bus.subscribe(EventKind::DodgeEnded, move |_| on_end.set(true)),
        ];
    }

    /// Close the barrier again, whatever dodge was in flight
    pub fn reset(&self) {
        self.collision.set(true);
    }

    /// Stop listening; collision is left as it was
    pub fn detach(&mut self, bus: &mut EventBus) {
        for id in self.subscriptions.drain(..) {
            bus.unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::events::GameEvent;

    #[test]
    fn test_barrier_follows_dodge() {
        let mut bus = EventBus::new();
        let mut barrier = Barrier::new("gate");
        barrier.attach(&mut bus);
        barrier.attach(&mut bus);
        assert_eq!(bus.len(), 2);

        bus.publish(&GameEvent::DodgeBegan { ball: 1 });
        assert!(!barrier.collision_enabled());
        bus.publish(&GameEvent::DodgeEnded { ball: 1 });
        assert!(barrier.collision_enabled());
    }

    #[test]
    fn test_detached_barrier_ignores_dodges() {
        let mut bus = EventBus::new();
        let mut barrier = Barrier::new("gate");
        barrier.attach(&mut bus);
        barrier.detach(&mut bus);
        assert!(bus.is_empty());

        bus.publish(&GameEvent::DodgeBegan { ball: 1 });
        assert!(barrier.collision_enabled());
    }

    #[test]
    fn test_reset_closes_open_barrier() {
        let mut bus = EventBus::new();
        let mut barrier = Barrier::new("gate");
        barrier.attach(&mut bus);
        bus.publish(&GameEvent::DodgeBegan { ball: 1 });

        barrier.reset();
        assert!(barrier.collision_enabled());

        // Still listening afterwards
        bus.publish(&GameEvent::DodgeBegan { ball: 2 });
        assert!(!barrier.collision_enabled());
    }
}
