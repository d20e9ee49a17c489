//! Game events and the synchronous event bus
//!
//! Subscribers are called in subscription order, within the frame the event
//! occurs. `publish` takes `&mut self`, so a handler can never re-enter the bus.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::Gesture;

/// Everything that can be published on the bus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Gesture(Gesture),
    /// Ball froze for a dash
    DashEntered { ball: u32 },
    /// Ball is back to normal motion after a dash or a cancelled dash
    DashEnded { ball: u32 },
    DodgeBegan { ball: u32 },
    DodgeEnded { ball: u32 },
}

/// Event discriminant used to filter subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    MultiTouchBegan,
    MultiToSingle,
    MultiTouchEnded,
    DoubleTap,
    DashEntered,
    DashEnded,
    DodgeBegan,
    DodgeEnded,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Gesture(Gesture::MultiTouchBegan) => EventKind::MultiTouchBegan,
            GameEvent::Gesture(Gesture::MultiToSingle) => EventKind::MultiToSingle,
            GameEvent::Gesture(Gesture::MultiTouchEnded) => EventKind::MultiTouchEnded,
            GameEvent::Gesture(Gesture::DoubleTap { .. }) => EventKind::DoubleTap,
            GameEvent::DashEntered { .. } => EventKind::DashEntered,
            GameEvent::DashEnded { .. } => EventKind::DashEnded,
            GameEvent::DodgeBegan { .. } => EventKind::DodgeBegan,
            GameEvent::DodgeEnded { .. } => EventKind::DodgeEnded,
        }
    }
}

impl From<Gesture> for GameEvent {
    fn from(gesture: Gesture) -> Self {
        GameEvent::Gesture(gesture)
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Gesture(Gesture::DoubleTap { position }) => {
                write!(f, "DoubleTap x={:.2} y={:.2}", position.x, position.y)
            }
            GameEvent::Gesture(gesture) => write!(f, "{gesture:?}"),
            GameEvent::DashEntered { ball } => write!(f, "DashEntered ball={ball}"),
            GameEvent::DashEnded { ball } => write!(f, "DashEnded ball={ball}"),
            GameEvent::DodgeBegan { ball } => write!(f, "DodgeBegan ball={ball}"),
            GameEvent::DodgeEnded { ball } => write!(f, "DodgeEnded ball={ball}"),
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&GameEvent)>;

struct Subscriber {
    id: SubscriptionId,
    /// None = every event
    kind: Option<EventKind>,
    handler: Handler,
}

/// Fire-and-forget publish/subscribe, owned by the world
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive events of one kind
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        self.add(Some(kind), Box::new(handler))
    }

    /// Receive every event
    pub fn subscribe_all(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.add(None, Box::new(handler))
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Deliver an event to every matching subscriber, in subscription order
    pub fn publish(&mut self, event: &GameEvent) {
        let kind = event.kind();
        for subscriber in &mut self.subscribers {
            if subscriber.kind.is_none_or(|k| k == kind) {
                (subscriber.handler)(event);
            }
        }
    }

    fn add(&mut self, kind: Option<EventKind>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, kind, handler });
        id
    }
}
