//! Listener bookkeeping for elements.
//!
//! [`ListenerSet`] records which input kinds an element is currently wired to
//! receive, so that detaching can drop every registration at once.
//! [`Emitter`] holds outward-facing subscribers for an event payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Input kinds an element can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerKind {
    /// Key pressed
    KeyDown,
    /// Key released
    KeyUp,
    /// Pointer press/move/release routed to the drag tracker
    Pointer,
}

/// Unique ID for a listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Registry of wired input listeners.
#[derive(Debug, Default)]
pub struct ListenerSet {
    next_id: u64,
    by_id: HashMap<ListenerId, ListenerKind>,
    by_kind: HashMap<ListenerKind, Vec<ListenerId>>,
}

impl ListenerSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `kind`.
    pub fn add(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.by_id.insert(id, kind);
        self.by_kind.entry(kind).or_default().push(id);
        id
    }

    /// Remove one listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let Some(kind) = self.by_id.remove(&id) else {
            return false;
        };
        if let Some(ids) = self.by_kind.get_mut(&kind) {
            ids.retain(|&other| other != id);
            if ids.is_empty() {
                self.by_kind.remove(&kind);
            }
        }
        true
    }

    /// Remove every listener.
    pub fn remove_all(&mut self) {
        self.by_id.clear();
        self.by_kind.clear();
    }

    /// Whether at least one listener is registered for `kind`.
    #[must_use]
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.by_kind.get(&kind).is_some_and(|ids| !ids.is_empty())
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Subscriber callback.
pub type Callback<E> = Box<dyn FnMut(&E)>;

/// Outward event emitter.
pub struct Emitter<E> {
    next_id: u64,
    subscribers: Vec<(ListenerId, Callback<E>)>,
}

impl<E> Default for Emitter<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<E> std::fmt::Debug for Emitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<E> Emitter<E> {
    /// Create an emitter with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to emitted events.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(other, _)| *other != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every subscriber in subscription order.
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
