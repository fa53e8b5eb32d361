//! Tick Status Fan-Out (std only)
//!
//! A small single-producer multi-consumer broadcast for pushing per-tick
//! snapshots to observers: a status printer, a logger, a network relay.
//! Subscribers receive their own copy of the value on their own thread, so a
//! slow observer can never stall the control loop, and nothing outside the
//! loop ever touches the sample history.
//!
//! [`Channel::publish`] hands back the spawned join handles; callers that
//! care about delivery (tests, shutdown paths) can join them, everyone else
//! just drops the vec and lets the threads detach.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Broadcast channel: one publisher, any number of subscribers
pub struct Channel<T> {
    subscribers: Vec<Arc<dyn Fn(T) + Send + Sync>>,
}

impl<T: Clone + Send + 'static> Channel<T> {
    /// A channel with no subscribers yet
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber
    pub fn subscribe(&mut self, subscriber: impl Fn(T) + Send + Sync + 'static) -> &mut Self {
        self.subscribers.push(Arc::new(subscriber));
        self
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver a value to every subscriber, one thread each
    pub fn publish(&self, value: T) -> Vec<JoinHandle<()>> {
        self.subscribers
            .iter()
            .map(|subscriber| {
                let subscriber = Arc::clone(subscriber);
                let value = value.clone();
                thread::spawn(move || subscriber(value))
            })
            .collect()
    }
}

impl<T: Clone + Send + 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}
