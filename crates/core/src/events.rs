//! Event System
//!
//! Pub/sub event bus so the presentation layer can react to session changes.

use std::path::PathBuf;
use parking_lot::RwLock;
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

use crate::language::Language;

/// Events emitted by the session and the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Active language changed
    LanguageChanged(Language),
    /// A new, untitled buffer was started
    FileCreated,
    /// File loaded into the buffer
    FileOpened(PathBuf),
    /// Buffer written to disk
    FileSaved(PathBuf),
    /// Project directory initialized
    ProjectCreated(PathBuf),
    /// Project directory bound to the session
    ProjectOpened(PathBuf),
    /// Buffer was run with the language's toolchain
    RunCompleted { language: Language, success: bool },
    /// Shell line executed in the console
    CommandExecuted(String),
}

/// Subscriber handle for receiving events
#[derive(Clone)]
pub struct EventSubscription {
    receiver: Receiver<Event>,
}

impl EventSubscription {
    /// Receive the next event (blocking)
    pub fn recv(&self) -> Result<Event, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv(&self) -> Result<Event, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain every pending event
    pub fn drain(&self) -> Vec<Event> {
        self.receiver.try_iter().collect()
    }
}

/// Event bus for publish/subscribe pattern
pub struct EventBus {
    subscribers: RwLock<Vec<Sender<Event>>>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> EventSubscription {
        let (sender, receiver) = unbounded();
        self.subscribers.write().push(sender);
        EventSubscription { receiver }
    }

    /// Emit an event to all subscribers, dropping those that hung up
    pub fn emit(&self, event: Event) -> usize {
        let mut subscribers = self.subscribers.write();
        subscribers.retain(|sender| sender.send(event.clone()).is_ok());
        let delivered = subscribers.len();

        debug!("Event {:?} delivered to {} subscribers", event, delivered);
        delivered
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bus() {
        let bus = EventBus::new();
        let sub1 = bus.subscribe();
        let sub2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        let delivered = bus.emit(Event::FileCreated);
        assert_eq!(delivered, 2);

        assert_eq!(sub1.try_recv().unwrap(), Event::FileCreated);
        assert_eq!(sub2.try_recv().unwrap(), Event::FileCreated);
    }

    #[test]
    fn test_dropped_subscriber_pruned() {
        let bus = EventBus::new();
        let keep = bus.subscribe();
        drop(bus.subscribe());

        assert_eq!(bus.emit(Event::LanguageChanged(Language::CSharp)), 1);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(keep.drain(), vec![Event::LanguageChanged(Language::CSharp)]);
    }
}
