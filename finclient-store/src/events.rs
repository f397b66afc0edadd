//! Change notifications for the order set.
//!
//! Every successful mutation of an [`OrderSet`](crate::OrderSet) publishes a
//! [`BookEvent`] so views can refresh without being bound to the collection.
//!
//! Uses tokio broadcast channels for fan-out to multiple receivers.

use finclient_domain::SortCriterion;
use tokio::sync::broadcast;

// =============================================================================
// Event Types
// =============================================================================

/// Events emitted after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookEvent {
    /// A party was appended
    PartyAdded { name: String },

    /// A party was swapped for an edited copy
    PartyReplaced { previous: String, name: String },

    /// A party was removed
    PartyRemoved { name: String },

    /// The whole collection was replaced
    Reloaded { count: usize },

    /// Members were reordered
    Sorted { criterion: SortCriterion },

    /// Display masking changed on some members
    VisibilityChanged { affected: usize, hidden: bool },
}

// =============================================================================
// Event Bus
// =============================================================================

/// Fan-out channel the order set publishes on.
///
/// Clones share one channel; each view holds its own [`EventReceiver`].
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<BookEvent>,
}

impl EventBus {
    /// Bus buffering up to `capacity` events per receiver.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish `event`; returns how many views were listening.
    ///
    /// Never fails: a mutation is not undone because nobody is watching.
    pub fn send(&self, event: BookEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Start a view on changes made after this call.
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

/// What a view sees when it polls the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The next change, in publication order
    Changed(BookEvent),

    /// The view fell behind and this many changes were dropped; it should
    /// re-read the whole order set
    Missed(u64),
}

/// One view's position on the bus.
pub struct EventReceiver {
    receiver: broadcast::Receiver<BookEvent>,
}

impl EventReceiver {
    /// Next pending notification, or `None` if the view is up to date.
    pub fn poll(&mut self) -> Option<Notification> {
        match self.receiver.try_recv() {
            Ok(event) => Some(Notification::Changed(event)),
            Err(broadcast::error::TryRecvError::Lagged(missed)) => {
                Some(Notification::Missed(missed))
            },
            Err(broadcast::error::TryRecvError::Empty)
            | Err(broadcast::error::TryRecvError::Closed) => None,
        }
    }

    /// Every pending change, skipping over any gap.
    pub fn drain(&mut self) -> Vec<BookEvent> {
        let mut events = Vec::new();
        while let Some(notification) = self.poll() {
            if let Notification::Changed(event) = notification {
                events.push(event);
            }
        }
        events
    }
}

// =============================================================================
// Tests
// =============================================================================
