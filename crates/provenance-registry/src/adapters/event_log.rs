//! In-memory append-only event log.

use crate::ports::outbound::EventSink;
use serde::{Deserialize, Serialize};
use shared_bus::RegistryEvent;
use shared_types::LedgerContext;

/// One committed event with its position and ledger coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Position in the log, starting at 0.
    pub index: u64,
    /// Sequence of the transaction that emitted it.
    pub sequence: u64,
    /// Ledger time of that transaction.
    pub timestamp: u64,
    /// The event.
    pub event: RegistryEvent,
}

/// Append-only log of every event the registry has committed.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: Vec<LoggedEvent>,
}

impl EventLog {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LoggedEvent] {
        &self.entries
    }

    /// Entries from position `index` on. Empty if `index` is past the end.
    #[must_use]
    pub fn since(&self, index: u64) -> &[LoggedEvent] {
        let start = usize::try_from(index)
            .unwrap_or(usize::MAX)
            .min(self.entries.len());
        &self.entries[start..]
    }

    /// Bare events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &RegistryEvent> {
        self.entries.iter().map(|e| &e.event)
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&LoggedEvent> {
        self.entries.last()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl EventSink for EventLog {
    fn record(&mut self, context: &LedgerContext, event: RegistryEvent) {
        let index = self.entries.len() as u64;
        self.entries.push(LoggedEvent {
            index,
            sequence: context.sequence,
            timestamp: context.timestamp,
            event,
        });
    }

    fn recorded(&self) -> u64 {
        self.entries.len() as u64
    }
}
