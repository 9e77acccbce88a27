//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the registry needs from its environment. The registry only
//! writes through `EventSink`; it never reads events back.

use shared_bus::RegistryEvent;
use shared_types::LedgerContext;

/// Append-only destination for committed registry events.
pub trait EventSink: Send + Sync {
    /// Record `event`, committed by the call described by `context`.
    ///
    /// Called only after the state change has been applied, so recording
    /// cannot fail.
    fn record(&mut self, context: &LedgerContext, event: RegistryEvent);

    /// Number of events recorded so far.
    fn recorded(&self) -> u64;
}

/// Source of ledger time for in-process hosting.
pub trait TimeSource: Send + Sync {
    /// Get current timestamp in seconds since epoch.
    fn now(&self) -> u64;
}
