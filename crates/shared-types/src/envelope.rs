//! # Ledger Transaction Envelope
//!
//! The wrapper in which the host ledger delivers ordered calls.
//!
//! ## Properties
//!
//! - **Caller Authority**: `caller` is the sole source of truth for identity.
//!   Payloads MUST NOT carry a second identity field.
//! - **Total Order**: `sequence` is the position assigned by the host; the
//!   registry treats it as authoritative.
//! - **Ledger Time**: `timestamp` is the only clock the registry reads.

use crate::entities::Identity;
use serde::{Deserialize, Serialize};

/// Per-call context supplied by the host ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerContext {
    /// The account submitting the call.
    pub caller: Identity,
    /// Position of the call in the host's total order.
    pub sequence: u64,
    /// Ledger time in unix seconds.
    pub timestamp: u64,
}

impl LedgerContext {
    /// Create a context.
    #[must_use]
    pub const fn new(caller: Identity, sequence: u64, timestamp: u64) -> Self {
        Self {
            caller,
            sequence,
            timestamp,
        }
    }

    /// Same position and time, different caller.
    #[must_use]
    pub const fn with_caller(self, caller: Identity) -> Self {
        Self { caller, ..self }
    }
}

/// An ordered call as delivered by the host ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTransaction<T> {
    /// Caller, position and time.
    pub context: LedgerContext,
    /// The call itself.
    pub payload: T,
}

impl<T> LedgerTransaction<T> {
    /// Wrap a payload.
    pub fn new(context: LedgerContext, payload: T) -> Self {
        Self { context, payload }
    }

    /// The submitting account.
    pub fn caller(&self) -> Identity {
        self.context.caller
    }
}
