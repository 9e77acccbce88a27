//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the outbound ports.

pub mod clock;
pub mod event_log;

pub use clock::{ManualClock, SystemTimeSource};
pub use event_log::{EventLog, LoggedEvent};
