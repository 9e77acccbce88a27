//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Ports (Inbound)**: `ProvenanceRegistryApi`
//! - **Driven Ports (Outbound)**: `EventSink`, `TimeSource`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
