//! # Shared Bus - Event Bus for Registry Observers
//!
//! Carries committed registry events to anything outside the registry that
//! wants to watch: the node's event logger, test harnesses, indexers.
//!
//! ## Rules
//!
//! - The registry never reads from the bus; it is a one-way notification path.
//! - Only committed mutations are published. Rejected calls publish nothing.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │   Registry   │                    │   Observer   │
//! │   Service    │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{EventFilter, EventTopic, RegistryEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
