//! # Provenance Registry Test Suite
//!
//! Cross-crate flows: the hosted registry service, the shared bus and the
//! node's deployment outputs exercised together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Service + bus + deployment flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pv-tests
//! cargo test -p pv-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;
