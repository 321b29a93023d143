//! # Lumen-Bridge Test Suite
//!
//! Unified test crate for cross-subsystem scenarios.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem flows
//!     ├── harness.rs            # Two-chain fixture
//!     ├── end_to_end.rs         # Bridge + delivery + reconciliation
//!     ├── replay_and_refund.rs  # Replay idempotence, refund saga
//!     └── circuit_breaker.rs    # Drift detection and pause fan-out
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bridge-tests
//! ```

pub mod integration;
