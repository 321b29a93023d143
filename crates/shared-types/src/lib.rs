//! # Shared Types Crate
//!
//! This crate contains the primitives shared across every bridge subsystem:
//! chain and protocol identifiers, address/hash/amount types, the injectable
//! clock, and the HMAC helpers used to sign supply reports.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Injectable Time**: No subsystem reads the system clock directly; all
//!   time-dependent logic goes through [`TimeSource`] so windows and expiry
//!   can be driven deterministically in tests.
//! - **Centralized Report Signing**: Supply reports are signed and verified
//!   with the single implementation in [`security`], so every subsystem
//!   applies the same policy.

pub mod primitives;
pub mod security;
pub mod time;

pub use primitives::*;
pub use security::{sign_report, verify_report, ReportSignature};
pub use time::{ManualClock, SystemTimeSource, TimeSource};
