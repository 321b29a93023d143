//! # Integration Tests
//!
//! Cross-subsystem flows exercising the router, adapters, rate limiter,
//! and supply oracle together.

pub mod harness;

#[cfg(test)]
mod circuit_breaker;
#[cfg(test)]
mod end_to_end;
#[cfg(test)]
mod replay_and_refund;
