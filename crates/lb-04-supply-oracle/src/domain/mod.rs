//! # Oracle Domain
//!
//! Supply records, signed reports, signature batches, and errors.

pub mod errors;
pub mod report;
pub mod supply;

pub use errors::OracleError;
pub use report::{PendingSignatureBatch, SupplyReport, UpdateOutcome};
pub use supply::ChainSupply;
