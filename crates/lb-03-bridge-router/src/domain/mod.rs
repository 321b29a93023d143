//! # Router Domain
//!
//! Transfer records and their state machine, bridge options, route
//! selection, and errors.

pub mod errors;
pub mod options;
pub mod transfer;

pub use errors::RouterError;
pub use options::{select_route, BridgeOption, RoutePreference};
pub use transfer::{derive_transfer_id, Transfer, TransferStatus};
