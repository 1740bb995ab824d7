//! Shared identifier types and error contracts for Opal crates.
//!
//! Architecture role:
//! - provides the strongly-typed catalog OIDs carried by plan nodes
//! - provides common [`OpalError`] / [`Result`] contracts
//!
//! Key modules:
//! - [`error`]
//! - [`ids`]

pub mod error;
pub mod ids;

pub use error::{OpalError, Result};
pub use ids::*;
