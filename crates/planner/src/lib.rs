//! Physical plan node model for the Opal query engine.
//!
//! Architecture role:
//! - defines the immutable operator tree the optimizer hands to execution
//! - provides structural equality, deterministic hashing, and
//!   document serialization so plans can be cached, compared, and shipped
//!   across process boundaries
//!
//! Key modules:
//! - [`physical_plan`]: the operator family and its identity operations
//! - [`builder`]: staged construction of immutable nodes
//! - [`codec`]: plan document encode/decode
//! - [`expr`] / [`output_schema`]: expressions and result schemas nodes carry
//! - [`explain`]: plan rendering

pub mod builder;
pub mod codec;
pub mod explain;
pub mod expr;
pub mod output_schema;
pub mod physical_plan;

pub use builder::*;
pub use codec::*;
pub use explain::*;
pub use expr::*;
pub use output_schema::*;
pub use physical_plan::*;
