//! Typed catalog identifiers shared across planner/executor components.
//!
//! Raw value 0 is reserved as the "no such object" sentinel for every id
//! kind; the catalog never allocates it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable database identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseOid(
    /// Raw numeric id value.
    pub u32,
);

impl DatabaseOid {
    /// Sentinel for "no database".
    pub const INVALID: Self = Self(0);

    /// Whether this id refers to an actual catalog entry.
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for DatabaseOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable namespace identifier within a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceOid(
    /// Raw numeric id value.
    pub u32,
);

impl NamespaceOid {
    /// Sentinel for "no namespace".
    pub const INVALID: Self = Self(0);

    /// Whether this id refers to an actual catalog entry.
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for NamespaceOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable table identifier within a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableOid(
    /// Raw numeric id value.
    pub u32,
);

impl TableOid {
    /// Sentinel for "no table".
    pub const INVALID: Self = Self(0);

    /// Whether this id refers to an actual catalog entry.
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for TableOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable column identifier within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnOid(
    /// Raw numeric id value.
    pub u32,
);

impl ColumnOid {
    /// Sentinel for "no column".
    pub const INVALID: Self = Self(0);

    /// Whether this id refers to an actual catalog entry.
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for ColumnOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable index identifier within a namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexOid(
    /// Raw numeric id value.
    pub u32,
);

impl IndexOid {
    /// Sentinel for "no index".
    pub const INVALID: Self = Self(0);

    /// Whether this id refers to an actual catalog entry.
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl fmt::Display for IndexOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
