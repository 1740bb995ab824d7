use arrow_schema::DataType;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::expr::PlanExpr;

/// One output column: the expression producing its values and its type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputColumn {
    /// Expression evaluated to produce this column.
    pub expr: Arc<PlanExpr>,
    /// Value type of the column.
    pub data_type: DataType,
}

impl OutputColumn {
    pub fn new(expr: Arc<PlanExpr>, data_type: DataType) -> Self {
        Self { expr, data_type }
    }
}

/// Ordered description of a plan node's result columns.
///
/// Column order is observable to consumers, so equality and hashing are
/// order-sensitive. The schema may reference computed expressions over
/// scanned columns; it is not required to mirror a scan's projection list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputSchema {
    columns: Vec<OutputColumn>,
}

impl OutputSchema {
    pub fn new(columns: Vec<OutputColumn>) -> Self {
        Self { columns }
    }

    /// Schema with no columns, used by nodes whose output is not yet bound.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Result columns in output order.
    pub fn columns(&self) -> &[OutputColumn] {
        &self.columns
    }
}
