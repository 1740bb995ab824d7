use arrow_schema::DataType;
use opal_common::ColumnOid;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Predicate/value expression carried by physical plan nodes.
///
/// Plan nodes hold expression trees behind `Arc` so a predicate shared with
/// another structure (a plan cache entry, the originating statement) stays
/// alive however long either side needs it. The tree itself is never mutated
/// after planning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanExpr {
    /// Reference to a table column by catalog OID.
    ColumnRef {
        /// Column being read.
        column: ColumnOid,
    },
    /// Constant value.
    Literal(LiteralValue),
    /// Binary comparison/arithmetic.
    BinaryOp {
        /// Left operand.
        left: Box<PlanExpr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<PlanExpr>,
    },
    /// Logical conjunction.
    And(Box<PlanExpr>, Box<PlanExpr>),
    /// Logical disjunction.
    Or(Box<PlanExpr>, Box<PlanExpr>),
    /// Logical negation.
    Not(Box<PlanExpr>),
    /// Type cast.
    Cast {
        /// Operand.
        expr: Box<PlanExpr>,
        /// Target type.
        to_type: DataType,
    },
}

impl PlanExpr {
    /// Returns direct child expressions in evaluation order.
    pub fn children(&self) -> Vec<&PlanExpr> {
        match self {
            PlanExpr::ColumnRef { .. } | PlanExpr::Literal(_) => vec![],
            PlanExpr::BinaryOp { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            PlanExpr::And(a, b) | PlanExpr::Or(a, b) => vec![a.as_ref(), b.as_ref()],
            PlanExpr::Not(x) => vec![x.as_ref()],
            PlanExpr::Cast { expr, .. } => vec![expr.as_ref()],
        }
    }
}

/// Constant expression payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LiteralValue {
    Int64(i64),
    Float64(f64),
    Utf8(String),
    Boolean(bool),
    Null,
}

/// Floats compare and hash by bit pattern so that expression equality and
/// expression hashing can never disagree (NaN payloads included).
impl PartialEq for LiteralValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int64(a), Self::Int64(b)) => a == b,
            (Self::Float64(a), Self::Float64(b)) => a.to_bits() == b.to_bits(),
            (Self::Utf8(a), Self::Utf8(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

impl Eq for LiteralValue {}

impl Hash for LiteralValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Int64(v) => v.hash(state),
            Self::Float64(v) => v.to_bits().hash(state),
            Self::Utf8(v) => v.hash(state),
            Self::Boolean(v) => v.hash(state),
            Self::Null => {}
        }
    }
}

/// Binary operators usable in plan expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Multiply,
    Divide,
}
