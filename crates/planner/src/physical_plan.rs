use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use opal_common::{ColumnOid, DatabaseOid, IndexOid, NamespaceOid, TableOid};
use serde::{Deserialize, Serialize};

use crate::expr::PlanExpr;
use crate::output_schema::OutputSchema;

/// Discriminant identifying a concrete operator kind.
///
/// The set is closed; adding an operator means adding a variant here and to
/// [`PhysicalPlan`], and the exhaustive matches below stop compiling until
/// every operation handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanNodeType {
    SeqScan,
    IndexScan,
    Limit,
    HashJoin,
}

impl PlanNodeType {
    /// Name used as the `node_type` discriminant in serialized documents.
    pub fn as_str(self) -> &'static str {
        match self {
            PlanNodeType::SeqScan => "SeqScan",
            PlanNodeType::IndexScan => "IndexScan",
            PlanNodeType::Limit => "Limit",
            PlanNodeType::HashJoin => "HashJoin",
        }
    }
}

impl fmt::Display for PlanNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields every plan node owns: its children and its output schema.
///
/// Both are assigned once at build time and never reassigned; plan
/// transformation produces new trees rather than mutating this one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) struct PlanBase {
    pub(crate) children: Vec<PhysicalPlan>,
    pub(crate) output_schema: OutputSchema,
}

/// Fields shared by every scan operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) struct ScanBase {
    /// Filter applied while scanning. `None` means "no filter" (every row
    /// passes); it is a distinct identity from any concrete predicate,
    /// always-true ones included.
    pub(crate) predicate: Option<Arc<PlanExpr>>,
    pub(crate) is_for_update: bool,
    pub(crate) database_oid: DatabaseOid,
    pub(crate) namespace_oid: NamespaceOid,
}

/// Sequential (full table) scan operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeqScanNode {
    #[serde(flatten)]
    pub(crate) base: PlanBase,
    #[serde(flatten)]
    pub(crate) scan: ScanBase,
    /// Table being scanned.
    pub(crate) table_oid: TableOid,
    /// Columns to read, in physical output order. Order is observable to
    /// consumers, duplicates are kept as constructed.
    pub(crate) column_oids: Vec<ColumnOid>,
}

impl SeqScanNode {
    pub fn children(&self) -> &[PhysicalPlan] {
        &self.base.children
    }

    pub fn output_schema(&self) -> &OutputSchema {
        &self.base.output_schema
    }

    /// Scan filter, if any. Absence means every row passes.
    pub fn predicate(&self) -> Option<&Arc<PlanExpr>> {
        self.scan.predicate.as_ref()
    }

    pub fn is_for_update(&self) -> bool {
        self.scan.is_for_update
    }

    pub fn database_oid(&self) -> DatabaseOid {
        self.scan.database_oid
    }

    pub fn namespace_oid(&self) -> NamespaceOid {
        self.scan.namespace_oid
    }

    pub fn table_oid(&self) -> TableOid {
        self.table_oid
    }

    /// Declared projection list: the columns this scan physically reads.
    pub fn column_oids(&self) -> &[ColumnOid] {
        &self.column_oids
    }

    /// Columns the predicate and output-schema expressions actually
    /// dereference.
    ///
    /// Distinct from [`column_oids`](Self::column_oids): the declared
    /// projection may be a superset of (or unrelated to) the referenced set,
    /// and column pruning must not conflate the two. The result is a set;
    /// its iteration order carries no meaning.
    pub fn referenced_columns(&self) -> HashSet<ColumnOid> {
        let mut acc = HashSet::new();
        if let Some(predicate) = &self.scan.predicate {
            collect_column_oids(predicate, &mut acc);
        }
        for col in self.base.output_schema.columns() {
            collect_column_oids(&col.expr, &mut acc);
        }
        acc
    }
}

/// Index scan operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexScanNode {
    #[serde(flatten)]
    pub(crate) base: PlanBase,
    #[serde(flatten)]
    pub(crate) scan: ScanBase,
    /// Index driving the scan.
    pub(crate) index_oid: IndexOid,
    /// Table the index belongs to.
    pub(crate) table_oid: TableOid,
    /// Columns to materialize, in physical output order.
    pub(crate) column_oids: Vec<ColumnOid>,
}

impl IndexScanNode {
    pub fn children(&self) -> &[PhysicalPlan] {
        &self.base.children
    }

    pub fn output_schema(&self) -> &OutputSchema {
        &self.base.output_schema
    }

    pub fn predicate(&self) -> Option<&Arc<PlanExpr>> {
        self.scan.predicate.as_ref()
    }

    pub fn is_for_update(&self) -> bool {
        self.scan.is_for_update
    }

    pub fn database_oid(&self) -> DatabaseOid {
        self.scan.database_oid
    }

    pub fn namespace_oid(&self) -> NamespaceOid {
        self.scan.namespace_oid
    }

    pub fn index_oid(&self) -> IndexOid {
        self.index_oid
    }

    pub fn table_oid(&self) -> TableOid {
        self.table_oid
    }

    pub fn column_oids(&self) -> &[ColumnOid] {
        &self.column_oids
    }

    /// Columns dereferenced by the predicate and output-schema expressions;
    /// see [`SeqScanNode::referenced_columns`].
    pub fn referenced_columns(&self) -> HashSet<ColumnOid> {
        let mut acc = HashSet::new();
        if let Some(predicate) = &self.scan.predicate {
            collect_column_oids(predicate, &mut acc);
        }
        for col in self.base.output_schema.columns() {
            collect_column_oids(&col.expr, &mut acc);
        }
        acc
    }
}

/// Limit/offset operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LimitNode {
    #[serde(flatten)]
    pub(crate) base: PlanBase,
    /// Maximum number of rows to emit.
    pub(crate) limit: u64,
    /// Rows to skip before emitting.
    pub(crate) offset: u64,
}

impl LimitNode {
    pub fn children(&self) -> &[PhysicalPlan] {
        &self.base.children
    }

    pub fn output_schema(&self) -> &OutputSchema {
        &self.base.output_schema
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}

/// Join algorithm input roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

/// Side chosen to build the hash table for [`HashJoinNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildSide {
    /// Build hash table from the left child.
    Left,
    /// Build hash table from the right child.
    Right,
}

/// Hash join operator.
///
/// Contract:
/// - children are ordered `[left, right]`;
/// - `left_keys`/`right_keys` are positional key pairs;
/// - `build_side` names the child expected to be the in-memory hash build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashJoinNode {
    #[serde(flatten)]
    pub(crate) base: PlanBase,
    /// Join type.
    pub(crate) join_type: JoinType,
    /// Build side selection.
    pub(crate) build_side: BuildSide,
    /// Key expressions evaluated against the left child.
    pub(crate) left_keys: Vec<Arc<PlanExpr>>,
    /// Key expressions evaluated against the right child.
    pub(crate) right_keys: Vec<Arc<PlanExpr>>,
}

impl HashJoinNode {
    pub fn children(&self) -> &[PhysicalPlan] {
        &self.base.children
    }

    pub fn output_schema(&self) -> &OutputSchema {
        &self.base.output_schema
    }

    pub fn join_type(&self) -> JoinType {
        self.join_type
    }

    pub fn build_side(&self) -> BuildSide {
        self.build_side
    }

    pub fn left_keys(&self) -> &[Arc<PlanExpr>] {
        &self.left_keys
    }

    pub fn right_keys(&self) -> &[Arc<PlanExpr>] {
        &self.right_keys
    }
}

/// The physical operator tree handed from the optimizer to execution.
///
/// A closed tagged union: identity operations (equality, hashing,
/// serialization) match exhaustively over it instead of dispatching through
/// a class hierarchy. Nodes of differing kinds are never equal; comparing
/// them is an ordinary query (a plan cache probe does it constantly), not an
/// error.
///
/// Once built, a plan is immutable and safe to share across threads for
/// read-only use: hashing, equality, rendering, and column collection take
/// `&self` and touch no shared mutable state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "node_type")]
pub enum PhysicalPlan {
    /// Sequential table scan.
    SeqScan(SeqScanNode),
    /// Index scan.
    IndexScan(IndexScanNode),
    /// Limit/offset.
    Limit(LimitNode),
    /// Hash join.
    HashJoin(HashJoinNode),
}

impl PhysicalPlan {
    /// Fixed discriminant of the concrete operator.
    pub fn node_type(&self) -> PlanNodeType {
        match self {
            PhysicalPlan::SeqScan(_) => PlanNodeType::SeqScan,
            PhysicalPlan::IndexScan(_) => PlanNodeType::IndexScan,
            PhysicalPlan::Limit(_) => PlanNodeType::Limit,
            PhysicalPlan::HashJoin(_) => PlanNodeType::HashJoin,
        }
    }

    /// Direct child operators, in order. Children are owned outright and
    /// destroyed with their parent.
    pub fn children(&self) -> &[PhysicalPlan] {
        match self {
            PhysicalPlan::SeqScan(x) => x.children(),
            PhysicalPlan::IndexScan(x) => x.children(),
            PhysicalPlan::Limit(x) => x.children(),
            PhysicalPlan::HashJoin(x) => x.children(),
        }
    }

    /// Schema of this node's result columns.
    pub fn output_schema(&self) -> &OutputSchema {
        match self {
            PhysicalPlan::SeqScan(x) => x.output_schema(),
            PhysicalPlan::IndexScan(x) => x.output_schema(),
            PhysicalPlan::Limit(x) => x.output_schema(),
            PhysicalPlan::HashJoin(x) => x.output_schema(),
        }
    }

    /// Structural hash folding the operator discriminant, every child
    /// (recursively, in order), the output schema, and every
    /// operator-specific field.
    ///
    /// Equal plans always hash equal. The value is stable within a process
    /// and toolchain, which is what an in-memory plan cache needs; anything
    /// persisted across versions should key on the serialized document
    /// instead.
    pub fn plan_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

impl From<SeqScanNode> for PhysicalPlan {
    fn from(node: SeqScanNode) -> Self {
        PhysicalPlan::SeqScan(node)
    }
}

impl From<IndexScanNode> for PhysicalPlan {
    fn from(node: IndexScanNode) -> Self {
        PhysicalPlan::IndexScan(node)
    }
}

impl From<LimitNode> for PhysicalPlan {
    fn from(node: LimitNode) -> Self {
        PhysicalPlan::Limit(node)
    }
}

impl From<HashJoinNode> for PhysicalPlan {
    fn from(node: HashJoinNode) -> Self {
        PhysicalPlan::HashJoin(node)
    }
}

/// Record the column OID of every column-reference leaf reachable from
/// `expr`. Pure tree walk; safe to run concurrently on any number of nodes.
fn collect_column_oids(expr: &PlanExpr, acc: &mut HashSet<ColumnOid>) {
    if let PlanExpr::ColumnRef { column } = expr {
        acc.insert(*column);
    } else {
        for child in expr.children() {
            collect_column_oids(child, acc);
        }
    }
}
