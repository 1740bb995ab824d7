//! Staged construction of immutable plan nodes.
//!
//! One builder per operator kind. `new` takes the fields a node of that kind
//! always carries; everything else is set through chained, self-consuming
//! setters and moved into the node by `build`. A builder is therefore
//! single-use by construction: every method takes it by value, and `build`
//! leaves nothing behind to reuse. No cross-field validation happens here;
//! the optimizer is responsible for handing over consistent OIDs and
//! expressions.

use std::sync::Arc;

use opal_common::{ColumnOid, DatabaseOid, IndexOid, NamespaceOid, TableOid};

use crate::expr::PlanExpr;
use crate::output_schema::OutputSchema;
use crate::physical_plan::{
    BuildSide, HashJoinNode, IndexScanNode, JoinType, LimitNode, PhysicalPlan, PlanBase, ScanBase,
    SeqScanNode,
};

/// Builder for [`SeqScanNode`].
#[derive(Debug)]
pub struct SeqScanBuilder {
    children: Vec<PhysicalPlan>,
    output_schema: OutputSchema,
    predicate: Option<Arc<PlanExpr>>,
    is_for_update: bool,
    database_oid: DatabaseOid,
    namespace_oid: NamespaceOid,
    table_oid: TableOid,
    column_oids: Vec<ColumnOid>,
}

impl SeqScanBuilder {
    /// Starts a sequential scan over `table_oid`, scoped to a database and
    /// namespace. Scans always carry these three identifiers.
    pub fn new(
        database_oid: DatabaseOid,
        namespace_oid: NamespaceOid,
        table_oid: TableOid,
    ) -> Self {
        Self {
            children: Vec::new(),
            output_schema: OutputSchema::empty(),
            predicate: None,
            is_for_update: false,
            database_oid,
            namespace_oid,
            table_oid,
            column_oids: Vec::new(),
        }
    }

    /// Appends a child plan. Child order is significant.
    pub fn child(mut self, child: PhysicalPlan) -> Self {
        self.children.push(child);
        self
    }

    pub fn output_schema(mut self, output_schema: OutputSchema) -> Self {
        self.output_schema = output_schema;
        self
    }

    /// Sets the scan filter. Not calling this leaves the scan unfiltered.
    pub fn predicate(mut self, predicate: Arc<PlanExpr>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn for_update(mut self, is_for_update: bool) -> Self {
        self.is_for_update = is_for_update;
        self
    }

    /// Sets the projection list. Order defines the scan's physical column
    /// order; duplicates are kept.
    pub fn column_oids(mut self, column_oids: Vec<ColumnOid>) -> Self {
        self.column_oids = column_oids;
        self
    }

    /// Moves the configuration into an immutable node.
    pub fn build(self) -> SeqScanNode {
        SeqScanNode {
            base: PlanBase {
                children: self.children,
                output_schema: self.output_schema,
            },
            scan: ScanBase {
                predicate: self.predicate,
                is_for_update: self.is_for_update,
                database_oid: self.database_oid,
                namespace_oid: self.namespace_oid,
            },
            table_oid: self.table_oid,
            column_oids: self.column_oids,
        }
    }
}

/// Builder for [`IndexScanNode`].
#[derive(Debug)]
pub struct IndexScanBuilder {
    children: Vec<PhysicalPlan>,
    output_schema: OutputSchema,
    predicate: Option<Arc<PlanExpr>>,
    is_for_update: bool,
    database_oid: DatabaseOid,
    namespace_oid: NamespaceOid,
    index_oid: IndexOid,
    table_oid: TableOid,
    column_oids: Vec<ColumnOid>,
}

impl IndexScanBuilder {
    /// Starts an index scan driven by `index_oid` over `table_oid`.
    pub fn new(
        database_oid: DatabaseOid,
        namespace_oid: NamespaceOid,
        index_oid: IndexOid,
        table_oid: TableOid,
    ) -> Self {
        Self {
            children: Vec::new(),
            output_schema: OutputSchema::empty(),
            predicate: None,
            is_for_update: false,
            database_oid,
            namespace_oid,
            index_oid,
            table_oid,
            column_oids: Vec::new(),
        }
    }

    pub fn child(mut self, child: PhysicalPlan) -> Self {
        self.children.push(child);
        self
    }

    pub fn output_schema(mut self, output_schema: OutputSchema) -> Self {
        self.output_schema = output_schema;
        self
    }

    pub fn predicate(mut self, predicate: Arc<PlanExpr>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn for_update(mut self, is_for_update: bool) -> Self {
        self.is_for_update = is_for_update;
        self
    }

    pub fn column_oids(mut self, column_oids: Vec<ColumnOid>) -> Self {
        self.column_oids = column_oids;
        self
    }

    pub fn build(self) -> IndexScanNode {
        IndexScanNode {
            base: PlanBase {
                children: self.children,
                output_schema: self.output_schema,
            },
            scan: ScanBase {
                predicate: self.predicate,
                is_for_update: self.is_for_update,
                database_oid: self.database_oid,
                namespace_oid: self.namespace_oid,
            },
            index_oid: self.index_oid,
            table_oid: self.table_oid,
            column_oids: self.column_oids,
        }
    }
}

/// Builder for [`LimitNode`].
#[derive(Debug)]
pub struct LimitBuilder {
    children: Vec<PhysicalPlan>,
    output_schema: OutputSchema,
    limit: u64,
    offset: u64,
}

impl LimitBuilder {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            children: Vec::new(),
            output_schema: OutputSchema::empty(),
            limit,
            offset,
        }
    }

    pub fn child(mut self, child: PhysicalPlan) -> Self {
        self.children.push(child);
        self
    }

    pub fn output_schema(mut self, output_schema: OutputSchema) -> Self {
        self.output_schema = output_schema;
        self
    }

    pub fn build(self) -> LimitNode {
        LimitNode {
            base: PlanBase {
                children: self.children,
                output_schema: self.output_schema,
            },
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Builder for [`HashJoinNode`].
#[derive(Debug)]
pub struct HashJoinBuilder {
    children: Vec<PhysicalPlan>,
    output_schema: OutputSchema,
    join_type: JoinType,
    build_side: BuildSide,
    left_keys: Vec<Arc<PlanExpr>>,
    right_keys: Vec<Arc<PlanExpr>>,
}

impl HashJoinBuilder {
    pub fn new(join_type: JoinType, build_side: BuildSide) -> Self {
        Self {
            children: Vec::new(),
            output_schema: OutputSchema::empty(),
            join_type,
            build_side,
            left_keys: Vec::new(),
            right_keys: Vec::new(),
        }
    }

    /// Appends a child plan; call once for the left input, then once for
    /// the right.
    pub fn child(mut self, child: PhysicalPlan) -> Self {
        self.children.push(child);
        self
    }

    pub fn output_schema(mut self, output_schema: OutputSchema) -> Self {
        self.output_schema = output_schema;
        self
    }

    pub fn left_keys(mut self, left_keys: Vec<Arc<PlanExpr>>) -> Self {
        self.left_keys = left_keys;
        self
    }

    pub fn right_keys(mut self, right_keys: Vec<Arc<PlanExpr>>) -> Self {
        self.right_keys = right_keys;
        self
    }

    pub fn build(self) -> HashJoinNode {
        HashJoinNode {
            base: PlanBase {
                children: self.children,
                output_schema: self.output_schema,
            },
            join_type: self.join_type,
            build_side: self.build_side,
            left_keys: self.left_keys,
            right_keys: self.right_keys,
        }
    }
}
