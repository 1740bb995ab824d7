use std::sync::Arc;

use arrow_schema::DataType;
use opal_common::{ColumnOid, DatabaseOid, IndexOid, NamespaceOid, TableOid};
use opal_planner::{
    BinaryOp, BuildSide, HashJoinBuilder, IndexScanBuilder, JoinType, LimitBuilder, LiteralValue,
    OutputColumn, OutputSchema, PhysicalPlan, PlanExpr, PlanNodeType, SeqScanBuilder,
};

fn col(oid: u32) -> Arc<PlanExpr> {
    Arc::new(PlanExpr::ColumnRef {
        column: ColumnOid(oid),
    })
}

fn schema_over(cols: &[u32]) -> OutputSchema {
    OutputSchema::new(
        cols.iter()
            .map(|&c| OutputColumn::new(col(c), DataType::Int64))
            .collect(),
    )
}

fn seq_scan(columns: Vec<u32>, predicate: Option<Arc<PlanExpr>>) -> PhysicalPlan {
    let mut b = SeqScanBuilder::new(DatabaseOid(1), NamespaceOid(2), TableOid(5))
        .output_schema(schema_over(&[10]))
        .column_oids(columns.into_iter().map(ColumnOid).collect());
    if let Some(p) = predicate {
        b = b.predicate(p);
    }
    b.build().into()
}

#[test]
fn equal_plans_hash_equal() {
    let predicate = Arc::new(PlanExpr::BinaryOp {
        left: Box::new(PlanExpr::ColumnRef {
            column: ColumnOid(10),
        }),
        op: BinaryOp::Gt,
        right: Box::new(PlanExpr::Literal(LiteralValue::Int64(42))),
    });
    let a = seq_scan(vec![10, 11], Some(predicate.clone()));
    let b = seq_scan(vec![10, 11], Some(predicate));

    assert_eq!(a, b);
    assert_eq!(a.plan_hash(), b.plan_hash());
}

#[test]
fn equality_is_reflexive() {
    let plan = seq_scan(vec![1, 2], None);
    assert_eq!(plan, plan.clone());
    assert_eq!(plan.plan_hash(), plan.clone().plan_hash());
}

#[test]
fn differing_node_types_are_never_equal() {
    let scan = seq_scan(vec![1], None);
    let limit: PhysicalPlan = LimitBuilder::new(10, 0)
        .output_schema(schema_over(&[10]))
        .build()
        .into();
    assert_ne!(scan, limit);

    // An index scan carrying the same scoping and projection is still a
    // different operator kind.
    let index_scan: PhysicalPlan =
        IndexScanBuilder::new(DatabaseOid(1), NamespaceOid(2), IndexOid(9), TableOid(5))
            .output_schema(schema_over(&[10]))
            .column_oids(vec![ColumnOid(1)])
            .build()
            .into();
    assert_ne!(scan, index_scan);
    assert_eq!(scan.node_type(), PlanNodeType::SeqScan);
    assert_eq!(index_scan.node_type(), PlanNodeType::IndexScan);
}

#[test]
fn column_order_is_significant() {
    let a = seq_scan(vec![1, 2], None);
    let b = seq_scan(vec![2, 1], None);

    assert_ne!(a, b);
    assert_ne!(a.plan_hash(), b.plan_hash());
}

#[test]
fn duplicate_columns_are_preserved_not_deduplicated() {
    let plan = seq_scan(vec![1, 1, 2], None);
    let PhysicalPlan::SeqScan(node) = &plan else {
        panic!("expected seq scan");
    };
    assert_eq!(
        node.column_oids(),
        &[ColumnOid(1), ColumnOid(1), ColumnOid(2)]
    );
    assert_ne!(plan, seq_scan(vec![1, 2], None));
}

#[test]
fn absent_predicate_is_distinct_from_always_true() {
    let always_true = Arc::new(PlanExpr::Literal(LiteralValue::Boolean(true)));
    let unfiltered = seq_scan(vec![1], None);
    let filtered = seq_scan(vec![1], Some(always_true));

    assert_ne!(unfiltered, filtered);
    assert_ne!(unfiltered.plan_hash(), filtered.plan_hash());
}

#[test]
fn child_order_is_significant() {
    let left = seq_scan(vec![1], None);
    let right = seq_scan(vec![2], None);

    let join = |a: PhysicalPlan, b: PhysicalPlan| -> PhysicalPlan {
        HashJoinBuilder::new(JoinType::Inner, BuildSide::Left)
            .child(a)
            .child(b)
            .left_keys(vec![col(1)])
            .right_keys(vec![col(2)])
            .output_schema(schema_over(&[1, 2]))
            .build()
            .into()
    };

    let ab = join(left.clone(), right.clone());
    let ba = join(right, left);
    assert_ne!(ab, ba);
    assert_ne!(ab.plan_hash(), ba.plan_hash());
}

#[test]
fn whole_tree_identity_folds_children() {
    let tree = |limit: u64| -> PhysicalPlan {
        LimitBuilder::new(limit, 0)
            .child(seq_scan(vec![1, 2], None))
            .output_schema(schema_over(&[10]))
            .build()
            .into()
    };

    assert_eq!(tree(10), tree(10));
    assert_eq!(tree(10).plan_hash(), tree(10).plan_hash());
    assert_ne!(tree(10), tree(11));

    assert_eq!(tree(10).children().len(), 1);
    assert_eq!(tree(10).children()[0].node_type(), PlanNodeType::SeqScan);
}

#[test]
fn scan_accessors_expose_builder_configuration() {
    let predicate = Arc::new(PlanExpr::Not(Box::new(PlanExpr::ColumnRef {
        column: ColumnOid(3),
    })));
    let node = SeqScanBuilder::new(DatabaseOid(7), NamespaceOid(8), TableOid(9))
        .column_oids(vec![ColumnOid(3)])
        .predicate(predicate.clone())
        .for_update(true)
        .output_schema(schema_over(&[3]))
        .build();

    assert_eq!(node.database_oid(), DatabaseOid(7));
    assert_eq!(node.namespace_oid(), NamespaceOid(8));
    assert_eq!(node.table_oid(), TableOid(9));
    assert!(node.is_for_update());
    assert_eq!(node.predicate(), Some(&predicate));
    assert_eq!(node.output_schema().columns().len(), 1);
    assert!(node.children().is_empty());
}
