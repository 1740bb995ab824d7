use std::sync::Arc;

use arrow_schema::DataType;
use opal_common::{ColumnOid, DatabaseOid, IndexOid, NamespaceOid, OpalError, TableOid};
use opal_planner::{
    BinaryOp, BuildSide, HashJoinBuilder, IndexScanBuilder, JoinType, LimitBuilder, LiteralValue,
    OutputColumn, OutputSchema, PhysicalPlan, PlanExpr, SeqScanBuilder, NODE_TYPE_FIELD,
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

fn filtered_seq_scan() -> PhysicalPlan {
    let predicate = Arc::new(PlanExpr::And(
        Box::new(PlanExpr::BinaryOp {
            left: Box::new(PlanExpr::ColumnRef {
                column: ColumnOid(10),
            }),
            op: BinaryOp::GtEq,
            right: Box::new(PlanExpr::Literal(LiteralValue::Int64(0))),
        }),
        Box::new(PlanExpr::Not(Box::new(PlanExpr::Literal(
            LiteralValue::Boolean(false),
        )))),
    ));
    SeqScanBuilder::new(DatabaseOid(1), NamespaceOid(2), TableOid(5))
        .column_oids(vec![ColumnOid(10), ColumnOid(11)])
        .predicate(predicate)
        .output_schema(schema_over(&[10]))
        .build()
        .into()
}

#[test]
fn round_trip_restores_an_equal_plan() {
    let scan = filtered_seq_scan();
    let doc = scan.to_document().unwrap();
    let back = PhysicalPlan::from_document(&doc).unwrap();

    assert_eq!(back, scan);
    assert_eq!(back.plan_hash(), scan.plan_hash());
    // Re-serializing yields an equivalent document.
    assert_eq!(back.to_document().unwrap(), doc);
}

#[test]
fn round_trip_covers_every_operator_kind() {
    let index_scan: PhysicalPlan =
        IndexScanBuilder::new(DatabaseOid(1), NamespaceOid(2), IndexOid(7), TableOid(5))
            .column_oids(vec![ColumnOid(10)])
            .output_schema(schema_over(&[10]))
            .build()
            .into();
    let join: PhysicalPlan = HashJoinBuilder::new(JoinType::Left, BuildSide::Right)
        .child(filtered_seq_scan())
        .child(index_scan)
        .left_keys(vec![col(10)])
        .right_keys(vec![col(10)])
        .output_schema(schema_over(&[10, 10]))
        .build()
        .into();
    let plan: PhysicalPlan = LimitBuilder::new(100, 10)
        .child(join)
        .output_schema(schema_over(&[10]))
        .build()
        .into();

    let doc = plan.to_document().unwrap();
    let back = PhysicalPlan::from_document(&doc).unwrap();
    assert_eq!(back, plan);
    assert_eq!(back.to_document().unwrap(), doc);
}

#[test]
fn document_carries_the_reserved_discriminant_field() {
    let doc = filtered_seq_scan().to_document().unwrap();
    assert_eq!(doc[NODE_TYPE_FIELD], "SeqScan");

    let limit_doc = PhysicalPlan::from(LimitBuilder::new(1, 0).build())
        .to_document()
        .unwrap();
    assert_eq!(limit_doc[NODE_TYPE_FIELD], "Limit");
}

#[test]
fn absent_predicate_round_trips_as_explicit_null() {
    let plan: PhysicalPlan = SeqScanBuilder::new(DatabaseOid(1), NamespaceOid(2), TableOid(5))
        .column_oids(vec![ColumnOid(10)])
        .output_schema(schema_over(&[10]))
        .build()
        .into();

    let doc = plan.to_document().unwrap();
    assert!(doc.get("predicate").unwrap().is_null());

    let back = PhysicalPlan::from_document(&doc).unwrap();
    assert_eq!(back, plan);
}

#[test]
fn wrong_discriminant_is_a_typed_error() {
    use opal_planner::SeqScanNode;

    let limit_doc = PhysicalPlan::from(LimitBuilder::new(1, 0).build())
        .to_document()
        .unwrap();
    let err = SeqScanNode::from_document(&limit_doc).unwrap_err();
    assert_eq!(
        err,
        OpalError::NodeTypeMismatch {
            expected: "SeqScan".to_string(),
            found: "Limit".to_string(),
        }
    );
}

#[test]
fn missing_required_field_is_a_typed_error() {
    let mut doc = filtered_seq_scan().to_document().unwrap();
    doc.as_object_mut().unwrap().remove("table_oid");

    let err = PhysicalPlan::from_document(&doc).unwrap_err();
    assert_eq!(
        err,
        OpalError::MissingField {
            node_type: "SeqScan".to_string(),
            field: "table_oid".to_string(),
        }
    );
}

#[test]
fn unknown_discriminant_is_rejected() {
    let mut doc = filtered_seq_scan().to_document().unwrap();
    doc.as_object_mut().unwrap().insert(
        NODE_TYPE_FIELD.to_string(),
        serde_json::Value::String("ShuffleRead".to_string()),
    );

    let err = PhysicalPlan::from_document(&doc).unwrap_err();
    assert!(matches!(err, OpalError::MalformedDocument(_)));
}

#[test]
fn non_object_documents_are_rejected() {
    let err = PhysicalPlan::from_document(&serde_json::json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, OpalError::MalformedDocument(_)));

    let err = PhysicalPlan::from_document(&serde_json::json!({"fields": {}})).unwrap_err();
    assert!(matches!(err, OpalError::MalformedDocument(_)));
}
