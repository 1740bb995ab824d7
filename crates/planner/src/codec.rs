//! Plan document encode/decode.
//!
//! Plans serialize to self-describing, field-name-keyed JSON documents. One
//! reserved field, [`NODE_TYPE_FIELD`], carries the operator discriminant;
//! children, output schemas, and expression subtrees nest recursively.
//! Decoding checks the discriminant before reading anything else and checks
//! that every required field is present before constructing anything, so a
//! bad document can never yield a partially-populated node.

use opal_common::{OpalError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::physical_plan::{
    HashJoinNode, IndexScanNode, LimitNode, PhysicalPlan, PlanNodeType, SeqScanNode,
};

/// Reserved document field carrying the operator discriminant.
pub const NODE_TYPE_FIELD: &str = "node_type";

impl PhysicalPlan {
    /// Serializes this plan (children, schema, and expressions included)
    /// into a plan document.
    pub fn to_document(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| OpalError::Planning(format!("plan serialization failed: {e}")))
    }

    /// Reconstructs a plan of whatever kind the document declares.
    pub fn from_document(doc: &Value) -> Result<PhysicalPlan> {
        let obj = as_object(doc)?;
        match discriminant(obj)? {
            "SeqScan" => SeqScanNode::from_document(doc).map(PhysicalPlan::SeqScan),
            "IndexScan" => IndexScanNode::from_document(doc).map(PhysicalPlan::IndexScan),
            "Limit" => LimitNode::from_document(doc).map(PhysicalPlan::Limit),
            "HashJoin" => HashJoinNode::from_document(doc).map(PhysicalPlan::HashJoin),
            other => {
                debug!(found = other, "plan document names an unknown node type");
                Err(OpalError::MalformedDocument(format!(
                    "unknown node type `{other}`"
                )))
            }
        }
    }
}

impl SeqScanNode {
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "children",
        "output_schema",
        "predicate",
        "is_for_update",
        "database_oid",
        "namespace_oid",
        "table_oid",
        "column_oids",
    ];

    /// Reconstructs a sequential scan from a plan document.
    ///
    /// A document tagged as any other operator kind is a
    /// [`OpalError::NodeTypeMismatch`], and a document lacking a required
    /// field is a [`OpalError::MissingField`]; neither produces a node.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let obj = as_object(doc)?;
        check_node_type(obj, PlanNodeType::SeqScan)?;
        check_required_fields(obj, PlanNodeType::SeqScan, Self::REQUIRED_FIELDS)?;
        decode_node(doc, PlanNodeType::SeqScan)
    }
}

impl IndexScanNode {
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "children",
        "output_schema",
        "predicate",
        "is_for_update",
        "database_oid",
        "namespace_oid",
        "index_oid",
        "table_oid",
        "column_oids",
    ];

    /// Reconstructs an index scan from a plan document.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let obj = as_object(doc)?;
        check_node_type(obj, PlanNodeType::IndexScan)?;
        check_required_fields(obj, PlanNodeType::IndexScan, Self::REQUIRED_FIELDS)?;
        decode_node(doc, PlanNodeType::IndexScan)
    }
}

impl LimitNode {
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["children", "output_schema", "limit", "offset"];

    /// Reconstructs a limit from a plan document.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let obj = as_object(doc)?;
        check_node_type(obj, PlanNodeType::Limit)?;
        check_required_fields(obj, PlanNodeType::Limit, Self::REQUIRED_FIELDS)?;
        decode_node(doc, PlanNodeType::Limit)
    }
}

impl HashJoinNode {
    const REQUIRED_FIELDS: &'static [&'static str] = &[
        "children",
        "output_schema",
        "join_type",
        "build_side",
        "left_keys",
        "right_keys",
    ];

    /// Reconstructs a hash join from a plan document.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let obj = as_object(doc)?;
        check_node_type(obj, PlanNodeType::HashJoin)?;
        check_required_fields(obj, PlanNodeType::HashJoin, Self::REQUIRED_FIELDS)?;
        decode_node(doc, PlanNodeType::HashJoin)
    }
}

fn as_object(doc: &Value) -> Result<&Map<String, Value>> {
    doc.as_object()
        .ok_or_else(|| OpalError::MalformedDocument("plan document is not an object".to_string()))
}

fn discriminant(obj: &Map<String, Value>) -> Result<&str> {
    obj.get(NODE_TYPE_FIELD).and_then(Value::as_str).ok_or_else(|| {
        OpalError::MalformedDocument(format!(
            "plan document carries no `{NODE_TYPE_FIELD}` discriminant"
        ))
    })
}

fn check_node_type(obj: &Map<String, Value>, expected: PlanNodeType) -> Result<()> {
    let found = discriminant(obj)?;
    if found != expected.as_str() {
        debug!(
            expected = expected.as_str(),
            found, "plan document discriminant mismatch"
        );
        return Err(OpalError::NodeTypeMismatch {
            expected: expected.as_str().to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

fn check_required_fields(
    obj: &Map<String, Value>,
    node_type: PlanNodeType,
    fields: &[&str],
) -> Result<()> {
    for field in fields {
        if !obj.contains_key(*field) {
            debug!(
                node_type = node_type.as_str(),
                field, "plan document is missing a required field"
            );
            return Err(OpalError::MissingField {
                node_type: node_type.as_str().to_string(),
                field: (*field).to_string(),
            });
        }
    }
    Ok(())
}

fn decode_node<T: DeserializeOwned>(doc: &Value, node_type: PlanNodeType) -> Result<T> {
    serde_json::from_value(doc.clone()).map_err(|e| {
        debug!(node_type = node_type.as_str(), error = %e, "plan document decode failed");
        OpalError::MalformedDocument(format!("{node_type} document: {e}"))
    })
}
