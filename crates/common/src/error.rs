use thiserror::Error;

/// Canonical Opal error taxonomy used across crates.
///
/// Classification guidance:
/// - [`OpalError::Planning`]: plan-construction contract violations reported
///   before a node exists
/// - [`OpalError::NodeTypeMismatch`] / [`OpalError::MissingField`] /
///   [`OpalError::MalformedDocument`]: plan-document decode failures; these
///   are deterministic data errors, never transient ones
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpalError {
    /// Plan-construction contract violations.
    ///
    /// Examples:
    /// - a rendering or lowering helper handed a plan shape it does not
    ///   support
    #[error("planning error: {0}")]
    Planning(String),

    /// A plan document's type discriminant does not name the node type the
    /// caller asked to reconstruct.
    ///
    /// Comparing *nodes* of differing type is ordinary and yields "not
    /// equal"; asking a decoder for the wrong type is an error so a wrong
    /// cache entry can never produce a half-populated node.
    #[error("plan decode error: expected node type {expected}, found {found}")]
    NodeTypeMismatch {
        /// Node type the caller asked for.
        expected: String,
        /// Discriminant actually carried by the document.
        found: String,
    },

    /// A plan document lacks a field required by its node type.
    ///
    /// Required fields are never silently defaulted; defaulting an OID could
    /// make a scan target the wrong table.
    #[error("plan decode error: {node_type} document is missing required field `{field}`")]
    MissingField {
        /// Node type being reconstructed.
        node_type: String,
        /// Name of the absent field.
        field: String,
    },

    /// Any other structural failure while decoding a plan document.
    #[error("malformed plan document: {0}")]
    MalformedDocument(String),
}

/// Standard Opal result alias.
pub type Result<T> = std::result::Result<T, OpalError>;
