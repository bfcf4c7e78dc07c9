//! Leaf and Leaf-List Verification
//!
//! Schema nodes are JSON fragments such as:
//!
//! ```json
//! { "statement": "leaf", "type": { "type": "uint8", "from": "1", "to": "9" }, "mandatory": true }
//! ```
//!
//! A node without `statement` is treated as a leaf.

use std::borrow::Cow;

use serde::Deserialize;
use serde_json::Value;

use super::engine::{VerificationOutcome, Verifier, VerifyError};
use crate::typedef::TypeResolver;
use crate::types::catalog::{is_compatible, NativeKind};
use crate::types::definition::TYPE_KEY;
use crate::types::{TypeDefinition, YangTypeKind};

pub const STATEMENT_KEY: &str = "statement";
pub const MANDATORY_KEY: &str = "mandatory";

/// The YANG statement a schema node was declared with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeCategory {
    Leaf,
    LeafList,
    Other(String),
}

impl NodeCategory {
    pub fn from_statement(statement: Option<&str>) -> Self {
        match statement {
            None | Some("leaf") => NodeCategory::Leaf,
            Some("leaf-list") => NodeCategory::LeafList,
            Some(other) => NodeCategory::Other(other.to_string()),
        }
    }
}

/// The `type` field of a schema node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    Missing,
    Malformed(String),
    Defined(TypeDefinition),
}

/// A leaf or leaf-list schema node, with its type parsed and its patterns
/// compiled
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct SchemaNode {
    pub category: NodeCategory,
    pub node_type: NodeType,
    pub mandatory: bool,
}

impl SchemaNode {
    pub fn from_json(node: &Value) -> Self {
        let category =
            NodeCategory::from_statement(node.get(STATEMENT_KEY).and_then(Value::as_str));

        let node_type = match node.get(TYPE_KEY) {
            None => NodeType::Missing,
            Some(fragment) => match TypeDefinition::from_json(fragment) {
                Ok(definition) => NodeType::Defined(definition),
                Err(e) => NodeType::Malformed(e.to_string()),
            },
        };

        let mandatory = matches!(node.get(MANDATORY_KEY), Some(Value::Bool(true)));

        Self {
            category,
            node_type,
            mandatory,
        }
    }

    /// Build a leaf node directly from a definition
    pub fn leaf(definition: TypeDefinition) -> Self {
        Self {
            category: NodeCategory::Leaf,
            node_type: NodeType::Defined(definition),
            mandatory: false,
        }
    }

    pub fn leaf_list(definition: TypeDefinition) -> Self {
        Self {
            category: NodeCategory::LeafList,
            node_type: NodeType::Defined(definition),
            mandatory: false,
        }
    }

    pub fn type_definition(&self) -> Result<&TypeDefinition, VerifyError> {
        match &self.node_type {
            NodeType::Defined(definition) => Ok(definition),
            NodeType::Missing => Err(VerifyError::SchemaError(
                "schema node has no 'type'".to_string(),
            )),
            NodeType::Malformed(reason) => Err(VerifyError::SchemaError(reason.clone())),
        }
    }

    /// Only leaves can be mandatory; the flag on any other node is ignored
    pub fn is_mandatory(&self) -> bool {
        self.category == NodeCategory::Leaf && self.mandatory
    }

    /// For a leaf of a built-in kind, the kind and JSON encoding of `value`
    /// when RFC 7951 would encode that kind differently. Typedef references
    /// and leaf-lists are not checked.
    pub fn encoding_mismatch(&self, value: &Value) -> Option<(&YangTypeKind, NativeKind)> {
        if self.category != NodeCategory::Leaf {
            return None;
        }
        match &self.node_type {
            NodeType::Defined(TypeDefinition::Builtin { kind, .. }) => {
                let native = NativeKind::of(value);
                (!is_compatible(kind, native)).then_some((kind, native))
            }
            _ => None,
        }
    }
}

impl From<Value> for SchemaNode {
    fn from(node: Value) -> Self {
        Self::from_json(&node)
    }
}

pub fn is_mandatory(node: &SchemaNode) -> bool {
    node.is_mandatory()
}

/// Lexical form used for type checks and uniqueness. `null`, objects and
/// arrays have none.
pub fn canonical_string(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Bool(true) => Some(Cow::Borrowed("true")),
        Value::Bool(false) => Some(Cow::Borrowed("false")),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Null | Value::Object(_) | Value::Array(_) => None,
    }
}

fn no_canonical_form(value: &Value) -> VerifyError {
    VerifyError::InvalidType(format!("{} has no scalar string form", value))
}

impl<R: TypeResolver> Verifier<R> {
    /// Verify a scalar value against a leaf node
    pub fn verify_leaf(&self, value: &Value, node: &SchemaNode) -> VerificationOutcome {
        if value.is_object() || value.is_array() {
            return Err(VerifyError::InvalidType(
                "leaf value must be a scalar".to_string(),
            ));
        }

        let definition = node.type_definition()?;
        let canonical = canonical_string(value).ok_or_else(|| no_canonical_form(value))?;

        self.verify_value(definition, &canonical)
    }

    /// Verify an array value against a leaf-list node. Members are checked in
    /// order, then compared pairwise for duplicates.
    pub fn verify_leaf_list(&self, value: &Value, node: &SchemaNode) -> VerificationOutcome {
        let Some(items) = value.as_array() else {
            return Err(VerifyError::InvalidType(
                "leaf-list value must be an array".to_string(),
            ));
        };

        let definition = node.type_definition()?;

        let mut members = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let canonical = canonical_string(item).ok_or_else(|| no_canonical_form(item))?;
            self.verify_value(definition, &canonical).map_err(|e| {
                VerifyError::InvalidType(format!("leaf-list member {}: {}", index, e))
            })?;
            members.push(canonical);
        }

        for (i, member) in members.iter().enumerate() {
            if members[i + 1..].iter().any(|other| other == member) {
                return Err(VerifyError::DuplicateMember(member.to_string()));
            }
        }

        Ok(())
    }

    /// Dispatch on the node's statement
    pub fn verify_node(&self, value: &Value, node: &SchemaNode) -> VerificationOutcome {
        match &node.category {
            NodeCategory::Leaf => self.verify_leaf(value, node),
            NodeCategory::LeafList => self.verify_leaf_list(value, node),
            NodeCategory::Other(statement) => Err(VerifyError::SchemaError(format!(
                "'{}' nodes do not carry a value",
                statement
            ))),
        }
    }
}
