//! Verification Engine
//!
//! Type checking of values, leaves and leaf-lists, kept apart from schema
//! loading and the command line.

pub mod engine;
pub mod node;

pub use engine::{
    NumericBounds, PatternListPolicy, VerificationOutcome, Verifier, VerifyError, VerifyOptions,
};
pub use node::{canonical_string, is_mandatory, NodeCategory, NodeType, SchemaNode};
