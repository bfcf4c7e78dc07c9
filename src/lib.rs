//! YANG Value Verifier
//!
//! Checks JSON-encoded data values against YANG type definitions.
//!
//! This library provides:
//! - The built-in YANG type catalog
//! - Range and pattern restrictions
//! - Typedef resolution through pluggable resolvers
//! - Leaf and leaf-list verification
//! - Configuration management

pub mod config;
pub mod typedef;
pub mod types;
pub mod verify;

// Re-exports for clean public API
pub use config::Config;
pub use typedef::{TypeResolver, TypedefRegistry};
pub use types::{is_compatible, kind_of, TypeDefinition, YangTypeKind};
pub use verify::{is_mandatory, SchemaNode, Verifier, VerifyError, VerifyOptions};
