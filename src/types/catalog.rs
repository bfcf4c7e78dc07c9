//! Type Catalog
//!
//! Maps YANG type-name tokens to the closed set of built-in kinds.

use serde_json::Value;
use std::fmt;

/// Built-in YANG type kinds, plus `Unknown` for names that must be resolved
/// as typedefs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum YangTypeKind {
    Boolean,
    Empty,
    IdentityRef,
    LeafRef,
    Union,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Decimal64,
    Enumeration,
    Bits,
    Binary,
    String,
    InstanceIdentifier,
    Unknown(String),
}

/// Kind of a value as encoded in the JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeKind {
    Null,
    Boolean,
    Integer,
    Double,
    String,
    Object,
    Array,
}

impl NativeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NativeKind::Null,
            Value::Bool(_) => NativeKind::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => NativeKind::Integer,
            Value::Number(_) => NativeKind::Double,
            Value::String(_) => NativeKind::String,
            Value::Object(_) => NativeKind::Object,
            Value::Array(_) => NativeKind::Array,
        }
    }
}

/// Resolve a type name to its kind. Names outside the catalog yield
/// [`YangTypeKind::Unknown`].
pub fn kind_of(name: &str) -> YangTypeKind {
    match name {
        "boolean" => YangTypeKind::Boolean,
        "empty" => YangTypeKind::Empty,
        "identityref" => YangTypeKind::IdentityRef,
        "leafref" => YangTypeKind::LeafRef,
        "union" => YangTypeKind::Union,
        "int8" => YangTypeKind::Int8,
        "int16" => YangTypeKind::Int16,
        "int32" => YangTypeKind::Int32,
        "int64" => YangTypeKind::Int64,
        "uint8" => YangTypeKind::Uint8,
        "uint16" => YangTypeKind::Uint16,
        "uint32" => YangTypeKind::Uint32,
        "uint64" => YangTypeKind::Uint64,
        "decimal64" => YangTypeKind::Decimal64,
        "enumeration" => YangTypeKind::Enumeration,
        "bits" => YangTypeKind::Bits,
        "binary" => YangTypeKind::Binary,
        "string" => YangTypeKind::String,
        "instance-identifier" => YangTypeKind::InstanceIdentifier,
        other => YangTypeKind::Unknown(other.to_string()),
    }
}

/// Coarse check of a value's JSON encoding against a resolved kind.
pub fn is_compatible(kind: &YangTypeKind, native: NativeKind) -> bool {
    match kind {
        YangTypeKind::Boolean => native == NativeKind::Boolean,
        YangTypeKind::Empty => native == NativeKind::Null,
        YangTypeKind::Int8
        | YangTypeKind::Int16
        | YangTypeKind::Int32
        | YangTypeKind::Uint8
        | YangTypeKind::Uint16
        | YangTypeKind::Uint32 => native == NativeKind::Integer,
        // 64-bit values may exceed what a JSON number can carry exactly
        YangTypeKind::Int64 | YangTypeKind::Uint64 => {
            matches!(native, NativeKind::Integer | NativeKind::String)
        }
        YangTypeKind::Decimal64
        | YangTypeKind::Enumeration
        | YangTypeKind::Bits
        | YangTypeKind::Binary
        | YangTypeKind::String
        | YangTypeKind::InstanceIdentifier => native == NativeKind::String,
        YangTypeKind::IdentityRef | YangTypeKind::LeafRef | YangTypeKind::Union => true,
        YangTypeKind::Unknown(_) => true,
    }
}

impl YangTypeKind {
    /// Sized integer kinds accept `from`/`to` range restrictions
    pub fn is_range_checkable(&self) -> bool {
        matches!(
            self,
            YangTypeKind::Int8
                | YangTypeKind::Int16
                | YangTypeKind::Int32
                | YangTypeKind::Int64
                | YangTypeKind::Uint8
                | YangTypeKind::Uint16
                | YangTypeKind::Uint32
                | YangTypeKind::Uint64
        )
    }

    pub fn is_pattern_checkable(&self) -> bool {
        matches!(self, YangTypeKind::String)
    }

    /// The YANG keyword for this kind
    pub fn name(&self) -> &str {
        match self {
            YangTypeKind::Boolean => "boolean",
            YangTypeKind::Empty => "empty",
            YangTypeKind::IdentityRef => "identityref",
            YangTypeKind::LeafRef => "leafref",
            YangTypeKind::Union => "union",
            YangTypeKind::Int8 => "int8",
            YangTypeKind::Int16 => "int16",
            YangTypeKind::Int32 => "int32",
            YangTypeKind::Int64 => "int64",
            YangTypeKind::Uint8 => "uint8",
            YangTypeKind::Uint16 => "uint16",
            YangTypeKind::Uint32 => "uint32",
            YangTypeKind::Uint64 => "uint64",
            YangTypeKind::Decimal64 => "decimal64",
            YangTypeKind::Enumeration => "enumeration",
            YangTypeKind::Bits => "bits",
            YangTypeKind::Binary => "binary",
            YangTypeKind::String => "string",
            YangTypeKind::InstanceIdentifier => "instance-identifier",
            YangTypeKind::Unknown(name) => name,
        }
    }
}

impl fmt::Display for YangTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of_builtins() {
        assert_eq!(kind_of("boolean"), YangTypeKind::Boolean);
        assert_eq!(kind_of("uint64"), YangTypeKind::Uint64);
        assert_eq!(kind_of("instance-identifier"), YangTypeKind::InstanceIdentifier);
        assert_eq!(kind_of("identityref"), YangTypeKind::IdentityRef);
    }

    #[test]
    fn test_kind_of_unknown_keeps_name() {
        assert_eq!(
            kind_of("inet:port-number"),
            YangTypeKind::Unknown("inet:port-number".to_string())
        );
        // Catalog is case-sensitive
        assert_eq!(kind_of("String"), YangTypeKind::Unknown("String".to_string()));
    }

    #[test]
    fn test_name_matches_catalog() {
        for name in ["empty", "int16", "decimal64", "bits", "binary", "union"] {
            assert_eq!(kind_of(name).name(), name);
        }
    }

    #[test]
    fn test_native_kind_of() {
        assert_eq!(NativeKind::of(&json!(null)), NativeKind::Null);
        assert_eq!(NativeKind::of(&json!(3)), NativeKind::Integer);
        assert_eq!(NativeKind::of(&json!(3.5)), NativeKind::Double);
        assert_eq!(NativeKind::of(&json!("x")), NativeKind::String);
        assert_eq!(NativeKind::of(&json!([1])), NativeKind::Array);
    }

    #[test]
    fn test_is_compatible() {
        assert!(is_compatible(&YangTypeKind::Boolean, NativeKind::Boolean));
        assert!(!is_compatible(&YangTypeKind::Boolean, NativeKind::String));
        assert!(is_compatible(&YangTypeKind::Empty, NativeKind::Null));
        assert!(!is_compatible(&YangTypeKind::Uint8, NativeKind::String));
        assert!(is_compatible(&YangTypeKind::Int64, NativeKind::String));
        assert!(is_compatible(&YangTypeKind::Uint64, NativeKind::Integer));
        assert!(!is_compatible(&YangTypeKind::Int64, NativeKind::Double));
        assert!(!is_compatible(&YangTypeKind::Decimal64, NativeKind::Double));
        assert!(is_compatible(&YangTypeKind::Union, NativeKind::Object));
        assert!(is_compatible(
            &YangTypeKind::Unknown("x".to_string()),
            NativeKind::Array
        ));
    }
}
