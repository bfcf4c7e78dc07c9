//! Type Definitions
//!
//! A schema `type` fragment is either a bare name (`"uint8"`) or an object
//! carrying the name plus restrictions:
//!
//! ```json
//! { "type": "string", "pattern": ["^[a-z]+$", "^[0-9]+$"] }
//! { "type": "int32", "from": "10", "to": "20" }
//! ```
//!
//! Fragments are parsed once into [`TypeDefinition`]; bounds are converted to
//! integers and patterns compiled at that point.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::catalog::{kind_of, NativeKind, YangTypeKind};
use super::pattern::Pattern;

pub const TYPE_KEY: &str = "type";
pub const FROM_KEY: &str = "from";
pub const TO_KEY: &str = "to";
pub const PATTERN_KEY: &str = "pattern";

/// Errors raised while parsing a type fragment
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("type definition has no 'type' field")]
    MissingTypeName,
    #[error("'type' field must be a string, got {0:?}")]
    TypeNameNotString(NativeKind),
    #[error("type definition must be a string or an object, got {0:?}")]
    UnexpectedShape(NativeKind),
    #[error("type definition is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A parsed type fragment
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum TypeDefinition {
    /// A catalog kind. `restrictions` is `None` for a bare name and `Some`
    /// for the structured form, even when no restriction is present.
    Builtin {
        kind: YangTypeKind,
        restrictions: Option<Restrictions>,
    },
    /// A typedef that must be resolved by name
    Named(String),
}

/// Restrictions carried by a structured type fragment
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Restrictions {
    /// Present only when both `from` and `to` are given
    pub range: Option<RangeRestriction>,
    pub pattern: PatternRestriction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RangeRestriction {
    Bounds { from: i128, to: i128 },
    /// A bound that is not an integer; fails every value
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PatternRestriction {
    #[default]
    Absent,
    Single(Pattern),
    /// Alternatives, evaluated according to the verifier's pattern-list policy
    List(Vec<Pattern>),
    /// Neither a string nor an array of strings; fails every value
    Malformed,
}

impl TypeDefinition {
    /// Definition for a bare type name
    pub fn from_name(name: &str) -> Self {
        match kind_of(name) {
            YangTypeKind::Unknown(name) => TypeDefinition::Named(name),
            kind => TypeDefinition::Builtin {
                kind,
                restrictions: None,
            },
        }
    }

    pub fn from_json(value: &Value) -> Result<Self, DefinitionError> {
        match value {
            Value::String(name) => Ok(Self::from_name(name)),
            Value::Object(fields) => {
                let name = match fields.get(TYPE_KEY) {
                    Some(Value::String(name)) => name,
                    Some(other) => {
                        return Err(DefinitionError::TypeNameNotString(NativeKind::of(other)));
                    }
                    None => return Err(DefinitionError::MissingTypeName),
                };

                // Restrictions on a typedef reference are not carried through
                // resolution, so they are dropped here.
                match kind_of(name) {
                    YangTypeKind::Unknown(name) => Ok(TypeDefinition::Named(name)),
                    kind => {
                        let restrictions = Restrictions::from_fields(&kind, fields);
                        Ok(TypeDefinition::Builtin {
                            kind,
                            restrictions: Some(restrictions),
                        })
                    }
                }
            }
            other => Err(DefinitionError::UnexpectedShape(NativeKind::of(other))),
        }
    }

    /// Parse the JSON text of a type fragment
    pub fn parse(text: &str) -> Result<Self, DefinitionError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// The type name this definition refers to
    pub fn type_name(&self) -> &str {
        match self {
            TypeDefinition::Builtin { kind, .. } => kind.name(),
            TypeDefinition::Named(name) => name,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            TypeDefinition::Builtin {
                restrictions: Some(_),
                ..
            }
        )
    }
}

impl TryFrom<Value> for TypeDefinition {
    type Error = DefinitionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

impl std::str::FromStr for TypeDefinition {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Restrictions {
    fn from_fields(kind: &YangTypeKind, fields: &Map<String, Value>) -> Self {
        let mut restrictions = Restrictions::default();

        if kind.is_range_checkable() {
            if let (Some(from), Some(to)) = (fields.get(FROM_KEY), fields.get(TO_KEY)) {
                restrictions.range = Some(match (parse_bound(from), parse_bound(to)) {
                    (Some(from), Some(to)) => RangeRestriction::Bounds { from, to },
                    _ => RangeRestriction::Malformed,
                });
            }
        }

        if kind.is_pattern_checkable() {
            restrictions.pattern = match fields.get(PATTERN_KEY) {
                None => PatternRestriction::Absent,
                Some(Value::String(source)) => PatternRestriction::Single(Pattern::new(source)),
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|item| item.as_str().map(Pattern::new))
                    .collect::<Option<Vec<_>>>()
                    .map(PatternRestriction::List)
                    .unwrap_or(PatternRestriction::Malformed),
                Some(_) => PatternRestriction::Malformed,
            };
        }

        restrictions
    }
}

/// Bounds may be written as strings (`"10"`) or JSON integers (`10`)
fn parse_bound(value: &Value) -> Option<i128> {
    match value {
        Value::String(s) => parse_integer(s),
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        _ => None,
    }
}

/// Parse a decimal integer with an optional sign. Surrounding whitespace and
/// any other characters are rejected.
pub fn parse_integer(s: &str) -> Option<i128> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Whether `s` is a decimal integer that is not negative, with no limit on
/// its magnitude. `-0` counts as non-negative.
pub fn is_non_negative_digits(s: &str) -> bool {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    };
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (!negative || digits.bytes().all(|b| b == b'0'))
}
