//! Value-Type Verifier
//!
//! Decides whether the canonical string form of a value is a legal instance
//! of a type definition, resolving typedef names through a [`TypeResolver`].

use serde::Deserialize;
use thiserror::Error;

use crate::typedef::{LookupError, TypeResolver};
use crate::types::definition::{is_non_negative_digits, parse_integer};
use crate::types::{PatternRestriction, RangeRestriction, Restrictions, TypeDefinition, YangTypeKind};

pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 32;

/// Outcome of a verification failure. Each variant carries a detail message
/// for logs; callers should only rely on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("invalid value: {0}")]
    InvalidType(String),
    #[error("schema error: {0}")]
    SchemaError(String),
    #[error("duplicate leaf-list member '{0}'")]
    DuplicateMember(String),
}

impl VerifyError {
    /// Process exit status reported by the command line: 1 for a rejected
    /// value, 2 for a schema the verifier cannot use
    pub fn exit_code(&self) -> u8 {
        match self {
            VerifyError::InvalidType(_) | VerifyError::DuplicateMember(_) => 1,
            VerifyError::SchemaError(_) => 2,
        }
    }
}

pub type VerificationOutcome = Result<(), VerifyError>;

/// Bound checking applied to the 64-bit and uint32 kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NumericBounds {
    /// uint32 has no upper bound, uint64 accepts any non-negative integer and
    /// int64 is not checked at all
    #[default]
    Permissive,
    /// Every integer kind is held to its exact bit width
    Strict,
}

/// How a list of alternative patterns is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
pub enum PatternListPolicy {
    /// The value must match at least one pattern
    #[default]
    #[serde(rename = "any")]
    #[value(name = "any")]
    AnyMatch,
    /// The value must match every pattern (RFC 7950 pattern semantics)
    #[serde(rename = "all")]
    #[value(name = "all")]
    AllMatch,
    /// A non-empty pattern list rejects every value
    #[serde(rename = "reject")]
    #[value(name = "reject")]
    RejectAll,
}

/// Tunable verifier behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    pub numeric_bounds: NumericBounds,
    pub pattern_list: PatternListPolicy,
    /// Longest typedef chain followed before giving up
    pub max_resolution_depth: usize,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            numeric_bounds: NumericBounds::default(),
            pattern_list: PatternListPolicy::default(),
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }
}

/// Verifies values against type definitions
#[derive(Debug, Clone)]
pub struct Verifier<R> {
    resolver: R,
    options: VerifyOptions,
}

fn invalid(message: String) -> VerifyError {
    log::debug!("{}", message);
    VerifyError::InvalidType(message)
}

impl<R: TypeResolver> Verifier<R> {
    pub fn new(resolver: R) -> Self {
        Self::with_options(resolver, VerifyOptions::default())
    }

    pub fn with_options(resolver: R, options: VerifyOptions) -> Self {
        Self { resolver, options }
    }

    pub fn options(&self) -> &VerifyOptions {
        &self.options
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Verify a canonical string value against a type definition
    pub fn verify_value(&self, definition: &TypeDefinition, value: &str) -> VerificationOutcome {
        let mut chain = Vec::new();
        self.verify_in_chain(definition, value, &mut chain)
    }

    /// `chain` holds the typedef names currently being resolved
    fn verify_in_chain(
        &self,
        definition: &TypeDefinition,
        value: &str,
        chain: &mut Vec<String>,
    ) -> VerificationOutcome {
        let (kind, restrictions) = match definition {
            TypeDefinition::Named(name) => return self.verify_named(name, value, chain),
            TypeDefinition::Builtin { kind, restrictions } => (kind, restrictions),
        };

        if let YangTypeKind::Unknown(name) = kind {
            return self.verify_named(name, value, chain);
        }

        self.check_intrinsic(kind, value)?;

        if let Some(restrictions) = restrictions {
            self.check_restrictions(kind, restrictions, value)?;
        }

        Ok(())
    }

    fn verify_named(&self, name: &str, value: &str, chain: &mut Vec<String>) -> VerificationOutcome {
        if chain.iter().any(|seen| seen == name) {
            return Err(invalid(LookupError::Cycle(name.to_string()).to_string()));
        }
        if chain.len() >= self.options.max_resolution_depth {
            return Err(invalid(
                LookupError::DepthExceeded {
                    name: name.to_string(),
                    limit: self.options.max_resolution_depth,
                }
                .to_string(),
            ));
        }

        let resolved = self
            .resolver
            .resolve(name)
            .map_err(|e| invalid(e.to_string()))?;

        chain.push(name.to_string());
        let outcome = self
            .verify_in_chain(&resolved, value, chain)
            .map_err(|e| match e {
                VerifyError::InvalidType(detail) => {
                    VerifyError::InvalidType(format!("{} (via '{}')", detail, name))
                }
                other => invalid(other.to_string()),
            });
        chain.pop();
        outcome
    }

    /// Checks every kind makes on its own, before any restriction
    fn check_intrinsic(&self, kind: &YangTypeKind, value: &str) -> VerificationOutcome {
        let strict = self.options.numeric_bounds == NumericBounds::Strict;

        match kind {
            YangTypeKind::Boolean => {
                if !matches!(value, "true" | "false" | "1" | "0") {
                    return Err(invalid(format!("'{}' is not a boolean", value)));
                }
                Ok(())
            }
            // empty is shape-checked by the caller; the reference kinds need
            // schema-wide context and are accepted as-is
            YangTypeKind::Empty
            | YangTypeKind::IdentityRef
            | YangTypeKind::LeafRef
            | YangTypeKind::Union => Ok(()),
            YangTypeKind::Int8 => {
                check_integer(kind, value, Some(i8::MIN.into()), Some(i8::MAX.into()))
            }
            YangTypeKind::Int16 => {
                check_integer(kind, value, Some(i16::MIN.into()), Some(i16::MAX.into()))
            }
            YangTypeKind::Int32 => {
                check_integer(kind, value, Some(i32::MIN.into()), Some(i32::MAX.into()))
            }
            YangTypeKind::Int64 if strict => {
                check_integer(kind, value, Some(i64::MIN.into()), Some(i64::MAX.into()))
            }
            YangTypeKind::Int64 => Ok(()),
            YangTypeKind::Uint8 => check_integer(kind, value, Some(0), Some(u8::MAX.into())),
            YangTypeKind::Uint16 => check_integer(kind, value, Some(0), Some(u16::MAX.into())),
            YangTypeKind::Uint32 => {
                let max = strict.then_some(i128::from(u32::MAX));
                check_integer(kind, value, Some(0), max)
            }
            YangTypeKind::Uint64 => {
                let max = strict.then_some(i128::from(u64::MAX));
                check_integer(kind, value, Some(0), max)
            }
            YangTypeKind::Decimal64
            | YangTypeKind::Enumeration
            | YangTypeKind::Bits
            | YangTypeKind::Binary
            | YangTypeKind::String
            | YangTypeKind::InstanceIdentifier => Ok(()),
            YangTypeKind::Unknown(name) => Err(invalid(format!("type '{}' is not resolved", name))),
        }
    }

    fn check_restrictions(
        &self,
        kind: &YangTypeKind,
        restrictions: &Restrictions,
        value: &str,
    ) -> VerificationOutcome {
        if kind.is_range_checkable() {
            if let Some(range) = &restrictions.range {
                check_range(range, value)?;
            }
        }
        if kind.is_pattern_checkable() {
            self.check_pattern(&restrictions.pattern, value)?;
        }
        Ok(())
    }

    fn check_pattern(&self, restriction: &PatternRestriction, value: &str) -> VerificationOutcome {
        match restriction {
            PatternRestriction::Absent => Ok(()),
            PatternRestriction::Single(pattern) => {
                if pattern.is_match(value) {
                    Ok(())
                } else {
                    Err(invalid(format!(
                        "'{}' does not match pattern '{}'",
                        value,
                        pattern.as_str()
                    )))
                }
            }
            PatternRestriction::Malformed => {
                Err(invalid("pattern restriction is not a string or a list of strings".to_string()))
            }
            PatternRestriction::List(patterns) if patterns.is_empty() => Ok(()),
            PatternRestriction::List(patterns) => {
                let passed = match self.options.pattern_list {
                    PatternListPolicy::AnyMatch => patterns.iter().any(|p| p.is_match(value)),
                    PatternListPolicy::AllMatch => patterns.iter().all(|p| p.is_match(value)),
                    PatternListPolicy::RejectAll => false,
                };
                if passed {
                    Ok(())
                } else {
                    Err(invalid(format!(
                        "'{}' fails {} pattern(s) under {:?}",
                        value,
                        patterns.len(),
                        self.options.pattern_list
                    )))
                }
            }
        }
    }
}

fn check_integer(
    kind: &YangTypeKind,
    value: &str,
    min: Option<i128>,
    max: Option<i128>,
) -> VerificationOutcome {
    // Unbounded unsigned kinds accept digits of any length
    if min == Some(0) && max.is_none() {
        if is_non_negative_digits(value) {
            return Ok(());
        }
        return Err(invalid(format!("'{}' is not a valid {}", value, kind)));
    }

    let n = parse_integer(value)
        .ok_or_else(|| invalid(format!("'{}' is not a valid {}", value, kind)))?;

    let below = min.is_some_and(|min| n < min);
    let above = max.is_some_and(|max| n > max);
    if below || above {
        return Err(invalid(format!("{} is out of range for {}", n, kind)));
    }
    Ok(())
}

fn check_range(range: &RangeRestriction, value: &str) -> VerificationOutcome {
    match range {
        RangeRestriction::Malformed => Err(invalid("range bounds are not integers".to_string())),
        RangeRestriction::Bounds { from, to } => {
            let n = parse_integer(value)
                .ok_or_else(|| invalid(format!("'{}' is not an integer", value)))?;
            if n < *from || n > *to {
                return Err(invalid(format!("{} is outside range {}..{}", n, from, to)));
            }
            Ok(())
        }
    }
}
