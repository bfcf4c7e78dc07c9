//! YANG Type Model
//!
//! Built-in kinds, parsed type fragments and compiled patterns.

pub mod catalog;
pub mod definition;
pub mod pattern;

pub use catalog::{is_compatible, kind_of, NativeKind, YangTypeKind};
pub use definition::{
    DefinitionError, PatternRestriction, RangeRestriction, Restrictions, TypeDefinition,
};
pub use pattern::Pattern;
