//! Typedef Resolution
//!
//! The verifier resolves names outside the built-in catalog through a
//! [`TypeResolver`]. [`TypedefRegistry`] is the in-memory implementation;
//! [`TextLookup`] adapts a function returning a definition's JSON text.

pub mod registry;

use thiserror::Error;

use crate::types::{DefinitionError, TypeDefinition};

pub use registry::{TypedefFormat, TypedefPriority, TypedefRegistry};

/// Why a typedef name could not be resolved
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("type '{0}' is not defined")]
    NotFound(String),
    #[error("definition of type '{name}' is invalid: {source}")]
    Parse {
        name: String,
        #[source]
        source: DefinitionError,
    },
    #[error("type '{0}' is defined in terms of itself")]
    Cycle(String),
    #[error("typedef chain for '{name}' is deeper than {limit}")]
    DepthExceeded { name: String, limit: usize },
}

/// Resolves typedef names to their definitions
pub trait TypeResolver {
    fn resolve(&self, name: &str) -> Result<TypeDefinition, LookupError>;
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    fn resolve(&self, name: &str) -> Result<TypeDefinition, LookupError> {
        (**self).resolve(name)
    }
}

/// Resolver for schemas without typedefs: every lookup fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTypedefs;

impl TypeResolver for NoTypedefs {
    fn resolve(&self, name: &str) -> Result<TypeDefinition, LookupError> {
        Err(LookupError::NotFound(name.to_string()))
    }
}

/// Adapts a textual lookup (`name -> JSON text of the definition`) into a
/// resolver. The text is parsed on every lookup.
#[derive(Debug, Clone, Copy)]
pub struct TextLookup<F>(pub F);

impl<F> TypeResolver for TextLookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, name: &str) -> Result<TypeDefinition, LookupError> {
        let text = (self.0)(name).ok_or_else(|| LookupError::NotFound(name.to_string()))?;
        TypeDefinition::parse(&text).map_err(|source| LookupError::Parse {
            name: name.to_string(),
            source,
        })
    }
}
