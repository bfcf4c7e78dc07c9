//! Pattern Matcher
//!
//! Patterns are compiled once when a type definition is parsed and reused for
//! every verification. Matching is an unanchored search, so schema authors
//! anchor with `^`/`$` themselves.
//!
//! The dialect is the `regex` crate's, not POSIX ERE. Most ERE patterns mean
//! the same thing, with two exceptions:
//!
//! - A backslash inside a bracket expression is an escape. `[\d]` is a digit
//!   class here, where ERE reads it as a literal `\` or `d`.
//! - Backreferences such as `\1` are not supported. Such a pattern fails to
//!   compile and therefore never matches.

use regex::Regex;

/// A compiled `pattern` restriction
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: Result<Regex, regex::Error>,
}

impl Pattern {
    /// Compile a pattern. Compilation failures are kept rather than returned:
    /// an uncompilable pattern simply never matches.
    pub fn new(source: &str) -> Self {
        let compiled = Regex::new(source);
        if let Err(e) = &compiled {
            log::debug!("Pattern '{}' does not compile: {}", source, e);
        }
        Self {
            source: source.to_string(),
            compiled,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_valid(&self) -> bool {
        self.compiled.is_ok()
    }

    pub fn is_match(&self, value: &str) -> bool {
        match &self.compiled {
            Ok(regex) => regex.is_match(value),
            Err(_) => false,
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}
