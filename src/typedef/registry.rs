//! Typedef Registry
//!
//! In-memory store of named type definitions. Typedef files are layered:
//! built-in < user-global < workspace < explicit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{LookupError, TypeResolver};
use crate::types::{DefinitionError, TypeDefinition};

const BUILTIN_TYPEDEFS: &str = include_str!("../../resources/typedefs/ietf-types.toml");

/// Where a typedef was loaded from. Higher priorities win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypedefPriority {
    BuiltIn,
    UserGlobal,
    Workspace,
    Explicit,
}

/// Supported typedef file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedefFormat {
    Json,
    Toml,
}

impl TypedefFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Some(TypedefFormat::Json),
            Some("toml") => Some(TypedefFormat::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct LoadedTypedef {
    definition: TypeDefinition,
    priority: TypedefPriority,
    source_path: Option<PathBuf>,
}

/// Named type definitions available to the verifier
#[derive(Debug, Clone, Default)]
pub struct TypedefRegistry {
    typedefs: HashMap<String, LoadedTypedef>,
}

impl TypedefRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the embedded `inet:`/`yang:` typedefs
    pub fn with_builtin_typedefs() -> Self {
        let mut registry = Self::new();
        if let Err(e) = registry.load_str(
            BUILTIN_TYPEDEFS,
            TypedefFormat::Toml,
            TypedefPriority::BuiltIn,
            None,
        ) {
            log::warn!("Failed to parse embedded typedefs: {:#}", e);
        }
        registry
    }

    /// Add a definition at explicit priority
    pub fn insert(&mut self, name: &str, definition: TypeDefinition) {
        self.insert_with_priority(name, definition, TypedefPriority::Explicit, None);
    }

    /// Parse the JSON text of a definition and add it at explicit priority
    pub fn insert_text(&mut self, name: &str, text: &str) -> Result<(), DefinitionError> {
        let definition = TypeDefinition::parse(text)?;
        self.insert(name, definition);
        Ok(())
    }

    /// Add a definition unless a higher-priority one already exists.
    /// Returns whether the definition was stored.
    pub fn insert_with_priority(
        &mut self,
        name: &str,
        definition: TypeDefinition,
        priority: TypedefPriority,
        source_path: Option<&Path>,
    ) -> bool {
        if let Some(existing) = self.typedefs.get(name) {
            if existing.priority > priority {
                log::debug!(
                    "Keeping {:?} typedef '{}' over {:?} definition",
                    existing.priority,
                    name,
                    priority
                );
                return false;
            }
        }

        self.typedefs.insert(
            name.to_string(),
            LoadedTypedef {
                definition,
                priority,
                source_path: source_path.map(Path::to_path_buf),
            },
        );
        true
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.typedefs.get(name).map(|t| &t.definition)
    }

    pub fn priority_of(&self, name: &str) -> Option<TypedefPriority> {
        self.typedefs.get(name).map(|t| t.priority)
    }

    /// File a typedef was loaded from, if any
    pub fn source_of(&self, name: &str) -> Option<&Path> {
        self.typedefs.get(name)?.source_path.as_deref()
    }

    /// All typedef names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.typedefs.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.typedefs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.typedefs.is_empty()
    }

    /// Load every typedef in a file's content. Returns how many were stored.
    pub fn load_str(
        &mut self,
        content: &str,
        format: TypedefFormat,
        priority: TypedefPriority,
        source_path: Option<&Path>,
    ) -> Result<usize> {
        let describe = || match source_path {
            Some(path) => format!("Failed to parse typedef file: {}", path.display()),
            None => "Failed to parse typedef content".to_string(),
        };

        let definitions: HashMap<String, TypeDefinition> = match format {
            TypedefFormat::Json => serde_json::from_str(content).with_context(describe)?,
            TypedefFormat::Toml => toml::from_str(content).with_context(describe)?,
        };

        let mut stored = 0;
        for (name, definition) in definitions {
            if self.insert_with_priority(&name, definition, priority, source_path) {
                stored += 1;
            }
        }
        Ok(stored)
    }

    /// Load a single `.json` or `.toml` typedef file
    pub fn load_file(&mut self, path: &Path, priority: TypedefPriority) -> Result<usize> {
        let format = TypedefFormat::from_path(path).with_context(|| {
            format!("Unsupported typedef file extension: {}", path.display())
        })?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read typedef file: {}", path.display()))?;

        let stored = self.load_str(&content, format, priority, Some(path))?;
        log::debug!("Loaded {} typedefs from {}", stored, path.display());
        Ok(stored)
    }

    /// Load all typedef files in a directory. A missing directory is not an
    /// error; unreadable or invalid files are skipped with a warning.
    pub fn load_directory(&mut self, dir: &Path, priority: TypedefPriority) -> Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read typedef directory: {}", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if TypedefFormat::from_path(&path).is_some() {
                paths.push(path);
            }
        }
        // Directory order is unspecified; sort so same-priority overrides are stable
        paths.sort();

        let mut stored = 0;
        for path in paths {
            match self.load_file(&path, priority) {
                Ok(count) => stored += count,
                Err(e) => log::warn!("Skipping typedef file {}: {:#}", path.display(), e),
            }
        }
        Ok(stored)
    }
}

impl TypeResolver for TypedefRegistry {
    fn resolve(&self, name: &str) -> Result<TypeDefinition, LookupError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }
}
