//! Configuration management for the YANG value verifier.
//!
//! Handles:
//! - Command-line argument parsing
//! - Optional TOML configuration file
//! - Typedef directory configuration
//!
//! Command-line flags override the configuration file, which overrides the
//! built-in defaults.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::typedef::{TypedefPriority, TypedefRegistry};
use crate::verify::{NumericBounds, PatternListPolicy, VerifyOptions};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line arguments for the verifier
#[derive(Debug, Parser)]
#[command(name = "yang-verify")]
#[command(about = "Verify JSON values against YANG leaf and leaf-list definitions")]
#[command(version)]
pub struct Args {
    /// Schema node (JSON) describing the leaf or leaf-list
    #[arg(long, help = "Path to the JSON schema node")]
    pub schema: PathBuf,

    /// Inline JSON value to verify
    #[arg(
        long,
        conflicts_with = "document",
        required_unless_present = "document",
        allow_hyphen_values = true,
        help = "JSON value to verify (e.g. '42', '\"eth0\"', '[1,2]')"
    )]
    pub value: Option<String>,

    /// File holding the JSON value to verify
    #[arg(long, help = "Path to a JSON document holding the value")]
    pub document: Option<PathBuf>,

    /// Additional typedef directories, searched after the user directory
    #[arg(long = "typedef-dir", help = "Directory containing typedef .json/.toml files")]
    pub typedef_dirs: Vec<PathBuf>,

    /// Individual typedef files, loaded last
    #[arg(long = "typedef-file", help = "Typedef .json/.toml file")]
    pub typedef_files: Vec<PathBuf>,

    /// Configuration file
    #[arg(long, help = "Path to a yang-verify TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Do not load the embedded inet:/yang: typedefs")]
    pub no_builtin_typedefs: bool,

    #[arg(long, help = "Do not load typedefs from the user configuration directory")]
    pub no_user_typedefs: bool,

    #[arg(long, value_enum, help = "Bound checking for uint32/uint64/int64")]
    pub numeric_bounds: Option<NumericBounds>,

    #[arg(long, value_enum, help = "How a list of patterns is evaluated")]
    pub pattern_list: Option<PatternListPolicy>,

    #[arg(long, help = "Maximum typedef resolution depth")]
    pub max_depth: Option<usize>,

    /// Log level for the verifier
    #[arg(long, help = "Log level (trace, debug, info, warn, error)")]
    pub log_level: Option<String>,
}

/// Contents of a configuration file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub typedef_dirs: Vec<PathBuf>,
    pub typedef_files: Vec<PathBuf>,
    pub builtin_typedefs: Option<bool>,
    pub log_level: Option<String>,
    pub verifier: VerifierSection,
}

/// `[verifier]` table; unset keys keep their defaults
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct VerifierSection {
    pub numeric_bounds: Option<NumericBounds>,
    pub pattern_list: Option<PatternListPolicy>,
    pub max_resolution_depth: Option<usize>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut file: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        // Relative paths are relative to the config file
        if let Some(base) = path.parent() {
            file.typedef_dirs = file.typedef_dirs.iter().map(|p| base.join(p)).collect();
            file.typedef_files = file.typedef_files.iter().map(|p| base.join(p)).collect();
        }
        Ok(file)
    }
}

/// Where the value under test comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Inline(String),
    Document(PathBuf),
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub schema_path: PathBuf,
    pub input: Input,
    /// Per-user typedef directory (lower priority than `typedef_dirs`)
    pub user_typedef_dir: Option<PathBuf>,
    pub typedef_dirs: Vec<PathBuf>,
    pub typedef_files: Vec<PathBuf>,
    pub builtin_typedefs: bool,
    pub verify_options: VerifyOptions,
    pub log_level: String,
}

impl Config {
    /// Create configuration from the process command line
    pub fn from_command_line() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let input = match (args.value, args.document) {
            (Some(value), _) => Input::Inline(value),
            (None, Some(path)) => Input::Document(path),
            (None, None) => anyhow::bail!("Either --value or --document is required"),
        };

        let defaults = VerifyOptions::default();
        let verify_options = VerifyOptions {
            numeric_bounds: args
                .numeric_bounds
                .or(file.verifier.numeric_bounds)
                .unwrap_or(defaults.numeric_bounds),
            pattern_list: args
                .pattern_list
                .or(file.verifier.pattern_list)
                .unwrap_or(defaults.pattern_list),
            max_resolution_depth: args
                .max_depth
                .or(file.verifier.max_resolution_depth)
                .unwrap_or(defaults.max_resolution_depth),
        };

        // Config file directories first so command-line ones win on conflicts
        let mut typedef_dirs = file.typedef_dirs;
        typedef_dirs.extend(args.typedef_dirs);
        let mut typedef_files = file.typedef_files;
        typedef_files.extend(args.typedef_files);

        let builtin_typedefs = !args.no_builtin_typedefs && file.builtin_typedefs.unwrap_or(true);
        let user_typedef_dir = if args.no_user_typedefs {
            None
        } else {
            dirs::config_dir().map(|dir| dir.join("yang-verify").join("typedefs"))
        };

        Ok(Config {
            schema_path: args.schema,
            input,
            user_typedef_dir,
            typedef_dirs,
            typedef_files,
            builtin_typedefs,
            verify_options,
            log_level: args
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    /// Build the typedef registry: built-in < user directory < configured
    /// directories < explicit files
    pub fn load_typedefs(&self) -> Result<TypedefRegistry> {
        let mut registry = if self.builtin_typedefs {
            TypedefRegistry::with_builtin_typedefs()
        } else {
            TypedefRegistry::new()
        };

        if let Some(dir) = &self.user_typedef_dir {
            registry.load_directory(dir, TypedefPriority::UserGlobal)?;
        }
        for dir in &self.typedef_dirs {
            registry.load_directory(dir, TypedefPriority::Workspace)?;
        }
        for file in &self.typedef_files {
            registry.load_file(file, TypedefPriority::Explicit)?;
        }

        log::info!("Loaded {} typedefs", registry.len());
        Ok(registry)
    }

    /// Read the schema node JSON
    pub fn read_schema(&self) -> Result<Value> {
        read_json_file(&self.schema_path, "schema")
    }

    /// Read the value under test
    pub fn read_value(&self) -> Result<Value> {
        match &self.input {
            Input::Inline(text) => {
                serde_json::from_str(text).with_context(|| format!("Invalid JSON value: {}", text))
            }
            Input::Document(path) => read_json_file(path, "document"),
        }
    }
}

fn read_json_file(path: &Path, what: &str) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", what, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} file: {}", what, path.display()))
}
