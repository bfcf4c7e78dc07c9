//! Tests for configuration files layered under command-line flags
use std::fs;

use clap::Parser;
use serde_json::json;
use tempfile::TempDir;
use yang_verify::config::{Args, Config, Input};
use yang_verify::typedef::TypedefPriority;
use yang_verify::verify::{NumericBounds, PatternListPolicy};
use yang_verify::{SchemaNode, Verifier};

fn setup_workspace() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    fs::create_dir(dir.path().join("typedefs")).expect("create typedef dir");
    fs::write(
        dir.path().join("typedefs").join("acme.json"),
        r#"{"acme:vlan": {"type": "uint16", "from": "1", "to": "4094"}}"#,
    )
    .expect("write typedefs");
    fs::write(
        dir.path().join("yang-verify.toml"),
        r#"
typedef_dirs = ["typedefs"]
builtin_typedefs = false
log_level = "debug"

[verifier]
numeric_bounds = "strict"
pattern_list = "all"
"#,
    )
    .expect("write config");
    fs::write(
        dir.path().join("node.json"),
        r#"{"statement": "leaf-list", "type": "acme:vlan"}"#,
    )
    .expect("write schema");
    fs::write(dir.path().join("value.json"), "[10, 20, 4094]").expect("write document");
    dir
}

fn config_for(dir: &TempDir, extra: &[&str]) -> Config {
    let schema = dir.path().join("node.json");
    let config_file = dir.path().join("yang-verify.toml");
    let mut argv = vec![
        "yang-verify".to_string(),
        "--schema".to_string(),
        schema.display().to_string(),
        "--config".to_string(),
        config_file.display().to_string(),
        "--no-user-typedefs".to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Config::from_args(Args::try_parse_from(argv).expect("parse args")).expect("create config")
}

#[test]
fn test_config_file_values_apply() {
    let dir = setup_workspace();
    let config = config_for(&dir, &["--value", "[1]"]);

    assert_eq!(config.verify_options.numeric_bounds, NumericBounds::Strict);
    assert_eq!(config.verify_options.pattern_list, PatternListPolicy::AllMatch);
    assert_eq!(config.log_level, "debug");
    assert!(!config.builtin_typedefs);
    assert_eq!(config.typedef_dirs, vec![dir.path().join("typedefs")]);
    assert_eq!(config.user_typedef_dir, None);
}

#[test]
fn test_cli_flags_override_config_file() {
    let dir = setup_workspace();
    let config = config_for(
        &dir,
        &[
            "--value",
            "[1]",
            "--numeric-bounds",
            "permissive",
            "--pattern-list",
            "any",
            "--log-level",
            "warn",
        ],
    );

    assert_eq!(config.verify_options.numeric_bounds, NumericBounds::Permissive);
    assert_eq!(config.verify_options.pattern_list, PatternListPolicy::AnyMatch);
    assert_eq!(config.log_level, "warn");
}

#[test]
fn test_end_to_end_document_verification() {
    let dir = setup_workspace();
    let document = dir.path().join("value.json");
    let config = config_for(&dir, &["--document", document.to_str().expect("utf-8 path")]);
    assert_eq!(config.input, Input::Document(document.clone()));

    let registry = config.load_typedefs().expect("load typedefs");
    assert_eq!(
        registry.priority_of("acme:vlan"),
        Some(TypedefPriority::Workspace)
    );
    assert!(registry.get("inet:port-number").is_none());

    let node = SchemaNode::from_json(&config.read_schema().expect("read schema"));
    let value = config.read_value().expect("read value");
    assert_eq!(value, json!([10, 20, 4094]));

    let verifier = Verifier::with_options(&registry, config.verify_options);
    assert!(verifier.verify_node(&value, &node).is_ok());
    assert!(verifier.verify_node(&json!([10, 4095]), &node).is_err());
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = TempDir::new().expect("create temp dir");
    let absent = dir.path().join("absent.toml");
    let argv = [
        "yang-verify",
        "--schema",
        "node.json",
        "--value",
        "1",
        "--config",
        absent.to_str().expect("utf-8 path"),
        "--no-user-typedefs",
    ];
    let args = Args::try_parse_from(argv).expect("parse args");
    let err = Config::from_args(args).expect_err("config file is missing");
    assert!(format!("{:#}", err).contains("absent.toml"));
}

#[test]
fn test_explicit_typedef_file_wins() {
    let dir = setup_workspace();
    let explicit = dir.path().join("explicit.toml");
    fs::write(&explicit, "\"acme:vlan\" = \"string\"\n").expect("write explicit typedef");

    let config = config_for(
        &dir,
        &["--value", "1", "--typedef-file", explicit.to_str().expect("utf-8 path")],
    );
    let registry = config.load_typedefs().expect("load typedefs");
    assert_eq!(
        registry.priority_of("acme:vlan"),
        Some(TypedefPriority::Explicit)
    );
}
