//! Integration tests for loading typedef files from disk
use std::fs;

use serde_json::json;
use tempfile::TempDir;
use yang_verify::typedef::{TypedefPriority, TypedefRegistry};
use yang_verify::{SchemaNode, TypeDefinition, Verifier, VerifyError};

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write typedef file");
    path
}

#[test]
fn test_load_directory_mixed_formats() {
    let dir = TempDir::new().expect("create temp dir");
    write(
        &dir,
        "net.json",
        r#"{"vlan-id": {"type": "uint16", "from": "1", "to": "4094"}}"#,
    );
    write(
        &dir,
        "names.toml",
        r#"
        [if-name]
        type = "string"
        pattern = '^[a-z]+[0-9]+$'
        "#,
    );
    write(&dir, "README.md", "not a typedef file");

    let mut registry = TypedefRegistry::new();
    let stored = registry
        .load_directory(dir.path(), TypedefPriority::Workspace)
        .expect("load directory");

    assert_eq!(stored, 2);
    assert_eq!(registry.names(), vec!["if-name", "vlan-id"]);
    assert_eq!(
        registry.source_of("vlan-id"),
        Some(dir.path().join("net.json").as_path())
    );
}

#[test]
fn test_invalid_file_is_skipped() {
    let dir = TempDir::new().expect("create temp dir");
    write(&dir, "a-good.json", r#"{"percent": {"type": "uint8", "from": "0", "to": "100"}}"#);
    write(&dir, "b-bad.json", r#"{"broken": "#);
    write(&dir, "c-bad.toml", "[missing-type]\nfrom = 1\n");

    let mut registry = TypedefRegistry::new();
    let stored = registry
        .load_directory(dir.path(), TypedefPriority::Workspace)
        .expect("load directory");

    assert_eq!(stored, 1);
    assert!(registry.get("percent").is_some());
    assert!(registry.get("missing-type").is_none());
}

#[test]
fn test_missing_directory_is_empty() {
    let dir = TempDir::new().expect("create temp dir");
    let mut registry = TypedefRegistry::new();
    let stored = registry
        .load_directory(&dir.path().join("nope"), TypedefPriority::UserGlobal)
        .expect("missing directory is fine");
    assert_eq!(stored, 0);
    assert!(registry.is_empty());
}

#[test]
fn test_load_file_errors_carry_path() {
    let dir = TempDir::new().expect("create temp dir");
    let bad = write(&dir, "bad.json", "[1, 2]");
    let unsupported = write(&dir, "types.yang", "typedef x { type string; }");

    let mut registry = TypedefRegistry::new();
    let err = registry
        .load_file(&bad, TypedefPriority::Explicit)
        .expect_err("array is not a typedef map");
    assert!(format!("{:#}", err).contains("bad.json"));

    let err = registry
        .load_file(&unsupported, TypedefPriority::Explicit)
        .expect_err("unsupported extension");
    assert!(format!("{:#}", err).contains("types.yang"));
}

#[test]
fn test_workspace_overrides_builtin() {
    let dir = TempDir::new().expect("create temp dir");
    write(
        &dir,
        "override.toml",
        r#"
        ["inet:port-number"]
        type = "uint16"
        from = "1024"
        to = "65535"
        "#,
    );

    let mut registry = TypedefRegistry::with_builtin_typedefs();
    let node = SchemaNode::leaf(TypeDefinition::from_name("inet:port-number"));
    assert!(Verifier::new(&registry).verify_leaf(&json!(80), &node).is_ok());

    registry
        .load_directory(dir.path(), TypedefPriority::Workspace)
        .expect("load directory");
    assert_eq!(
        registry.priority_of("inet:port-number"),
        Some(TypedefPriority::Workspace)
    );
    assert!(matches!(
        Verifier::new(&registry).verify_leaf(&json!(80), &node),
        Err(VerifyError::InvalidType(_))
    ));
    assert!(Verifier::new(&registry).verify_leaf(&json!(8080), &node).is_ok());
}

#[test]
fn test_builtin_never_overrides_workspace() {
    let mut registry = TypedefRegistry::new();
    registry.insert_with_priority(
        "yang:counter32",
        TypeDefinition::from_name("string"),
        TypedefPriority::Workspace,
        None,
    );

    let builtin = r#"
        ["yang:counter32"]
        type = "uint32"
    "#;
    let stored = registry
        .load_str(
            builtin,
            yang_verify::typedef::TypedefFormat::Toml,
            TypedefPriority::BuiltIn,
            None,
        )
        .expect("load builtin content");

    assert_eq!(stored, 0);
    assert_eq!(
        registry.get("yang:counter32"),
        Some(&TypeDefinition::from_name("string"))
    );
}

#[test]
fn test_builtin_typedefs_verify() {
    let registry = TypedefRegistry::with_builtin_typedefs();
    let verifier = Verifier::new(&registry);

    let address = SchemaNode::leaf(TypeDefinition::from_name("inet:ipv4-address-no-zone"));
    assert!(verifier.verify_leaf(&json!("192.0.2.1"), &address).is_ok());
    assert!(verifier.verify_leaf(&json!("192.0.2.256"), &address).is_err());

    let mac = SchemaNode::leaf(TypeDefinition::from_name("yang:mac-address"));
    assert!(verifier.verify_leaf(&json!("00:1b:21:3a:4f:9c"), &mac).is_ok());
    assert!(verifier.verify_leaf(&json!("00:1b:21"), &mac).is_err());

    let dscp = SchemaNode::leaf(TypeDefinition::from_name("inet:dscp"));
    assert!(verifier.verify_leaf(&json!(46), &dscp).is_ok());
    assert!(verifier.verify_leaf(&json!(64), &dscp).is_err());

    // zero-based-counter32 -> counter32 -> uint32
    let counter = SchemaNode::leaf(TypeDefinition::from_name("yang:zero-based-counter32"));
    assert!(verifier.verify_leaf(&json!(0), &counter).is_ok());
    assert!(verifier.verify_leaf(&json!(-1), &counter).is_err());

    let timestamp = SchemaNode::leaf(TypeDefinition::from_name("yang:date-and-time"));
    assert!(verifier
        .verify_leaf(&json!("2024-02-29T12:30:00.5+01:00"), &timestamp)
        .is_ok());
    assert!(verifier.verify_leaf(&json!("yesterday"), &timestamp).is_err());
}
