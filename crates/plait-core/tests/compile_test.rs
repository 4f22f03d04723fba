//! End-to-end: schema file to expression tree.

use std::io::Write;

use rhizome_plait_core::{compile_schema, LoadError, Node, SchemaObject, ValidationError};

const DEPLOYMENT_JSON: &str = r#"{
  "help": "Deployment enables declarative updates for Pods.",
  "fields": {
    "withReplicas": {"parameter": "replicas", "type": "integer", "target": "spec.replicas"},
    "withPodSpec": {"parameter": "spec", "type": "object", "target": "spec.template.spec"},
    "metadata": {
      "help": "Standard object metadata.",
      "fields": {
        "withName": {"parameter": "name", "type": "string", "target": "metadata.name"},
        "withLabels": {"parameter": "labels", "type": "object", "target": "metadata.labels"}
      }
    }
  }
}"#;

fn write_schema(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write schema");
    file
}

fn find<'a>(nodes: &'a [Node], name: &str) -> &'a Node {
    nodes
        .iter()
        .find(|n| n.name() == name)
        .unwrap_or_else(|| panic!("no declaration named {}", name))
}

#[test]
fn test_compile_deployment_from_json_file() {
    let file = write_schema(".json", DEPLOYMENT_JSON);
    let schema = SchemaObject::from_file(file.path()).unwrap();
    let tree = compile_schema("deployment", &schema).unwrap();

    assert_eq!(
        tree.comment_text(),
        Some("Deployment enables declarative updates for Pods.")
    );
    let root = tree.uncommented();
    let children = root.children().unwrap();
    let names: Vec<&str> = children.iter().map(Node::name).collect();
    assert_eq!(names, ["metadata", "withPodSpec", "withPodSpecMixin", "withReplicas"]);

    // withPodSpec(spec): merge({ spec: merge({ template: { spec: spec } }) })
    let setter = find(children, "withPodSpec");
    let expected = Node::merge(Node::concise_object(
        "spec",
        Node::merge(Node::concise_object("template", Node::reference("spec", "spec"))),
    ));
    assert_eq!(setter.body(), Some(&Node::concise_object("", expected)));

    let metadata = find(children, "metadata");
    assert_eq!(metadata.comment_text(), Some("Standard object metadata."));
    let meta_names: Vec<&str> = metadata
        .uncommented()
        .children()
        .unwrap()
        .iter()
        .map(Node::name)
        .collect();
    assert_eq!(meta_names, ["withLabels", "withLabelsMixin", "withName"]);
}

#[test]
fn test_json_and_toml_compile_identically() {
    let toml_source = r#"
help = "Deployment enables declarative updates for Pods."

[fields.withReplicas]
parameter = "replicas"
type = "integer"
target = "spec.replicas"

[fields.withPodSpec]
parameter = "spec"
type = "object"
target = "spec.template.spec"

[fields.metadata]
help = "Standard object metadata."

[fields.metadata.fields.withName]
parameter = "name"
type = "string"
target = "metadata.name"

[fields.metadata.fields.withLabels]
parameter = "labels"
type = "object"
target = "metadata.labels"
"#;
    let json_file = write_schema(".json", DEPLOYMENT_JSON);
    let toml_file = write_schema(".toml", toml_source);

    let from_json = SchemaObject::from_file(json_file.path()).unwrap();
    let from_toml = SchemaObject::from_file(toml_file.path()).unwrap();
    assert_eq!(from_json, from_toml);

    assert_eq!(
        compile_schema("deployment", &from_json).unwrap(),
        compile_schema("deployment", &from_toml).unwrap()
    );
}

#[test]
fn test_unsupported_extension() {
    let file = write_schema(".yaml", "fields: {}");
    assert!(matches!(
        SchemaObject::from_file(file.path()),
        Err(LoadError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = SchemaObject::from_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_malformed_path_fails_before_compile() {
    let file = write_schema(
        ".json",
        r#"{"fields": {"withName": {"parameter": "name", "type": "string", "target": "metadata."}}}"#,
    );
    let err = SchemaObject::from_file(file.path()).unwrap_err();
    assert!(matches!(err, LoadError::Json(_)));
}

#[test]
fn test_validation_error_reports_location() {
    let schema = SchemaObject::from_json_str(
        r#"{"fields": {"spec": {"fields": {"withX": {"parameter": "", "type": "string", "target": "spec.x"}}}}}"#,
    )
    .unwrap();
    assert_eq!(
        compile_schema("root", &schema),
        Err(ValidationError::EmptyParameter {
            location: "root.spec.withX".to_string()
        })
    );
}
