//! Schema validation.

use crate::compile::MIXIN_SUFFIX;
use crate::schema::{SchemaNode, SchemaObject};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that make a schema uncompilable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty field name in `{location}`")]
    EmptyFieldName { location: String },

    #[error("modifier `{location}` has an empty parameter name")]
    EmptyParameter { location: String },

    #[error("declaration `{name}` in `{location}` is generated by both `{first}` and `{second}`")]
    DuplicateDeclaration {
        location: String,
        name: String,
        first: String,
        second: String,
    },
}

/// Validate a schema before compilation.
///
/// Target paths are checked when a [`Modifier`](crate::Modifier) is built,
/// so this only covers what spans more than one field:
/// - field names must be non-empty
/// - modifier parameter names must be non-empty
/// - no two fields of one object may generate the same declaration name
///   (e.g. a mergeable `foo` next to a field called `fooMixin`)
///
/// Locations are reported as dotted field paths starting at `root`.
pub fn validate(root: &SchemaObject) -> Result<(), ValidationError> {
    validate_object(root, "root")
}

fn validate_object(object: &SchemaObject, location: &str) -> Result<(), ValidationError> {
    // Sorted so the first reported error does not depend on map order.
    let mut names: Vec<&String> = object.fields.keys().collect();
    names.sort();

    let mut declared: BTreeMap<String, &str> = BTreeMap::new();

    for name in names {
        if name.is_empty() {
            return Err(ValidationError::EmptyFieldName {
                location: location.to_string(),
            });
        }
        let field_location = format!("{location}.{name}");

        for decl in declaration_names(name, &object.fields[name]) {
            if let Some(first) = declared.insert(decl.clone(), name) {
                return Err(ValidationError::DuplicateDeclaration {
                    location: location.to_string(),
                    name: decl,
                    first: first.to_string(),
                    second: name.to_string(),
                });
            }
        }

        match &object.fields[name] {
            SchemaNode::Modifier(modifier) => {
                if modifier.parameter.is_empty() {
                    return Err(ValidationError::EmptyParameter {
                        location: field_location,
                    });
                }
            }
            SchemaNode::Object(child) => validate_object(child, &field_location)?,
        }
    }

    Ok(())
}

/// Names of the declarations a field compiles to.
fn declaration_names(name: &str, node: &SchemaNode) -> Vec<String> {
    match node {
        SchemaNode::Modifier(modifier) if modifier.kind.is_mergeable() => {
            vec![name.to_string(), format!("{name}{MIXIN_SUFFIX}")]
        }
        _ => vec![name.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Modifier, ValueKind};

    fn scalar(target: &str) -> Modifier {
        Modifier::new("value", ValueKind::String, target).unwrap()
    }

    #[test]
    fn test_validate_accepts_nested_schema() {
        let schema = SchemaObject::new()
            .with_field("withName", scalar("metadata.name"))
            .with_field(
                "spec",
                SchemaObject::new()
                    .with_help("Spec.")
                    .with_field("withReplicas", scalar("spec.replicas")),
            );
        assert!(validate(&schema).is_ok());
    }

    #[test]
    fn test_validate_empty_field_name() {
        let schema = SchemaObject::new().with_field(
            "metadata",
            SchemaObject::new().with_field("", scalar("metadata.name")),
        );
        assert_eq!(
            validate(&schema),
            Err(ValidationError::EmptyFieldName {
                location: "root.metadata".to_string()
            })
        );
    }

    #[test]
    fn test_validate_empty_parameter() {
        let modifier = Modifier::new("", ValueKind::Integer, "spec.replicas").unwrap();
        let schema = SchemaObject::new().with_field("withReplicas", modifier);
        assert_eq!(
            validate(&schema),
            Err(ValidationError::EmptyParameter {
                location: "root.withReplicas".to_string()
            })
        );
    }

    #[test]
    fn test_validate_mixin_collision() {
        let labels = Modifier::new("labels", ValueKind::Object, "metadata.labels").unwrap();
        let schema = SchemaObject::new()
            .with_field("withLabels", labels)
            .with_field("withLabelsMixin", scalar("metadata.other"));

        assert_eq!(
            validate(&schema),
            Err(ValidationError::DuplicateDeclaration {
                location: "root".to_string(),
                name: "withLabelsMixin".to_string(),
                first: "withLabels".to_string(),
                second: "withLabelsMixin".to_string(),
            })
        );
    }

    #[test]
    fn test_scalar_mixin_name_is_free() {
        // Scalars generate no mixin, so the name does not collide.
        let schema = SchemaObject::new()
            .with_field("withName", scalar("metadata.name"))
            .with_field("withNameMixin", scalar("metadata.other"));
        assert!(validate(&schema).is_ok());
    }
}
