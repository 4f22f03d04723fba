//! Schema model for settable fields.
//!
//! A schema is a tree of named fields. Leaves are [`Modifier`]s describing one
//! settable property; inner nodes are [`SchemaObject`]s grouping fields under
//! a name, optionally with documentation.
//!
//! Schemas are plain data and can be loaded from JSON or TOML:
//!
//! ```json
//! {
//!   "help": "Deployment spec.",
//!   "fields": {
//!     "withReplicas": { "parameter": "replicas", "type": "integer", "target": "spec.replicas" },
//!     "metadata": {
//!       "fields": {
//!         "withLabels": { "parameter": "labels", "type": "object", "target": "metadata.labels" }
//!       }
//!     }
//!   }
//! }
//! ```

use crate::path::{PathError, TargetPath};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Value type of a modifier's target, using the swagger primitive names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
}

impl ValueKind {
    /// Whether values of this kind can be deep-merged into an existing value.
    pub fn is_mergeable(self) -> bool {
        matches!(self, ValueKind::Object | ValueKind::Array)
    }
}

/// One settable property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Modifier {
    /// Name of the generated function's parameter
    pub parameter: String,
    /// Value type at the target path
    #[serde(rename = "type")]
    pub kind: ValueKind,
    /// Where in the built object the parameter lands
    pub target: TargetPath,
}

impl Modifier {
    pub fn new(
        parameter: impl Into<String>,
        kind: ValueKind,
        target: &str,
    ) -> Result<Self, PathError> {
        Ok(Modifier {
            parameter: parameter.into(),
            kind,
            target: TargetPath::parse(target)?,
        })
    }
}

/// Named group of fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaObject {
    /// Documentation text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// Fields by name. Iteration order is unspecified.
    #[serde(default)]
    pub fields: HashMap<String, SchemaNode>,
}

impl SchemaObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the documentation text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Adds a field, replacing any field of the same name.
    pub fn with_field(mut self, name: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.fields.insert(name.into(), node.into());
        self
    }

    /// Parse a schema from JSON text.
    pub fn from_json_str(source: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Parse a schema from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(source)?)
    }

    /// Load a schema file, choosing the format from its extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Format::Json,
            Some("toml") => Format::Toml,
            _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
        };

        let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match format {
            Format::Json => Self::from_json_str(&contents),
            Format::Toml => Self::from_toml_str(&contents),
        }
    }
}

enum Format {
    Json,
    Toml,
}

/// Errors that can occur while loading a schema.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML schema: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported schema format: {} (expected .json or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// A field value: either a settable property or a nested group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawNode")]
pub enum SchemaNode {
    Modifier(Modifier),
    Object(SchemaObject),
}

impl From<Modifier> for SchemaNode {
    fn from(value: Modifier) -> Self {
        SchemaNode::Modifier(value)
    }
}

impl From<SchemaObject> for SchemaNode {
    fn from(value: SchemaObject) -> Self {
        SchemaNode::Object(value)
    }
}

/// Wire form of a field value. A `target` key marks a modifier.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    help: Option<String>,
    fields: Option<HashMap<String, SchemaNode>>,
    parameter: Option<String>,
    #[serde(rename = "type")]
    kind: Option<ValueKind>,
    target: Option<TargetPath>,
}

impl TryFrom<RawNode> for SchemaNode {
    type Error = String;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let Some(target) = raw.target else {
            if raw.parameter.is_some() || raw.kind.is_some() {
                return Err("modifier is missing `target`".to_string());
            }
            return Ok(SchemaNode::Object(SchemaObject {
                help: raw.help,
                fields: raw.fields.unwrap_or_default(),
            }));
        };

        if raw.fields.is_some() || raw.help.is_some() {
            return Err(format!(
                "modifier targeting `{target}` cannot have `fields` or `help`"
            ));
        }
        let parameter = raw
            .parameter
            .ok_or_else(|| format!("modifier targeting `{target}` is missing `parameter`"))?;
        let kind = raw
            .kind
            .ok_or_else(|| format!("modifier targeting `{target}` is missing `type`"))?;

        Ok(SchemaNode::Modifier(Modifier {
            parameter,
            kind,
            target,
        }))
    }
}
