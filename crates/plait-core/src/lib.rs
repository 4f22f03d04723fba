//! Compiler from settable-field schemas to expression trees.
//!
//! A schema names fields; each leaf field is a modifier that targets a dotted
//! path such as `spec.template.spec`. Compiling a modifier produces a setter
//! function, whose body is a nested object literal placing the parameter at
//! that path, and for object or array values a mixin function that
//! deep-merges instead of replacing.
//!
//! ```
//! use rhizome_plait_core::{compile_schema, Modifier, SchemaObject, ValueKind};
//!
//! let schema = SchemaObject::new().with_field(
//!     "withReplicas",
//!     Modifier::new("replicas", ValueKind::Integer, "spec.replicas").unwrap(),
//! );
//! let tree = compile_schema("deployment", &schema).unwrap();
//! assert_eq!(tree.name(), "deployment");
//! ```

mod compile;
mod expand;
mod path;
mod schema;
mod validation;

pub use compile::{compile, compile_object, compile_schema, generate, sort_fields, MIXIN_SUFFIX};
pub use expand::expand;
pub use path::{PathError, TargetPath};
pub use rhizome_plait_tree::Node;
pub use schema::{LoadError, Modifier, SchemaNode, SchemaObject, ValueKind};
pub use validation::{validate, ValidationError};
