//! Expression tree for generated modifier libraries.
//!
//! The Plait compiler turns a schema of settable fields into a tree of
//! declarations: setter and mixin functions whose bodies are nested object
//! literals, grouped into documented objects. This crate only defines the
//! tree; rendering it to source text is left to the consumer.
//!
//! # JSON form
//!
//! Every node serializes as an object tagged by `kind`:
//!
//! ```json
//! {"kind": "merge", "inner":
//!   {"kind": "concise_object", "name": "spec", "child":
//!     {"kind": "ref", "key": "replicas", "target": "replicas"}}}
//! ```

mod node;

pub use node::Node;
