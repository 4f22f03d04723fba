//! Schema compilation.
//!
//! Each modifier becomes a setter function (and, for object and array
//! values, a mixin function); each schema object becomes an object literal
//! holding its fields' declarations in name order.

use crate::expand::expand;
use crate::schema::{Modifier, SchemaNode, SchemaObject};
use crate::validation::{validate, ValidationError};
use rhizome_plait_tree::Node;
use tracing::debug;

/// Appended to a field name to form its mixin function's name.
pub const MIXIN_SUFFIX: &str = "Mixin";

/// Validate `root` and compile it into a single declaration named `name`.
pub fn compile_schema(name: &str, root: &SchemaObject) -> Result<Node, ValidationError> {
    validate(root)?;
    Ok(compile_object(name, root))
}

/// Compile one field into its declarations.
///
/// A modifier yields one or two functions; an object yields exactly one
/// object declaration.
pub fn compile(name: &str, node: &SchemaNode) -> Vec<Node> {
    match node {
        SchemaNode::Modifier(modifier) => generate(name, modifier),
        SchemaNode::Object(object) => vec![compile_object(name, object)],
    }
}

/// Compile a schema object into an object declaration.
///
/// A lone child that is not a function collapses into a concise object.
/// Non-empty help text is attached as a comment.
pub fn compile_object(name: &str, object: &SchemaObject) -> Node {
    let mut children: Vec<Node> = object
        .fields
        .iter()
        .flat_map(|(field, node)| compile(field, node))
        .collect();
    sort_fields(&mut children);

    debug!(object = name, declarations = children.len(), "compiled schema object");

    let declaration = match <[Node; 1]>::try_from(children) {
        Ok([only]) if !only.is_func() => Node::concise_object(name, only),
        Ok([only]) => Node::object(name, vec![only]),
        Err(children) => Node::object(name, children),
    };

    match object.help.as_deref() {
        Some(help) if !help.is_empty() => Node::comment(declaration, help),
        _ => declaration,
    }
}

/// Generate the setter, and for mergeable kinds the mixin, for a modifier.
pub fn generate(name: &str, modifier: &Modifier) -> Vec<Node> {
    let mut out = Vec::with_capacity(2);

    out.push(function(name, modifier, false));

    if modifier.kind.is_mergeable() {
        out.push(function(&format!("{name}{MIXIN_SUFFIX}"), modifier, true));
    }

    out
}

fn function(name: &str, modifier: &Modifier, merge: bool) -> Node {
    let params = Node::args(vec![Node::required(Node::string(
        modifier.parameter.as_str(),
        "",
    ))]);
    Node::func(name, params, Node::concise_object("", expand(modifier, merge)))
}

/// Sort declarations by name, comparing bytes.
pub fn sort_fields(declarations: &mut [Node]) {
    declarations.sort_by(|a, b| a.name().as_bytes().cmp(b.name().as_bytes()));
}
