//! Expression tree node types.

use serde::{Deserialize, Serialize};

/// A node of the generated expression tree.
///
/// The tree describes declarations (functions and nested objects) whose
/// bodies are object literals. It carries no source text; an external
/// renderer decides how each variant is printed.
///
/// ```
/// use rhizome_plait_tree::Node;
///
/// // withImage(image): { image: image }
/// let setter = Node::func(
///     "withImage",
///     Node::args(vec![Node::required(Node::string("image", ""))]),
///     Node::concise_object("", Node::reference("image", "image")),
/// );
/// assert_eq!(setter.name(), "withImage");
/// assert!(setter.is_func());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Multi-key object literal bound to `name`.
    Object { name: String, children: Vec<Node> },
    /// Single-key object literal bound to `name`, rendered in shorthand form.
    ConciseObject { name: String, child: Box<Node> },
    /// Function declaration.
    Func {
        name: String,
        params: Box<Node>,
        body: Box<Node>,
    },
    /// Key whose value is the parameter `target`.
    Ref { key: String, target: String },
    /// Deep-merge the wrapped node into the existing value instead of replacing it.
    Merge { inner: Box<Node> },
    /// Parameter list of a function.
    Args { params: Vec<Node> },
    /// Marks a parameter as required.
    Required { param: Box<Node> },
    /// String-typed parameter with a default value.
    String { name: String, default: String },
    /// Documentation attached to a node.
    Comment { node: Box<Node>, text: String },
}

impl Node {
    /// Creates a multi-key object literal.
    pub fn object(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Object {
            name: name.into(),
            children,
        }
    }

    /// Creates a single-key object literal.
    pub fn concise_object(name: impl Into<String>, child: Node) -> Self {
        Node::ConciseObject {
            name: name.into(),
            child: Box::new(child),
        }
    }

    /// Creates a function declaration. `params` is expected to be [`Node::Args`].
    pub fn func(name: impl Into<String>, params: Node, body: Node) -> Self {
        Node::Func {
            name: name.into(),
            params: Box::new(params),
            body: Box::new(body),
        }
    }

    /// Creates a reference binding `key` to the parameter `target`.
    pub fn reference(key: impl Into<String>, target: impl Into<String>) -> Self {
        Node::Ref {
            key: key.into(),
            target: target.into(),
        }
    }

    /// Wraps `inner` in a merge marker.
    pub fn merge(inner: Node) -> Self {
        Node::Merge {
            inner: Box::new(inner),
        }
    }

    /// Creates a parameter list.
    pub fn args(params: Vec<Node>) -> Self {
        Node::Args { params }
    }

    /// Marks `param` as required.
    pub fn required(param: Node) -> Self {
        Node::Required {
            param: Box::new(param),
        }
    }

    /// Creates a string parameter.
    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        Node::String {
            name: name.into(),
            default: default.into(),
        }
    }

    /// Attaches documentation text to `node`.
    pub fn comment(node: Node, text: impl Into<String>) -> Self {
        Node::Comment {
            node: Box::new(node),
            text: text.into(),
        }
    }

    /// Returns the key this node is declared under.
    ///
    /// Wrappers (`Merge`, `Required`, `Comment`) report the name of the node
    /// they wrap. `Args` has no name.
    pub fn name(&self) -> &str {
        match self {
            Node::Object { name, .. }
            | Node::ConciseObject { name, .. }
            | Node::Func { name, .. }
            | Node::String { name, .. } => name.as_str(),
            Node::Ref { key, .. } => key.as_str(),
            Node::Merge { inner } => inner.name(),
            Node::Required { param } => param.name(),
            Node::Comment { node, .. } => node.name(),
            Node::Args { .. } => "",
        }
    }

    /// Returns true if this is a bare function declaration.
    pub fn is_func(&self) -> bool {
        matches!(self, Node::Func { .. })
    }

    /// Returns true if this is a merge marker.
    pub fn is_merge(&self) -> bool {
        matches!(self, Node::Merge { .. })
    }

    /// Returns true if this is a concise object literal.
    pub fn is_concise(&self) -> bool {
        matches!(self, Node::ConciseObject { .. })
    }

    /// Returns the documentation text if this is a `Comment`.
    pub fn comment_text(&self) -> Option<&str> {
        match self {
            Node::Comment { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Strips a `Comment` wrapper, if any.
    pub fn uncommented(&self) -> &Node {
        match self {
            Node::Comment { node, .. } => &**node,
            other => other,
        }
    }

    /// Returns the node wrapped by a `Merge` marker.
    pub fn merged(&self) -> Option<&Node> {
        match self {
            Node::Merge { inner } => Some(&**inner),
            _ => None,
        }
    }

    /// Returns the direct children of an object literal.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Object { children, .. } => Some(children.as_slice()),
            Node::ConciseObject { child, .. } => Some(std::slice::from_ref(&**child)),
            _ => None,
        }
    }

    /// Returns the body of a function declaration.
    pub fn body(&self) -> Option<&Node> {
        match self {
            Node::Func { body, .. } => Some(&**body),
            _ => None,
        }
    }

    /// Returns the parameter list of a function declaration.
    pub fn params(&self) -> Option<&[Node]> {
        match self {
            Node::Func { params, .. } => match &**params {
                Node::Args { params } => Some(params.as_slice()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + match self {
            Node::Object { children, .. } => children.iter().map(Node::size).sum(),
            Node::Args { params } => params.iter().map(Node::size).sum(),
            Node::ConciseObject { child, .. } => child.size(),
            Node::Func { params, body, .. } => params.size() + body.size(),
            Node::Merge { inner } => inner.size(),
            Node::Required { param } => param.size(),
            Node::Comment { node, .. } => node.size(),
            Node::Ref { .. } | Node::String { .. } => 0,
        }
    }
}
