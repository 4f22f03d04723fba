//! Target path expansion.

use crate::schema::Modifier;
use rhizome_plait_tree::Node;
use tracing::trace;

/// Expand a modifier's target path into nested single-key object literals.
///
/// The tree is built from the last segment outward. The last segment becomes
/// a reference to the parameter. The segment before it wraps that reference
/// in a concise object, merged only when `merge` is set. Every segment further
/// out wraps in a concise object whose value is always merged, so setting a
/// deep field never clobbers its siblings. Finally, the whole literal is
/// merged whenever the path has more than one segment or `merge` is set.
///
/// For `spec.template.spec` with `merge = false` this gives
/// `merge({ spec: merge({ template: { spec: <param> } }) })`.
pub fn expand(modifier: &Modifier, merge: bool) -> Node {
    let (parents, leaf) = modifier.target.split_leaf();
    let leaf = Node::reference(leaf, modifier.parameter.as_str());

    let tree = parents
        .into_iter()
        .flat_map(|parents| parents.split('.'))
        .rev()
        .enumerate()
        .fold(leaf, |inner, (level, segment)| {
            let inner = if level > 0 || merge {
                Node::merge(inner)
            } else {
                inner
            };
            Node::concise_object(segment, inner)
        });

    trace!(target_path = %modifier.target, merge, "expanded target path");

    if parents.is_some() || merge {
        Node::merge(tree)
    } else {
        tree
    }
}
