//! Thin path queries over a parsed XML tree
//!
//! Paths are `/`-separated element names relative to a node, matched on local
//! names (`"body/body.head/hedline/hl1"`). A missing node is always `None`.

use roxmltree::Node;

/// Element children of `node` named `name`, in document order
pub fn children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

/// First element, in document order, reached by following `path` from `node`
pub fn find<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let steps: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    find_steps(node, &steps)
}

fn find_steps<'a, 'input>(node: Node<'a, 'input>, steps: &[&str]) -> Option<Node<'a, 'input>> {
    match steps.split_first() {
        None => Some(node),
        Some((step, rest)) => node
            .children()
            .filter(|child| child.is_element() && child.tag_name().name() == *step)
            .find_map(|child| find_steps(child, rest)),
    }
}

/// Every element matching `path`, in document order
///
/// Each step fans out over all matches of the previous one, so
/// `head/tobject/tobject.subject` collects subjects under every `tobject`.
pub fn find_all<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Vec<Node<'a, 'input>> {
    let mut current = vec![node];
    for step in path.split('/').filter(|s| !s.is_empty()) {
        current = current
            .into_iter()
            .flat_map(|n| n.children())
            .filter(|child| child.is_element() && child.tag_name().name() == step)
            .collect();
    }
    current
}

/// Text before the first child element, or `None` if there is none
pub fn text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text()
}

/// Text of the element at `path`, or `""` when the element or its text is
/// missing
pub fn text_at(node: Node<'_, '_>, path: &str) -> String {
    find(node, path)
        .and_then(text)
        .unwrap_or_default()
        .to_string()
}

/// Attribute of `node` as an owned string
pub fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}
