//! Depth-first tree navigation
//!
//! Filtering decides inclusion only. Every node's children are visited whether
//! or not the node itself matched, so a component nested under a frame under a
//! page is still found by a component search rooted at the page.

use crate::document::{Node, Role};

/// Capabilities the traversal needs from a tree node.
pub trait TreeNode: Sized {
    fn role(&self) -> Role;
    fn children(&self) -> &[Self];
}

impl TreeNode for Node {
    fn role(&self) -> Role {
        Node::role(self)
    }

    fn children(&self) -> &[Node] {
        Node::children(self)
    }
}

/// Pre-order traversal of the forest rooted at `roots`, keeping nodes whose
/// role equals `role` (or every node when `role` is `None`).
pub fn extract<'a, N, I>(roots: I, role: Option<Role>) -> Vec<&'a N>
where
    N: TreeNode + 'a,
    I: IntoIterator<Item = &'a N>,
{
    let mut result = Vec::new();
    for root in roots {
        collect(root, role, &mut result);
    }
    result
}

fn collect<'a, N: TreeNode>(node: &'a N, role: Option<Role>, out: &mut Vec<&'a N>) {
    if role.is_none_or(|r| node.role() == r) {
        out.push(node);
    }
    for child in node.children() {
        collect(child, role, out);
    }
}

/// First node in traversal order with the given role and name.
pub fn find_named<'a, I>(roots: I, role: Role, name: &str) -> Option<&'a Node>
where
    I: IntoIterator<Item = &'a Node>,
{
    extract(roots, Some(role))
        .into_iter()
        .find(|node| node.name() == name)
}

/// All pages under `root`, or only those named `name`.
pub fn pages<'a>(root: &'a Node, name: Option<&str>) -> Vec<&'a Node> {
    extract([root], Some(Role::Page))
        .into_iter()
        .filter(|page| name.is_none_or(|n| page.name() == n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::other(
            "DOCUMENT",
            "0:0",
            "Document",
            vec![
                Node::page(
                    "0:1",
                    "Icons",
                    vec![
                        Node::component("1", "star"),
                        Node::other(
                            "FRAME",
                            "f",
                            "group",
                            vec![Node::component("3", "nested")],
                        ),
                        Node::component("2", "heart"),
                    ],
                ),
                Node::page("0:2", "Colors", vec![Node::component("4", "red")]),
            ],
        )
    }

    fn ids(nodes: &[&Node]) -> Vec<String> {
        nodes.iter().map(|n| n.id().to_string()).collect()
    }

    #[test]
    fn test_extract_pages_in_source_order() {
        let root = sample();
        let found = extract([&root], Some(Role::Page));
        assert_eq!(ids(&found), vec!["0:1", "0:2"]);
    }

    #[test]
    fn test_extract_descends_through_non_matching_nodes() {
        let root = sample();
        let found = extract([&root], Some(Role::Component));
        assert_eq!(ids(&found), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn test_extract_without_filter_is_preorder() {
        let root = sample();
        let found = extract([&root], None);
        assert_eq!(
            ids(&found),
            vec!["0:0", "0:1", "1", "f", "3", "2", "0:2", "4"]
        );
    }

    #[test]
    fn test_extract_over_forest() {
        let root = sample();
        let pages = extract([&root], Some(Role::Page));
        let components = extract(pages.iter().copied().rev(), Some(Role::Component));
        assert_eq!(ids(&components), vec!["4", "1", "3", "2"]);
    }

    #[test]
    fn test_extract_empty_roots() {
        let found = extract(std::iter::empty::<&Node>(), None);
        assert!(found.is_empty());
    }

    #[test]
    fn test_find_named() {
        let root = sample();
        let page = find_named([&root], Role::Page, "Colors").unwrap();
        assert_eq!(page.id(), "0:2");
        assert!(find_named([&root], Role::Page, "star").is_none());
        assert_eq!(find_named([&root], Role::Component, "heart").unwrap().id(), "2");
    }

    #[test]
    fn test_pages_filter() {
        let root = sample();
        assert_eq!(pages(&root, None).len(), 2);
        assert_eq!(ids(&pages(&root, Some("Icons"))), vec!["0:1"]);
        assert!(pages(&root, Some("Missing")).is_empty());
    }
}
