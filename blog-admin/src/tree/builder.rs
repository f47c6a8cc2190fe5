//! Flat list to forest conversion for slug-linked records (menus, organizations).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A record that can be placed in a hierarchy by slug reference.
pub trait TreeRecord {
    /// Internal surrogate id. Keys expand/collapse state and sort updates.
    fn key(&self) -> &str;
    /// Human-assignable slug other records point at.
    fn slug(&self) -> &str;
    /// Slug of the parent, `None` (or empty) for roots.
    fn parent_slug(&self) -> Option<&str>;
}

/// A record plus its ordered children.
///
/// Serialized as the record's own fields with an extra `children` array, which
/// is also the shape the backend uses for nested menu trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct TreeNode<T> {
    #[serde(flatten)]
    pub item: T,
    #[serde(default)]
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn leaf(item: T) -> Self {
        Self {
            item,
            children: Vec::new(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Build a forest from a flat list.
///
/// Children keep the relative order they had in `items`. A parent slug that
/// names no record makes the node a root. Nodes caught in a parent cycle are
/// never dropped: the first unplaced one (in input order) is promoted to a root
/// and the walk continues from there.
pub fn build_tree<T: TreeRecord>(items: Vec<T>) -> Vec<TreeNode<T>> {
    let mut by_slug: HashMap<&str, usize> = HashMap::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        by_slug.insert(item.slug(), index);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let parent = item
            .parent_slug()
            .filter(|slug| !slug.is_empty())
            .and_then(|slug| by_slug.get(slug).copied())
            .filter(|&parent| parent != index);

        match parent {
            Some(parent) => children[parent].push(index),
            None => roots.push(index),
        }
    }
    drop(by_slug);

    let mut placed = vec![false; items.len()];
    let mut order: Vec<usize> = Vec::with_capacity(roots.len());
    for &root in &roots {
        mark_subtree(root, &children, &mut placed);
        order.push(root);
    }
    for index in 0..items.len() {
        if !placed[index] {
            tracing::warn!(
                key = items[index].key(),
                slug = items[index].slug(),
                "Parent cycle detected; promoting node to root"
            );
            mark_subtree(index, &children, &mut placed);
            order.push(index);
        }
    }

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut emitted = vec![false; slots.len()];
    order
        .into_iter()
        .filter_map(|root| assemble(root, &children, &mut slots, &mut emitted))
        .collect()
}

fn mark_subtree(start: usize, children: &[Vec<usize>], placed: &mut [bool]) {
    let mut stack = vec![start];
    while let Some(index) = stack.pop() {
        if placed[index] {
            continue;
        }
        placed[index] = true;
        stack.extend(children[index].iter().copied());
    }
}

fn assemble<T>(
    index: usize,
    children: &[Vec<usize>],
    slots: &mut [Option<T>],
    emitted: &mut [bool],
) -> Option<TreeNode<T>> {
    if emitted[index] {
        return None;
    }
    emitted[index] = true;
    let item = slots[index].take()?;
    let kids = children[index]
        .iter()
        .filter_map(|&child| assemble(child, children, slots, emitted))
        .collect();
    Some(TreeNode {
        item,
        children: kids,
    })
}

/// Every record of the forest in pre-order, ignoring expand state.
pub fn flatten_preorder<T>(forest: &[TreeNode<T>]) -> Vec<&T> {
    let mut out = Vec::new();
    let mut stack: Vec<&TreeNode<T>> = forest.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.push(&node.item);
        stack.extend(node.children.iter().rev());
    }
    out
}

/// Stable-sort every sibling group by `key`, recursively.
pub fn sort_siblings_by_key<T, K, F>(forest: &mut [TreeNode<T>], key: F)
where
    K: Ord,
    F: Fn(&T) -> K + Copy,
{
    forest.sort_by_key(|node| key(&node.item));
    for node in forest.iter_mut() {
        sort_siblings_by_key(&mut node.children, key);
    }
}

/// Find the sibling group that contains `key`: the roots or some node's children.
pub fn sibling_group<'a, T: TreeRecord>(
    forest: &'a [TreeNode<T>],
    key: &str,
) -> Option<&'a [TreeNode<T>]> {
    if forest.iter().any(|node| node.item.key() == key) {
        return Some(forest);
    }
    forest
        .iter()
        .find_map(|node| sibling_group(&node.children, key))
}

/// Keys of `key` and every node below it.
pub fn subtree_keys<T: TreeRecord>(forest: &[TreeNode<T>], key: &str) -> Vec<String> {
    fn find<'a, T: TreeRecord>(nodes: &'a [TreeNode<T>], key: &str) -> Option<&'a TreeNode<T>> {
        nodes.iter().find_map(|node| {
            if node.item.key() == key {
                Some(node)
            } else {
                find(&node.children, key)
            }
        })
    }

    find(forest, key)
        .map(|node| {
            flatten_preorder(std::slice::from_ref(node))
                .into_iter()
                .map(|item| item.key().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Rec {
        pub id: String,
        pub slug: String,
        pub parent: Option<String>,
        pub order: i32,
    }

    impl TreeRecord for Rec {
        fn key(&self) -> &str {
            &self.id
        }
        fn slug(&self) -> &str {
            &self.slug
        }
        fn parent_slug(&self) -> Option<&str> {
            self.parent.as_deref()
        }
    }

    pub(crate) fn rec(id: &str, parent: Option<&str>, order: i32) -> Rec {
        Rec {
            id: format!("id-{}", id),
            slug: id.to_string(),
            parent: parent.map(str::to_string),
            order,
        }
    }

    fn slugs<T: TreeRecord>(nodes: &[TreeNode<T>]) -> Vec<String> {
        nodes.iter().map(|n| n.item.slug().to_string()).collect()
    }

    #[test]
    fn attaches_children_in_input_order() {
        let forest = build_tree(vec![
            rec("c2", Some("root"), 9),
            rec("root", None, 1),
            rec("c1", Some("root"), 1),
            rec("g1", Some("c1"), 1),
        ]);

        assert_eq!(slugs(&forest), vec!["root"]);
        assert_eq!(slugs(&forest[0].children), vec!["c2", "c1"]);
        assert_eq!(slugs(&forest[0].children[1].children), vec!["g1"]);
    }

    #[test]
    fn preorder_flatten_preserves_ids_and_sibling_order() {
        let input = vec![
            rec("a", None, 1),
            rec("b", None, 2),
            rec("a1", Some("a"), 1),
            rec("b1", Some("b"), 1),
            rec("a2", Some("a"), 2),
            rec("a1x", Some("a1"), 1),
        ];
        let mut expected: Vec<String> = input.iter().map(|r| r.id.clone()).collect();
        let forest = build_tree(input);

        let flat: Vec<String> = flatten_preorder(&forest)
            .into_iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(flat, vec!["id-a", "id-a1", "id-a1x", "id-a2", "id-b", "id-b1"]);

        let mut got = flat.clone();
        got.sort();
        expected.sort();
        assert_eq!(got, expected);
    }

    #[test]
    fn dangling_parent_becomes_root() {
        let forest = build_tree(vec![rec("a", None, 1), rec("orphan", Some("deleted"), 1)]);
        assert_eq!(slugs(&forest), vec!["a", "orphan"]);
    }

    #[test]
    fn empty_parent_slug_is_a_root() {
        let forest = build_tree(vec![rec("a", Some(""), 1)]);
        assert_eq!(slugs(&forest), vec!["a"]);
    }

    #[test]
    fn cycle_members_are_promoted_not_dropped() {
        let forest = build_tree(vec![
            rec("x", None, 1),
            rec("a", Some("b"), 1),
            rec("b", Some("a"), 1),
            rec("c", Some("a"), 1),
        ]);

        assert_eq!(flatten_preorder(&forest).len(), 4);
        assert_eq!(slugs(&forest), vec!["x", "a"]);
        assert_eq!(slugs(&forest[1].children), vec!["b", "c"]);
    }

    #[test]
    fn self_parent_is_a_root() {
        let forest = build_tree(vec![rec("a", Some("a"), 1)]);
        assert_eq!(slugs(&forest), vec!["a"]);
        assert!(forest[0].children.is_empty());
    }

    #[test]
    fn sorting_is_stable_within_sibling_groups() {
        let mut forest = build_tree(vec![
            rec("r", None, 1),
            rec("late", Some("r"), 5),
            rec("tie1", Some("r"), 2),
            rec("tie2", Some("r"), 2),
        ]);
        sort_siblings_by_key(&mut forest, |r| r.order);
        assert_eq!(slugs(&forest[0].children), vec!["tie1", "tie2", "late"]);
    }

    #[test]
    fn finds_sibling_group_and_subtree() {
        let forest = build_tree(vec![
            rec("r", None, 1),
            rec("a", Some("r"), 1),
            rec("b", Some("r"), 2),
            rec("a1", Some("a"), 1),
        ]);

        let group = sibling_group(&forest, "id-b").unwrap();
        assert_eq!(slugs(group), vec!["a", "b"]);
        assert_eq!(slugs(sibling_group(&forest, "id-r").unwrap()), vec!["r"]);
        assert!(sibling_group(&forest, "missing").is_none());

        assert_eq!(subtree_keys(&forest, "id-a"), vec!["id-a", "id-a1"]);
    }
}
