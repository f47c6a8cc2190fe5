//! Expand/collapse state and the depth-first row walk used by tree tables.

use super::builder::{TreeNode, TreeRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Expand state of one tree table, keyed by internal id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeView {
    expanded: BTreeSet<String>,
    /// Set once the first successful fetch applied the default expansion.
    initialized: bool,
}

impl TreeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    /// Expand every node that has children.
    pub fn expand_all<T: TreeRecord>(&mut self, forest: &[TreeNode<T>]) {
        let mut stack: Vec<&TreeNode<T>> = forest.iter().collect();
        while let Some(node) = stack.pop() {
            if node.has_children() {
                self.expanded.insert(node.item.key().to_string());
                stack.extend(node.children.iter());
            }
        }
    }

    /// Apply the default (fully expanded) state on the first successful fetch only.
    pub fn sync<T: TreeRecord>(&mut self, forest: &[TreeNode<T>]) {
        if !self.initialized {
            self.expand_all(forest);
            self.initialized = true;
        }
    }

    /// Flip membership of `key`. Returns the new expanded state.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.expanded.remove(key) {
            false
        } else {
            self.expanded.insert(key.to_string());
            true
        }
    }

    /// Rows visible under the current expand state.
    pub fn rows<'a, T: TreeRecord>(&'a self, forest: &'a [TreeNode<T>]) -> VisibleRows<'a, T> {
        VisibleRows::new(forest, Some(&self.expanded))
    }
}

/// One rendered line of a tree table.
#[derive(Debug)]
pub struct DisplayRow<'a, T> {
    pub node: &'a TreeNode<T>,
    pub depth: usize,
    pub expanded: bool,
    /// Position among siblings, for enabling move up/down.
    pub index: usize,
    pub sibling_count: usize,
}

impl<'a, T> DisplayRow<'a, T> {
    pub fn item(&self) -> &'a T {
        &self.node.item
    }

    pub fn has_children(&self) -> bool {
        self.node.has_children()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.sibling_count
    }
}

/// Depth-first iterator over `(node, depth)` pairs.
///
/// With no expand set every node is visited.
pub struct VisibleRows<'a, T> {
    stack: Vec<DisplayRow<'a, T>>,
    expanded: Option<&'a BTreeSet<String>>,
}

impl<'a, T: TreeRecord> VisibleRows<'a, T> {
    pub fn new(forest: &'a [TreeNode<T>], expanded: Option<&'a BTreeSet<String>>) -> Self {
        let mut rows = Self {
            stack: Vec::new(),
            expanded,
        };
        rows.push_level(forest, 0);
        rows
    }

    /// Walk the whole forest regardless of expand state.
    pub fn all(forest: &'a [TreeNode<T>]) -> Self {
        Self::new(forest, None)
    }

    fn is_open(&self, node: &TreeNode<T>) -> bool {
        match self.expanded {
            Some(set) => set.contains(node.item.key()),
            None => true,
        }
    }

    fn push_level(&mut self, nodes: &'a [TreeNode<T>], depth: usize) {
        let sibling_count = nodes.len();
        for (index, node) in nodes.iter().enumerate().rev() {
            let expanded = self.is_open(node);
            self.stack.push(DisplayRow {
                node,
                depth,
                expanded,
                index,
                sibling_count,
            });
        }
    }
}

impl<'a, T: TreeRecord> Iterator for VisibleRows<'a, T> {
    type Item = DisplayRow<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.stack.pop()?;
        if row.expanded && row.node.has_children() {
            self.push_level(&row.node.children, row.depth + 1);
        }
        Some(row)
    }
}
