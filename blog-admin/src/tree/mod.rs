//! Hierarchy helpers shared by the menu, organization and permission screens.
pub mod builder;
pub mod reorder;
pub mod view;

pub use builder::{
    build_tree, flatten_preorder, sibling_group, sort_siblings_by_key, subtree_keys, TreeNode,
    TreeRecord,
};
pub use reorder::{plan_move, Direction, SortUpdate, Sortable};
pub use view::{DisplayRow, TreeView, VisibleRows};
