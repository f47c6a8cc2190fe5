//! Manual up/down reordering within a sibling group by swapping sort keys.

use super::builder::{TreeNode, TreeRecord};
use serde::{Deserialize, Serialize};

/// Records that carry a display sort key.
pub trait Sortable: TreeRecord {
    fn sort_order(&self) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// One entry of the batched `PUT /api/menus/sort` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortUpdate {
    pub id: String,
    pub sort_order: i32,
    pub parent_id: Option<String>,
}

/// Plan the sort-key updates that move `key` one slot within `siblings`.
///
/// Positions are array positions in `siblings`, not sort keys. Returns `None`
/// when `key` is absent or already at the boundary in that direction.
///
/// Distinct keys are swapped, producing exactly two updates. When the node and
/// its neighbour share a key, the group is first renumbered `1..=n` in its
/// current order and the swap applied on top, so the move is always visible
/// after refetch.
pub fn plan_move<T: Sortable>(
    key: &str,
    siblings: &[TreeNode<T>],
    direction: Direction,
) -> Option<Vec<SortUpdate>> {
    let index = siblings.iter().position(|node| node.item.key() == key)?;
    let neighbour = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down => {
            if index + 1 >= siblings.len() {
                return None;
            }
            index + 1
        }
    };

    let current = &siblings[index].item;
    let other = &siblings[neighbour].item;

    if current.sort_order() != other.sort_order() {
        return Some(vec![
            update(current, other.sort_order()),
            update(other, current.sort_order()),
        ]);
    }

    let mut orders: Vec<i32> = (1..=siblings.len() as i32).collect();
    orders.swap(index, neighbour);
    let updates = siblings
        .iter()
        .zip(orders)
        .filter(|(node, order)| node.item.sort_order() != *order)
        .map(|(node, order)| update(&node.item, order))
        .collect();
    Some(updates)
}

fn update<T: Sortable>(item: &T, sort_order: i32) -> SortUpdate {
    SortUpdate {
        id: item.key().to_string(),
        sort_order,
        parent_id: item.parent_slug().map(str::to_string),
    }
}
