use crate::models::{Menu, MenuForm};
use crate::services::{ApiError, BackendClient};
use crate::tree::{
    build_tree, plan_move, sibling_group, sort_siblings_by_key, subtree_keys, Direction,
    DisplayRow, TreeNode, TreeView,
};

pub const VIEW_SESSION_KEY: &str = "screen.menus.view";

/// Loaded state of the menu management screen.
#[derive(Debug, Default)]
pub struct MenuScreen {
    /// Display tree, siblings ordered by sort key.
    pub tree: Vec<TreeNode<Menu>>,
    /// Every menu, for parent choices and sort-key defaults.
    pub flat: Vec<Menu>,
    pub error: Option<String>,
}

impl MenuScreen {
    /// Fetch the nested tree and the flat list concurrently.
    ///
    /// When only the flat list arrives the tree is rebuilt from it.
    pub async fn load(api: &BackendClient) -> Self {
        let (tree, flat) = tokio::join!(api.menu_tree(), api.menu_list());

        let mut screen = match (tree, flat) {
            (Ok(tree), Ok(flat)) => Self {
                tree,
                flat,
                error: None,
            },
            (Err(e), Ok(flat)) => {
                tracing::warn!(error = %e, "Menu tree unavailable; building from flat list");
                Self {
                    tree: build_tree(flat.clone()),
                    flat,
                    error: None,
                }
            }
            (Ok(tree), Err(e)) => {
                tracing::warn!(error = %e, "Flat menu list unavailable");
                Self {
                    flat: crate::tree::flatten_preorder(&tree).into_iter().cloned().collect(),
                    tree,
                    error: None,
                }
            }
            (Err(e), Err(_)) => {
                tracing::error!(error = %e, "Failed to load menus");
                Self {
                    error: Some(e.user_message("Failed to load menus")),
                    ..Self::default()
                }
            }
        };
        sort_siblings_by_key(&mut screen.tree, |menu| menu.sort_order);
        screen
    }

    pub fn rows<'a>(&'a self, view: &'a TreeView) -> impl Iterator<Item = DisplayRow<'a, Menu>> + 'a {
        view.rows(&self.tree)
    }

    pub fn find(&self, id: &str) -> Option<&Menu> {
        self.flat.iter().find(|menu| menu.id == id)
    }

    /// Sort key for a new menu: one past the largest in use.
    pub fn next_sort_order(&self) -> i32 {
        self.flat
            .iter()
            .map(|menu| menu.sort_order)
            .max()
            .map(|max| max + 1)
            .unwrap_or(1)
    }

    /// Menus that may become the parent of `editing` (or of a new menu).
    ///
    /// Excludes buttons, the edited menu itself and everything below it.
    pub fn available_parents(&self, editing: Option<&str>) -> Vec<&Menu> {
        let excluded = editing
            .map(|id| subtree_keys(&self.tree, id))
            .unwrap_or_default();
        self.flat
            .iter()
            .filter(|menu| menu.kind.can_parent())
            .filter(|menu| !excluded.contains(&menu.id))
            .collect()
    }

    /// Create form pre-filled with the next sort key and an optional parent.
    pub fn create_form(&self, parent_slug: Option<&str>) -> MenuForm {
        MenuForm::for_create(self.next_sort_order(), parent_slug)
    }

    /// Move a menu one slot within its sibling group.
    ///
    /// Returns `Ok(false)` without contacting the backend when the menu is
    /// unknown or already first/last.
    pub async fn move_menu(
        &self,
        api: &BackendClient,
        id: &str,
        direction: Direction,
    ) -> Result<bool, ApiError> {
        let Some(siblings) = sibling_group(&self.tree, id) else {
            return Ok(false);
        };
        let Some(updates) = plan_move(id, siblings, direction) else {
            return Ok(false);
        };

        api.update_menu_sort(&updates).await?;
        tracing::info!(menu_id = %id, direction = ?direction, updated = updates.len(), "Menu moved");
        Ok(true)
    }

    pub async fn move_up(&self, api: &BackendClient, id: &str) -> Result<bool, ApiError> {
        self.move_menu(api, id, Direction::Up).await
    }

    pub async fn move_down(&self, api: &BackendClient, id: &str) -> Result<bool, ApiError> {
        self.move_menu(api, id, Direction::Down).await
    }
}
