//! Role → menu permission assignment.
//!
//! One session per open assignment dialog. The menu tree is read-only; only
//! the checked set of menu slugs changes, and saving replaces the role's
//! grants with exactly that set.

use crate::models::{Menu, Role};
use crate::services::{ApiError, BackendClient};
use crate::tree::{flatten_preorder, sort_siblings_by_key, TreeNode, VisibleRows};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const SESSION_KEY: &str = "screen.roles.permissions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionSession {
    pub role_id: String,
    pub role_name: String,
    tree: Vec<TreeNode<Menu>>,
    checked: BTreeSet<String>,
    /// Set when the menu tree could not be loaded; the dialog shows it instead of the tree.
    pub load_error: Option<String>,
    /// Last save failure, shown inside the dialog.
    pub save_error: Option<String>,
}

/// One checkbox line of the permission tree.
#[derive(Debug)]
pub struct PermissionRow<'a> {
    pub menu: &'a Menu,
    pub depth: usize,
    pub checked: bool,
}

impl PermissionSession {
    /// Fetch the menu tree and the role's current grants concurrently.
    ///
    /// A failed grants fetch is read as "no permissions yet".
    pub async fn open(api: &BackendClient, role: &Role) -> Self {
        let (tree, granted) = tokio::join!(api.menu_tree(), api.role_menus(&role.id));

        let (mut tree, load_error) = match tree {
            Ok(tree) => (tree, None),
            Err(e) => {
                tracing::error!(role_id = %role.id, error = %e, "Failed to load menu tree for permissions");
                (Vec::new(), Some(e.user_message("Failed to load menus")))
            }
        };
        sort_siblings_by_key(&mut tree, |menu| menu.sort_order);

        let checked = match granted {
            Ok(slugs) => slugs.into_iter().collect(),
            Err(e) => {
                tracing::warn!(role_id = %role.id, error = %e, "Role grants unavailable; starting from none");
                BTreeSet::new()
            }
        };

        Self {
            role_id: role.id.clone(),
            role_name: role.name.clone(),
            tree,
            checked,
            load_error,
            save_error: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(role: &Role, tree: Vec<TreeNode<Menu>>, checked: &[&str]) -> Self {
        Self {
            role_id: role.id.clone(),
            role_name: role.name.clone(),
            tree,
            checked: checked.iter().map(|s| s.to_string()).collect(),
            load_error: None,
            save_error: None,
        }
    }

    pub fn is_checked(&self, slug: &str) -> bool {
        self.checked.contains(slug)
    }

    pub fn checked(&self) -> &BTreeSet<String> {
        &self.checked
    }

    fn knows(&self, slug: &str) -> bool {
        flatten_preorder(&self.tree)
            .into_iter()
            .any(|menu| menu.menu_id == slug)
    }

    /// Flip exactly `slug`; ancestors and descendants are left alone.
    ///
    /// Slugs not present in the loaded tree are ignored and `false` is returned.
    pub fn toggle(&mut self, slug: &str) -> bool {
        if !self.knows(slug) {
            tracing::debug!(slug = %slug, "Ignoring toggle of unknown menu");
            return false;
        }
        if !self.checked.remove(slug) {
            self.checked.insert(slug.to_string());
        }
        true
    }

    /// Replace the role's grants with the checked set.
    ///
    /// On failure the error is kept on the session and the checked set is untouched.
    pub async fn save(&mut self, api: &BackendClient) -> Result<(), ApiError> {
        let menu_ids: Vec<String> = self.checked.iter().cloned().collect();
        match api.set_role_menus(&self.role_id, &menu_ids).await {
            Ok(()) => {
                tracing::info!(role_id = %self.role_id, granted = menu_ids.len(), "Role permissions saved");
                self.save_error = None;
                Ok(())
            }
            Err(e) => {
                self.save_error = Some(e.user_message("Failed to save permissions"));
                Err(e)
            }
        }
    }

    /// Close without saving.
    pub fn cancel(self) {
        tracing::debug!(role_id = %self.role_id, "Permission assignment cancelled");
    }

    /// Every menu, fully expanded, with its checkbox state.
    pub fn rows(&self) -> Vec<PermissionRow<'_>> {
        VisibleRows::all(&self.tree)
            .map(|row| PermissionRow {
                menu: row.item(),
                depth: row.depth,
                checked: self.checked.contains(&row.item().menu_id),
            })
            .collect()
    }
}
