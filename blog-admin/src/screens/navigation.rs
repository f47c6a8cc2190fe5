use crate::models::{AuthUser, Menu, MenuIcon, MenuKind};
use crate::services::BackendClient;
use crate::tree::{sort_siblings_by_key, TreeNode};

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub name: String,
    pub href: String,
    pub icon: MenuIcon,
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn dashboard() -> Self {
        Self {
            name: "Dashboard".to_string(),
            href: "/admin".to_string(),
            icon: MenuIcon::Home,
            children: Vec::new(),
        }
    }

    pub fn is_active(&self, current_path: &str) -> bool {
        self.href == current_path
            || (self.href != "/admin" && current_path.starts_with(&format!("{}/", self.href)))
            || self.children.iter().any(|child| child.is_active(current_path))
    }
}

/// Backend route paths live under `/admin` in the console.
pub fn admin_href(path: Option<&str>) -> String {
    match path.map(str::trim).filter(|p| !p.is_empty() && *p != "/") {
        Some(path) if path.starts_with("/admin") => path.to_string(),
        Some(path) if path.starts_with('/') => format!("/admin{}", path),
        Some(path) => format!("/admin/{}", path),
        None => "/admin".to_string(),
    }
}

fn to_items(nodes: &[TreeNode<Menu>]) -> Vec<NavItem> {
    nodes
        .iter()
        .filter(|node| node.item.is_visible() && node.item.is_active())
        .filter(|node| node.item.kind != MenuKind::Button)
        .map(|node| NavItem {
            name: node.item.name.clone(),
            href: admin_href(node.item.path.as_deref()),
            icon: node.item.icon(),
            children: to_items(&node.children),
        })
        .collect()
}

/// Sidebar for the logged-in administrator.
///
/// Any failure or an empty result yields the single dashboard entry.
pub async fn sidebar(api: &BackendClient, user: &AuthUser) -> Vec<NavItem> {
    match api.user_menus(&user.user_id).await {
        Ok(mut tree) => {
            sort_siblings_by_key(&mut tree, |menu| menu.sort_order);
            let items = to_items(&tree);
            if items.is_empty() {
                vec![NavItem::dashboard()]
            } else {
                items
            }
        }
        Err(e) => {
            tracing::warn!(user_id = %user.user_id, error = %e, "Sidebar menus unavailable; using fallback");
            vec![NavItem::dashboard()]
        }
    }
}
