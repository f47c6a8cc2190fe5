use super::{form_number, non_blank, null_as_default, trim_in_place, FormField, Resource, ResourceForm, SelectOption};
use crate::models::MenuIcon;
use crate::tree::{Sortable, TreeRecord};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MenuKind {
    Directory,
    #[default]
    Menu,
    Button,
}

impl MenuKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuKind::Directory => "DIRECTORY",
            MenuKind::Menu => "MENU",
            MenuKind::Button => "BUTTON",
        }
    }

    /// Buttons are leaves; only directories and menus can parent other menus.
    pub fn can_parent(&self) -> bool {
        !matches!(self, MenuKind::Button)
    }
}

/// A navigation entry. `menu_id` is the slug children reference through `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub menu_id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_order: i32,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: MenuKind,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub status: Option<i32>,
}

impl Menu {
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    pub fn is_active(&self) -> bool {
        self.status.unwrap_or(1) == 1
    }

    pub fn icon(&self) -> MenuIcon {
        MenuIcon::from_name(self.icon.as_deref().unwrap_or_default())
    }
}

impl TreeRecord for Menu {
    fn key(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.menu_id
    }

    fn parent_slug(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

impl Sortable for Menu {
    fn sort_order(&self) -> i32 {
        self.sort_order
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuForm {
    #[serde(default)]
    pub menu_id: String,
    #[validate(length(min = 1, message = "Menu name is required"))]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default, deserialize_with = "form_number")]
    pub sort_order: i32,
    #[serde(default)]
    pub kind: MenuKind,
    #[serde(default)]
    pub permission: String,
    #[serde(default)]
    pub visible: bool,
    #[serde(default = "default_status", deserialize_with = "form_number")]
    pub status: i32,
    #[serde(default)]
    pub parent_id: String,
}

fn default_status() -> i32 {
    1
}

impl Default for MenuForm {
    fn default() -> Self {
        Self {
            menu_id: String::new(),
            name: String::new(),
            path: String::new(),
            icon: String::new(),
            sort_order: 0,
            kind: MenuKind::Menu,
            permission: String::new(),
            visible: true,
            status: 1,
            parent_id: String::new(),
        }
    }
}

impl MenuForm {
    /// Defaults for a new menu: next free sort order, optional pre-selected parent.
    pub fn for_create(next_sort_order: i32, parent_id: Option<&str>) -> Self {
        Self {
            sort_order: next_sort_order,
            parent_id: parent_id.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// Parent choices rendered into the select; set by the menu screen.
    pub fn parent_field(&self, parents: &[&Menu]) -> FormField {
        let mut options = vec![SelectOption::new("", "(top level)", &self.parent_id)];
        options.extend(parents.iter().map(|menu| {
            let label = if menu.parent_id.is_some() {
                format!("└─ {}", menu.name)
            } else {
                menu.name.clone()
            };
            SelectOption::new(menu.menu_id.clone(), label, &self.parent_id)
        }));
        FormField::new("parent_id", "Parent", "select", self.parent_id.clone()).options(options)
    }
}

impl ResourceForm for MenuForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.menu_id);
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.path);
        trim_in_place(&mut self.icon);
        trim_in_place(&mut self.permission);
        trim_in_place(&mut self.parent_id);
    }

    fn payload(&self, _editing: bool) -> serde_json::Value {
        json!({
            "menuId": self.menu_id,
            "name": self.name,
            "path": self.path,
            "icon": self.icon,
            "sortOrder": self.sort_order,
            "type": self.kind,
            "permission": self.permission,
            "visible": self.visible,
            "status": self.status,
            "parentId": non_blank(&self.parent_id),
        })
    }

    fn fields(&self, _editing: bool) -> Vec<FormField> {
        let kinds = [MenuKind::Directory, MenuKind::Menu, MenuKind::Button]
            .iter()
            .map(|kind| SelectOption::new(kind.as_str(), kind.as_str(), self.kind.as_str()))
            .collect();
        let statuses = vec![
            SelectOption::new("1", "Active", &self.status.to_string()),
            SelectOption::new("0", "Disabled", &self.status.to_string()),
        ];

        vec![
            FormField::new("menu_id", "Menu ID", "text", self.menu_id.clone()),
            FormField::new("name", "Name", "text", self.name.clone()).required(),
            FormField::new("kind", "Type", "select", self.kind.as_str()).options(kinds),
            FormField::new("path", "Route path", "text", self.path.clone()),
            FormField::new("icon", "Icon", "text", self.icon.clone()),
            FormField::new("permission", "Permission", "text", self.permission.clone()),
            FormField::new("sort_order", "Sort order", "number", self.sort_order.to_string()),
            FormField::new("visible", "Visible", "checkbox", self.visible.to_string()),
            FormField::new("status", "Status", "select", self.status.to_string()).options(statuses),
        ]
    }
}

impl Resource for Menu {
    type Form = MenuForm;

    const COLLECTION: &'static str = "menus";
    const LABEL: &'static str = "Menu";

    fn list_path() -> String {
        "/api/menus/list".to_string()
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_form(&self) -> MenuForm {
        MenuForm {
            menu_id: self.menu_id.clone(),
            name: self.name.clone(),
            path: self.path.clone().unwrap_or_default(),
            icon: self.icon.clone().unwrap_or_default(),
            sort_order: self.sort_order,
            kind: self.kind,
            permission: self.permission.clone().unwrap_or_default(),
            visible: self.is_visible(),
            status: self.status.unwrap_or(1),
            parent_id: self.parent_id.clone().unwrap_or_default(),
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Type", "Path", "Permission", "Order", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.kind.as_str().to_string(),
            self.path.clone().unwrap_or_default(),
            self.permission.clone().unwrap_or_default(),
            self.sort_order.to_string(),
            if self.is_active() { "Active" } else { "Disabled" }.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeNode;

    #[test]
    fn decodes_backend_menu_with_nulls() {
        let menu: Menu = serde_json::from_str(
            r#"{"id":"u1","menuId":"sys","parentId":null,"name":"System","path":null,
                "icon":"Settings","sortOrder":null,"type":"DIRECTORY","permission":null,
                "visible":true,"status":1,"children":[]}"#,
        )
        .unwrap();

        assert_eq!(menu.kind, MenuKind::Directory);
        assert_eq!(menu.sort_order, 0);
        assert!(menu.is_visible());
        assert_eq!(menu.icon(), MenuIcon::Settings);
    }

    #[test]
    fn decodes_nested_tree_body() {
        let tree: Vec<TreeNode<Menu>> = serde_json::from_str(
            r#"[{"id":"u1","menuId":"sys","name":"System","sortOrder":1,"type":"DIRECTORY",
                 "children":[{"id":"u2","menuId":"users","parentId":"sys","name":"Users",
                              "sortOrder":1,"type":"MENU","children":[]}]}]"#,
        )
        .unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children[0].item.menu_id, "users");
    }

    #[test]
    fn payload_sends_null_parent_for_blank_selection() {
        let mut form = MenuForm {
            name: "  Users ".to_string(),
            parent_id: "  ".to_string(),
            ..MenuForm::default()
        };
        form.normalize();
        let body = form.payload(false);
        assert_eq!(body["name"], "Users");
        assert!(body["parentId"].is_null());
        assert_eq!(body["type"], "MENU");
    }

    #[test]
    fn blank_name_fails_validation() {
        let mut form = MenuForm {
            name: "   ".to_string(),
            ..MenuForm::default()
        };
        form.normalize();
        assert!(form.check(false).is_err());
    }
}
