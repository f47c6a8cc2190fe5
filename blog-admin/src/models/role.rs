use super::{trim_in_place, FormField, Resource, ResourceForm};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    #[serde(default)]
    pub role_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RoleForm {
    #[serde(default)]
    pub role_id: String,
    #[validate(length(min = 1, message = "Role name is required"))]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ResourceForm for RoleForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.role_id);
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.description);
    }

    fn payload(&self, _editing: bool) -> serde_json::Value {
        json!({
            "roleId": self.role_id,
            "name": self.name,
            "description": self.description,
        })
    }

    fn fields(&self, editing: bool) -> Vec<FormField> {
        vec![
            FormField::new("role_id", "Role ID", "text", self.role_id.clone()).readonly(editing),
            FormField::new("name", "Name", "text", self.name.clone()).required(),
            FormField::new("description", "Description", "textarea", self.description.clone()),
        ]
    }
}

impl Resource for Role {
    type Form = RoleForm;

    const COLLECTION: &'static str = "roles";
    const LABEL: &'static str = "Role";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_form(&self) -> RoleForm {
        RoleForm {
            role_id: self.role_id.clone(),
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Role ID", "Description", "Created"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.role_id.clone(),
            self.description.clone().unwrap_or_default(),
            self.create_time.clone().unwrap_or_default(),
        ]
    }
}
