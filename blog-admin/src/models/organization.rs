use super::{non_blank, trim_in_place, FormField, Resource, ResourceForm};
use crate::tree::TreeRecord;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    #[serde(default)]
    pub org_id: String,
    #[serde(default)]
    pub parent_org_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
}

impl TreeRecord for Organization {
    fn key(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.org_id
    }

    fn parent_slug(&self) -> Option<&str> {
        self.parent_org_id.as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrganizationForm {
    /// Only sent on create; the backend generates one when blank.
    #[serde(default)]
    pub org_id: String,
    #[validate(length(min = 1, message = "Organization name is required"))]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_org_id: String,
}

impl ResourceForm for OrganizationForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.org_id);
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.description);
        trim_in_place(&mut self.parent_org_id);
    }

    fn payload(&self, editing: bool) -> Value {
        let mut body = Map::new();
        body.insert("name".into(), json!(self.name));
        body.insert("description".into(), json!(self.description));
        body.insert("parentOrgId".into(), json!(non_blank(&self.parent_org_id)));
        if !editing {
            if let Some(org_id) = non_blank(&self.org_id) {
                body.insert("orgId".into(), json!(org_id));
            }
        }
        Value::Object(body)
    }

    fn fields(&self, editing: bool) -> Vec<FormField> {
        vec![
            FormField::new("org_id", "Organization ID", "text", self.org_id.clone()).readonly(editing),
            FormField::new("name", "Name", "text", self.name.clone()).required(),
            FormField::new("description", "Description", "textarea", self.description.clone()),
        ]
    }
}

impl Resource for Organization {
    type Form = OrganizationForm;

    const COLLECTION: &'static str = "organizations";
    const LABEL: &'static str = "Organization";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_form(&self) -> OrganizationForm {
        OrganizationForm {
            org_id: self.org_id.clone(),
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            parent_org_id: self.parent_org_id.clone().unwrap_or_default(),
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Organization ID", "Description", "Created"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.org_id.clone(),
            self.description.clone().unwrap_or_default(),
            self.create_time.clone().unwrap_or_default(),
        ]
    }
}
