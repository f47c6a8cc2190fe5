use super::{form_number, non_blank, null_as_default, trim_in_place, FormField, Resource, ResourceForm, SelectOption};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRef {
    #[serde(default)]
    pub org_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub role: Option<RoleRef>,
    #[serde(default)]
    pub organization_entity: Option<OrganizationRef>,
    /// Denormalized organization name.
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub last_login_time: Option<String>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status.unwrap_or(1) == 1
    }

    pub fn organization_name(&self) -> &str {
        self.organization
            .as_deref()
            .or_else(|| self.organization_entity.as_ref().and_then(|o| o.name.as_deref()))
            .unwrap_or("Unassigned")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserForm {
    #[validate(length(min = 1, message = "Name is required"))]
    #[serde(default)]
    pub name: String,
    #[validate(email(message = "Email address is invalid"))]
    #[serde(default)]
    pub email: String,
    /// Blank on edit keeps the current password.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role_id: String,
    #[serde(default)]
    pub org_id: String,
    #[serde(default = "active", deserialize_with = "form_number")]
    pub status: i32,
}

fn active() -> i32 {
    1
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            role_id: String::new(),
            org_id: String::new(),
            status: 1,
        }
    }
}

impl ResourceForm for UserForm {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.email);
        trim_in_place(&mut self.role_id);
        trim_in_place(&mut self.org_id);
    }

    fn check(&self, editing: bool) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        if !editing && self.password.is_empty() {
            let mut missing = ValidationError::new("required");
            missing.message = Some("Password is required for new users".into());
            errors.add("password", missing);
        }
        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn payload(&self, _editing: bool) -> Value {
        let mut body = Map::new();
        body.insert("name".into(), json!(self.name));
        body.insert("email".into(), json!(self.email));
        body.insert("status".into(), json!(self.status));
        if !self.password.is_empty() {
            body.insert("password".into(), json!(self.password));
        }
        if let Some(role_id) = non_blank(&self.role_id) {
            body.insert("role".into(), json!({ "id": role_id }));
        }
        if let Some(org_id) = non_blank(&self.org_id) {
            body.insert("organizationEntity".into(), json!({ "orgId": org_id }));
        }
        Value::Object(body)
    }

    fn fields(&self, editing: bool) -> Vec<FormField> {
        let password_label = if editing {
            "Password (leave blank to keep)"
        } else {
            "Password"
        };
        let statuses = vec![
            SelectOption::new("1", "Active", &self.status.to_string()),
            SelectOption::new("0", "Disabled", &self.status.to_string()),
        ];
        let mut password = FormField::new("password", password_label, "password", "");
        if !editing {
            password = password.required();
        }

        vec![
            FormField::new("name", "Name", "text", self.name.clone()).required(),
            FormField::new("email", "Email", "email", self.email.clone()).required(),
            password,
            FormField::new("role_id", "Role", "select", self.role_id.clone()),
            FormField::new("org_id", "Organization", "select", self.org_id.clone()),
            FormField::new("status", "Status", "select", self.status.to_string()).options(statuses),
        ]
    }
}

impl Resource for User {
    type Form = UserForm;

    const COLLECTION: &'static str = "users";
    const LABEL: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    fn to_form(&self) -> UserForm {
        UserForm {
            name: self.name.clone(),
            email: self.email.clone(),
            password: String::new(),
            role_id: self.role.as_ref().map(|r| r.id.clone()).unwrap_or_default(),
            org_id: self
                .organization_entity
                .as_ref()
                .map(|o| o.org_id.clone())
                .unwrap_or_default(),
            status: self.status.unwrap_or(1),
        }
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Organization", "Role", "Status", "Last login"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.organization_name().to_string(),
            self.role
                .as_ref()
                .and_then(|r| r.name.clone())
                .unwrap_or_else(|| "No role".to_string()),
            if self.is_active() { "Active" } else { "Disabled" }.to_string(),
            self.last_login_time.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> UserForm {
        UserForm {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn password_required_only_on_create() {
        let form = form();
        assert!(form.check(false).is_err());
        assert!(form.check(true).is_ok());
    }

    #[test]
    fn blank_password_is_not_sent() {
        let body = form().payload(true);
        assert!(body.get("password").is_none());
        assert!(body.get("role").is_none());
    }

    #[test]
    fn references_are_sent_as_nested_objects() {
        let body = UserForm {
            password: "secret".into(),
            role_id: "r-1".into(),
            org_id: "eng".into(),
            ..form()
        }
        .payload(false);

        assert_eq!(body["role"], json!({"id": "r-1"}));
        assert_eq!(body["organizationEntity"], json!({"orgId": "eng"}));
        assert_eq!(body["password"], "secret");
    }

    #[test]
    fn organization_name_prefers_denormalized_field() {
        let user: User = serde_json::from_str(
            r#"{"id":"1","email":"a@b.c","name":null,"organizationEntity":{"orgId":"eng","name":"Engineering"}}"#,
        )
        .unwrap();
        assert_eq!(user.organization_name(), "Engineering");
        assert_eq!(user.display_name(), "a@b.c");
    }
}
