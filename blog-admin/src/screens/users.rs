use super::crud::{CrudScreen, Flash};
use super::organizations::{organization_options, organization_tree};
use crate::models::{FormField, Organization, Role, SelectOption, User};
use crate::services::BackendClient;
use crate::tree::TreeNode;

/// Role and organization choices for the user form.
#[derive(Debug, Default)]
pub struct UserChoices {
    pub roles: Vec<Role>,
    pub organizations: Vec<TreeNode<Organization>>,
}

impl UserChoices {
    /// Missing choices only leave the pickers empty.
    pub async fn load(api: &BackendClient) -> Self {
        let (roles, organizations) = tokio::join!(api.list::<Role>(), api.list::<Organization>());

        let roles = roles.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load roles for user form");
            Vec::new()
        });
        let organizations = organizations.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load organizations for user form");
            Vec::new()
        });

        Self {
            roles,
            organizations: organization_tree(organizations),
        }
    }

    /// Fill the `role_id` and `org_id` selects.
    pub fn apply(&self, fields: &mut [FormField]) {
        for field in fields.iter_mut() {
            match field.name {
                "role_id" => {
                    let mut options = vec![SelectOption::new("", "(no role)", &field.value)];
                    options.extend(
                        self.roles
                            .iter()
                            .map(|role| SelectOption::new(role.id.clone(), role.name.clone(), &field.value)),
                    );
                    field.options = options;
                }
                "org_id" => {
                    let mut options = vec![SelectOption::new("", "(unassigned)", &field.value)];
                    options.extend(organization_options(&self.organizations, &field.value, None));
                    field.options = options;
                }
                _ => {}
            }
        }
    }
}

/// Replace the listing with a keyword search; a blank keyword lists everyone.
pub async fn search(screen: &mut CrudScreen<User>, api: &BackendClient, keyword: &str) {
    match api.search_users(keyword).await {
        Ok(users) => screen.records = users,
        Err(e) => {
            screen.records.clear();
            screen.flash = Some(Flash::error(e.user_message("Failed to search users")));
        }
    }
}
