use crate::models::{Organization, OrganizationForm, SelectOption};
use crate::tree::{build_tree, subtree_keys, TreeNode, VisibleRows};

pub const VIEW_SESSION_KEY: &str = "screen.organizations.view";

/// Organizations arrive flat and are shown as a tree in input order.
pub fn organization_tree(records: Vec<Organization>) -> Vec<TreeNode<Organization>> {
    build_tree(records)
}

/// Indented `<option>`s over the organization tree, valued by slug.
///
/// `exclude` removes that organization and its descendants (an organization
/// cannot move under itself).
pub fn organization_options(
    forest: &[TreeNode<Organization>],
    current: &str,
    exclude: Option<&str>,
) -> Vec<SelectOption> {
    let excluded = exclude
        .map(|key| subtree_keys(forest, key))
        .unwrap_or_default();

    VisibleRows::all(forest)
        .filter(|row| !excluded.contains(&row.item().id))
        .map(|row| {
            let org = row.item();
            let label = format!("{}{}", "\u{a0}\u{a0}".repeat(row.depth), org.name);
            SelectOption::new(org.org_id.clone(), label, current)
        })
        .collect()
}

/// Create form for a child of `parent_slug`.
pub fn child_form(parent_slug: &str) -> OrganizationForm {
    OrganizationForm {
        parent_org_id: parent_slug.to_string(),
        ..OrganizationForm::default()
    }
}
