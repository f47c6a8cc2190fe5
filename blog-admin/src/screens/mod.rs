//! Per-screen interaction state and the operations behind each screen.
pub mod account;
pub mod crud;
pub mod menus;
pub mod navigation;
pub mod organizations;
pub mod permissions;
pub mod users;

pub use crud::{CrudScreen, Flash, FlashKind, Modal};
pub use menus::MenuScreen;
pub use navigation::{sidebar, NavItem};
pub use permissions::{PermissionRow, PermissionSession};
pub use users::UserChoices;
