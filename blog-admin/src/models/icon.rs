use serde::Serialize;

/// Icons a menu may name. Unknown names render as [`MenuIcon::Fallback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MenuIcon {
    Home,
    LayoutDashboard,
    Users,
    User,
    Shield,
    KeyRound,
    Building2,
    List,
    Folder,
    FolderOpen,
    FileText,
    Tag,
    Settings,
    Globe,
    Mail,
    Bell,
    Activity,
    TrendingUp,
    MessageSquare,
    Fallback,
}

const ICONS: &[(&str, MenuIcon)] = &[
    ("Home", MenuIcon::Home),
    ("LayoutDashboard", MenuIcon::LayoutDashboard),
    ("Users", MenuIcon::Users),
    ("User", MenuIcon::User),
    ("Shield", MenuIcon::Shield),
    ("KeyRound", MenuIcon::KeyRound),
    ("Building2", MenuIcon::Building2),
    ("List", MenuIcon::List),
    ("Folder", MenuIcon::Folder),
    ("FolderOpen", MenuIcon::FolderOpen),
    ("FileText", MenuIcon::FileText),
    ("Tag", MenuIcon::Tag),
    ("Settings", MenuIcon::Settings),
    ("Globe", MenuIcon::Globe),
    ("Mail", MenuIcon::Mail),
    ("Bell", MenuIcon::Bell),
    ("Activity", MenuIcon::Activity),
    ("TrendingUp", MenuIcon::TrendingUp),
    ("MessageSquare", MenuIcon::MessageSquare),
];

impl MenuIcon {
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        ICONS
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, icon)| *icon)
            .unwrap_or(MenuIcon::Fallback)
    }

    /// Kebab-case CSS class suffix, e.g. `icon-building-2`.
    pub fn css_class(&self) -> &'static str {
        match self {
            MenuIcon::Home => "icon-home",
            MenuIcon::LayoutDashboard => "icon-layout-dashboard",
            MenuIcon::Users => "icon-users",
            MenuIcon::User => "icon-user",
            MenuIcon::Shield => "icon-shield",
            MenuIcon::KeyRound => "icon-key-round",
            MenuIcon::Building2 => "icon-building-2",
            MenuIcon::List => "icon-list",
            MenuIcon::Folder => "icon-folder",
            MenuIcon::FolderOpen => "icon-folder-open",
            MenuIcon::FileText => "icon-file-text",
            MenuIcon::Tag => "icon-tag",
            MenuIcon::Settings => "icon-settings",
            MenuIcon::Globe => "icon-globe",
            MenuIcon::Mail => "icon-mail",
            MenuIcon::Bell => "icon-bell",
            MenuIcon::Activity => "icon-activity",
            MenuIcon::TrendingUp => "icon-trending-up",
            MenuIcon::MessageSquare => "icon-message-square",
            MenuIcon::Fallback => "icon-circle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names_case_insensitively() {
        assert_eq!(MenuIcon::from_name("Building2"), MenuIcon::Building2);
        assert_eq!(MenuIcon::from_name(" users "), MenuIcon::Users);
    }

    #[test]
    fn unknown_or_empty_names_fall_back() {
        assert_eq!(MenuIcon::from_name("Spaceship"), MenuIcon::Fallback);
        assert_eq!(MenuIcon::from_name(""), MenuIcon::Fallback);
        assert_eq!(MenuIcon::Fallback.css_class(), "icon-circle");
    }
}
