/// Sections of the admin dashboard sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Reservations,
    Menu,
    Gallery,
    Analytics,
    Settings,
}

impl AdminTab {
    pub const ALL: [AdminTab; 5] = [
        Self::Reservations,
        Self::Menu,
        Self::Gallery,
        Self::Analytics,
        Self::Settings,
    ];

    /// Unknown or missing selections fall back to reservations
    pub fn parse(param: Option<&str>) -> Self {
        param
            .and_then(|p| Self::ALL.into_iter().find(|tab| tab.id() == p))
            .unwrap_or_default()
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Reservations => "reservations",
            Self::Menu => "menu",
            Self::Gallery => "gallery",
            Self::Analytics => "analytics",
            Self::Settings => "settings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Reservations => "Reservations",
            Self::Menu => "Menu Items",
            Self::Gallery => "Gallery",
            Self::Analytics => "Analytics",
            Self::Settings => "Settings",
        }
    }

    /// Text shown for sections without a management panel
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Reservations | Self::Menu => None,
            Self::Gallery => Some("Gallery management coming soon..."),
            Self::Analytics => Some("Analytics dashboard coming soon..."),
            Self::Settings => Some("Settings panel coming soon..."),
        }
    }
}

/// Sidebar entry
#[derive(Debug, Clone)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

pub fn navigation(active: AdminTab) -> Vec<NavItem> {
    AdminTab::ALL
        .into_iter()
        .map(|tab| NavItem {
            id: tab.id(),
            label: tab.label(),
            active: tab == active,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_reservations() {
        assert_eq!(AdminTab::parse(None), AdminTab::Reservations);
        assert_eq!(AdminTab::parse(Some("reports")), AdminTab::Reservations);
    }

    #[test]
    fn parses_every_tab_id() {
        for tab in AdminTab::ALL {
            assert_eq!(AdminTab::parse(Some(tab.id())), tab);
        }
    }

    #[test]
    fn only_unbuilt_sections_have_placeholders() {
        assert!(AdminTab::Reservations.placeholder().is_none());
        assert!(AdminTab::Menu.placeholder().is_none());
        assert_eq!(
            AdminTab::Gallery.placeholder(),
            Some("Gallery management coming soon...")
        );
    }

    #[test]
    fn navigation_marks_one_active_entry() {
        let nav = navigation(AdminTab::Menu);
        assert_eq!(nav.len(), 5);
        let active: Vec<_> = nav.iter().filter(|n| n.active).map(|n| n.id).collect();
        assert_eq!(active, ["menu"]);
    }
}
