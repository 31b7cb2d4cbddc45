//! Role enumeration and the static tables keyed by it: post-login landing
//! routes, display labels and sidebar navigation. These tables only shape the
//! UI; the API re-checks the caller's role on every request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Route for the forced first-login password change.
pub const CHANGE_PASSWORD_ROUTE: &str = "/change-password";
/// Login view.
pub const LOGIN_ROUTE: &str = "/login";
/// Landing route for a role with no dedicated dashboard.
pub const FALLBACK_ROUTE: &str = "/";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Faculty,
    Student,
    Librarian,
    /// A role the client does not know; kept verbatim.
    Unknown(String),
}

impl Role {
    /// All roles with a dedicated dashboard.
    pub const KNOWN: [Role; 4] = [Role::Admin, Role::Faculty, Role::Student, Role::Librarian];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::Faculty => "FACULTY",
            Role::Student => "STUDENT",
            Role::Librarian => "LIBRARIAN",
            Role::Unknown(raw) => raw,
        }
    }

    /// Dashboard route for this role, if it has one.
    #[must_use]
    pub fn home_route(&self) -> Option<&'static str> {
        match self {
            Role::Admin => Some("/admin"),
            Role::Faculty => Some("/faculty"),
            Role::Student => Some("/student"),
            Role::Librarian => Some("/librarian"),
            Role::Unknown(_) => None,
        }
    }

    /// Human-readable label shown in the navigation shell.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Role::Admin => "Administrator",
            Role::Faculty => "Faculty",
            Role::Student => "Student",
            Role::Librarian => "Librarian",
            Role::Unknown(raw) => raw,
        }
    }

    /// Sidebar sections available to this role.
    #[must_use]
    pub fn nav_sections(&self) -> &'static [NavSection] {
        match self {
            Role::Admin => ADMIN_NAV,
            Role::Faculty => FACULTY_NAV,
            Role::Student => STUDENT_NAV,
            Role::Librarian => LIBRARIAN_NAV,
            Role::Unknown(_) => &[],
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Role::Admin,
            "FACULTY" => Role::Faculty,
            "STUDENT" => Role::Student,
            "LIBRARIAN" => Role::Librarian,
            _ => Role::Unknown(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Landing route after login. Unknown or missing roles land on
/// [`FALLBACK_ROUTE`]; a pending password change overrides everything.
#[must_use]
pub fn landing_route(role: Option<&Role>, must_change_password: bool) -> &'static str {
    if must_change_password {
        return CHANGE_PASSWORD_ROUTE;
    }
    role.and_then(Role::home_route).unwrap_or(FALLBACK_ROUTE)
}

/// One or more roles accepted by [`crate::SessionManager::has_role`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleSet(Vec<Role>);

impl RoleSet {
    #[must_use]
    pub fn contains(&self, role: &Role) -> bool {
        self.0.iter().any(|candidate| candidate == role)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Role] {
        &self.0
    }
}

impl From<Role> for RoleSet {
    fn from(role: Role) -> Self {
        Self(vec![role])
    }
}

impl From<&Role> for RoleSet {
    fn from(role: &Role) -> Self {
        Self(vec![role.clone()])
    }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self {
        Self(roles.to_vec())
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        Self(roles.to_vec())
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(roles: Vec<Role>) -> Self {
        Self(roles)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct NavSection {
    pub title: &'static str,
    pub items: &'static [NavItem],
}

#[derive(Debug, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    /// Only highlight on an exact path match (dashboard roots).
    pub exact: bool,
}

const fn item(path: &'static str, label: &'static str, icon: &'static str) -> NavItem {
    NavItem {
        path,
        label,
        icon,
        exact: false,
    }
}

const fn root(path: &'static str) -> NavItem {
    NavItem {
        path,
        label: "Dashboard",
        icon: "dashboard",
        exact: true,
    }
}

const ADMIN_NAV: &[NavSection] = &[
    NavSection {
        title: "Dashboard",
        items: &[root("/admin")],
    },
    NavSection {
        title: "Users",
        items: &[
            item("/admin/students", "Students", "group"),
            item("/admin/faculty", "Faculty", "manage_accounts"),
            item("/admin/librarians", "Librarians", "local_library"),
        ],
    },
    NavSection {
        title: "Academic",
        items: &[
            item("/admin/classes", "Classes", "school"),
            item("/admin/subjects", "Subjects", "menu_book"),
            item("/admin/courses", "Courses", "layers"),
        ],
    },
    NavSection {
        title: "Management",
        items: &[
            item("/admin/fees", "Fee Structure", "credit_card"),
            item("/admin/requests", "Requests", "assignment"),
            item("/admin/announcements", "Announcements", "notifications"),
        ],
    },
];

const FACULTY_NAV: &[NavSection] = &[
    NavSection {
        title: "Dashboard",
        items: &[root("/faculty")],
    },
    NavSection {
        title: "Academic",
        items: &[
            item("/faculty/classes", "My Classes", "school"),
            item("/faculty/students", "My Students", "group"),
            item("/faculty/attendance", "Attendance", "assignment"),
        ],
    },
    NavSection {
        title: "Exams",
        items: &[
            item("/faculty/exams", "Exams", "description"),
            item("/faculty/results", "Results", "fact_check"),
        ],
    },
    NavSection {
        title: "Communication",
        items: &[
            item("/faculty/announcements", "Announcements", "notifications"),
            item("/faculty/events", "Events", "calendar_month"),
        ],
    },
];

const STUDENT_NAV: &[NavSection] = &[
    NavSection {
        title: "Dashboard",
        items: &[root("/student")],
    },
    NavSection {
        title: "Academic",
        items: &[
            item("/student/attendance", "My Attendance", "assignment"),
            item("/student/results", "My Results", "fact_check"),
        ],
    },
    NavSection {
        title: "Services",
        items: &[
            item("/student/payments", "Payments", "credit_card"),
            item("/student/books", "Library", "menu_book"),
            item("/student/requests", "My Requests", "description"),
        ],
    },
    NavSection {
        title: "Updates",
        items: &[
            item("/student/announcements", "Announcements", "notifications"),
            item("/student/events", "Events", "calendar_month"),
        ],
    },
    NavSection {
        title: "Account",
        items: &[item("/student/profile", "My Profile", "person")],
    },
];

const LIBRARIAN_NAV: &[NavSection] = &[
    NavSection {
        title: "Dashboard",
        items: &[root("/librarian")],
    },
    NavSection {
        title: "Library",
        items: &[
            item("/librarian/books", "Books", "menu_book"),
            item("/librarian/requests", "Book Requests", "assignment"),
            item("/librarian/issues", "Issued Books", "fact_check"),
            item("/librarian/overdue", "Overdue", "schedule"),
        ],
    },
];

/// Finds the navigation entry for `path` within the role's sections.
#[must_use]
pub fn find_nav_item(role: &Role, path: &str) -> Option<&'static NavItem> {
    let path = path.trim_end_matches('/');
    role.nav_sections()
        .iter()
        .flat_map(|section| section.items.iter())
        .find(|item| item.path == path)
}

/// Upper-cased first letters of the given names, e.g. `("ada", "lovelace")` → `AL`.
#[must_use]
pub fn initials(first_name: Option<&str>, last_name: Option<&str>) -> String {
    [first_name, last_name]
        .into_iter()
        .filter_map(|name| name.and_then(|value| value.trim().chars().next()))
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_land_on_their_dashboards() {
        assert_eq!(landing_route(Some(&Role::Admin), false), "/admin");
        assert_eq!(landing_route(Some(&Role::Faculty), false), "/faculty");
        assert_eq!(landing_route(Some(&Role::Student), false), "/student");
        assert_eq!(landing_route(Some(&Role::Librarian), false), "/librarian");
    }

    #[test]
    fn unknown_or_missing_roles_use_fallback() {
        for raw in ["PARENT", "", "guest", "SUPERUSER"] {
            let role = Role::from(raw);
            assert_eq!(landing_route(Some(&role), false), FALLBACK_ROUTE);
        }
        assert_eq!(landing_route(None, false), FALLBACK_ROUTE);
    }

    #[test]
    fn pending_password_change_overrides_role() {
        for role in Role::KNOWN {
            assert_eq!(landing_route(Some(&role), true), CHANGE_PASSWORD_ROUTE);
        }
        assert_eq!(landing_route(None, true), CHANGE_PASSWORD_ROUTE);
    }

    #[test]
    fn role_serializes_as_upper_case_string() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Role::Librarian)?, r#""LIBRARIAN""#);
        let parsed: Role = serde_json::from_str(r#""faculty""#)?;
        assert_eq!(parsed, Role::Faculty);
        let unknown: Role = serde_json::from_str(r#""PARENT""#)?;
        assert_eq!(unknown, Role::Unknown("PARENT".to_string()));
        assert_eq!(serde_json::to_string(&unknown)?, r#""PARENT""#);
        Ok(())
    }

    #[test]
    fn role_set_membership() {
        let set = RoleSet::from([Role::Admin, Role::Librarian]);
        assert!(set.contains(&Role::Admin));
        assert!(!set.contains(&Role::Student));
        assert!(RoleSet::from(Role::Student).contains(&Role::Student));
        assert!(RoleSet::default().is_empty());
    }

    #[test]
    fn every_known_role_has_a_dashboard_entry() {
        for role in Role::KNOWN {
            let home = role.home_route().unwrap_or_default();
            let entry = find_nav_item(&role, home);
            assert!(entry.is_some_and(|item| item.exact), "{role} has no root entry");
        }
        assert!(Role::Unknown("X".into()).nav_sections().is_empty());
    }

    #[test]
    fn find_nav_item_ignores_trailing_slash() {
        let entry = find_nav_item(&Role::Librarian, "/librarian/overdue/");
        assert_eq!(entry.map(|item| item.label), Some("Overdue"));
        assert!(find_nav_item(&Role::Student, "/admin/fees").is_none());
    }

    #[test]
    fn initials_skip_missing_names() {
        assert_eq!(initials(Some("ada"), Some("lovelace")), "AL");
        assert_eq!(initials(Some(" grace"), None), "G");
        assert_eq!(initials(None, Some("")), "");
    }
}
