//! Per-navigation access decision. This is a UX gate only: every protected
//! API call is authorized again by the server.

use crate::{roles::Role, types::SessionState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Restore has not finished; show a neutral loading state.
    Pending,
    /// No session. `from` is the location that was requested.
    RedirectToLogin { from: String },
    /// Signed in, but the role is not allowed here. Rendered in place.
    Denied { role: Option<Role> },
    Allow,
}

/// Decides what to render for `location` given the session and the roles the
/// view accepts. An empty `allowed_roles` admits any signed-in user.
#[must_use]
pub fn evaluate(state: &SessionState, allowed_roles: &[Role], location: &str) -> GuardDecision {
    if state.loading && !state.is_authenticated() {
        return GuardDecision::Pending;
    }

    if !state.is_authenticated() {
        return GuardDecision::RedirectToLogin {
            from: location.to_string(),
        };
    }

    let role = state.role();
    if !allowed_roles.is_empty() && !role.is_some_and(|role| allowed_roles.contains(role)) {
        return GuardDecision::Denied {
            role: role.cloned(),
        };
    }

    GuardDecision::Allow
}

/// Login path carrying the originally requested location.
#[must_use]
pub fn login_redirect_path(from: &str) -> String {
    let from = from.trim();
    if from.is_empty() || from == "/" {
        return crate::roles::LOGIN_ROUTE.to_string();
    }
    let encoded: String = from
        .bytes()
        .map(|byte| match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                char::from(byte).to_string()
            }
            other => format!("%{other:02X}"),
        })
        .collect();
    format!("{}?from={encoded}", crate::roles::LOGIN_ROUTE)
}
