//! Request, response and state types for the session lifecycle. Requests
//! carry passwords and responses carry tokens, so none of these values may be
//! logged whole.

use crate::roles::Role;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Profile of the signed-in user, persisted next to the token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub must_change_password: bool,
}

impl UserProfile {
    /// "First Last", or the email when no name is known.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Enrollment year for students, employee ID for staff.
    pub additional_id: String,
    pub department: Option<String>,
}

/// Body returned by the login and registration endpoints. Registration may
/// omit the token, in which case the user has to sign in separately.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub must_change_password: Option<bool>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
}

/// Runtime session state shared with views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    /// True while restoring at startup and while a login/registration call is
    /// in flight.
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
            error: None,
        }
    }
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().and_then(|user| user.role.as_ref())
    }

    pub(crate) fn signed_out() -> Self {
        Self {
            loading: false,
            ..Self::default()
        }
    }
}

/// Successful login (or registration that returned a token).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user: UserProfile,
    pub must_change_password: bool,
    pub redirect_to: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The server returned a token; the session is live.
    Authenticated(LoginOutcome),
    /// The account exists but the user has to sign in.
    PendingLogin { message: String },
}

/// Accepts a JSON string or number; anything else reads as absent.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(value)) => Some(value),
        Some(Value::Number(value)) => Some(value.to_string()),
        _ => None,
    })
}
