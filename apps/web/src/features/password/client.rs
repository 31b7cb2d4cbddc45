use crate::app_lib::{AppError, post_json};
use serde::{Deserialize, Serialize};

const CHANGE_PATH: &str = "/api/password/change";
const RESET_REQUEST_PATH: &str = "/api/password/reset/request";
const RESET_CONFIRM_PATH: &str = "/api/password/reset/confirm";

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetConfirmRequest {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Serialize)]
struct ResetRequest<'a> {
    email: &'a str,
}

/// `{ success, message }` envelope returned by the password endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PasswordResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl PasswordResponse {
    /// `Ok` when the server reports success, else its message or `fallback`.
    pub fn into_result(self, fallback: &str) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()))
        }
    }
}

pub async fn change_password(request: &ChangePasswordRequest) -> Result<PasswordResponse, AppError> {
    post_json(CHANGE_PATH, request).await
}

/// Asks for a reset link. Callers report success whatever the outcome so the
/// page does not reveal which addresses have accounts.
pub async fn request_reset(email: &str) -> Result<(), AppError> {
    post_json::<_, serde_json::Value>(RESET_REQUEST_PATH, &ResetRequest { email })
        .await
        .map(|_| ())
}

pub async fn confirm_reset(request: &ResetConfirmRequest) -> Result<PasswordResponse, AppError> {
    post_json(RESET_CONFIRM_PATH, request).await
}
