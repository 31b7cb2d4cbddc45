//! Auth API client for login, registration and logout.

use crate::app_lib::{post_empty, post_json};
use session_core::{ApiError, AuthApi, AuthResponse, LoginRequest, RegisterRequest};

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const LOGOUT_PATH: &str = "/api/auth/logout";

/// [`AuthApi`] over the JSON REST endpoints.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpAuthApi;

impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        Ok(post_json(LOGIN_PATH, request).await?)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        Ok(post_json(REGISTER_PATH, request).await?)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        Ok(post_empty(LOGOUT_PATH).await?)
    }
}
