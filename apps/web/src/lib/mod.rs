//! Shared frontend utilities for API access, configuration, errors, logging
//! and build metadata.
//!
//! ## Session flow
//!
//! 1. **Restore:** On mount the auth provider reads `sms_token`/`sms_user` from
//!    `localStorage` and keeps them only if the token's `exp` is in the future.
//! 2. **Login:** `POST /api/auth/login` returns the token and profile fields.
//!    Both are stored together and the user lands on the role dashboard, or on
//!    `/change-password` when the server demands a new password.
//! 3. **Requests:** API helpers attach `Authorization: Bearer <token>` except
//!    on the anonymous auth and password-reset endpoints. A `401` clears the
//!    stored session and sends the browser back to `/login`.
//! 4. **Logout:** `POST /api/auth/logout` is best-effort; local state is
//!    always cleared.
//!
//! Centralizing these helpers keeps network behavior consistent. Callers must
//! never log tokens or passwords.

#[cfg(target_arch = "wasm32")]
pub(crate) mod api;
pub(crate) mod build_info;
pub(crate) mod config;
pub(crate) mod errors;
#[cfg(target_arch = "wasm32")]
pub(crate) mod logging;
#[cfg(target_arch = "wasm32")]
pub(crate) mod storage;
pub(crate) mod theme;

#[cfg(target_arch = "wasm32")]
pub(crate) use api::{post_empty, post_json};
pub(crate) use errors::AppError;
