//! HTTP helpers for the JSON API with a fixed timeout and uniform error
//! mapping. The stored session token is attached as a bearer header to every
//! request except the anonymous auth and reset endpoints. A 401 on an
//! authenticated request hands the session to the registered
//! [`on_unauthorized`] handler and sends the browser to the login page.

use super::{config::AppConfig, errors::AppError, storage::BrowserStore};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::to_string;
use std::{cell::RefCell, rc::Rc};
use session_core::{
    SessionStore, TOKEN_KEY, message_from_body, request_policy::bearer_header,
    roles::LOGIN_ROUTE,
};
use tracing::{debug, warn};
use web_sys::AbortController;

/// Request timeout (milliseconds) applied to every API call.
const DEFAULT_TIMEOUT_MS: u32 = 30_000;

thread_local! {
    static ON_UNAUTHORIZED: RefCell<Option<Rc<dyn Fn()>>> = const { RefCell::new(None) };
}

/// Registers the callback that ends the session when the API rejects the
/// stored token. The auth provider installs one backed by the session manager.
pub fn on_unauthorized(handler: impl Fn() + 'static) {
    ON_UNAUTHORIZED.with(|slot| *slot.borrow_mut() = Some(Rc::new(handler)));
}

/// Posts a JSON body and parses a JSON response.
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, AppError> {
    let payload = to_string(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
    let response = send(path, move |builder| {
        builder
            .header("Content-Type", "application/json")
            .body(payload)
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_json_response(response).await
}

/// Posts without a body and ignores the response body.
pub async fn post_empty(path: &str) -> Result<(), AppError> {
    let response = send(path, |builder| {
        builder
            .build()
            .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
    })
    .await?;

    handle_empty_response(response).await
}

/// Builds the POST for `path`, attaches the bearer header when the policy
/// allows it and handles an expired session.
async fn send(
    path: &str,
    finish: impl FnOnce(RequestBuilder) -> Result<Request, AppError>,
) -> Result<Response, AppError> {
    let url = build_url(path);
    let authorization = bearer_header(path, stored_token().as_deref());
    let authenticated = authorization.is_some();

    let response = send_with_timeout(move |signal| {
        let mut builder = Request::post(&url).abort_signal(Some(signal));
        if let Some(value) = authorization.as_deref() {
            builder = builder.header("Authorization", value);
        }
        finish(builder)
    })
    .await?;

    debug!(path, status = response.status(), "api response");
    if authenticated && response.status() == 401 {
        end_expired_session();
    }
    Ok(response)
}

fn stored_token() -> Option<String> {
    SessionStore::new(BrowserStore).load::<String>(TOKEN_KEY).ok()
}

/// Ends the session through the registered handler and leaves for the login
/// page unless already there. Without a handler no session manager exists, so
/// only the stored pair needs clearing.
fn end_expired_session() {
    let handler = ON_UNAUTHORIZED.with(|slot| slot.borrow().clone());
    match handler {
        Some(handler) => handler(),
        None => {
            warn!("session rejected by the API, clearing stored session");
            SessionStore::new(BrowserStore).clear_session();
        }
    }

    let Some(location) = web_sys::window().map(|window| window.location()) else {
        return;
    };
    let on_login = location
        .pathname()
        .is_ok_and(|pathname| pathname == LOGIN_ROUTE);
    if !on_login && location.set_href(LOGIN_ROUTE).is_err() {
        warn!("could not redirect to the login page");
    }
}

/// Builds a URL from the configured API base URL and the provided path.
fn build_url(path: &str) -> String {
    let config = AppConfig::load();
    build_url_with_base(&config.api_base_url, path)
}

fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps network errors into user-facing `AppError` variants with timeout detection.
fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Sends a request with an abort timeout to avoid hanging UI state.
async fn send_with_timeout(
    build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<Request, AppError>,
) -> Result<Response, AppError> {
    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request.send().await.map_err(map_request_error)
}

async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.ok() {
        Ok(())
    } else {
        Err(http_error(response).await)
    }
}

async fn http_error(response: Response) -> AppError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: message_from_body(&body),
    }
}
