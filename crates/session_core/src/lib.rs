//! Session core for the SMS web client: token claims decoding, paired
//! token/profile persistence, the login/register/logout/restore lifecycle and
//! the route access decision. Everything here is platform independent; the
//! web app supplies the HTTP client and the browser storage backend.
//!
//! Nothing in this crate verifies token signatures. Access decisions made
//! here are for navigation only and the API remains the authority.

mod clock;
mod error;
pub mod forms;
mod guard;
mod manager;
pub mod request_policy;
pub mod roles;
mod store;
pub mod theme;
mod token;
mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ApiError, AuthFailure, StorageError, TokenError, message_from_body};
pub use guard::{GuardDecision, evaluate, login_redirect_path};
pub use manager::{AuthApi, SessionManager};
pub use roles::{Role, RoleSet, landing_route};
pub use store::{
    APP_KEYS, KeyValueStore, Loaded, MemoryStore, SessionStore, THEME_KEY, TOKEN_KEY, USER_KEY,
};
pub use token::{Claims, decode_claims};
pub use types::{
    AuthResponse, LoginOutcome, LoginRequest, RegisterOutcome, RegisterRequest, SessionState,
    UserProfile,
};
