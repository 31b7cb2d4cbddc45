//! Session lifecycle: restore on startup, login, registration and logout.
//!
//! States move `restoring → {unauthenticated, authenticated}` and
//! `authenticated → unauthenticated`. The manager is the only writer of the
//! stored session pair and of [`SessionState`]; views observe it through
//! [`SessionManager::subscribe`]. Overlapping calls are not serialized: if a
//! second login starts before the first resolves, the last one to finish wins.

use crate::{
    clock::{Clock, SystemClock},
    error::{ApiError, AuthFailure},
    roles::{CHANGE_PASSWORD_ROUTE, FALLBACK_ROUTE, LOGIN_ROUTE, RoleSet},
    store::{KeyValueStore, Loaded, SessionStore},
    token::decode_claims,
    types::{
        AuthResponse, LoginOutcome, LoginRequest, RegisterOutcome, RegisterRequest, SessionState,
        UserProfile,
    },
};
use std::{cell::RefCell, rc::Rc};
use tracing::{debug, info, warn};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const REGISTERED_PLEASE_LOGIN: &str = "Registration successful. Please login.";
const MISSING_TOKEN: &str = "Login response did not include a token";

/// Remote authentication endpoints.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// # Errors
    /// Returns an error when the request fails or credentials are rejected.
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// # Errors
    /// Returns an error when the request fails or the server rejects the input.
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    /// # Errors
    /// Returns an error when the server could not be reached; callers ignore it.
    async fn logout(&self) -> Result<(), ApiError>;
}

type Listener = Rc<dyn Fn(&SessionState)>;

pub struct SessionManager<A, S, C = SystemClock> {
    api: A,
    store: SessionStore<S>,
    clock: C,
    state: RefCell<SessionState>,
    listeners: RefCell<Vec<Listener>>,
}

impl<A, S, C> SessionManager<A, S, C>
where
    A: AuthApi,
    S: KeyValueStore,
    C: Clock,
{
    /// Builds a manager in the `restoring` state. Call [`Self::restore`] once.
    pub fn new(api: A, backend: S, clock: C) -> Self {
        Self {
            api,
            store: SessionStore::new(backend),
            clock,
            state: RefCell::new(SessionState::default()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Registers a callback invoked with the new state after every change.
    /// A listener may subscribe further listeners; they are called from the
    /// next change on.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    /// Whether the signed-in user's role is one of `roles`.
    pub fn has_role(&self, roles: impl Into<RoleSet>) -> bool {
        let roles = roles.into();
        self.state
            .borrow()
            .role()
            .is_some_and(|role| roles.contains(role))
    }

    /// Adopts the stored session if the token is still live, otherwise purges
    /// whatever was stored. Returns whether a session was restored.
    pub fn restore(&self) -> bool {
        let restored = match self.store.load_session() {
            (Loaded::Value(token), Loaded::Value(user)) => match decode_claims(&token) {
                Ok(claims) if claims.is_live(self.clock.now_millis()) => Some((token, user)),
                Ok(_) => {
                    warn!("stored session expired, clearing");
                    None
                }
                Err(err) => {
                    warn!(error = %err, "stored token is unreadable, clearing");
                    None
                }
            },
            (Loaded::Empty, Loaded::Empty) => {
                debug!("no stored session");
                None
            }
            _ => {
                warn!("stored session is incomplete or corrupt, clearing");
                None
            }
        };

        if let Some((token, user)) = restored {
            info!(user_id = ?user.id, role = ?user.role, "session restored from storage");
            self.update(|state| {
                state.token = Some(token);
                state.user = Some(user);
                state.loading = false;
                state.error = None;
            });
            true
        } else {
            self.store.clear_session();
            self.update(|state| *state = SessionState::signed_out());
            false
        }
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthFailure`] with a user-facing message when the request
    /// fails or the credentials are rejected. The stored session is untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthFailure> {
        self.begin();
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let result = match self.api.login(&request).await {
            Ok(response) => self.establish(response, &request.email, FALLBACK_ROUTE),
            Err(err) => Err(AuthFailure::from_api(&err, LOGIN_FAILED)),
        };
        self.finish(result, "login")
    }

    /// Creates an account. Signs the user in when the server returns a token.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthFailure`] with a user-facing message when the request
    /// fails or the server rejects the registration.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterOutcome, AuthFailure> {
        self.begin();

        let result = match self.api.register(request).await {
            Ok(response) if response.token.is_some() => self
                .establish(response, &request.email, LOGIN_ROUTE)
                .map(RegisterOutcome::Authenticated),
            Ok(_) => {
                info!("registration accepted without a session");
                Ok(RegisterOutcome::PendingLogin {
                    message: REGISTERED_PLEASE_LOGIN.to_string(),
                })
            }
            Err(err) => Err(AuthFailure::from_api(&err, REGISTRATION_FAILED)),
        };
        self.finish(result, "registration")
    }

    /// Ends the session. The server call is best-effort; the local session is
    /// always cleared so a failed call never leaves the client signed in.
    pub async fn logout(&self) {
        if let Err(err) = self.api.logout().await {
            warn!(error = %err, "logout request failed, clearing local session anyway");
        }
        self.store.clear_session();
        self.update(|state| *state = SessionState::signed_out());
        info!("signed out");
    }

    /// Drops the session without calling the server, for a token the API
    /// has already rejected.
    pub fn invalidate(&self) {
        self.store.clear_session();
        self.update(|state| *state = SessionState::signed_out());
        warn!("session rejected by the server, signed out");
    }

    fn begin(&self) {
        self.update(|state| {
            state.loading = true;
            state.error = None;
        });
    }

    fn finish<T>(&self, result: Result<T, AuthFailure>, action: &str) -> Result<T, AuthFailure> {
        match &result {
            Ok(_) => self.update(|state| state.loading = false),
            Err(failure) => {
                warn!(action, error = %failure, "authentication request failed");
                let message = failure.message.clone();
                self.update(|state| {
                    state.loading = false;
                    state.error = Some(message);
                });
            }
        }
        result
    }

    /// Builds the profile from a token-bearing response, persists the pair and
    /// marks the session authenticated.
    fn establish(
        &self,
        response: AuthResponse,
        fallback_email: &str,
        fallback_route: &'static str,
    ) -> Result<LoginOutcome, AuthFailure> {
        let AuthResponse {
            token,
            must_change_password,
            email,
            role,
            first_name,
            last_name,
            id,
        } = response;

        let Some(token) = token.filter(|token| !token.trim().is_empty()) else {
            return Err(AuthFailure {
                message: MISSING_TOKEN.to_string(),
            });
        };

        // Only consulted to fill gaps in the response; never trusted for access.
        let claims = match decode_claims(&token) {
            Ok(claims) => Some(claims),
            Err(err) => {
                warn!(error = %err, "could not decode token claims");
                None
            }
        };
        let (claim_role, claim_subject) = claims
            .map(|claims| (claims.role, claims.sub))
            .unwrap_or_default();

        let must_change_password = must_change_password.unwrap_or(false);
        let user = UserProfile {
            id: id.or(claim_subject),
            email: email
                .filter(|email| !email.trim().is_empty())
                .unwrap_or_else(|| fallback_email.to_string()),
            role: role.or(claim_role),
            first_name,
            last_name,
            must_change_password,
        };

        if let Err(err) = self.store.save_session(&token, &user) {
            warn!(error = %err, "session could not be persisted; it will not survive a reload");
        }

        let redirect_to = if must_change_password {
            CHANGE_PASSWORD_ROUTE
        } else {
            user.role
                .as_ref()
                .and_then(|role| role.home_route())
                .unwrap_or(fallback_route)
        };

        info!(user_id = ?user.id, role = ?user.role, must_change_password, "signed in");
        let profile = user.clone();
        self.update(|state| {
            state.token = Some(token);
            state.user = Some(profile);
            state.error = None;
        });

        Ok(LoginOutcome {
            user,
            must_change_password,
            redirect_to,
        })
    }

    fn update(&self, change: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            change(&mut state);
            state.clone()
        };
        let listeners = self.listeners.borrow().clone();
        for listener in &listeners {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::FixedClock,
        roles::Role,
        store::{MemoryStore, TOKEN_KEY, USER_KEY},
        token::test_tokens::token_with,
    };
    use serde_json::json;
    use std::{cell::Cell, rc::Rc};

    const NOW_MS: i64 = 1_750_000_000_000;
    const NOW_S: i64 = NOW_MS / 1000;

    #[derive(Default)]
    struct ScriptedApi {
        login: RefCell<Option<Result<AuthResponse, ApiError>>>,
        register: RefCell<Option<Result<AuthResponse, ApiError>>>,
        logout_fails: bool,
        logout_calls: Cell<u32>,
    }

    impl AuthApi for ScriptedApi {
        async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, ApiError> {
            self.login
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".into())))
        }

        async fn register(&self, _request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
            self.register
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".into())))
        }

        async fn logout(&self) -> Result<(), ApiError> {
            self.logout_calls.set(self.logout_calls.get() + 1);
            if self.logout_fails {
                Err(ApiError::Transport("Network Error".into()))
            } else {
                Ok(())
            }
        }
    }

    fn manager(api: ScriptedApi) -> (SessionManager<ScriptedApi, MemoryStore, FixedClock>, MemoryStore) {
        let backend = MemoryStore::new();
        (
            SessionManager::new(api, backend.clone(), FixedClock(NOW_MS)),
            backend,
        )
    }

    fn live_token(role: &str, sub: &str) -> String {
        token_with(&json!({ "sub": sub, "role": role, "exp": NOW_S + 3600 }))
    }

    #[tokio::test]
    async fn login_backfills_role_and_id_from_claims() {
        let api = ScriptedApi {
            login: RefCell::new(Some(Ok(AuthResponse {
                token: Some(live_token("LIBRARIAN", "88")),
                first_name: Some("Nia".into()),
                ..AuthResponse::default()
            }))),
            ..ScriptedApi::default()
        };
        let (manager, backend) = manager(api);
        manager.restore();

        let outcome = manager.login(" nia@sms.edu.in ", "secret1").await;
        let outcome = outcome.unwrap_or_else(|err| panic!("login failed: {err}"));

        assert_eq!(outcome.user.role, Some(Role::Librarian));
        assert_eq!(outcome.user.id.as_deref(), Some("88"));
        assert_eq!(outcome.user.email, "nia@sms.edu.in");
        assert_eq!(outcome.redirect_to, "/librarian");
        assert!(backend.contains(TOKEN_KEY) && backend.contains(USER_KEY));
        assert!(manager.has_role(Role::Librarian));
    }

    #[tokio::test]
    async fn server_fields_win_over_claims() {
        let api = ScriptedApi {
            login: RefCell::new(Some(Ok(AuthResponse {
                token: Some(live_token("STUDENT", "1")),
                role: Some(Role::Admin),
                id: Some("900".into()),
                email: Some("root@sms.edu.in".into()),
                ..AuthResponse::default()
            }))),
            ..ScriptedApi::default()
        };
        let (manager, _) = manager(api);

        let outcome = manager.login("typed@sms.edu.in", "secret1").await;
        let user = outcome.map(|outcome| outcome.user).ok();
        assert_eq!(user.as_ref().and_then(|u| u.role.clone()), Some(Role::Admin));
        assert_eq!(user.as_ref().and_then(|u| u.id.clone()).as_deref(), Some("900"));
        assert_eq!(user.map(|u| u.email).as_deref(), Some("root@sms.edu.in"));
    }

    #[tokio::test]
    async fn undecodable_token_still_signs_in_without_backfill() {
        let api = ScriptedApi {
            login: RefCell::new(Some(Ok(AuthResponse {
                token: Some("opaque-session-handle".into()),
                ..AuthResponse::default()
            }))),
            ..ScriptedApi::default()
        };
        let (manager, _) = manager(api);

        let outcome = manager.login("a@sms.edu.in", "secret1").await;
        assert_eq!(outcome.map(|o| o.redirect_to).ok(), Some(FALLBACK_ROUTE));
        assert!(manager.is_authenticated());
    }

    #[tokio::test]
    async fn failed_login_keeps_existing_session() {
        let api = ScriptedApi {
            login: RefCell::new(Some(Err(ApiError::Rejected {
                status: 401,
                message: Some("Invalid credentials".into()),
            }))),
            ..ScriptedApi::default()
        };
        let (manager, backend) = manager(api);
        let store = SessionStore::new(backend.clone());
        let existing = UserProfile {
            id: Some("5".into()),
            email: "old@sms.edu.in".into(),
            role: Some(Role::Faculty),
            first_name: None,
            last_name: None,
            must_change_password: false,
        };
        let token = live_token("FACULTY", "5");
        assert!(store.save_session(&token, &existing).is_ok());
        assert!(manager.restore());

        let failure = manager.login("old@sms.edu.in", "wrong").await.err();
        assert_eq!(failure.map(|f| f.message).as_deref(), Some("Invalid credentials"));
        assert_eq!(backend.raw(TOKEN_KEY), Some(serde_json::json!(token).to_string()));
        let state = manager.state();
        assert!(state.is_authenticated());
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn response_without_token_is_a_login_failure() {
        let api = ScriptedApi {
            login: RefCell::new(Some(Ok(AuthResponse::default()))),
            ..ScriptedApi::default()
        };
        let (manager, backend) = manager(api);

        let failure = manager.login("a@sms.edu.in", "secret1").await.err();
        assert_eq!(failure.map(|f| f.message).as_deref(), Some(MISSING_TOKEN));
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn transport_error_text_is_surfaced() {
        let (manager, _) = manager(ScriptedApi::default());
        let failure = manager.login("a@sms.edu.in", "secret1").await.err();
        assert_eq!(failure.map(|f| f.message).as_deref(), Some("no scripted reply"));
    }

    #[tokio::test]
    async fn register_without_token_does_not_authenticate() {
        let api = ScriptedApi {
            register: RefCell::new(Some(Ok(AuthResponse {
                email: Some("new@sms.edu.in".into()),
                ..AuthResponse::default()
            }))),
            ..ScriptedApi::default()
        };
        let (manager, backend) = manager(api);
        manager.restore();

        let outcome = manager.register(&register_request(Role::Student)).await;
        assert_eq!(
            outcome.ok(),
            Some(RegisterOutcome::PendingLogin {
                message: REGISTERED_PLEASE_LOGIN.to_string()
            })
        );
        assert!(!manager.is_authenticated());
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn register_with_token_signs_in() {
        let api = ScriptedApi {
            register: RefCell::new(Some(Ok(AuthResponse {
                token: Some(live_token("STUDENT", "31")),
                role: Some(Role::Student),
                ..AuthResponse::default()
            }))),
            ..ScriptedApi::default()
        };
        let (manager, backend) = manager(api);

        let outcome = manager.register(&register_request(Role::Student)).await;
        let Ok(RegisterOutcome::Authenticated(login)) = outcome else {
            panic!("expected an authenticated registration");
        };
        assert_eq!(login.redirect_to, "/student");
        assert_eq!(login.user.email, "asha.rao.2024@sms.edu.in");
        assert!(backend.contains(TOKEN_KEY));
        assert!(manager.is_authenticated());
    }

    #[tokio::test]
    async fn register_with_token_and_unknown_role_lands_on_login() {
        let api = ScriptedApi {
            register: RefCell::new(Some(Ok(AuthResponse {
                token: Some(token_with(&json!({ "exp": NOW_S + 60 }))),
                ..AuthResponse::default()
            }))),
            ..ScriptedApi::default()
        };
        let (manager, _) = manager(api);

        let outcome = manager.register(&register_request(Role::Student)).await;
        let Ok(RegisterOutcome::Authenticated(login)) = outcome else {
            panic!("expected an authenticated registration");
        };
        assert_eq!(login.redirect_to, LOGIN_ROUTE);
    }

    #[tokio::test]
    async fn register_failure_uses_fallback_message() {
        let api = ScriptedApi {
            register: RefCell::new(Some(Err(ApiError::Transport(String::new())))),
            ..ScriptedApi::default()
        };
        let (manager, _) = manager(api);

        let failure = manager.register(&register_request(Role::Faculty)).await.err();
        assert_eq!(failure.map(|f| f.message).as_deref(), Some(REGISTRATION_FAILED));
    }

    #[tokio::test]
    async fn logout_clears_even_when_server_call_fails() {
        let api = ScriptedApi {
            login: RefCell::new(Some(Ok(AuthResponse {
                token: Some(live_token("ADMIN", "1")),
                ..AuthResponse::default()
            }))),
            logout_fails: true,
            ..ScriptedApi::default()
        };
        let (manager, backend) = manager(api);
        assert!(manager.login("root@sms.edu.in", "secret1").await.is_ok());

        manager.logout().await;
        assert!(!manager.is_authenticated());
        assert!(backend.is_empty());
        assert_eq!(manager.api.logout_calls.get(), 1);
    }

    #[test]
    fn restore_with_only_half_a_session_purges_it() {
        let (manager, backend) = manager(ScriptedApi::default());
        let store = SessionStore::new(backend.clone());
        assert!(store.save(TOKEN_KEY, &live_token("ADMIN", "1")).is_ok());

        assert!(!manager.restore());
        assert!(backend.is_empty());
        assert!(!manager.state().loading);
    }

    #[test]
    fn restore_with_corrupt_profile_purges_both() -> Result<(), crate::StorageError> {
        let (manager, backend) = manager(ScriptedApi::default());
        backend.set(TOKEN_KEY, &serde_json::json!(live_token("ADMIN", "1")).to_string())?;
        backend.set(USER_KEY, "{\"email\":")?;

        assert!(!manager.restore());
        assert!(backend.is_empty());
        Ok(())
    }

    #[test]
    fn listeners_observe_every_transition() {
        let (manager, _) = manager(ScriptedApi::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        manager.subscribe(move |state| sink.borrow_mut().push(state.loading));

        manager.restore();
        assert_eq!(*seen.borrow(), vec![false]);
    }

    #[test]
    fn restore_with_undecodable_token_purges_both() {
        let (manager, backend) = manager(ScriptedApi::default());
        let store = SessionStore::new(backend.clone());
        assert!(store.save_session("not-a-jwt", &stored_profile()).is_ok());

        assert!(!manager.restore());
        assert!(!backend.contains(TOKEN_KEY));
        assert!(!backend.contains(USER_KEY));
        let state = manager.state();
        assert!(!state.is_authenticated());
        assert!(!state.loading);
    }

    #[test]
    fn restore_with_token_lacking_expiry_purges_both() {
        let (manager, backend) = manager(ScriptedApi::default());
        let store = SessionStore::new(backend.clone());
        let token = token_with(&json!({ "sub": "5", "role": "FACULTY" }));
        assert!(store.save_session(&token, &stored_profile()).is_ok());

        assert!(!manager.restore());
        assert!(!backend.contains(TOKEN_KEY));
        assert!(!backend.contains(USER_KEY));
        assert!(!manager.state().loading);
    }

    #[test]
    fn restore_keeps_live_token_with_loosely_typed_claims() {
        let (manager, backend) = manager(ScriptedApi::default());
        let store = SessionStore::new(backend.clone());
        let token = token_with(&json!({
            "sub": 5,
            "role": ["FACULTY"],
            "exp": NOW_S as f64 + 0.5,
        }));
        assert!(store.save_session(&token, &stored_profile()).is_ok());

        assert!(manager.restore());
        assert!(backend.contains(TOKEN_KEY));
        assert!(manager.has_role(Role::Faculty));
    }

    #[tokio::test]
    async fn invalidate_signs_out_without_calling_the_server() {
        let api = ScriptedApi {
            login: RefCell::new(Some(Ok(AuthResponse {
                token: Some(live_token("STUDENT", "3")),
                ..AuthResponse::default()
            }))),
            ..ScriptedApi::default()
        };
        let (manager, backend) = manager(api);
        assert!(manager.login("s@sms.edu.in", "secret1").await.is_ok());

        manager.invalidate();
        assert!(!manager.is_authenticated());
        assert!(backend.is_empty());
        assert_eq!(manager.api.logout_calls.get(), 0);
    }

    #[test]
    fn listener_may_subscribe_while_notified() {
        let (manager, _) = manager(ScriptedApi::default());
        let manager = Rc::new(manager);
        let late_calls = Rc::new(Cell::new(0));
        let subscribed = Rc::new(Cell::new(false));

        let weak = Rc::downgrade(&manager);
        let counter = Rc::clone(&late_calls);
        manager.subscribe(move |_| {
            if subscribed.replace(true) {
                return;
            }
            if let Some(manager) = weak.upgrade() {
                let counter = Rc::clone(&counter);
                manager.subscribe(move |_| counter.set(counter.get() + 1));
            }
        });

        manager.restore();
        assert_eq!(late_calls.get(), 0);
        manager.invalidate();
        assert_eq!(late_calls.get(), 1);
    }

    fn stored_profile() -> UserProfile {
        UserProfile {
            id: Some("5".into()),
            email: "old@sms.edu.in".into(),
            role: Some(Role::Faculty),
            first_name: None,
            last_name: None,
            must_change_password: false,
        }
    }

    #[test]
    fn has_role_is_false_when_signed_out() {
        let (manager, _) = manager(ScriptedApi::default());
        manager.restore();
        assert!(!manager.has_role(Role::KNOWN));
    }

    fn register_request(role: Role) -> RegisterRequest {
        RegisterRequest {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            email: "asha.rao.2024@sms.edu.in".into(),
            password: "longenough".into(),
            role,
            additional_id: "2024".into(),
            department: None,
        }
    }
}
