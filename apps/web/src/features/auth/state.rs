//! Auth context for the frontend. The provider owns the session manager,
//! restores any stored session once on mount and mirrors every manager state
//! change into a signal that guards and pages read.

use crate::app_lib::{api, storage::BrowserStore};
use crate::features::auth::client::HttpAuthApi;
use leptos::prelude::*;
use session_core::{
    AuthFailure, LoginOutcome, RegisterOutcome, RegisterRequest, RoleSet, SessionManager,
    SessionState, SystemClock,
};
use std::rc::Rc;

type Manager = SessionManager<HttpAuthApi, BrowserStore>;

const NO_PROVIDER: &str = "Sign-in is unavailable outside the auth provider";

/// Auth session context shared through Leptos.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: RwSignal<SessionState>,
    pub is_authenticated: Signal<bool>,
    pub is_loading: Signal<bool>,
    /// `None` only for the detached context handed out without a provider.
    manager: StoredValue<Option<Rc<Manager>>, LocalStorage>,
}

impl AuthContext {
    fn new(manager: Manager) -> Self {
        let session = RwSignal::new(manager.state());
        manager.subscribe(move |state| session.set(state.clone()));
        Self::with_manager(session, Some(Rc::new(manager)))
    }

    /// Signed-out context with no session manager behind it.
    fn detached() -> Self {
        let session = RwSignal::new(SessionState {
            loading: false,
            ..SessionState::default()
        });
        Self::with_manager(session, None)
    }

    fn with_manager(session: RwSignal<SessionState>, manager: Option<Rc<Manager>>) -> Self {
        Self {
            session,
            is_authenticated: Signal::derive(move || session.with(SessionState::is_authenticated)),
            is_loading: Signal::derive(move || session.with(|state| state.loading)),
            manager: StoredValue::new_local(manager),
        }
    }

    fn manager(&self) -> Option<Rc<Manager>> {
        self.manager.try_get_value().flatten()
    }

    fn restore(&self) -> bool {
        self.manager().is_some_and(|manager| manager.restore())
    }

    /// Signs in and returns where to go next.
    pub async fn login(self, email: String, password: String) -> Result<LoginOutcome, AuthFailure> {
        let manager = self.manager().ok_or_else(unavailable)?;
        manager.login(&email, &password).await
    }

    pub async fn register(self, request: RegisterRequest) -> Result<RegisterOutcome, AuthFailure> {
        let manager = self.manager().ok_or_else(unavailable)?;
        manager.register(&request).await
    }

    pub async fn logout(self) {
        if let Some(manager) = self.manager() {
            manager.logout().await;
        }
    }

    /// Ends a session the API has rejected, without a logout call.
    fn invalidate(&self) {
        if let Some(manager) = self.manager() {
            manager.invalidate();
        }
    }

    /// Reactive role check for the signed-in user.
    pub fn has_role(&self, roles: impl Into<RoleSet>) -> bool {
        let roles = roles.into();
        self.session
            .with(|state| state.role().is_some_and(|role| roles.contains(role)))
    }
}

/// Provides auth context and restores the stored session once on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new(SessionManager::new(HttpAuthApi, BrowserStore, SystemClock));
    provide_context(auth);
    api::on_unauthorized(move || auth.invalidate());

    if auth.restore() {
        tracing::debug!("resumed stored session");
    }

    view! { {children()} }
}

/// Returns the auth context installed by [`AuthProvider`], or a signed-out
/// context when there is none.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(AuthContext::detached)
}

fn unavailable() -> AuthFailure {
    AuthFailure {
        message: NO_PROVIDER.to_string(),
    }
}
