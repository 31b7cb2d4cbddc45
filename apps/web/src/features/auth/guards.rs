use crate::components::layout::AppShell;
use crate::components::FullPageSpinner;
use crate::features::auth::state::use_auth;
use crate::routes::AccessDeniedPage;
use leptos::prelude::*;
use leptos_router::{
    NavigateOptions,
    components::Outlet,
    hooks::{use_location, use_navigate},
};
use session_core::{GuardDecision, Role, evaluate, login_redirect_path};

/// Parent route view that only renders its children for a signed-in user
/// whose role is in `allowed`. An empty `allowed` admits any signed-in user.
/// UX-only gate; the API authorizes every call again.
#[component]
pub fn RoleGate(
    #[prop(optional)] allowed: &'static [Role],
    /// Render children without the sidebar shell.
    #[prop(optional)]
    bare: bool,
) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| {
        let pathname = location.pathname.get();
        auth.session
            .with(|state| evaluate(state, allowed, &pathname))
    });

    Effect::new(move |_| {
        if let GuardDecision::RedirectToLogin { from } = decision.get() {
            tracing::debug!(from = %from, "no session, redirecting to login");
            navigate(
                &login_redirect_path(&from),
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    move || match decision.get() {
        GuardDecision::Pending => view! { <FullPageSpinner /> }.into_any(),
        GuardDecision::RedirectToLogin { .. } => ().into_any(),
        GuardDecision::Denied { role } => view! { <AccessDeniedPage role=role /> }.into_any(),
        GuardDecision::Allow if bare => view! { <Outlet /> }.into_any(),
        GuardDecision::Allow => {
            view! {
                <AppShell>
                    <Outlet />
                </AppShell>
            }
            .into_any()
        }
    }
}
