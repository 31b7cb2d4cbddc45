mod access_denied;
mod change_password;
mod dashboard;
mod forgot_password;
mod login;
mod not_found;
mod register;
mod reset_password;

pub(crate) use access_denied::AccessDeniedPage;
pub(crate) use change_password::ChangePasswordPage;
pub(crate) use dashboard::{DashboardPage, ModulePage};
pub(crate) use forgot_password::ForgotPasswordPage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::{NotFoundContent, NotFoundPage};
pub(crate) use register::RegisterPage;
pub(crate) use reset_password::ResetPasswordPage;

use crate::features::auth::RoleGate;
use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Redirect, Route, Routes};
use leptos_router::path;
use session_core::{Role, roles::LOGIN_ROUTE};

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const FACULTY_ONLY: &[Role] = &[Role::Faculty];
const STUDENT_ONLY: &[Role] = &[Role::Student];
const LIBRARIAN_ONLY: &[Role] = &[Role::Librarian];

/// Route table. Each role area is a parent route gated by [`RoleGate`]; its
/// index is the role dashboard and `:section` resolves against the role's
/// navigation table.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=|| view! { <Redirect path=LOGIN_ROUTE /> } />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/register") view=RegisterPage />
            <Route path=path!("/forgot-password") view=ForgotPasswordPage />
            <Route path=path!("/reset-password") view=ResetPasswordPage />
            <ParentRoute path=path!("/change-password") view=|| view! { <RoleGate bare=true /> }>
                <Route path=path!("") view=ChangePasswordPage />
            </ParentRoute>
            <ParentRoute path=path!("/admin") view=|| view! { <RoleGate allowed=ADMIN_ONLY /> }>
                <Route path=path!("") view=DashboardPage />
                <Route path=path!(":section") view=ModulePage />
            </ParentRoute>
            <ParentRoute path=path!("/faculty") view=|| view! { <RoleGate allowed=FACULTY_ONLY /> }>
                <Route path=path!("") view=DashboardPage />
                <Route path=path!(":section") view=ModulePage />
            </ParentRoute>
            <ParentRoute path=path!("/student") view=|| view! { <RoleGate allowed=STUDENT_ONLY /> }>
                <Route path=path!("") view=DashboardPage />
                <Route path=path!(":section") view=ModulePage />
            </ParentRoute>
            <ParentRoute
                path=path!("/librarian")
                view=|| view! { <RoleGate allowed=LIBRARIAN_ONLY /> }
            >
                <Route path=path!("") view=DashboardPage />
                <Route path=path!(":section") view=ModulePage />
            </ParentRoute>
        </Routes>
    }
}
