//! Layout components shared across routes.

mod app_shell;
mod auth_card;
mod sidebar;

pub(crate) use app_shell::AppShell;
pub(crate) use auth_card::AuthCard;
pub(crate) use sidebar::Sidebar;
