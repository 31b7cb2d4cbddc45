//! Role dashboards and section pages. Section content is served by dedicated
//! screens per module; these pages give each section its landing frame and
//! quick links from the role's navigation table.

use crate::app_lib::theme::Theme;
use crate::features::auth::state::use_auth;
use crate::routes::NotFoundContent;
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_location};
use session_core::roles::{NavItem, find_nav_item};

/// Landing page of a role area: greeting plus one card per section.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    let greeting = move || {
        auth.session.with(|state| {
            state
                .user
                .as_ref()
                .map(|user| format!("Welcome back, {}", user.display_name()))
                .unwrap_or_default()
        })
    };
    let items = move || {
        auth.session.with(|state| {
            state
                .role()
                .map(|role| {
                    role.nav_sections()
                        .iter()
                        .flat_map(|section| section.items.iter())
                        .filter(|item| !item.exact)
                        .collect::<Vec<&'static NavItem>>()
                })
                .unwrap_or_default()
        })
    };
    let role_label = move || {
        auth.session
            .with(|state| state.role().map(|role| role.label().to_string()))
            .unwrap_or_default()
    };

    view! {
        <div class="space-y-6">
            <div>
                <h2 class=Theme::PAGE_TITLE>{greeting}</h2>
                <p class="text-sm text-gray-500 dark:text-gray-400">{role_label} " portal"</p>
            </div>
            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                <For
                    each=items
                    key=|item: &&'static NavItem| item.path
                    children=move |item: &'static NavItem| {
                        view! {
                            <A
                                href=item.path
                                {..}
                                class="group flex items-center gap-3 rounded-xl border border-gray-200 bg-white p-5 shadow-sm transition-colors hover:border-blue-300 dark:border-gray-700 dark:bg-gray-800"
                            >
                                <span class=Theme::ICON>{item.icon}</span>
                                <span class="text-sm font-medium text-gray-900 dark:text-white">
                                    {item.label}
                                </span>
                            </A>
                        }
                    }
                />
            </div>
        </div>
    }
}

/// Frame for a section of a role area. Unknown sections render the inline 404.
#[component]
pub fn ModulePage() -> impl IntoView {
    let auth = use_auth();
    let location = use_location();

    let item = Memo::new(move |_| {
        let pathname = location.pathname.get();
        auth.session.with(|state| {
            state
                .role()
                .and_then(|role| find_nav_item(role, &pathname))
        })
    });

    move || match item.get() {
        Some(item) => view! {
            <div class=Theme::CARD>
                <div class="flex items-center gap-3">
                    <span class="material-symbols-outlined text-3xl text-blue-600">{item.icon}</span>
                    <h2 class=Theme::PAGE_TITLE>{item.label}</h2>
                </div>
                <p class="mt-4 text-sm text-gray-500 dark:text-gray-400">
                    "Nothing to show yet."
                </p>
            </div>
        }
        .into_any(),
        None => view! { <NotFoundContent /> }.into_any(),
    }
}
