//! Signed-in layout: sidebar navigation, a header with the current page title,
//! theme toggle and user badge, and the content area. Navigation is
//! client-side only; the API enforces access control.

use crate::app_lib::{build_info, config::AppConfig};
use crate::components::layout::Sidebar;
use crate::features::{auth::state::use_auth, theme::use_theme};
use leptos::prelude::*;
use leptos_router::hooks::use_location;
use session_core::roles::{find_nav_item, initials};

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let auth = use_auth();
    let theme = use_theme();
    let location = use_location();
    let app_name = AppConfig::load().app_name;

    let page_title = move || {
        let pathname = location.pathname.get();
        auth.session.with(|state| {
            state
                .role()
                .and_then(|role| find_nav_item(role, &pathname))
                .map_or("Dashboard", |item| item.label)
        })
    };
    let user_initials = move || {
        auth.session.with(|state| {
            state.user.as_ref().map_or_else(String::new, |user| {
                initials(user.first_name.as_deref(), user.last_name.as_deref())
            })
        })
    };
    let display_name = move || {
        auth.session
            .with(|state| state.user.as_ref().map(|user| user.display_name()))
            .unwrap_or_default()
    };
    let theme_icon = move || {
        if theme.mode.get().is_dark() {
            "light_mode"
        } else {
            "dark_mode"
        }
    };
    let commit = build_info::git_commit_hash();

    view! {
        <div class="flex min-h-screen bg-gray-50 dark:bg-gray-900">
            <Sidebar open=menu_open set_open=set_menu_open />
            <div class="flex flex-1 flex-col">
                <header class="flex items-center justify-between border-b border-gray-200 bg-white px-4 py-3 dark:border-gray-800 dark:bg-gray-900">
                    <div class="flex items-center gap-3">
                        <button
                            type="button"
                            class="inline-flex h-10 w-10 items-center justify-center rounded-lg text-gray-500 hover:bg-gray-100 md:hidden dark:text-gray-400 dark:hover:bg-gray-700"
                            aria-expanded=move || menu_open.get().to_string()
                            on:click=move |_| set_menu_open.update(|open| *open = !*open)
                        >
                            <span class="sr-only">"Open main menu"</span>
                            <span class="material-symbols-outlined">"menu"</span>
                        </button>
                        <h1 class="text-lg font-semibold text-gray-900 dark:text-white">
                            {page_title}
                        </h1>
                    </div>
                    <div class="flex items-center gap-3">
                        <button
                            type="button"
                            class="inline-flex h-10 w-10 items-center justify-center rounded-lg text-gray-500 hover:bg-gray-100 dark:text-gray-400 dark:hover:bg-gray-700"
                            aria-label="Toggle theme"
                            on:click=move |_| theme.toggle()
                        >
                            <span class="material-symbols-outlined">{theme_icon}</span>
                        </button>
                        <span class="hidden text-sm text-gray-700 sm:inline dark:text-gray-300">
                            {display_name}
                        </span>
                        <span class="flex h-9 w-9 items-center justify-center rounded-full bg-blue-600 text-sm font-semibold text-white">
                            {user_initials}
                        </span>
                    </div>
                </header>
                <main class="flex-1">
                    <div class="container mx-auto p-4 mt-2">{children()}</div>
                </main>
                <footer class="border-t border-gray-100 px-4 py-2 text-center text-[10px] font-mono uppercase tracking-tighter text-gray-400 dark:border-gray-800">
                    {app_name}
                    {format!(" · {commit}")}
                </footer>
            </div>
        </div>
    }
}
