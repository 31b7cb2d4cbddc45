//! Side navigation for the signed-in role. Sections and links come from the
//! role's navigation table; the footer shows who is signed in and offers
//! sign-out.

use crate::features::auth::state::use_auth;
use leptos::{prelude::*, task::spawn_local};
use leptos_router::{
    NavigateOptions,
    components::A,
    hooks::{use_location, use_navigate},
};
use session_core::roles::{LOGIN_ROUTE, NavItem, NavSection, initials};

#[component]
pub fn Sidebar(open: ReadSignal<bool>, set_open: WriteSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let sections = move || {
        auth.session
            .with(|state| state.role().map(|role| role.nav_sections()))
            .unwrap_or_default()
    };
    let user_line = move || {
        auth.session.with(|state| {
            state.user.as_ref().map(|user| {
                (
                    initials(user.first_name.as_deref(), user.last_name.as_deref()),
                    user.display_name(),
                    user.role
                        .as_ref()
                        .map_or_else(String::new, |role| role.label().to_string()),
                )
            })
        })
    };

    let sign_out = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            auth.logout().await;
            navigate(
                LOGIN_ROUTE,
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        });
    };

    view! {
        <aside
            class="w-64 flex-shrink-0 flex-col border-r border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 overflow-y-auto md:flex"
            class:hidden=move || !open.get()
            class:flex=move || open.get()
        >
            <nav class="flex-1 px-4 py-6 space-y-8">
                <For
                    each=sections
                    key=|section: &&'static NavSection| section.title
                    children=move |section: &'static NavSection| {
                        view! {
                            <div>
                                <h3 class="px-2 text-xs font-semibold text-gray-500 dark:text-gray-400 uppercase tracking-wider">
                                    {section.title}
                                </h3>
                                <div class="mt-2 space-y-1">
                                    {section
                                        .items
                                        .iter()
                                        .map(|item| view! { <SidebarLink item=item set_open=set_open /> })
                                        .collect_view()}
                                </div>
                            </div>
                        }
                    }
                />
            </nav>

            <div class="p-4 border-t border-gray-100 dark:border-gray-800">
                {move || {
                    user_line()
                        .map(|(initials, name, role)| {
                            view! {
                                <div class="mb-3 flex items-center gap-3">
                                    <span class="flex h-9 w-9 items-center justify-center rounded-full bg-blue-600 text-sm font-semibold text-white">
                                        {initials}
                                    </span>
                                    <div class="min-w-0">
                                        <p class="truncate text-sm font-medium text-gray-900 dark:text-white">
                                            {name}
                                        </p>
                                        <p class="text-xs text-gray-500 dark:text-gray-400">{role}</p>
                                    </div>
                                </div>
                            }
                        })
                }}
                <button
                    type="button"
                    class="group flex w-full items-center px-2 py-2 text-sm font-medium rounded-md text-gray-600 hover:bg-gray-50 hover:text-gray-900 dark:text-gray-300 dark:hover:bg-gray-800 dark:hover:text-white"
                    on:click=sign_out
                >
                    <span class="material-symbols-outlined mr-3 text-xl">"logout"</span>
                    "Sign Out"
                </button>
            </div>
        </aside>
    }
}

#[component]
fn SidebarLink(item: &'static NavItem, set_open: WriteSignal<bool>) -> impl IntoView {
    let location = use_location();
    let active = Memo::new(move |_| {
        let pathname = location.pathname.get();
        let pathname = pathname.trim_end_matches('/');
        if item.exact {
            pathname == item.path
        } else {
            pathname == item.path || pathname.starts_with(&format!("{}/", item.path))
        }
    });

    view! {
        <A
            href=item.path
            {..}
            class="group flex items-center px-2 py-2 text-sm font-medium rounded-md transition-colors"
            class:text-blue-600=move || active.get()
            class:bg-blue-50=move || active.get()
            class:dark:bg-blue-900=move || active.get()
            class:dark:text-blue-400=move || active.get()
            class:text-gray-600=move || !active.get()
            class:dark:text-gray-300=move || !active.get()
            class:hover:bg-gray-50=move || !active.get()
            class:dark:hover:bg-gray-800=move || !active.get()
            on:click=move |_| set_open.set(false)
        >
            <span
                class="material-symbols-outlined mr-3 text-xl transition-colors"
                class:text-blue-600=move || active.get()
                class:text-gray-400=move || !active.get()
            >
                {item.icon}
            </span>
            {item.label}
        </A>
    }
}
