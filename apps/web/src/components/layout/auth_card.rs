use crate::app_lib::{config::AppConfig, theme::Theme};
use leptos::prelude::*;

/// Centered card with the portal name, used by the signed-out pages.
#[component]
pub fn AuthCard(
    title: &'static str,
    #[prop(optional)] subtitle: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let app_name = AppConfig::load().app_name;

    view! {
        <div class="flex min-h-screen items-center justify-center bg-gray-50 px-4 py-10 dark:bg-gray-900">
            <div class=Theme::AUTH_CARD>
                <div class="mb-6 text-center">
                    <span class="material-symbols-outlined text-4xl text-blue-600">"school"</span>
                    <p class="text-sm font-semibold uppercase tracking-wide text-gray-500 dark:text-gray-400">
                        {app_name}
                    </p>
                    <h1 class=Theme::PAGE_TITLE>{title}</h1>
                    {subtitle
                        .map(|subtitle| {
                            view! {
                                <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">{subtitle}</p>
                            }
                        })}
                </div>
                {children()}
            </div>
        </div>
    }
}
