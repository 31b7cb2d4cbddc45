//! 403 view rendered in place when a signed-in user opens another role's area.

use leptos::prelude::*;
use leptos_router::components::A;
use session_core::{Role, landing_route};

#[component]
pub fn AccessDeniedPage(role: Option<Role>) -> impl IntoView {
    let home = landing_route(role.as_ref(), false);
    let role_label = role.as_ref().map_or("Unknown", Role::label).to_string();

    view! {
        <div class="flex min-h-screen items-center justify-center bg-gray-50 px-4 dark:bg-gray-900">
            <div class="w-full max-w-md rounded-xl border border-gray-200 bg-white p-8 text-center shadow-sm dark:border-gray-700 dark:bg-gray-800">
                <span class="material-symbols-outlined text-6xl text-red-600 mb-4">"block"</span>
                <h1 class="text-4xl font-black text-gray-900 dark:text-white">"403"</h1>
                <h2 class="mt-2 text-xl font-bold text-gray-900 dark:text-white">"Access Denied"</h2>
                <p class="mt-2 mb-6 text-sm text-gray-500 dark:text-gray-400">
                    "You do not have permission to access this page."
                </p>
                <p class="mb-6 text-xs uppercase tracking-wide text-gray-400">
                    "Signed in as " {role_label}
                </p>
                <A
                    href=home
                    {..}
                    class="inline-flex items-center px-6 py-3 text-base font-medium text-white bg-blue-700 rounded-lg hover:bg-blue-800 transition-all"
                >
                    <span class="material-symbols-outlined mr-2 text-xl">"home"</span>
                    "Go to my dashboard"
                </A>
            </div>
        </div>
    }
}
