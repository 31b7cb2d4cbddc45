use leptos::prelude::*;

#[component]
pub fn Spinner() -> impl IntoView {
    view! {
        <div
            class="inline-block h-7 w-7 animate-spin rounded-full border-4 border-blue-200 border-t-blue-600"
            role="status"
            aria-live="polite"
            aria-label="Loading"
        ></div>
    }
}

/// Neutral placeholder shown while the stored session is being restored.
#[component]
pub fn FullPageSpinner() -> impl IntoView {
    view! {
        <div class="flex min-h-screen items-center justify-center bg-gray-50 dark:bg-gray-900">
            <Spinner />
        </div>
    }
}
