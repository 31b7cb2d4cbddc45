use crate::app_lib::theme::Theme;
use leptos::prelude::*;
use session_core::forms::FieldErrors;

/// Inline validation message for one form field.
#[component]
pub fn FieldError(errors: ReadSignal<FieldErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors.with(|errors| {
            errors
                .get(field)
                .map(|message| view! { <p class=Theme::FIELD_ERROR>{message.to_string()}</p> })
        })
    }
}
