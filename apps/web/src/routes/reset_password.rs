use crate::app_lib::theme::Theme;
use crate::components::layout::AuthCard;
use crate::components::{Alert, AlertKind, Button, FieldError, Spinner};
use crate::features::password::client::{self, ResetConfirmRequest};
use gloo_timers::callback::Timeout;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::{
    NavigateOptions,
    components::A,
    hooks::{use_navigate, use_query_map},
};
use session_core::{
    forms::{FieldErrors, validate_password_reset},
    roles::LOGIN_ROUTE,
};

const REDIRECT_DELAY_MS: u32 = 3_000;
const RESET_FAILED: &str = "Failed to reset password. The link may have expired.";

/// Sets a new password with the single-use token from the emailed link
/// (`/reset-password?token=...`).
#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let navigate = use_navigate();
    let query = use_query_map();
    let token = Memo::new(move |_| {
        query
            .read()
            .get("token")
            .filter(|token| !token.trim().is_empty())
    });
    let (new_password, set_new_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (field_errors, set_field_errors) = signal(FieldErrors::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (done, set_done) = signal(false);

    let reset_action = Action::new_local(move |request: &ResetConfirmRequest| {
        let request = request.clone();
        async move {
            match client::confirm_reset(&request).await {
                Ok(response) => response.into_result(RESET_FAILED),
                Err(err) => Err(err.to_string()),
            }
        }
    });

    Effect::new(move |_| match reset_action.value().get() {
        Some(Ok(())) => {
            set_done.set(true);
            let navigate = navigate.clone();
            Timeout::new(REDIRECT_DELAY_MS, move || {
                navigate(
                    LOGIN_ROUTE,
                    NavigateOptions {
                        replace: true,
                        ..NavigateOptions::default()
                    },
                );
            })
            .forget();
        }
        Some(Err(message)) => set_error.set(Some(message)),
        None => {}
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        let Some(token) = token.get_untracked() else {
            return;
        };
        let new_value = new_password.get_untracked();
        let confirm_value = confirm_password.get_untracked();
        if let Err(errors) = validate_password_reset(&new_value, &confirm_value) {
            set_field_errors.set(errors);
            return;
        }
        set_field_errors.set(FieldErrors::default());
        reset_action.dispatch(ResetConfirmRequest {
            token,
            new_password: new_value,
            confirm_password: confirm_value,
        });
    };

    let form = move || {
        view! {
            <form novalidate on:submit=on_submit>
                <div class="mb-5">
                    <label class=Theme::LABEL for="new_password">"New password"</label>
                    <input
                        id="new_password"
                        type="password"
                        class=Theme::INPUT
                        autocomplete="new-password"
                        on:input=move |event| set_new_password.set(event_target_value(&event))
                    />
                    <FieldError errors=field_errors field="new_password" />
                </div>
                <div class="mb-5">
                    <label class=Theme::LABEL for="confirm_password">"Confirm password"</label>
                    <input
                        id="confirm_password"
                        type="password"
                        class=Theme::INPUT
                        autocomplete="new-password"
                        on:input=move |event| set_confirm_password.set(event_target_value(&event))
                    />
                    <FieldError errors=field_errors field="confirm_password" />
                </div>
                <Button button_type="submit" full_width=true disabled=reset_action.pending()>
                    "Reset password"
                </Button>
                {move || {
                    reset_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="mt-4 flex justify-center"><Spinner /></div> })
                }}
                {move || {
                    error
                        .get()
                        .map(|message| {
                            view! {
                                <div class="mt-4">
                                    <Alert kind=AlertKind::Error message=message />
                                </div>
                            }
                        })
                }}
            </form>
        }
    };

    view! {
        <AuthCard title="Reset password">
            {move || {
                if done.get() {
                    view! {
                        <Alert
                            kind=AlertKind::Success
                            message="Your password has been reset. Redirecting to sign in..."
                        />
                    }
                        .into_any()
                } else if token.get().is_none() {
                    view! {
                        <Alert
                            kind=AlertKind::Error
                            message="Invalid or missing reset token. Please request a new link."
                        />
                    }
                        .into_any()
                } else {
                    form().into_any()
                }
            }}
            <p class="mt-6 text-center text-sm">
                <A href=LOGIN_ROUTE {..} class=Theme::LINK>
                    "Back to sign in"
                </A>
            </p>
        </AuthCard>
    }
}
