//! Password change for a signed-in user, also the forced landing page when the
//! server marks the account with `mustChangePassword`. A successful change
//! signs the user out so they sign in again with the new password.

use crate::app_lib::theme::Theme;
use crate::components::layout::AuthCard;
use crate::components::{Alert, AlertKind, Button, FieldError, Spinner};
use crate::features::auth::state::use_auth;
use crate::features::password::client::{self, ChangePasswordRequest};
use gloo_timers::callback::Timeout;
use leptos::ev::SubmitEvent;
use leptos::{prelude::*, task::spawn_local};
use leptos_router::{NavigateOptions, hooks::use_navigate};
use session_core::{
    forms::{FieldErrors, validate_password_change},
    roles::LOGIN_ROUTE,
};

const SIGN_OUT_DELAY_MS: u32 = 2_000;
const CHANGE_FAILED: &str = "Failed to change password";

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (current_password, set_current_password) = signal(String::new());
    let (new_password, set_new_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (field_errors, set_field_errors) = signal(FieldErrors::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (done, set_done) = signal(false);

    let forced = move || {
        auth.session
            .with(|state| state.user.as_ref().is_some_and(|user| user.must_change_password))
    };

    let change_action = Action::new_local(move |request: &ChangePasswordRequest| {
        let request = request.clone();
        async move {
            match client::change_password(&request).await {
                Ok(response) => response.into_result(CHANGE_FAILED),
                Err(err) => Err(err.to_string()),
            }
        }
    });

    Effect::new(move |_| match change_action.value().get() {
        Some(Ok(())) => {
            set_done.set(true);
            let navigate = navigate.clone();
            Timeout::new(SIGN_OUT_DELAY_MS, move || {
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
            })
            .forget();
        }
        Some(Err(message)) => set_error.set(Some(message)),
        None => {}
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        let current = current_password.get_untracked();
        let new_value = new_password.get_untracked();
        let confirm_value = confirm_password.get_untracked();
        if let Err(errors) = validate_password_change(&current, &new_value, &confirm_value) {
            set_field_errors.set(errors);
            return;
        }
        set_field_errors.set(FieldErrors::default());
        change_action.dispatch(ChangePasswordRequest {
            current_password: current,
            new_password: new_value,
            confirm_password: confirm_value,
        });
    };

    view! {
        <AuthCard title="Change password">
            <Show when=forced>
                <div class="mb-4">
                    <Alert
                        kind=AlertKind::Info
                        message="You must change your password before continuing."
                    />
                </div>
            </Show>
            <Show
                when=move || !done.get()
                fallback=|| {
                    view! {
                        <Alert
                            kind=AlertKind::Success
                            message="Your password has been updated. Redirecting to sign in..."
                        />
                    }
                }
            >
                <form novalidate on:submit=on_submit>
                    <div class="mb-5">
                        <label class=Theme::LABEL for="current_password">"Current password"</label>
                        <input
                            id="current_password"
                            type="password"
                            class=Theme::INPUT
                            autocomplete="current-password"
                            on:input=move |event| set_current_password.set(event_target_value(&event))
                        />
                        <FieldError errors=field_errors field="current_password" />
                    </div>
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
                        <label class=Theme::LABEL for="confirm_password">"Confirm new password"</label>
                        <input
                            id="confirm_password"
                            type="password"
                            class=Theme::INPUT
                            autocomplete="new-password"
                            on:input=move |event| set_confirm_password.set(event_target_value(&event))
                        />
                        <FieldError errors=field_errors field="confirm_password" />
                    </div>
                    <Button button_type="submit" full_width=true disabled=change_action.pending()>
                        "Update password"
                    </Button>
                    {move || {
                        change_action
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
            </Show>
        </AuthCard>
    }
}
