use crate::app_lib::theme::Theme;
use crate::components::layout::AuthCard;
use crate::components::{Alert, AlertKind, Button, FieldError, Spinner};
use crate::features::auth::state::use_auth;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::{NavigateOptions, components::A, hooks::use_navigate};
use session_core::forms::{FieldErrors, validate_login};

#[derive(Clone)]
struct LoginInput {
    email: String,
    password: String,
}

/// Email/password sign-in. On success the user lands on the route chosen by
/// the session manager (role dashboard or forced password change).
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (field_errors, set_field_errors) = signal(FieldErrors::default());
    let (error, set_error) = signal::<Option<String>>(None);

    let login_action = Action::new_local(move |input: &LoginInput| {
        let input = input.clone();
        auth.login(input.email, input.password)
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(outcome) => navigate(
                    outcome.redirect_to,
                    NavigateOptions {
                        replace: true,
                        ..NavigateOptions::default()
                    },
                ),
                Err(failure) => set_error.set(Some(failure.message)),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if let Err(errors) = validate_login(&email_value, &password_value) {
            set_field_errors.set(errors);
            return;
        }
        set_field_errors.set(FieldErrors::default());

        login_action.dispatch(LoginInput {
            email: email_value,
            password: password_value,
        });
    };

    view! {
        <AuthCard title="Sign in" subtitle="Use your institution account">
            <form novalidate on:submit=on_submit>
                <div class="mb-5">
                    <label class=Theme::LABEL for="email">
                        "Email"
                    </label>
                    <input
                        id="email"
                        type="email"
                        class=Theme::INPUT
                        autocomplete="email"
                        placeholder="name@sms.edu.in"
                        on:input=move |event| set_email.set(event_target_value(&event))
                    />
                    <FieldError errors=field_errors field="email" />
                </div>
                <div class="mb-2">
                    <label class=Theme::LABEL for="password">
                        "Password"
                    </label>
                    <input
                        id="password"
                        type="password"
                        class=Theme::INPUT
                        autocomplete="current-password"
                        on:input=move |event| set_password.set(event_target_value(&event))
                    />
                    <FieldError errors=field_errors field="password" />
                </div>
                <div class="mb-5 text-right text-sm">
                    <A href="/forgot-password" {..} class=Theme::LINK>
                        "Forgot password?"
                    </A>
                </div>
                <Button button_type="submit" full_width=true disabled=login_action.pending()>
                    "Sign in"
                </Button>
                {move || {
                    login_action
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
                <p class="mt-6 text-center text-sm text-gray-500 dark:text-gray-400">
                    "New here? "
                    <A href="/register" {..} class=Theme::LINK>
                        "Create an account"
                    </A>
                </p>
            </form>
        </AuthCard>
    }
}
