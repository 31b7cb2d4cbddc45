use crate::app_lib::theme::Theme;
use crate::components::layout::AuthCard;
use crate::components::{Alert, AlertKind, Button, Spinner};
use crate::features::password::client;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::A;
use session_core::{forms::validate_reset_request, roles::LOGIN_ROUTE};

/// Requests a reset link. The confirmation is shown whatever the API answers
/// so the page never reveals whether an address has an account.
#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (sent, set_sent) = signal(false);

    let request_action = Action::new_local(move |email: &String| {
        let email = email.clone();
        async move {
            if let Err(err) = client::request_reset(&email).await {
                tracing::debug!(error = %err, "reset request failed");
            }
        }
    });

    Effect::new(move |_| {
        if request_action.value().get().is_some() {
            set_sent.set(true);
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        let value = email.get_untracked().trim().to_string();
        match validate_reset_request(&value) {
            Ok(()) => {
                set_error.set(None);
                request_action.dispatch(value);
            }
            Err(message) => set_error.set(Some(message)),
        }
    };

    view! {
        <AuthCard title="Forgot password" subtitle="We will email you a reset link">
            <Show
                when=move || sent.get()
                fallback=move || {
                    view! {
                        <form novalidate on:submit=on_submit>
                            <div class="mb-5">
                                <label class=Theme::LABEL for="email">"Email"</label>
                                <input
                                    id="email"
                                    type="email"
                                    class=Theme::INPUT
                                    autocomplete="email"
                                    prop:value=move || email.get()
                                    on:input=move |event| set_email.set(event_target_value(&event))
                                />
                            </div>
                            <Button
                                button_type="submit"
                                full_width=true
                                disabled=request_action.pending()
                            >
                                "Send reset link"
                            </Button>
                            {move || {
                                request_action
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
                }
            >
                <Alert
                    kind=AlertKind::Success
                    message=format!(
                        "If an account exists for {}, a password reset link has been sent.",
                        email.get_untracked(),
                    )
                />
            </Show>
            <p class="mt-6 text-center text-sm">
                <A href=LOGIN_ROUTE {..} class=Theme::LINK>
                    "Back to sign in"
                </A>
            </p>
        </AuthCard>
    }
}
