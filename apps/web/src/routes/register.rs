//! Account registration for students and faculty. The institutional address
//! is generated from the name and enrollment/employee ID as the user types.

use crate::app_lib::theme::Theme;
use crate::components::layout::AuthCard;
use crate::components::{Alert, AlertKind, Button, FieldError, Spinner};
use crate::features::auth::state::use_auth;
use gloo_timers::callback::Timeout;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::{NavigateOptions, components::A, hooks::use_navigate};
use session_core::{
    RegisterOutcome, RegisterRequest, Role,
    forms::{FieldErrors, RegistrationForm, generated_email},
    roles::LOGIN_ROUTE,
};

const REDIRECT_DELAY_MS: u32 = 2_000;
const SELF_SERVICE_ROLES: [Role; 2] = [Role::Student, Role::Faculty];

#[derive(Clone, Copy)]
enum Field {
    FirstName,
    LastName,
    AdditionalId,
    Department,
    Email,
    Password,
    ConfirmPassword,
}

fn apply(form: &mut RegistrationForm, field: Field, value: String) {
    match field {
        Field::FirstName => form.first_name = value,
        Field::LastName => form.last_name = value,
        Field::AdditionalId => form.additional_id = value,
        Field::Department => form.department = value,
        Field::Email => form.email = value,
        Field::Password => form.password = value,
        Field::ConfirmPassword => form.confirm_password = value,
    }
    if matches!(field, Field::FirstName | Field::LastName | Field::AdditionalId) {
        if let Some(email) = generated_email(&form.first_name, &form.last_name, &form.additional_id) {
            form.email = email;
        }
    }
}

fn to_request(form: &RegistrationForm) -> RegisterRequest {
    let role = form.role.clone().unwrap_or(Role::Student);
    let department = (role == Role::Faculty).then(|| form.department.trim().to_string());
    RegisterRequest {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        role,
        additional_id: form.additional_id.trim().to_string(),
        department,
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let form = RwSignal::new(RegistrationForm {
        role: Some(Role::Student),
        ..RegistrationForm::default()
    });
    let (field_errors, set_field_errors) = signal(FieldErrors::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (success, set_success) = signal::<Option<String>>(None);

    let register_action = Action::new_local(move |request: &RegisterRequest| {
        auth.register(request.clone())
    });

    Effect::new(move |_| {
        let Some(result) = register_action.value().get() else {
            return;
        };
        match result {
            Ok(outcome) => {
                let (message, target) = match outcome {
                    RegisterOutcome::Authenticated(login) => {
                        ("Registration successful!".to_string(), login.redirect_to)
                    }
                    RegisterOutcome::PendingLogin { message } => (message, LOGIN_ROUTE),
                };
                set_success.set(Some(message));
                let navigate = navigate.clone();
                Timeout::new(REDIRECT_DELAY_MS, move || {
                    navigate(
                        target,
                        NavigateOptions {
                            replace: true,
                            ..NavigateOptions::default()
                        },
                    );
                })
                .forget();
            }
            Err(failure) => set_error.set(Some(failure.message)),
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let current = form.get_untracked();
        if let Err(errors) = current.validate() {
            set_field_errors.set(errors);
            return;
        }
        set_field_errors.set(FieldErrors::default());
        register_action.dispatch(to_request(&current));
    };

    let input = move |field: Field| {
        move |event: leptos::ev::Event| {
            let value = event_target_value(&event);
            form.update(|form| apply(form, field, value));
            set_error.set(None);
        }
    };
    let is_role = move |role: Role| move || form.with(|form| form.role.as_ref() == Some(&role));
    let id_label = move || {
        if form.with(|form| form.role == Some(Role::Faculty)) {
            "Employee ID"
        } else {
            "Enrollment Year"
        }
    };

    view! {
        <AuthCard title="Create your account" subtitle="Join the SMS Portal">
            {move || {
                success
                    .get()
                    .map(|message| {
                        view! {
                            <div class="mb-4">
                                <Alert kind=AlertKind::Success message=message />
                                <p class="mt-2 text-center text-sm text-gray-500">"Redirecting..."</p>
                            </div>
                        }
                    })
            }}
            <form novalidate on:submit=on_submit class:hidden=move || success.get().is_some()>
                <fieldset class="mb-5">
                    <legend class=Theme::LABEL>"I am a"</legend>
                    <div class="flex gap-3">
                        {SELF_SERVICE_ROLES
                            .into_iter()
                            .map(|role| {
                                let label = role.label().to_string();
                                let value = role.as_str().to_string();
                                let checked = is_role(role.clone());
                                view! {
                                    <label class="flex flex-1 cursor-pointer items-center gap-2 rounded-lg border border-gray-300 p-3 text-sm dark:border-gray-600 dark:text-white">
                                        <input
                                            type="radio"
                                            name="role"
                                            value=value
                                            prop:checked=checked
                                            on:change=move |_| {
                                                let role = role.clone();
                                                form.update(|form| form.role = Some(role));
                                            }
                                        />
                                        {label}
                                    </label>
                                }
                            })
                            .collect_view()}
                    </div>
                </fieldset>
                <div class="mb-5 grid grid-cols-2 gap-3">
                    <div>
                        <label class=Theme::LABEL for="first_name">"First name"</label>
                        <input id="first_name" type="text" class=Theme::INPUT on:input=input(Field::FirstName) />
                        <FieldError errors=field_errors field="first_name" />
                    </div>
                    <div>
                        <label class=Theme::LABEL for="last_name">"Last name"</label>
                        <input id="last_name" type="text" class=Theme::INPUT on:input=input(Field::LastName) />
                        <FieldError errors=field_errors field="last_name" />
                    </div>
                </div>
                <div class="mb-5">
                    <label class=Theme::LABEL for="additional_id">{id_label}</label>
                    <input id="additional_id" type="text" class=Theme::INPUT on:input=input(Field::AdditionalId) />
                    <FieldError errors=field_errors field="additional_id" />
                </div>
                <Show when=is_role(Role::Faculty)>
                    <div class="mb-5">
                        <label class=Theme::LABEL for="department">"Department"</label>
                        <input id="department" type="text" class=Theme::INPUT on:input=input(Field::Department) />
                        <FieldError errors=field_errors field="department" />
                    </div>
                </Show>
                <div class="mb-5">
                    <label class=Theme::LABEL for="email">"Email address (auto-generated)"</label>
                    <input
                        id="email"
                        type="email"
                        class=Theme::INPUT
                        prop:value=move || form.with(|form| form.email.clone())
                        on:input=input(Field::Email)
                    />
                    <FieldError errors=field_errors field="email" />
                </div>
                <div class="mb-5">
                    <label class=Theme::LABEL for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        class=Theme::INPUT
                        autocomplete="new-password"
                        on:input=input(Field::Password)
                    />
                    <FieldError errors=field_errors field="password" />
                </div>
                <div class="mb-5">
                    <label class=Theme::LABEL for="confirm_password">"Confirm password"</label>
                    <input
                        id="confirm_password"
                        type="password"
                        class=Theme::INPUT
                        autocomplete="new-password"
                        on:input=input(Field::ConfirmPassword)
                    />
                    <FieldError errors=field_errors field="confirm_password" />
                </div>
                <Button button_type="submit" full_width=true disabled=register_action.pending()>
                    "Create account"
                </Button>
                {move || {
                    register_action
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
                    "Already registered? "
                    <A href=LOGIN_ROUTE {..} class=Theme::LINK>
                        "Sign in"
                    </A>
                </p>
            </form>
        </AuthCard>
    }
}
