//! Client-side checks for the auth forms. They only save a round trip; the
//! API applies its own validation.

use crate::roles::Role;
use regex::Regex;
use std::{collections::BTreeMap, sync::LazyLock};

/// Domain every institutional address belongs to.
pub const INSTITUTION_DOMAIN: &str = "sms.edu.in";
const MIN_LOGIN_PASSWORD: usize = 6;
const MIN_NEW_PASSWORD: usize = 8;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));
static INSTITUTION_EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@sms\.edu\.in$").expect("valid institution email regex"));

/// Per-field validation messages keyed by form field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn looks_like_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// # Errors
/// Returns the failing fields (`email`, `password`).
pub fn validate_login(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if email.trim().is_empty() {
        errors.add("email", "Email is required");
    } else if !looks_like_email(email) {
        errors.add("email", "Please enter a valid email");
    }

    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if password.chars().count() < MIN_LOGIN_PASSWORD {
        errors.add("password", "Password must be at least 6 characters");
    }
    errors.into_result()
}

/// Registration form as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<Role>,
    pub additional_id: String,
    pub department: String,
}

impl RegistrationForm {
    /// # Errors
    /// Returns every failing field.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.first_name.trim().is_empty() {
            errors.add("first_name", "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.add("last_name", "Last name is required");
        }

        if self.email.trim().is_empty() {
            errors.add("email", "Email is required");
        } else if !INSTITUTION_EMAIL_RE.is_match(self.email.trim())
        {
            errors.add("email", "Email must be in format: name@sms.edu.in");
        }

        if self.password.is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < MIN_NEW_PASSWORD {
            errors.add("password", "Password must be at least 8 characters");
        }
        if self.password != self.confirm_password {
            errors.add("confirm_password", "Passwords do not match");
        }

        let role = self.role.clone().unwrap_or(Role::Student);
        if self.additional_id.trim().is_empty() {
            let message = if role == Role::Student {
                "Enrollment year is required (e.g., 2024)"
            } else {
                "Employee ID is required"
            };
            errors.add("additional_id", message);
        }
        if role == Role::Faculty && self.department.trim().is_empty() {
            errors.add("department", "Department is required for faculty");
        }
        errors.into_result()
    }
}

/// Institutional address derived from name and enrollment/employee ID, e.g.
/// `ravi.kumar.2024@sms.edu.in`. `None` until all three parts are filled.
#[must_use]
pub fn generated_email(first_name: &str, last_name: &str, additional_id: &str) -> Option<String> {
    let first = first_name.trim().to_lowercase();
    let last = last_name.trim().to_lowercase();
    let id = additional_id.trim();
    if first.is_empty() || last.is_empty() || id.is_empty() {
        return None;
    }
    Some(format!("{first}.{last}.{id}@{INSTITUTION_DOMAIN}"))
}

/// # Errors
/// Returns the failing fields (`current_password`, `new_password`,
/// `confirm_password`).
pub fn validate_password_change(
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if current.is_empty() {
        errors.add("current_password", "Current password is required");
    }
    check_new_password(&mut errors, new, confirm);
    if !current.is_empty() && current == new {
        errors.add(
            "new_password",
            "New password must be different from current password",
        );
    }
    errors.into_result()
}

/// # Errors
/// Returns the failing fields (`new_password`, `confirm_password`).
pub fn validate_password_reset(new: &str, confirm: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    check_new_password(&mut errors, new, confirm);
    errors.into_result()
}

/// # Errors
/// Returns a single user-facing message.
pub fn validate_reset_request(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        Err("Email is required".to_string())
    } else if !looks_like_email(email) {
        Err("Please enter a valid email address".to_string())
    } else {
        Ok(())
    }
}

fn check_new_password(errors: &mut FieldErrors, new: &str, confirm: &str) {
    if new.is_empty() {
        errors.add("new_password", "New password is required");
    } else if new.chars().count() < MIN_NEW_PASSWORD {
        errors.add("new_password", "Password must be at least 8 characters");
    }

    if confirm.is_empty() {
        errors.add("confirm_password", "Please confirm your new password");
    } else if new != confirm {
        errors.add("confirm_password", "Passwords do not match");
    }
}
