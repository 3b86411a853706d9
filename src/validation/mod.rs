//! Field validation for user payloads
//!
//! Every rule is an explicit typed predicate. Checks run eagerly and collect
//! all failing fields before anything touches the database; the email
//! uniqueness probe is layered on top by the handlers since it needs the
//! store.

use std::collections::BTreeMap;

use crate::models::MembershipStatus;
use crate::users::model::{CreateUserRequest, UpdateUserRequest};

pub const NAME_MAX_LEN: usize = 255;
pub const EMAIL_MAX_LEN: usize = 255;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Accumulated per-field validation failures
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }
}

/// Validated create payload with required fields unwrapped
#[derive(Debug, Clone)]
pub struct CreateUserFields {
    pub name: String,
    pub email: String,
    pub password: String,
    pub age: Option<i32>,
    pub membership_status: Option<MembershipStatus>,
}

/// Validated update payload; `None` means the field was absent and the stored
/// value is left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateUserFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub age: Option<i32>,
    pub membership_status: Option<MembershipStatus>,
}

impl UpdateUserFields {
    pub fn is_noop(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.age.is_none()
            && self.membership_status.is_none()
    }
}

/// Validate a create payload. All five field rules run; failures are
/// collected rather than short-circuited.
pub fn validate_create(request: &CreateUserRequest) -> Result<CreateUserFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    match request.name.as_deref() {
        Some(name) => check_name(name, &mut errors),
        None => errors.push("name", "The name field is required."),
    }

    match request.email.as_deref() {
        Some(email) => check_email(email, &mut errors),
        None => errors.push("email", "The email field is required."),
    }

    match request.password.as_deref() {
        Some(password) => check_password(password, &mut errors),
        None => errors.push("password", "The password field is required."),
    }

    if let Some(age) = request.age {
        check_age(age, &mut errors);
    }

    let membership_status = match request.membership_status.as_deref() {
        Some(raw) => check_membership_status(raw, &mut errors),
        None => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // Options are known present here; the match above recorded an error for
    // every absent required field.
    let (name, email, password) = match (&request.name, &request.email, &request.password) {
        (Some(n), Some(e), Some(p)) => (n.clone(), e.clone(), p.clone()),
        _ => return Err(errors),
    };

    Ok(CreateUserFields {
        name,
        email,
        password,
        age: request.age,
        membership_status,
    })
}

/// Validate an update payload. Only fields present in the body are checked
/// ("sometimes" semantics); each present field must satisfy its create-time
/// rule.
pub fn validate_update(request: &UpdateUserRequest) -> Result<UpdateUserFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    if let Some(name) = request.name.as_deref() {
        check_name(name, &mut errors);
    }
    if let Some(email) = request.email.as_deref() {
        check_email(email, &mut errors);
    }
    if let Some(password) = request.password.as_deref() {
        check_password(password, &mut errors);
    }
    if let Some(age) = request.age {
        check_age(age, &mut errors);
    }

    let membership_status = match request.membership_status.as_deref() {
        Some(raw) => check_membership_status(raw, &mut errors),
        None => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(UpdateUserFields {
        name: request.name.clone(),
        email: request.email.clone(),
        password: request.password.clone(),
        age: request.age,
        membership_status,
    })
}

fn check_name(name: &str, errors: &mut FieldErrors) {
    if name.trim().is_empty() {
        errors.push("name", "The name field is required.");
    } else if name.chars().count() > NAME_MAX_LEN {
        errors.push(
            "name",
            format!("The name may not be greater than {} characters.", NAME_MAX_LEN),
        );
    }
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    if email.trim().is_empty() {
        errors.push("email", "The email field is required.");
        return;
    }
    if email.chars().count() > EMAIL_MAX_LEN {
        errors.push(
            "email",
            format!("The email may not be greater than {} characters.", EMAIL_MAX_LEN),
        );
    }
    if !validator::validate_email(email) {
        errors.push("email", "The email must be a valid email address.");
    }
}

fn check_password(password: &str, errors: &mut FieldErrors) {
    if password.is_empty() {
        errors.push("password", "The password field is required.");
    } else if password.chars().count() < PASSWORD_MIN_LEN {
        errors.push(
            "password",
            format!("The password must be at least {} characters.", PASSWORD_MIN_LEN),
        );
    }
}

fn check_age(age: i32, errors: &mut FieldErrors) {
    if age < 0 {
        errors.push("age", "The age must be at least 0.");
    }
}

fn check_membership_status(raw: &str, errors: &mut FieldErrors) -> Option<MembershipStatus> {
    match MembershipStatus::parse(raw) {
        Some(status) => Some(status),
        None => {
            errors.push(
                "membership_status",
                "The selected membership status is invalid.",
            );
            None
        }
    }
}
