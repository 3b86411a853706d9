//! Validation rule tests
//!
//! Exercises the field predicates for both create and update payloads,
//! including the boundary values the API contract fixes (255-character
//! name/email, 8-character password, non-negative age, membership set).

use userhub_server::models::MembershipStatus;
use userhub_server::users::{CreateUserRequest, UpdateUserRequest};
use userhub_server::validation::{
    validate_create, validate_update, EMAIL_MAX_LEN, NAME_MAX_LEN, PASSWORD_MIN_LEN,
};

fn base_create() -> CreateUserRequest {
    CreateUserRequest {
        name: Some("A".to_string()),
        email: Some("a@x.com".to_string()),
        password: Some("12345678".to_string()),
        age: None,
        membership_status: None,
    }
}

// ============================================================================
// Create payload tests
// ============================================================================

#[test]
fn test_minimal_valid_create() {
    let fields = validate_create(&base_create()).unwrap();
    assert_eq!(fields.name, "A");
    assert_eq!(fields.email, "a@x.com");
    assert_eq!(fields.password, "12345678");
}

#[test]
fn test_full_valid_create() {
    let mut request = base_create();
    request.age = Some(42);
    request.membership_status = Some("premium".to_string());

    let fields = validate_create(&request).unwrap();
    assert_eq!(fields.age, Some(42));
    assert_eq!(fields.membership_status, Some(MembershipStatus::Premium));
}

#[test]
fn test_all_required_fields_missing_are_reported_together() {
    let errors = validate_create(&CreateUserRequest::default()).unwrap_err();
    assert!(errors.contains("name"));
    assert!(errors.contains("email"));
    assert!(errors.contains("password"));
}

#[test]
fn test_empty_strings_fail_required() {
    let request = CreateUserRequest {
        name: Some(String::new()),
        email: Some(String::new()),
        password: Some(String::new()),
        age: None,
        membership_status: None,
    };
    let errors = validate_create(&request).unwrap_err();
    assert!(errors.contains("name"));
    assert!(errors.contains("email"));
    assert!(errors.contains("password"));
}

#[test]
fn test_name_max_length() {
    let mut request = base_create();
    request.name = Some("n".repeat(NAME_MAX_LEN));
    assert!(validate_create(&request).is_ok());

    request.name = Some("n".repeat(NAME_MAX_LEN + 1));
    assert!(validate_create(&request).unwrap_err().contains("name"));
}

/// Build a syntactically valid email of exactly `len` characters, keeping
/// the local part and domain labels within RFC caps.
fn email_of_len(len: usize) -> String {
    let local = "user";
    let mut domain = String::new();
    let mut remaining = len - local.len() - 1 - ".com".len();
    while remaining > 0 {
        let label = remaining.min(60);
        domain.push_str(&"d".repeat(label));
        remaining -= label;
        if remaining > 0 {
            domain.push('.');
            remaining -= 1;
        }
    }
    format!("{}@{}.com", local, domain)
}

#[test]
fn test_email_max_length() {
    let mut request = base_create();
    request.email = Some(email_of_len(EMAIL_MAX_LEN));
    assert!(validate_create(&request).is_ok());

    request.email = Some(email_of_len(EMAIL_MAX_LEN + 1));
    assert!(validate_create(&request).unwrap_err().contains("email"));
}

#[test]
fn test_email_format() {
    for bad in ["plainaddress", "missing-at.example.com", "a@", "@x.com"] {
        let mut request = base_create();
        request.email = Some(bad.to_string());
        let errors = validate_create(&request).unwrap_err();
        assert!(errors.contains("email"), "expected rejection for {:?}", bad);
    }
}

#[test]
fn test_password_min_length() {
    let mut request = base_create();
    request.password = Some("p".repeat(PASSWORD_MIN_LEN - 1));
    assert!(validate_create(&request).unwrap_err().contains("password"));

    request.password = Some("p".repeat(PASSWORD_MIN_LEN));
    assert!(validate_create(&request).is_ok());
}

#[test]
fn test_age_bounds() {
    let mut request = base_create();
    request.age = Some(0);
    assert!(validate_create(&request).is_ok());

    request.age = Some(-1);
    assert!(validate_create(&request).unwrap_err().contains("age"));
}

#[test]
fn test_membership_status_values() {
    for good in ["free", "premium", "vip"] {
        let mut request = base_create();
        request.membership_status = Some(good.to_string());
        assert!(validate_create(&request).is_ok(), "{:?} should pass", good);
    }

    let mut request = base_create();
    request.membership_status = Some("gold".to_string());
    let errors = validate_create(&request).unwrap_err();
    assert!(errors.contains("membership_status"));
}

#[test]
fn test_invalid_fields_collected_alongside_missing_ones() {
    let request = CreateUserRequest {
        name: None,
        email: Some("not-an-email".to_string()),
        password: Some("short".to_string()),
        age: Some(-3),
        membership_status: Some("gold".to_string()),
    };
    let errors = validate_create(&request).unwrap_err();
    assert!(errors.contains("name"));
    assert!(errors.contains("email"));
    assert!(errors.contains("password"));
    assert!(errors.contains("age"));
    assert!(errors.contains("membership_status"));
}

// ============================================================================
// Update payload tests ("sometimes" semantics)
// ============================================================================

#[test]
fn test_update_with_no_fields_is_valid() {
    let fields = validate_update(&UpdateUserRequest::default()).unwrap();
    assert!(fields.is_noop());
}

#[test]
fn test_update_single_field() {
    let request = UpdateUserRequest {
        age: Some(30),
        ..Default::default()
    };
    let fields = validate_update(&request).unwrap();
    assert_eq!(fields.age, Some(30));
    assert!(fields.name.is_none());
    assert!(fields.email.is_none());
    assert!(fields.password.is_none());
}

#[test]
fn test_update_negative_age_rejected() {
    let request = UpdateUserRequest {
        age: Some(-1),
        ..Default::default()
    };
    let errors = validate_update(&request).unwrap_err();
    assert!(errors.contains("age"));
}

#[test]
fn test_update_present_fields_follow_create_rules() {
    let request = UpdateUserRequest {
        name: Some(String::new()),
        email: Some("broken".to_string()),
        password: Some("short".to_string()),
        age: None,
        membership_status: Some("gold".to_string()),
    };
    let errors = validate_update(&request).unwrap_err();
    assert!(errors.contains("name"));
    assert!(errors.contains("email"));
    assert!(errors.contains("password"));
    assert!(errors.contains("membership_status"));
    assert!(!errors.contains("age"));
}

#[test]
fn test_update_membership_status_converted() {
    let request = UpdateUserRequest {
        membership_status: Some("vip".to_string()),
        ..Default::default()
    };
    let fields = validate_update(&request).unwrap();
    assert_eq!(fields.membership_status, Some(MembershipStatus::Vip));
}
