//! Phone and sign-up field validation.

use turfconnect_server::validation::{check_signup_fields, is_valid_phone, FieldError};

#[test]
fn accepts_international_format_with_separators() {
    assert!(is_valid_phone("+91 98765 43210"));
    assert!(is_valid_phone("9876543210"));
    assert!(is_valid_phone("(022) 4567-8901"));
}

#[test]
fn rejects_short_and_non_numeric() {
    assert!(!is_valid_phone("123"));
    assert!(!is_valid_phone("abcdefghij"));
    assert!(!is_valid_phone(""));
    // 16 digits is past the upper bound.
    assert!(!is_valid_phone("1234567890123456"));
}

#[test]
fn plus_only_allowed_as_prefix() {
    assert!(!is_valid_phone("98765+43210"));
}

#[test]
fn signup_fields_require_name() {
    assert_eq!(
        check_signup_fields("", "9876543210"),
        Err(FieldError::MissingName)
    );
}

#[test]
fn signup_fields_require_phone() {
    assert_eq!(
        check_signup_fields("Jane Doe", ""),
        Err(FieldError::MissingPhone)
    );
}

#[test]
fn signup_fields_reject_bad_phone() {
    assert_eq!(
        check_signup_fields("Jane Doe", "123"),
        Err(FieldError::InvalidPhone)
    );
}

#[test]
fn signup_fields_accept_valid_input() {
    assert_eq!(check_signup_fields("Jane Doe", "9876543210"), Ok(()));
}

#[test]
fn field_errors_carry_user_messages() {
    assert_eq!(
        FieldError::MissingName.user_message(),
        "Please enter your full name"
    );
    assert_eq!(
        FieldError::InvalidPhone.user_message(),
        "Please enter a valid phone number"
    );
}
