//! Local, synchronous form validation. Nothing here touches the backend.

use std::fmt;

/// Why a sign-up submission was rejected before reaching the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    MissingName,
    MissingPhone,
    InvalidPhone,
}

impl FieldError {
    /// Message shown inline to the user.
    pub fn user_message(self) -> &'static str {
        match self {
            FieldError::MissingName => "Please enter your full name",
            FieldError::MissingPhone => "Please enter your phone number",
            FieldError::InvalidPhone => "Please enter a valid phone number",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for FieldError {}

/// 10–15 digits, optional leading `+`; spaces, hyphens and parentheses are
/// tolerated as separators. No numbering-plan awareness.
pub fn is_valid_phone(phone: &str) -> bool {
    let trimmed = phone.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let mut digits = 0usize;
    for c in rest.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' => {}
            _ => return false,
        }
    }
    (10..=15).contains(&digits)
}

/// Gate for the sign-up form: name and phone must both be present and the
/// phone must pass [`is_valid_phone`].
pub fn check_signup_fields(full_name: &str, phone: &str) -> Result<(), FieldError> {
    if full_name.trim().is_empty() {
        return Err(FieldError::MissingName);
    }
    if phone.trim().is_empty() {
        return Err(FieldError::MissingPhone);
    }
    if !is_valid_phone(phone) {
        return Err(FieldError::InvalidPhone);
    }
    Ok(())
}
