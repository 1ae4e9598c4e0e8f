/// Message shown when either login field is left empty.
pub const MSG_EMPTY_FIELDS: &str = "Please fill in all fields";

/// Message shown when a field is present but too short.
pub const MSG_TOO_SHORT: &str =
    "Username must be at least 4 characters and password at least 6 characters.";

pub const MIN_USERNAME_LEN: usize = 4;
pub const MIN_PASSWORD_LEN: usize = 6;

/// ValidationOutcome
///
/// Result of the syntactic credential check. `Invalid` carries the user-facing reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(String),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// validate
///
/// Checks login input before anything is sent to the user service.
/// Rules are applied in order and the first failure wins:
/// 1. a blank field (after trimming) fails with `MSG_EMPTY_FIELDS`;
/// 2. a short username or password fails with `MSG_TOO_SHORT`.
///
/// Lengths count characters of the raw input, not bytes.
pub fn validate(username: &str, password: &str) -> ValidationOutcome {
    if username.trim().is_empty() || password.trim().is_empty() {
        return ValidationOutcome::Invalid(MSG_EMPTY_FIELDS.to_string());
    }

    if username.chars().count() < MIN_USERNAME_LEN || password.chars().count() < MIN_PASSWORD_LEN
    {
        return ValidationOutcome::Invalid(MSG_TOO_SHORT.to_string());
    }

    ValidationOutcome::Valid
}
