use crate::error::FormatError;

/// Minimum username length, in characters.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Check that a username/password pair is well-formed.
///
/// Empty fields are reported first, then the username length, then the
/// password length. Lengths are counted in `char`s so multi-byte input is not
/// penalized.
pub fn validate_format(username: &str, password: &str) -> Result<(), FormatError> {
    if username.is_empty() || password.is_empty() {
        return Err(FormatError::EmptyField);
    }
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(FormatError::UsernameTooShort);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FormatError::PasswordTooShort);
    }
    Ok(())
}

/// Check only the username half, for flows that collect fields one at a time.
pub fn validate_username(username: &str) -> Result<(), FormatError> {
    if username.is_empty() {
        return Err(FormatError::EmptyField);
    }
    if username.chars().count() < MIN_USERNAME_LENGTH {
        return Err(FormatError::UsernameTooShort);
    }
    Ok(())
}

/// Check only the password half, for flows that collect fields one at a time.
pub fn validate_password(password: &str) -> Result<(), FormatError> {
    if password.is_empty() {
        return Err(FormatError::EmptyField);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FormatError::PasswordTooShort);
    }
    Ok(())
}
