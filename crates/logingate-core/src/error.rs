use thiserror::Error;

/// Reasons a username/password pair is rejected before it is compared.
///
/// The `Display` text is shown to the user as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("Username and password required!")]
    EmptyField,

    #[error("Username must be 3+ characters!")]
    UsernameTooShort,

    #[error("Password must be 4+ characters!")]
    PasswordTooShort,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("Configured credential must have a non-empty username and password")]
    EmptyCredential,

    #[error("Configured credential could never log in: {0}")]
    CredentialFormat(FormatError),

    #[error("Configured username must not start or end with whitespace")]
    UntrimmedUsername,

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}
