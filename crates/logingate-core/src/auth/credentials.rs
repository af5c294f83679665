use std::fmt;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// Username used when nothing is configured.
pub const DEFAULT_USERNAME: &str = "admin";

/// Password used when nothing is configured.
pub const DEFAULT_PASSWORD: &str = "1234";

/// The one username/password pair the gate accepts.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exact, case-sensitive comparison of both fields.
    ///
    /// Both fields are always compared, each in constant time, so timing does
    /// not reveal which field or how much of it matched.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let username_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let password_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (username_ok & password_ok).into()
    }

    /// Both fields are non-empty
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

// Keep the password out of logs and panic messages
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_is_exact() {
        let cred = Credential::new("admin", "1234");
        assert!(cred.matches("admin", "1234"));
        assert!(!cred.matches("Admin", "1234"));
        assert!(!cred.matches("admin", "12345"));
        assert!(!cred.matches("admin ", "1234"));
        assert!(!cred.matches("", ""));
        // Length mismatches
        assert!(!cred.matches("admin", "123"));
        assert!(!cred.matches("adminx", "1234"));
    }

    #[test]
    fn test_default_credential() {
        let cred = Credential::default();
        assert_eq!(cred.username, "admin");
        assert_eq!(cred.password, "1234");
        assert!(cred.is_complete());
    }

    #[test]
    fn test_is_complete() {
        assert!(!Credential::new("", "1234").is_complete());
        assert!(!Credential::new("admin", "").is_complete());
    }

    #[test]
    fn test_debug_redacts_password() {
        let output = format!("{:?}", Credential::new("admin", "hunter22"));
        assert!(output.contains("admin"));
        assert!(!output.contains("hunter22"));
        assert!(output.contains("<redacted>"));
    }
}
