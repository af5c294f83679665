use tracing::{debug, info, warn};

use super::credentials::Credential;
use super::session::{GateState, Session};
use super::validation::validate_format;
use crate::config::GateConfig;
use crate::error::{ConfigError, FormatError};

/// Result of a well-formed login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Rejected { attempts_remaining: u32 },
    Locked,
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success)
    }
}

/// Checks login attempts against a fixed credential and locks after too
/// many mismatches.
///
/// The gate owns its [`Session`]. A locked gate answers every attempt with
/// [`LoginOutcome::Locked`] until [`LoginGate::reset`] is called.
#[derive(Debug, Clone)]
pub struct LoginGate {
    credential: Credential,
    max_attempts: u32,
    session: Session,
}

impl LoginGate {
    /// Build a gate from a configuration, rejecting unusable settings.
    pub fn new(config: GateConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(max_attempts = config.max_attempts, "Login gate created");
        Ok(Self {
            session: Session::new(config.max_attempts),
            max_attempts: config.max_attempts,
            credential: config.credential,
        })
    }

    /// Try a username/password pair.
    ///
    /// A locked gate returns `Ok(Locked)` without looking at the input. Badly
    /// formed input returns the `FormatError` and costs no attempt. A
    /// mismatch costs one attempt and locks the gate when the last one is used.
    pub fn attempt(&mut self, username: &str, password: &str) -> Result<LoginOutcome, FormatError> {
        if self.session.is_locked() {
            debug!(username, "Attempt on locked session ignored");
            return Ok(LoginOutcome::Locked);
        }

        if let Err(e) = validate_format(username, password) {
            debug!(username, error = %e, "Attempt failed format validation");
            return Err(e);
        }

        if self.credential.matches(username, password) {
            info!(username, "Login successful");
            return Ok(LoginOutcome::Success);
        }

        let attempts_remaining = self.session.record_failure();
        if self.session.is_locked() {
            warn!(
                username,
                max_attempts = self.max_attempts,
                "Account locked after too many failed attempts"
            );
            Ok(LoginOutcome::Locked)
        } else {
            warn!(username, attempts_remaining, "Login rejected");
            Ok(LoginOutcome::Rejected { attempts_remaining })
        }
    }

    /// Restore the full attempt count and unlock.
    pub fn reset(&mut self) {
        self.session.reset(self.max_attempts);
        info!(max_attempts = self.max_attempts, "Login session reset");
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> GateState {
        self.session.state()
    }

    pub fn is_locked(&self) -> bool {
        self.session.is_locked()
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.session.attempts_remaining()
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for LoginGate {
    fn default() -> Self {
        let config = GateConfig::default();
        Self {
            session: Session::new(config.max_attempts),
            max_attempts: config.max_attempts,
            credential: config.credential,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
