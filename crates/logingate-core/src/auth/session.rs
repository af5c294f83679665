use chrono::{DateTime, Duration, Utc};

/// Whether the gate is still accepting attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Active,
    Locked,
}

/// Attempt bookkeeping for one interactive run.
///
/// `attempts_remaining` only moves down through failed attempts and back up
/// through [`Session::reset`]. Once locked, a session stays locked until reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    attempts_remaining: u32,
    locked: bool,
    locked_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts_remaining: max_attempts,
            locked: false,
            locked_at: None,
        }
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// When the lockout happened, if the session is locked
    pub fn locked_at(&self) -> Option<DateTime<Utc>> {
        self.locked_at
    }

    pub fn state(&self) -> GateState {
        if self.locked {
            GateState::Locked
        } else {
            GateState::Active
        }
    }

    /// How long the session has been locked (for display)
    pub fn locked_for(&self) -> Option<Duration> {
        self.locked_at.map(|at| Utc::now() - at)
    }

    /// Consume one attempt, locking when none are left.
    /// Returns the attempts remaining afterwards.
    pub(crate) fn record_failure(&mut self) -> u32 {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
        if self.attempts_remaining == 0 && !self.locked {
            self.locked = true;
            self.locked_at = Some(Utc::now());
        }
        self.attempts_remaining
    }

    pub(crate) fn reset(&mut self, max_attempts: u32) {
        *self = Self::new(max_attempts);
    }
}
