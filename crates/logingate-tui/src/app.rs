//! Application state management for logingate.
//!
//! This module contains the `App` struct that owns the login gate and the
//! login form, and moves between the form, the welcome screen, the lock
//! screen and the confirmation dialogs.

use logingate_core::{FormatError, LoginGate, LoginOutcome};
use tracing::{debug, info};

use crate::utils::format_attempts_left;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for username input.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// State Enums
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    LoggingIn,
    LoggedIn,
    Locked,
    ConfirmingReset,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    pub gate: LoginGate,

    // UI State
    pub state: AppState,
    /// Screen shown underneath a confirmation dialog
    return_state: AppState,

    // Login form state
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    pub logged_in_as: Option<String>,
}

impl App {
    pub fn new(gate: LoginGate) -> Self {
        Self {
            gate,
            state: AppState::LoggingIn,
            return_state: AppState::LoggingIn,
            login_username: String::new(),
            login_password: String::new(),
            login_focus: LoginFocus::Username,
            login_error: None,
            logged_in_as: None,
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Submit the login form to the gate and move to whatever screen the
    /// outcome calls for.
    pub fn attempt_login(&mut self) -> Result<LoginOutcome, FormatError> {
        let username = self.login_username.trim().to_string();
        let result = self.gate.attempt(&username, &self.login_password);

        match result {
            Err(e) => {
                self.login_error = Some(e.to_string());
            }
            Ok(LoginOutcome::Success) => {
                info!(username = %username, "User logged in");
                self.login_password.clear();
                self.login_error = None;
                self.logged_in_as = Some(username);
                self.state = AppState::LoggedIn;
            }
            Ok(LoginOutcome::Rejected { attempts_remaining }) => {
                self.login_password.clear();
                self.login_focus = LoginFocus::Password;
                self.login_error = Some(format!(
                    "Wrong credentials! {} attempts left.",
                    attempts_remaining
                ));
            }
            Ok(LoginOutcome::Locked) => {
                self.login_password.clear();
                self.login_error = None;
                self.state = AppState::Locked;
            }
        }
        result
    }

    /// Start the login process (show login form)
    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// Leave the welcome screen. The attempt count is kept.
    pub fn logout(&mut self) {
        if let Some(user) = self.logged_in_as.take() {
            debug!(username = %user, "User logged out");
        }
        self.clear_form();
        self.start_login();
    }

    // =========================================================================
    // Dialogs
    // =========================================================================

    pub fn request_reset(&mut self) {
        self.open_dialog(AppState::ConfirmingReset);
    }

    pub fn request_quit(&mut self) {
        self.open_dialog(AppState::ConfirmingQuit);
    }

    /// Clear the form and restore the full attempt count
    pub fn confirm_reset(&mut self) {
        self.clear_form();
        self.logged_in_as = None;
        self.gate.reset();
        self.start_login();
    }

    pub fn confirm_quit(&mut self) {
        self.state = AppState::Quitting;
    }

    /// Close a confirmation dialog without acting on it
    pub fn cancel_dialog(&mut self) {
        if self.is_confirming() {
            self.state = self.return_state;
        }
    }

    pub fn is_confirming(&self) -> bool {
        matches!(
            self.state,
            AppState::ConfirmingReset | AppState::ConfirmingQuit
        )
    }

    /// The screen to draw: the dialog's parent while a dialog is open
    pub fn screen(&self) -> AppState {
        if self.is_confirming() {
            self.return_state
        } else {
            self.state
        }
    }

    pub fn attempts_label(&self) -> String {
        format_attempts_left(self.gate.attempts_remaining())
    }

    fn open_dialog(&mut self, dialog: AppState) {
        if !self.is_confirming() {
            self.return_state = self.state;
        }
        self.state = dialog;
    }

    fn clear_form(&mut self) {
        self.login_username.clear();
        self.login_password.clear();
        self.login_error = None;
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use logingate_core::{Credential, GateConfig, GateState};

    fn app(max_attempts: u32) -> App {
        let gate = LoginGate::new(GateConfig {
            max_attempts,
            credential: Credential::new("admin", "1234"),
        })
        .unwrap();
        App::new(gate)
    }

    fn fill(app: &mut App, username: &str, password: &str) {
        app.login_username = username.to_string();
        app.login_password = password.to_string();
    }

    // -------------------------------------------------------------------------
    // Login Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_successful_login() {
        let mut app = app(5);
        fill(&mut app, "admin", "1234");
        assert_eq!(app.attempt_login(), Ok(LoginOutcome::Success));
        assert_eq!(app.state, AppState::LoggedIn);
        assert_eq!(app.logged_in_as.as_deref(), Some("admin"));
        assert!(app.login_password.is_empty());
        assert!(app.login_error.is_none());
    }

    #[test]
    fn test_username_is_trimmed() {
        let mut app = app(5);
        fill(&mut app, "  admin\t", "1234");
        assert_eq!(app.attempt_login(), Ok(LoginOutcome::Success));
        assert_eq!(app.logged_in_as.as_deref(), Some("admin"));
    }

    #[test]
    fn test_password_is_not_trimmed() {
        let mut app = app(5);
        fill(&mut app, "admin", " 1234");
        assert_eq!(
            app.attempt_login(),
            Ok(LoginOutcome::Rejected { attempts_remaining: 4 })
        );
    }

    #[test]
    fn test_format_error_shown_and_free() {
        let mut app = app(5);
        fill(&mut app, "   ", "1234");
        assert_eq!(app.attempt_login(), Err(FormatError::EmptyField));
        assert_eq!(
            app.login_error.as_deref(),
            Some("Username and password required!")
        );
        assert_eq!(app.state, AppState::LoggingIn);
        assert_eq!(app.gate.attempts_remaining(), 5);
        // Fields are left for the user to fix
        assert_eq!(app.login_password, "1234");
    }

    #[test]
    fn test_rejection_clears_password() {
        let mut app = app(5);
        fill(&mut app, "admin", "0000");
        app.attempt_login().unwrap();
        assert_eq!(
            app.login_error.as_deref(),
            Some("Wrong credentials! 4 attempts left.")
        );
        assert_eq!(app.login_username, "admin");
        assert!(app.login_password.is_empty());
        assert_eq!(app.login_focus, LoginFocus::Password);
        assert_eq!(app.attempts_label(), "Attempts left: 4");
    }

    #[test]
    fn test_lockout_switches_screen() {
        let mut app = app(2);
        fill(&mut app, "admin", "0000");
        app.attempt_login().unwrap();
        fill(&mut app, "admin", "0000");
        assert_eq!(app.attempt_login(), Ok(LoginOutcome::Locked));
        assert_eq!(app.state, AppState::Locked);
        assert_eq!(app.gate.state(), GateState::Locked);
    }

    #[test]
    fn test_logout_keeps_attempts() {
        let mut app = app(5);
        fill(&mut app, "admin", "0000");
        app.attempt_login().unwrap();
        fill(&mut app, "admin", "1234");
        app.attempt_login().unwrap();
        assert_eq!(app.state, AppState::LoggedIn);

        app.logout();
        assert_eq!(app.state, AppState::LoggingIn);
        assert!(app.login_username.is_empty());
        assert!(app.logged_in_as.is_none());
        assert_eq!(app.gate.attempts_remaining(), 4);
        assert_eq!(app.login_focus, LoginFocus::Username);
    }

    // -------------------------------------------------------------------------
    // Dialog Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_reset_from_lock_screen() {
        let mut app = app(1);
        fill(&mut app, "admin", "0000");
        app.attempt_login().unwrap();
        assert_eq!(app.state, AppState::Locked);

        app.request_reset();
        assert_eq!(app.state, AppState::ConfirmingReset);
        assert_eq!(app.screen(), AppState::Locked);

        app.confirm_reset();
        assert_eq!(app.state, AppState::LoggingIn);
        assert_eq!(app.gate.attempts_remaining(), 1);
        assert!(!app.gate.is_locked());
        assert!(app.login_username.is_empty());
        assert!(app.login_password.is_empty());
    }

    #[test]
    fn test_cancel_reset_keeps_everything() {
        let mut app = app(5);
        fill(&mut app, "admin", "0000");
        app.attempt_login().unwrap();

        app.request_reset();
        app.cancel_dialog();
        assert_eq!(app.state, AppState::LoggingIn);
        assert_eq!(app.login_username, "admin");
        assert_eq!(app.gate.attempts_remaining(), 4);
    }

    #[test]
    fn test_quit_dialog() {
        let mut app = app(5);
        app.request_quit();
        assert_eq!(app.state, AppState::ConfirmingQuit);
        app.cancel_dialog();
        assert_eq!(app.state, AppState::LoggingIn);

        app.request_quit();
        app.confirm_quit();
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn test_nested_dialog_returns_to_screen() {
        let mut app = app(5);
        app.request_reset();
        app.request_quit();
        app.cancel_dialog();
        assert_eq!(app.state, AppState::LoggingIn);
    }

    #[test]
    fn test_cancel_without_dialog_is_noop() {
        let mut app = app(5);
        app.cancel_dialog();
        assert_eq!(app.state, AppState::LoggingIn);
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_username_char() {
        assert!(can_add_username_char(0, 'a'));
        assert!(can_add_username_char(49, 'z'));
        assert!(!can_add_username_char(50, 'a'));
        assert!(!can_add_username_char(0, '\x00'));
        assert!(!can_add_username_char(0, '\n'));
        assert!(!can_add_username_char(0, '\t'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\r'));
    }
}
