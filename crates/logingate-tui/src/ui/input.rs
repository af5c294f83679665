//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{can_add_password_char, can_add_username_char, App, AppState, LoginFocus};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    match app.state {
        AppState::LoggingIn => handle_login_input(app, key),
        AppState::LoggedIn => handle_logged_in_input(app, key),
        AppState::Locked => handle_locked_input(app, key),
        AppState::ConfirmingReset => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_dialog(),
            _ => {}
        },
        AppState::ConfirmingQuit => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_quit(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_dialog(),
            _ => {}
        },
        AppState::Quitting => {}
    }
    matches!(app.state, AppState::Quitting)
}

fn handle_login_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        // Ctrl+R resets the form; other control chords are ignored
        if key.code == KeyCode::Char('r') {
            app.request_reset();
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            app.request_quit();
        }
        KeyCode::Down | KeyCode::Tab => {
            // Move to next field
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            // Move to previous field
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => {
                app.login_focus = LoginFocus::Password;
            }
            LoginFocus::Password | LoginFocus::Button => {
                // Outcome is reflected in app state and login_error
                let _ = app.attempt_login();
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.chars().count(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.chars().count(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
}

fn handle_logged_in_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('l') => app.logout(),
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        _ => {}
    }
}

fn handle_locked_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.request_reset(),
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logingate_core::{Credential, GateConfig, LoginGate};

    fn app(max_attempts: u32) -> App {
        let gate = LoginGate::new(GateConfig {
            max_attempts,
            credential: Credential::new("admin", "1234"),
        })
        .unwrap();
        App::new(gate)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn submit(app: &mut App, username: &str, password: &str) {
        app.login_focus = LoginFocus::Username;
        app.login_username.clear();
        app.login_password.clear();
        type_str(app, username);
        press(app, KeyCode::Enter);
        type_str(app, password);
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app(5);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.login_focus, LoginFocus::Password);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.login_focus, LoginFocus::Button);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.login_focus, LoginFocus::Username);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.login_focus, LoginFocus::Button);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.login_focus, LoginFocus::Password);
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut app = app(5);
        type_str(&mut app, "admn");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_str(&mut app, "min");
        assert_eq!(app.login_username, "admin");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.login_focus, LoginFocus::Password);
        type_str(&mut app, "12");
        assert_eq!(app.login_password, "12");
        assert_eq!(app.login_username, "admin");
    }

    #[test]
    fn test_enter_submits_from_password() {
        let mut app = app(5);
        submit(&mut app, "admin", "1234");
        assert_eq!(app.state, AppState::LoggedIn);
    }

    #[test]
    fn test_enter_submits_from_button() {
        let mut app = app(5);
        type_str(&mut app, "admin");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "1234");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.login_focus, LoginFocus::Button);
        type_str(&mut app, "zz");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::LoggedIn);
    }

    #[test]
    fn test_five_misses_lock_then_reset() {
        let mut app = app(5);
        for _ in 0..5 {
            submit(&mut app, "xxx", "9999");
        }
        assert_eq!(app.state, AppState::Locked);

        // Login keys do nothing on the lock screen
        type_str(&mut app, "admin");
        assert_eq!(app.login_username, "xxx");

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state, AppState::ConfirmingReset);
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.state, AppState::LoggingIn);
        assert_eq!(app.gate.attempts_remaining(), 5);
    }

    #[test]
    fn test_ctrl_r_opens_reset_dialog() {
        let mut app = app(5);
        type_str(&mut app, "adm");
        handle_input(
            &mut app,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.state, AppState::ConfirmingReset);
        // The chord is not typed into the field
        assert_eq!(app.login_username, "adm");

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state, AppState::LoggingIn);
        assert_eq!(app.login_username, "adm");
    }

    #[test]
    fn test_escape_then_confirm_quits() {
        let mut app = app(5);
        assert!(!press(&mut app, KeyCode::Esc));
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(press(&mut app, KeyCode::Char('y')));
    }

    #[test]
    fn test_logout_from_welcome() {
        let mut app = app(5);
        submit(&mut app, "admin", "1234");
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.state, AppState::LoggingIn);
        assert!(app.logged_in_as.is_none());
    }
}
