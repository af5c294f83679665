use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoginFocus};
use crate::utils::{field_tail, format_elapsed, mask_password};

use super::styles;

/// Visible width of the username and password fields
const FIELD_WIDTH: usize = 16;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);

    match app.screen() {
        AppState::LoggedIn => render_welcome(frame, app, chunks[1]),
        AppState::Locked => render_locked(frame, app, chunks[1]),
        _ => render_login_form(frame, app, chunks[1]),
    }

    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    match app.state {
        AppState::ConfirmingReset => render_confirm_overlay(frame, "Reset form?", "reset"),
        AppState::ConfirmingQuit => {
            render_confirm_overlay(frame, "Are you sure you want to quit?", "quit")
        }
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(Span::styled("  Login Gate", styles::title_style())))
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_login_form(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(46, 12, area);

    let mut lines = vec![Line::from("")];

    // Username field
    let username_focused = is_focused(app, LoginFocus::Username);
    let username_style = if username_focused {
        styles::selected_style()
    } else {
        styles::field_style()
    };
    let cursor = if username_focused { "▌" } else { " " };
    lines.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("Username: [", styles::muted_style()),
        Span::styled(
            format!("{}{}", field_tail(&app.login_username, FIELD_WIDTH), cursor),
            username_style,
        ),
        Span::styled("]", styles::muted_style()),
    ]));

    // Password field
    let password_focused = is_focused(app, LoginFocus::Password);
    let password_style = if password_focused {
        styles::selected_style()
    } else {
        styles::field_style()
    };
    let cursor = if password_focused { "▌" } else { " " };
    lines.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(
            format!("{}{}", mask_password(&app.login_password, FIELD_WIDTH), cursor),
            password_style,
        ),
        Span::styled("]", styles::muted_style()),
    ]));

    // Login button
    let button_focused = is_focused(app, LoginFocus::Button);
    lines.push(Line::from(""));
    if button_focused {
        lines.push(Line::from(vec![
            Span::raw("                ["),
            Span::styled(" ▶ Login ◀ ", styles::selected_style()),
            Span::raw("]"),
        ]));
    } else {
        lines.push(Line::from(vec![
            Span::raw("                ["),
            Span::styled("   Login   ", styles::field_style()),
            Span::raw("]"),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("      {}", app.attempts_label()),
        styles::attempts_style(app.gate.attempts_remaining()),
    )));

    // Error message
    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    render_dialog(frame, area, lines);
}

fn render_welcome(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(46, 8, area);
    let user = app.logged_in_as.as_deref().unwrap_or_default();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("   Login successful!", styles::success_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Welcome, ", styles::field_style()),
            Span::styled(user.to_string(), styles::highlight_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("   {}", app.attempts_label()),
            styles::muted_style(),
        )),
    ];

    render_dialog(frame, area, lines);
}

fn render_locked(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(46, 9, area);
    let session = app.gate.session();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("   ACCOUNT LOCKED!", styles::locked_style())),
        Line::from(""),
        Line::from(Span::styled(
            format!("   All {} attempts used.", app.gate.max_attempts()),
            styles::field_style(),
        )),
    ];

    if let (Some(at), Some(elapsed)) = (session.locked_at(), session.locked_for()) {
        lines.push(Line::from(Span::styled(
            format!(
                "   Locked at {} ({})",
                at.with_timezone(&Local).format("%H:%M:%S"),
                format_elapsed(elapsed)
            ),
            styles::muted_style(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   Press ", styles::muted_style()),
        Span::styled("[r]", styles::help_key_style()),
        Span::styled(" to reset", styles::muted_style()),
    ]));

    render_dialog(frame, area, lines);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.screen() {
        AppState::LoggedIn => "[l]ogout | [q]uit",
        AppState::Locked => "[r]eset | [q]uit",
        _ => "[Tab] next | [Enter] login | [Ctrl+R] reset | [Esc] quit",
    };

    let left_text = format!(" {} ", app.attempts_label());
    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.chars().count());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_confirm_overlay(frame: &mut Frame, question: &str, action: &str) {
    let area = centered_rect_fixed(46, 7, frame.area());

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("   {}", question),
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(format!(" to {}, ", action), styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    render_dialog(frame, area, lines);
}

fn render_dialog(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Form focus is only shown while the form itself takes input
fn is_focused(app: &App, field: LoginFocus) -> bool {
    app.state == AppState::LoggingIn && app.login_focus == field
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
