use chrono::Duration;

/// Text for the attempts counter under the login form
pub fn format_attempts_left(remaining: u32) -> String {
    format!("Attempts left: {}", remaining)
}

/// Show the last `width` characters of a field, padded to `width`.
/// Long input scrolls so the cursor end stays visible.
pub fn field_tail(value: &str, width: usize) -> String {
    let len = value.chars().count();
    let visible: String = value.chars().skip(len.saturating_sub(width)).collect();
    format!("{:<width$}", visible, width = width)
}

/// Mask a password for display, padded to `width`
pub fn mask_password(value: &str, width: usize) -> String {
    let masked = "*".repeat(value.chars().count().min(width));
    format!("{:<width$}", masked, width = width)
}

/// Format an elapsed time as a short "ago" string
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds();
    if seconds < 60 {
        // Also covers clock skew
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h ago", seconds / 3600)
    } else {
        format!("{}d ago", seconds / 86400)
    }
}
