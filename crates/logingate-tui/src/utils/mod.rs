//! Utility functions for display formatting.

pub mod format;

pub use format::{field_tail, format_attempts_left, format_elapsed, mask_password};
