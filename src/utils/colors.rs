/// ANSI color helper utilities for terminal output.
use crate::core::status::Urgency;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// high → red, medium → yellow, low → green
pub fn color_for_urgency(u: Urgency) -> &'static str {
    match u {
        Urgency::High => RED,
        Urgency::Medium => YELLOW,
        Urgency::Low => GREEN,
    }
}

/// Grey for placeholder values ("--", empty), unchanged otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
