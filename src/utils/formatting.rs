//! Formatting utilities used for CLI outputs.

use crate::models::task_type::TaskType;
use crate::utils::date::local_from_epoch;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// `YYYY-MM-DD HH:MM` in local time, or `--` for missing / out-of-range values.
pub fn format_epoch(ts: Option<i64>) -> String {
    ts.and_then(|t| local_from_epoch(t).ok())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "--".to_string())
}

pub fn mins2readable(mins: i64, short: bool) -> String {
    let abs_m = mins.abs();
    let hours = abs_m / 60;
    let minutes = abs_m % 60;
    let sign = if mins < 0 { "-" } else { "" };

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}

/// "A", "A and B", "A, B and C".
pub fn join_names<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

/// Label and ANSI color for a task type.
pub fn describe_task_type(t: TaskType) -> (&'static str, &'static str) {
    match t {
        TaskType::Plant => ("Plant", "\x1b[32m"),
        TaskType::Chore => ("Chore", "\x1b[34m"),
        TaskType::OneTime => ("One-time", "\x1b[35m"),
    }
}
