use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use ansi_term::Colour;
use regex::Regex;

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(re: &Regex, s: &str) -> String {
    re.replace_all(s, "").into_owned()
}

/// ANSI colour for an operation name.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "complete" => Colour::Cyan,
        "availability" => Colour::Blue,
        "reset" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Rows of the internal log, optionally only one operation.
    pub fn entries(pool: &DbPool, operation: Option<&str>) -> AppResult<Vec<LogEntry>> {
        let mut entries = load_log(&pool.conn)?;
        if let Some(op) = operation {
            entries.retain(|e| e.operation == op);
        }
        Ok(entries)
    }

    pub fn print_log(pool: &DbPool, operation: Option<&str>) -> AppResult<()> {
        let ansi = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| AppError::Other(e.to_string()))?;
        let entries = Self::entries(pool, operation)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rows: Vec<(i64, String, String, String, String)> = entries
            .into_iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(e.date);
                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                (e.id, date, e.operation, op_target, e.message)
            })
            .collect();

        let op_w = rows
            .iter()
            .map(|(_, _, _, op_target, _)| op_target.chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = rows
            .iter()
            .map(|(id, _, _, _, _)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = rows
            .iter()
            .map(|(_, date, _, _, _)| date.len())
            .max()
            .unwrap_or(10);

        println!("📜 Internal log:\n");

        for (id, date, operation, op_target, message) in rows {
            let color = color_for_operation(&operation);

            let visible = if op_target.chars().count() > MAX_OP_WIDTH {
                let mut s: String = op_target.chars().take(MAX_OP_WIDTH - 3).collect();
                s.push_str("...");
                s
            } else {
                op_target
            };

            // only the operation word is coloured
            let colored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&ansi, &colored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                colored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
