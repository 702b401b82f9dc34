//! Text of the daily reminder sent to each member. Delivery is not handled here.

use crate::utils::formatting::join_names;

const MAX_LISTED: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub title: String,
    pub body: String,
}

fn describe_group(label: &str, names: &[String]) -> Option<String> {
    if names.is_empty() {
        return None;
    }
    if names.len() <= MAX_LISTED {
        return Some(format!("{}: {}", label, join_names(names)));
    }
    let remaining = names.len() - MAX_LISTED;
    Some(format!(
        "{}: {} and {} more",
        label,
        join_names(&names[..MAX_LISTED]),
        remaining
    ))
}

/// Morning reminder listing due chores and plants by name.
pub fn build_reminder(member_name: &str, due_chores: &[String], due_plants: &[String]) -> Reminder {
    let title = format!("Good morning, {}! ☀️", member_name);

    let parts: Vec<String> = [
        describe_group("Chores", due_chores),
        describe_group("Plants to water", due_plants),
    ]
    .into_iter()
    .flatten()
    .collect();

    let body = match parts.as_slice() {
        [] => "No tasks for you today! Enjoy your day! 🎉".to_string(),
        [only] => format!("{}! 🌟", only),
        [first, second] => format!("{}. {}. 🌟", first, second),
        _ => "You have tasks to do today! 🌟".to_string(),
    };

    Reminder { title, body }
}
