use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of task a completion refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Plant,
    Chore,
    OneTime,
}

impl TaskType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            TaskType::Plant => "plant",
            TaskType::Chore => "chore",
            TaskType::OneTime => "one_time",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "plant" => Some(TaskType::Plant),
            "chore" => Some(TaskType::Chore),
            "one_time" => Some(TaskType::OneTime),
            _ => None,
        }
    }

    /// Helper: accept CLI spellings ("one-time", "Chore", ...)
    pub fn from_code(code: &str) -> Option<Self> {
        TaskType::from_db_str(&code.trim().to_lowercase().replace('-', "_"))
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
