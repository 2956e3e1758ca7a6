//! Task types and the owning task store.
//!
//! A task is created once from a validated [`TaskDraft`] and afterwards only
//! its `completed` flag changes.

mod store;

pub use store::TaskStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::energy::EnergyLevel;
use crate::error::ValidationError;

/// Task types offered by the add-task form. `Task::task_type` is free-form,
/// these are only suggestions.
pub const TASK_TYPE_PRESETS: [&str; 4] = ["Admin", "Deep focus", "Creative", "Physical"];

/// Store-assigned task identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(TaskId)
    }
}

/// Task priority. Carried for display only; classification ignores it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(Priority::High),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "low" | "l" => Ok(Priority::Low),
            _ => Err(ValidationError::InvalidPriority(s.to_string())),
        }
    }
}

/// A task in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the store
    pub id: TaskId,
    /// Display name, trimmed and never empty
    pub name: String,
    pub priority: Priority,
    /// Energy required to do the task
    pub energy: EnergyLevel,
    /// Estimated duration in minutes
    pub estimated_minutes: u32,
    /// Free-form label such as "Admin" or "Creative"; may be empty
    #[serde(rename = "type")]
    pub task_type: String,
    pub completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Creation payload supplied by the add-task collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub energy: EnergyLevel,
    /// Signed so that negative form input can be rejected instead of wrapped.
    #[serde(default = "default_minutes")]
    pub estimated_minutes: i64,
    #[serde(default, rename = "type")]
    pub task_type: String,
}

fn default_minutes() -> i64 {
    30
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            priority: Priority::Medium,
            energy: EnergyLevel::Medium,
            estimated_minutes: default_minutes(),
            task_type: TASK_TYPE_PRESETS[0].to_string(),
        }
    }
}

impl TaskDraft {
    /// Draft with the given name and form defaults for everything else.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse raw minutes text from a form field.
    pub fn parse_minutes(raw: &str) -> Result<i64, ValidationError> {
        let trimmed = raw.trim();
        let minutes = trimmed
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidMinutes(raw.to_string()))?;
        if minutes < 0 {
            return Err(ValidationError::NegativeMinutes(minutes));
        }
        Ok(minutes)
    }

    /// Check the draft and return the trimmed name and minutes it would
    /// produce.
    pub fn validate(&self) -> Result<(String, u32), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.estimated_minutes < 0 {
            return Err(ValidationError::NegativeMinutes(self.estimated_minutes));
        }
        let minutes = u32::try_from(self.estimated_minutes)
            .map_err(|_| ValidationError::MinutesOutOfRange(self.estimated_minutes))?;
        Ok((name.to_string(), minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_defaults_match_form() {
        let draft = TaskDraft::default();
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.energy, EnergyLevel::Medium);
        assert_eq!(draft.estimated_minutes, 30);
        assert_eq!(draft.task_type, "Admin");
    }

    #[test]
    fn validate_trims_name() {
        let (name, minutes) = TaskDraft::named("  Reply to emails ").validate().unwrap();
        assert_eq!(name, "Reply to emails");
        assert_eq!(minutes, 30);
    }

    #[test]
    fn validate_rejects_blank_and_negative() {
        assert_eq!(TaskDraft::named("   ").validate(), Err(ValidationError::EmptyName));
        let draft = TaskDraft {
            estimated_minutes: -5,
            ..TaskDraft::named("x")
        };
        assert_eq!(draft.validate(), Err(ValidationError::NegativeMinutes(-5)));
        let draft = TaskDraft {
            estimated_minutes: i64::from(u32::MAX) + 1,
            ..TaskDraft::named("x")
        };
        assert!(matches!(draft.validate(), Err(ValidationError::MinutesOutOfRange(_))));
    }

    #[test]
    fn parse_minutes_handles_form_text() {
        assert_eq!(TaskDraft::parse_minutes(" 45 "), Ok(45));
        assert_eq!(TaskDraft::parse_minutes("0"), Ok(0));
        assert_eq!(TaskDraft::parse_minutes("-3"), Err(ValidationError::NegativeMinutes(-3)));
        assert_eq!(
            TaskDraft::parse_minutes("half an hour"),
            Err(ValidationError::InvalidMinutes("half an hour".into()))
        );
    }

    #[test]
    fn task_serializes_type_field() {
        let task = Task {
            id: TaskId(7),
            name: "Organize files".into(),
            priority: Priority::Low,
            energy: EnergyLevel::Low,
            estimated_minutes: 15,
            task_type: "Admin".into(),
            completed: false,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["type"], "Admin");
        assert_eq!(value["energy"], "low");
    }
}
