// Data model for the task list

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A to-do item as stored in the tasks table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned by the store on insert; `None` before the first persist
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    /// ISO-8601 calendar date, stored as text
    pub due_date: String,
    pub completed: bool,
    pub alarm: bool,
}

impl Task {
    /// Build a not-yet-persisted task with the given title and due date
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            due_date: due_date.into(),
            completed: false,
            alarm: false,
        }
    }

    /// Parse `due_date` as a calendar date
    ///
    /// The store never validates the field; this is for display layers that
    /// want to compare against today. Returns `None` for unparseable text.
    pub fn due(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d").ok()
    }
}

/// Partial field set merged onto a stored task by `update`
///
/// Absent fields keep their stored values. A patch cannot clear a
/// description back to `None`; supply an empty string if that matters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
    pub alarm: Option<bool>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn alarm(mut self, alarm: bool) -> Self {
        self.alarm = Some(alarm);
        self
    }

    /// True when no field is set; the store treats such a patch as a no-op
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
            && self.alarm.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("Buy milk", "2024-01-01");
        assert_eq!(task.id, None);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, None);
        assert!(!task.completed);
        assert!(!task.alarm);
    }

    #[test]
    fn test_due_parses_iso_date() {
        let task = Task::new("t", "2024-01-31");
        assert_eq!(task.due(), NaiveDate::from_ymd_opt(2024, 1, 31));
    }

    #[test]
    fn test_due_invalid_text() {
        let task = Task::new("t", "next tuesday");
        assert!(task.due().is_none());
    }

    #[test]
    fn test_task_serialization_round_trip() {
        let task = Task {
            id: Some(7),
            title: "Water plants".to_string(),
            description: Some("the ones on the balcony".to_string()),
            due_date: "2024-06-01".to_string(),
            completed: true,
            alarm: false,
        };

        let json = serde_json::to_string(&task).unwrap();
        let deserialized: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, task);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TaskPatch::new().is_empty());
        assert!(!TaskPatch::new().completed(true).is_empty());
        assert!(!TaskPatch::new().title("x").is_empty());
    }

    #[test]
    fn test_patch_builder() {
        let patch = TaskPatch::new().title("New title").alarm(true);
        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert_eq!(patch.alarm, Some(true));
        assert_eq!(patch.completed, None);
        assert_eq!(patch.due_date, None);
    }
}
