use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier. The backend hands out integers today, but the
/// client never interprets them, so string ids are accepted too.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(id) => write!(f, "{id}"),
            ResourceId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    /// Comma-separated by convention; shown verbatim.
    #[serde(default)]
    pub tags: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| priority.as_str() == raw)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub note_id: Option<ResourceId>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Note creation form. Serialised as-is for `POST /notes`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: String,
}

/// Task creation form. Serialised as-is for `POST /tasks`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub from: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            from: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            from: Sender::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_note() {
        let raw = r#"{
            "id": 7,
            "title": "Groceries",
            "content": null,
            "tags": "home",
            "created_at": "2025-03-01T09:30:00.123456",
            "updated_at": "2025-03-01T09:30:00.123456"
        }"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.id, ResourceId::Int(7));
        assert_eq!(note.content, None);
        assert_eq!(note.tags.as_deref(), Some("home"));
    }

    #[test]
    fn task_defaults_fill_missing_enums() {
        let raw = r#"{"id":"t-1","title":"Call","created_at":"2025-03-01T09:30:00"}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.id.to_string(), "t-1");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[test]
    fn task_draft_uses_wire_names() {
        let draft = TaskDraft {
            title: "Ship".into(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            ..TaskDraft::default()
        };
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["status"], "in_progress");
        assert_eq!(body["priority"], "high");
        assert_eq!(body["description"], "");
    }

    #[test]
    fn status_and_priority_parse_round_trip_labels() {
        assert_eq!(TaskStatus::parse("done"), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::parse("blocked"), None);
        assert_eq!(TaskPriority::parse("low"), Some(TaskPriority::Low));
    }
}
