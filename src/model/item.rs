// File: ./src/model/item.rs
//! Provider-neutral task records.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TaskStatus {
    NeedsAction,
    Completed,
}

impl TaskStatus {
    /// Google Tasks only reports `needsAction` for open tasks; any other
    /// value (or none at all) is shown as done.
    pub fn from_google(raw: Option<&str>) -> Self {
        match raw {
            Some("needsAction") => Self::NeedsAction,
            _ => Self::Completed,
        }
    }
}

/// Todoist priority, named the way the Todoist UI shows it.
///
/// The REST API counts the other way round: `4` is urgent (`P1`), `1` is
/// the default (`P4`).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
}

impl Priority {
    pub fn from_api(value: u8) -> Self {
        match value {
            4 => Self::P1,
            3 => Self::P2,
            2 => Self::P3,
            _ => Self::P4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Due {
    /// Human readable form, e.g. "tomorrow" or "Oct 20".
    pub string: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub description: Option<String>,
    pub due: Option<Due>,
    pub project_id: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: None,
            priority: None,
            description: None,
            due: None,
            project_id: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}
