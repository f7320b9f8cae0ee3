// File: ./src/model/display.rs
use crate::model::item::{Priority, Task, TaskStatus};
use serde::Serialize;
use std::fmt;

/// Marker drawn in front of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Glyph {
    Unchecked,
    Checked,
    Priority(Priority),
}

impl Glyph {
    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::Unchecked => "☐",
            Glyph::Checked => "☑",
            Glyph::Priority(p) => p.label(),
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One task as it appears on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoLine {
    pub glyph: Glyph,
    pub text: String,
    /// Secondary lines (description, due date) drawn under the task.
    pub details: Vec<String>,
    /// Heading the line is grouped under, e.g. a Todoist project name.
    pub group: Option<String>,
}

impl fmt::Display for TodoLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.glyph, self.text)
    }
}

pub trait TaskDisplay {
    fn glyph(&self) -> Glyph;
    fn detail_lines(&self) -> Vec<String>;
}

impl TaskDisplay for Task {
    fn glyph(&self) -> Glyph {
        if let Some(p) = self.priority {
            return Glyph::Priority(p);
        }
        match self.status {
            Some(TaskStatus::NeedsAction) => Glyph::Unchecked,
            _ => Glyph::Checked,
        }
    }

    fn detail_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(desc) = &self.description
            && let Some(first) = desc.lines().map(str::trim).find(|l| !l.is_empty())
        {
            out.push(first.to_string());
        }
        if let Some(due) = &self.due
            && !due.string.trim().is_empty()
        {
            out.push(format!("Due: {}", due.string.trim()));
        }
        out
    }
}
