// File: ./src/layout.rs
//! Turns provider output into the structured snapshot both renderers draw.
use crate::model::{Project, Task, TaskDisplay, TodoLine};
use crate::provider::Fetched;
use serde::Serialize;

pub const NO_TASKS: &str = "No tasks found";
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Body {
    Tasks(Vec<TodoLine>),
    Empty,
    Prompt(String),
    /// Already prefixed with `Error: `.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub title: String,
    pub body: Body,
}

impl Snapshot {
    pub fn from_fetched(title: &str, fetched: Fetched, show_details: bool) -> Self {
        let body = match fetched {
            Fetched::Prompt(p) => Body::Prompt(p),
            Fetched::Tasks { tasks, .. } if tasks.is_empty() => Body::Empty,
            Fetched::Tasks { tasks, projects } => {
                Body::Tasks(build_lines(tasks, &projects, show_details))
            }
        };
        Self {
            title: title.to_string(),
            body,
        }
    }

    pub fn from_error(title: &str, err: &anyhow::Error) -> Self {
        Self {
            title: title.to_string(),
            body: Body::Error(format!("Error: {:#}", err)),
        }
    }

    /// Task lines, empty unless the body is a task list.
    pub fn lines(&self) -> &[TodoLine] {
        match &self.body {
            Body::Tasks(lines) => lines,
            _ => &[],
        }
    }

    /// Everything the snapshot shows, as plain text, top to bottom.
    pub fn text_lines(&self) -> Vec<String> {
        let mut out = vec![self.title.clone()];
        match &self.body {
            Body::Tasks(lines) => {
                let mut group: Option<&str> = None;
                for line in lines {
                    if line.group.is_some() && line.group.as_deref() != group {
                        group = line.group.as_deref();
                        out.extend(group.map(str::to_string));
                    }
                    out.push(line.to_string());
                    out.extend(line.details.iter().cloned());
                }
            }
            Body::Empty => out.push(NO_TASKS.to_string()),
            Body::Prompt(msg) | Body::Error(msg) => out.push(msg.clone()),
        }
        out
    }
}

pub fn build_lines(tasks: Vec<Task>, projects: &[Project], show_details: bool) -> Vec<TodoLine> {
    tasks
        .into_iter()
        .map(|task| {
            let group = task.project_id.as_ref().and_then(|id| {
                projects
                    .iter()
                    .find(|p| &p.id == id)
                    .map(|p| p.name.clone())
            });
            let details = if show_details {
                task.detail_lines()
            } else {
                Vec::new()
            };
            TodoLine {
                glyph: task.glyph(),
                text: task.title.trim().to_string(),
                details,
                group,
            }
        })
        .collect()
}

/// Shortens `text` to at most `max_chars` characters, marking the cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return text.chars().take(max_chars).collect();
    }
    let mut out: String = text.chars().take(max_chars - ELLIPSIS.len()).collect();
    out.truncate(out.trim_end().len());
    out.push_str(ELLIPSIS);
    out
}
