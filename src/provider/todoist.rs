// File: ./src/provider/todoist.rs
//! Todoist REST v2: active tasks grouped by project.
use crate::client::HttpClient;
use crate::device::DeviceConfig;
use crate::model::{Due, Priority, Project, Task};
use crate::settings::Settings;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use url::Url;

pub const API_BASE: &str = "https://api.todoist.com/rest/v2";

/// `OPEN_AI_SECRET` is the name older plugin revisions stored the key under.
const TOKEN_ENV: &[&str] = &["TODOIST_API_TOKEN", "OPEN_AI_SECRET"];

fn default_priority() -> u8 {
    1
}

#[derive(Debug, Deserialize)]
struct TodoistTask {
    content: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_priority")]
    priority: u8,
    due: Option<TodoistDue>,
    project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TodoistDue {
    string: String,
}

#[derive(Debug, Deserialize)]
struct TodoistProject {
    id: String,
    name: String,
}

impl From<TodoistTask> for Task {
    fn from(raw: TodoistTask) -> Self {
        Task {
            title: raw.content,
            status: None,
            priority: Some(Priority::from_api(raw.priority)),
            description: Some(raw.description).filter(|d| !d.trim().is_empty()),
            due: raw.due.map(|d| Due { string: d.string }),
            project_id: raw.project_id,
        }
    }
}

impl From<TodoistProject> for Project {
    fn from(raw: TodoistProject) -> Self {
        Project {
            id: raw.id,
            name: raw.name,
        }
    }
}

pub struct Todoist<'a> {
    http: &'a HttpClient,
    api_base: &'a str,
}

impl<'a> Todoist<'a> {
    pub fn new(http: &'a HttpClient, api_base: &'a str) -> Self {
        Self { http, api_base }
    }

    pub async fn fetch(
        &self,
        settings: &Settings,
        device: &dyn DeviceConfig,
    ) -> Result<(Vec<Task>, Vec<Project>)> {
        let token = settings
            .credential("api_key", TOKEN_ENV, device)
            .ok_or_else(|| anyhow!("Todoist API token not configured"))?;
        let max_tasks = settings.max_tasks()?;
        let base = self.api_base.trim_end_matches('/');

        let projects: Vec<TodoistProject> = self
            .http
            .get_json(&format!("{}/projects", base), &token)
            .await
            .context("Failed to fetch projects")?;
        let projects: Vec<Project> = projects.into_iter().map(Project::from).collect();

        let mut url = Url::parse(&format!("{}/tasks", base))
            .with_context(|| format!("Invalid Todoist API URL '{}'", base))?;
        if let Some(project_id) = settings.get("project_id") {
            url.query_pairs_mut().append_pair("project_id", project_id);
        }
        let raw: Vec<TodoistTask> = self
            .http
            .get_json(url.as_str(), &token)
            .await
            .context("Failed to fetch tasks")?;

        let tasks = group_by_project(
            raw.into_iter().map(Task::from).collect(),
            &projects,
            max_tasks,
        );
        log::debug!(
            "Todoist returned {} task(s) across {} project(s)",
            tasks.len(),
            projects.len()
        );
        Ok((tasks, projects))
    }
}

/// Orders tasks by the position of their project in `projects` (unknown
/// projects last), keeping the API order inside a project, then applies
/// the limit.
pub fn group_by_project(mut tasks: Vec<Task>, projects: &[Project], limit: usize) -> Vec<Task> {
    tasks.sort_by_key(|t| {
        t.project_id
            .as_ref()
            .and_then(|id| projects.iter().position(|p| &p.id == id))
            .unwrap_or(usize::MAX)
    });
    tasks.truncate(limit);
    tasks
}
