// File: ./src/provider/google.rs
//! Google Tasks (`tasks.list`) with an OAuth installed-app refresh token.
use crate::client::HttpClient;
use crate::device::DeviceConfig;
use crate::model::{Due, Task, TaskStatus};
use crate::settings::Settings;
use anyhow::{Context, Result, anyhow, bail};
use chrono::DateTime;
use serde::Deserialize;
use url::Url;

pub const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const TASKS_API: &str = "https://tasks.googleapis.com/tasks/v1";
pub const SCOPE: &str = "https://www.googleapis.com/auth/tasks.readonly";

const REFRESH_TOKEN_ENV: &[&str] = &["GOOGLE_TASKS_REFRESH_TOKEN"];
const UNTITLED: &str = "Untitled Task";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TaskListResponse {
    #[serde(default)]
    items: Vec<GoogleTask>,
}

#[derive(Debug, Deserialize)]
struct GoogleTask {
    title: Option<String>,
    status: Option<String>,
    notes: Option<String>,
    /// RFC 3339 timestamp; Google only keeps the date part.
    due: Option<String>,
}

impl From<GoogleTask> for Task {
    fn from(raw: GoogleTask) -> Self {
        let title = raw
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        Task {
            title,
            status: Some(TaskStatus::from_google(raw.status.as_deref())),
            priority: None,
            description: raw.notes,
            due: raw.due.map(|d| Due {
                string: format_due(&d),
            }),
            project_id: None,
        }
    }
}

fn format_due(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.naive_utc().date().format("%b %d").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub struct GoogleTasks<'a> {
    http: &'a HttpClient,
    token_uri: &'a str,
    api_base: &'a str,
}

impl<'a> GoogleTasks<'a> {
    pub fn new(http: &'a HttpClient, token_uri: &'a str, api_base: &'a str) -> Self {
        Self {
            http,
            token_uri,
            api_base,
        }
    }

    pub async fn fetch(&self, settings: &Settings, device: &dyn DeviceConfig) -> Result<Vec<Task>> {
        let token = self.access_token(settings, device).await?;
        let max_tasks = settings.max_tasks()?;
        self.list_tasks(&token, settings.list_id(), max_tasks)
            .await
            .context("Failed to fetch tasks")
    }

    async fn access_token(&self, settings: &Settings, device: &dyn DeviceConfig) -> Result<String> {
        let (Some(client_id), Some(client_secret)) =
            (settings.get("client_id"), settings.get("client_secret"))
        else {
            bail!("Google API credentials not configured");
        };

        if let Some(token) = settings.get("access_token") {
            return Ok(token.to_string());
        }

        let refresh_token = settings
            .credential("refresh_token", REFRESH_TOKEN_ENV, device)
            .ok_or_else(|| {
                anyhow!(
                    "Google API authorization missing: no refresh_token for scope {}",
                    SCOPE
                )
            })?;

        let response: TokenResponse = self
            .http
            .post_form(
                self.token_uri,
                &[
                    ("client_id", client_id),
                    ("client_secret", client_secret),
                    ("refresh_token", refresh_token.as_str()),
                    ("grant_type", "refresh_token"),
                ],
            )
            .await
            .context("Failed to obtain Google access token")?;
        Ok(response.access_token)
    }

    pub async fn list_tasks(
        &self,
        token: &str,
        list_id: &str,
        max_tasks: usize,
    ) -> Result<Vec<Task>> {
        let mut url = Url::parse(self.api_base)
            .with_context(|| format!("Invalid Google Tasks API URL '{}'", self.api_base))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Google Tasks API URL cannot be a base"))?
            .pop_if_empty()
            .extend(["lists", list_id, "tasks"]);
        url.query_pairs_mut()
            .append_pair("maxResults", &max_tasks.to_string());

        let response: TaskListResponse = self.http.get_json(url.as_str(), token).await?;
        let mut tasks: Vec<Task> = response.items.into_iter().map(Task::from).collect();
        // The API treats maxResults as a hint.
        tasks.truncate(max_tasks);
        Ok(tasks)
    }
}
