// File: ./src/provider/mod.rs
//! Task-data providers. Exactly one is called per render.
pub mod google;
pub mod placeholder;
pub mod todoist;

use crate::client::HttpClient;
use crate::device::DeviceConfig;
use crate::model::{Project, Task};
use crate::settings::Settings;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProviderKind {
    #[default]
    GoogleTasks,
    Todoist,
    Placeholder,
}

impl ProviderKind {
    pub fn names() -> Vec<String> {
        Self::iter().map(|k| k.to_string()).collect()
    }
}

/// Provider output handed to the layout step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Tasks {
        tasks: Vec<Task>,
        /// Known projects, used to label grouped tasks. Empty for providers
        /// without projects.
        projects: Vec<Project>,
    },
    /// A message shown instead of a task list.
    Prompt(String),
}

/// Base URLs of the remote APIs. Tests point these at a local mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub google_token_uri: String,
    pub google_tasks_api: String,
    pub todoist_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            google_token_uri: google::TOKEN_URI.to_string(),
            google_tasks_api: google::TASKS_API.to_string(),
            todoist_api: todoist::API_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// Every API served from one origin, using the real path layout.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            google_token_uri: format!("{}/token", base),
            google_tasks_api: format!("{}/tasks/v1", base),
            todoist_api: format!("{}/rest/v2", base),
        }
    }
}

pub async fn fetch(
    kind: ProviderKind,
    http: &HttpClient,
    endpoints: &Endpoints,
    settings: &Settings,
    device: &dyn DeviceConfig,
) -> Result<Fetched> {
    log::debug!("Fetching tasks from {}", kind);
    match kind {
        ProviderKind::GoogleTasks => {
            let provider = google::GoogleTasks::new(
                http,
                &endpoints.google_token_uri,
                &endpoints.google_tasks_api,
            );
            let tasks = provider.fetch(settings, device).await?;
            Ok(Fetched::Tasks {
                tasks,
                projects: Vec::new(),
            })
        }
        ProviderKind::Todoist => {
            let provider = todoist::Todoist::new(http, &endpoints.todoist_api);
            let (tasks, projects) = provider.fetch(settings, device).await?;
            Ok(Fetched::Tasks { tasks, projects })
        }
        ProviderKind::Placeholder => Ok(Fetched::Prompt(placeholder::prompt(settings))),
    }
}
