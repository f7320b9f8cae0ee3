// File: ./src/plugin.rs
//! The render entry point the host calls once per refresh.
use crate::client::HttpClient;
use crate::device::DeviceConfig;
use crate::layout::Snapshot;
use crate::provider::{self, Endpoints, Fetched, ProviderKind};
use crate::render::{OutputFormat, RenderedArtifact};
use crate::settings::{DEFAULT_LIST_ID, DEFAULT_MAX_TASKS, DEFAULT_TITLE, Settings};
use anyhow::Result;
use serde::Serialize;
use std::future::Future;

pub const PLUGIN_ID: &str = "todo_snapshot";

/// Capability a host needs from a display plugin.
pub trait DisplayPlugin {
    fn id(&self) -> &'static str;

    fn settings_template(&self) -> SettingsTemplate;

    /// Never fails: problems are drawn into the artifact.
    fn render(
        &self,
        settings: &Settings,
        device: &dyn DeviceConfig,
    ) -> impl Future<Output = RenderedArtifact> + Send;
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingField {
    pub key: &'static str,
    pub label: &'static str,
    pub default: Option<String>,
    /// Shown masked in the host UI.
    pub secret: bool,
}

impl SettingField {
    fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            default: None,
            secret: false,
        }
    }

    fn default_value(mut self, value: impl ToString) -> Self {
        self.default = Some(value.to_string());
        self
    }

    fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsTemplate {
    pub plugin_id: &'static str,
    /// Lets the host offer its shared colour/frame style controls.
    pub style_settings: bool,
    pub providers: Vec<String>,
    pub fields: Vec<SettingField>,
}

#[derive(Debug, Clone)]
pub struct TodoPlugin {
    http: HttpClient,
    endpoints: Endpoints,
    format: OutputFormat,
}

impl TodoPlugin {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            http: HttpClient::new(),
            endpoints: Endpoints::default(),
            format,
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    async fn fetch(&self, settings: &Settings, device: &dyn DeviceConfig) -> Result<Fetched> {
        let kind: ProviderKind = settings.provider()?;
        provider::fetch(kind, &self.http, &self.endpoints, settings, device).await
    }

    pub async fn snapshot(&self, settings: &Settings, device: &dyn DeviceConfig) -> Snapshot {
        let title = settings.title();
        match self.fetch(settings, device).await {
            Ok(fetched) => Snapshot::from_fetched(title, fetched, settings.show_details()),
            Err(e) => {
                log::error!("Rendering error message instead of tasks: {:#}", e);
                Snapshot::from_error(title, &e)
            }
        }
    }
}

impl DisplayPlugin for TodoPlugin {
    fn id(&self) -> &'static str {
        PLUGIN_ID
    }

    fn settings_template(&self) -> SettingsTemplate {
        SettingsTemplate {
            plugin_id: PLUGIN_ID,
            style_settings: true,
            providers: ProviderKind::names(),
            fields: vec![
                SettingField::new("provider", "Task provider")
                    .default_value(ProviderKind::default()),
                SettingField::new("title", "Title").default_value(DEFAULT_TITLE),
                SettingField::new("max_tasks", "Maximum tasks").default_value(DEFAULT_MAX_TASKS),
                SettingField::new("show_details", "Show descriptions and due dates")
                    .default_value(true),
                SettingField::new("client_id", "Google client ID"),
                SettingField::new("client_secret", "Google client secret").secret(),
                SettingField::new("refresh_token", "Google refresh token").secret(),
                SettingField::new("list_id", "Google task list").default_value(DEFAULT_LIST_ID),
                SettingField::new("api_key", "Todoist API token").secret(),
                SettingField::new("project_id", "Todoist project"),
                SettingField::new("prompt", "Placeholder text"),
            ],
        }
    }

    async fn render(&self, settings: &Settings, device: &dyn DeviceConfig) -> RenderedArtifact {
        let (width, height) = device.dimensions();
        let snapshot = self.snapshot(settings, device).await;
        let artifact = RenderedArtifact::draw(snapshot, width, height, self.format);
        log::info!(
            "Rendered {}x{} {} with {} task line(s)",
            width,
            height,
            artifact.extension(),
            artifact.lines().len()
        );
        if artifact.hidden > 0 {
            log::warn!("{} task line(s) did not fit on the display", artifact.hidden);
        }
        artifact
    }
}
