// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::device::DeviceProfile;
use crate::output;
use crate::render::OutputFormat;
use crate::settings::Settings;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub output: OutputFormat,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub device: DeviceProfile,
    /// Passed to the plugin untouched.
    #[serde(default)]
    pub settings: Settings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputFormat::default(),
            log_level: default_log_level(),
            device: DeviceProfile::default(),
            settings: Settings::default(),
        }
    }
}

impl Config {
    /// Config written by `todo-snapshot init`: renders without credentials.
    pub fn starter() -> Self {
        let settings: Settings = [
            ("provider", "placeholder"),
            ("title", crate::settings::DEFAULT_TITLE),
            ("max_tasks", "5"),
        ]
        .into_iter()
        .collect();
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        // Explicitly detect missing file so callers can point at `init`.
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Whether `err` means the config file does not exist, either through our
    /// explicit message or an underlying IO NotFound anywhere in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }
        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        output::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            output::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use crate::device::Orientation;
    use crate::provider::ProviderKind;

    #[test]
    fn test_missing_config_is_detected() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));

        let io = Error::new(std::io::Error::from(std::io::ErrorKind::NotFound)).context("wrapped");
        assert!(Config::is_missing_config_error(&io));
    }

    #[test]
    fn test_save_then_load() {
        let ctx = TestContext::new();
        let config = Config::starter();
        config.save(&ctx).unwrap();
        let loaded = Config::load(&ctx).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.settings.provider().unwrap(),
            ProviderKind::Placeholder
        );
    }

    #[test]
    fn test_parse_hand_written_file() {
        let ctx = TestContext::new();
        fs::write(
            ctx.get_config_file_path().unwrap(),
            r#"
output = "html"

[device]
width = 640
height = 384
orientation = "vertical"

[settings]
provider = "todoist"
max_tasks = 8
"#,
        )
        .unwrap();
        let config = Config::load(&ctx).unwrap();
        assert_eq!(config.output, OutputFormat::Html);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.device.orientation, Orientation::Vertical);
        assert_eq!(config.settings.max_tasks().unwrap(), 8);
    }

    #[test]
    fn test_parse_error_names_file() {
        let ctx = TestContext::new();
        fs::write(ctx.get_config_file_path().unwrap(), "output = [").unwrap();
        let err = Config::load(&ctx).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
        assert!(!Config::is_missing_config_error(&Config::load(&ctx).unwrap_err()));
    }
}
