// File: ./src/settings.rs
//! Host-supplied plugin settings.
//!
//! The host hands the plugin an untyped key/value mapping. It is kept as-is
//! and parsed lazily by the accessors below, so unknown keys pass through
//! untouched and a bad value only fails the render that needs it.
use crate::device::DeviceConfig;
use crate::provider::ProviderKind;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

pub const DEFAULT_MAX_TASKS: usize = 5;
pub const DEFAULT_LIST_ID: &str = "@default";
pub const DEFAULT_TITLE: &str = "My Todo List";

/// A single TOML value as written in the `[settings]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<SettingValue> for String {
    fn from(value: SettingValue) -> Self {
        match value {
            SettingValue::Text(s) => s,
            SettingValue::Integer(i) => i.to_string(),
            SettingValue::Float(f) => f.to_string(),
            SettingValue::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, SettingValue>")]
pub struct Settings(BTreeMap<String, String>);

impl From<BTreeMap<String, SettingValue>> for Settings {
    fn from(raw: BTreeMap<String, SettingValue>) -> Self {
        Self(raw.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, treating blank strings as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn max_tasks(&self) -> Result<usize> {
        match self.get("max_tasks") {
            None => Ok(DEFAULT_MAX_TASKS),
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(anyhow!(
                    "max_tasks must be a positive integer (got '{}')",
                    raw
                )),
            },
        }
    }

    pub fn list_id(&self) -> &str {
        self.get_or("list_id", DEFAULT_LIST_ID)
    }

    pub fn title(&self) -> &str {
        self.get_or("title", DEFAULT_TITLE)
    }

    pub fn show_details(&self) -> bool {
        match self.get("show_details") {
            None => true,
            Some(v) => !matches!(
                v.to_ascii_lowercase().as_str(),
                "false" | "0" | "no" | "off"
            ),
        }
    }

    pub fn provider(&self) -> Result<ProviderKind> {
        match self.get("provider") {
            None => Ok(ProviderKind::default()),
            Some(raw) => ProviderKind::from_str(raw).map_err(|_| {
                anyhow!(
                    "Unknown provider '{}' (expected one of: {})",
                    raw,
                    ProviderKind::names().join(", ")
                )
            }),
        }
    }

    /// Looks up a credential: the setting itself first, then each
    /// environment name through the device's lookup, in order.
    pub fn credential(
        &self,
        key: &str,
        env_keys: &[&str],
        device: &dyn DeviceConfig,
    ) -> Option<String> {
        if let Some(v) = self.get(key) {
            return Some(v.to_string());
        }
        env_keys
            .iter()
            .filter_map(|k| device.load_env_key(k))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    }
}
