// File: ./src/device.rs
//! The display the snapshot is rendered for.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// What the host exposes about the target display.
pub trait DeviceConfig: Send + Sync + std::fmt::Debug {
    /// Native panel resolution as (width, height).
    fn resolution(&self) -> (u32, u32);
    fn orientation(&self) -> Orientation;
    /// Environment lookup for secrets the host keeps outside the settings.
    fn load_env_key(&self, key: &str) -> Option<String>;

    /// Canvas size after applying orientation.
    fn dimensions(&self) -> (u32, u32) {
        let (w, h) = self.resolution();
        match self.orientation() {
            Orientation::Horizontal => (w, h),
            Orientation::Vertical => (h, w),
        }
    }
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    480
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub orientation: Orientation,
    /// Values that shadow the process environment.
    #[serde(skip)]
    env_overrides: HashMap<String, String>,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            orientation: Orientation::default(),
            env_overrides: HashMap::new(),
        }
    }
}

impl DeviceProfile {
    pub fn new(width: u32, height: u32, orientation: Orientation) -> Self {
        Self {
            width,
            height,
            orientation,
            env_overrides: HashMap::new(),
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_overrides.insert(key.into(), value.into());
        self
    }
}

impl DeviceConfig for DeviceProfile {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn load_env_key(&self, key: &str) -> Option<String> {
        if let Some(v) = self.env_overrides.get(key) {
            return Some(v.clone());
        }
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::str::FromStr;

    #[test]
    fn test_vertical_swaps_dimensions() {
        let h = DeviceProfile::new(800, 480, Orientation::Horizontal);
        let v = DeviceProfile::new(800, 480, Orientation::Vertical);
        assert_eq!(h.dimensions(), (800, 480));
        assert_eq!(v.dimensions(), (480, 800));
    }

    #[test]
    fn test_orientation_parsing() {
        assert_eq!(
            Orientation::from_str("Vertical").unwrap(),
            Orientation::Vertical
        );
        let profile: DeviceProfile = toml::from_str("orientation = \"vertical\"").unwrap();
        assert_eq!(profile.orientation, Orientation::Vertical);
        assert_eq!(profile.resolution(), (800, 480));
    }

    #[test]
    #[serial]
    fn test_env_lookup_falls_back_to_process_env() {
        unsafe {
            std::env::set_var("TODO_SNAPSHOT_TEST_KEY", "process");
        }
        let plain = DeviceProfile::default();
        assert_eq!(
            plain.load_env_key("TODO_SNAPSHOT_TEST_KEY").as_deref(),
            Some("process")
        );

        let shadowed = DeviceProfile::default().with_env("TODO_SNAPSHOT_TEST_KEY", "override");
        assert_eq!(
            shadowed.load_env_key("TODO_SNAPSHOT_TEST_KEY").as_deref(),
            Some("override")
        );
        unsafe {
            std::env::remove_var("TODO_SNAPSHOT_TEST_KEY");
        }
    }
}
