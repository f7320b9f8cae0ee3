// Crate root library declaration and module exports.
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod device;
pub mod layout;
pub mod logging;
pub mod model;
pub mod output;
pub mod plugin;
pub mod provider;
pub mod render;
pub mod settings;

pub use device::{DeviceConfig, DeviceProfile, Orientation};
pub use plugin::{DisplayPlugin, TodoPlugin};
pub use render::{OutputFormat, RenderedArtifact};
pub use settings::Settings;
