// File: ./src/client/mod.rs
pub mod auth;
pub mod core;

pub use crate::client::core::{HttpClient, REQUEST_TIMEOUT};
