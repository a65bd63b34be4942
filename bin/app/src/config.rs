//! Centralized application configuration.
//!
//! Strongly-typed configuration for the shell, loaded via the `config`
//! crate from `ZIPFIT_`-prefixed environment variables. The base path
//! plays the role of the build-time base URL the original deployment
//! injected into its history mode.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Deploy prefix prepended to every history href. Empty means the
    /// application is served from the domain root.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Id of the host element the shell mounts into.
    #[serde(default = "default_mount_id")]
    pub mount_id: String,

    /// Document title applied to routes that declare none.
    #[serde(default = "default_fallback_title")]
    pub fallback_title: String,

    /// Per-hook timeout in milliseconds. A hook that has not signalled its
    /// continuation in time fails the navigation instead of stalling it.
    #[serde(default = "default_hook_timeout_ms")]
    pub hook_timeout_ms: u64,
}

fn default_base_path() -> String {
    String::new()
}

fn default_mount_id() -> String {
    "app".to_string()
}

fn default_fallback_title() -> String {
    "ZIP FIT".to_string()
}

fn default_hook_timeout_ms() -> u64 {
    5000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            mount_id: default_mount_id(),
            fallback_title: default_fallback_title(),
            hook_timeout_ms: default_hook_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if present configuration values are invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("ZIPFIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
