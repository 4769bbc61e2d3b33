//! Build-time application configuration: routes, backend endpoints, and UI timings.
//!
//! `build.rs` validates `app.config.toml` and embeds it as JSON; this module decodes it.

use std::time::Duration;

use leptos::logging;
use platform_host::ApiEndpoints;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{PageName, RouteEntry, RouteTable};

include!(concat!(env!("OUT_DIR"), "/app_config_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One routed page.
pub struct RouteConfig {
    /// Logical page name, also the address fragment.
    pub page: String,
    /// Fragment URL path.
    pub fragment: String,
    /// Sidebar label.
    pub label: String,
    /// Sidebar icon token.
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// UI timings and limits.
pub struct UiConfig {
    /// Delay between hiding a dialog and unmounting it.
    pub dialog_exit_delay_ms: u64,
    /// Widest viewport treated as a small screen by the sidebar.
    pub small_screen_max_width_px: u32,
    /// Maximum entries in the search dropdown.
    pub search_result_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Toast durations.
pub struct ToastConfig {
    /// Duration used by `Toaster::show` when none is given.
    pub default_duration_ms: u32,
    /// Duration used by the `success`/`error`/`warning`/`info` shortcuts.
    pub shortcut_duration_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Decoded application configuration.
pub struct AppConfig {
    /// Manifest schema version.
    pub schema_version: u32,
    /// Page shown when the address fragment names no known page.
    pub default_page: String,
    /// Routed pages in sidebar order.
    pub routes: Vec<RouteConfig>,
    /// Backend endpoints.
    pub api: ApiEndpoints,
    /// UI timings and limits.
    pub ui: UiConfig,
    /// Toast durations.
    pub toast: ToastConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let route = |page: &str, label: &str, icon: &str| RouteConfig {
            page: page.to_string(),
            fragment: format!("/pages/{page}.html"),
            label: label.to_string(),
            icon: icon.to_string(),
        };
        Self {
            schema_version: 1,
            default_page: "myfile".to_string(),
            routes: vec![
                route("upload", "Upload", "upload"),
                route("myfile", "My files", "folder"),
                route("stats", "Statistics", "chart-pie"),
                route("setting", "Settings", "gear"),
            ],
            api: ApiEndpoints::default(),
            ui: UiConfig {
                dialog_exit_delay_ms: 200,
                small_screen_max_width_px: 1000,
                search_result_limit: 10,
            },
            toast: ToastConfig {
                default_duration_ms: 3000,
                shortcut_duration_ms: 2000,
            },
        }
    }
}

impl AppConfig {
    /// Route table in sidebar order.
    pub fn route_table(&self) -> RouteTable {
        RouteTable::new(self.routes.iter().map(|route| RouteEntry {
            page: PageName::new(&route.page),
            fragment: route.fragment.clone(),
            label: route.label.clone(),
            icon: route.icon.clone(),
        }))
    }

    /// Backend endpoints.
    pub fn endpoints(&self) -> ApiEndpoints {
        self.api.clone()
    }

    /// Dialog exit-animation delay.
    pub fn dialog_exit_delay(&self) -> Duration {
        Duration::from_millis(self.ui.dialog_exit_delay_ms)
    }

    /// Default page as a [`PageName`].
    pub fn default_page(&self) -> PageName {
        PageName::new(&self.default_page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors raised while decoding the embedded configuration.
pub enum ConfigError {
    /// The embedded JSON does not match [`AppConfig`].
    #[error("app config decode failed: {0}")]
    Decode(String),
}

/// Returns the embedded configuration JSON.
pub fn app_config_json() -> &'static str {
    APP_CONFIG_JSON
}

/// Decodes the embedded configuration.
///
/// # Errors
///
/// Returns [`ConfigError::Decode`] when the embedded JSON does not decode.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    decode_app_config(APP_CONFIG_JSON)
}

fn decode_app_config(raw: &str) -> Result<AppConfig, ConfigError> {
    serde_json::from_str(raw).map_err(|err| ConfigError::Decode(err.to_string()))
}

/// Decodes the embedded configuration, logging and falling back to [`AppConfig::default`].
pub fn app_config() -> AppConfig {
    load_app_config().unwrap_or_else(|err| {
        logging::error!("{err}; using built-in defaults");
        AppConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn shipped_config_matches_the_built_in_defaults() {
        assert_eq!(load_app_config(), Ok(AppConfig::default()));
    }

    #[test]
    fn route_table_keeps_sidebar_order() {
        let table = AppConfig::default().route_table();
        let pages: Vec<_> = table
            .entries()
            .iter()
            .map(|entry| entry.page.as_str().to_string())
            .collect();

        assert_eq!(pages, vec!["upload", "myfile", "stats", "setting"]);
        assert_eq!(
            table.resolve("stats").map(|entry| entry.fragment.as_str()),
            Some("/pages/stats.html")
        );
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(
            decode_app_config("{\"schema_version\": 1}"),
            Err(ConfigError::Decode(_))
        ));
    }

    #[test]
    fn exit_delay_reads_milliseconds() {
        assert_eq!(
            AppConfig::default().dialog_exit_delay(),
            Duration::from_millis(200)
        );
    }
}
