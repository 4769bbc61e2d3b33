use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RouteConfig {
    page: String,
    fragment: String,
    label: String,
    icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiConfig {
    base_url: String,
    files_path: String,
    uploads_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UiConfig {
    dialog_exit_delay_ms: u64,
    small_screen_max_width_px: u32,
    search_result_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ToastConfig {
    default_duration_ms: u32,
    shortcut_duration_ms: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppConfigFile {
    schema_version: u32,
    default_page: String,
    routes: Vec<RouteConfig>,
    api: ApiConfig,
    ui: UiConfig,
    toast: ToastConfig,
}

fn reject(path: &Path, reason: String) -> ! {
    panic!("invalid app config {}: {reason}", path.display())
}

fn validate(path: &Path, config: &AppConfigFile) {
    let fail = |reason: String| reject(path, reason);

    if config.schema_version != 1 {
        fail(format!(
            "schema mismatch: expected 1 found {}",
            config.schema_version
        ));
    }
    if config.routes.is_empty() {
        fail("route table is empty".to_string());
    }
    let mut seen = HashSet::new();
    for route in &config.routes {
        if route.page.trim().is_empty() {
            fail("route with an empty page name".to_string());
        }
        if !seen.insert(route.page.as_str()) {
            fail(format!("duplicate page `{}`", route.page));
        }
        if !route.fragment.starts_with('/') {
            fail(format!(
                "fragment `{}` of page `{}` must start with `/`",
                route.fragment, route.page
            ));
        }
    }
    if !seen.contains(config.default_page.as_str()) {
        fail(format!(
            "default page `{}` is not routed",
            config.default_page
        ));
    }
    if config.ui.dialog_exit_delay_ms == 0 {
        fail("ui.dialog_exit_delay_ms must be positive".to_string());
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("app.config.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let config: AppConfigFile = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&path, &config);

    let json = serde_json::to_string_pretty(&config).expect("serialize app config");
    let generated = format!(
        "/// Build-time validated app configuration JSON.\n\
pub const APP_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("app_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
