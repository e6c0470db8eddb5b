use std::{collections::HashMap, fs, path::Path};

use crate::DEFAULT_SERVER_URL;

pub const SETTINGS_FILE: &str = "converter.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            log_filter: "warn".into(),
        }
    }
}

/// Defaults, then `converter.toml` in the working directory, then the
/// environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file_overrides(&mut settings, &raw),
        Err(err) => tracing::debug!(path = %path.display(), "no settings file loaded: {err}"),
    }
    apply_env_overrides(&mut settings, env);

    settings
}

fn apply_file_overrides(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            tracing::warn!("ignoring malformed settings file: {err}");
            return;
        }
    };
    if let Some(v) = non_empty(file_cfg.get("server_url").cloned()) {
        settings.server_url = v;
    }
    if let Some(v) = non_empty(file_cfg.get("log_filter").cloned()) {
        settings.log_filter = v;
    }
}

fn apply_env_overrides(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    if let Some(v) = non_empty(env("CONVERTER_SERVER_URL")) {
        settings.server_url = v;
    }
    if let Some(v) = non_empty(env("APP__SERVER_URL")) {
        settings.server_url = v;
    }

    if let Some(v) = non_empty(env("CONVERTER_LOG")) {
        settings.log_filter = v;
    }
    if let Some(v) = non_empty(env("APP__LOG_FILTER")) {
        settings.log_filter = v;
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
