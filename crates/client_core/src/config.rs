use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

pub const SETTINGS_FILE: &str = "predictor.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    pub service_url: String,
    /// Whole-request timeout; zero is rejected on load.
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            service_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: 30,
        }
    }
}

/// Defaults, then `predictor.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    load_settings_with(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    settings_file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(settings_file) {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            if let Some(v) = file_cfg.get("service_url").and_then(toml::Value::as_str) {
                settings.service_url = v.to_string();
            }
            if let Some(v) = file_cfg
                .get("request_timeout_secs")
                .and_then(toml::Value::as_integer)
                .and_then(|v| u64::try_from(v).ok())
                .filter(|secs| *secs > 0)
            {
                settings.request_timeout_secs = v;
            }
        }
    }

    if let Some(v) = non_empty(env("PREDICTION_SERVICE_URL")) {
        settings.service_url = v;
    }
    if let Some(v) = non_empty(env("APP__SERVICE_URL")) {
        settings.service_url = v;
    }

    if let Some(secs) = env("APP__REQUEST_TIMEOUT_SECS")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
    {
        settings.request_timeout_secs = secs;
    }

    settings
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
