use super::{load_settings_with, ClientSettings};

use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

fn temp_settings_file(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let n = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
    let dir = env::temp_dir().join(format!("aq_predictor_config_test_{suffix}_{n}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("predictor.toml");
    fs::write(&path, contents).expect("write settings");
    path
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn missing_file_and_env_yield_defaults() {
    let settings = load_settings_with(&env::temp_dir().join("does-not-exist.toml"), |_| None);
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "service_url = \"https://predictor.example/api\"\nrequest_timeout_secs = 5\n",
    );
    let settings = load_settings_with(&path, |_| None);
    assert_eq!(settings.service_url, "https://predictor.example/api");
    assert_eq!(settings.request_timeout_secs, 5);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let path = temp_settings_file("service_url = \"https://from-file.example\"\n");
    let settings = load_settings_with(
        &path,
        env_from(&[
            ("PREDICTION_SERVICE_URL", "https://plain-env.example"),
            ("APP__SERVICE_URL", "https://app-env.example"),
            ("APP__REQUEST_TIMEOUT_SECS", "12"),
        ]),
    );
    assert_eq!(settings.service_url, "https://app-env.example");
    assert_eq!(settings.request_timeout_secs, 12);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn unparseable_values_are_ignored() {
    let path = temp_settings_file("request_timeout_secs = -3\nservice_url = 7\n");
    let settings = load_settings_with(
        &path,
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon"), ("APP__SERVICE_URL", "  ")]),
    );
    assert_eq!(settings, ClientSettings::default());
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn zero_timeout_is_rejected() {
    let path = temp_settings_file("request_timeout_secs = 0\n");
    let from_file = load_settings_with(&path, |_| None);
    assert_eq!(from_file.request_timeout_secs, 30);

    let from_env = load_settings_with(&path, env_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]));
    assert_eq!(from_env.request_timeout_secs, 30);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}
