use super::{load_settings_from, Settings, SettingsError};

use std::{
    collections::HashMap,
    env, fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use config::Environment;

fn env_from(pairs: &[(&str, &str)]) -> Environment {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    Environment::with_prefix("APP")
        .separator("__")
        .source(Some(vars))
}

fn temp_settings_file(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("docsearch_settings_test_{suffix}.toml"));
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn missing_file_and_empty_env_yield_defaults() {
    let settings =
        load_settings_from(Path::new("/no/such/docsearch.toml"), env_from(&[])).expect("load");
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "base_url = \"https://docs.example.org/api/search/\"\nplaceholder_term = \"tokio\"\n",
    );
    let settings = load_settings_from(&path, env_from(&[])).expect("load");
    assert_eq!(settings.base_url, "https://docs.example.org/api/search/");
    assert_eq!(settings.placeholder_term, "tokio");
    assert_eq!(settings.request_timeout_secs, 30);
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn environment_wins_over_file() {
    let path = temp_settings_file("viewer_target = \"from-file\"\n");
    let settings = load_settings_from(
        &path,
        env_from(&[
            ("APP__VIEWER_TARGET", "from-env"),
            ("APP__REQUEST_TIMEOUT_SECS", "5"),
        ]),
    )
    .expect("load");
    assert_eq!(settings.viewer_target, "from-env");
    assert_eq!(settings.request_timeout_secs, 5);
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn rejects_relative_base_url() {
    let err = load_settings_from(
        Path::new("/no/such/docsearch.toml"),
        env_from(&[("APP__BASE_URL", "search?q=")]),
    )
    .expect_err("relative url");
    assert!(err.to_string().contains("not an absolute URL"), "{err:#}");
}

#[test]
fn rejects_zero_request_timeout() {
    let err = load_settings_from(
        Path::new("/no/such/docsearch.toml"),
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]),
    )
    .expect_err("zero timeout");
    assert!(
        matches!(err.downcast_ref::<SettingsError>(), Some(SettingsError::ZeroTimeout)),
        "{err:#}"
    );
}

#[test]
fn validate_reports_typed_errors() {
    let blank_target = Settings {
        viewer_target: "  ".into(),
        ..Settings::default()
    };
    assert!(matches!(
        blank_target.validate(),
        Err(SettingsError::EmptyViewerTarget)
    ));

    let ftp = Settings {
        base_url: "ftp://docs.example.org/".into(),
        ..Settings::default()
    };
    assert!(matches!(
        ftp.validate(),
        Err(SettingsError::UnsupportedScheme(url)) if url == "ftp://docs.example.org/"
    ));
}

#[test]
fn rejects_non_http_scheme() {
    let err = load_settings_from(
        Path::new("/no/such/docsearch.toml"),
        env_from(&[("APP__BASE_URL", "ftp://docs.example.org/")]),
    )
    .expect_err("ftp url");
    assert!(err.to_string().contains("http or https"), "{err:#}");
}

#[test]
fn controller_config_carries_endpoint_and_target() {
    let settings = Settings::default();
    let config = settings.controller_config();
    assert_eq!(config.base_url, settings.base_url);
    assert_eq!(config.viewer_target, "docsearch-viewer");
}
