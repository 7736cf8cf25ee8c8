use std::io::Write;

use blogkit::config::{LogFormat, SettingsOverrides};
use blogkit::infra::error::InfraError;
use blogkit::infra::telemetry;

#[test]
fn bootstrap_builds_store_and_installs_subscriber_once() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp file");
    file.write_all(
        br#"
[api]
base_url = "http://127.0.0.1:9/blog"

[logging]
level = "debug"
"#,
    )
    .expect("write config");

    let overrides = SettingsOverrides {
        log_json: Some(true),
        ..Default::default()
    };
    let (settings, store) = blogkit::bootstrap(Some(file.path()), &overrides).expect("bootstrap");

    assert_eq!(settings.api.base_url.as_str(), "http://127.0.0.1:9/blog/");
    assert_eq!(settings.logging.format, LogFormat::Json);
    assert!(format!("{store:?}").starts_with("BlogStore"));
    let state = store.snapshot();
    assert!(state.post_list().is_empty());
    assert!(!state.loading());

    let err = telemetry::init(&settings.logging).expect_err("subscriber already installed");
    assert!(matches!(err, InfraError::Telemetry(_)));
}

#[test]
fn bootstrap_reports_invalid_configuration() {
    let overrides = SettingsOverrides {
        api_timeout_seconds: Some(0),
        ..Default::default()
    };
    let err = blogkit::bootstrap(None, &overrides).expect_err("invalid timeout");
    assert!(matches!(err, InfraError::Configuration(_)));
}
