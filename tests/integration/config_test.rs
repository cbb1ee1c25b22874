//! Settings Integration Tests
//!
//! Settings written through `ConfigService` and consumed by the notifier.

use std::sync::Arc;

use tracker_telegram::{ConfigService, NotifierService, SettingsUpdate};
use tracker_telegram_core::{InMemoryDirectory, Project, ProxyConfig, ProxyProtocol};

#[test]
fn test_settings_file_round_trip_with_proxy() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("settings.json");
    let mut config = ConfigService::at(&path).unwrap();

    config
        .update_config(SettingsUpdate {
            telegram_bot_token: Some("123:abc".to_string()),
            channel: Some("-1001".to_string()),
            host_name: Some("tracker.example".to_string()),
            protocol: Some("https".to_string()),
            proxy: Some(Some(ProxyConfig {
                protocol: ProxyProtocol::Socks5,
                host: "127.0.0.1".to_string(),
                port: 1080,
                username: None,
                password: None,
            })),
            ..Default::default()
        })
        .unwrap();

    let reopened = ConfigService::at(&path).unwrap();
    let settings = reopened.get_config();
    assert_eq!(settings.host_url(), "https://tracker.example");
    assert_eq!(
        settings.proxy.as_ref().map(|p| p.protocol.clone()),
        Some(ProxyProtocol::Socks5)
    );

    // A proxied client can be built from the stored settings
    let dir = InMemoryDirectory::new().with_project(Project::new(1, "Ops"));
    assert!(NotifierService::new(reopened.snapshot(), Arc::new(dir)).is_ok());
}

#[test]
fn test_clearing_proxy() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("settings.json");
    let mut config = ConfigService::at(&path).unwrap();

    config
        .update_config(SettingsUpdate {
            proxy: Some(Some(ProxyConfig {
                protocol: ProxyProtocol::Http,
                host: "proxy.local".to_string(),
                port: 3128,
                username: None,
                password: None,
            })),
            ..Default::default()
        })
        .unwrap();
    assert!(config.get_config().proxy.is_some());

    config
        .update_config(SettingsUpdate {
            proxy: Some(None),
            ..Default::default()
        })
        .unwrap();
    assert!(ConfigService::at(&path).unwrap().get_config().proxy.is_none());
}

#[test]
fn test_global_dash_written_to_file_disables_notifications() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, r#"{"telegram_bot_token":"t","channel":"-"}"#).unwrap();

    let config = ConfigService::at(&path).unwrap();
    let dir = InMemoryDirectory::from_json(
        r#"{"projects": {"1": {"id": 1, "name": "Ops"}}}"#,
    )
    .unwrap();
    let svc = NotifierService::from_config(&config, Arc::new(dir)).unwrap();

    let resolved = svc.resolve(&Project::new(1, "Ops"));
    assert_eq!(resolved.bot_token.as_deref(), Some("t"));
    assert_eq!(resolved.chat_id, None);
}

#[test]
fn test_proxy_password_stays_out_of_settings_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("settings.json");
    let mut config = ConfigService::at(&path).unwrap();

    let updated = config
        .update_config(SettingsUpdate {
            proxy: Some(Some(ProxyConfig {
                protocol: ProxyProtocol::Http,
                host: "proxy.local".to_string(),
                port: 3128,
                username: Some("svc".to_string()),
                password: Some("s3cret".to_string()),
            })),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(
        updated.proxy.as_ref().and_then(|p| p.password.as_deref()),
        Some("s3cret")
    );

    let on_disk = std::fs::read_to_string(&path).unwrap();
    assert!(on_disk.contains("proxy.local"));
    assert!(!on_disk.contains("s3cret"));

    let reopened = ConfigService::at(&path).unwrap();
    assert_eq!(
        reopened.get_config().proxy.as_ref().and_then(|p| p.password.clone()),
        None
    );
}
