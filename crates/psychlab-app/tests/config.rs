use psychlab_app::config::{
    AppConfig, CredentialSource, config_info, load_config_from, save_config_to,
};
use psychlab_bedrock::generate::DEFAULT_MODEL_ID;

fn sample() -> AppConfig {
    AppConfig {
        config_version: 1,
        region: "ap-south-1".to_string(),
        model_id: "custom-model".to_string(),
        thinking_budget_tokens: Some(2048),
        bind_addr: "127.0.0.1:9000".to_string(),
        credentials: CredentialSource::Inline {
            access_key_id: "AKIAABCDEFGHIJKL".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: None,
        },
        created_at: "2026-01-05T10:00:00Z".parse().unwrap(),
    }
}

#[test]
fn save_then_load_preserves_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    save_config_to(&path, &sample()).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded.config_version, 1);
    assert_eq!(loaded.region, "ap-south-1");
    assert_eq!(loaded.model_id, "custom-model");
    assert_eq!(loaded.thinking_budget_tokens, Some(2048));
    assert_eq!(loaded.bind_addr, "127.0.0.1:9000");
    assert_eq!(loaded.generation_settings().model_id, "custom-model");
}

#[cfg(unix)]
#[test]
fn saved_config_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    save_config_to(&path, &sample()).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn unversioned_config_gets_default_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "region": "us-west-2",
            "credentials": { "type": "profile", "profile_name": "clinic" },
            "created_at": "2025-11-01T00:00:00Z"
        }"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.config_version, 1);
    assert_eq!(config.model_id, DEFAULT_MODEL_ID);
    assert_eq!(config.bind_addr, "127.0.0.1:8787");
    assert!(config.thinking_budget_tokens.is_none());
    assert!(matches!(
        config.credentials,
        CredentialSource::Profile { ref profile_name } if profile_name == "clinic"
    ));
}

#[test]
fn newer_config_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "config_version": 7, "region": "us-east-1", "model_id": "m",
             "credentials": { "type": "default_chain" },
             "created_at": "2025-11-01T00:00:00Z" }"#,
    )
    .unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn config_info_hides_secrets() {
    let info = config_info(&sample());
    assert_eq!(info.credential_type, "inline");
    assert_eq!(info.access_key_hint.as_deref(), Some("AKIA...IJKL"));

    let rendered = serde_json::to_string(&info).unwrap();
    assert!(!rendered.contains("secret"));
    assert!(!rendered.contains("AKIAABCDEFGHIJKL"));

    let mut temporary = sample();
    temporary.credentials = CredentialSource::Inline {
        access_key_id: "ASIA1234".to_string(),
        secret_access_key: "s".to_string(),
        session_token: Some("token".to_string()),
    };
    let info = config_info(&temporary);
    assert_eq!(info.credential_type, "temporary");
    assert_eq!(info.access_key_hint.as_deref(), Some("****"));
}

#[test]
fn multibyte_access_key_is_redacted_without_panicking() {
    let mut config = sample();
    config.credentials = CredentialSource::Inline {
        access_key_id: "AKIAé€€€€key".to_string(),
        secret_access_key: "s".to_string(),
        session_token: None,
    };

    let info = config_info(&config);
    assert_eq!(info.access_key_hint.as_deref(), Some("****"));
}
