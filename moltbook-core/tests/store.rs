use moltbook_core::{
    write_env_file, ConfigError, ConfigStore, Credentials, EnvCredentials, UsageState,
};
use std::fs;
use tempfile::TempDir;

fn setup_store() -> (TempDir, ConfigStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = ConfigStore::new(dir.path().join("moltbook"));
    (dir, store)
}

fn no_env() -> EnvCredentials {
    EnvCredentials::default()
}

#[test]
fn test_nothing_configured() {
    let (_dir, store) = setup_store();
    let result = store.resolve_credentials(&no_env());
    assert!(matches!(result, Err(ConfigError::NotConfigured)));
}

#[test]
fn test_env_wins_over_files() {
    let (_dir, store) = setup_store();
    store
        .save_credentials(&Credentials::new("toml-key", "toml-agent"))
        .unwrap();
    fs::write(
        store.legacy_credentials_path(),
        r#"{"api_key":"json-key","agent_name":"json-agent"}"#,
    )
    .unwrap();

    let env = EnvCredentials {
        api_key: Some("env-key".to_string()),
        agent_name: Some("env-agent".to_string()),
    };
    let creds = store.resolve_credentials(&env).unwrap();
    assert_eq!(creds, Credentials::new("env-key", "env-agent"));
}

#[test]
fn test_legacy_json_wins_over_toml() {
    let (_dir, store) = setup_store();
    store
        .save_credentials(&Credentials::new("toml-key", "toml-agent"))
        .unwrap();
    fs::write(
        store.legacy_credentials_path(),
        r#"{"api_key":"json-key","agent_name":"json-agent"}"#,
    )
    .unwrap();

    let creds = store.resolve_credentials(&no_env()).unwrap();
    assert_eq!(creds, Credentials::new("json-key", "json-agent"));
}

#[test]
fn test_malformed_legacy_json_falls_through() {
    let (_dir, store) = setup_store();
    store
        .save_credentials(&Credentials::new("toml-key", "toml-agent"))
        .unwrap();
    fs::write(store.legacy_credentials_path(), "{ not json").unwrap();

    let creds = store.resolve_credentials(&no_env()).unwrap();
    assert_eq!(creds, Credentials::new("toml-key", "toml-agent"));
}

#[test]
fn test_malformed_legacy_json_without_toml_is_not_configured() {
    let (_dir, store) = setup_store();
    fs::create_dir_all(store.config_dir()).unwrap();
    fs::write(store.legacy_credentials_path(), "garbage").unwrap();

    let result = store.resolve_credentials(&no_env());
    assert!(matches!(result, Err(ConfigError::NotConfigured)));
}

#[test]
fn test_malformed_toml_is_load_failure() {
    let (_dir, store) = setup_store();
    fs::create_dir_all(store.config_dir()).unwrap();
    fs::write(store.credentials_path(), "api_key = ").unwrap();

    let result = store.resolve_credentials(&no_env());
    assert!(matches!(result, Err(ConfigError::LoadFailed { .. })));
}

#[test]
fn test_save_credentials_overwrites() {
    let (_dir, store) = setup_store();
    store
        .save_credentials(&Credentials::new("first", "agent-a"))
        .unwrap();
    store
        .save_credentials(&Credentials::new("second", "agent-b"))
        .unwrap();

    let contents = fs::read_to_string(store.credentials_path()).unwrap();
    assert!(contents.contains("api_key = \"second\""));
    assert!(!contents.contains("first"));

    let creds = store.resolve_credentials(&no_env()).unwrap();
    assert_eq!(creds, Credentials::new("second", "agent-b"));
}

#[cfg(unix)]
#[test]
fn test_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, store) = setup_store();
    store
        .save_credentials(&Credentials::new("secret", "agent"))
        .unwrap();
    store.save_state(&UsageState::default()).unwrap();

    let mode = |path: &std::path::Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(&store.credentials_path()), 0o600);
    assert_eq!(mode(&store.state_path()), 0o644);
    assert_eq!(mode(store.config_dir()) & 0o077, 0);
}

#[test]
fn test_missing_state_is_zero_value() {
    let (_dir, store) = setup_store();
    let state = store.load_state().unwrap();
    assert_eq!(state, UsageState::default());
    assert!(!store.state_path().exists());
}

#[test]
fn test_state_round_trip() {
    let (_dir, store) = setup_store();
    let state = UsageState {
        last_check: Some("2026-03-14T09:00:00Z".to_string()),
        posts_created: 4,
        comments_created: 11,
        last_post_time: Some("2026-03-14T08:15:00+02:00".to_string()),
    };

    store.save_state(&state).unwrap();
    assert_eq!(store.load_state().unwrap(), state);

    let partial = UsageState {
        comments_created: 1,
        ..Default::default()
    };
    store.save_state(&partial).unwrap();
    assert_eq!(store.load_state().unwrap(), partial);
}

#[test]
fn test_state_file_keys() {
    let (_dir, store) = setup_store();
    let mut state = UsageState::default();
    state.record_comment();
    state.last_check = Some("2026-03-14T09:00:00Z".to_string());
    store.save_state(&state).unwrap();

    let contents = fs::read_to_string(store.state_path()).unwrap();
    assert!(contents.contains("lastMoltbookCheck = \"2026-03-14T09:00:00Z\""));
    assert!(contents.contains("comments_created = 1"));
    assert!(contents.contains("posts_created = 0"));
}

#[test]
fn test_malformed_state_fails() {
    let (_dir, store) = setup_store();
    fs::create_dir_all(store.config_dir()).unwrap();
    fs::write(store.state_path(), "posts_created = \"many\"").unwrap();

    let result = store.load_state();
    assert!(matches!(result, Err(ConfigError::LoadFailed { .. })));
}

#[test]
fn test_write_env_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    write_env_file(&path, &Credentials::new("key-123", "Molty")).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "MOLTBOOK_API_KEY=key-123\nMOLTBOOK_AGENT_NAME=Molty\n"
    );
}
