use super::load::{default_config_path, default_data_dir, default_store_path, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

/// Point the loader at a config file we control and clear the env overrides
/// the tests care about.
fn isolate(cfg_path: &std::path::Path) -> Vec<EnvGuard> {
    vec![
        EnvGuard::set("MUSICGEN_CONFIG_PATH", cfg_path.to_str().unwrap()),
        EnvGuard::remove("MUSICGEN__API__API_KEY"),
        EnvGuard::remove("MUSICGEN__API__DURATION_SECS"),
        EnvGuard::remove("LOUDLY_API_KEY"),
    ]
}

#[test]
fn resolve_config_path_prefers_musicgen_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MUSICGEN_CONFIG_PATH", "/tmp/musicgen-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/musicgen-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("musicgen-studio")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("musicgen-studio")
            .join("config.toml")
    );
}

#[test]
fn default_store_path_lives_under_xdg_data_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_DATA_HOME", "/tmp/xdg-data");

    assert_eq!(
        default_data_dir().unwrap(),
        PathBuf::from("/tmp/xdg-data").join("musicgen-studio")
    );
    assert_eq!(
        default_store_path().unwrap(),
        PathBuf::from("/tmp/xdg-data")
            .join("musicgen-studio")
            .join("generated_music.json")
    );
}

#[test]
fn default_store_path_falls_back_to_home_local_share() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_DATA_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_store_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/share/musicgen-studio/generated_music.json")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[api]
endpoint = "http://localhost:9000/songs"
api_key = "file-key"
duration_secs = 45
timeout_secs = 10

[storage]
path = "/tmp/tracks.json"

[audio]
download_timeout_secs = 5
tick_ms = 50

[controls]
seek_seconds = 9

[ui]
header_text = "hello"
"#,
    )
    .unwrap();

    let _guards = isolate(&cfg_path);

    let s = Settings::load().unwrap();
    assert_eq!(s.api.endpoint, "http://localhost:9000/songs");
    assert_eq!(s.api.api_key.as_deref(), Some("file-key"));
    assert_eq!(s.api.duration_secs, 45);
    assert_eq!(s.api.timeout_secs, 10);
    assert_eq!(s.store_path(), Some(PathBuf::from("/tmp/tracks.json")));
    assert_eq!(s.audio.download_timeout_secs, 5);
    assert_eq!(s.audio.tick_ms, 50);
    assert_eq!(s.controls.seek_seconds, 9);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.greeting, UiSettings::default().greeting);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[api]
duration_secs = 30
"#,
    )
    .unwrap();

    let _guards = isolate(&cfg_path);
    let _g = EnvGuard::set("MUSICGEN__API__DURATION_SECS", "60");

    let s = Settings::load().unwrap();
    assert_eq!(s.api.duration_secs, 60);
}

#[test]
fn loudly_api_key_fills_in_when_unset() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("missing.toml");

    let _guards = isolate(&cfg_path);
    let _g = EnvGuard::set("LOUDLY_API_KEY", "env-key");

    let s = Settings::load().unwrap();
    assert_eq!(s.api.api_key.as_deref(), Some("env-key"));
    assert_eq!(s.api.endpoint, LOUDLY_SONGS_ENDPOINT);
}

#[test]
fn configured_api_key_wins_over_loudly_api_key() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[api]\napi_key = \"file-key\"\n").unwrap();

    let _guards = isolate(&cfg_path);
    let _g = EnvGuard::set("LOUDLY_API_KEY", "env-key");

    let s = Settings::load().unwrap();
    assert_eq!(s.api.api_key.as_deref(), Some("file-key"));
}

#[test]
fn validate_rejects_bad_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.api.endpoint = "ftp://example.com".into();
    assert!(s.validate().is_err());

    s = Settings::default();
    s.api.duration_secs = 0;
    assert!(s.validate().is_err());

    s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());
}

#[test]
fn invalid_section_keeps_env_api_key_and_store_path() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[storage]
path = "/tmp/mine.json"

[audio]
tick_ms = 0
"#,
    )
    .unwrap();

    let _guards = isolate(&cfg_path);
    let _g = EnvGuard::set("LOUDLY_API_KEY", "real-key");

    let (s, problems) = Settings::load_lenient();
    assert_eq!(problems.len(), 1);
    assert!(problems[0].contains("tick_ms"));
    assert_eq!(s.api.api_key.as_deref(), Some("real-key"));
    assert_eq!(s.store_path(), Some(PathBuf::from("/tmp/mine.json")));
    assert_eq!(s.audio.tick_ms, AudioSettings::default().tick_ms);
    assert!(s.validate().is_ok());
}

#[test]
fn invalid_api_section_keeps_configured_key() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        "[api]\nendpoint = \"ftp://nope\"\napi_key = \"file-key\"\nduration_secs = 45\n",
    )
    .unwrap();

    let _guards = isolate(&cfg_path);

    let (s, problems) = Settings::load_lenient();
    assert_eq!(problems.len(), 1);
    assert_eq!(s.api.endpoint, LOUDLY_SONGS_ENDPOINT);
    assert_eq!(s.api.duration_secs, ApiSettings::default().duration_secs);
    assert_eq!(s.api.api_key.as_deref(), Some("file-key"));
}

#[test]
fn unparseable_config_still_reads_loudly_api_key() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "[audio]\ntick_ms = \"often\"\n").unwrap();

    let _guards = isolate(&cfg_path);
    let _g = EnvGuard::set("LOUDLY_API_KEY", "real-key");

    let (s, problems) = Settings::load_lenient();
    assert_eq!(problems.len(), 1);
    assert_eq!(s.api.api_key.as_deref(), Some("real-key"));
    assert_eq!(s.audio.tick_ms, AudioSettings::default().tick_ms);
}
