use std::{env, path::PathBuf};

use super::schema::{ApiSettings, AudioSettings, Settings};

const APP_DIR: &str = "musicgen-studio";
const STORE_FILE: &str = "generated_music.json";

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `MUSICGEN__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MUSICGEN")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let mut settings: Settings = cfg.try_deserialize()?;
        settings.fill_api_key_from_env();

        Ok(settings)
    }

    /// Struct defaults plus the `LOUDLY_API_KEY` fallback.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        settings.fill_api_key_from_env();
        settings
    }

    /// Load settings without ever failing.
    ///
    /// An unreadable file yields [`Settings::from_env`]. A readable one has
    /// each invalid section reset to its defaults while the rest is kept.
    /// Returns the problems found, for the caller to report.
    pub fn load_lenient() -> (Self, Vec<String>) {
        match Settings::load() {
            Ok(mut settings) => {
                let problems = settings.repair();
                (settings, problems)
            }
            Err(e) => (Settings::from_env(), vec![e.to_string()]),
        }
    }

    fn fill_api_key_from_env(&mut self) {
        if self.api.api_key.is_none() {
            self.api.api_key = env::var("LOUDLY_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty());
        }
    }

    /// Reset every section that fails validation to its defaults. The API
    /// key survives a reset of `[api]`.
    pub fn repair(&mut self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Err(msg) = self.api.validate() {
            self.api = ApiSettings {
                api_key: self.api.api_key.take(),
                ..ApiSettings::default()
            };
            problems.push(msg);
        }
        if let Err(msg) = self.audio.validate() {
            self.audio = AudioSettings::default();
            problems.push(msg);
        }
        problems
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        self.api.validate()?;
        self.audio.validate()
    }

    /// Path of the saved-track collection: `storage.path` or the XDG default.
    pub fn store_path(&self) -> Option<PathBuf> {
        self.storage.path.clone().or_else(default_store_path)
    }
}

/// Resolve the config path from `MUSICGEN_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MUSICGEN_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/musicgen-studio/config.toml`
/// or `~/.config/musicgen-studio/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `$XDG_DATA_HOME/musicgen-studio` or `~/.local/share/musicgen-studio`.
pub fn default_data_dir() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
    };

    data_home.map(|d| d.join(APP_DIR))
}

pub fn default_store_path() -> Option<PathBuf> {
    default_data_dir().map(|d| d.join(STORE_FILE))
}

impl ApiSettings {
    fn validate(&self) -> Result<(), String> {
        let endpoint = self.endpoint.trim();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err("api.endpoint must start with http:// or https://".to_string());
        }
        if self.duration_secs == 0 {
            return Err("api.duration_secs must be >= 1".to_string());
        }
        Ok(())
    }
}

impl AudioSettings {
    fn validate(&self) -> Result<(), String> {
        if self.tick_ms == 0 {
            return Err("audio.tick_ms must be >= 1".to_string());
        }
        Ok(())
    }
}
