use log::{info, warn};

use crate::config::Settings;

/// Load settings for this session. Config problems are logged and the
/// affected sections fall back to defaults so the studio still starts.
pub fn load_settings() -> Settings {
    let (settings, problems) = Settings::load_lenient();
    for problem in &problems {
        warn!("config: {problem}; using defaults for that part");
    }

    info!(
        "api endpoint {} (key {})",
        settings.api.endpoint,
        if settings.api.api_key.is_some() { "set" } else { "missing" }
    );
    settings
}
