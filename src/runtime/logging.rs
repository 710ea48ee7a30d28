use std::fs::{self, File, OpenOptions};

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::config::default_data_dir;

const ENV_LOG: &str = "MUSICGEN_LOG";
const ENV_LOG_STYLE: &str = "MUSICGEN_LOG_STYLE";
const LOG_FILE: &str = "musicgen-studio.log";

/// Set up logging from the env variables, with defaults.
///
/// The terminal belongs to the UI, so records go to a file in the data
/// directory. Without one, logging is off.
pub fn init() {
    let mut builder = Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    );

    match open_log_file() {
        Some(file) => {
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(LevelFilter::Off);
        }
    }

    let _ = builder.try_init();
}

fn open_log_file() -> Option<File> {
    let dir = default_data_dir()?;
    fs::create_dir_all(&dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
        .ok()
}
