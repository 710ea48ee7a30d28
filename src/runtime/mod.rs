use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::generate::LoudlyClient;
use crate::library::builtin_tracks;
use crate::store::{JsonFileStore, MemoryStore, TrackRepository};

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let settings = settings::load_settings();

    // An explicit path on the command line wins over config and XDG defaults.
    let repository: Box<dyn TrackRepository> = match env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.store_path())
    {
        Some(path) => {
            let store = JsonFileStore::new(path);
            info!("collection: {}", store.path().display());
            Box::new(store)
        }
        None => {
            warn!("no data directory; saved tracks last until exit");
            Box::new(MemoryStore::default())
        }
    };

    let generator = LoudlyClient::new(&settings.api)?;
    let mut app = App::new(builtin_tracks(), repository, Arc::new(generator));

    let audio_player = AudioPlayer::new(settings.audio.clone());
    app.set_playback_handle(audio_player.playback_handle());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &audio_player, &mut state)
    })();

    audio_player.quit();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
