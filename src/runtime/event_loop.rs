use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, FormFocus, View};
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: handles input, UI drawing, and collects
/// generation results and playback errors. Returns `Ok(())` when shutdown
/// is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.poll_generation();
        app.take_playback_error();

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, audio_player, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns true when the app should quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    state: &mut EventLoopState,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    // Notices are modal.
    if app.notice.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_notice();
        }
        return false;
    }

    if app.overlay.is_some() {
        handle_overlay_key(key, settings, app, audio_player);
        return false;
    }

    match app.view {
        View::Catalog => handle_catalog_key(key, app, audio_player, state),
        View::Create => {
            handle_create_key(key, app, audio_player);
            false
        }
    }
}

fn handle_overlay_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
) {
    let secs = i64::try_from(settings.controls.seek_seconds).unwrap_or(i64::MAX);
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_overlay();
            let _ = audio_player.send(AudioCmd::Close);
        }
        KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Enter => {
            let _ = audio_player.send(AudioCmd::TogglePlay);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            let _ = audio_player.send(AudioCmd::SeekBy(secs));
        }
        KeyCode::Char('h') | KeyCode::Left => {
            let _ = audio_player.send(AudioCmd::SeekBy(-secs));
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let digit = c.to_digit(10).unwrap_or(0);
            if let Some(target) = app.seek_target_for_digit(digit) {
                let _ = audio_player.send(AudioCmd::Seek(target));
            }
        }
        _ => {}
    }
}

fn handle_catalog_key(
    key: KeyEvent,
    app: &mut App,
    audio_player: &AudioPlayer,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            return true;
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            if let Some(track) = app.select_track() {
                let _ = audio_player.send(AudioCmd::Select(track));
            }
        }
        KeyCode::Char('c') | KeyCode::Char('n') => {
            state.pending_gg = false;
            app.open_create();
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}

fn handle_create_key(key: KeyEvent, app: &mut App, audio_player: &AudioPlayer) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => app.open_catalog(),
        KeyCode::Char('s') if ctrl => {
            app.save_generated();
        }
        KeyCode::Char('p') if ctrl => {
            if let Some(track) = app.preview_generated() {
                let _ = audio_player.send(AudioCmd::Select(track));
            }
        }
        KeyCode::Char('g') if ctrl => {
            app.start_generation();
        }
        KeyCode::Enter => {
            app.start_generation();
        }
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Left if app.form.focus == FormFocus::Genre => app.form.cycle_genre(false),
        KeyCode::Right if app.form.focus == FormFocus::Genre => app.form.cycle_genre(true),
        KeyCode::Backspace => app.form.pop_char(),
        KeyCode::Char(c) if !ctrl && !c.is_control() => app.form.push_char(c),
        _ => {}
    }
}
