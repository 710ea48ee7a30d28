use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use log::{debug, warn};

use crate::config::AudioSettings;

use super::sink::RodioBackend;
use super::state::{PlaybackBackend, Player};
use super::types::{AudioCmd, PlaybackError, PlaybackHandle};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // The output stream must live on the thread that uses it.
        let backend = RodioBackend::open_default(&audio_settings);
        let tick = Duration::from_millis(audio_settings.tick_ms.max(1));
        run(Player::new(backend), &rx, &playback_info, tick);
    })
}

/// Drive `player` from `rx` until `Quit` or the sender goes away.
pub(super) fn run<B: PlaybackBackend>(
    mut player: Player<B>,
    rx: &Receiver<AudioCmd>,
    playback_info: &PlaybackHandle,
    tick: Duration,
) {
    let mut backlog: VecDeque<AudioCmd> = VecDeque::new();
    loop {
        let next = match backlog.pop_front() {
            Some(cmd) => Ok(cmd),
            None => rx.recv_timeout(tick),
        };
        match next {
            Ok(AudioCmd::Quit) => {
                player.close();
                publish(&player, playback_info, None);
                debug!("audio thread quitting");
                return;
            }
            Ok(cmd) => {
                let opening = matches!(cmd, AudioCmd::TogglePlay) && player.needs_open();
                if opening {
                    publish_loading(playback_info);
                }
                let failure = apply(&mut player, cmd).err();
                if opening {
                    // Presses made during the download would pause the track
                    // the moment it starts.
                    backlog.extend(rx.try_iter());
                    backlog.retain(|c| !matches!(c, AudioCmd::TogglePlay));
                }
                if let Some(e) = &failure {
                    warn!("playback error: {e}");
                }
                player.tick();
                publish(&player, playback_info, failure);
                continue;
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                player.close();
                publish(&player, playback_info, None);
                return;
            }
        }

        if player.tick() {
            debug!("track finished");
        }
        publish(&player, playback_info, None);
    }
}

fn apply<B: PlaybackBackend>(player: &mut Player<B>, cmd: AudioCmd) -> Result<(), PlaybackError> {
    match cmd {
        AudioCmd::Select(track) => player.select(track),
        AudioCmd::TogglePlay => {
            player.toggle()?;
        }
        AudioCmd::Seek(pos) => {
            player.seek(pos)?;
        }
        AudioCmd::SeekBy(secs) => {
            player.seek_by(secs)?;
        }
        AudioCmd::Close => player.close(),
        AudioCmd::Quit => {}
    }
    Ok(())
}

fn publish<B: PlaybackBackend>(
    player: &Player<B>,
    playback_info: &PlaybackHandle,
    failure: Option<PlaybackError>,
) {
    if let Ok(mut info) = playback_info.lock() {
        let last_error = match failure {
            Some(e) => Some(e.to_string()),
            None => info.last_error.take(),
        };
        *info = player.snapshot();
        info.last_error = last_error;
    }
}

fn publish_loading(playback_info: &PlaybackHandle) {
    if let Ok(mut info) = playback_info.lock() {
        info.loading = true;
    }
}
