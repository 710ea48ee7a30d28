//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, FormFocus, Notice, NoticeKind, View};
use crate::audio::{PlaybackState, format_duration};
use crate::config::{ControlsSettings, UiSettings};
use crate::generate::GENRES;

const CATALOG_CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("enter", "open track"),
    ("c", "create"),
    ("q", "quit"),
];

const CREATE_CONTROLS: &[(&str, &str)] = &[
    ("tab", "next field"),
    ("←/→", "genre"),
    ("enter", "generate"),
    ("ctrl+s", "save"),
    ("ctrl+p", "preview"),
    ("esc", "back"),
];

const NOTICE_CONTROLS: &[(&str, &str)] = &[("enter", "dismiss")];

/// Render a `[key] action | ...` help line.
fn controls_text(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn overlay_controls_text(seek_seconds: u64) -> String {
    let seek = format!("seek -/+{}s", seek_seconds);
    controls_text(&[
        ("space/p", "play/pause"),
        ("h/l", seek.as_str()),
        ("0-9", "jump"),
        ("esc", "close"),
    ])
}

/// Row of the list widget that shows entry `selected`, given the section
/// headers inserted above creations and built-ins.
fn catalog_row(creations: usize, selected: usize) -> usize {
    if creations == 0 || selected < creations {
        selected + 1
    } else {
        selected + 2
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .bold()
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    match app.view {
        View::Catalog => draw_catalog(frame, app, ui_settings, chunks[1]),
        View::Create => draw_create(frame, app, chunks[1]),
    }

    if let Some(track) = &app.overlay {
        draw_overlay(frame, app, track, chunks[1]);
    }

    if let Some(notice) = &app.notice {
        draw_notice(frame, notice, chunks[1]);
    }

    let footer_text = if app.notice.is_some() {
        controls_text(NOTICE_CONTROLS)
    } else if app.overlay.is_some() {
        overlay_controls_text(controls_settings.seek_seconds)
    } else {
        match app.view {
            View::Catalog => controls_text(CATALOG_CONTROLS),
            View::Create => controls_text(CREATE_CONTROLS),
        }
    };
    let footer = Paragraph::new(footer_text)
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);
}

fn draw_catalog(frame: &mut Frame, app: &App, ui_settings: &UiSettings, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    let greeting = Paragraph::new(ui_settings.greeting.as_str())
        .alignment(Alignment::Center)
        .italic();
    frame.render_widget(greeting, parts[0]);

    let section = |name: &'static str| {
        ListItem::new(Line::from(Span::styled(
            name,
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Green),
        )))
    };
    let row = |t: &crate::library::Track| ListItem::new(format!("  {}", t.display()));

    let mut items: Vec<ListItem> = Vec::new();
    if !app.creations.is_empty() {
        items.push(section("Your Creations"));
        items.extend(app.creations.iter().map(row));
    }
    items.push(section("Made for you"));
    items.extend(app.builtin.iter().map(row));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if app.has_tracks() {
        state.select(Some(catalog_row(app.creations.len(), app.selected)));
    }
    frame.render_stateful_widget(list, parts[1], &mut state);
}

fn draw_create(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let label = |name: &'static str, focus: FormFocus| {
        let style = if form.focus == focus {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Span::styled(format!("{:<8}", name), style)
    };

    let genre = match form.genre {
        Some(_) => format!("< {} >", form.genre_name()),
        None => format!("< choose: {} >", GENRES.join(", ")),
    };

    let status = if app.busy {
        Line::from("Generating... this can take a while.".yellow())
    } else if let Some(url) = &form.generated_music {
        Line::from(vec![
            "Generated: ".green().bold(),
            Span::raw(url.as_str()),
        ])
    } else {
        Line::from("Fill in every field, then press enter to generate.".dim())
    };

    let lines = vec![
        Line::from(vec![
            label("Title", FormFocus::Title),
            Span::raw(" "),
            Span::raw(form.title.as_str()),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Genre", FormFocus::Genre),
            Span::raw(" "),
            Span::raw(genre),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Prompt", FormFocus::Prompt),
            Span::raw(" "),
            Span::raw(form.prompt.as_str()),
        ]),
        Line::from(""),
        status,
    ];

    let body = Paragraph::new(lines)
        .block(padded_block(" create "))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

fn draw_overlay(frame: &mut Frame, app: &App, track: &crate::library::Track, area: Rect) {
    let popup = centered_rect_sized(72, 12, area);
    frame.render_widget(Clear, popup);

    let block = padded_block(" now playing (esc closes) ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let info = app.overlay_playback().unwrap_or_default();
    let state = match info.state {
        PlaybackState::Idle if info.loading => "… Loading",
        PlaybackState::Idle => "■ Stopped",
        PlaybackState::Playing => "▶ Playing",
        PlaybackState::Paused => "⏸ Paused",
    };

    let details = Paragraph::new(vec![
        Line::from(track.title.as_str().bold()),
        Line::from(track.artist.as_str().dim()),
        Line::from(format!("Cover: {}", track.cover_url)),
        Line::from(""),
        Line::from(state),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(details, parts[0]);

    let ratio = match info.duration {
        Some(total) if !total.is_zero() => {
            (info.elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label("");
    frame.render_widget(gauge, parts[1]);

    let total = info
        .duration
        .map(format_duration)
        .unwrap_or_else(|| "0:00".to_string());
    frame.render_widget(
        Paragraph::new(format_duration(info.elapsed)).alignment(Alignment::Left),
        parts[2],
    );
    frame.render_widget(Paragraph::new(total).alignment(Alignment::Right), parts[2]);
}

fn draw_notice(frame: &mut Frame, notice: &Notice, area: Rect) {
    let popup = centered_rect_sized(56, 5, area);
    frame.render_widget(Clear, popup);

    let (title, color) = match notice.kind {
        NoticeKind::Info => (" notice ", Color::Green),
        NoticeKind::Error => (" error ", Color::Red),
    };
    let body = Paragraph::new(notice.message.as_str())
        .alignment(Alignment::Center)
        .block(padded_block(title).border_style(Style::default().fg(color)))
        .wrap(Wrap { trim: true });
    frame.render_widget(body, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_row_skips_section_headers() {
        // No creations: one header above the built-ins.
        assert_eq!(catalog_row(0, 0), 1);
        assert_eq!(catalog_row(0, 2), 3);
        // Two creations: header, 2 rows, header, built-ins.
        assert_eq!(catalog_row(2, 0), 1);
        assert_eq!(catalog_row(2, 1), 2);
        assert_eq!(catalog_row(2, 2), 4);
    }

    #[test]
    fn controls_text_joins_pairs() {
        assert_eq!(
            controls_text(&[("q", "quit"), ("j/k", "up/down")]),
            "[q] quit | [j/k] up/down"
        );
        assert!(overlay_controls_text(7).contains("[h/l] seek -/+7s"));
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 40,
            height: 10,
        };
        let r = centered_rect_sized(72, 12, area);
        assert_eq!(r.width, 38);
        assert_eq!(r.height, 8);
        assert_eq!(r.x, 1);
        assert_eq!(r.y, 1);
    }
}
