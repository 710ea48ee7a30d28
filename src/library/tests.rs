use super::model::make_display;
use super::*;

fn generated(id: &str) -> Track {
    Track::generated(TrackId::Text(id.into()), "Song", "https://cdn.example/a.mp3")
}

#[test]
fn make_display_prefers_artist_dash_title() {
    assert_eq!(make_display("Song", "Artist"), "Artist - Song");
    assert_eq!(make_display("Song", "  Artist  "), "Artist - Song");
    assert_eq!(make_display("Song", ""), "Song");
    assert_eq!(make_display("Song", "   "), "Song");
}

#[test]
fn builtin_tracks_have_unique_sequential_ids() {
    let tracks = builtin_tracks();
    let ids: Vec<TrackId> = tracks.iter().map(|t| t.id.clone()).collect();
    assert_eq!(
        ids,
        vec![TrackId::Number(1), TrackId::Number(2), TrackId::Number(3)]
    );
    assert!(tracks.iter().all(|t| !t.audio_url.is_empty()));
    assert!(tracks.iter().all(|t| !t.cover_url.is_empty()));
    assert_eq!(tracks[0].title, "Synthwave Dreams");
}

#[test]
fn generated_track_uses_fixed_artist_and_placeholder_cover() {
    let t = generated("1700000000000");
    assert_eq!(t.artist, GENERATED_ARTIST);
    assert_eq!(t.audio_url, "https://cdn.example/a.mp3");
    assert!(t.cover_url.starts_with("https://picsum.photos/400/400?random="));
    assert_eq!(t.display(), "AI Generated - Song");
}

#[test]
fn track_serializes_with_camel_case_fields() {
    let t = Track {
        id: TrackId::Text("42".into()),
        title: "T".into(),
        artist: "A".into(),
        audio_url: "u".into(),
        cover_url: "c".into(),
    };
    let v = serde_json::to_value(&t).unwrap();
    assert_eq!(v["id"], "42");
    assert_eq!(v["audioUrl"], "u");
    assert_eq!(v["coverUrl"], "c");
}

#[test]
fn track_id_accepts_numbers_and_strings() {
    let raw = r#"[
        {"id": 7, "title": "a", "artist": "x", "audioUrl": "u", "coverUrl": "c"},
        {"id": "1700000000000", "title": "b", "artist": "y", "audioUrl": "u", "coverUrl": "c"}
    ]"#;
    let tracks: Vec<Track> = serde_json::from_str(raw).unwrap();
    assert_eq!(tracks[0].id, TrackId::Number(7));
    assert_eq!(tracks[1].id, TrackId::Text("1700000000000".into()));
    assert_eq!(tracks[1].id.to_string(), "1700000000000");
}

#[test]
fn fresh_id_uses_timestamp_and_avoids_collisions() {
    assert_eq!(TrackId::fresh(&[], 1000), TrackId::Text("1000".into()));

    let existing = vec![generated("1000"), generated("not-a-number")];
    assert_eq!(TrackId::fresh(&existing, 1000), TrackId::Text("1001".into()));
    assert_eq!(TrackId::fresh(&existing, 2000), TrackId::Text("2000".into()));
}

#[test]
fn fresh_id_does_not_overflow_on_max_timestamp() {
    let existing = vec![generated("9223372036854775807")];
    assert_eq!(
        TrackId::fresh(&existing, 1000),
        TrackId::Text(i64::MAX.to_string())
    );
}
