use super::*;
use crate::library::{GENERATED_ARTIST, TrackId};
use tempfile::tempdir;

fn track(id: &str, title: &str) -> Track {
    Track::generated(TrackId::Text(id.into()), title, "https://cdn.example/song.mp3")
}

#[test]
fn missing_file_loads_as_empty_collection() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("generated_music.json"));
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn blank_file_loads_as_empty_collection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("generated_music.json");
    std::fs::write(&path, "  \n").unwrap();
    assert!(JsonFileStore::new(path).load().unwrap().is_empty());
}

#[test]
fn append_adds_exactly_one_record_and_persists_it() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("generated_music.json");
    let store = JsonFileStore::new(&path);

    store.append(track("1", "First")).unwrap();
    let all = store.append(track("2", "Second")).unwrap();
    assert_eq!(all.len(), 2);

    let reopened = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened[1].title, "Second");
    assert_eq!(reopened[1].artist, GENERATED_ARTIST);
}

#[test]
fn file_holds_a_camel_case_json_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("generated_music.json");
    let store = JsonFileStore::new(&path);
    store.append(track("1", "T")).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let arr = value.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["audioUrl"], "https://cdn.example/song.mp3");
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn corrupt_file_is_reported_and_never_overwritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("generated_music.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = JsonFileStore::new(&path);

    assert!(matches!(store.load(), Err(StoreError::Decode { .. })));
    assert!(store.load_or_empty().is_empty());
    assert!(store.append(track("1", "T")).is_err());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
}

#[test]
fn memory_store_round_trips_through_the_trait() {
    let store = MemoryStore::with_tracks(vec![track("1", "A")]);
    let all = store.append(track("2", "B")).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(store.load().unwrap(), all);
}

#[test]
fn memory_store_keeps_working_after_a_panicked_holder() {
    let store = std::sync::Arc::new(MemoryStore::with_tracks(vec![track("1", "A")]));

    let poisoner = store.clone();
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.tracks.lock().unwrap();
        panic!("poison the lock");
    })
    .join();
    assert!(store.tracks.is_poisoned());

    store.append(track("2", "B")).unwrap();
    let titles: Vec<String> = store.load().unwrap().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["A", "B"]);
}
