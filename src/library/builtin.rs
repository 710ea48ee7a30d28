use super::model::{Track, TrackId};

struct Demo {
    id: u64,
    title: &'static str,
    artist: &'static str,
    audio_url: &'static str,
    cover_url: &'static str,
}

const DEMOS: [Demo; 3] = [
    Demo {
        id: 1,
        title: "Synthwave Dreams",
        artist: "AI Composer",
        audio_url: "https://commondatastorage.googleapis.com/codeskulptor-demos/DDR_assets/Kangaroo_MusiQue_-_The_Neverwritten_Role_Playing_Game.mp3",
        cover_url: "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=400&h=400&fit=crop&crop=center",
    },
    Demo {
        id: 2,
        title: "Jazz Fusion",
        artist: "Neural Network",
        audio_url: "https://www.learningcontainer.com/wp-content/uploads/2020/02/Kalimba.mp3",
        cover_url: "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=400&h=400&fit=crop&crop=center",
    },
    Demo {
        id: 3,
        title: "Ambient Spaces",
        artist: "Deep Learning",
        audio_url: "https://codeskulptor-demos.commondatastorage.googleapis.com/GalaxyInvaders/theme_01.mp3",
        cover_url: "https://images.unsplash.com/photo-1514320291840-2e0a9bf2a9ae?w=400&h=400&fit=crop&crop=center",
    },
];

/// The "Made for you" demo tracks. Never persisted.
pub fn builtin_tracks() -> Vec<Track> {
    DEMOS
        .iter()
        .map(|d| Track {
            id: TrackId::Number(d.id),
            title: d.title.to_string(),
            artist: d.artist.to_string(),
            audio_url: d.audio_url.to_string(),
            cover_url: d.cover_url.to_string(),
        })
        .collect()
}
