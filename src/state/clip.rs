use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of track a clip lives on.
///
/// This is a closed set: each kind is one independent lane of the timeline,
/// and it decides which playback branch drives the clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    /// Generated video shots.
    Video,
    /// Background music and effects.
    Sound,
    /// Spoken narration.
    Narration,
    /// Held manga panels / stills.
    StaticImage,
}

impl TrackKind {
    /// All tracks, in top-to-bottom display order.
    pub const ALL: [TrackKind; 4] = [
        TrackKind::Video,
        TrackKind::Sound,
        TrackKind::Narration,
        TrackKind::StaticImage,
    ];

    /// Display name for labels and error messages.
    pub fn label(self) -> &'static str {
        match self {
            TrackKind::Video => "Video",
            TrackKind::Sound => "Sound",
            TrackKind::Narration => "Narration",
            TrackKind::StaticImage => "Stills",
        }
    }

    /// Wire name used by the media sink script.
    pub fn sink_name(self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Sound => "sound",
            TrackKind::Narration => "narration",
            TrackKind::StaticImage => "static_image",
        }
    }
}

/// Opaque playable reference produced by the generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MediaSource {
    /// URL of a generated video.
    VideoUrl(String),
    /// URL of generated music/effects or narration audio.
    AudioUrl(String),
    /// Inline or served image reference for a held panel.
    Image(String),
}

impl MediaSource {
    /// The reference string handed to the playback sink.
    pub fn reference(&self) -> &str {
        match self {
            MediaSource::VideoUrl(url) => url,
            MediaSource::AudioUrl(url) => url,
            MediaSource::Image(src) => src,
        }
    }
}

/// A clip placed on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique identifier, assigned at creation, immutable.
    pub id: Uuid,
    /// Which track this clip occupies.
    pub track: TrackKind,
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds (exclusive).
    pub end_time: f64,
    /// Playable content reference.
    pub media: MediaSource,
    /// Optional user-facing label.
    #[serde(default)]
    pub name: Option<String>,
}

impl Clip {
    /// Create a new clip.
    pub fn new(track: TrackKind, start_time: f64, end_time: f64, media: MediaSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            track,
            start_time,
            end_time,
            media,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Half-open interval overlap test against a time range.
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.start_time < end && self.end_time > start
    }

    /// Whether the playhead time falls inside this clip.
    pub fn contains(&self, time: f64) -> bool {
        self.start_time <= time && time < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_overlap() {
        let clip = Clip::new(
            TrackKind::Video,
            5.0,
            15.0,
            MediaSource::VideoUrl("scene.mp4".into()),
        );
        assert!(clip.overlaps(0.0, 10.0)); // overlaps start
        assert!(clip.overlaps(10.0, 20.0)); // overlaps end
        assert!(clip.overlaps(7.0, 12.0)); // overlaps middle
        assert!(!clip.overlaps(0.0, 5.0)); // just before
        assert!(!clip.overlaps(15.0, 20.0)); // just after
    }

    #[test]
    fn test_contains_is_half_open() {
        let clip = Clip::new(
            TrackKind::Sound,
            1.0,
            4.0,
            MediaSource::AudioUrl("bgm.mp3".into()),
        );
        assert!(clip.contains(1.0));
        assert!(clip.contains(3.999));
        assert!(!clip.contains(4.0));
        assert!(!clip.contains(0.999));
    }
}
