use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    DEFAULT_CLIP_DURATION_SECONDS, MIN_CLIP_DURATION, TIMELINE_MAX_SECONDS,
};
use crate::error::TimelineError;

use super::{Clip, MediaSource, TrackKind};

/// The committed clip collection for one scene, plus its invariant layer.
///
/// Every mutation goes through [`SceneTimeline::commit`], which enforces the
/// per-track no-overlap rule and the time bounds. Gesture sessions work on a
/// private copy of a clip and only touch this collection when the gesture
/// completes, so readers (notably the playback scheduler) only ever observe
/// invariant-satisfying states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneTimeline {
    /// Scene name, shown in the title bar.
    pub name: String,
    /// Creation timestamp for scene metadata.
    pub created_at: DateTime<Utc>,
    /// All committed clips, across all tracks.
    clips: Vec<Clip>,
}

impl Default for SceneTimeline {
    fn default() -> Self {
        Self {
            name: "Untitled Scene".to_string(),
            created_at: Utc::now(),
            clips: Vec::new(),
        }
    }
}

impl SceneTimeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// All committed clips.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Clips on one track, in insertion order.
    pub fn clips_on(&self, track: TrackKind) -> Vec<&Clip> {
        self.clips.iter().filter(|c| c.track == track).collect()
    }

    pub fn find(&self, id: Uuid) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Scene duration: end of the last committed clip.
    pub fn duration(&self) -> f64 {
        self.clips.iter().map(|c| c.end_time).fold(0.0, f64::max)
    }

    /// Force a clip's times into `[0, TIMELINE_MAX_SECONDS]` with
    /// `end >= start`. Idempotent; run before every invariant check so bounds
    /// violations recover silently instead of erroring.
    pub fn clamp_to_bounds(mut clip: Clip) -> Clip {
        clip.start_time = clip.start_time.clamp(0.0, TIMELINE_MAX_SECONDS);
        clip.end_time = clip.end_time.clamp(clip.start_time, TIMELINE_MAX_SECONDS);
        clip
    }

    /// Clips on `track` overlapping `[start, end)`, excluding `exclude`.
    pub fn colliding_clips(
        &self,
        track: TrackKind,
        start: f64,
        end: f64,
        exclude: Option<Uuid>,
    ) -> Vec<&Clip> {
        self.clips
            .iter()
            .filter(|c| c.track == track && Some(c.id) != exclude && c.overlaps(start, end))
            .collect()
    }

    /// Commit a clip: replace it if the id exists, insert it otherwise.
    ///
    /// The clip is clamped to bounds first, then checked against every
    /// same-track sibling. On collision the collection is left untouched and
    /// the colliding sibling's id is returned in the error.
    pub fn commit(&mut self, clip: Clip) -> Result<(), TimelineError> {
        let clip = Self::clamp_to_bounds(clip);
        if let Some(other) =
            self.colliding_clips(clip.track, clip.start_time, clip.end_time, Some(clip.id))
                .first()
        {
            return Err(TimelineError::Collision { with: other.id });
        }
        if let Some(existing) = self.clips.iter_mut().find(|c| c.id == clip.id) {
            *existing = clip;
        } else {
            self.clips.push(clip);
        }
        Ok(())
    }

    /// Numeric-input edit path: move a clip's boundaries directly.
    ///
    /// Clamps to bounds and the minimum duration, then commits through the
    /// collision check. The committed times are returned so inputs can
    /// reflect the clamped values.
    pub fn set_clip_times(
        &mut self,
        id: Uuid,
        start: f64,
        end: f64,
    ) -> Result<(f64, f64), TimelineError> {
        let Some(mut clip) = self.find(id).cloned() else {
            return Err(TimelineError::MissingClip { id });
        };
        clip.start_time = start.clamp(0.0, TIMELINE_MAX_SECONDS - MIN_CLIP_DURATION);
        clip.end_time = end.clamp(clip.start_time + MIN_CLIP_DURATION, TIMELINE_MAX_SECONDS);
        let times = (clip.start_time, clip.end_time);
        self.commit(clip)?;
        Ok(times)
    }

    /// Remove a clip by id. Returns whether anything was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let len = self.clips.len();
        self.clips.retain(|c| c.id != id);
        self.clips.len() < len
    }

    /// Lifecycle entry: place freshly generated media on its track.
    ///
    /// The clip gets the default duration and lands in the first gap that
    /// fits, scanning left to right; with no gap it goes after the last clip.
    /// Fails when the track has no room left before the timeline end.
    pub fn add_media(
        &mut self,
        track: TrackKind,
        media: MediaSource,
        name: Option<String>,
    ) -> Result<Uuid, TimelineError> {
        let duration = DEFAULT_CLIP_DURATION_SECONDS;
        let start = self
            .first_free_slot(track, duration)
            .ok_or(TimelineError::TrackFull {
                track: track.label(),
            })?;
        let mut clip = Clip::new(track, start, start + duration, media);
        if let Some(name) = name {
            clip = clip.with_name(name);
        }
        let id = clip.id;
        self.commit(clip)?;
        Ok(id)
    }

    /// First start time on `track` where a clip of `duration` fits without
    /// overlapping, or `None` when the track is full.
    fn first_free_slot(&self, track: TrackKind, duration: f64) -> Option<f64> {
        let mut siblings = self.clips_on(track);
        siblings.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        let mut candidate = 0.0_f64;
        for clip in siblings {
            if clip.start_time - candidate >= duration {
                break;
            }
            candidate = candidate.max(clip.end_time);
        }
        (candidate + duration <= TIMELINE_MAX_SECONDS).then_some(candidate)
    }

    /// The clip playing on `track` at `time`, if any. The no-overlap
    /// invariant guarantees at most one match per track.
    pub fn active_clip_at(&self, track: TrackKind, time: f64) -> Option<&Clip> {
        self.clips
            .iter()
            .find(|c| c.track == track && c.contains(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_clip(start: f64, end: f64) -> Clip {
        Clip::new(
            TrackKind::Video,
            start,
            end,
            MediaSource::VideoUrl("shot.mp4".into()),
        )
    }

    fn sound_clip(start: f64, end: f64) -> Clip {
        Clip::new(
            TrackKind::Sound,
            start,
            end,
            MediaSource::AudioUrl("bgm.mp3".into()),
        )
    }

    #[test]
    fn test_commit_inserts_and_replaces() {
        let mut timeline = SceneTimeline::default();
        let mut clip = video_clip(0.0, 5.0);
        let id = clip.id;
        timeline.commit(clip.clone()).unwrap();
        assert_eq!(timeline.clips().len(), 1);

        clip.start_time = 10.0;
        clip.end_time = 15.0;
        timeline.commit(clip).unwrap();
        assert_eq!(timeline.clips().len(), 1);
        assert_eq!(timeline.find(id).unwrap().start_time, 10.0);
    }

    #[test]
    fn test_commit_rejects_same_track_overlap() {
        let mut timeline = SceneTimeline::default();
        let a = video_clip(0.0, 5.0);
        let a_id = a.id;
        timeline.commit(a).unwrap();

        let err = timeline.commit(video_clip(3.0, 8.0)).unwrap_err();
        assert_eq!(err, TimelineError::Collision { with: a_id });
        // Rejection is atomic: nothing was inserted.
        assert_eq!(timeline.clips().len(), 1);
    }

    #[test]
    fn test_different_tracks_may_overlap() {
        let mut timeline = SceneTimeline::default();
        timeline.commit(video_clip(0.0, 5.0)).unwrap();
        timeline.commit(sound_clip(1.0, 4.0)).unwrap();
        assert_eq!(timeline.clips().len(), 2);
    }

    #[test]
    fn test_adjacent_clips_do_not_collide() {
        let mut timeline = SceneTimeline::default();
        timeline.commit(video_clip(0.0, 5.0)).unwrap();
        timeline.commit(video_clip(5.0, 10.0)).unwrap();
        assert_eq!(timeline.clips().len(), 2);
    }

    #[test]
    fn test_collision_rejection_leaves_prior_geometry() {
        let mut timeline = SceneTimeline::default();
        let a = video_clip(0.0, 5.0);
        let a_id = a.id;
        let b = video_clip(5.0, 10.0);
        timeline.commit(a.clone()).unwrap();
        timeline.commit(b).unwrap();

        // Dragging A to start=6 would overlap B.
        let mut moved = a;
        moved.start_time = 6.0;
        moved.end_time = 11.0;
        assert!(timeline.commit(moved).is_err());

        let committed = timeline.find(a_id).unwrap();
        assert_eq!(committed.start_time, 0.0);
        assert_eq!(committed.end_time, 5.0);
    }

    #[test]
    fn test_clamp_to_bounds_is_idempotent() {
        let clip = video_clip(-3.0, TIMELINE_MAX_SECONDS + 10.0);
        let once = SceneTimeline::clamp_to_bounds(clip);
        let twice = SceneTimeline::clamp_to_bounds(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.start_time, 0.0);
        assert_eq!(once.end_time, TIMELINE_MAX_SECONDS);
    }

    #[test]
    fn test_add_media_fills_first_gap() {
        let mut timeline = SceneTimeline::default();
        timeline.commit(video_clip(0.0, 5.0)).unwrap();
        // Default duration is 5s; the first free slot is right after [0,5).
        let id = timeline
            .add_media(
                TrackKind::Video,
                MediaSource::VideoUrl("next.mp4".into()),
                None,
            )
            .unwrap();
        let placed = timeline.find(id).unwrap();
        assert_eq!(placed.start_time, 5.0);
        assert_eq!(placed.end_time, 10.0);
    }

    #[test]
    fn test_add_media_prefers_early_gap() {
        let mut timeline = SceneTimeline::default();
        timeline.commit(video_clip(10.0, 15.0)).unwrap();
        let id = timeline
            .add_media(
                TrackKind::Video,
                MediaSource::VideoUrl("opening.mp4".into()),
                Some("Opening".into()),
            )
            .unwrap();
        let placed = timeline.find(id).unwrap();
        assert_eq!(placed.start_time, 0.0);
        assert_eq!(placed.name.as_deref(), Some("Opening"));
    }

    #[test]
    fn test_add_media_rejects_full_track() {
        let mut timeline = SceneTimeline::default();
        timeline
            .commit(video_clip(0.0, TIMELINE_MAX_SECONDS - 1.0))
            .unwrap();
        let err = timeline
            .add_media(
                TrackKind::Video,
                MediaSource::VideoUrl("overflow.mp4".into()),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, TimelineError::TrackFull { .. }));
    }

    #[test]
    fn test_active_clip_resolution_per_track() {
        let mut timeline = SceneTimeline::default();
        let video = video_clip(0.0, 3.0);
        let sound = sound_clip(1.0, 4.0);
        let video_id = video.id;
        let sound_id = sound.id;
        timeline.commit(video).unwrap();
        timeline.commit(sound).unwrap();

        assert_eq!(
            timeline.active_clip_at(TrackKind::Video, 2.0).unwrap().id,
            video_id
        );
        assert_eq!(
            timeline.active_clip_at(TrackKind::Sound, 2.0).unwrap().id,
            sound_id
        );
        assert!(timeline.active_clip_at(TrackKind::Narration, 2.0).is_none());
        assert!(timeline.active_clip_at(TrackKind::Video, 3.0).is_none());
    }

    #[test]
    fn test_set_clip_times_clamps_and_commits() {
        let mut timeline = SceneTimeline::default();
        let clip = video_clip(0.0, 5.0);
        let id = clip.id;
        timeline.commit(clip).unwrap();

        let (start, end) = timeline.set_clip_times(id, -2.0, 4.0).unwrap();
        assert_eq!(start, 0.0);
        assert_eq!(end, 4.0);

        // End below start + MIN_CLIP_DURATION is pushed back up.
        let (start, end) = timeline.set_clip_times(id, 2.0, 2.1).unwrap();
        assert_eq!(start, 2.0);
        assert_eq!(end, 2.0 + MIN_CLIP_DURATION);
    }

    #[test]
    fn test_duration_tracks_last_clip() {
        let mut timeline = SceneTimeline::default();
        assert_eq!(timeline.duration(), 0.0);
        timeline.commit(video_clip(0.0, 5.0)).unwrap();
        timeline.commit(sound_clip(2.0, 9.0)).unwrap();
        assert_eq!(timeline.duration(), 9.0);
    }
}
