//! Trim gesture: adjusting one boundary of a clip while the other stays put.
//!
//! Same session shape as [`super::drag::DragSession`]: created on
//! pointer-down over an edge handle, updated per move against a preview copy,
//! committed or reverted on pointer-up. Unlike dragging, a colliding trim is
//! not auto-resolved; the boundary is clamped live and the final commit
//! rejects any overlap that remains.

use crate::constants::{MIN_CLIP_DURATION, SNAP_THRESHOLD_PX, TIMELINE_MAX_SECONDS};
use crate::error::TimelineError;
use crate::state::{Clip, SceneTimeline};

use super::geometry::{nearest_snap, px_to_time, second_tick_points, time_to_px};

/// Which boundary the gesture moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrimSide {
    Start,
    End,
}

/// Edge feedback for the trimmed boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrimHighlight {
    Free,
    Snapped,
    Collision,
}

/// One pointer-drag of a clip edge handle. Pointer positions are in timeline
/// content space (scroll offset already applied by the view).
#[derive(Debug, Clone)]
pub struct TrimSession {
    original: Clip,
    side: TrimSide,
    /// Pointer distance from the grabbed boundary at gesture start, px.
    offset_x: f64,
    preview: Clip,
    highlight: TrimHighlight,
}

impl TrimSession {
    /// Enter the gesture, capturing the untouched clip for reference deltas
    /// and the pointer's offset from the grabbed boundary.
    pub fn begin(clip: Clip, side: TrimSide, pointer_x: f64, zoom: f64) -> Self {
        let boundary = match side {
            TrimSide::Start => clip.start_time,
            TrimSide::End => clip.end_time,
        };
        let offset_x = pointer_x - time_to_px(boundary, zoom);
        Self {
            original: clip.clone(),
            side,
            offset_x,
            preview: clip,
            highlight: TrimHighlight::Free,
        }
    }

    pub fn side(&self) -> TrimSide {
        self.side
    }

    /// Live preview reflecting the moving boundary.
    pub fn preview(&self) -> &Clip {
        &self.preview
    }

    pub fn highlight(&self) -> TrimHighlight {
        self.highlight
    }

    /// Recompute the moving boundary for a new pointer position: clamp to
    /// the minimum duration and timeline bounds, then snap to whole-second
    /// ticks when within the threshold.
    pub fn update(&mut self, pointer_x: f64, zoom: f64, timeline: &SceneTimeline) {
        let mouse_time = px_to_time(pointer_x - self.offset_x, zoom);
        let ticks = second_tick_points();

        match self.side {
            TrimSide::Start => {
                let max_start = self.original.end_time - MIN_CLIP_DURATION;
                let mut new_start = mouse_time.clamp(0.0, max_start);
                self.highlight = TrimHighlight::Free;
                if let Some(hit) = nearest_snap(new_start, &ticks, SNAP_THRESHOLD_PX, zoom) {
                    // Only take the tick if it survives the clamp unchanged.
                    if hit.time.clamp(0.0, max_start) == hit.time {
                        new_start = hit.time;
                        self.highlight = TrimHighlight::Snapped;
                    }
                }
                self.preview.start_time = new_start;
                // End boundary is untouched by a start trim.
                self.preview.end_time = self.original.end_time;
            }
            TrimSide::End => {
                let min_end = self.original.start_time + MIN_CLIP_DURATION;
                let mut new_end = mouse_time.clamp(min_end, TIMELINE_MAX_SECONDS);
                self.highlight = TrimHighlight::Free;
                if let Some(hit) = nearest_snap(new_end, &ticks, SNAP_THRESHOLD_PX, zoom) {
                    if hit.time.clamp(min_end, TIMELINE_MAX_SECONDS) == hit.time {
                        new_end = hit.time;
                        self.highlight = TrimHighlight::Snapped;
                    }
                }
                self.preview.end_time = new_end;
                self.preview.start_time = self.original.start_time;
            }
        }

        let p = &self.preview;
        let blocked = !timeline
            .colliding_clips(p.track, p.start_time, p.end_time, Some(p.id))
            .is_empty();
        if blocked {
            self.highlight = TrimHighlight::Collision;
        }
    }

    /// Exit the gesture: commit the previewed boundaries, or revert.
    ///
    /// Trimming can newly overlap a neighbor, so the explicit overlap check
    /// in [`SceneTimeline::commit`] always runs here.
    pub fn finish(self, timeline: &mut SceneTimeline) -> Result<Clip, TimelineError> {
        match timeline.commit(self.preview.clone()) {
            Ok(()) => Ok(self.preview),
            Err(err) => {
                log::debug!("trim of clip {} reverted: {}", self.original.id, err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{MediaSource, TrackKind};

    fn video_clip(start: f64, end: f64) -> Clip {
        Clip::new(
            TrackKind::Video,
            start,
            end,
            MediaSource::VideoUrl("shot.mp4".into()),
        )
    }

    fn px_at(time: f64, zoom: f64) -> f64 {
        time_to_px(time, zoom)
    }

    /// Begin a session with the pointer exactly on the grabbed boundary.
    fn begin_at_boundary(clip: Clip, side: TrimSide, zoom: f64) -> TrimSession {
        let boundary = match side {
            TrimSide::Start => clip.start_time,
            TrimSide::End => clip.end_time,
        };
        TrimSession::begin(clip, side, px_at(boundary, zoom), zoom)
    }

    #[test]
    fn test_trim_start_keeps_end_fixed() {
        let timeline = SceneTimeline::default();
        let clip = video_clip(2.0, 8.0);
        let mut session = begin_at_boundary(clip, TrimSide::Start, 1.0);
        session.update(px_at(3.0, 1.0), 1.0, &timeline);
        assert_eq!(session.preview().start_time, 3.0);
        assert_eq!(session.preview().end_time, 8.0);
    }

    #[test]
    fn test_grab_offset_is_respected() {
        let timeline = SceneTimeline::default();
        let clip = video_clip(2.0, 8.0);
        // Grab 10px right of the end boundary; the boundary follows the
        // pointer minus that offset.
        let mut session = TrimSession::begin(clip, TrimSide::End, px_at(8.0, 1.0) + 10.0, 1.0);
        session.update(px_at(6.5, 1.0) + 10.0, 1.0, &timeline);
        assert_eq!(session.preview().end_time, 6.5);
    }

    #[test]
    fn test_trim_end_respects_min_duration() {
        // Clip [2,3): trimming the end leftward can never go below 2.5.
        let timeline = SceneTimeline::default();
        let clip = video_clip(2.0, 3.0);
        let mut session = begin_at_boundary(clip, TrimSide::End, 1.0);
        session.update(px_at(2.1, 1.0), 1.0, &timeline);
        assert_eq!(session.preview().end_time, 2.0 + MIN_CLIP_DURATION);
        assert_eq!(session.preview().start_time, 2.0);
    }

    #[test]
    fn test_trim_start_respects_min_duration() {
        let timeline = SceneTimeline::default();
        let clip = video_clip(2.0, 3.0);
        let mut session = begin_at_boundary(clip, TrimSide::Start, 1.0);
        session.update(px_at(2.9, 1.0), 1.0, &timeline);
        assert_eq!(session.preview().start_time, 3.0 - MIN_CLIP_DURATION);
    }

    #[test]
    fn test_trim_snaps_to_whole_seconds() {
        let timeline = SceneTimeline::default();
        let clip = video_clip(2.0, 8.0);
        let mut session = begin_at_boundary(clip, TrimSide::End, 1.0);
        // 7.06 is 6px from the 7.0 tick at zoom 1.
        session.update(px_at(7.06, 1.0), 1.0, &timeline);
        assert_eq!(session.highlight(), TrimHighlight::Snapped);
        assert_eq!(session.preview().end_time, 7.0);
    }

    #[test]
    fn test_trim_end_clamps_to_timeline_max() {
        let timeline = SceneTimeline::default();
        let clip = video_clip(100.0, 110.0);
        let mut session = begin_at_boundary(clip, TrimSide::End, 1.0);
        session.update(px_at(TIMELINE_MAX_SECONDS + 10.0, 1.0), 1.0, &timeline);
        assert_eq!(session.preview().end_time, TIMELINE_MAX_SECONDS);
    }

    #[test]
    fn test_trim_into_neighbor_blocks_at_commit() {
        let mut timeline = SceneTimeline::default();
        let a = video_clip(0.0, 5.0);
        let a_id = a.id;
        timeline.commit(a.clone()).unwrap();
        timeline.commit(video_clip(5.0, 10.0)).unwrap();

        // Extending A's end to 7 would newly overlap the neighbor.
        let mut session = begin_at_boundary(a, TrimSide::End, 1.0);
        session.update(px_at(7.0, 1.0), 1.0, &timeline);
        assert_eq!(session.highlight(), TrimHighlight::Collision);
        assert!(session.finish(&mut timeline).is_err());

        let committed = timeline.find(a_id).unwrap();
        assert_eq!(committed.end_time, 5.0);
    }

    #[test]
    fn test_trim_commit_updates_collection() {
        let mut timeline = SceneTimeline::default();
        let clip = video_clip(2.0, 8.0);
        let id = clip.id;
        timeline.commit(clip.clone()).unwrap();

        let mut session = begin_at_boundary(clip, TrimSide::Start, 1.0);
        session.update(px_at(4.0, 1.0), 1.0, &timeline);
        session.finish(&mut timeline).unwrap();
        assert_eq!(timeline.find(id).unwrap().start_time, 4.0);
    }
}
