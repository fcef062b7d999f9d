//! Drag gesture: duration-preserving clip moves.
//!
//! A [`DragSession`] is created on pointer-down over a clip body and lives
//! exactly as long as the gesture. It owns a preview copy of the clip; the
//! committed collection changes only in [`DragSession::finish`], and only
//! through the collision gate in [`SceneTimeline::commit`].

use uuid::Uuid;

use crate::constants::{
    AUTO_SCROLL_EDGE_PX, AUTO_SCROLL_STEP_PX, SNAP_THRESHOLD_PX, TIMELINE_MAX_SECONDS,
};
use crate::error::TimelineError;
use crate::state::{Clip, SceneTimeline, TrackKind};

use super::geometry::{nearest_snap, px_to_time, snap_points, time_to_px};

/// Edge feedback for the dragged clip: yellow free drag, green snapped,
/// red when the raw candidate collided and had to be butted aside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragHighlight {
    Free,
    Snapped,
    Collision,
}

/// One pointer-drag of a clip body. Pointer positions are in timeline
/// content space (scroll offset already applied by the view).
#[derive(Debug, Clone)]
pub struct DragSession {
    original: Clip,
    /// Pointer distance from the clip's left edge at gesture start, px.
    offset_x: f64,
    preview: Clip,
    highlight: DragHighlight,
}

impl DragSession {
    /// Enter the gesture: capture the grab offset and the untouched clip.
    pub fn begin(clip: Clip, pointer_x: f64, zoom: f64) -> Self {
        let offset_x = pointer_x - time_to_px(clip.start_time, zoom);
        Self {
            original: clip.clone(),
            offset_x,
            preview: clip,
            highlight: DragHighlight::Free,
        }
    }

    /// Live preview of the dragged clip. Never overlaps a sibling.
    pub fn preview(&self) -> &Clip {
        &self.preview
    }

    pub fn highlight(&self) -> DragHighlight {
        self.highlight
    }

    /// Recompute the preview for a new pointer position.
    pub fn update(&mut self, pointer_x: f64, zoom: f64, timeline: &SceneTimeline) {
        let duration = self.original.duration();
        let track = self.original.track;
        let id = self.original.id;

        let mouse_time = px_to_time(pointer_x - self.offset_x, zoom);
        let mut new_start = mouse_time.clamp(0.0, (TIMELINE_MAX_SECONDS - duration).max(0.0));

        let colliders = timeline.colliding_clips(track, new_start, new_start + duration, Some(id));
        if colliders.is_empty() {
            // Free candidate: snap the start edge, but never into an overlap.
            self.highlight = DragHighlight::Free;
            let points = snap_points(timeline.clips(), track, Some(id));
            if let Some(hit) = nearest_snap(new_start, &points, SNAP_THRESHOLD_PX, zoom) {
                let snapped = hit.time.clamp(0.0, (TIMELINE_MAX_SECONDS - duration).max(0.0));
                let blocked = !timeline
                    .colliding_clips(track, snapped, snapped + duration, Some(id))
                    .is_empty();
                if !blocked {
                    new_start = snapped;
                    self.highlight = DragHighlight::Snapped;
                }
            }
        } else {
            // Colliding candidate: butt against whichever neighbor edge costs
            // the smaller displacement. Collision suppresses snapping.
            self.highlight = DragHighlight::Collision;
            if let Some(resolved) =
                Self::butt_against(timeline, track, id, &colliders, new_start, duration)
            {
                new_start = resolved;
            }
        }

        self.preview.start_time = new_start;
        self.preview.end_time = new_start + duration;
    }

    /// Candidate start butted against a colliding neighbor: directly after
    /// its end or directly before its start, restricted to in-bounds
    /// placements. A placement that is itself collision-free always beats a
    /// still-colliding one; within each group the smaller displacement wins,
    /// so the preview only stays in overlap when no butted position is legal.
    fn butt_against(
        timeline: &SceneTimeline,
        track: TrackKind,
        id: Uuid,
        colliders: &[&Clip],
        candidate: f64,
        duration: f64,
    ) -> Option<f64> {
        let mut best: Option<f64> = None;
        let mut best_displacement = f64::INFINITY;
        let mut best_is_free = false;
        for neighbor in colliders {
            for resolved in [neighbor.end_time, neighbor.start_time - duration] {
                if resolved < 0.0 || resolved + duration > TIMELINE_MAX_SECONDS {
                    continue;
                }
                let free = timeline
                    .colliding_clips(track, resolved, resolved + duration, Some(id))
                    .is_empty();
                let displacement = (resolved - candidate).abs();
                let better = match (free, best_is_free) {
                    (true, false) => true,
                    (false, true) => false,
                    _ => displacement < best_displacement,
                };
                if better {
                    best_displacement = displacement;
                    best_is_free = free;
                    best = Some(resolved);
                }
            }
        }
        best
    }

    /// Exit the gesture: commit the preview, or revert on collision.
    ///
    /// On `Err` the committed collection is untouched, so the clip simply
    /// stays at its last committed geometry.
    pub fn finish(self, timeline: &mut SceneTimeline) -> Result<Clip, TimelineError> {
        match timeline.commit(self.preview.clone()) {
            Ok(()) => Ok(self.preview),
            Err(err) => {
                log::debug!("drag of clip {} reverted: {}", self.original.id, err);
                Err(err)
            }
        }
    }
}

/// Signed horizontal scroll delta for one auto-scroll tick, given the pointer
/// position inside the scrollable viewport. Zero outside the edge zones.
pub fn auto_scroll_step(pointer_x: f64, viewport_width: f64) -> f64 {
    if viewport_width <= 0.0 {
        return 0.0;
    }
    if pointer_x <= AUTO_SCROLL_EDGE_PX {
        -AUTO_SCROLL_STEP_PX
    } else if pointer_x >= viewport_width - AUTO_SCROLL_EDGE_PX {
        AUTO_SCROLL_STEP_PX
    } else {
        0.0
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

    /// Pointer x that puts the dragged clip's start at `start` when the grab
    /// offset is zero.
    fn px_at(start: f64, zoom: f64) -> f64 {
        time_to_px(start, zoom)
    }

    #[test]
    fn test_drag_preserves_duration() {
        let mut timeline = SceneTimeline::default();
        let clip = video_clip(0.0, 5.0);
        timeline.commit(clip.clone()).unwrap();

        let mut session = DragSession::begin(clip, px_at(0.0, 1.0), 1.0);
        session.update(px_at(20.0, 1.0), 1.0, &timeline);
        let committed = session.finish(&mut timeline).unwrap();
        assert_eq!(committed.start_time, 20.0);
        assert_eq!(committed.end_time - committed.start_time, 5.0);
    }

    #[test]
    fn test_grab_offset_is_respected() {
        let timeline = SceneTimeline::default();
        let clip = video_clip(10.0, 15.0);
        // Grab the clip 2 seconds into its body.
        let mut session = DragSession::begin(clip, px_at(12.0, 1.0), 1.0);
        session.update(px_at(22.0, 1.0), 1.0, &timeline);
        assert_eq!(session.preview().start_time, 20.0);
    }

    #[test]
    fn test_drag_clamps_to_timeline_bounds() {
        let timeline = SceneTimeline::default();
        let clip = video_clip(0.0, 5.0);
        let mut session = DragSession::begin(clip, px_at(0.0, 1.0), 1.0);

        session.update(px_at(-30.0, 1.0), 1.0, &timeline);
        assert_eq!(session.preview().start_time, 0.0);

        session.update(px_at(TIMELINE_MAX_SECONDS + 50.0, 1.0), 1.0, &timeline);
        assert_eq!(session.preview().end_time, TIMELINE_MAX_SECONDS);
        assert_eq!(session.preview().duration(), 5.0);
    }

    #[test]
    fn test_colliding_candidate_butts_after_neighbor() {
        let mut timeline = SceneTimeline::default();
        timeline.commit(video_clip(5.0, 10.0)).unwrap();
        let dragged = video_clip(20.0, 25.0);
        timeline.commit(dragged.clone()).unwrap();

        let mut session = DragSession::begin(dragged, px_at(20.0, 1.0), 1.0);
        // Candidate [8,13) overlaps [5,10); moving after (start 10) costs 2,
        // moving before (start 0) costs 8.
        session.update(px_at(8.0, 1.0), 1.0, &timeline);
        assert_eq!(session.highlight(), DragHighlight::Collision);
        assert_eq!(session.preview().start_time, 10.0);
        assert_eq!(session.preview().end_time, 15.0);
    }

    #[test]
    fn test_colliding_candidate_butts_before_neighbor() {
        let mut timeline = SceneTimeline::default();
        timeline.commit(video_clip(5.0, 10.0)).unwrap();
        let dragged = video_clip(20.0, 25.0);
        timeline.commit(dragged.clone()).unwrap();

        // Candidate [4,9) overlaps; moving before (start 0) costs 4, moving
        // after (start 10) costs 6.
        let mut session = DragSession::begin(dragged, px_at(20.0, 1.0), 1.0);
        session.update(px_at(4.0, 1.0), 1.0, &timeline);
        assert_eq!(session.preview().start_time, 0.0);
    }

    #[test]
    fn test_butt_resolution_skips_into_free_gap() {
        let mut timeline = SceneTimeline::default();
        timeline.commit(video_clip(0.0, 5.0)).unwrap();
        timeline.commit(video_clip(6.0, 11.0)).unwrap();
        let dragged = video_clip(20.0, 25.0);
        timeline.commit(dragged.clone()).unwrap();

        // Candidate [2,7) overlaps both neighbors. The closest butt position
        // [1,6) still overlaps [0,5), so the collision-free placement after
        // the second neighbor at [11,16) wins despite the larger displacement.
        let mut session = DragSession::begin(dragged, px_at(20.0, 1.0), 1.0);
        session.update(px_at(2.0, 1.0), 1.0, &timeline);
        assert_eq!(session.highlight(), DragHighlight::Collision);
        assert_eq!(session.preview().start_time, 11.0);

        let p = session.preview();
        assert!(timeline
            .colliding_clips(TrackKind::Video, p.start_time, p.end_time, Some(p.id))
            .is_empty());
        session.finish(&mut timeline).unwrap();
    }

    #[test]
    fn test_collision_rejection_is_atomic() {
        let mut timeline = SceneTimeline::default();
        let a = video_clip(0.0, 5.0);
        let a_id = a.id;
        timeline.commit(a.clone()).unwrap();
        timeline.commit(video_clip(5.0, 10.0)).unwrap();

        // Force a colliding preview past the session's own resolution,
        // mirroring a stale preview at pointer-up.
        let mut session = DragSession::begin(a, px_at(0.0, 1.0), 1.0);
        session.preview.start_time = 6.0;
        session.preview.end_time = 11.0;
        assert!(session.finish(&mut timeline).is_err());

        let committed = timeline.find(a_id).unwrap();
        assert_eq!(committed.start_time, 0.0);
        assert_eq!(committed.end_time, 5.0);
    }

    #[test]
    fn test_snap_lands_exactly_on_clip_edge() {
        let mut timeline = SceneTimeline::default();
        timeline.commit(video_clip(0.0, 5.0)).unwrap();
        let dragged = video_clip(20.0, 24.0);
        timeline.commit(dragged.clone()).unwrap();

        // Candidate start 5.08 is 8px from the edge at zoom 1: snaps to 5.0
        // exactly, not an approximation.
        let mut session = DragSession::begin(dragged, px_at(20.0, 1.0), 1.0);
        session.update(px_at(5.08, 1.0), 1.0, &timeline);
        assert_eq!(session.highlight(), DragHighlight::Snapped);
        assert_eq!(session.preview().start_time, 5.0);

        let committed = session.finish(&mut timeline).unwrap();
        assert_eq!(committed.start_time, 5.0);
    }

    #[test]
    fn test_never_snaps_into_overlap() {
        let mut timeline = SceneTimeline::default();
        // Sibling occupying [5,10): its start edge at 5.0 is a snap point,
        // but snapping there would overlap it.
        timeline.commit(video_clip(5.0, 10.0)).unwrap();
        let dragged = video_clip(20.0, 24.0);
        timeline.commit(dragged.clone()).unwrap();

        let mut session = DragSession::begin(dragged, px_at(20.0, 1.0), 1.0);
        // Candidate [4.95, 8.95) already overlaps, so this goes down the
        // butt-up path; the point is that no snap is attempted.
        session.update(px_at(4.95, 1.0), 1.0, &timeline);
        assert_ne!(session.highlight(), DragHighlight::Snapped);
        let p = session.preview();
        assert!(
            timeline
                .colliding_clips(TrackKind::Video, p.start_time, p.end_time, Some(p.id))
                .is_empty()
        );
    }

    #[test]
    fn test_auto_scroll_zones() {
        assert_eq!(auto_scroll_step(10.0, 800.0), -AUTO_SCROLL_STEP_PX);
        assert_eq!(auto_scroll_step(400.0, 800.0), 0.0);
        assert_eq!(auto_scroll_step(790.0, 800.0), AUTO_SCROLL_STEP_PX);
        assert_eq!(auto_scroll_step(100.0, 0.0), 0.0);
    }
}
