//! Pure geometry: time/pixel conversion and snap point search.

use uuid::Uuid;

use crate::constants::{PIXELS_PER_SECOND, TIMELINE_MAX_SECONDS};
use crate::state::{Clip, TrackKind};

/// Convert a time in seconds to a pixel offset at the given zoom.
pub fn time_to_px(time_seconds: f64, zoom: f64) -> f64 {
    time_seconds * PIXELS_PER_SECOND * zoom
}

/// Convert a pixel offset back to seconds at the given zoom.
pub fn px_to_time(px: f64, zoom: f64) -> f64 {
    let scale = PIXELS_PER_SECOND * zoom;
    if scale <= 0.0 {
        0.0
    } else {
        px / scale
    }
}

/// Category of a snap point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapPointKind {
    /// Whole-second ruler tick.
    SecondTick,
    /// Start edge of a sibling clip.
    ClipStart,
    /// End edge of a sibling clip.
    ClipEnd,
}

/// A time position a moving boundary may snap to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapPoint {
    pub time: f64,
    pub kind: SnapPointKind,
}

/// Snap points at every whole second of the timeline.
pub fn second_tick_points() -> Vec<SnapPoint> {
    (0..=TIMELINE_MAX_SECONDS as i64)
        .map(|s| SnapPoint {
            time: s as f64,
            kind: SnapPointKind::SecondTick,
        })
        .collect()
}

/// All snap points relevant to manipulating a clip on `track`: second ticks
/// plus the edges of same-track clips, excluding the clip being moved.
pub fn snap_points(clips: &[Clip], track: TrackKind, exclude: Option<Uuid>) -> Vec<SnapPoint> {
    let mut points = second_tick_points();
    for clip in clips {
        if clip.track != track || Some(clip.id) == exclude {
            continue;
        }
        points.push(SnapPoint {
            time: clip.start_time,
            kind: SnapPointKind::ClipStart,
        });
        points.push(SnapPoint {
            time: clip.end_time,
            kind: SnapPointKind::ClipEnd,
        });
    }
    points
}

/// Find the snap point closest to `candidate` within `threshold_px` at the
/// given zoom. Ties keep the earlier point in the list.
pub fn nearest_snap(
    candidate: f64,
    points: &[SnapPoint],
    threshold_px: f64,
    zoom: f64,
) -> Option<SnapPoint> {
    let mut best: Option<SnapPoint> = None;
    let mut best_distance = f64::INFINITY;
    for &point in points {
        let distance = time_to_px((point.time - candidate).abs(), zoom);
        if distance > threshold_px {
            continue;
        }
        if distance < best_distance {
            best_distance = distance;
            best = Some(point);
        }
    }
    best
}
