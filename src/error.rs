//! Error taxonomy for timeline mutations and gestures.
//!
//! Bounds violations are not represented here: they are always recovered by
//! clamping before the invariant check, so no caller ever observes them.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    /// A candidate geometry change would overlap another clip on the same
    /// track. Carries the colliding clip so callers can point at it.
    #[error("clip would overlap clip {with}")]
    Collision { with: Uuid },

    /// The track has no remaining room for a new clip of the requested
    /// duration.
    #[error("no free slot on the {track} track")]
    TrackFull { track: &'static str },

    /// An edit referenced a clip id that is no longer in the collection.
    #[error("no clip with id {id}")]
    MissingClip { id: Uuid },

    /// A gesture could not locate its track host element. Fatal to the
    /// gesture only; the gesture aborts back to idle.
    #[error("timeline host element not found: {0}")]
    MissingTrackHost(String),
}
