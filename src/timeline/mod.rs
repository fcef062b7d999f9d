//! Timeline editor UI
//!
//! One component per concern: the panel shell, the ruler, the transport
//! buttons, track labels, track rows, and the interactive clip elements.

mod clip_element;
mod clip_inspector;
mod panel;
mod playback_controls;
mod ruler;
mod track_label;
mod track_row;

pub use clip_inspector::ClipInspector;
pub use panel::TimelinePanel;

use crate::constants::{TIMELINE_MAX_ZOOM, TIMELINE_MIN_ZOOM};

pub(crate) const RULER_HEIGHT_PX: i32 = 24;
pub(crate) const TRACK_LABEL_WIDTH_PX: i32 = 140;
pub(crate) const TRACK_ROW_HEIGHT_PX: i32 = 36;

/// Geometry of the scrollable timeline viewport, reported by the observer
/// script attached to the scroll host element. `left` is the host's page-x,
/// `scroll_left` its current horizontal scroll. Together they map client
/// pointer coordinates into timeline content space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Deserialize)]
pub struct ViewportBounds {
    pub left: f64,
    pub width: f64,
    pub scroll_left: f64,
}

impl ViewportBounds {
    /// Client x to timeline content x.
    pub fn content_x(&self, client_x: f64) -> f64 {
        client_x - self.left + self.scroll_left
    }
}

pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(TIMELINE_MIN_ZOOM, TIMELINE_MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_x_applies_scroll_and_origin() {
        let viewport = ViewportBounds {
            left: 140.0,
            width: 800.0,
            scroll_left: 250.0,
        };
        assert_eq!(viewport.content_x(140.0), 250.0);
        assert_eq!(viewport.content_x(340.0), 450.0);
    }

    #[test]
    fn test_clamp_zoom_bounds() {
        assert_eq!(clamp_zoom(0.01), TIMELINE_MIN_ZOOM);
        assert_eq!(clamp_zoom(1.0), 1.0);
        assert_eq!(clamp_zoom(50.0), TIMELINE_MAX_ZOOM);
    }
}
