use dioxus::prelude::*;

use crate::constants::{
    ACCENT_NARRATION, ACCENT_SOUND, ACCENT_STILL, ACCENT_VIDEO, BG_BASE, BORDER_SUBTLE,
};
use crate::core::drag::DragSession;
use crate::core::trim::TrimSession;
use crate::state::{SceneTimeline, TrackKind};

use super::clip_element::ClipElement;
use super::{ViewportBounds, TRACK_ROW_HEIGHT_PX};

pub(crate) fn track_color(track: TrackKind) -> &'static str {
    match track {
        TrackKind::Video => ACCENT_VIDEO,
        TrackKind::Sound => ACCENT_SOUND,
        TrackKind::Narration => ACCENT_NARRATION,
        TrackKind::StaticImage => ACCENT_STILL,
    }
}

/// Track row content area: one lane of clips for a single track.
#[component]
pub(crate) fn TrackRow(
    width: i32,
    track: TrackKind,
    timeline: SceneTimeline,
    zoom: f64,
    selected_clips: Vec<uuid::Uuid>,
    gesture_active: bool,
    viewport: ViewportBounds,
    on_clip_select: EventHandler<uuid::Uuid>,
    on_clip_delete: EventHandler<uuid::Uuid>,
    on_drag_end: EventHandler<DragSession>,
    on_trim_end: EventHandler<TrimSession>,
    on_gesture_changed: EventHandler<bool>,
    on_snap_preview: EventHandler<Option<f64>>,
    on_edge_scroll: EventHandler<f64>,
    on_deselect_all: EventHandler<MouseEvent>,
) -> Element {
    let track_clips: Vec<_> = timeline.clips_on(track).into_iter().cloned().collect();
    let clip_color = track_color(track);

    rsx! {
        div {
            style: "
                height: {TRACK_ROW_HEIGHT_PX}px; min-width: {width}px;
                border-bottom: 1px solid {BORDER_SUBTLE};
                background-color: {BG_BASE};
                position: relative;
            ",
            oncontextmenu: move |e| e.prevent_default(),
            onmousedown: move |e| {
                // Click on empty track area deselects all clips
                if let Some(btn) = e.trigger_button() {
                    if format!("{:?}", btn) == "Primary" {
                        on_deselect_all.call(e);
                    }
                }
            },

            for clip in track_clips.iter() {
                ClipElement {
                    key: "{clip.id}",
                    clip: clip.clone(),
                    timeline: timeline.clone(),
                    zoom: zoom,
                    clip_color: clip_color,
                    is_selected: selected_clips.contains(&clip.id),
                    gesture_active: gesture_active,
                    viewport: viewport,
                    on_select: move |id| on_clip_select.call(id),
                    on_delete: move |id| on_clip_delete.call(id),
                    on_drag_end: move |session| on_drag_end.call(session),
                    on_trim_end: move |session| on_trim_end.call(session),
                    on_gesture_changed: move |active| on_gesture_changed.call(active),
                    on_snap_preview: move |time| on_snap_preview.call(time),
                    on_edge_scroll: move |step| on_edge_scroll.call(step),
                }
            }
        }
    }
}
