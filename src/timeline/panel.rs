use dioxus::prelude::*;

use crate::constants::{
    BG_ELEVATED, BG_SURFACE, BORDER_DEFAULT, HIGHLIGHT_COLLISION, HIGHLIGHT_SNAPPED,
    PLAYBACK_FPS, TEXT_DIM, TEXT_MUTED, TIMELINE_MAX_SECONDS,
};
use crate::core::drag::DragSession;
use crate::core::geometry::{px_to_time, time_to_px};
use crate::core::trim::TrimSession;
use crate::state::{SceneTimeline, TrackKind};

use super::playback_controls::PlaybackBtn;
use super::ruler::TimeRuler;
use super::track_label::TrackLabel;
use super::track_row::{track_color, TrackRow};
use super::{ViewportBounds, RULER_HEIGHT_PX, TRACK_LABEL_WIDTH_PX};

/// Format a time as HH:MM:SS:FF at the playback frame rate.
pub(crate) fn format_timecode(t: f64) -> String {
    let fps = PLAYBACK_FPS;
    let fps_i = fps.round().max(1.0) as u64;
    let total_frames = (t * fps).round().max(0.0) as u64;
    let frames = total_frames % fps_i;
    let total_seconds = total_frames / fps_i;
    let seconds = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let minutes = total_minutes % 60;
    let hours = total_minutes / 60;
    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, seconds, frames)
}

/// Main timeline panel component
#[component]
pub fn TimelinePanel(
    height: f64,
    collapsed: bool,
    is_resizing: bool,
    on_toggle: EventHandler<MouseEvent>,
    // Scene data
    timeline: SceneTimeline,
    // Timeline state
    current_time: f64,
    zoom: f64,
    is_playing: bool,
    gesture_active: bool,
    viewport: ViewportBounds,
    // Transport callbacks
    on_seek: EventHandler<f64>,
    on_zoom_change: EventHandler<f64>,
    on_play_pause: EventHandler<MouseEvent>,
    on_seek_start: EventHandler<MouseEvent>,
    // Clip operations
    on_add_media: EventHandler<TrackKind>,
    on_clip_select: EventHandler<uuid::Uuid>,
    on_clip_delete: EventHandler<uuid::Uuid>,
    on_drag_end: EventHandler<DragSession>,
    on_trim_end: EventHandler<TrimSession>,
    on_gesture_changed: EventHandler<bool>,
    on_edge_scroll: EventHandler<f64>,
    selected_clips: Vec<uuid::Uuid>,
    on_deselect_all: EventHandler<MouseEvent>,
) -> Element {
    let mut snap_indicator_time = use_signal(|| None::<f64>);
    let icon = if collapsed { "▲" } else { "▼" };
    let play_icon = if is_playing { "⏸" } else { "▶" };

    // Only apply transition when NOT resizing
    let transition = if is_resizing {
        "none"
    } else {
        "height 0.2s ease, min-height 0.2s ease"
    };

    let header_cursor = if collapsed { "pointer" } else { "default" };
    let header_class = if collapsed { "collapsed-rail" } else { "" };

    let timecode = format_timecode(current_time);
    let zoom_label = format!("{:.0}px/s", time_to_px(1.0, zoom));
    let scene_duration = timeline.duration();
    let duration_label = format_timecode(scene_duration);

    let content_width = time_to_px(TIMELINE_MAX_SECONDS, zoom) as i32;
    let content_width_f = content_width as f64;
    let playhead_pos = time_to_px(current_time, zoom)
        .min(content_width_f - 1.0)
        .max(0.0);
    let snap_indicator_pos = snap_indicator_time()
        .map(|snap_time| time_to_px(snap_time, zoom).min(content_width_f - 1.0).max(0.0));

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column;
                height: {height}px; min-height: {height}px;
                background-color: {BG_ELEVATED};
                transition: {transition};
                overflow: hidden;
            ",

            // Header
            div {
                class: "{header_class}",
                style: "
                    display: flex; align-items: center; justify-content: space-between;
                    height: 32px; padding: 0 14px;
                    background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                    flex-shrink: 0;
                    cursor: {header_cursor};
                ",
                onclick: move |e| {
                    if collapsed {
                        on_toggle.call(e);
                    }
                },

                // Left: Timeline label + zoom controls
                div {
                    style: "display: flex; align-items: center; gap: 12px;",
                    onclick: move |e| e.stop_propagation(),
                    span { style: "font-size: 11px; font-weight: 500; color: {TEXT_MUTED}; text-transform: uppercase; letter-spacing: 0.5px;", "Timeline" }

                    div {
                        style: "display: flex; align-items: center; gap: 4px;",
                        button {
                            class: "collapse-btn",
                            style: "width: 20px; height: 20px; border: none; border-radius: 3px; background: transparent; color: {TEXT_MUTED}; font-size: 12px; cursor: pointer; display: flex; align-items: center; justify-content: center;",
                            onclick: move |_| on_zoom_change.call(zoom * 0.8),
                            "−"
                        }
                        span {
                            style: "font-size: 10px; color: {TEXT_DIM}; min-width: 40px; text-align: center;",
                            "{zoom_label}"
                        }
                        button {
                            class: "collapse-btn",
                            style: "width: 20px; height: 20px; border: none; border-radius: 3px; background: transparent; color: {TEXT_MUTED}; font-size: 12px; cursor: pointer; display: flex; align-items: center; justify-content: center;",
                            onclick: move |_| on_zoom_change.call(zoom * 1.25),
                            "+"
                        }
                    }
                }

                // Center: Playback controls
                div {
                    style: "display: flex; align-items: center; gap: 4px;",
                    onclick: move |e| e.stop_propagation(),
                    PlaybackBtn {
                        icon: "⏮",
                        on_click: move |_| on_seek.call(0.0),
                    }
                    PlaybackBtn {
                        icon: "|◀",
                        on_click: move |_| {
                            // Snap to previous round second
                            let t = (current_time - 0.01).floor().max(0.0);
                            on_seek.call(t);
                        },
                    }
                    PlaybackBtn {
                        icon: play_icon,
                        primary: true,
                        on_click: move |e| on_play_pause.call(e),
                    }
                    PlaybackBtn {
                        icon: "▶|",
                        on_click: move |_| {
                            // Snap to next round second
                            let t = (current_time.floor() + 1.0).min(scene_duration);
                            on_seek.call(t);
                        },
                    }
                    PlaybackBtn {
                        icon: "⏭",
                        on_click: move |_| on_seek.call(scene_duration),
                    }
                }

                // Right: Timecode + collapse button
                div {
                    style: "display: flex; align-items: center; gap: 12px;",
                    span {
                        style: "font-family: 'SF Mono', Consolas, monospace; font-size: 11px; color: {TEXT_DIM};",
                        "{timecode} / {duration_label}"
                    }
                    button {
                        class: "collapse-btn",
                        style: "width: 24px; height: 24px; border: none; border-radius: 4px; background: transparent; color: {TEXT_MUTED}; font-size: 10px; cursor: pointer; display: flex; align-items: center; justify-content: center;",
                        onclick: move |e| {
                            e.stop_propagation();
                            on_toggle.call(e);
                        },
                        "{icon}"
                    }
                }
            }

            // Content: fixed label column on the left, one scroll host on the
            // right holding the sticky ruler and the four track lanes.
            if !collapsed {
                div {
                    style: "flex: 1; display: flex; overflow: hidden;",

                    // Fixed-width label column
                    div {
                        style: "
                            width: {TRACK_LABEL_WIDTH_PX}px;
                            min-width: {TRACK_LABEL_WIDTH_PX}px;
                            flex-shrink: 0;
                            display: flex;
                            flex-direction: column;
                            background-color: {BG_ELEVATED};
                            border-right: 1px solid {BORDER_DEFAULT};
                            z-index: 20;
                        ",

                        // Corner cell above track labels
                        div {
                            style: "
                                height: {RULER_HEIGHT_PX}px;
                                flex-shrink: 0;
                                border-bottom: 1px solid {BORDER_DEFAULT};
                                background-color: {BG_ELEVATED};
                            ",
                        }

                        for track in TrackKind::ALL {
                            TrackLabel {
                                key: "{track.label()}",
                                track: track,
                                color: track_color(track),
                                on_add_media: move |kind| on_add_media.call(kind),
                            }
                        }
                    }

                    // Scroll host: ruler + tracks share one horizontal scroll
                    div {
                        id: "timeline-scroll-host",
                        style: "
                            flex: 1;
                            overflow-x: auto;
                            overflow-y: auto;
                            position: relative;
                        ",

                        div {
                            style: "
                                min-width: {content_width}px;
                                display: flex;
                                flex-direction: column;
                                position: relative;
                            ",

                            // Ruler row - sticky at top, scrolls horizontally
                            div {
                                style: "
                                    height: {RULER_HEIGHT_PX}px;
                                    min-height: {RULER_HEIGHT_PX}px;
                                    position: sticky;
                                    top: 0;
                                    z-index: 15;
                                    background-color: {BG_SURFACE};
                                    border-bottom: 1px solid {BORDER_DEFAULT};
                                    cursor: pointer;
                                    overflow: hidden;
                                ",
                                // Click to seek and keep seeking while the
                                // button stays down. Disabled while a clip
                                // gesture owns the pointer.
                                onmousedown: move |e| {
                                    if gesture_active {
                                        return;
                                    }
                                    e.prevent_default();
                                    // element_coordinates is already in
                                    // content space here
                                    let x = e.element_coordinates().x;
                                    let t = px_to_time(x, zoom).clamp(0.0, TIMELINE_MAX_SECONDS);
                                    on_seek.call(t);
                                    on_seek_start.call(e);
                                },

                                TimeRuler { zoom: zoom }

                                // Playhead indicator on ruler
                                div {
                                    style: "
                                        position: absolute;
                                        left: {playhead_pos}px;
                                        top: 0;
                                        width: 1px;
                                        height: 100%;
                                        background-color: {HIGHLIGHT_COLLISION};
                                        pointer-events: none;
                                    ",
                                }
                                if let Some(snap_pos) = snap_indicator_pos {
                                    div {
                                        style: "
                                            position: absolute;
                                            left: {snap_pos}px;
                                            top: 0;
                                            width: 1px;
                                            height: 100%;
                                            background-color: {HIGHLIGHT_SNAPPED};
                                            opacity: 0.5;
                                            pointer-events: none;
                                        ",
                                    }
                                }
                                // Playhead handle (triangle)
                                div {
                                    style: "
                                        position: absolute;
                                        left: {playhead_pos - 5.0}px;
                                        top: 0;
                                        width: 0;
                                        height: 0;
                                        border-left: 6px solid transparent;
                                        border-right: 6px solid transparent;
                                        border-top: 8px solid {HIGHLIGHT_COLLISION};
                                        pointer-events: none;
                                    ",
                                }
                            }

                            // Track rows
                            div {
                                style: "
                                    display: flex;
                                    flex-direction: column;
                                    position: relative;
                                ",

                                for track in TrackKind::ALL {
                                    TrackRow {
                                        key: "{track.label()}",
                                        width: content_width,
                                        track: track,
                                        timeline: timeline.clone(),
                                        zoom: zoom,
                                        selected_clips: selected_clips.clone(),
                                        gesture_active: gesture_active,
                                        viewport: viewport,
                                        on_clip_select: move |id| on_clip_select.call(id),
                                        on_clip_delete: move |id| on_clip_delete.call(id),
                                        on_drag_end: move |session| on_drag_end.call(session),
                                        on_trim_end: move |session| on_trim_end.call(session),
                                        on_gesture_changed: move |active| on_gesture_changed.call(active),
                                        on_snap_preview: move |time| snap_indicator_time.set(time),
                                        on_edge_scroll: move |step| on_edge_scroll.call(step),
                                        on_deselect_all: move |e| on_deselect_all.call(e),
                                    }
                                }

                                if let Some(snap_pos) = snap_indicator_pos {
                                    div {
                                        style: "
                                            position: absolute;
                                            left: {snap_pos}px;
                                            top: 0;
                                            width: 1px;
                                            height: 100%;
                                            background-color: {HIGHLIGHT_SNAPPED};
                                            opacity: 0.5;
                                            pointer-events: none;
                                            z-index: 9;
                                        ",
                                    }
                                }

                                // Playhead line overlaying tracks
                                div {
                                    style: "
                                        position: absolute;
                                        left: {playhead_pos}px;
                                        top: 0;
                                        width: 1px;
                                        height: 100%;
                                        background-color: {HIGHLIGHT_COLLISION};
                                        pointer-events: none;
                                        z-index: 10;
                                    ",
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timecode_format() {
        assert_eq!(format_timecode(0.0), "00:00:00:00");
        assert_eq!(format_timecode(1.5), "00:00:01:30");
        assert_eq!(format_timecode(61.0), "00:01:01:00");
        assert_eq!(format_timecode(119.25), "00:01:59:15");
    }
}
