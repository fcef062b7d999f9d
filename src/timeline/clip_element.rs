use dioxus::prelude::*;

use crate::constants::{
    BG_ELEVATED, BORDER_ACCENT, BORDER_DEFAULT, HIGHLIGHT_COLLISION, HIGHLIGHT_FREE,
    HIGHLIGHT_SNAPPED, TEXT_PRIMARY,
};
use crate::core::drag::{auto_scroll_step, DragHighlight, DragSession};
use crate::core::geometry::time_to_px;
use crate::core::trim::{TrimHighlight, TrimSession, TrimSide};
use crate::error::TimelineError;
use crate::state::{Clip, SceneTimeline};

use super::ViewportBounds;

/// Interactive clip element with drag, edge trim, and context menu support.
///
/// A pointer-down starts a gesture session over a preview copy of the clip;
/// while the session lives, a fixed overlay captures every mouse event and
/// the committed timeline is left untouched. Pointer-up hands the finished
/// session to the parent, which commits or reverts it.
#[component]
pub(crate) fn ClipElement(
    clip: Clip,
    timeline: SceneTimeline,
    zoom: f64,
    clip_color: &'static str,
    is_selected: bool,
    gesture_active: bool,
    viewport: ViewportBounds,
    on_select: EventHandler<uuid::Uuid>,
    on_delete: EventHandler<uuid::Uuid>,
    on_drag_end: EventHandler<DragSession>,
    on_trim_end: EventHandler<TrimSession>,
    on_gesture_changed: EventHandler<bool>,
    on_snap_preview: EventHandler<Option<f64>>,
    on_edge_scroll: EventHandler<f64>,
) -> Element {
    let mut show_menu = use_signal(|| false);
    let mut menu_pos = use_signal(|| (0.0, 0.0));
    let mut drag = use_signal(|| None::<DragSession>);
    let mut trim = use_signal(|| None::<TrimSession>);

    let clip_id = clip.id;
    // Another clip owns the pointer; refuse to start a second gesture.
    let session_here = drag.read().is_some() || trim.read().is_some();
    let can_start = !gesture_active || session_here;

    // Without host bounds there is no way to map pointer coordinates into
    // content space, so the gesture aborts before it starts.
    let gesture_host_ready = move || {
        if viewport.width > 0.0 {
            return true;
        }
        log::warn!(
            "{}",
            TimelineError::MissingTrackHost("timeline-scroll-host".into())
        );
        false
    };

    // Render the session preview while a gesture is live, the committed clip
    // otherwise.
    let (start_time, end_time) = if let Some(session) = drag.read().as_ref() {
        (session.preview().start_time, session.preview().end_time)
    } else if let Some(session) = trim.read().as_ref() {
        (session.preview().start_time, session.preview().end_time)
    } else {
        (clip.start_time, clip.end_time)
    };
    let left = time_to_px(start_time, zoom) as i32;
    let clip_width = time_to_px(end_time - start_time, zoom).max(4.0) as i32;

    let border_color = if let Some(session) = drag.read().as_ref() {
        match session.highlight() {
            DragHighlight::Free => HIGHLIGHT_FREE,
            DragHighlight::Snapped => HIGHLIGHT_SNAPPED,
            DragHighlight::Collision => HIGHLIGHT_COLLISION,
        }
    } else if let Some(session) = trim.read().as_ref() {
        match session.highlight() {
            TrimHighlight::Free => HIGHLIGHT_FREE,
            TrimHighlight::Snapped => HIGHLIGHT_SNAPPED,
            TrimHighlight::Collision => HIGHLIGHT_COLLISION,
        }
    } else {
        clip_color
    };
    let selection_ring = if is_selected {
        format!("0 0 0 1px {}", BORDER_ACCENT)
    } else {
        "none".to_string()
    };

    let display_name = clip
        .name
        .clone()
        .unwrap_or_else(|| clip.media.reference().to_string());

    let cursor_style = if drag.read().is_some() {
        "grabbing"
    } else if trim.read().is_some() {
        "ew-resize"
    } else {
        "grab"
    };
    let z_index = if session_here { "100" } else { "1" };

    let clip_for_drag = clip.clone();
    let clip_for_trim_left = clip.clone();
    let clip_for_trim_right = clip.clone();

    rsx! {
        // Main clip element
        div {
            style: "
                position: absolute;
                left: {left}px;
                top: 2px;
                width: {clip_width}px;
                height: 32px;
                background-color: {BG_ELEVATED};
                border: 1px solid {border_color};
                box-shadow: {selection_ring};
                border-radius: 4px;
                display: flex;
                align-items: center;
                overflow: visible;
                cursor: {cursor_style};
                user-select: none;
                z-index: {z_index};
            ",
            oncontextmenu: move |e| {
                e.prevent_default();
                e.stop_propagation();
                let coords = e.client_coordinates();
                menu_pos.set((coords.x, coords.y));
                show_menu.set(true);
            },

            // Left trim handle
            div {
                class: "resize-handle-left",
                style: "
                    position: absolute; left: -4px; top: 0; bottom: 0; width: 10px;
                    cursor: ew-resize; z-index: 10;
                    border-radius: 4px 0 0 4px;
                ",
                onmousedown: move |e| {
                    if let Some(btn) = e.trigger_button() {
                        if format!("{:?}", btn) == "Primary" && can_start {
                            if !gesture_host_ready() {
                                return;
                            }
                            e.prevent_default();
                            e.stop_propagation();
                            on_select.call(clip_id);
                            let pointer_x = viewport.content_x(e.client_coordinates().x);
                            trim.set(Some(TrimSession::begin(
                                clip_for_trim_left.clone(),
                                TrimSide::Start,
                                pointer_x,
                                zoom,
                            )));
                            on_gesture_changed.call(true);
                        }
                    }
                },
                div {
                    style: "
                        position: absolute; left: 3px; top: 6px; bottom: 6px; width: 4px;
                        background-color: rgba(255, 255, 255, 0.2);
                        border-radius: 2px;
                        pointer-events: none;
                        opacity: 0;
                        transition: opacity 0.1s;
                    ",
                }
            }

            // Center drag area (the main clip body)
            div {
                style: "
                    flex: 1; height: 100%; display: flex; align-items: center;
                    padding: 0 10px; overflow: hidden; position: relative; z-index: 1;
                ",
                onmousedown: move |e| {
                    if let Some(btn) = e.trigger_button() {
                        if format!("{:?}", btn) == "Primary" && can_start {
                            if !gesture_host_ready() {
                                return;
                            }
                            e.prevent_default();
                            e.stop_propagation();
                            on_select.call(clip_id);
                            let pointer_x = viewport.content_x(e.client_coordinates().x);
                            drag.set(Some(DragSession::begin(
                                clip_for_drag.clone(),
                                pointer_x,
                                zoom,
                            )));
                            on_gesture_changed.call(true);
                        }
                    }
                },

                div {
                    style: "
                        display: flex; align-items: center; width: 100%;
                        min-width: 0; overflow: hidden;
                    ",
                    div {
                        style: "width: 3px; height: 20px; border-radius: 2px; background-color: {clip_color}; flex-shrink: 0; margin-right: 6px;",
                    }
                    span {
                        style: "
                            font-size: 10px; color: {TEXT_PRIMARY};
                            white-space: nowrap; overflow: hidden; text-overflow: ellipsis;
                            flex: 1; min-width: 0;
                        ",
                        "{display_name}"
                    }
                }
            }

            // Right trim handle
            div {
                class: "resize-handle-right",
                style: "
                    position: absolute; right: -4px; top: 0; bottom: 0; width: 10px;
                    cursor: ew-resize; z-index: 10;
                    border-radius: 0 4px 4px 0;
                ",
                onmousedown: move |e| {
                    if let Some(btn) = e.trigger_button() {
                        if format!("{:?}", btn) == "Primary" && can_start {
                            if !gesture_host_ready() {
                                return;
                            }
                            e.prevent_default();
                            e.stop_propagation();
                            on_select.call(clip_id);
                            let pointer_x = viewport.content_x(e.client_coordinates().x);
                            trim.set(Some(TrimSession::begin(
                                clip_for_trim_right.clone(),
                                TrimSide::End,
                                pointer_x,
                                zoom,
                            )));
                            on_gesture_changed.call(true);
                        }
                    }
                },
                div {
                    style: "
                        position: absolute; right: 3px; top: 6px; bottom: 6px; width: 4px;
                        background-color: rgba(255, 255, 255, 0.2);
                        border-radius: 2px;
                        pointer-events: none;
                        opacity: 0;
                        transition: opacity 0.1s;
                    ",
                }
            }
        }

        // Gesture overlay - captures all mouse events while a session is live
        if session_here {
            div {
                style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; z-index: 9999; cursor: {cursor_style};",
                oncontextmenu: move |e| e.prevent_default(),
                onmousemove: move |e| {
                    let client_x = e.client_coordinates().x;
                    let pointer_x = viewport.content_x(client_x);

                    if let Some(mut session) = drag() {
                        session.update(pointer_x, zoom, &timeline);
                        let snap = match session.highlight() {
                            DragHighlight::Snapped => Some(session.preview().start_time),
                            _ => None,
                        };
                        on_snap_preview.call(snap);
                        drag.set(Some(session));
                    } else if let Some(mut session) = trim() {
                        session.update(pointer_x, zoom, &timeline);
                        let snap = match (session.highlight(), session.side()) {
                            (TrimHighlight::Snapped, TrimSide::Start) => {
                                Some(session.preview().start_time)
                            }
                            (TrimHighlight::Snapped, TrimSide::End) => {
                                Some(session.preview().end_time)
                            }
                            _ => None,
                        };
                        on_snap_preview.call(snap);
                        trim.set(Some(session));
                    }

                    // Near the viewport edges the host keeps scrolling so the
                    // drag can reach offscreen timeline.
                    on_edge_scroll.call(auto_scroll_step(client_x - viewport.left, viewport.width));
                },
                onmouseup: move |_| {
                    on_snap_preview.call(None);
                    on_edge_scroll.call(0.0);
                    if let Some(session) = drag.take() {
                        on_drag_end.call(session);
                    } else if let Some(session) = trim.take() {
                        on_trim_end.call(session);
                    }
                    on_gesture_changed.call(false);
                },
            }
        }

        // Context menu overlay
        if show_menu() {
            div {
                style: "position: fixed; top: 0; left: 0; right: 0; bottom: 0; z-index: 9998;",
                onclick: move |_| show_menu.set(false),
                oncontextmenu: move |e| {
                    e.prevent_default();
                    show_menu.set(false);
                },
            }
            div {
                style: "
                    position: fixed;
                    left: {menu_pos().0}px;
                    top: {menu_pos().1}px;
                    background-color: {BG_ELEVATED}; border: 1px solid {BORDER_DEFAULT};
                    border-radius: 6px; padding: 4px 0; min-width: 120px;
                    box-shadow: 0 4px 12px rgba(0,0,0,0.3);
                    z-index: 9999; font-size: 12px;
                ",
                oncontextmenu: move |e| e.prevent_default(),
                div {
                    style: "
                        padding: 6px 12px; color: {HIGHLIGHT_COLLISION}; cursor: pointer;
                        transition: background-color 0.1s ease;
                    ",
                    onclick: move |_| {
                        on_delete.call(clip_id);
                        show_menu.set(false);
                    },
                    "Delete Clip"
                }
            }
        }
    }
}
