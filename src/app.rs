//! Application shell: owns the committed scene, the playback scheduler, and
//! the wiring between the timeline editor and the media sinks.
//!
//! The committed [`SceneTimeline`] and the [`PlaybackScheduler`] each live in
//! a signal here; everything below receives snapshots and pushes intents back
//! up through callbacks. Gesture sessions never touch these signals directly,
//! they surface as finished sessions that are committed (or rejected) in this
//! file.

use std::time::{Duration, Instant};

use dioxus::prelude::*;

use crate::constants::{
    AUTO_SCROLL_TICK_MS, BG_BASE, BG_HOVER, BG_SURFACE, BORDER_ACCENT, BORDER_DEFAULT,
    BORDER_STRONG, HIGHLIGHT_COLLISION, MEDIA_SINK_SCRIPT, PLAYBACK_TICK_MS, TEXT_DIM,
    TEXT_MUTED, TEXT_PRIMARY, TIMELINE_COLLAPSED_HEIGHT, TIMELINE_DEFAULT_HEIGHT,
    TIMELINE_MAX_HEIGHT, TIMELINE_MAX_SECONDS, TIMELINE_MIN_HEIGHT, TIMELINE_VIEWPORT_SCRIPT,
};
use crate::core::drag::DragSession;
use crate::core::geometry::px_to_time;
use crate::core::playback::{MediaSink, PlaybackScheduler, TrackAction, TrackCommand};
use crate::core::trim::TrimSession;
use crate::hotkeys::{handle_hotkey, HotkeyAction, HotkeyContext, HotkeyResult};
use crate::state::{MediaSource, SceneTimeline, SelectionState, TrackKind};
use crate::timeline::{clamp_zoom, ClipInspector, TimelinePanel, ViewportBounds};

/// [`MediaSink`] backed by the long-running media sink eval loop.
struct EvalSink<'a> {
    eval: &'a document::Eval,
}

impl MediaSink for EvalSink<'_> {
    fn apply(&self, command: &TrackCommand) {
        let payload = match &command.action {
            TrackAction::Start(media) => serde_json::json!({
                "kind": "start",
                "track": command.track.sink_name(),
                "media": media.reference(),
            }),
            TrackAction::Stop => serde_json::json!({
                "kind": "stop",
                "track": command.track.sink_name(),
            }),
        };
        if let Err(err) = self.eval.send(payload) {
            log::warn!("media sink send failed: {err:?}");
        }
    }

    fn pause_all(&self) {
        if let Err(err) = self.eval.send(serde_json::json!({ "kind": "pause_all" })) {
            log::warn!("media sink send failed: {err:?}");
        }
    }

    fn resume_all(&self) {
        if let Err(err) = self.eval.send(serde_json::json!({ "kind": "resume" })) {
            log::warn!("media sink send failed: {err:?}");
        }
    }
}

/// Placeholder generated assets, one flavor per track, until the generation
/// pipeline is hooked up.
fn sample_media(track: TrackKind, index: u64) -> (MediaSource, String) {
    match track {
        TrackKind::Video => (
            MediaSource::VideoUrl(format!("assets/generated/shot_{index:03}.mp4")),
            format!("Shot {index}"),
        ),
        TrackKind::Sound => (
            MediaSource::AudioUrl(format!("assets/generated/ambience_{index:03}.ogg")),
            format!("Ambience {index}"),
        ),
        TrackKind::Narration => (
            MediaSource::AudioUrl(format!("assets/generated/narration_{index:03}.ogg")),
            format!("Narration {index}"),
        ),
        TrackKind::StaticImage => (
            MediaSource::Image(format!("assets/generated/still_{index:03}.png")),
            format!("Still {index}"),
        ),
    }
}

/// Main application component
#[component]
pub fn App() -> Element {
    // Committed scene state and the playback scheduler
    let mut timeline = use_signal(SceneTimeline::default);
    let mut scheduler = use_signal(PlaybackScheduler::new);
    let mut selection = use_signal(SelectionState::default);

    // Timeline view state
    let mut zoom = use_signal(|| 1.0_f64);
    let mut timeline_height = use_signal(|| TIMELINE_DEFAULT_HEIGHT);
    let mut timeline_collapsed = use_signal(|| false);
    let mut viewport = use_signal(ViewportBounds::default);

    // Gesture arbitration: one pointer gesture at a time, app-wide
    let mut gesture_active = use_signal(|| false);
    let mut auto_scroll = use_signal(|| 0.0_f64);
    let mut inspector_focused = use_signal(|| false);

    // Panel/playhead drag state
    let mut dragging = use_signal(|| None::<&'static str>);
    let mut drag_start_pos = use_signal(|| 0.0);
    let mut drag_start_size = use_signal(|| 0.0);

    // Status line, cleared a few seconds after the last message
    let mut status = use_signal(|| None::<String>);
    let mut status_epoch = use_signal(|| 0_u64);

    let mut generated_count = use_signal(|| 0_u64);

    // Long-running eval handles
    let mut media_sink_eval = use_signal(|| None::<document::Eval>);
    let mut viewport_eval = use_signal(|| None::<document::Eval>);

    use_effect(move || {
        if media_sink_eval().is_some() {
            return;
        }
        media_sink_eval.set(Some(document::eval(MEDIA_SINK_SCRIPT)));
    });

    use_effect(move || {
        if viewport_eval().is_some() {
            return;
        }
        viewport_eval.set(Some(document::eval(TIMELINE_VIEWPORT_SCRIPT)));
    });

    // Viewport bounds feed from the observer script
    use_future(move || {
        let mut viewport = viewport.clone();
        let viewport_eval = viewport_eval.clone();
        async move {
            loop {
                let Some(eval) = viewport_eval() else {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    continue;
                };
                let mut eval = eval;
                loop {
                    match eval.recv::<ViewportBounds>().await {
                        Ok(bounds) => {
                            if viewport() != bounds {
                                viewport.set(bounds);
                            }
                        }
                        Err(_) => break,
                    }
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }
    });

    let apply_commands = move |commands: Vec<TrackCommand>| {
        if commands.is_empty() {
            return;
        }
        if let Some(eval) = media_sink_eval() {
            let sink = EvalSink { eval: &eval };
            for command in &commands {
                sink.apply(command);
            }
        }
    };

    let mut pause_playback = move || {
        if scheduler.read().is_playing() {
            scheduler.write().pause();
            if let Some(eval) = media_sink_eval() {
                EvalSink { eval: &eval }.pause_all();
            }
        }
    };

    // Every committed mutation funnels through here: the scheduler drops its
    // resolved clips (pausing if it was playing) and the sinks unload.
    let mut notify_clips_changed = move || {
        let commands = scheduler.write().clips_changed();
        apply_commands(commands);
        if let Some(eval) = media_sink_eval() {
            EvalSink { eval: &eval }.pause_all();
        }
    };

    let mut show_status = move |message: String| {
        log::info!("{message}");
        status.set(Some(message));
        let epoch = status_epoch() + 1;
        status_epoch.set(epoch);
        let mut status = status;
        let status_epoch = status_epoch;
        spawn(async move {
            tokio::time::sleep(Duration::from_secs(4)).await;
            if status_epoch() == epoch {
                status.set(None);
            }
        });
    };

    let mut do_seek = move |t: f64| {
        let commands = scheduler.write().seek(t);
        apply_commands(commands);
    };

    // Playback driver: a 16 ms loop feeding real elapsed time into the
    // scheduler and relaying its commands to the sinks.
    use_future(move || {
        let timeline = timeline.clone();
        let mut scheduler = scheduler.clone();
        async move {
            let mut last_tick = Instant::now();
            loop {
                tokio::time::sleep(Duration::from_millis(PLAYBACK_TICK_MS)).await;
                if !scheduler.read().is_playing() {
                    last_tick = Instant::now();
                    continue;
                }

                let now = Instant::now();
                let delta = now.saturating_duration_since(last_tick).as_secs_f64();
                last_tick = now;

                let commands = {
                    let snapshot = timeline.read().clone();
                    scheduler.write().tick(delta, &snapshot)
                };
                apply_commands(commands);
            }
        }
    });

    // Auto-scroll driver: while a gesture holds the pointer near a viewport
    // edge, keep nudging the scroll host.
    use_future(move || {
        let auto_scroll = auto_scroll.clone();
        async move {
            loop {
                tokio::time::sleep(Duration::from_millis(AUTO_SCROLL_TICK_MS)).await;
                let step = auto_scroll();
                if step != 0.0 {
                    let js = format!(
                        "const host = document.getElementById('timeline-scroll-host'); \
                         if (host) {{ host.scrollLeft += {step}; }}"
                    );
                    let _ = document::eval(&js);
                }
            }
        }
    });

    let mut delete_clip = move |id: uuid::Uuid| {
        if timeline.write().remove(id) {
            selection.write().remove_clip(id);
            notify_clips_changed();
        }
    };

    let mut add_media = move |track: TrackKind| {
        let index = generated_count() + 1;
        let (media, name) = sample_media(track, index);
        let result = timeline.write().add_media(track, media, Some(name));
        match result {
            Ok(id) => {
                generated_count.set(index);
                selection.write().select_clip(id);
                notify_clips_changed();
            }
            Err(err) => show_status(err.to_string()),
        }
    };

    let mut toggle_playback = move || {
        if scheduler.read().is_playing() {
            pause_playback();
        } else {
            scheduler.write().play();
            // Sinks paused by the last transport stop still hold their media
            // mid-file; restart them where they left off.
            if let Some(eval) = media_sink_eval() {
                EvalSink { eval: &eval }.resume_all();
            }
        }
    };

    let current_time = scheduler.read().current_time();
    let is_playing = scheduler.read().is_playing();
    let scene = timeline.read().clone();
    let scene_name = scene.name.clone();
    let selected_clip = selection
        .read()
        .primary_clip()
        .and_then(|id| scene.find(id).cloned());

    let timeline_h = if timeline_collapsed() {
        TIMELINE_COLLAPSED_HEIGHT
    } else {
        timeline_height()
    };
    let timeline_resizing = dragging() == Some("timeline");

    let drag_cursor = match dragging() {
        Some("timeline") => "ns-resize",
        Some("playhead") => "ew-resize",
        _ => "default",
    };
    let status_message = status();

    rsx! {
        // Global CSS with drag state handling
        style {
            r#"
            *, *::before, *::after {{ box-sizing: border-box; }}
            html, body {{ margin: 0; padding: 0; overflow: hidden; background-color: {BG_BASE}; }}
            body {{ -webkit-font-smoothing: antialiased; }}
            ::-webkit-scrollbar {{ width: 6px; height: 6px; }}
            ::-webkit-scrollbar-track {{ background: transparent; }}
            ::-webkit-scrollbar-thumb {{ background: {BORDER_DEFAULT}; border-radius: 3px; }}
            ::-webkit-scrollbar-thumb:hover {{ background: {BORDER_STRONG}; }}
            .collapse-btn {{ opacity: 0.6; transition: opacity 0.15s ease, background-color 0.15s ease; }}
            .collapse-btn:hover {{ opacity: 1; background-color: {BG_HOVER} !important; }}
            .resize-handle {{ transition: background-color 0.15s ease; }}
            .resize-handle:hover {{ background-color: {BORDER_ACCENT} !important; }}
            .resize-handle:active {{ background-color: {BORDER_ACCENT} !important; }}
            .collapsed-rail {{ transition: background-color 0.15s ease; }}
            .collapsed-rail:hover {{ background-color: {BG_HOVER} !important; }}
            .resize-handle-left:hover > div, .resize-handle-right:hover > div {{ opacity: 1 !important; }}
            "#
        }

        // Main app container
        div {
            class: "app-container",
            style: "
                display: flex; flex-direction: column;
                width: 100vw; height: 100vh;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
                overflow: hidden; position: fixed; top: 0; left: 0;
                user-select: none;
                cursor: {drag_cursor};
            ",

            onmousemove: move |e| {
                if let Some(target) = dragging() {
                    e.prevent_default();
                    match target {
                        "timeline" => {
                            let delta = drag_start_pos() - e.client_coordinates().y;
                            let new_h = (drag_start_size() + delta)
                                .clamp(TIMELINE_MIN_HEIGHT, TIMELINE_MAX_HEIGHT);
                            timeline_height.set(new_h);
                        }
                        "playhead" => {
                            let delta_px = e.client_coordinates().x - drag_start_pos();
                            let delta_time = px_to_time(delta_px, zoom());
                            let t = (drag_start_size() + delta_time)
                                .clamp(0.0, TIMELINE_MAX_SECONDS);
                            do_seek(t);
                        }
                        _ => {}
                    }
                }
            },
            onmouseup: move |_| {
                dragging.set(None);
            },
            oncontextmenu: move |e| e.prevent_default(),
            // Keyboard focus for hotkeys
            tabindex: "0",
            onkeydown: move |e: KeyboardEvent| {
                let hotkey_context = HotkeyContext {
                    has_selection: selection.read().primary_clip().is_some(),
                    input_focused: inspector_focused(),
                    gesture_active: gesture_active(),
                };

                match handle_hotkey(&e.key(), &hotkey_context) {
                    HotkeyResult::Action(action) => {
                        e.prevent_default();
                        match action {
                            HotkeyAction::TimelineZoomIn => {
                                zoom.set(clamp_zoom(zoom() * 1.25));
                            }
                            HotkeyAction::TimelineZoomOut => {
                                zoom.set(clamp_zoom(zoom() * 0.8));
                            }
                            HotkeyAction::PlayPause => toggle_playback(),
                            HotkeyAction::SeekBack => {
                                let t = (scheduler.read().current_time() - 1.0).max(0.0);
                                do_seek(t);
                            }
                            HotkeyAction::SeekForward => {
                                let t = scheduler.read().current_time() + 1.0;
                                do_seek(t);
                            }
                            HotkeyAction::SeekStart => do_seek(0.0),
                            HotkeyAction::DeleteSelection => {
                                if let Some(id) = selection.read().primary_clip() {
                                    delete_clip(id);
                                }
                            }
                        }
                    }
                    HotkeyResult::NoMatch | HotkeyResult::Suppressed => {}
                }
            },

            // Header bar
            div {
                style: "
                    display: flex; align-items: center; gap: 12px;
                    height: 36px; padding: 0 14px;
                    background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                    flex-shrink: 0;
                ",
                span { style: "font-size: 13px; font-weight: 600;", "KuraFlix Studio" }
                span { style: "font-size: 12px; color: {TEXT_MUTED};", "{scene_name}" }
                if let Some(message) = status_message {
                    span {
                        style: "margin-left: auto; font-size: 11px; color: {HIGHLIGHT_COLLISION};",
                        "{message}"
                    }
                }
            }

            // Preview area with the media sink elements
            div {
                style: "
                    flex: 1; position: relative; overflow: hidden;
                    display: flex; align-items: center; justify-content: center;
                    background-color: {BG_BASE};
                ",
                video {
                    id: "kura-video-sink",
                    style: "max-width: 100%; max-height: 100%;",
                }
                img {
                    id: "kura-still-sink",
                    style: "
                        position: absolute; right: 16px; bottom: 16px;
                        max-width: 240px; max-height: 160px; visibility: hidden;
                        border: 1px solid {BORDER_DEFAULT}; border-radius: 4px;
                    ",
                }
                audio { id: "kura-sound-sink", style: "display: none;" }
                audio { id: "kura-narration-sink", style: "display: none;" }
                span {
                    style: "position: absolute; left: 16px; bottom: 12px; font-size: 10px; color: {TEXT_DIM};",
                    "Preview"
                }
            }

            if let Some(clip) = selected_clip {
                ClipInspector {
                    clip: clip,
                    on_apply: move |(id, start, end)| {
                        let result = timeline.write().set_clip_times(id, start, end);
                        match result {
                            Ok(_) => notify_clips_changed(),
                            Err(err) => show_status(err.to_string()),
                        }
                    },
                    on_delete: move |id| delete_clip(id),
                    on_focus_changed: move |focused| inspector_focused.set(focused),
                }
            }

            // Timeline height resize handle
            div {
                class: "resize-handle",
                style: "
                    height: 4px; flex-shrink: 0; cursor: ns-resize;
                    background-color: {BORDER_DEFAULT};
                ",
                onmousedown: move |e| {
                    e.prevent_default();
                    dragging.set(Some("timeline"));
                    drag_start_pos.set(e.client_coordinates().y);
                    drag_start_size.set(timeline_height());
                },
            }

            TimelinePanel {
                height: timeline_h,
                collapsed: timeline_collapsed(),
                is_resizing: timeline_resizing,
                on_toggle: move |_| timeline_collapsed.set(!timeline_collapsed()),
                timeline: scene.clone(),
                current_time: current_time,
                zoom: zoom(),
                is_playing: is_playing,
                gesture_active: gesture_active(),
                viewport: viewport(),
                on_seek: move |t: f64| do_seek(t),
                on_zoom_change: move |z: f64| zoom.set(clamp_zoom(z)),
                on_play_pause: move |_| toggle_playback(),
                on_seek_start: move |e: MouseEvent| {
                    dragging.set(Some("playhead"));
                    drag_start_pos.set(e.client_coordinates().x);
                    drag_start_size.set(scheduler.read().current_time());
                },
                on_add_media: move |track| add_media(track),
                on_clip_select: move |id| selection.write().select_clip(id),
                on_clip_delete: move |id| delete_clip(id),
                on_drag_end: move |session: DragSession| {
                    let result = {
                        let mut scene = timeline.write();
                        session.finish(&mut scene)
                    };
                    match result {
                        Ok(_) => notify_clips_changed(),
                        Err(err) => show_status(err.to_string()),
                    }
                },
                on_trim_end: move |session: TrimSession| {
                    let result = {
                        let mut scene = timeline.write();
                        session.finish(&mut scene)
                    };
                    match result {
                        Ok(_) => notify_clips_changed(),
                        Err(err) => show_status(err.to_string()),
                    }
                },
                on_gesture_changed: move |active: bool| {
                    if active {
                        pause_playback();
                    } else {
                        auto_scroll.set(0.0);
                    }
                    gesture_active.set(active);
                },
                on_edge_scroll: move |step: f64| {
                    if auto_scroll() != step {
                        auto_scroll.set(step);
                    }
                },
                selected_clips: selection.read().clip_ids.clone(),
                on_deselect_all: move |_| selection.write().clear(),
            }
        }
    }
}
