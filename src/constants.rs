//! Shared UI constants: colors, panel sizing, timeline geometry, and the
//! media sink script driving the playback elements.

pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_SUBTLE: &str = "#1f1f1f";
pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_STRONG: &str = "#3f3f46";
pub const BORDER_ACCENT: &str = "#8b5cf6";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_VIDEO: &str = "#22c55e";
pub const ACCENT_SOUND: &str = "#3b82f6";
pub const ACCENT_NARRATION: &str = "#eab308";
pub const ACCENT_STILL: &str = "#ec4899";

/// Gesture feedback colors: free drag, snapped edge, colliding candidate.
pub const HIGHLIGHT_FREE: &str = "#facc15";
pub const HIGHLIGHT_SNAPPED: &str = "#22c55e";
pub const HIGHLIGHT_COLLISION: &str = "#ef4444";

pub const TIMELINE_DEFAULT_HEIGHT: f64 = 260.0;
pub const TIMELINE_COLLAPSED_HEIGHT: f64 = 32.0;
pub const TIMELINE_MIN_HEIGHT: f64 = 100.0;
pub const TIMELINE_MAX_HEIGHT: f64 = 500.0;

/// Hard end of the editable timeline, in seconds.
pub const TIMELINE_MAX_SECONDS: f64 = 120.0;
/// Shortest clip a trim or edit may produce.
pub const MIN_CLIP_DURATION: f64 = 0.5;
/// Base horizontal scale at zoom 1.0.
pub const PIXELS_PER_SECOND: f64 = 100.0;
/// Maximum pixel distance at which a boundary snaps to a snap point.
pub const SNAP_THRESHOLD_PX: f64 = 10.0;
/// Default length for a freshly placed clip.
pub const DEFAULT_CLIP_DURATION_SECONDS: f64 = 5.0;

/// Width of the viewport edge zones that trigger auto-scroll during a drag.
pub const AUTO_SCROLL_EDGE_PX: f64 = 50.0;
/// Pixels scrolled per auto-scroll tick.
pub const AUTO_SCROLL_STEP_PX: f64 = 10.0;
/// Auto-scroll timer period.
pub const AUTO_SCROLL_TICK_MS: u64 = 16;

/// Playback loop timer period (roughly one 60 fps frame).
pub const PLAYBACK_TICK_MS: u64 = 16;
pub const PLAYBACK_FPS: f64 = 60.0;

pub const TIMELINE_MIN_ZOOM: f64 = 0.1;
pub const TIMELINE_MAX_ZOOM: f64 = 8.0;

/// Reports the timeline scroll host's page offset, width, and horizontal
/// scroll whenever any of them change. The view needs all three to map
/// client pointer coordinates into timeline content space.
pub const TIMELINE_VIEWPORT_SCRIPT: &str = r#"
const hostId = "timeline-scroll-host";
let last = null;

function sendBounds() {
    const host = document.getElementById(hostId);
    if (!host) {
        return;
    }
    const rect = host.getBoundingClientRect();
    const bounds = {
        left: rect.left,
        width: host.clientWidth || 0,
        scroll_left: host.scrollLeft || 0,
    };
    if (last !== null
        && Math.abs(last.left - bounds.left) < 0.5
        && Math.abs(last.width - bounds.width) < 0.5
        && Math.abs(last.scroll_left - bounds.scroll_left) < 0.5) {
        return;
    }
    last = bounds;
    dioxus.send(bounds);
}

// The host element is unmounted while the panel is collapsed, so keep
// re-attaching to whatever element currently carries the id.
let attachedHost = null;
function ensureAttached() {
    const host = document.getElementById(hostId);
    if (!host || host === attachedHost) {
        return;
    }
    attachedHost = host;
    const observer = new ResizeObserver(() => sendBounds());
    observer.observe(host);
    host.addEventListener("scroll", sendBounds, { passive: true });
    sendBounds();
}

window.addEventListener("resize", sendBounds, { passive: true });
setInterval(ensureAttached, 250);
ensureAttached();
await new Promise(() => {});
"#;

/// Long-running eval loop that owns the playback media elements.
///
/// The scheduler posts JSON commands ({kind, track, media}) and the script
/// routes them to the matching sink: the shared video element, one of the two
/// audio elements, or the still-image frame. Playback start failures
/// (autoplay policy, decode errors) are caught and logged here so the Rust
/// side never sees them as hard errors.
pub const MEDIA_SINK_SCRIPT: &str = r#"
function sinkFor(track) {
    switch (track) {
        case "video": return document.getElementById("kura-video-sink");
        case "sound": return document.getElementById("kura-sound-sink");
        case "narration": return document.getElementById("kura-narration-sink");
        case "static_image": return document.getElementById("kura-still-sink");
        default: return null;
    }
}

function stopSink(track) {
    const el = sinkFor(track);
    if (!el) {
        return;
    }
    if (track === "static_image") {
        el.removeAttribute("src");
        el.style.visibility = "hidden";
        return;
    }
    el.pause();
    el.removeAttribute("src");
    el.load();
}

while (true) {
    const msg = await dioxus.recv();
    if (!msg) {
        continue;
    }
    if (msg.kind === "stop") {
        stopSink(msg.track);
        continue;
    }
    if (msg.kind === "pause_all") {
        for (const track of ["video", "sound", "narration"]) {
            const el = sinkFor(track);
            if (el) {
                el.pause();
            }
        }
        continue;
    }
    if (msg.kind === "resume") {
        for (const track of ["video", "sound", "narration"]) {
            const el = sinkFor(track);
            if (el && el.src) {
                const resumed = el.play();
                if (resumed && resumed.catch) {
                    resumed.catch((err) => {
                        console.warn("media sink refused playback:", track, err);
                    });
                }
            }
        }
        continue;
    }
    if (msg.kind !== "start") {
        continue;
    }
    const el = sinkFor(msg.track);
    if (!el) {
        continue;
    }
    if (msg.track === "static_image") {
        el.src = msg.media;
        el.style.visibility = "visible";
        continue;
    }
    el.src = msg.media;
    const started = el.play();
    if (started && started.catch) {
        started.catch((err) => {
            console.warn("media sink refused playback:", msg.track, err);
        });
    }
}
"#;
