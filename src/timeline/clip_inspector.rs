use dioxus::prelude::*;

use crate::constants::{
    BG_BASE, BG_SURFACE, BORDER_DEFAULT, TEXT_DIM, TEXT_MUTED, TEXT_PRIMARY,
};
use crate::state::Clip;

/// Numeric editor for the selected clip's boundaries.
///
/// Edits are staged in the input fields and only applied on Enter or blur;
/// the parent runs them through the same clamp and collision gate as the
/// pointer gestures and reports rejections in the status line.
#[component]
pub fn ClipInspector(
    clip: Clip,
    on_apply: EventHandler<(uuid::Uuid, f64, f64)>,
    on_delete: EventHandler<uuid::Uuid>,
    on_focus_changed: EventHandler<bool>,
) -> Element {
    let clip_id = clip.id;
    let mut start_text = use_signal(|| format!("{:.2}", clip.start_time));
    let mut end_text = use_signal(|| format!("{:.2}", clip.end_time));

    // Re-seed the fields when the committed clip changes under us (drag,
    // trim, or a rejected edit snapping back).
    let mut seeded_for = use_signal(|| (clip.start_time, clip.end_time));
    if seeded_for() != (clip.start_time, clip.end_time) {
        seeded_for.set((clip.start_time, clip.end_time));
        start_text.set(format!("{:.2}", clip.start_time));
        end_text.set(format!("{:.2}", clip.end_time));
    }

    let display_name = clip
        .name
        .clone()
        .unwrap_or_else(|| clip.media.reference().to_string());
    let track_name = clip.track.label();

    let apply = move |_| {
        let start = start_text().trim().parse::<f64>();
        let end = end_text().trim().parse::<f64>();
        if let (Ok(start), Ok(end)) = (start, end) {
            on_apply.call((clip_id, start, end));
        }
    };

    let field_style = format!(
        "width: 70px; padding: 4px 6px; background-color: {}; border: 1px solid {}; \
         border-radius: 4px; color: {}; font-size: 11px; font-family: 'SF Mono', Consolas, monospace;",
        BG_BASE, BORDER_DEFAULT, TEXT_PRIMARY
    );

    rsx! {
        div {
            style: "
                display: flex; flex-direction: column; gap: 8px;
                padding: 12px; background-color: {BG_SURFACE};
                border-top: 1px solid {BORDER_DEFAULT};
                font-size: 11px; color: {TEXT_MUTED};
            ",
            onfocusin: move |_| on_focus_changed.call(true),
            onfocusout: move |_| on_focus_changed.call(false),

            div {
                style: "display: flex; align-items: center; gap: 8px;",
                span { style: "color: {TEXT_PRIMARY}; font-size: 12px; flex: 1; overflow: hidden; text-overflow: ellipsis; white-space: nowrap;", "{display_name}" }
                span { style: "color: {TEXT_DIM};", "{track_name}" }
            }

            div {
                style: "display: flex; align-items: center; gap: 8px;",
                span { style: "width: 34px;", "Start" }
                input {
                    style: "{field_style}",
                    value: "{start_text}",
                    oninput: move |e| start_text.set(e.value()),
                    onchange: apply,
                    onkeydown: move |e| {
                        if e.key() == Key::Enter {
                            e.prevent_default();
                        }
                    },
                }
                span { style: "width: 24px;", "End" }
                input {
                    style: "{field_style}",
                    value: "{end_text}",
                    oninput: move |e| end_text.set(e.value()),
                    onchange: apply,
                    onkeydown: move |e| {
                        if e.key() == Key::Enter {
                            e.prevent_default();
                        }
                    },
                }
                button {
                    class: "collapse-btn",
                    style: "margin-left: auto; padding: 4px 8px; border: 1px solid {BORDER_DEFAULT}; border-radius: 4px; background: transparent; color: {TEXT_MUTED}; font-size: 10px; cursor: pointer;",
                    onclick: move |_| on_delete.call(clip_id),
                    "Delete"
                }
            }
        }
    }
}
