use dioxus::prelude::*;

use crate::constants::{BORDER_SUBTLE, TEXT_SECONDARY};
use crate::state::TrackKind;

use super::TRACK_ROW_HEIGHT_PX;

/// Fixed-column label for one of the four tracks, with a button that drops
/// the next generated asset onto that track.
#[component]
pub fn TrackLabel(
    track: TrackKind,
    color: &'static str,
    on_add_media: EventHandler<TrackKind>,
) -> Element {
    let name = track.label();
    rsx! {
        div {
            style: "
                display: flex; align-items: center; gap: 10px; height: {TRACK_ROW_HEIGHT_PX}px;
                padding: 0 12px; border-bottom: 1px solid {BORDER_SUBTLE};
                font-size: 12px; color: {TEXT_SECONDARY};
            ",
            div { style: "width: 3px; height: 16px; border-radius: 2px; background-color: {color};" }
            span { style: "flex: 1;", "{name}" }
            button {
                class: "collapse-btn",
                style: "
                    width: 18px; height: 18px; border: 1px dashed {BORDER_SUBTLE};
                    border-radius: 3px; background: transparent; color: {color};
                    font-size: 11px; cursor: pointer; display: flex;
                    align-items: center; justify-content: center;
                ",
                title: "Add clip",
                onclick: move |e| {
                    e.stop_propagation();
                    on_add_media.call(track);
                },
                "+"
            }
        }
    }
}
