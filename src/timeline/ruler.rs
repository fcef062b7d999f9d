use dioxus::prelude::*;

use crate::constants::{BORDER_STRONG, BORDER_SUBTLE, TEXT_DIM, TIMELINE_MAX_SECONDS};
use crate::core::geometry::time_to_px;

/// Time ruler with tick marks and labels.
/// All elements here use pointer-events: none so clicks pass through to the
/// parent, which owns seeking.
#[component]
pub(crate) fn TimeRuler(zoom: f64) -> Element {
    // Pick a "nice" major tick interval so labels stay ~90px apart at any
    // zoom level.
    let px_per_second = time_to_px(1.0, zoom);
    let target_px_per_tick = 90.0;
    let target_seconds = (target_px_per_tick / px_per_second.max(0.1)).max(0.5);
    let nice_ticks = [0.5, 1.0, 2.0, 5.0, 10.0, 15.0, 30.0, 60.0];
    let mut seconds_per_major_tick = *nice_ticks.last().unwrap_or(&10.0);
    for tick in nice_ticks {
        if tick >= target_seconds {
            seconds_per_major_tick = tick;
            break;
        }
    }

    // Second ticks are the snap grid; show them as minor marks whenever the
    // major interval is coarser than one second and there is room.
    let show_second_ticks = seconds_per_major_tick > 1.0 && px_per_second >= 6.0;

    let num_ticks = (TIMELINE_MAX_SECONDS / seconds_per_major_tick).ceil() as i32 + 1;
    let content_width = time_to_px(TIMELINE_MAX_SECONDS, zoom);

    rsx! {
        div {
            style: "position: absolute; left: 0; top: 0; width: 100%; height: 100%; pointer-events: none;",

            if show_second_ticks {
                for second in 0..=(TIMELINE_MAX_SECONDS as i32) {
                    {
                        let t = second as f64;
                        let x = time_to_px(t, zoom);
                        let on_major = (t / seconds_per_major_tick).fract() == 0.0;
                        if !on_major && x <= content_width + 10.0 {
                            rsx! {
                                div {
                                    key: "second-{second}",
                                    style: "
                                        position: absolute;
                                        left: {x}px;
                                        bottom: 0;
                                        width: 1px;
                                        height: 4px;
                                        background-color: {BORDER_SUBTLE};
                                        pointer-events: none;
                                    ",
                                }
                            }
                        } else {
                            rsx! {}
                        }
                    }
                }
            }

            for i in 0..num_ticks {
                {
                    let t = (i as f64 * seconds_per_major_tick).min(TIMELINE_MAX_SECONDS);
                    let x = time_to_px(t, zoom);
                    let minutes = t as i32 / 60;
                    let seconds = t as i32 % 60;
                    let label = format!("{}:{:02}", minutes, seconds);

                    if x <= content_width + 1.0 {
                        rsx! {
                            div {
                                key: "tick-group-{i}",
                                div {
                                    style: "
                                        position: absolute;
                                        left: {x}px;
                                        bottom: 0;
                                        width: 1px;
                                        height: 10px;
                                        background-color: {BORDER_STRONG};
                                        pointer-events: none;
                                    ",
                                }
                                {
                                    // Right-align the last label so it does not
                                    // overflow the scrollable content.
                                    let next_tick_x =
                                        time_to_px((i as f64 + 1.0) * seconds_per_major_tick, zoom);
                                    let should_right_align =
                                        i == num_ticks - 1 || next_tick_x > content_width;
                                    let label_style = if should_right_align {
                                        format!(
                                            "position: absolute; left: {}px; top: 3px; font-size: 9px; color: {}; font-family: 'SF Mono', Consolas, monospace; user-select: none; pointer-events: none; transform: translateX(-100%);",
                                            x - 4.0, TEXT_DIM
                                        )
                                    } else {
                                        format!(
                                            "position: absolute; left: {}px; top: 3px; font-size: 9px; color: {}; font-family: 'SF Mono', Consolas, monospace; user-select: none; pointer-events: none;",
                                            x + 4.0, TEXT_DIM
                                        )
                                    };
                                    rsx! {
                                        div {
                                            style: "{label_style}",
                                            "{label}"
                                        }
                                    }
                                }
                            }
                        }
                    } else {
                        rsx! {}
                    }
                }
            }
        }
    }
}
