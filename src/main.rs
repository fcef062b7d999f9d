//! KuraFlix Studio
//!
//! Desktop timeline editor for assembling AI-generated anime scenes:
//! four fixed media tracks, collision-free clip editing, and live playback.

mod app;
mod constants;
mod core;
mod error;
mod hotkeys;
mod state;
mod timeline;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

fn main() {
    env_logger::init();

    // Configure the window
    let config = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("KuraFlix Studio")
                .with_inner_size(LogicalSize::new(1280.0, 800.0))
                .with_resizable(true),
        )
        .with_menu(None); // Disable default menu bar

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
