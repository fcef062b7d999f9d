//! Hotkey system
//!
//! Centralized hotkey management for the timeline editor.
//!
//! # Architecture
//!
//! - **HotkeyAction**: Enum of all possible actions that can be triggered by hotkeys
//! - **HotkeyContext**: Determines which hotkeys are active based on app state
//! - **handle_hotkey()**: Main dispatch function that maps key events to actions

use dioxus::prelude::Key;

/// All possible actions that can be triggered by hotkeys.
///
/// Each variant represents a semantic action, not a key binding.
/// This decouples "what key was pressed" from "what should happen".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Zoom in on the timeline (increase pixels per second)
    TimelineZoomIn,
    /// Zoom out on the timeline (decrease pixels per second)
    TimelineZoomOut,
    /// Toggle playback.
    PlayPause,
    /// Seek one second back.
    SeekBack,
    /// Seek one second forward.
    SeekForward,
    /// Seek to the start of the timeline.
    SeekStart,
    /// Delete the selected clip.
    DeleteSelection,
}

/// Context information that affects which hotkeys are active.
#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Whether any clip is selected
    pub has_selection: bool,
    /// Whether an input field has focus (should suppress most hotkeys)
    pub input_focused: bool,
    /// Whether a drag/trim gesture is in progress (suppress everything)
    pub gesture_active: bool,
}

/// Result of processing a key event.
#[derive(Debug, Clone)]
pub enum HotkeyResult {
    /// A hotkey action was matched and should be executed
    Action(HotkeyAction),
    /// No matching hotkey for this key/context combination
    NoMatch,
    /// Hotkey would match but is suppressed (e.g., input field focused)
    Suppressed,
}

/// Maps a key event to an action, considering the current context.
pub fn handle_hotkey(key: &Key, context: &HotkeyContext) -> HotkeyResult {
    // Suppress hotkeys while typing or while a gesture owns the pointer.
    if context.input_focused || context.gesture_active {
        return HotkeyResult::Suppressed;
    }

    match key {
        Key::Character(c) if c == "+" => return HotkeyResult::Action(HotkeyAction::TimelineZoomIn),
        Key::Character(c) if c == "-" => {
            return HotkeyResult::Action(HotkeyAction::TimelineZoomOut)
        }
        Key::Character(c) if c == " " => return HotkeyResult::Action(HotkeyAction::PlayPause),
        Key::ArrowLeft => return HotkeyResult::Action(HotkeyAction::SeekBack),
        Key::ArrowRight => return HotkeyResult::Action(HotkeyAction::SeekForward),
        Key::Home => return HotkeyResult::Action(HotkeyAction::SeekStart),
        _ => {}
    }

    if context.has_selection {
        match key {
            Key::Delete | Key::Backspace => {
                return HotkeyResult::Action(HotkeyAction::DeleteSelection)
            }
            _ => {}
        }
    }

    HotkeyResult::NoMatch
}
