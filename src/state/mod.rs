//! State management module
//!
//! Core data structures for the editor:
//! - Clip: a placed piece of media with a track kind and a time interval
//! - SceneTimeline: the committed clip collection and its invariant layer
//! - SelectionState: which clip is currently selected

mod clip;
mod selection;
mod timeline;

pub use clip::*;
pub use selection::*;
pub use timeline::*;
