//! Headless timeline engines: everything here runs without a renderer so the
//! gesture and playback logic can be unit tested with synthetic input.

pub mod drag;
pub mod geometry;
pub mod playback;
pub mod trim;
