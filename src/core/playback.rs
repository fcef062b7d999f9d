//! Playback scheduler: a cooperatively driven virtual playhead.
//!
//! The scheduler owns no timer of its own. An external driver (the app's
//! 16 ms tokio loop) calls [`PlaybackScheduler::tick`] with the elapsed
//! delta; the scheduler advances the playhead, resolves the active clip per
//! track against the committed collection, and returns the media commands
//! for any transitions. It never writes clip geometry.

use std::collections::HashMap;

use uuid::Uuid;

use crate::constants::TIMELINE_MAX_SECONDS;
use crate::state::{MediaSource, SceneTimeline, TrackKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Paused,
    Playing,
}

/// One media transition for one track.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackCommand {
    pub track: TrackKind,
    pub action: TrackAction,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TrackAction {
    /// Load the media into the track's sink and start it.
    Start(MediaSource),
    /// Stop and unload whatever the track's sink is playing.
    Stop,
}

/// Rendering-surface boundary: something that can execute track commands.
///
/// The production implementation drives DOM media elements through an eval
/// script; tests use a recording sink.
pub trait MediaSink {
    fn apply(&self, command: &TrackCommand);
    /// Pause active media without unloading it (playhead position kept).
    fn pause_all(&self);
    /// Resume media paused by [`MediaSink::pause_all`] at its kept position.
    fn resume_all(&self);
}

#[derive(Debug)]
pub struct PlaybackScheduler {
    state: PlaybackState,
    current_time: f64,
    /// Clip resolved on each track at the previous tick.
    active: HashMap<TrackKind, Uuid>,
}

impl Default for PlaybackScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackScheduler {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Paused,
            current_time: 0.0,
            active: HashMap::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Start advancing. Resolved clips stay loaded at the sinks, so nothing
    /// restarts from the top; the caller un-pauses the sinks
    /// (`MediaSink::resume_all`) when coming out of a pause.
    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    /// Stop advancing without resetting the playhead. The caller pauses the
    /// sinks (`MediaSink::pause_all`) so media keeps its position too.
    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    /// Jump the playhead. Active media is stopped so the next tick restarts
    /// the correct clips from the new position.
    pub fn seek(&mut self, time: f64) -> Vec<TrackCommand> {
        self.current_time = time.clamp(0.0, TIMELINE_MAX_SECONDS);
        self.drain_active()
    }

    /// The committed collection changed under us. Mutating while playing
    /// always pauses first, and resolved state is discarded so stale clips
    /// are never driven.
    pub fn clips_changed(&mut self) -> Vec<TrackCommand> {
        self.state = PlaybackState::Paused;
        self.drain_active()
    }

    fn drain_active(&mut self) -> Vec<TrackCommand> {
        let commands = self
            .active
            .keys()
            .map(|&track| TrackCommand {
                track,
                action: TrackAction::Stop,
            })
            .collect();
        self.active.clear();
        commands
    }

    /// Advance the playhead by `delta` seconds and emit transition commands.
    ///
    /// Wraps to 0 in the same tick when the end of the last clip is reached,
    /// so the playhead never rests out of range. Resolution runs against the
    /// collection as it is now; a collection swapped since the last tick is
    /// simply re-resolved.
    pub fn tick(&mut self, delta: f64, timeline: &SceneTimeline) -> Vec<TrackCommand> {
        if self.state != PlaybackState::Playing {
            return Vec::new();
        }

        let total = timeline.duration();
        if total <= 0.0 {
            self.current_time = 0.0;
            return self.drain_active();
        }

        let mut next = self.current_time + delta.max(0.0);
        if next >= total {
            next = 0.0;
        }
        self.current_time = next;

        let mut commands = Vec::new();
        for track in TrackKind::ALL {
            let resolved = timeline.active_clip_at(track, next);
            let previous = self.active.get(&track).copied();
            match resolved {
                Some(clip) if previous == Some(clip.id) => {}
                Some(clip) => {
                    if previous.is_some() {
                        commands.push(TrackCommand {
                            track,
                            action: TrackAction::Stop,
                        });
                    }
                    commands.push(TrackCommand {
                        track,
                        action: TrackAction::Start(clip.media.clone()),
                    });
                    self.active.insert(track, clip.id);
                }
                None => {
                    if previous.is_some() {
                        commands.push(TrackCommand {
                            track,
                            action: TrackAction::Stop,
                        });
                        self.active.remove(&track);
                    }
                }
            }
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Clip;
    use std::cell::RefCell;

    /// Records every command so transitions can be asserted.
    #[derive(Default)]
    struct RecordingSink {
        commands: RefCell<Vec<TrackCommand>>,
        paused: RefCell<u32>,
        resumed: RefCell<u32>,
    }

    impl MediaSink for RecordingSink {
        fn apply(&self, command: &TrackCommand) {
            self.commands.borrow_mut().push(command.clone());
        }

        fn pause_all(&self) {
            *self.paused.borrow_mut() += 1;
        }

        fn resume_all(&self) {
            *self.resumed.borrow_mut() += 1;
        }
    }

    fn scene() -> SceneTimeline {
        let mut timeline = SceneTimeline::default();
        timeline
            .commit(Clip::new(
                TrackKind::Video,
                0.0,
                3.0,
                MediaSource::VideoUrl("shot.mp4".into()),
            ))
            .unwrap();
        timeline
            .commit(Clip::new(
                TrackKind::Sound,
                1.0,
                4.0,
                MediaSource::AudioUrl("bgm.mp3".into()),
            ))
            .unwrap();
        timeline
    }

    #[test]
    fn test_paused_scheduler_emits_nothing() {
        let timeline = scene();
        let mut scheduler = PlaybackScheduler::new();
        assert!(scheduler.tick(0.016, &timeline).is_empty());
        assert_eq!(scheduler.current_time(), 0.0);
    }

    #[test]
    fn test_resolves_one_clip_per_track() {
        let timeline = scene();
        let mut scheduler = PlaybackScheduler::new();
        scheduler.seek(2.0);
        scheduler.play();

        // At t=2 both the video clip [0,3) and the sound clip [1,4) play.
        let commands = scheduler.tick(0.0, &timeline);
        let starts: Vec<_> = commands
            .iter()
            .filter(|c| matches!(c.action, TrackAction::Start(_)))
            .map(|c| c.track)
            .collect();
        assert_eq!(starts, vec![TrackKind::Video, TrackKind::Sound]);
    }

    #[test]
    fn test_no_restart_while_same_clip_plays() {
        let timeline = scene();
        let mut scheduler = PlaybackScheduler::new();
        scheduler.play();

        let first = scheduler.tick(0.016, &timeline);
        assert_eq!(first.len(), 1); // video starts; sound not yet at t~0.016
        let second = scheduler.tick(0.016, &timeline);
        assert!(second.is_empty());
    }

    #[test]
    fn test_track_stops_when_clip_ends() {
        let timeline = scene();
        let mut scheduler = PlaybackScheduler::new();
        scheduler.seek(2.9);
        scheduler.play();
        scheduler.tick(0.0, &timeline);

        // Crossing t=3 ends the video clip while sound keeps playing.
        let commands = scheduler.tick(0.2, &timeline);
        assert_eq!(
            commands,
            vec![TrackCommand {
                track: TrackKind::Video,
                action: TrackAction::Stop,
            }]
        );
    }

    #[test]
    fn test_wraparound_in_same_tick() {
        let timeline = scene(); // duration 4.0
        let mut scheduler = PlaybackScheduler::new();
        scheduler.seek(3.95);
        scheduler.play();
        scheduler.tick(0.0, &timeline);

        scheduler.tick(0.1, &timeline);
        assert_eq!(scheduler.current_time(), 0.0);
        assert!(scheduler.current_time() < timeline.duration());
    }

    #[test]
    fn test_clips_changed_pauses_and_stops() {
        let timeline = scene();
        let mut scheduler = PlaybackScheduler::new();
        scheduler.seek(2.0);
        scheduler.play();
        scheduler.tick(0.0, &timeline);

        let commands = scheduler.clips_changed();
        assert!(!scheduler.is_playing());
        assert_eq!(commands.len(), 2);
        assert!(commands
            .iter()
            .all(|c| matches!(c.action, TrackAction::Stop)));
    }

    #[test]
    fn test_pause_keeps_position() {
        let timeline = scene();
        let mut scheduler = PlaybackScheduler::new();
        scheduler.play();
        scheduler.tick(1.0, &timeline);
        scheduler.pause();
        assert_eq!(scheduler.current_time(), 1.0);
        assert!(scheduler.tick(1.0, &timeline).is_empty());
        assert_eq!(scheduler.current_time(), 1.0);
    }

    #[test]
    fn test_empty_timeline_parks_at_zero() {
        let timeline = SceneTimeline::default();
        let mut scheduler = PlaybackScheduler::new();
        scheduler.play();
        scheduler.tick(0.5, &timeline);
        assert_eq!(scheduler.current_time(), 0.0);
    }

    #[test]
    fn test_resume_after_pause_unfreezes_sinks() {
        let timeline = scene();
        let mut scheduler = PlaybackScheduler::new();
        let sink = RecordingSink::default();
        scheduler.seek(2.0);
        scheduler.play();
        for command in scheduler.tick(0.0, &timeline) {
            sink.apply(&command);
        }

        // Transport pause then resume: the sinks keep their media loaded and
        // positioned, and the resume call un-pauses them.
        scheduler.pause();
        sink.pause_all();
        scheduler.play();
        sink.resume_all();
        assert_eq!(*sink.resumed.borrow(), 1);

        // The same clips are still resolved, so the next tick has nothing to
        // restart, and no Stop ever unloaded the media in between.
        assert!(scheduler.tick(0.016, &timeline).is_empty());
        assert!(!sink
            .commands
            .borrow()
            .iter()
            .any(|c| matches!(c.action, TrackAction::Stop)));
    }

    #[test]
    fn test_recording_sink_applies_commands() {
        let timeline = scene();
        let mut scheduler = PlaybackScheduler::new();
        let sink = RecordingSink::default();
        scheduler.seek(2.0);
        scheduler.play();
        for command in scheduler.tick(0.0, &timeline) {
            sink.apply(&command);
        }
        assert_eq!(sink.commands.borrow().len(), 2);

        scheduler.pause();
        sink.pause_all();
        assert_eq!(*sink.paused.borrow(), 1);
    }
}
