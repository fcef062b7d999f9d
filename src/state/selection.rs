//! Selection state shared across views.

use uuid::Uuid;

/// Tracks the currently selected clip in the timeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Selected clip IDs (first entry is the primary selection).
    pub clip_ids: Vec<Uuid>,
}

impl SelectionState {
    /// Clear the selection.
    pub fn clear(&mut self) {
        self.clip_ids.clear();
    }

    /// Replace the selection with a single clip.
    pub fn select_clip(&mut self, clip_id: Uuid) {
        self.clip_ids.clear();
        self.clip_ids.push(clip_id);
    }

    /// Remove a clip from selection, if present.
    pub fn remove_clip(&mut self, clip_id: Uuid) {
        self.clip_ids.retain(|id| *id != clip_id);
    }

    /// Return the primary selected clip, if any.
    pub fn primary_clip(&self) -> Option<Uuid> {
        self.clip_ids.first().copied()
    }
}
