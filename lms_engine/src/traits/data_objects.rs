use serde::{Deserialize, Serialize};

/// Result of a presence-toggle operation (wishlist membership, lesson completion): present →
/// removed, absent → added. Two toggles always return to the original state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    pub fn was_added(&self) -> bool {
        matches!(self, ToggleOutcome::Added)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub total_courses: i64,
    pub completed_lessons: i64,
}
