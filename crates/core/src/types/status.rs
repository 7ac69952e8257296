//! Status enums for the order workflow.

use serde::{Deserialize, Serialize};

/// Where an order form currently is in its submission lifecycle.
///
/// `Idle` and `Failed` are interactive: the user can edit and (re)submit.
/// `Submitting` means an order has been handed to the dispatcher and no
/// further submission is accepted until it settles. A successful dispatch
/// resets the form and goes straight back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Failed,
}

impl SubmissionStatus {
    /// Returns `true` if a new submission may start from this state.
    #[must_use]
    pub const fn accepts_submission(self) -> bool {
        !matches!(self, Self::Submitting)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitting => write!(f, "submitting"),
            Self::Failed => write!(f, "failed"),
        }
    }
}
