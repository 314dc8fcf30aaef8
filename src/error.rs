//! Errors and transition outcomes.
//!
//! - [`TransitionResult`]: what a navigation call did (`Committed`,
//!   `Blocked` or `Failed`). A blocked transition is an expected outcome;
//!   a failed one carries the [`HistoryError`] that prevented a decision.
//! - [`HistoryError`]: configuration problems. These are fatal: the
//!   history refuses to be built, or refuses to install a prompt.
//!
//! Out-of-range `go(n)` is neither: it is clamped.
//!
//! # Examples
//!
//! ```
//! use memory_history::{Action, TransitionResult};
//!
//! let result = TransitionResult::Committed { action: Action::Push, index: 1 };
//! assert!(result.is_committed());
//!
//! let blocked = TransitionResult::Blocked { message: Some("Unsaved changes".into()) };
//! assert_eq!(blocked.message(), Some("Unsaved changes"));
//! ```

use crate::Action;
use thiserror::Error;

/// Result alias for fallible history operations.
pub type Result<T, E = HistoryError> = std::result::Result<T, E>;

// ============================================================================
// TransitionResult
// ============================================================================

/// Outcome of a navigation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionResult {
    /// The transition was approved and applied.
    Committed {
        /// Action recorded for the new current location.
        action: Action,
        /// Index of the new current location.
        index: usize,
    },
    /// The transition was rejected; the entries and index are unchanged.
    Blocked {
        /// Prompt message shown to the user, if the rejection came from one.
        message: Option<String>,
    },
    /// The transition could not be decided because the history is
    /// misconfigured; the entries and index are unchanged.
    Failed(HistoryError),
}

impl TransitionResult {
    /// Check if the transition was applied
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Check if the transition was rejected
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }

    /// Check if the transition failed on a configuration error
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Prompt message of a blocked transition
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Blocked { message } => message.as_deref(),
            Self::Committed { .. } | Self::Failed(_) => None,
        }
    }

    /// Configuration error of a failed transition
    pub fn error(&self) -> Option<&HistoryError> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Committed { .. } | Self::Blocked { .. } => None,
        }
    }
}

// ============================================================================
// HistoryError
// ============================================================================

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The initial entry list was empty.
    #[error("A history needs at least one initial entry")]
    EmptyEntries,

    /// Generated keys were configured to be empty.
    #[error("Key length must be at least 1")]
    InvalidKeyLength,

    /// A prompt needs the user's answer but there is no way to ask.
    #[error(
        "No user confirmation is available in this environment. \
         Provide your own confirmation via HistoryOptions::user_confirmation"
    )]
    ConfirmationUnavailable,
}
