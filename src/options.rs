//! Construction-time configuration.
//!
//! ```
//! use memory_history::{confirm_fn, HistoryOptions, LocationDescriptor, MemoryHistory};
//!
//! let history: MemoryHistory = HistoryOptions::new()
//!     .initial_entries(["/inbox", "/inbox/42"])
//!     .initial_index(1)
//!     .basename("/mail")
//!     .key_length(8)
//!     .user_confirmation(confirm_fn(|_message, proceed| proceed.approve()))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(history.location().pathname(), "/inbox/42");
//! assert_eq!(history.location().key().map(str::len), Some(8));
//! ```

use crate::confirm::UserConfirmation;
use crate::error::Result;
use crate::key::DEFAULT_KEY_LENGTH;
use crate::location::LocationDescriptor;
use crate::MemoryHistory;
use std::fmt;
use std::sync::Arc;

/// Options for [`MemoryHistory::new`].
///
/// | option | default |
/// |--------|---------|
/// | `initial_entries` | `["/"]` |
/// | `initial_index` | `0`, clamped to the last entry |
/// | `key_length` | `6` |
/// | `basename` | none |
/// | `user_confirmation` | `TerminalConfirmation` when attached to a terminal (`terminal` feature), otherwise none |
/// | `touch_on_cancelled_pop` | `true` |
pub struct HistoryOptions<S = ()> {
    pub(crate) initial_entries: Vec<LocationDescriptor<S>>,
    pub(crate) initial_index: usize,
    pub(crate) key_length: usize,
    pub(crate) basename: Option<String>,
    pub(crate) user_confirmation: Option<Arc<dyn UserConfirmation>>,
    pub(crate) touch_on_cancelled_pop: bool,
}

impl<S> HistoryOptions<S> {
    /// Options with every default.
    pub fn new() -> Self {
        Self {
            initial_entries: vec![LocationDescriptor::from("/")],
            initial_index: 0,
            key_length: DEFAULT_KEY_LENGTH,
            basename: None,
            user_confirmation: None,
            touch_on_cancelled_pop: true,
        }
    }

    /// Entries the history starts with, oldest first.
    ///
    /// Accepts path strings and [`LocationDescriptor`]s. A descriptor's
    /// explicit key is kept as-is.
    pub fn initial_entries<I, E>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<LocationDescriptor<S>>,
    {
        self.initial_entries = entries.into_iter().map(Into::into).collect();
        self
    }

    /// Index of the entry that starts out current.
    pub fn initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    /// Number of characters in generated keys.
    pub fn key_length(mut self, length: usize) -> Self {
        self.key_length = length;
        self
    }

    /// Path prefix stripped from incoming paths and added by `create_href`.
    pub fn basename(mut self, basename: impl Into<String>) -> Self {
        self.basename = Some(basename.into());
        self
    }

    /// Strategy asking the user to confirm blocked transitions.
    pub fn user_confirmation<C: UserConfirmation>(mut self, confirmation: C) -> Self {
        self.user_confirmation = Some(Arc::new(confirmation));
        self
    }

    /// Shared variant of [`user_confirmation`](Self::user_confirmation).
    pub fn shared_user_confirmation(mut self, confirmation: Arc<dyn UserConfirmation>) -> Self {
        self.user_confirmation = Some(confirmation);
        self
    }

    /// Whether a rejected `go` still notifies listeners with the unchanged
    /// location.
    ///
    /// Browser histories have already moved when a POP is vetoed and need a
    /// re-render to move back; an in-memory history has not moved, so hosts
    /// that do not mirror a browser can turn this off.
    pub fn touch_on_cancelled_pop(mut self, touch: bool) -> Self {
        self.touch_on_cancelled_pop = touch;
        self
    }
}

impl<S: Clone> HistoryOptions<S> {
    /// Build the history. Shorthand for [`MemoryHistory::new`].
    pub fn build(self) -> Result<MemoryHistory<S>> {
        MemoryHistory::new(self)
    }
}

impl<S> Default for HistoryOptions<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: fmt::Debug> fmt::Debug for HistoryOptions<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryOptions")
            .field("initial_entries", &self.initial_entries)
            .field("initial_index", &self.initial_index)
            .field("key_length", &self.key_length)
            .field("basename", &self.basename)
            .field(
                "user_confirmation",
                &self.user_confirmation.as_ref().map(|c| c.name()),
            )
            .field("touch_on_cancelled_pop", &self.touch_on_cancelled_pop)
            .finish()
    }
}
