//! The in-memory history stack.

use crate::confirm::UserConfirmation;
use crate::error::{HistoryError, Result, TransitionResult};
use crate::gate::{Approval, ListenerHandle, PendingTransition, Prompt, TransitionGate, Unblock};
use crate::key::KeyGenerator;
use crate::location::{create_location, Location, LocationDescriptor};
use crate::options::HistoryOptions;
use crate::path::{has_basename, normalize_basename, strip_basename};
use crate::{debug_log, error_log, trace_log, warn_log, Action};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Entries, position and last action.
#[derive(Debug)]
struct HistoryState<S> {
    /// Navigation history stack, never empty
    entries: Vec<Location<S>>,
    /// Current position in `entries`
    index: usize,
    /// Action that produced `entries[index]`
    action: Action,
}

impl<S> HistoryState<S> {
    fn current(&self) -> &Location<S> {
        &self.entries[self.index]
    }
}

/// A point-in-time copy of a history's entries, index and action.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySnapshot<S = ()> {
    /// All entries, oldest first.
    pub entries: Vec<Location<S>>,
    /// Index of the current entry.
    pub index: usize,
    /// Action that produced the current entry.
    pub action: Action,
}

impl<S> HistorySnapshot<S> {
    /// The current entry.
    pub fn location(&self) -> &Location<S> {
        &self.entries[self.index]
    }
}

/// Clamp `index + n` into `0..len`.
fn clamp_index(index: usize, n: isize, len: usize) -> usize {
    let last = len - 1;
    match index.checked_add_signed(n) {
        Some(target) => target.min(last),
        None if n < 0 => 0,
        None => last,
    }
}

/// Navigation history kept entirely in memory.
///
/// Navigation methods are `async`: each asks the [`TransitionGate`] for
/// approval, waits for the answer, and only then changes the history and
/// notifies listeners. Without a blocking prompt the answer is immediate, so
/// the futures complete on their first poll.
///
/// # Example
///
/// ```
/// use memory_history::{Action, HistoryOptions, MemoryHistory};
///
/// let history: MemoryHistory = HistoryOptions::new()
///     .initial_entries(["/a", "/b", "/c"])
///     .initial_index(1)
///     .build()
///     .unwrap();
///
/// pollster::block_on(history.push("/d", None));
/// let paths: Vec<_> = history.entries().iter().map(|l| l.path()).collect();
/// assert_eq!(paths, ["/a", "/b", "/d"]);
/// assert_eq!(history.action(), Action::Push);
///
/// pollster::block_on(history.go(-100));
/// assert_eq!(history.index(), 0);
/// ```
pub struct MemoryHistory<S = ()> {
    state: Mutex<HistoryState<S>>,
    gate: TransitionGate<S>,
    keys: KeyGenerator,
    basename: String,
    confirmation: Option<Arc<dyn UserConfirmation>>,
    touch_on_cancelled_pop: bool,
}

impl<S: Clone> MemoryHistory<S> {
    /// Build a history from `options`.
    ///
    /// Fails when there are no initial entries or the key length is zero.
    pub fn new(options: HistoryOptions<S>) -> Result<Self> {
        let HistoryOptions {
            initial_entries,
            initial_index,
            key_length,
            basename,
            user_confirmation,
            touch_on_cancelled_pop,
        } = options;

        if key_length == 0 {
            return Err(HistoryError::InvalidKeyLength);
        }
        if initial_entries.is_empty() {
            return Err(HistoryError::EmptyEntries);
        }

        let keys = KeyGenerator::new(key_length);
        let basename = basename.as_deref().map(normalize_basename).unwrap_or_default();

        let entries: Vec<Location<S>> = initial_entries
            .into_iter()
            .map(|mut descriptor| {
                let key = descriptor
                    .key
                    .take()
                    .filter(|key| !key.is_empty())
                    .unwrap_or_else(|| keys.generate());
                let descriptor = without_basename(descriptor, &basename);
                create_location(descriptor, None, Some(key), None)
            })
            .collect();

        let index = initial_index.min(entries.len() - 1);
        if index != initial_index {
            debug_log!(
                "Initial index {} clamped to {} for {} entries",
                initial_index,
                index,
                entries.len()
            );
        }

        let confirmation = user_confirmation.or_else(environment_confirmation);

        debug_log!(
            "Memory history created with {} entries at index {}",
            entries.len(),
            index
        );

        Ok(Self {
            state: Mutex::new(HistoryState {
                entries,
                index,
                action: Action::Pop,
            }),
            gate: TransitionGate::new(),
            keys,
            basename,
            confirmation,
            touch_on_cancelled_pop,
        })
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState<S>> {
        // The state is only touched in short, non-panicking sections.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The current location.
    pub fn location(&self) -> Location<S> {
        self.lock().current().clone()
    }

    /// The action that produced the current location.
    pub fn action(&self) -> Action {
        self.lock().action
    }

    /// Index of the current location.
    pub fn index(&self) -> usize {
        self.lock().index
    }

    /// Number of entries. Never zero.
    pub fn length(&self) -> usize {
        self.lock().entries.len()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> Vec<Location<S>> {
        self.lock().entries.clone()
    }

    /// The entry at `index`, if there is one.
    pub fn entry(&self, index: usize) -> Option<Location<S>> {
        self.lock().entries.get(index).cloned()
    }

    /// Entries, index and action read together.
    pub fn snapshot(&self) -> HistorySnapshot<S> {
        let state = self.lock();
        HistorySnapshot {
            entries: state.entries.clone(),
            index: state.index,
            action: state.action,
        }
    }

    /// The normalized basename, empty when none is configured.
    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Whether `go(n)` would land exactly `n` entries away.
    pub fn can_go(&self, n: isize) -> bool {
        let state = self.lock();
        state
            .index
            .checked_add_signed(n)
            .is_some_and(|target| target < state.entries.len())
    }

    /// Check if `go_back` would move.
    pub fn can_go_back(&self) -> bool {
        self.can_go(-1)
    }

    /// Check if `go_forward` would move.
    pub fn can_go_forward(&self) -> bool {
        self.can_go(1)
    }

    /// The href for `location`: basename followed by its path.
    pub fn create_href(&self, location: &Location<S>) -> String {
        format!("{}{}", self.basename, location.path())
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Add a new entry after the current one, discarding forward entries.
    ///
    /// `to` is a path or a [`LocationDescriptor`]. If the descriptor already
    /// has state, `state` is ignored and a warning is logged.
    pub async fn push(&self, to: impl Into<LocationDescriptor<S>>, state: Option<S>) -> TransitionResult {
        let location = self.next_location(to.into(), state, Action::Push);

        match self.request(&location, Action::Push).await {
            Approval::Approved => {}
            Approval::Rejected { message } => return blocked(Action::Push, &location, message),
            Approval::Unavailable => return unavailable(),
        }

        let index = {
            let mut state = self.lock();
            let index = state.index + 1;
            state.entries.truncate(index);
            state.entries.push(location.clone());
            state.index = index;
            state.action = Action::Push;
            index
        };
        self.committed(&location, Action::Push, index)
    }

    /// Overwrite the current entry.
    ///
    /// Same arguments as [`push`](Self::push). The number of entries and the
    /// index stay the same.
    pub async fn replace(&self, to: impl Into<LocationDescriptor<S>>, state: Option<S>) -> TransitionResult {
        let location = self.next_location(to.into(), state, Action::Replace);

        match self.request(&location, Action::Replace).await {
            Approval::Approved => {}
            Approval::Rejected { message } => return blocked(Action::Replace, &location, message),
            Approval::Unavailable => return unavailable(),
        }

        let index = {
            let mut state = self.lock();
            let index = state.index;
            state.entries[index] = location.clone();
            state.action = Action::Replace;
            index
        };
        self.committed(&location, Action::Replace, index)
    }

    /// Move `n` entries back (negative) or forward (positive).
    ///
    /// Out-of-range `n` is clamped to the first or last entry, never an
    /// error. When rejected, listeners are still notified once with the
    /// unchanged location, unless turned off with
    /// [`HistoryOptions::touch_on_cancelled_pop`].
    pub async fn go(&self, n: isize) -> TransitionResult {
        let (target_index, target) = {
            let state = self.lock();
            let target_index = clamp_index(state.index, n, state.entries.len());
            (target_index, state.entries[target_index].clone())
        };

        match self.request(&target, Action::Pop).await {
            Approval::Approved => {}
            Approval::Rejected { message } => {
                if self.touch_on_cancelled_pop {
                    let (current, action) = {
                        let state = self.lock();
                        (state.current().clone(), state.action)
                    };
                    trace_log!("Re-notifying unchanged '{}' after cancelled POP", current.path());
                    self.gate.notify(&current, action);
                }
                return blocked(Action::Pop, &target, message);
            }
            Approval::Unavailable => return unavailable(),
        }

        let committed = {
            let mut state = self.lock();
            // Another navigation may have truncated or replaced the target
            // while this one waited for approval.
            let still_there = state
                .entries
                .get(target_index)
                .is_some_and(|entry| entry.key() == target.key());
            if still_there {
                state.index = target_index;
                state.action = Action::Pop;
            }
            still_there
        };

        if committed {
            self.committed(&target, Action::Pop, target_index)
        } else {
            warn_log!(
                "POP target '{}' left the history before it was approved",
                target.path()
            );
            TransitionResult::Blocked { message: None }
        }
    }

    /// Shorthand for `go(-1)`.
    pub async fn go_back(&self) -> TransitionResult {
        self.go(-1).await
    }

    /// Shorthand for `go(1)`.
    pub async fn go_forward(&self) -> TransitionResult {
        self.go(1).await
    }

    // ------------------------------------------------------------------------
    // Blocking and listening
    // ------------------------------------------------------------------------

    /// Install a blocking prompt consulted before every transition.
    ///
    /// A message prompt needs a confirmation strategy; without one this
    /// fails with [`HistoryError::ConfirmationUnavailable`]. A dynamic prompt
    /// is accepted either way; a transition it asks to confirm while no
    /// strategy exists resolves to [`TransitionResult::Failed`] with that
    /// same error, and nothing changes.
    pub fn block(&self, prompt: impl Into<Prompt<S>>) -> Result<Unblock<S>> {
        let prompt = prompt.into();
        if self.confirmation.is_none() {
            if let Prompt::Message(message) = &prompt {
                error_log!("Cannot block with '{}': no user confirmation available", message);
                return Err(HistoryError::ConfirmationUnavailable);
            }
        }
        Ok(self.gate.set_prompt(prompt))
    }

    /// Remove any installed prompt.
    pub fn unblock(&self) {
        self.gate.clear_prompt();
    }

    /// Whether a prompt is installed.
    pub fn is_blocking(&self) -> bool {
        self.gate.is_blocking()
    }

    /// Call `listener` after every committed transition (and after a
    /// cancelled POP, see [`go`](Self::go)).
    pub fn listen<F>(&self, listener: F) -> ListenerHandle<S>
    where
        F: Fn(&Location<S>, Action) + Send + Sync + 'static,
    {
        self.gate.add_listener(listener)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn next_location(&self, descriptor: LocationDescriptor<S>, state: Option<S>, action: Action) -> Location<S> {
        if descriptor.has_state() && state.is_some() {
            warn_log!(
                "Avoid passing a state argument to {} when the target already carries state; it is ignored",
                action
            );
        }
        let descriptor = without_basename(descriptor, &self.basename);
        let previous = self.location();
        create_location(descriptor, state, Some(self.keys.generate()), Some(&previous))
    }

    fn request(&self, location: &Location<S>, action: Action) -> PendingTransition {
        trace_log!("Requesting {} to '{}'", action, location.path());
        self.gate
            .request_transition(location, action, self.confirmation.as_deref())
    }

    fn committed(&self, location: &Location<S>, action: Action, index: usize) -> TransitionResult {
        debug_log!("{} to '{}' committed at index {}", action, location.path(), index);
        self.gate.notify(location, action);
        TransitionResult::Committed { action, index }
    }
}

/// The confirmation strategy the environment provides, if any.
#[cfg(feature = "terminal")]
fn environment_confirmation() -> Option<Arc<dyn UserConfirmation>> {
    crate::TerminalConfirmation::detect().map(|terminal| Arc::new(terminal) as Arc<dyn UserConfirmation>)
}

#[cfg(not(feature = "terminal"))]
fn environment_confirmation() -> Option<Arc<dyn UserConfirmation>> {
    None
}

fn unavailable() -> TransitionResult {
    TransitionResult::Failed(HistoryError::ConfirmationUnavailable)
}

fn blocked<S>(action: Action, location: &Location<S>, message: Option<String>) -> TransitionResult {
    debug_log!("{} to '{}' blocked", action, location.path());
    TransitionResult::Blocked { message }
}

/// Strip `basename` from the descriptor's pathname when it carries it.
fn without_basename<S>(mut descriptor: LocationDescriptor<S>, basename: &str) -> LocationDescriptor<S> {
    if has_basename(&descriptor.pathname, basename) {
        let stripped = strip_basename(&descriptor.pathname, basename);
        descriptor.pathname = if stripped.is_empty() {
            "/".to_string()
        } else {
            stripped.to_string()
        };
    }
    descriptor
}

impl<S: fmt::Debug> fmt::Debug for MemoryHistory<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("MemoryHistory")
            .field("entries", &state.entries)
            .field("index", &state.index)
            .field("action", &state.action)
            .field("basename", &self.basename)
            .field("gate", &self.gate)
            .finish()
    }
}
