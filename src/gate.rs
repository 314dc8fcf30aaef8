//! The transition gate: blocking prompt, approval and listeners.
//!
//! Every navigation passes through [`TransitionGate::request_transition`]
//! before the history changes. The gate consults the installed [`Prompt`]:
//!
//! 1. No prompt: approved immediately.
//! 2. The prompt yields [`PromptOutcome::Allow`]: approved immediately.
//! 3. The prompt yields [`PromptOutcome::Deny`]: rejected immediately.
//! 4. The prompt yields [`PromptOutcome::Confirm`]: the message goes to the
//!    [`UserConfirmation`] strategy and the result waits for its answer.
//!    Without a strategy the result is [`Approval::Unavailable`].
//!
//! The result is a [`PendingTransition`] future. It is already complete in
//! cases 1-3 and when a strategy answers synchronously.
//!
//! After a transition is committed the history calls
//! [`notify`](TransitionGate::notify), which fans out to listeners in
//! registration order.

use crate::confirm::{Proceed, UserConfirmation};
use crate::location::Location;
use crate::{debug_log, error_log, trace_log, warn_log, Action};
use futures::channel::oneshot;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::task::{Context, Poll};

// ============================================================================
// Prompt
// ============================================================================

/// What a prompt decides for one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Let the transition through without asking.
    Allow,
    /// Cancel the transition without asking.
    Deny,
    /// Ask the user, showing this message.
    Confirm(String),
}

impl PromptOutcome {
    /// Shorthand for [`PromptOutcome::Confirm`].
    pub fn confirm(message: impl Into<String>) -> Self {
        Self::Confirm(message.into())
    }
}

/// Function computing a [`PromptOutcome`] from the target location and action.
pub type PromptFn<S> = Arc<dyn Fn(&Location<S>, Action) -> PromptOutcome + Send + Sync>;

/// A blocking rule consulted before every transition.
///
/// ```
/// use memory_history::{Action, Prompt, PromptOutcome};
///
/// let always_ask: Prompt = "Discard unsaved changes?".into();
///
/// let only_on_leave: Prompt = Prompt::dynamic(|location, action| {
///     if action == Action::Replace || location.pathname().starts_with("/editor") {
///         PromptOutcome::Allow
///     } else {
///         PromptOutcome::confirm(format!("Leave the editor for {}?", location.pathname()))
///     }
/// });
/// # let _ = (always_ask, only_on_leave);
/// ```
pub enum Prompt<S = ()> {
    /// Always ask with this message.
    Message(String),
    /// Decide per transition.
    Dynamic(PromptFn<S>),
}

impl<S> Prompt<S> {
    /// A prompt that always asks with `message`.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// A prompt computed by `f` for each transition.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Location<S>, Action) -> PromptOutcome + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    /// Decide for a transition to `location`.
    pub fn evaluate(&self, location: &Location<S>, action: Action) -> PromptOutcome {
        match self {
            Self::Message(message) => PromptOutcome::Confirm(message.clone()),
            Self::Dynamic(f) => f(location, action),
        }
    }
}

impl<S> Clone for Prompt<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Message(message) => Self::Message(message.clone()),
            Self::Dynamic(f) => Self::Dynamic(Arc::clone(f)),
        }
    }
}

impl<S> fmt::Debug for Prompt<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Message(message) => f.debug_tuple("Message").field(message).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(<fn>)"),
        }
    }
}

impl<S> From<&str> for Prompt<S> {
    fn from(message: &str) -> Self {
        Self::message(message)
    }
}

impl<S> From<String> for Prompt<S> {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

// ============================================================================
// PendingTransition
// ============================================================================

/// Final answer for a transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Approval {
    /// The transition may be committed.
    Approved,
    /// The transition was cancelled.
    Rejected {
        /// The prompt message shown to the user, if one was.
        message: Option<String>,
    },
    /// The prompt asked for confirmation but there is no strategy to ask.
    Unavailable,
}

impl Approval {
    /// Whether the transition may be committed.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }
}

enum Pending {
    Decided(Approval),
    Waiting {
        receiver: oneshot::Receiver<bool>,
        message: String,
    },
}

/// Future resolving to the [`Approval`] for one transition request.
///
/// Dropping it abandons the request; the [`Proceed`] handle held by the
/// confirmation strategy then reports itself as no longer pending.
#[must_use = "a transition is only decided once its PendingTransition is awaited"]
pub struct PendingTransition {
    pending: Pending,
}

impl PendingTransition {
    fn decided(approval: Approval) -> Self {
        Self {
            pending: Pending::Decided(approval),
        }
    }

    /// Whether the answer is already known without waiting.
    pub fn is_decided(&self) -> bool {
        matches!(self.pending, Pending::Decided(_))
    }
}

impl Future for PendingTransition {
    type Output = Approval;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Approval> {
        match &mut self.pending {
            Pending::Decided(approval) => Poll::Ready(approval.clone()),
            Pending::Waiting { receiver, message } => match Pin::new(receiver).poll(cx) {
                Poll::Pending => Poll::Pending,
                Poll::Ready(Ok(true)) => Poll::Ready(Approval::Approved),
                Poll::Ready(Ok(false) | Err(oneshot::Canceled)) => Poll::Ready(Approval::Rejected {
                    message: Some(message.clone()),
                }),
            },
        }
    }
}

impl fmt::Debug for PendingTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pending {
            Pending::Decided(approval) => f.debug_tuple("PendingTransition").field(approval).finish(),
            Pending::Waiting { message, .. } => f
                .debug_struct("PendingTransition")
                .field("waiting_on", message)
                .finish(),
        }
    }
}

// ============================================================================
// TransitionGate
// ============================================================================

/// Callback invoked after every committed transition.
pub type Listener<S> = Arc<dyn Fn(&Location<S>, Action) + Send + Sync>;

struct GateInner<S> {
    prompt: Option<(u64, Prompt<S>)>,
    listeners: Vec<(u64, Listener<S>)>,
    next_id: u64,
}

impl<S> GateInner<S> {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

fn lock<S>(inner: &Mutex<GateInner<S>>) -> MutexGuard<'_, GateInner<S>> {
    // Listeners and prompts never run under the lock, so a poisoned guard
    // still holds consistent data.
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the blocking prompt and the listener list for one history.
///
/// Cloning is cheap and yields a handle to the same gate.
pub struct TransitionGate<S = ()> {
    inner: Arc<Mutex<GateInner<S>>>,
}

impl<S> TransitionGate<S> {
    /// Create a gate with no prompt and no listeners.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(GateInner {
                prompt: None,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Install `prompt`, replacing any prompt already installed.
    ///
    /// Only one prompt is active at a time; replacing one logs a warning.
    pub fn set_prompt(&self, prompt: Prompt<S>) -> Unblock<S> {
        let mut inner = lock(&self.inner);
        if inner.prompt.is_some() {
            warn_log!("A history supports only one prompt at a time; replacing the installed prompt");
        }
        let id = inner.next_id();
        inner.prompt = Some((id, prompt));
        Unblock {
            gate: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Remove whatever prompt is installed.
    pub fn clear_prompt(&self) {
        lock(&self.inner).prompt = None;
    }

    /// Whether a prompt is installed.
    pub fn is_blocking(&self) -> bool {
        lock(&self.inner).prompt.is_some()
    }

    /// Ask whether a transition to `location` may happen.
    ///
    /// `confirmation` is only consulted when the prompt asks for it. Without
    /// a strategy such a transition resolves to [`Approval::Unavailable`].
    pub fn request_transition(
        &self,
        location: &Location<S>,
        action: Action,
        confirmation: Option<&dyn UserConfirmation>,
    ) -> PendingTransition {
        let prompt = lock(&self.inner).prompt.as_ref().map(|(_, prompt)| prompt.clone());
        let Some(prompt) = prompt else {
            return PendingTransition::decided(Approval::Approved);
        };

        match prompt.evaluate(location, action) {
            PromptOutcome::Allow => PendingTransition::decided(Approval::Approved),
            PromptOutcome::Deny => {
                debug_log!("Prompt denied {} to '{}'", action, location.pathname());
                PendingTransition::decided(Approval::Rejected { message: None })
            }
            PromptOutcome::Confirm(message) => {
                let Some(confirmation) = confirmation else {
                    error_log!(
                        "Prompt '{}' requires confirmation but no strategy is configured; {} to '{}' cannot proceed",
                        message,
                        action,
                        location.pathname()
                    );
                    return PendingTransition::decided(Approval::Unavailable);
                };
                trace_log!("Asking {} to confirm: {}", confirmation.name(), message);
                let (proceed, receiver) = Proceed::channel();
                confirmation.confirm(&message, proceed);
                PendingTransition {
                    pending: Pending::Waiting { receiver, message },
                }
            }
        }
    }

    /// Register a listener. It stays registered until
    /// [`ListenerHandle::unlisten`] is called.
    pub fn add_listener<F>(&self, listener: F) -> ListenerHandle<S>
    where
        F: Fn(&Location<S>, Action) + Send + Sync + 'static,
    {
        let mut inner = lock(&self.inner);
        let id = inner.next_id();
        inner.listeners.push((id, Arc::new(listener)));
        ListenerHandle {
            gate: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    /// Call every listener with `location` and `action`.
    ///
    /// Listeners may navigate, listen or unlisten from inside the callback.
    /// A listener removed while the fan-out is running is skipped.
    pub fn notify(&self, location: &Location<S>, action: Action) {
        let listeners = lock(&self.inner).listeners.clone();
        trace_log!(
            "Notifying {} listener(s) of {} to '{}'",
            listeners.len(),
            action,
            location.pathname()
        );

        for (id, listener) in listeners {
            let registered = lock(&self.inner).listeners.iter().any(|(other, _)| *other == id);
            if registered {
                listener(location, action);
            }
        }
    }
}

impl<S> Default for TransitionGate<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for TransitionGate<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> fmt::Debug for TransitionGate<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("TransitionGate")
            .field("prompt", &inner.prompt.as_ref().map(|(_, prompt)| prompt))
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

// ============================================================================
// Handles
// ============================================================================

/// Removes the prompt installed by [`TransitionGate::set_prompt`].
///
/// Dropping the handle keeps the prompt installed.
pub struct Unblock<S = ()> {
    gate: Weak<Mutex<GateInner<S>>>,
    id: u64,
}

impl<S> Unblock<S> {
    /// Remove the prompt if it is still the installed one.
    ///
    /// Returns `false` when another prompt replaced it in the meantime (that
    /// prompt stays) or the gate no longer exists.
    pub fn unblock(self) -> bool {
        let Some(gate) = self.gate.upgrade() else {
            return false;
        };
        let mut inner = lock(&gate);
        let installed = matches!(inner.prompt, Some((id, _)) if id == self.id);
        if installed {
            inner.prompt = None;
        }
        installed
    }
}

impl<S> fmt::Debug for Unblock<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unblock").field("id", &self.id).finish()
    }
}

/// Unregisters the listener added by [`TransitionGate::add_listener`].
///
/// Dropping the handle keeps the listener registered.
pub struct ListenerHandle<S = ()> {
    gate: Weak<Mutex<GateInner<S>>>,
    id: u64,
}

impl<S> ListenerHandle<S> {
    /// Unregister the listener. Returns `false` if it was already gone.
    pub fn unlisten(self) -> bool {
        let Some(gate) = self.gate.upgrade() else {
            return false;
        };
        let mut inner = lock(&gate);
        let before = inner.listeners.len();
        inner.listeners.retain(|(id, _)| *id != self.id);
        inner.listeners.len() != before
    }
}

impl<S> fmt::Debug for ListenerHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerHandle").field("id", &self.id).finish()
    }
}
