//! User confirmation for blocked transitions.
//!
//! When a blocking prompt produces a message, the history asks a
//! [`UserConfirmation`] strategy whether to go ahead. The strategy receives
//! the message and a [`Proceed`] handle, and answers by resolving the handle:
//!
//! - synchronously, before `confirm` returns (a yes/no decided in-process);
//! - or later, after storing the handle somewhere (a dialog, a test driver).
//!
//! `Proceed::resolve` consumes the handle, so an answer is given at most
//! once. Dropping the handle without answering counts as "no".
//!
//! There is no silent default. With the `terminal` feature (on by default)
//! `TerminalConfirmation` is used when the process is attached to a
//! terminal; anywhere else a strategy must be supplied through [`HistoryOptions::user_confirmation`](crate::HistoryOptions::user_confirmation).
//!
//! # Example
//!
//! ```
//! use memory_history::confirm_fn;
//!
//! let confirmation = confirm_fn(|message, proceed| {
//!     // Approve anything that is merely a warning
//!     proceed.resolve(message.starts_with("warning:"));
//! });
//! # let _ = confirmation;
//! ```

#[cfg(feature = "terminal")]
use crate::error_log;
#[cfg(feature = "terminal")]
use dialoguer::{theme::ColorfulTheme, Confirm};
use futures::channel::oneshot;
#[cfg(feature = "terminal")]
use std::io::{self, IsTerminal};

// ============================================================================
// Proceed
// ============================================================================

/// One-shot answer to a confirmation request.
#[must_use = "dropping a Proceed without resolving it rejects the transition"]
#[derive(Debug)]
pub struct Proceed {
    sender: oneshot::Sender<bool>,
}

impl Proceed {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<bool>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Answer the confirmation: `true` lets the transition happen.
    pub fn resolve(self, approved: bool) {
        // The receiver is gone when the navigation future was dropped; the
        // answer has nowhere to go then.
        let _ = self.sender.send(approved);
    }

    /// Shorthand for `resolve(true)`.
    pub fn approve(self) {
        self.resolve(true);
    }

    /// Shorthand for `resolve(false)`.
    pub fn reject(self) {
        self.resolve(false);
    }

    /// Whether the navigation waiting on this answer is still around.
    pub fn is_pending(&self) -> bool {
        !self.sender.is_canceled()
    }
}

// ============================================================================
// UserConfirmation trait
// ============================================================================

/// Strategy asking the user whether a blocked transition may proceed.
///
/// Implementations must eventually resolve (or drop) the [`Proceed`] handle.
///
/// ```
/// use memory_history::{Proceed, UserConfirmation};
///
/// struct AlwaysYes;
///
/// impl UserConfirmation for AlwaysYes {
///     fn confirm(&self, _message: &str, proceed: Proceed) {
///         proceed.approve();
///     }
/// }
/// ```
pub trait UserConfirmation: Send + Sync + 'static {
    /// Show `message` and answer through `proceed`.
    fn confirm(&self, message: &str, proceed: Proceed);

    /// Strategy name for logs.
    fn name(&self) -> &'static str {
        "UserConfirmation"
    }
}

/// Create a confirmation strategy from a closure.
pub const fn confirm_fn<F>(f: F) -> FnConfirmation<F>
where
    F: Fn(&str, Proceed) + Send + Sync + 'static,
{
    FnConfirmation { f }
}

/// Confirmation strategy created from a closure via [`confirm_fn`].
pub struct FnConfirmation<F> {
    f: F,
}

impl<F> UserConfirmation for FnConfirmation<F>
where
    F: Fn(&str, Proceed) + Send + Sync + 'static,
{
    fn confirm(&self, message: &str, proceed: Proceed) {
        (self.f)(message, proceed);
    }
}

// ============================================================================
// TerminalConfirmation
// ============================================================================

/// Asks on the controlling terminal with a `dialoguer` yes/no prompt.
///
/// The default answer is "no". A terminal error rejects.
#[cfg(feature = "terminal")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirmation;

#[cfg(feature = "terminal")]
impl TerminalConfirmation {
    /// Whether stdin and stderr are both attached to a terminal.
    pub fn is_available() -> bool {
        io::stdin().is_terminal() && io::stderr().is_terminal()
    }

    /// `Some` when [`is_available`](Self::is_available).
    pub fn detect() -> Option<Self> {
        Self::is_available().then_some(Self)
    }
}

#[cfg(feature = "terminal")]
impl UserConfirmation for TerminalConfirmation {
    fn confirm(&self, message: &str, proceed: Proceed) {
        let approved = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(false)
            .interact()
            .unwrap_or_else(|err| {
                error_log!("Terminal confirmation failed, rejecting transition: {}", err);
                false
            });
        proceed.resolve(approved);
    }

    fn name(&self) -> &'static str {
        "TerminalConfirmation"
    }
}
