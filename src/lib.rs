//! In-memory navigation history.
//!
//! `memory-history` keeps a browser-style session history (back, forward,
//! push, replace) without a browser: for server-side rendering, tests and
//! any host that has no native history of its own.
//!
//! # Quick start
//!
//! ```
//! use memory_history::{Action, HistoryOptions, MemoryHistory};
//! use pollster::block_on;
//!
//! let history: MemoryHistory = HistoryOptions::new()
//!     .initial_entries(["/a", "/b"])
//!     .initial_index(1)
//!     .build()
//!     .unwrap();
//! assert_eq!(history.location().pathname(), "/b");
//!
//! block_on(history.go_back());
//! assert_eq!(history.index(), 0);
//! assert_eq!(history.action(), Action::Pop);
//!
//! block_on(history.push("/c?tab=1", None));
//! assert_eq!(history.length(), 2);
//! assert_eq!(history.location().search(), "?tab=1");
//! ```
//!
//! # Blocking transitions
//!
//! [`MemoryHistory::block`] installs a [`Prompt`] consulted before every
//! transition. A prompt that asks the user goes through the configured
//! [`UserConfirmation`], which may answer right away or later. The history
//! only changes once the answer arrives, which is why navigation methods
//! return futures.
//!
//! ```
//! use memory_history::{confirm_fn, HistoryOptions, MemoryHistory};
//! use pollster::block_on;
//!
//! let history: MemoryHistory = HistoryOptions::new()
//!     .user_confirmation(confirm_fn(|_message, proceed| proceed.reject()))
//!     .build()
//!     .unwrap();
//!
//! let unblock = history.block("Discard the draft?").unwrap();
//! assert!(block_on(history.push("/elsewhere", None)).is_blocked());
//! assert_eq!(history.location().pathname(), "/");
//!
//! unblock.unblock();
//! assert!(block_on(history.push("/elsewhere", None)).is_committed());
//! ```
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`location`] | [`Location`], [`LocationDescriptor`], [`create_location`] |
//! | [`path`] | Pure path helpers: basename handling, parsing, resolving |
//! | [`gate`] | [`TransitionGate`], [`Prompt`], [`PendingTransition`] |
//! | [`confirm`] | [`UserConfirmation`], [`Proceed`], `TerminalConfirmation` |
//! | [`options`] | [`HistoryOptions`] |
//! | [`error`] | [`HistoryError`], [`TransitionResult`] |
//! | [`logging`] | `log` / `tracing` backend selection |

mod action;
pub mod confirm;
pub mod error;
pub mod gate;
mod history;
mod key;
pub mod location;
pub mod logging;
pub mod options;
pub mod path;

pub use action::Action;
pub use confirm::{confirm_fn, FnConfirmation, Proceed, UserConfirmation};
#[cfg(feature = "terminal")]
pub use confirm::TerminalConfirmation;
pub use error::{HistoryError, Result, TransitionResult};
pub use gate::{
    Approval, Listener, ListenerHandle, PendingTransition, Prompt, PromptFn, PromptOutcome,
    TransitionGate, Unblock,
};
pub use history::{HistorySnapshot, MemoryHistory};
pub use key::{KeyGenerator, DEFAULT_KEY_LENGTH};
pub use location::{create_location, Location, LocationDescriptor};
pub use options::HistoryOptions;
