//! Test utilities for history tests
//!
//! Provides history builders, a listener recorder and a confirmation
//! strategy that parks its answers until the test resolves them.

#![allow(dead_code)]

use memory_history::*;
use std::sync::{Arc, Mutex};

/// Build a history over `entries` starting at `index`, with no confirmation.
pub fn history(entries: &[&str], index: usize) -> MemoryHistory {
    HistoryOptions::new()
        .initial_entries(entries.iter().copied())
        .initial_index(index)
        .build()
        .unwrap()
}

/// Build a history whose confirmation always answers `answer` immediately.
pub fn history_answering(entries: &[&str], index: usize, answer: bool) -> MemoryHistory {
    HistoryOptions::new()
        .initial_entries(entries.iter().copied())
        .initial_index(index)
        .user_confirmation(confirm_fn(move |_, proceed| proceed.resolve(answer)))
        .build()
        .unwrap()
}

/// Whether the environment supplies a confirmation strategy by default.
pub fn environment_confirms() -> bool {
    #[cfg(feature = "terminal")]
    {
        TerminalConfirmation::is_available()
    }
    #[cfg(not(feature = "terminal"))]
    {
        false
    }
}

/// Paths of all entries, oldest first.
pub fn paths<S: Clone>(history: &MemoryHistory<S>) -> Vec<String> {
    history.entries().iter().map(Location::path).collect()
}

/// Records every notification as `"ACTION path"`.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn attach<S: Clone + 'static>(history: &MemoryHistory<S>) -> (Self, ListenerHandle<S>) {
        let recorder = Self::default();
        let calls = recorder.calls.clone();
        let handle = history.listen(move |location, action| {
            calls.lock().unwrap().push(format!("{action} {}", location.path()));
        });
        (recorder, handle)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

/// Confirmation strategy that keeps each request for the test to answer.
#[derive(Clone, Default)]
pub struct ParkedConfirmation {
    requests: Arc<Mutex<Vec<(String, Proceed)>>>,
}

impl ParkedConfirmation {
    /// Number of requests waiting for an answer.
    pub fn waiting(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Messages of the waiting requests, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }

    /// Answer the oldest waiting request.
    pub fn answer(&self, approved: bool) {
        let (_, proceed) = self.requests.lock().unwrap().remove(0);
        proceed.resolve(approved);
    }

    /// Answer the most recent waiting request.
    pub fn answer_newest(&self, approved: bool) {
        let (_, proceed) = self.requests.lock().unwrap().pop().unwrap();
        proceed.resolve(approved);
    }

    /// Drop the oldest waiting request without answering.
    pub fn abandon(&self) {
        drop(self.requests.lock().unwrap().remove(0));
    }
}

impl UserConfirmation for ParkedConfirmation {
    fn confirm(&self, message: &str, proceed: Proceed) {
        self.requests
            .lock()
            .unwrap()
            .push((message.to_string(), proceed));
    }

    fn name(&self) -> &'static str {
        "ParkedConfirmation"
    }
}
