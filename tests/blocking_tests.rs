//! Integration tests for blocking prompts and user confirmation
//!
//! Covers synchronous and deferred confirmation, rejection leaving the
//! history untouched, the cancelled-POP touch and configuration errors.

mod common;

use common::{environment_confirms, history, history_answering, paths, ParkedConfirmation, Recorder};
use memory_history::*;
use pollster::block_on;

// ---- synchronous confirmation ----

#[test]
fn test_rejected_push_changes_nothing() {
    let history = history_answering(&["/a", "/b"], 0, false);
    let (recorder, _handle) = Recorder::attach(&history);
    history.block("Leave?").unwrap();
    let before = history.snapshot();

    let result = block_on(history.push("/c", None));

    assert_eq!(result, TransitionResult::Blocked { message: Some("Leave?".to_string()) });
    assert_eq!(history.snapshot(), before);
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_rejected_replace_changes_nothing() {
    let history = history_answering(&["/a"], 0, false);
    let (recorder, _handle) = Recorder::attach(&history);
    history.block("Leave?").unwrap();
    let before = history.snapshot();

    assert!(block_on(history.replace("/x", None)).is_blocked());
    assert_eq!(history.snapshot(), before);
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_approved_push_goes_through_prompt() {
    let history = history_answering(&["/a"], 0, true);
    history.block("Leave?").unwrap();

    assert!(block_on(history.push("/b", None)).is_committed());
    assert_eq!(paths(&history), ["/a", "/b"]);
}

#[test]
fn test_rejected_pop_touches_listeners_with_unchanged_location() {
    let history = history_answering(&["/a", "/b"], 1, false);
    let (recorder, _handle) = Recorder::attach(&history);
    history.block("Leave?").unwrap();

    let result = block_on(history.go_back());

    assert!(result.is_blocked());
    assert_eq!(history.index(), 1);
    assert_eq!(history.action(), Action::Pop);
    assert_eq!(recorder.calls(), ["POP /b"]);
}

#[test]
fn test_rejected_pop_touch_can_be_turned_off() {
    let history: MemoryHistory = HistoryOptions::new()
        .initial_entries(["/a", "/b"])
        .initial_index(1)
        .user_confirmation(confirm_fn(|_, proceed| proceed.reject()))
        .touch_on_cancelled_pop(false)
        .build()
        .unwrap();
    let (recorder, _handle) = Recorder::attach(&history);
    history.block("Leave?").unwrap();

    assert!(block_on(history.go_back()).is_blocked());
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_rejected_pop_touch_reports_last_action() {
    let history = history_answering(&["/a"], 0, true);
    let (recorder, _handle) = Recorder::attach(&history);
    block_on(history.push("/b", None));

    history.block(Prompt::dynamic(|_, action| {
        if action == Action::Pop {
            PromptOutcome::Deny
        } else {
            PromptOutcome::Allow
        }
    }))
    .unwrap();
    assert!(block_on(history.go_back()).is_blocked());

    assert_eq!(recorder.calls(), ["PUSH /b", "PUSH /b"]);
}

// ---- dynamic prompts ----

#[test]
fn test_dynamic_prompt_sees_target_and_action() {
    let history = history_answering(&["/editor"], 0, false);
    history
        .block(Prompt::dynamic(|location, action| {
            if action == Action::Push && location.pathname() == "/editor/preview" {
                PromptOutcome::Allow
            } else {
                PromptOutcome::confirm(format!("Leave for {}?", location.pathname()))
            }
        }))
        .unwrap();

    assert!(block_on(history.push("/editor/preview", None)).is_committed());

    let result = block_on(history.push("/home", None));
    assert_eq!(result.message(), Some("Leave for /home?"));
    assert_eq!(history.location().pathname(), "/editor/preview");
}

#[test]
fn test_dynamic_deny_needs_no_confirmation() {
    let history = history(&["/a"], 0);
    history.block(Prompt::dynamic(|_, _| PromptOutcome::Deny)).unwrap();

    assert_eq!(
        block_on(history.push("/b", None)),
        TransitionResult::Blocked { message: None }
    );
}

#[test]
fn test_unblock_restores_navigation() {
    let history = history_answering(&["/a"], 0, false);
    let unblock = history.block("Leave?").unwrap();
    assert!(history.is_blocking());

    assert!(unblock.unblock());
    assert!(!history.is_blocking());
    assert!(block_on(history.push("/b", None)).is_committed());
}

#[test]
fn test_second_prompt_replaces_first() {
    let history = history_answering(&["/a"], 0, false);
    let first = history.block("first").unwrap();
    let _second = history.block("second").unwrap();

    assert!(!first.unblock());
    assert_eq!(block_on(history.push("/b", None)).message(), Some("second"));

    history.unblock();
    assert!(!history.is_blocking());
}

// ---- deferred confirmation ----

#[tokio::test(flavor = "current_thread")]
async fn test_state_unchanged_until_confirmation_resolves() {
    let confirmation = ParkedConfirmation::default();
    let history: MemoryHistory = HistoryOptions::new()
        .initial_entries(["/a"])
        .user_confirmation(confirmation.clone())
        .build()
        .unwrap();
    let (recorder, _handle) = Recorder::attach(&history);
    history.block("Discard draft?").unwrap();

    let push = history.push("/b", None);
    futures::pin_mut!(push);
    assert!(futures::poll!(push.as_mut()).is_pending());

    assert_eq!(confirmation.messages(), ["Discard draft?"]);
    assert_eq!(paths(&history), ["/a"]);
    assert_eq!(history.action(), Action::Pop);
    assert!(recorder.calls().is_empty());

    confirmation.answer(true);
    assert!(push.await.is_committed());
    assert_eq!(paths(&history), ["/a", "/b"]);
    assert_eq!(recorder.calls(), ["PUSH /b"]);
}

#[tokio::test(flavor = "current_thread")]
async fn test_answer_from_another_task() {
    let confirmation = ParkedConfirmation::default();
    let history: MemoryHistory = HistoryOptions::new()
        .initial_entries(["/a", "/b"])
        .user_confirmation(confirmation.clone())
        .build()
        .unwrap();
    history.block("Leave?").unwrap();

    let answerer = confirmation.clone();
    let responder = tokio::spawn(async move {
        while answerer.waiting() == 0 {
            tokio::task::yield_now().await;
        }
        answerer.answer(true);
    });

    let result = history.go(1).await;
    responder.await.unwrap();

    assert_eq!(result, TransitionResult::Committed { action: Action::Pop, index: 1 });
}

#[test]
fn test_abandoned_confirmation_rejects() {
    let confirmation = ParkedConfirmation::default();
    let history: MemoryHistory = HistoryOptions::new()
        .user_confirmation(confirmation.clone())
        .build()
        .unwrap();
    history.block("Leave?").unwrap();

    block_on(async {
        let push = history.push("/b", None);
        futures::pin_mut!(push);
        assert!(futures::poll!(push.as_mut()).is_pending());

        confirmation.abandon();
        assert!(push.await.is_blocked());
    });
    assert_eq!(paths(&history), ["/"]);
}

#[test]
fn test_overlapping_pushes_apply_in_approval_order() {
    let confirmation = ParkedConfirmation::default();
    let history: MemoryHistory = HistoryOptions::new()
        .initial_entries(["/a"])
        .user_confirmation(confirmation.clone())
        .build()
        .unwrap();
    history.block("Leave?").unwrap();

    block_on(async {
        let first = history.push("/b", None);
        let second = history.push("/c", None);
        futures::pin_mut!(first, second);
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert!(futures::poll!(second.as_mut()).is_pending());
        assert_eq!(confirmation.waiting(), 2);

        // Approve the newer request first
        confirmation.answer_newest(true);
        confirmation.answer(true);

        assert!(second.await.is_committed());
        assert!(first.await.is_committed());
    });

    assert_eq!(paths(&history), ["/a", "/c", "/b"]);
}

// ---- configuration errors ----

#[test]
fn test_message_prompt_without_confirmation_fails() {
    if environment_confirms() {
        // Running attached to a terminal supplies a default strategy
        return;
    }
    let history = history(&["/a"], 0);

    assert_eq!(
        history.block("Leave?").unwrap_err(),
        HistoryError::ConfirmationUnavailable
    );
    assert!(!history.is_blocking());
}

#[test]
fn test_dynamic_confirm_without_strategy_fails() {
    if environment_confirms() {
        return;
    }
    let history = history(&["/a", "/b"], 1);
    let (recorder, _handle) = Recorder::attach(&history);
    history
        .block(Prompt::dynamic(|_, _| PromptOutcome::confirm("Leave?")))
        .unwrap();

    let failed = TransitionResult::Failed(HistoryError::ConfirmationUnavailable);
    assert_eq!(block_on(history.push("/c", None)), failed);
    assert_eq!(block_on(history.replace("/c", None)), failed);
    assert_eq!(block_on(history.go_back()), failed);

    assert_eq!(paths(&history), ["/a", "/b"]);
    assert_eq!(history.index(), 1);
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_missing_strategy_is_distinct_from_user_refusal() {
    if environment_confirms() {
        return;
    }
    let prompt = || -> Prompt { Prompt::dynamic(|_, _| PromptOutcome::confirm("Leave?")) };
    let misconfigured = history(&["/a"], 0);
    misconfigured.block(prompt()).unwrap();
    let refusing = history_answering(&["/a"], 0, false);
    refusing.block(prompt()).unwrap();

    let failed = block_on(misconfigured.push("/b", None));
    let refused = block_on(refusing.push("/b", None));

    assert_eq!(failed.error(), Some(&HistoryError::ConfirmationUnavailable));
    assert_eq!(refused, TransitionResult::Blocked { message: Some("Leave?".to_string()) });
    assert_ne!(failed, refused);
}

#[test]
fn test_always_rejecting_confirmation_never_mutates() {
    let history = history_answering(&["/a", "/b", "/c"], 1, false);
    history.block("Leave?").unwrap();
    let entries = history.entries();

    block_on(async {
        history.push("/x", None).await;
        history.replace("/y", None).await;
        history.go(1).await;
        history.go(-5).await;
        history.go_forward().await;
    });

    assert_eq!(history.entries(), entries);
    assert_eq!(history.index(), 1);
}
