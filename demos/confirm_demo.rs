//! Confirmation Demo
//!
//! Walks a small history through pushes, a blocked transition and a POP.
//! Attached to a terminal, the blocking prompt is answered on stdin; run
//! with `RUST_LOG=debug` to see every transition logged.
//!
//! Without a terminal the demo falls back to a strategy that rejects every
//! prompt, so the blocked steps can be observed non-interactively.

use memory_history::{
    confirm_fn, Action, HistoryOptions, MemoryHistory, Prompt, PromptOutcome, TerminalConfirmation,
    TransitionResult,
};

fn main() {
    env_logger::init();

    let mut options = HistoryOptions::new()
        .initial_entries(["/", "/inbox"])
        .initial_index(1)
        .basename("/mail");
    if TerminalConfirmation::detect().is_none() {
        println!("stdin is not a terminal; every prompt will be rejected");
        options = options.user_confirmation(confirm_fn(|message, proceed| {
            println!("  prompt: {message} -> no");
            proceed.reject();
        }));
    }

    let history: MemoryHistory = match options.build() {
        Ok(history) => history,
        Err(err) => {
            eprintln!("failed to create history: {err}");
            return;
        }
    };

    let _listener = history.listen(|location, action| {
        println!("  -> {action} {}", location.path());
    });

    pollster::block_on(run(&history));
}

async fn run(history: &MemoryHistory) {
    println!("compose a draft");
    report(history, history.push("/compose?to=team", None).await);

    println!("block leaving the draft, except to preview it");
    let unblock = match history.block(Prompt::dynamic(|location, action| {
        if action == Action::Push && location.pathname() == "/compose/preview" {
            PromptOutcome::Allow
        } else {
            PromptOutcome::confirm(format!("Discard draft and go to {}?", location.pathname()))
        }
    })) {
        Ok(unblock) => unblock,
        Err(err) => {
            eprintln!("cannot block: {err}");
            return;
        }
    };

    report(history, history.push("preview", None).await);
    report(history, history.go_back().await);
    report(history, history.replace("/inbox", None).await);

    println!("unblock and go back");
    unblock.unblock();
    report(history, history.go(-10).await);
}

fn report(history: &MemoryHistory, result: TransitionResult) {
    match result {
        TransitionResult::Committed { action, index } => {
            println!("  {action} committed at {index}: {}", history.create_href(&history.location()));
        }
        TransitionResult::Blocked { message } => {
            println!("  blocked ({})", message.as_deref().unwrap_or("no message"));
        }
        TransitionResult::Failed(err) => {
            println!("  failed: {err}");
        }
    }
}
