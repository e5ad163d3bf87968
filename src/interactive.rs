// src/interactive.rs
use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

// =============================================================================
// CTRL-C DEBOUNCE
// =============================================================================
pub const INTERRUPT_WINDOW: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// First press inside the window: warn and keep going.
    Warn,
    /// Second press inside the window: leave without committing.
    Exit,
}

/// Counts Ctrl-C presses; the count resets once the window since the last
/// press has passed.
#[derive(Debug, Clone)]
pub struct InterruptDebounce {
    window: Duration,
    presses: u32,
    last: Option<Instant>,
}

impl InterruptDebounce {
    pub fn new(window: Duration) -> Self {
        Self { window, presses: 0, last: None }
    }

    pub fn press(&mut self, now: Instant) -> InterruptAction {
        if let Some(last) = self.last {
            if now.saturating_duration_since(last) >= self.window {
                self.presses = 0;
            }
        }
        self.presses += 1;
        self.last = Some(now);

        if self.presses >= 2 {
            InterruptAction::Exit
        } else {
            InterruptAction::Warn
        }
    }
}

impl Default for InterruptDebounce {
    fn default() -> Self {
        Self::new(INTERRUPT_WINDOW)
    }
}

/// Replaces the default SIGINT behaviour with the press-twice debounce.
pub fn install_interrupt_handler() {
    tokio::spawn(async move {
        let mut debounce = InterruptDebounce::default();
        while tokio::signal::ctrl_c().await.is_ok() {
            match debounce.press(Instant::now()) {
                InterruptAction::Warn => {
                    println!("{}", style("\n⚠️  Press Ctrl+C again to cancel without committing...").yellow());
                }
                InterruptAction::Exit => {
                    println!("{}", style("\n📋 Operation cancelled. No commit was made.").blue());
                    std::process::exit(0);
                }
            }
        }
    });
}

// =============================================================================
// REVIEW STATE MACHINE
// =============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The user submitted an empty message.
    EmptyMessage,
    /// The prompt was aborted (Ctrl-C or closed input).
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState {
    Idle,
    Editing { draft: String },
    Submitted(String),
    Cancelled(CancelReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewEvent {
    Begin(String),
    Submit(String),
    Abort,
}

impl ReviewState {
    pub fn next(self, event: ReviewEvent) -> ReviewState {
        match (self, event) {
            (ReviewState::Idle, ReviewEvent::Begin(draft)) => ReviewState::Editing { draft },
            (ReviewState::Idle, ReviewEvent::Abort) => ReviewState::Cancelled(CancelReason::Aborted),
            (ReviewState::Editing { .. }, ReviewEvent::Submit(text)) => {
                let text = text.trim();
                if text.is_empty() {
                    ReviewState::Cancelled(CancelReason::EmptyMessage)
                } else {
                    ReviewState::Submitted(text.to_string())
                }
            }
            (ReviewState::Editing { .. }, ReviewEvent::Abort) => ReviewState::Cancelled(CancelReason::Aborted),
            (state, event) => {
                debug!(?state, ?event, "ignoring review event");
                state
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ReviewState::Submitted(_) | ReviewState::Cancelled(_))
    }
}

// =============================================================================
// PROMPTER
// =============================================================================

/// Terminal interaction used by the commit flow.
pub trait Prompter {
    /// Editable input pre-filled with `initial`. `Ok(None)` means aborted.
    fn edit_message(&self, initial: &str) -> Result<Option<String>>;

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Drives the review machine to a terminal state with one edit round.
pub fn review_message(prompter: &dyn Prompter, generated: &str) -> Result<ReviewState> {
    let mut state = ReviewState::Idle.next(ReviewEvent::Begin(generated.to_string()));
    while !state.is_terminal() {
        let event = match &state {
            ReviewState::Editing { draft } => match prompter.edit_message(draft)? {
                Some(text) => ReviewEvent::Submit(text),
                None => ReviewEvent::Abort,
            },
            _ => ReviewEvent::Abort,
        };
        state = state.next(event);
    }
    Ok(state)
}

/// `dialoguer` prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

fn is_abort(err: &dialoguer::Error) -> bool {
    matches!(
        err,
        dialoguer::Error::IO(e) if matches!(e.kind(), io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof)
    )
}

impl Prompter for TerminalPrompter {
    fn edit_message(&self, initial: &str) -> Result<Option<String>> {
        println!(
            "{}",
            style("✏️  Edit the commit message below (press Enter to commit, Ctrl+C twice to cancel):").green()
        );
        println!("{}", style("💡 Tip: You can modify the message before pressing Enter\n").yellow());

        let result = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Commit message")
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text();

        match result {
            Ok(text) => Ok(Some(text)),
            Err(e) if is_abort(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        let result = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact();

        match result {
            Ok(answer) => Ok(answer),
            Err(e) if is_abort(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// MODULE TESTS
// =============================================================================
#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Scripted answers for the review and push prompts.
    #[derive(Default)]
    pub struct ScriptedPrompter {
        pub edits: RefCell<VecDeque<Option<String>>>,
        pub confirms: RefCell<VecDeque<bool>>,
        pub shown: RefCell<Vec<String>>,
    }

    impl ScriptedPrompter {
        pub fn new(edits: Vec<Option<&str>>, confirms: Vec<bool>) -> Self {
            Self {
                edits: RefCell::new(edits.into_iter().map(|e| e.map(String::from)).collect()),
                confirms: RefCell::new(confirms.into_iter().collect()),
                shown: RefCell::new(Vec::new()),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn edit_message(&self, initial: &str) -> Result<Option<String>> {
            self.shown.borrow_mut().push(initial.to_string());
            Ok(self.edits.borrow_mut().pop_front().unwrap_or(None))
        }

        fn confirm(&self, _prompt: &str, default: bool) -> Result<bool> {
            Ok(self.confirms.borrow_mut().pop_front().unwrap_or(default))
        }
    }

    #[test]
    fn first_press_warns_second_exits() {
        let mut d = InterruptDebounce::default();
        let t0 = Instant::now();
        assert_eq!(d.press(t0), InterruptAction::Warn);
        assert_eq!(d.press(t0 + Duration::from_secs(1)), InterruptAction::Exit);
    }

    #[test]
    fn presses_outside_window_reset() {
        let mut d = InterruptDebounce::default();
        let t0 = Instant::now();
        assert_eq!(d.press(t0), InterruptAction::Warn);
        assert_eq!(d.press(t0 + Duration::from_secs(3)), InterruptAction::Warn);
        assert_eq!(d.press(t0 + Duration::from_secs(7)), InterruptAction::Warn);
        assert_eq!(d.press(t0 + Duration::from_millis(7500)), InterruptAction::Exit);
    }

    #[test]
    fn begin_enters_editing_with_draft() {
        let state = ReviewState::Idle.next(ReviewEvent::Begin("feat: x".into()));
        assert_eq!(state, ReviewState::Editing { draft: "feat: x".into() });
        assert!(!state.is_terminal());
    }

    #[test]
    fn submit_trims_text() {
        let state = ReviewState::Editing { draft: "feat: x".into() }
            .next(ReviewEvent::Submit("  fix(api): handle nulls \n".into()));
        assert_eq!(state, ReviewState::Submitted("fix(api): handle nulls".into()));
    }

    #[test]
    fn empty_submit_cancels() {
        let state = ReviewState::Editing { draft: "feat: x".into() }.next(ReviewEvent::Submit("   ".into()));
        assert_eq!(state, ReviewState::Cancelled(CancelReason::EmptyMessage));
    }

    #[test]
    fn abort_cancels() {
        let state = ReviewState::Editing { draft: "feat: x".into() }.next(ReviewEvent::Abort);
        assert_eq!(state, ReviewState::Cancelled(CancelReason::Aborted));
    }

    #[test]
    fn terminal_states_absorb_events() {
        let done = ReviewState::Submitted("feat: x".into());
        assert_eq!(done.clone().next(ReviewEvent::Abort), done);
        let cancelled = ReviewState::Cancelled(CancelReason::Aborted);
        assert_eq!(cancelled.clone().next(ReviewEvent::Submit("y".into())), cancelled);
    }

    #[test]
    fn review_prefills_generated_message() {
        let prompter = ScriptedPrompter::new(vec![Some("feat(ui): add dark mode")], vec![]);
        let state = review_message(&prompter, "feat(ui): add theme").unwrap();
        assert_eq!(state, ReviewState::Submitted("feat(ui): add dark mode".into()));
        assert_eq!(prompter.shown.borrow().as_slice(), ["feat(ui): add theme".to_string()]);
    }

    #[test]
    fn review_abort_maps_to_cancel() {
        let prompter = ScriptedPrompter::new(vec![None], vec![]);
        let state = review_message(&prompter, "feat: x").unwrap();
        assert_eq!(state, ReviewState::Cancelled(CancelReason::Aborted));
    }
}
