//! Terminal front end for the panel's blocking interactions.

use std::sync::atomic::{AtomicBool, Ordering};

use activities_panel::{Interaction, MessageKind, MessageSlot, MessageTarget};
use console::{style, Term};
use dialoguer::Confirm;
use tracing::{debug, warn};

pub struct TerminalInteraction {
    assume_yes: bool,
    interactive: bool,
    declined: AtomicBool,
}

impl TerminalInteraction {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            interactive: Term::stdout().is_term(),
            declined: AtomicBool::new(false),
        }
    }

    /// Whether the user said no to a confirmation.
    pub fn declined(&self) -> bool {
        self.declined.load(Ordering::SeqCst)
    }
}

impl Interaction for TerminalInteraction {
    fn confirm(&self, prompt: &str) -> bool {
        let answer = if self.assume_yes {
            println!("{prompt} {}", style("yes").bold());
            true
        } else if !self.interactive {
            warn!("Not a terminal and --yes not given; declining");
            false
        } else {
            answer_or_decline(Confirm::new().with_prompt(prompt).default(false).interact())
        };
        if !answer {
            self.declined.store(true, Ordering::SeqCst);
        }
        answer
    }

    fn acknowledge(&self, text: &str) {
        println!("{}", style(text).bold());
        if self.interactive && !self.assume_yes {
            let term = Term::stdout();
            let waited = term
                .write_line(&format!("{}", style("Press Enter to continue").dim()))
                .and_then(|_| term.read_line());
            if let Err(e) = waited {
                debug!(error = %e, "Could not wait for Enter");
            }
        }
    }

    fn message_shown(&self, target: &MessageTarget, message: &MessageSlot) {
        let label = match target {
            MessageTarget::Create => "create".to_string(),
            MessageTarget::Card(name) => name.clone(),
        };
        let text = match message.kind {
            MessageKind::Success => style(&message.text).green(),
            MessageKind::Error => style(&message.text).red(),
        };
        println!("[{}] {text}", style(label).cyan());
    }
}

/// A prompt that could not be shown counts as a "no".
fn answer_or_decline(answer: dialoguer::Result<bool>) -> bool {
    match answer {
        Ok(answer) => answer,
        Err(e) => {
            warn!(error = %e, "Confirmation prompt failed; declining");
            false
        }
    }
}
