//! The user-facing seam of the panel.

use crate::state::{MessageSlot, MessageTarget};

/// Blocking interactions with whoever operates the panel.
///
/// Implemented by the terminal front end and by scripted fakes in tests.
pub trait Interaction: Send + Sync {
    /// Ask a yes/no question. Returning false aborts the action silently.
    fn confirm(&self, prompt: &str) -> bool;

    /// Show a notice the user has to dismiss before the panel continues.
    fn acknowledge(&self, text: &str);

    /// A transient message just became visible.
    fn message_shown(&self, _target: &MessageTarget, _message: &MessageSlot) {}
}
