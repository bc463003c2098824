//! The dispatch loop.

use std::collections::VecDeque;
use std::time::Duration;

use activities_client::ActivityBackend;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::event::{Effect, Outcome, PanelEvent};
use crate::reducer::reduce;
use crate::state::{MessageTarget, PanelState};
use crate::traits::Interaction;

/// How long a transient message stays visible.
pub const DEFAULT_MESSAGE_HIDE: Duration = Duration::from_secs(5);

/// Drives a `PanelState`: reduce → run effects → feed their results back in
/// until the queue is empty.
///
/// Requests are awaited in order and never cancelled or retried. Hide timers
/// run on their own tasks and report back through a channel; call
/// [`Panel::process_expirations`] or [`Panel::next_expiration`] to apply them.
pub struct Panel<B, I>
where
    B: ActivityBackend,
    I: Interaction,
{
    state: PanelState,
    backend: B,
    interaction: I,
    hide_after: Duration,
    expired_tx: mpsc::UnboundedSender<MessageTarget>,
    expired_rx: mpsc::UnboundedReceiver<MessageTarget>,
}

impl<B, I> Panel<B, I>
where
    B: ActivityBackend,
    I: Interaction,
{
    pub fn new(backend: B, interaction: I) -> Self {
        let (expired_tx, expired_rx) = mpsc::unbounded_channel();
        Self {
            state: PanelState::new(),
            backend,
            interaction,
            hide_after: DEFAULT_MESSAGE_HIDE,
            expired_tx,
            expired_rx,
        }
    }

    pub fn with_hide_after(mut self, hide_after: Duration) -> Self {
        self.hide_after = hide_after;
        self
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn interaction(&self) -> &I {
        &self.interaction
    }

    /// Initial page load.
    pub async fn load(&mut self) {
        self.dispatch(PanelEvent::Refresh).await;
    }

    /// Dispatch an event and everything it causes.
    pub async fn dispatch(&mut self, event: PanelEvent) {
        let mut queue: VecDeque<PanelEvent> = VecDeque::new();
        queue.push_back(event);

        while let Some(evt) = queue.pop_front() {
            for effect in reduce(&mut self.state, evt) {
                if let Some(next) = self.run(effect).await {
                    queue.push_back(next);
                }
            }
        }
    }

    /// Apply every hide timer that has already fired. Returns how many.
    pub async fn process_expirations(&mut self) -> usize {
        let mut count = 0;
        while let Ok(target) = self.expired_rx.try_recv() {
            self.dispatch(PanelEvent::MessageExpired(target)).await;
            count += 1;
        }
        count
    }

    /// Wait for the next hide timer and apply it.
    pub async fn next_expiration(&mut self) -> Option<MessageTarget> {
        let target = self.expired_rx.recv().await?;
        self.dispatch(PanelEvent::MessageExpired(target.clone())).await;
        Some(target)
    }

    async fn run(&mut self, effect: Effect) -> Option<PanelEvent> {
        match effect {
            Effect::FetchActivities => match self.backend.list_activities().await {
                Ok(activities) => {
                    debug!(count = activities.len(), "Activities loaded");
                    Some(PanelEvent::Loaded(activities))
                }
                Err(e) => Some(PanelEvent::LoadFailed(e.to_string())),
            },
            Effect::CreateActivity(activity) => {
                let result = self.backend.create_activity(&activity).await;
                Some(PanelEvent::CreateCompleted(Outcome::from_result(result)))
            }
            Effect::UpdateActivity { name, update } => {
                let result = self.backend.update_activity(&name, &update).await;
                Some(PanelEvent::EditCompleted {
                    name,
                    outcome: Outcome::from_result(result),
                })
            }
            Effect::ConfirmDelete { name, prompt } => {
                if self.interaction.confirm(&prompt) {
                    Some(PanelEvent::DeleteConfirmed(name))
                } else {
                    debug!(name = %name, "Delete declined");
                    Some(PanelEvent::DeleteDeclined(name))
                }
            }
            Effect::DeleteActivity(name) => {
                let result = self.backend.delete_activity(&name).await;
                Some(PanelEvent::DeleteCompleted {
                    name,
                    outcome: Outcome::from_result(result),
                })
            }
            Effect::ScheduleHide(target) => {
                if let Some(message) = self.state.message(&target) {
                    self.interaction.message_shown(&target, message);
                }
                // Each message gets its own timer; an older timer still hides
                // whatever the target shows when it fires.
                let tx = self.expired_tx.clone();
                let after = self.hide_after;
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(target);
                });
                None
            }
            Effect::Acknowledge(text) => {
                self.interaction.acknowledge(&text);
                None
            }
            Effect::LogError { context, error } => {
                warn!(context, error = %error, "Activity request failed");
                None
            }
        }
    }
}
