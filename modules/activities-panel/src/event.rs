//! Panel inputs (user intents and I/O completions) and the effects the
//! reducer asks the engine to perform.

use activities_client::{ActionResponse, ActivitiesError, ActivityCollection, ActivityUpdate, NewActivity};

use crate::forms::{CreateForm, EditForm};
use crate::state::MessageTarget;

/// Result of a mutating request, reduced to what the panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded { message: String },
    /// The backend answered with a non-2xx status.
    Rejected { detail: Option<String> },
    /// The request never completed.
    Unreachable { error: String },
}

impl Outcome {
    pub fn from_result(result: Result<ActionResponse, ActivitiesError>) -> Self {
        match result {
            Ok(resp) => Outcome::Succeeded {
                message: resp.message,
            },
            Err(ActivitiesError::Api { detail, .. }) => Outcome::Rejected { detail },
            Err(err) => Outcome::Unreachable {
                error: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Page load, or any successful mutation.
    Refresh,
    Loaded(ActivityCollection),
    LoadFailed(String),

    ToggleEdit(String),
    EditFormChanged { name: String, form: EditForm },
    EditSubmitted(String),
    EditCompleted { name: String, outcome: Outcome },

    CreateFormChanged(CreateForm),
    CreateSubmitted,
    CreateCompleted(Outcome),

    DeleteRequested(String),
    DeleteConfirmed(String),
    DeleteDeclined(String),
    DeleteCompleted { name: String, outcome: Outcome },

    /// A hide timer fired. Not tied to the message that scheduled it.
    MessageExpired(MessageTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchActivities,
    CreateActivity(NewActivity),
    UpdateActivity { name: String, update: ActivityUpdate },
    /// Ask the user; answers with `DeleteConfirmed` or `DeleteDeclined`.
    ConfirmDelete { name: String, prompt: String },
    DeleteActivity(String),
    /// A message was just shown on the target; hide it after the delay.
    ScheduleHide(MessageTarget),
    /// Blocking notice the user must dismiss.
    Acknowledge(String),
    LogError { context: &'static str, error: String },
}
