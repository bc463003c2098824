//! Pure state transitions. `reduce` never performs I/O; anything that talks
//! to the backend, the user or a clock comes back out as an `Effect`.

use crate::event::{Effect, Outcome, PanelEvent};
use crate::forms::CreateForm;
use crate::state::{MessageKind, MessageTarget, PanelState};

const GENERIC_ERROR: &str = "An error occurred";
const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";
const CREATE_UNREACHABLE: &str = "Failed to create activity. Please try again.";
const UPDATE_UNREACHABLE: &str = "Failed to update activity. Please try again.";
const DELETE_REJECTED: &str = "Failed to delete activity";
const DELETE_UNREACHABLE: &str = "Failed to delete activity. Please try again.";

pub fn delete_prompt(name: &str) -> String {
    format!(
        "Are you sure you want to delete \"{name}\"? This will also remove all registered participants."
    )
}

pub fn reduce(state: &mut PanelState, event: PanelEvent) -> Vec<Effect> {
    match event {
        PanelEvent::Refresh => vec![Effect::FetchActivities],
        PanelEvent::Loaded(activities) => {
            state.replace_activities(activities);
            vec![]
        }
        PanelEvent::LoadFailed(error) => {
            state.load_error = Some(LOAD_FAILED.to_string());
            vec![Effect::LogError {
                context: "load activities",
                error,
            }]
        }

        PanelEvent::ToggleEdit(name) => {
            if let Some(card) = state.card_mut(&name) {
                card.editing = !card.editing;
            }
            vec![]
        }
        PanelEvent::EditFormChanged { name, form } => {
            if let Some(card) = state.card_mut(&name) {
                card.form = form;
            }
            vec![]
        }
        PanelEvent::EditSubmitted(name) => match state.card(&name) {
            Some(card) => {
                let update = card.form.to_update();
                vec![Effect::UpdateActivity { name, update }]
            }
            None => vec![],
        },
        PanelEvent::EditCompleted { name, outcome } => {
            let target = MessageTarget::Card(name.clone());
            match outcome {
                Outcome::Succeeded { message } => {
                    let text = or_default(message, "Activity updated successfully");
                    let mut effects = show(state, target, text, MessageKind::Success);
                    if let Some(card) = state.card_mut(&name) {
                        card.editing = false;
                    }
                    effects.push(Effect::FetchActivities);
                    effects
                }
                Outcome::Rejected { detail } => {
                    let text = detail.unwrap_or_else(|| GENERIC_ERROR.to_string());
                    show(state, target, text, MessageKind::Error)
                }
                Outcome::Unreachable { error } => {
                    let mut effects =
                        show(state, target, UPDATE_UNREACHABLE.to_string(), MessageKind::Error);
                    effects.push(Effect::LogError {
                        context: "update activity",
                        error,
                    });
                    effects
                }
            }
        }

        PanelEvent::CreateFormChanged(form) => {
            state.create_form = form;
            vec![]
        }
        PanelEvent::CreateSubmitted => {
            vec![Effect::CreateActivity(state.create_form.to_request())]
        }
        PanelEvent::CreateCompleted(outcome) => match outcome {
            Outcome::Succeeded { message } => {
                let text = or_default(message, "Activity created successfully");
                let mut effects = show(state, MessageTarget::Create, text, MessageKind::Success);
                state.create_form = CreateForm::default();
                effects.push(Effect::FetchActivities);
                effects
            }
            Outcome::Rejected { detail } => {
                let text = detail.unwrap_or_else(|| GENERIC_ERROR.to_string());
                show(state, MessageTarget::Create, text, MessageKind::Error)
            }
            Outcome::Unreachable { error } => {
                let mut effects = show(
                    state,
                    MessageTarget::Create,
                    CREATE_UNREACHABLE.to_string(),
                    MessageKind::Error,
                );
                effects.push(Effect::LogError {
                    context: "create activity",
                    error,
                });
                effects
            }
        },

        PanelEvent::DeleteRequested(name) => {
            let prompt = delete_prompt(&name);
            vec![Effect::ConfirmDelete { name, prompt }]
        }
        PanelEvent::DeleteConfirmed(name) => {
            state.delete_error = None;
            vec![Effect::DeleteActivity(name)]
        }
        PanelEvent::DeleteDeclined(_) => vec![],
        PanelEvent::DeleteCompleted { outcome, .. } => match outcome {
            Outcome::Succeeded { message } => {
                vec![Effect::Acknowledge(message), Effect::FetchActivities]
            }
            // No refresh: the list keeps whatever it showed before.
            Outcome::Rejected { detail } => {
                let text = detail.unwrap_or_else(|| DELETE_REJECTED.to_string());
                state.delete_error = Some(text.clone());
                vec![Effect::Acknowledge(text)]
            }
            Outcome::Unreachable { error } => {
                state.delete_error = Some(DELETE_UNREACHABLE.to_string());
                vec![
                    Effect::Acknowledge(DELETE_UNREACHABLE.to_string()),
                    Effect::LogError {
                        context: "delete activity",
                        error,
                    },
                ]
            }
        },

        PanelEvent::MessageExpired(target) => {
            state.hide_message(&target);
            vec![]
        }
    }
}

fn show(state: &mut PanelState, target: MessageTarget, text: String, kind: MessageKind) -> Vec<Effect> {
    if state.show_message(&target, text, kind) {
        vec![Effect::ScheduleHide(target)]
    } else {
        vec![]
    }
}

fn or_default(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::EditForm;
    use activities_client::{Activity, ActivityCollection, ActivityUpdate};

    fn chess() -> Activity {
        Activity {
            name: "Chess Club".into(),
            description: "Learn strategies".into(),
            schedule: "Fridays, 3:30 PM".into(),
            max_participants: 12,
            participants: vec!["michael@mergington.edu".into()],
        }
    }

    fn loaded() -> PanelState {
        let mut state = PanelState::new();
        reduce(&mut state, PanelEvent::Loaded(ActivityCollection::new(vec![chess()])));
        state
    }

    #[test]
    fn refresh_only_fetches() {
        let mut state = PanelState::new();
        assert_eq!(reduce(&mut state, PanelEvent::Refresh), vec![Effect::FetchActivities]);
        assert!(!state.loaded);
    }

    #[test]
    fn toggle_flips_each_time_and_is_per_card() {
        let mut state = PanelState::new();
        let mut other = chess();
        other.name = "Art Studio".into();
        reduce(
            &mut state,
            PanelEvent::Loaded(ActivityCollection::new(vec![chess(), other])),
        );

        reduce(&mut state, PanelEvent::ToggleEdit("Chess Club".into()));
        reduce(&mut state, PanelEvent::ToggleEdit("Art Studio".into()));
        assert!(state.card("Chess Club").unwrap().editing);
        assert!(state.card("Art Studio").unwrap().editing);

        reduce(&mut state, PanelEvent::ToggleEdit("Chess Club".into()));
        assert!(!state.card("Chess Club").unwrap().editing);
        assert!(state.card("Art Studio").unwrap().editing);
    }

    #[test]
    fn edit_submit_sends_form_values() {
        let mut state = loaded();
        reduce(
            &mut state,
            PanelEvent::EditFormChanged {
                name: "Chess Club".into(),
                form: EditForm {
                    description: "Advanced".into(),
                    schedule: "Saturdays".into(),
                    max_participants: "20".into(),
                },
            },
        );
        let effects = reduce(&mut state, PanelEvent::EditSubmitted("Chess Club".into()));
        assert_eq!(
            effects,
            vec![Effect::UpdateActivity {
                name: "Chess Club".into(),
                update: ActivityUpdate {
                    description: Some("Advanced".into()),
                    schedule: Some("Saturdays".into()),
                    max_participants: Some(20),
                },
            }]
        );
    }

    #[test]
    fn edit_success_closes_panel_and_refreshes() {
        let mut state = loaded();
        reduce(&mut state, PanelEvent::ToggleEdit("Chess Club".into()));
        let effects = reduce(
            &mut state,
            PanelEvent::EditCompleted {
                name: "Chess Club".into(),
                outcome: Outcome::Succeeded {
                    message: "Activity updated successfully".into(),
                },
            },
        );

        let card = state.card("Chess Club").unwrap();
        assert!(!card.editing);
        assert_eq!(card.message.as_ref().unwrap().kind, MessageKind::Success);
        assert_eq!(
            effects,
            vec![
                Effect::ScheduleHide(MessageTarget::Card("Chess Club".into())),
                Effect::FetchActivities,
            ]
        );
    }

    #[test]
    fn edit_failure_keeps_panel_open() {
        let mut state = loaded();
        reduce(&mut state, PanelEvent::ToggleEdit("Chess Club".into()));
        let effects = reduce(
            &mut state,
            PanelEvent::EditCompleted {
                name: "Chess Club".into(),
                outcome: Outcome::Rejected { detail: None },
            },
        );

        let card = state.card("Chess Club").unwrap();
        assert!(card.editing);
        assert_eq!(card.message.as_ref().unwrap().text, GENERIC_ERROR);
        assert!(!effects.contains(&Effect::FetchActivities));
    }

    #[test]
    fn create_success_resets_form() {
        let mut state = loaded();
        reduce(
            &mut state,
            PanelEvent::CreateFormChanged(CreateForm {
                name: "Robotics".into(),
                description: "Build robots".into(),
                schedule: "Mondays".into(),
                max_participants: "10".into(),
            }),
        );
        let effects = reduce(
            &mut state,
            PanelEvent::CreateCompleted(Outcome::Succeeded {
                message: "Activity created successfully".into(),
            }),
        );

        assert_eq!(state.create_form, CreateForm::default());
        assert_eq!(
            effects,
            vec![
                Effect::ScheduleHide(MessageTarget::Create),
                Effect::FetchActivities
            ]
        );
    }

    #[test]
    fn create_unreachable_logs_and_keeps_form() {
        let mut state = loaded();
        let form = CreateForm {
            name: "Robotics".into(),
            ..CreateForm::default()
        };
        reduce(&mut state, PanelEvent::CreateFormChanged(form.clone()));
        let effects = reduce(
            &mut state,
            PanelEvent::CreateCompleted(Outcome::Unreachable {
                error: "connection refused".into(),
            }),
        );

        assert_eq!(state.create_form, form);
        let message = state.visible_message(&MessageTarget::Create).unwrap();
        assert_eq!(message.text, CREATE_UNREACHABLE);
        assert!(matches!(effects.last(), Some(Effect::LogError { .. })));
    }

    #[test]
    fn declined_delete_does_nothing() {
        let mut state = loaded();
        let before = state.clone();
        let effects = reduce(&mut state, PanelEvent::DeleteDeclined("Chess Club".into()));
        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn delete_request_asks_with_warning() {
        let mut state = loaded();
        let effects = reduce(&mut state, PanelEvent::DeleteRequested("Chess Club".into()));
        match &effects[..] {
            [Effect::ConfirmDelete { name, prompt }] => {
                assert_eq!(name, "Chess Club");
                assert!(prompt.contains("\"Chess Club\""));
                assert!(prompt.contains("participants"));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn failed_delete_does_not_refresh() {
        let mut state = loaded();
        let effects = reduce(
            &mut state,
            PanelEvent::DeleteCompleted {
                name: "Chess Club".into(),
                outcome: Outcome::Rejected {
                    detail: Some("Activity not found".into()),
                },
            },
        );
        assert_eq!(effects, vec![Effect::Acknowledge("Activity not found".into())]);
        assert_eq!(state.delete_error.as_deref(), Some("Activity not found"));
    }

    #[test]
    fn confirming_a_new_delete_clears_previous_failure() {
        let mut state = loaded();
        reduce(
            &mut state,
            PanelEvent::DeleteCompleted {
                name: "Ghost Club".into(),
                outcome: Outcome::Unreachable {
                    error: "connection refused".into(),
                },
            },
        );
        assert_eq!(state.delete_error.as_deref(), Some(DELETE_UNREACHABLE));

        reduce(&mut state, PanelEvent::DeleteConfirmed("Chess Club".into()));
        assert!(state.delete_error.is_none());
    }

    #[test]
    fn earlier_hide_timer_hides_newer_message() {
        let mut state = loaded();
        reduce(
            &mut state,
            PanelEvent::CreateCompleted(Outcome::Rejected {
                detail: Some("first".into()),
            }),
        );
        reduce(
            &mut state,
            PanelEvent::CreateCompleted(Outcome::Rejected {
                detail: Some("second".into()),
            }),
        );
        assert_eq!(
            state.visible_message(&MessageTarget::Create).unwrap().text,
            "second"
        );

        // The first call's timer fires while "second" is showing.
        reduce(&mut state, PanelEvent::MessageExpired(MessageTarget::Create));
        assert!(state.visible_message(&MessageTarget::Create).is_none());
    }

    #[test]
    fn refresh_drops_open_editors_and_card_messages() {
        let mut state = loaded();
        reduce(&mut state, PanelEvent::ToggleEdit("Chess Club".into()));
        reduce(
            &mut state,
            PanelEvent::EditCompleted {
                name: "Chess Club".into(),
                outcome: Outcome::Rejected { detail: None },
            },
        );
        reduce(&mut state, PanelEvent::Loaded(ActivityCollection::new(vec![chess()])));

        let card = state.card("Chess Club").unwrap();
        assert!(!card.editing);
        assert!(card.message.is_none());
    }
}
