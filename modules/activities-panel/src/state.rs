//! In-memory view state. Everything the rendered page shows is derived from
//! a `PanelState`; nothing is read back from the page.

use activities_client::{Activity, ActivityCollection};

use crate::forms::{CreateForm, EditForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

/// Where a transient message is shown: under the create form, or inside a
/// card's edit panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageTarget {
    Create,
    Card(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSlot {
    pub text: String,
    pub kind: MessageKind,
    pub visible: bool,
}

/// One rendered activity with its controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub activity: Activity,
    pub editing: bool,
    pub form: EditForm,
    pub message: Option<MessageSlot>,
}

impl Card {
    fn new(activity: Activity) -> Self {
        let form = EditForm::from_activity(&activity);
        Self {
            activity,
            editing: false,
            form,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub cards: Vec<Card>,
    /// False until the first successful load.
    pub loaded: bool,
    pub load_error: Option<String>,
    pub create_form: CreateForm,
    pub create_message: Option<MessageSlot>,
    /// Why the most recent confirmed delete failed. Cleared when another
    /// delete is confirmed.
    pub delete_error: Option<String>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card(&self, name: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.activity.name == name)
    }

    pub fn card_mut(&mut self, name: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.activity.name == name)
    }

    pub fn activity_names(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.activity.name.as_str()).collect()
    }

    /// Rebuild every card from a fresh fetch. Open editors, unsaved edits and
    /// card messages do not survive.
    pub fn replace_activities(&mut self, activities: ActivityCollection) {
        self.cards = activities.into_iter().map(Card::new).collect();
        self.loaded = true;
        self.load_error = None;
    }

    pub fn message(&self, target: &MessageTarget) -> Option<&MessageSlot> {
        match target {
            MessageTarget::Create => self.create_message.as_ref(),
            MessageTarget::Card(name) => self.card(name)?.message.as_ref(),
        }
    }

    fn message_slot_mut(&mut self, target: &MessageTarget) -> Option<&mut Option<MessageSlot>> {
        match target {
            MessageTarget::Create => Some(&mut self.create_message),
            MessageTarget::Card(name) => self.card_mut(name).map(|c| &mut c.message),
        }
    }

    /// Set text and kind and make the message visible. Returns false when the
    /// target card no longer exists.
    pub fn show_message(&mut self, target: &MessageTarget, text: String, kind: MessageKind) -> bool {
        match self.message_slot_mut(target) {
            Some(slot) => {
                *slot = Some(MessageSlot {
                    text,
                    kind,
                    visible: true,
                });
                true
            }
            None => false,
        }
    }

    /// Hide whatever the target currently shows. The text stays behind, as
    /// a hidden element keeps its content.
    pub fn hide_message(&mut self, target: &MessageTarget) {
        if let Some(Some(slot)) = self.message_slot_mut(target) {
            slot.visible = false;
        }
    }

    pub fn visible_message(&self, target: &MessageTarget) -> Option<&MessageSlot> {
        self.message(target).filter(|m| m.visible)
    }
}
