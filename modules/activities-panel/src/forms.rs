//! Raw form values, exactly as typed, and their conversion to request bodies.

use activities_client::{Activity, ActivityUpdate, NewActivity};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: String,
}

impl CreateForm {
    /// No validation: a max that does not parse is sent as `null` and left
    /// for the backend to reject.
    pub fn to_request(&self) -> NewActivity {
        NewActivity {
            name: self.name.clone(),
            description: self.description.clone(),
            schedule: self.schedule.clone(),
            max_participants: parse_max_participants(&self.max_participants),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub description: String,
    pub schedule: String,
    pub max_participants: String,
}

impl EditForm {
    /// Pre-populated with the activity's current values.
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            max_participants: activity.max_participants.to_string(),
        }
    }

    pub fn to_update(&self) -> ActivityUpdate {
        ActivityUpdate {
            description: Some(self.description.clone()),
            schedule: Some(self.schedule.clone()),
            max_participants: parse_max_participants(&self.max_participants),
        }
    }
}

/// Parse the leading integer of a form value, browser `parseInt` style:
/// leading whitespace and a sign are accepted, trailing junk is ignored,
/// no digits at all yields `None`.
pub fn parse_max_participants(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    rest[..digits_len].parse::<i64>().ok().map(|n| sign * n)
}
