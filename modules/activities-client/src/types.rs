use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

// --- Activity collection (GET /activities) ---

/// One schedulable activity. `name` is the unique key; the backend sends it
/// as the object key rather than as a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participants: Vec<String>,
}

impl Activity {
    pub fn enrolled(&self) -> i64 {
        i64::try_from(self.participants.len()).unwrap_or(i64::MAX)
    }

    /// Remaining capacity. Negative when the activity is over-enrolled.
    pub fn spots_left(&self) -> i64 {
        self.max_participants.saturating_sub(self.enrolled())
    }
}

/// The per-activity object inside the collection map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDetails {
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl ActivityDetails {
    pub fn into_activity(self, name: String) -> Activity {
        Activity {
            name,
            description: self.description,
            schedule: self.schedule,
            max_participants: self.max_participants,
            participants: self.participants,
        }
    }
}

impl From<&Activity> for ActivityDetails {
    fn from(activity: &Activity) -> Self {
        Self {
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            max_participants: activity.max_participants,
            participants: activity.participants.clone(),
        }
    }
}

/// Activities in the order the backend listed them.
///
/// Decodes from a JSON object keyed by activity name. Key order is kept; a
/// repeated key overwrites the earlier value in place, like a JS object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCollection(Vec<Activity>);

impl ActivityCollection {
    pub fn new(activities: Vec<Activity>) -> Self {
        let mut collection = Self::default();
        for activity in activities {
            collection.upsert(activity);
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.0.iter().find(|a| a.name == name)
    }

    fn upsert(&mut self, activity: Activity) {
        match self.0.iter_mut().find(|a| a.name == activity.name) {
            Some(existing) => *existing = activity,
            None => self.0.push(activity),
        }
    }
}

impl IntoIterator for ActivityCollection {
    type Item = Activity;
    type IntoIter = std::vec::IntoIter<Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de> Deserialize<'de> for ActivityCollection {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = ActivityCollection;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of activity name to activity details")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut collection = ActivityCollection(Vec::with_capacity(
                    map.size_hint().unwrap_or(0),
                ));
                while let Some((name, details)) = map.next_entry::<String, ActivityDetails>()? {
                    collection.upsert(details.into_activity(name));
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}

impl Serialize for ActivityCollection {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for activity in &self.0 {
            map.serialize_entry(&activity.name, &ActivityDetails::from(activity))?;
        }
        map.end()
    }
}

// --- Admin request bodies ---

/// Body for `POST /admin/activities`.
///
/// `max_participants: None` is sent as JSON `null`: the value a form
/// produces when the field did not parse as a number. The backend rejects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewActivity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: Option<i64>,
}

/// Body for `PUT /admin/activities/{name}`. `None` fields go out as `null`,
/// which the backend treats as "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityUpdate {
    pub description: Option<String>,
    pub schedule: Option<String>,
    pub max_participants: Option<i64>,
}

// --- Responses ---

/// Activity echo returned by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
}

/// Success body shared by every mutating endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivitySummary>,
}

/// Failure body. `detail` is usually a string but request validation
/// failures carry a list of `{loc, msg, type}` objects.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let msgs: Vec<String> = items
                    .iter()
                    .map(|item| match item.get("msg").and_then(|m| m.as_str()) {
                        Some(msg) => msg.to_string(),
                        None => item.to_string(),
                    })
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collection_keeps_backend_order() {
        let body = r#"{
            "Programming Class": {"description": "d", "schedule": "s", "max_participants": 20, "participants": []},
            "Chess Club": {"description": "d", "schedule": "s", "max_participants": 12, "participants": ["a@x.com"]},
            "Art Studio": {"description": "d", "schedule": "s", "max_participants": 15, "participants": []}
        }"#;
        let collection: ActivityCollection = serde_json::from_str(body).unwrap();
        let names: Vec<&str> = collection.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Programming Class", "Chess Club", "Art Studio"]);
        assert_eq!(collection.get("Chess Club").unwrap().participants, vec!["a@x.com"]);
    }

    #[test]
    fn repeated_key_overwrites_in_place() {
        let body = r#"{
            "A": {"description": "first", "schedule": "s", "max_participants": 1},
            "B": {"description": "b", "schedule": "s", "max_participants": 1},
            "A": {"description": "second", "schedule": "s", "max_participants": 1}
        }"#;
        let collection: ActivityCollection = serde_json::from_str(body).unwrap();
        assert_eq!(collection.len(), 2);
        let first = collection.iter().next().unwrap();
        assert_eq!(first.name, "A");
        assert_eq!(first.description, "second");
    }

    #[test]
    fn spots_left_goes_negative_when_over_enrolled() {
        let activity = Activity {
            name: "Tiny".into(),
            description: String::new(),
            schedule: String::new(),
            max_participants: 1,
            participants: vec!["a@x.com".into(), "b@x.com".into(), "c@x.com".into()],
        };
        assert_eq!(activity.spots_left(), -2);
    }

    #[test]
    fn spots_left_saturates_on_extreme_max() {
        let activity = Activity {
            name: "Broken".into(),
            description: String::new(),
            schedule: String::new(),
            max_participants: i64::MIN,
            participants: vec!["a@x.com".into()],
        };
        assert_eq!(activity.spots_left(), i64::MIN);
    }

    #[test]
    fn invalid_max_is_sent_as_null() {
        let body = serde_json::to_value(NewActivity {
            name: "Robotics".into(),
            description: "Build robots".into(),
            schedule: "Mondays".into(),
            max_participants: None,
        })
        .unwrap();
        assert_eq!(body["max_participants"], serde_json::Value::Null);
    }

    #[test]
    fn error_detail_from_string_and_validation_list() {
        let plain: ErrorBody = serde_json::from_value(json!({"detail": "Activity not found"})).unwrap();
        assert_eq!(plain.detail_text().as_deref(), Some("Activity not found"));

        let validation: ErrorBody = serde_json::from_value(json!({
            "detail": [
                {"loc": ["body", "max_participants"], "msg": "Input should be a valid integer", "type": "int_type"}
            ]
        }))
        .unwrap();
        assert_eq!(
            validation.detail_text().as_deref(),
            Some("Input should be a valid integer")
        );

        let missing: ErrorBody = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.detail_text(), None);
    }
}
