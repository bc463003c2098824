//! In-memory backend with the same rules as the real server. Used by tests
//! and anywhere a live API is not available.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::backend::ActivityBackend;
use crate::error::{ActivitiesError, Result};
use crate::types::{
    ActionResponse, Activity, ActivityCollection, ActivitySummary, ActivityUpdate, NewActivity,
};

/// A request the backend received, recorded for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    List,
    Create(NewActivity),
    Update { name: String, update: ActivityUpdate },
    Delete(String),
}

pub struct MemoryBackend {
    activities: Mutex<Vec<Activity>>,
    calls: Mutex<Vec<BackendCall>>,
    offline: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::with_activities(Vec::new())
    }

    pub fn with_activities(activities: Vec<Activity>) -> Self {
        Self {
            activities: Mutex::new(activities),
            calls: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// While offline every call fails with a network error, after being recorded.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        lock(&self.calls).clone()
    }

    pub fn activities(&self) -> Vec<Activity> {
        lock(&self.activities).clone()
    }

    /// Enroll directly, bypassing capacity checks. Stands in for the
    /// separate enrollment flow.
    pub fn enroll(&self, name: &str, email: &str) {
        if let Some(activity) = lock(&self.activities).iter_mut().find(|a| a.name == name) {
            activity.participants.push(email.to_string());
        }
    }

    fn record(&self, call: BackendCall) -> Result<()> {
        lock(&self.calls).push(call);
        if self.offline.load(Ordering::SeqCst) {
            return Err(ActivitiesError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn rejected(status: u16, detail: &str) -> ActivitiesError {
    ActivitiesError::Api {
        status,
        detail: Some(detail.to_string()),
    }
}

fn summary(activity: &Activity) -> ActivitySummary {
    ActivitySummary {
        name: activity.name.clone(),
        description: activity.description.clone(),
        schedule: activity.schedule.clone(),
        max_participants: activity.max_participants,
    }
}

#[async_trait]
impl ActivityBackend for MemoryBackend {
    async fn list_activities(&self) -> Result<ActivityCollection> {
        self.record(BackendCall::List)?;
        Ok(ActivityCollection::new(self.activities()))
    }

    async fn create_activity(&self, activity: &NewActivity) -> Result<ActionResponse> {
        self.record(BackendCall::Create(activity.clone()))?;
        let Some(max_participants) = activity.max_participants else {
            return Err(rejected(422, "Input should be a valid integer"));
        };

        let mut activities = lock(&self.activities);
        if activities.iter().any(|a| a.name == activity.name) {
            return Err(rejected(400, "Activity with this name already exists"));
        }
        let created = Activity {
            name: activity.name.clone(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            max_participants,
            participants: Vec::new(),
        };
        let response = ActionResponse {
            message: "Activity created successfully".to_string(),
            activity: Some(summary(&created)),
        };
        activities.push(created);
        Ok(response)
    }

    async fn update_activity(
        &self,
        name: &str,
        update: &ActivityUpdate,
    ) -> Result<ActionResponse> {
        self.record(BackendCall::Update {
            name: name.to_string(),
            update: update.clone(),
        })?;

        let mut activities = lock(&self.activities);
        let activity = activities
            .iter_mut()
            .find(|a| a.name == name)
            .ok_or_else(|| rejected(404, "Activity not found"))?;
        if let Some(description) = &update.description {
            activity.description = description.clone();
        }
        if let Some(schedule) = &update.schedule {
            activity.schedule = schedule.clone();
        }
        if let Some(max) = update.max_participants {
            activity.max_participants = max;
        }
        Ok(ActionResponse {
            message: "Activity updated successfully".to_string(),
            activity: Some(summary(activity)),
        })
    }

    async fn delete_activity(&self, name: &str) -> Result<ActionResponse> {
        self.record(BackendCall::Delete(name.to_string()))?;

        let mut activities = lock(&self.activities);
        let before = activities.len();
        activities.retain(|a| a.name != name);
        if activities.len() == before {
            return Err(rejected(404, "Activity not found"));
        }
        Ok(ActionResponse {
            message: format!("Activity '{name}' deleted successfully"),
            activity: None,
        })
    }
}
