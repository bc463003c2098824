//! The admin surface of the activities API as a trait, so callers can run
//! against the HTTP client or an in-memory store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ActionResponse, ActivityCollection, ActivityUpdate, NewActivity};
use crate::ActivitiesClient;

#[async_trait]
pub trait ActivityBackend: Send + Sync {
    async fn list_activities(&self) -> Result<ActivityCollection>;

    async fn create_activity(&self, activity: &NewActivity) -> Result<ActionResponse>;

    async fn update_activity(&self, name: &str, update: &ActivityUpdate)
        -> Result<ActionResponse>;

    async fn delete_activity(&self, name: &str) -> Result<ActionResponse>;
}

#[async_trait]
impl ActivityBackend for ActivitiesClient {
    async fn list_activities(&self) -> Result<ActivityCollection> {
        ActivitiesClient::list_activities(self).await
    }

    async fn create_activity(&self, activity: &NewActivity) -> Result<ActionResponse> {
        ActivitiesClient::create_activity(self, activity).await
    }

    async fn update_activity(
        &self,
        name: &str,
        update: &ActivityUpdate,
    ) -> Result<ActionResponse> {
        ActivitiesClient::update_activity(self, name, update).await
    }

    async fn delete_activity(&self, name: &str) -> Result<ActionResponse> {
        ActivitiesClient::delete_activity(self, name).await
    }
}

/// Shared backends, so tests can keep a handle for assertions.
#[async_trait]
impl<B: ActivityBackend + ?Sized> ActivityBackend for Arc<B> {
    async fn list_activities(&self) -> Result<ActivityCollection> {
        (**self).list_activities().await
    }

    async fn create_activity(&self, activity: &NewActivity) -> Result<ActionResponse> {
        (**self).create_activity(activity).await
    }

    async fn update_activity(
        &self,
        name: &str,
        update: &ActivityUpdate,
    ) -> Result<ActionResponse> {
        (**self).update_activity(name, update).await
    }

    async fn delete_activity(&self, name: &str) -> Result<ActionResponse> {
        (**self).delete_activity(name).await
    }
}
