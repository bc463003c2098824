pub mod backend;
pub mod error;
pub mod memory;
pub mod types;

pub use backend::ActivityBackend;
pub use error::{ActivitiesError, Result};
pub use memory::{BackendCall, MemoryBackend};
pub use types::{
    ActionResponse, Activity, ActivityCollection, ActivityDetails, ActivitySummary,
    ActivityUpdate, ErrorBody, NewActivity,
};

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

pub struct ActivitiesClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ActivitiesClient {
    /// Client with no request timeout; only the OS connection timeout applies.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::build(base_url, reqwest::Client::builder())
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::build(base_url, reqwest::Client::builder().timeout(timeout))
    }

    fn build(base_url: &str, builder: reqwest::ClientBuilder) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ActivitiesError::Url(format!("{base_url} cannot be a base URL")));
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Join path segments onto the base URL. Each segment is percent-encoded
    /// on its own, so names containing `/`, `?` or spaces stay one segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ActivitiesError::Url(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetch every activity with its participants.
    pub async fn list_activities(&self) -> Result<ActivityCollection> {
        let url = self.endpoint(&["activities"])?;
        let resp = self.client.get(url).send().await?;
        let activities: ActivityCollection = read_json(resp).await?;
        tracing::debug!(count = activities.len(), "Fetched activities");
        Ok(activities)
    }

    pub async fn create_activity(&self, activity: &NewActivity) -> Result<ActionResponse> {
        let url = self.endpoint(&["admin", "activities"])?;
        tracing::info!(name = %activity.name, "Creating activity");
        let resp = self.client.post(url).json(activity).send().await?;
        read_json(resp).await
    }

    pub async fn update_activity(
        &self,
        name: &str,
        update: &ActivityUpdate,
    ) -> Result<ActionResponse> {
        let url = self.endpoint(&["admin", "activities", name])?;
        tracing::info!(name, "Updating activity");
        let resp = self.client.put(url).json(update).send().await?;
        read_json(resp).await
    }

    /// Delete an activity. The backend removes its participants with it.
    pub async fn delete_activity(&self, name: &str) -> Result<ActionResponse> {
        let url = self.endpoint(&["admin", "activities", name])?;
        tracing::info!(name, "Deleting activity");
        let resp = self.client.delete(url).send().await?;
        read_json(resp).await
    }

    /// Enroll a participant.
    pub async fn signup(&self, name: &str, email: &str) -> Result<ActionResponse> {
        let mut url = self.endpoint(&["activities", name, "signup"])?;
        url.query_pairs_mut().append_pair("email", email);
        tracing::info!(name, email, "Signing up participant");
        let resp = self.client.post(url).send().await?;
        read_json(resp).await
    }

    pub async fn unregister(&self, name: &str, email: &str) -> Result<ActionResponse> {
        let mut url = self.endpoint(&["activities", name, "unregister"])?;
        url.query_pairs_mut().append_pair("email", email);
        tracing::info!(name, email, "Unregistering participant");
        let resp = self.client.delete(url).send().await?;
        read_json(resp).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail_text());
        tracing::debug!(status = status.as_u16(), ?detail, "Backend rejected request");
        return Err(ActivitiesError::Api {
            status: status.as_u16(),
            detail,
        });
    }

    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_name_as_single_segment() {
        let client = ActivitiesClient::new("http://localhost:8000").unwrap();
        let url = client.endpoint(&["admin", "activities", "Chess Club"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/admin/activities/Chess%20Club");

        let url = client.endpoint(&["admin", "activities", "A/B?C#D"]).unwrap();
        assert_eq!(url.path(), "/admin/activities/A%2FB%3FC%23D");
    }

    #[test]
    fn endpoint_respects_base_path() {
        let client = ActivitiesClient::new("http://example.com/school/").unwrap();
        let url = client.endpoint(&["activities"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/school/activities");
    }

    #[test]
    fn rejects_non_base_url() {
        assert!(matches!(
            ActivitiesClient::new("mailto:admin@example.com"),
            Err(ActivitiesError::Url(_))
        ));
        assert!(matches!(
            ActivitiesClient::new("not a url"),
            Err(ActivitiesError::Url(_))
        ));
    }
}
