use thiserror::Error;

pub type Result<T> = std::result::Result<T, ActivitiesError>;

#[derive(Debug, Error)]
pub enum ActivitiesError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Api {
        status: u16,
        detail: Option<String>,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    Url(String),
}

impl ActivitiesError {
    /// The `detail` the backend attached to a rejected request, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ActivitiesError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// True when the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        matches!(self, ActivitiesError::Network(_))
    }
}

impl From<reqwest::Error> for ActivitiesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ActivitiesError::Parse(err.to_string())
        } else {
            ActivitiesError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ActivitiesError {
    fn from(err: serde_json::Error) -> Self {
        ActivitiesError::Parse(err.to_string())
    }
}

impl From<url::ParseError> for ActivitiesError {
    fn from(err: url::ParseError) -> Self {
        ActivitiesError::Url(err.to_string())
    }
}
