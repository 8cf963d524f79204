//! Error types for timetable lookups.

use thiserror::Error;

/// Errors that can occur while fetching or querying the timetable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RaspError {
    /// Network/HTTP request failed
    #[error("Network error: {message}")]
    Fetch { message: String },

    /// The request did not complete within the configured timeout
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Server answered with a non-2xx status
    #[error("Server returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body does not match the documented schema
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedData { endpoint: String, message: String },

    /// URL parsing/construction failed
    #[error("URL error: {message}")]
    Url { message: String },

    #[error("No building titled \"{title}\"")]
    BuildingNotFound { title: String },

    #[error("No room titled \"{title}\" in building \"{building}\"")]
    RoomNotFound { building: String, title: String },

    /// Not one of the six canonical weekday names
    #[error("\"{title}\" is not a weekday")]
    InvalidDay { title: String },

    /// A valid weekday that is missing from the room's loaded data
    #[error("Room \"{room}\" has no schedule for \"{title}\"")]
    DayNotFound { room: String, title: String },
}

impl RaspError {
    /// Returns true if the error came from talking to the API.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            RaspError::Fetch { .. } | RaspError::Timeout { .. } | RaspError::Status { .. }
        )
    }

    /// Returns true if re-running the whole query may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RaspError::Fetch { .. } | RaspError::Timeout { .. } => true,
            RaspError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the query named something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RaspError::BuildingNotFound { .. }
                | RaspError::RoomNotFound { .. }
                | RaspError::DayNotFound { .. }
        )
    }
}

impl From<reqwest::Error> for RaspError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return RaspError::Timeout {
                url: err
                    .url()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "<unknown>".to_string()),
            };
        }

        RaspError::Fetch {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for RaspError {
    fn from(err: url::ParseError) -> Self {
        RaspError::Url {
            message: err.to_string(),
        }
    }
}
