//! HTTP client for the timetable API.
//!
//! Only two read-only endpoints are used:
//! 1. `get-buildings` lists every building with its room stubs
//! 2. `get-rasp-full` returns the full week schedule of one room

use super::config::RaspConfig;
use super::error::RaspError;
use super::types::{decode, Id, RawBuilding, RawRoomSchedule};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

pub const BUILDINGS_ENDPOINT: &str = "get-buildings";
pub const RASP_FULL_ENDPOINT: &str = "get-rasp-full";

/// "No filter" value for the group/teacher/chair parameters of `get-rasp-full`.
const NO_FILTER: &str = "0";

/// Something that can produce the raw timetable data.
///
/// [`RaspClient`] talks to the real API; tests substitute an in-memory source.
#[allow(async_fn_in_trait)]
pub trait RaspSource {
    /// Fetches every building with its room stubs.
    async fn fetch_buildings(&self) -> Result<Vec<RawBuilding>, RaspError>;

    /// Fetches the full schedule of one room.
    async fn fetch_room_schedule(&self, room_id: &Id) -> Result<RawRoomSchedule, RaspError>;
}

impl<T: RaspSource + ?Sized> RaspSource for &T {
    async fn fetch_buildings(&self) -> Result<Vec<RawBuilding>, RaspError> {
        (**self).fetch_buildings().await
    }

    async fn fetch_room_schedule(&self, room_id: &Id) -> Result<RawRoomSchedule, RaspError> {
        (**self).fetch_room_schedule(room_id).await
    }
}

/// Client for GUAP's timetable API.
#[derive(Debug, Clone)]
pub struct RaspClient {
    client: Client,
    config: RaspConfig,
}

impl RaspClient {
    /// Creates a new client with default configuration.
    pub fn new() -> Result<Self, RaspError> {
        Self::with_config(RaspConfig::default())
    }

    /// Creates a new client with custom configuration.
    pub fn with_config(config: RaspConfig) -> Result<Self, RaspError> {
        // Validate the base URL up front so a typo fails here, not mid-query
        Url::parse(config.base_url())?;

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout())
            .timeout(config.timeout())
            .build()
            .map_err(|e| RaspError::Fetch {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RaspConfig {
        &self.config
    }

    fn buildings_url(&self) -> Result<Url, RaspError> {
        Ok(Url::parse(&format!(
            "{}/{}",
            self.config.base_url(),
            BUILDINGS_ENDPOINT
        ))?)
    }

    fn room_schedule_url(&self, room_id: &Id) -> Result<Url, RaspError> {
        Ok(Url::parse_with_params(
            &format!("{}/{}", self.config.base_url(), RASP_FULL_ENDPOINT),
            &[
                ("groupAisId", NO_FILTER),
                ("prepAisId", NO_FILTER),
                ("chairId", NO_FILTER),
                ("roomId", room_id.as_str()),
            ],
        )?)
    }

    /// Performs a GET and returns the body of a successful response.
    async fn get_text(&self, url: Url) -> Result<String, RaspError> {
        let start = Instant::now();
        debug!(url = %url, "Sending request");

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                url = %url,
                status = status.as_u16(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Request returned non-success status"
            );
            return Err(RaspError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(
            url = %url,
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        Ok(body)
    }
}

impl RaspSource for RaspClient {
    async fn fetch_buildings(&self) -> Result<Vec<RawBuilding>, RaspError> {
        let url = self.buildings_url()?;
        info!(url = %url, "Fetching buildings");

        let body = self.get_text(url).await?;
        decode(BUILDINGS_ENDPOINT, &body)
    }

    async fn fetch_room_schedule(&self, room_id: &Id) -> Result<RawRoomSchedule, RaspError> {
        let url = self.room_schedule_url(room_id)?;
        info!(room_id = %room_id, url = %url, "Fetching room schedule");

        let body = self.get_text(url).await?;
        decode(RASP_FULL_ENDPOINT, &body)
    }
}
