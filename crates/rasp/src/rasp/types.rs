//! Wire types for the two timetable endpoints.
//!
//! These mirror the JSON exactly; [`loader`](super::loader) turns them into
//! the entity model.

use super::error::RaspError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// An identifier from the API.
///
/// The API sends integers, but nothing in the client does arithmetic on
/// them, so they are kept as text and strings are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for Id {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TextOrNumber::deserialize(deserializer).map(|v| Id(v.into_string()))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

impl TextOrNumber {
    fn into_string(self) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Int(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    TextOrNumber::deserialize(deserializer).map(TextOrNumber::into_string)
}

/// Treats `null` the same as a missing list.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One element of the `get-buildings` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBuilding {
    pub id: Id,
    pub title: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub rooms: Vec<RawRoom>,
}

/// Room stub nested in a building; carries no schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRoom {
    pub id: Id,
    pub title: String,
}

/// The `get-rasp-full` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRoomSchedule {
    pub days: Vec<RawDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDay {
    /// Day id (`day` on the wire)
    #[serde(rename = "day")]
    pub id: Id,
    pub title: String,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub lessons: Vec<RawSlot>,
}

/// A numbered slot of a day, with its occurrences split by week parity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSlot {
    #[serde(rename = "less")]
    pub number: u8,
    pub begin: String,
    pub end: String,
    #[serde(rename = "weekAll", default)]
    pub week_all: Option<Vec<RawOccurrence>>,
    #[serde(rename = "week1", default)]
    pub week_odd: Option<Vec<RawOccurrence>>,
    #[serde(rename = "week2", default)]
    pub week_even: Option<Vec<RawOccurrence>>,
}

/// A concrete lesson held in a slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOccurrence {
    pub id: Id,
    #[serde(rename = "type", deserialize_with = "text")]
    pub api_type: String,
    #[serde(rename = "dics")]
    pub discipline: String,
    #[serde(rename = "chairId", default)]
    pub chair_id: Option<Id>,
    #[serde(rename = "groupsAisIds", default, deserialize_with = "nullable_vec")]
    pub group_ids: Vec<Id>,
    #[serde(rename = "prepsAisIds", default, deserialize_with = "nullable_vec")]
    pub teacher_ids: Vec<Id>,
    #[serde(rename = "roomsIds", default, deserialize_with = "nullable_vec")]
    pub room_ids: Vec<Id>,
}

/// Decodes a response body, reporting schema violations as
/// [`RaspError::MalformedData`].
pub fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, RaspError> {
    serde_json::from_str(body).map_err(|e| RaspError::MalformedData {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}
