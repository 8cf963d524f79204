//! In-memory [`RaspSource`] and fixtures shared by the unit tests.

use super::client::{RaspSource, BUILDINGS_ENDPOINT, RASP_FULL_ENDPOINT};
use super::error::RaspError;
use super::types::{decode, Id, RawBuilding, RawRoomSchedule};
use std::cell::Cell;
use std::collections::HashMap;

pub const BUILDINGS_JSON: &str = r#"[
    {"id": 3, "title": "Ленсовета 14", "rooms": [
        {"id": 70, "title": "14-09"},
        {"id": 71, "title": "14-10"}
    ]},
    {"id": 5, "title": "Гастелло 15", "rooms": [
        {"id": 90, "title": "52-18"}
    ]},
    {"id": 8, "title": "Пустое здание", "rooms": null}
]"#;

/// Room 14-09. Monday:
/// - slot 1: every week
/// - slot 2: odd and even week lessons
/// - slot 3: odd week only
/// - slot 5: two parallel sections, every week
pub const ROOM_1409_JSON: &str = r#"{"days": [
    {"day": 1, "title": "Понедельник", "lessons": [
        {"less": 1, "begin": "9:30", "end": "11:00",
         "weekAll": [{"id": 1001, "type": "Л", "dics": "Высшая математика", "chairId": 41,
                      "groupsAisIds": [501, 502], "prepsAisIds": [901], "roomsIds": [70]}]},
        {"less": 2, "begin": "11:10", "end": "12:40",
         "week1": [{"id": 1002, "type": "ПР", "dics": "Физика", "chairId": 42,
                    "groupsAisIds": [501], "prepsAisIds": [902], "roomsIds": [70]}],
         "week2": [{"id": 1003, "type": "ЛР", "dics": "Химия", "chairId": 43,
                    "groupsAisIds": [502], "prepsAisIds": [903], "roomsIds": [70]}]},
        {"less": 3, "begin": "13:00", "end": "14:30",
         "week1": [{"id": 1004, "type": "Л", "dics": "Программирование", "chairId": 44,
                    "groupsAisIds": [503], "prepsAisIds": [904], "roomsIds": [70]}]},
        {"less": 5, "begin": "16:40", "end": "18:10",
         "weekAll": [{"id": 1005, "type": "ПР", "dics": "Английский язык", "chairId": 45,
                      "groupsAisIds": [504], "prepsAisIds": [905], "roomsIds": [70]},
                     {"id": 1006, "type": "ПР", "dics": "Немецкий язык", "chairId": 45,
                      "groupsAisIds": [504], "prepsAisIds": [906], "roomsIds": [70]}]}
    ]},
    {"day": 2, "title": "Вторник", "lessons": []},
    {"day": 3, "title": "Среда", "lessons": [
        {"less": 4, "begin": "15:00", "end": "16:30",
         "week2": [{"id": 1007, "type": "Л", "dics": "История", "chairId": 46,
                    "groupsAisIds": [505], "prepsAisIds": [907], "roomsIds": [70]}]}
    ]},
    {"day": 4, "title": "Четверг", "lessons": []},
    {"day": 5, "title": "Пятница", "lessons": []}
]}"#;

/// Serves fixed JSON bodies through the same decoding path as the HTTP client
/// and counts how often each endpoint was hit.
#[derive(Default)]
pub struct StaticSource {
    buildings: Option<String>,
    rooms: HashMap<Id, String>,
    fail_rooms: bool,
    building_fetches: Cell<usize>,
    room_fetches: Cell<usize>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self {
            buildings: Some(BUILDINGS_JSON.to_string()),
            ..Self::default()
        }
    }

    pub fn without_buildings(mut self) -> Self {
        self.buildings = None;
        self
    }

    pub fn with_room(mut self, id: Id, json: &str) -> Self {
        self.rooms.insert(id, json.to_string());
        self
    }

    pub fn failing_rooms(mut self) -> Self {
        self.fail_rooms = true;
        self
    }

    pub fn building_fetches(&self) -> usize {
        self.building_fetches.get()
    }

    pub fn room_fetches(&self) -> usize {
        self.room_fetches.get()
    }
}

impl RaspSource for StaticSource {
    async fn fetch_buildings(&self) -> Result<Vec<RawBuilding>, RaspError> {
        self.building_fetches.set(self.building_fetches.get() + 1);

        match &self.buildings {
            Some(body) => decode(BUILDINGS_ENDPOINT, body),
            None => Err(RaspError::Fetch {
                message: "connection refused".to_string(),
            }),
        }
    }

    async fn fetch_room_schedule(&self, room_id: &Id) -> Result<RawRoomSchedule, RaspError> {
        self.room_fetches.set(self.room_fetches.get() + 1);

        if self.fail_rooms {
            return Err(RaspError::Timeout {
                url: format!("{RASP_FULL_ENDPOINT}?roomId={room_id}"),
            });
        }

        match self.rooms.get(room_id) {
            Some(body) => decode(RASP_FULL_ENDPOINT, body),
            None => Err(RaspError::Status {
                status: 404,
                url: format!("{RASP_FULL_ENDPOINT}?roomId={room_id}"),
            }),
        }
    }
}
