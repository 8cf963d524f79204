//! GUAP timetable client: entity model, loader and room occupancy queries.

mod client;
mod config;
mod error;
mod loader;
mod model;
mod search;
mod types;

#[cfg(test)]
mod testing;

pub use client::{RaspClient, RaspSource, BUILDINGS_ENDPOINT, RASP_FULL_ENDPOINT};
pub use config::{RaspConfig, ENV_BASE_URL, ENV_TIMEOUT_SECS, RASP_BASE_URL};
pub use error::RaspError;
pub use loader::{build_days, group_by_slot};
pub use model::{Building, Day, Lesson, LoadState, Room, Schedule, Week, Weekday};
pub use search::{
    BuildingSelected, DaySelected, Occupancy, OccupancyReason, RoomSelected, Search, SlotSelected,
};
pub use types::{decode, Id, RawBuilding, RawDay, RawOccurrence, RawRoom, RawRoomSchedule, RawSlot};
