//! Fluent query chain answering "is this room free?".
//!
//! Each step consumes or borrows the previous one, so the chain can only move
//! forward:
//!
//! ```text
//! Search -> BuildingSelected -> RoomSelected -> DaySelected -> SlotSelected
//! ```
//!
//! `RoomSelected` owns the loaded room; days and slots borrow from it, so one
//! room fetch serves any number of day/slot probes.

use super::client::RaspSource;
use super::error::RaspError;
use super::model::{Building, Day, Lesson, Room, Schedule, Week};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Why a slot is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OccupancyReason {
    /// A lesson runs every week
    Always,
    /// A lesson runs on odd ("upper") weeks
    OddWeek,
    /// A lesson runs on even ("lower") weeks
    EvenWeek,
}

impl OccupancyReason {
    pub fn week(self) -> Week {
        match self {
            OccupancyReason::Always => Week::All,
            OccupancyReason::OddWeek => Week::Odd,
            OccupancyReason::EvenWeek => Week::Even,
        }
    }
}

impl From<Week> for OccupancyReason {
    fn from(week: Week) -> Self {
        match week {
            Week::All => OccupancyReason::Always,
            Week::Odd => OccupancyReason::OddWeek,
            Week::Even => OccupancyReason::EvenWeek,
        }
    }
}

impl fmt::Display for OccupancyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OccupancyReason::Always => "Аудитория всегда занята",
            OccupancyReason::OddWeek => "Аудитория занята на верхней неделе",
            OccupancyReason::EvenWeek => "Аудитория занята на нижней неделе",
        })
    }
}

/// Verdict for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Occupancy {
    Free,
    /// Reasons of every lesson in the slot, deduplicated, first seen first
    Occupied(Vec<OccupancyReason>),
}

impl Occupancy {
    pub fn from_lessons<'a>(lessons: impl IntoIterator<Item = &'a Lesson>) -> Self {
        let mut reasons = Vec::new();
        for lesson in lessons {
            let reason = OccupancyReason::from(lesson.week);
            if !reasons.contains(&reason) {
                reasons.push(reason);
            }
        }

        if reasons.is_empty() {
            Occupancy::Free
        } else {
            Occupancy::Occupied(reasons)
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Occupancy::Free)
    }

    /// Returns true if nothing is held in the slot during a week of the given
    /// parity. `Week::All` asks whether the slot is free every week.
    pub fn is_free_on(&self, parity: Week) -> bool {
        self.reasons()
            .iter()
            .all(|reason| !reason.week().occurs_in(parity))
    }

    pub fn reasons(&self) -> &[OccupancyReason] {
        match self {
            Occupancy::Free => &[],
            Occupancy::Occupied(reasons) => reasons,
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupancy::Free => f.write_str("Аудитория свободна"),
            Occupancy::Occupied(reasons) => {
                for (i, reason) in reasons.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{reason}")?;
                }
                Ok(())
            }
        }
    }
}

/// Start of a query.
pub struct Search<S> {
    source: S,
    schedule: Schedule,
}

impl<S: RaspSource> Search<S> {
    /// Starts a query with an empty schedule; buildings are fetched on the
    /// first building selection.
    pub fn new(source: S) -> Self {
        Self::with_schedule(source, Schedule::new())
    }

    /// Starts a query from a schedule that may already be loaded.
    pub fn with_schedule(source: S, schedule: Schedule) -> Self {
        Self { source, schedule }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Loads the buildings if needed and selects one by title.
    pub async fn select_building(mut self, title: &str) -> Result<BuildingSelected<S>, RaspError> {
        self.schedule.load(&self.source).await?;

        let building = self
            .schedule
            .building_index_by_title(title)
            .ok_or_else(|| RaspError::BuildingNotFound {
                title: title.to_string(),
            })?;

        info!(building = %title, "Building selected");
        Ok(BuildingSelected {
            source: self.source,
            schedule: self.schedule,
            building,
        })
    }
}

/// A query narrowed down to one building.
pub struct BuildingSelected<S> {
    source: S,
    schedule: Schedule,
    building: usize,
}

impl<S: RaspSource> BuildingSelected<S> {
    pub fn building(&self) -> &Building {
        &self.schedule.buildings[self.building]
    }

    /// Selects a room of the building by title and fetches its schedule.
    pub async fn select_room(mut self, title: &str) -> Result<RoomSelected, RaspError> {
        let building = &mut self.schedule.buildings[self.building];
        let room = building
            .room_index_by_title(title)
            .ok_or_else(|| RaspError::RoomNotFound {
                building: building.title.clone(),
                title: title.to_string(),
            })?;

        building.rooms[room].load(&self.source).await?;

        info!(building = %building.title, room = %title, "Room selected");
        Ok(RoomSelected {
            schedule: self.schedule,
            building: self.building,
            room,
        })
    }
}

/// A query narrowed down to one loaded room.
#[derive(Debug, Clone)]
pub struct RoomSelected {
    schedule: Schedule,
    building: usize,
    room: usize,
}

impl RoomSelected {
    pub fn building(&self) -> &Building {
        &self.schedule.buildings[self.building]
    }

    pub fn room(&self) -> &Room {
        &self.building().rooms[self.room]
    }

    /// Selects one of the six weekdays by title.
    pub fn select_day(&self, title: &str) -> Result<DaySelected<'_>, RaspError> {
        let room = self.room();
        let day = room.day_by_title(title)?;

        info!(room = %room.title, day = %title, "Day selected");
        Ok(DaySelected { room, day })
    }

    /// Gives back the schedule, including the room loaded by this query.
    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }
}

/// A query narrowed down to one day of a room.
#[derive(Debug, Clone, Copy)]
pub struct DaySelected<'a> {
    room: &'a Room,
    day: &'a Day,
}

impl<'a> DaySelected<'a> {
    pub fn room(&self) -> &'a Room {
        self.room
    }

    pub fn day(&self) -> &'a Day {
        self.day
    }

    /// Selects every lesson held in slot `number`. No lessons means the room
    /// is free then.
    pub fn select_slot(&self, number: u8) -> SlotSelected<'a> {
        let lessons = self.day.lessons_by_number(number);

        debug!(day = %self.day.title, slot = number, lessons = lessons.len(), "Slot selected");
        SlotSelected {
            day: self.day,
            number,
            lessons,
        }
    }
}

/// The lessons of one slot.
#[derive(Debug, Clone)]
pub struct SlotSelected<'a> {
    day: &'a Day,
    number: u8,
    lessons: Vec<&'a Lesson>,
}

impl<'a> SlotSelected<'a> {
    pub fn day(&self) -> &'a Day {
        self.day
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn lessons(&self) -> &[&'a Lesson] {
        &self.lessons
    }

    pub fn evaluate_occupancy(&self) -> Occupancy {
        Occupancy::from_lessons(self.lessons.iter().copied())
    }
}
