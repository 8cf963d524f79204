//! Entity model for a loaded timetable, with the lookups over it.

use super::error::RaspError;
use super::types::Id;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which weeks a lesson runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Week {
    /// Every week (`weekAll`)
    All,
    /// Odd, or "upper", weeks only (`week1`)
    Odd,
    /// Even, or "lower", weeks only (`week2`)
    Even,
}

impl Week {
    /// Returns true if a lesson tagged with `self` takes place in a week of
    /// the given parity.
    pub fn occurs_in(self, parity: Week) -> bool {
        match (self, parity) {
            (Week::All, _) | (_, Week::All) => true,
            (a, b) => a == b,
        }
    }
}

/// The six canonical weekday names used by the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Title as it appears in the API.
    pub fn title(self) -> &'static str {
        match self {
            Weekday::Monday => "Понедельник",
            Weekday::Tuesday => "Вторник",
            Weekday::Wednesday => "Среда",
            Weekday::Thursday => "Четверг",
            Weekday::Friday => "Пятница",
            Weekday::Saturday => "Суббота",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Weekday {
    type Err = RaspError;

    fn from_str(title: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.title() == title)
            .ok_or_else(|| RaspError::InvalidDay {
                title: title.to_string(),
            })
    }
}

/// Whether a room's schedule has been fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loaded,
    /// The last fetch failed; `days` is empty
    FetchFailed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lesson {
    pub id: Id,
    /// Slot number within the day
    pub number: u8,
    pub week: Week,
    pub begin: String,
    pub end: String,
    pub discipline: String,
    pub chair_id: Option<Id>,
    pub group_ids: Vec<Id>,
    pub teacher_ids: Vec<Id>,
    pub room_ids: Vec<Id>,
    /// Lesson category as sent by the API
    pub api_type: String,
    /// Always true for lessons built from fetched data
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Day {
    pub id: Id,
    pub title: String,
    /// Lessons grouped by slot, slots in the order the API listed them
    pub lessons: Vec<Lesson>,
}

impl Day {
    /// The canonical weekday this day stands for, if any.
    pub fn weekday(&self) -> Option<Weekday> {
        self.title.parse().ok()
    }

    /// All lessons held in slot `number`. Parallel sections share a slot, so
    /// this may return more than one lesson.
    pub fn lessons_by_number(&self, number: u8) -> Vec<&Lesson> {
        self.lessons.iter().filter(|l| l.number == number).collect()
    }

    /// All lessons tagged with exactly `week`.
    pub fn lessons_by_week(&self, week: Week) -> Vec<&Lesson> {
        self.lessons.iter().filter(|l| l.week == week).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: Id,
    pub title: String,
    pub state: LoadState,
    pub days: Vec<Day>,
}

impl Room {
    /// Creates a room stub with no schedule.
    pub fn new(id: Id, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            state: LoadState::NotLoaded,
            days: Vec::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Finds the day with the given title.
    ///
    /// The title is checked against the canonical weekday names before any
    /// day is looked at.
    pub fn day_by_title(&self, title: &str) -> Result<&Day, RaspError> {
        let weekday: Weekday = title.parse()?;

        self.days
            .iter()
            .find(|day| day.title == weekday.title())
            .ok_or_else(|| RaspError::DayNotFound {
                room: self.title.clone(),
                title: title.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Building {
    pub id: Id,
    pub title: String,
    pub rooms: Vec<Room>,
}

impl Building {
    pub fn room_by_id(&self, id: &Id) -> Option<&Room> {
        self.rooms.iter().find(|room| &room.id == id)
    }

    pub fn room_by_title(&self, title: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.title == title)
    }

    pub(crate) fn room_index_by_title(&self, title: &str) -> Option<usize> {
        self.rooms.iter().position(|room| room.title == title)
    }
}

/// Root of the timetable: every building with its room stubs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    pub buildings: Vec<Building>,
    pub loaded: bool,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn building_by_id(&self, id: &Id) -> Option<&Building> {
        self.buildings.iter().find(|b| &b.id == id)
    }

    pub fn building_by_title(&self, title: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.title == title)
    }

    pub(crate) fn building_index_by_title(&self, title: &str) -> Option<usize> {
        self.buildings.iter().position(|b| b.title == title)
    }
}
