//! Populates the entity model from the API.

use super::client::RaspSource;
use super::error::RaspError;
use super::model::{Building, Day, LoadState, Lesson, Room, Schedule, Week};
use super::types::{RawBuilding, RawDay, RawOccurrence, RawRoomSchedule, RawSlot};
use tracing::{debug, error, info};

impl Schedule {
    /// Fetches every building with its room stubs.
    ///
    /// Does nothing if the schedule is already loaded, so buildings are never
    /// duplicated.
    pub async fn load<S: RaspSource>(&mut self, source: &S) -> Result<(), RaspError> {
        if self.loaded {
            debug!(buildings = self.buildings.len(), "Schedule already loaded");
            return Ok(());
        }

        let raw = source.fetch_buildings().await?;
        self.buildings = raw.into_iter().map(Building::from).collect();
        self.loaded = true;

        info!(
            buildings = self.buildings.len(),
            rooms = self.buildings.iter().map(|b| b.rooms.len()).sum::<usize>(),
            "Loaded buildings"
        );
        Ok(())
    }
}

impl Room {
    /// Fetches this room's schedule, replacing whatever was loaded before.
    ///
    /// On failure the room is left with no days and
    /// [`LoadState::FetchFailed`].
    pub async fn load<S: RaspSource>(&mut self, source: &S) -> Result<(), RaspError> {
        match source.fetch_room_schedule(&self.id).await {
            Ok(raw) => {
                self.days = build_days(raw);
                self.state = LoadState::Loaded;
                info!(
                    room = %self.title,
                    days = self.days.len(),
                    lessons = self.days.iter().map(|d| d.lessons.len()).sum::<usize>(),
                    "Loaded room schedule"
                );
                Ok(())
            }
            Err(e) => {
                self.days.clear();
                self.state = LoadState::FetchFailed;
                error!(room = %self.title, room_id = %self.id, error = %e, "Room schedule fetch failed");
                Err(e)
            }
        }
    }
}

impl From<RawBuilding> for Building {
    fn from(raw: RawBuilding) -> Self {
        Building {
            id: raw.id,
            title: raw.title,
            rooms: raw
                .rooms
                .into_iter()
                .map(|room| Room::new(room.id, room.title))
                .collect(),
        }
    }
}

/// Converts a `get-rasp-full` response into days.
pub fn build_days(raw: RawRoomSchedule) -> Vec<Day> {
    raw.days.into_iter().map(build_day).collect()
}

fn build_day(raw: RawDay) -> Day {
    let lessons = raw.lessons.into_iter().flat_map(expand_slot).collect();

    Day {
        id: raw.id,
        title: raw.title,
        lessons: group_by_slot(lessons),
    }
}

/// Turns one slot record into a lesson per occurrence, week keys in the
/// order `weekAll`, `week1`, `week2`.
fn expand_slot(slot: RawSlot) -> Vec<Lesson> {
    let RawSlot {
        number,
        begin,
        end,
        week_all,
        week_odd,
        week_even,
    } = slot;

    [(Week::All, week_all), (Week::Odd, week_odd), (Week::Even, week_even)]
        .into_iter()
        .filter_map(|(week, occurrences)| occurrences.map(|o| (week, o)))
        .flat_map(|(week, occurrences)| {
            occurrences
                .into_iter()
                .map(move |occurrence| (week, occurrence))
        })
        .map(|(week, occurrence)| lesson_from(number, week, &begin, &end, occurrence))
        .collect()
}

fn lesson_from(number: u8, week: Week, begin: &str, end: &str, raw: RawOccurrence) -> Lesson {
    Lesson {
        id: raw.id,
        number,
        week,
        begin: begin.to_string(),
        end: end.to_string(),
        discipline: raw.discipline,
        chair_id: raw.chair_id,
        group_ids: raw.group_ids,
        teacher_ids: raw.teacher_ids,
        room_ids: raw.room_ids,
        api_type: raw.api_type,
        exists: true,
    }
}

/// Groups lessons by slot number.
///
/// Slots keep the order in which their number was first seen (not numeric
/// order), and lessons of one slot become contiguous.
pub fn group_by_slot(lessons: Vec<Lesson>) -> Vec<Lesson> {
    let mut groups: Vec<(u8, Vec<Lesson>)> = Vec::new();

    for lesson in lessons {
        match groups.iter_mut().find(|(number, _)| *number == lesson.number) {
            Some((_, group)) => group.push(lesson),
            None => groups.push((lesson.number, vec![lesson])),
        }
    }

    groups.into_iter().flat_map(|(_, group)| group).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasp::testing::{StaticSource, BUILDINGS_JSON, ROOM_1409_JSON};
    use crate::rasp::types::{decode, Id};

    fn raw_schedule(json: &str) -> RawRoomSchedule {
        decode("get-rasp-full", json).unwrap()
    }

    #[test]
    fn test_slots_keep_first_seen_order() {
        let days = build_days(raw_schedule(
            r#"{"days": [{"day": 1, "title": "Понедельник", "lessons": [
                {"less": 2, "begin": "11:10", "end": "12:40",
                 "week1": [{"id": "2a", "type": "Л", "dics": "Физика"}]},
                {"less": 1, "begin": "9:30", "end": "11:00",
                 "weekAll": [{"id": "1a", "type": "ПР", "dics": "Химия"}]},
                {"less": 2, "begin": "11:10", "end": "12:40",
                 "week2": [{"id": "2b", "type": "ЛР", "dics": "Информатика"}]}
            ]}]}"#,
        ));

        let ids: Vec<&str> = days[0].lessons.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["2a", "2b", "1a"]);

        let weeks: Vec<Week> = days[0].lessons.iter().map(|l| l.week).collect();
        assert_eq!(weeks, vec![Week::Odd, Week::Even, Week::All]);
    }

    #[test]
    fn test_slot_fields_are_shared_by_occurrences() {
        let days = build_days(raw_schedule(
            r#"{"days": [{"day": 3, "title": "Среда", "lessons": [
                {"less": 4, "begin": "15:00", "end": "16:30",
                 "weekAll": [{"id": 1, "type": "Л", "dics": "Физика", "chairId": 12,
                              "groupsAisIds": [100], "prepsAisIds": [200], "roomsIds": [300]}],
                 "week1": [{"id": 2, "type": "ПР", "dics": "Химия"},
                           {"id": 3, "type": "ПР", "dics": "Химия"}]}
            ]}]}"#,
        ));

        let lessons = &days[0].lessons;
        assert_eq!(lessons.len(), 3);
        assert!(lessons
            .iter()
            .all(|l| l.number == 4 && l.begin == "15:00" && l.end == "16:30" && l.exists));
        assert_eq!(lessons[0].chair_id, Some(Id::from(12)));
        assert_eq!(lessons[0].group_ids, vec![Id::from(100)]);
        assert_eq!(lessons[0].teacher_ids, vec![Id::from(200)]);
        assert_eq!(lessons[0].room_ids, vec![Id::from(300)]);
        assert_eq!(lessons[1].week, Week::Odd);
        assert_eq!(lessons[2].id, Id::from(3));
    }

    #[test]
    fn test_empty_slots_produce_no_lessons() {
        let days = build_days(raw_schedule(
            r#"{"days": [
                {"day": 5, "title": "Пятница", "lessons": [{"less": 1, "begin": "9:30", "end": "11:00"}]},
                {"day": 6, "title": "Суббота", "lessons": null}
            ]}"#,
        ));

        assert_eq!(days.len(), 2);
        assert!(days.iter().all(|d| d.lessons.is_empty()));
    }

    #[tokio::test]
    async fn test_schedule_load_is_not_repeated() {
        let source = StaticSource::new();
        let mut schedule = Schedule::new();

        schedule.load(&source).await.unwrap();
        schedule.load(&source).await.unwrap();

        assert!(schedule.loaded);
        assert_eq!(source.building_fetches(), 1);
        assert_eq!(
            schedule.buildings.len(),
            decode::<Vec<RawBuilding>>("get-buildings", BUILDINGS_JSON).unwrap().len()
        );

        let building = schedule.building_by_title("Ленсовета 14").unwrap();
        assert!(building.rooms.iter().all(|r| r.state == LoadState::NotLoaded));
    }

    #[tokio::test]
    async fn test_room_reload_is_structurally_identical() {
        let source = StaticSource::new().with_room(Id::from(70), ROOM_1409_JSON);
        let mut room = Room::new(Id::from(70), "14-09");

        room.load(&source).await.unwrap();
        let first = room.days.clone();
        room.load(&source).await.unwrap();

        assert!(room.is_loaded());
        assert_eq!(room.days, first);
        assert_eq!(source.room_fetches(), 2);
    }

    #[tokio::test]
    async fn test_failed_room_fetch() {
        let source = StaticSource::new().with_room(Id::from(70), ROOM_1409_JSON);
        let mut room = Room::new(Id::from(70), "14-09");
        room.load(&source).await.unwrap();
        assert!(!room.days.is_empty());

        let failing = StaticSource::new().failing_rooms();
        let err = room.load(&failing).await.unwrap_err();

        assert!(err.is_fetch_error());
        assert_eq!(room.state, LoadState::FetchFailed);
        assert!(room.days.is_empty());
    }

    #[tokio::test]
    async fn test_empty_schedule_is_loaded() {
        let source = StaticSource::new().with_room(Id::from(71), r#"{"days": []}"#);
        let mut room = Room::new(Id::from(71), "14-10");

        room.load(&source).await.unwrap();

        assert_eq!(room.state, LoadState::Loaded);
        assert!(room.days.is_empty());
    }
}
