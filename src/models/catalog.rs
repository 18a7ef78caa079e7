//! The static catalog shared by every schedule of a run.

use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;

use super::assignment::{Assignment, Session};
use super::record::{AssignmentRecord, ScheduleRecord};
use super::room::Room;
use super::schedule::Schedule;
use super::subject::{ClassType, Subject};
use super::time_slot::{clock, Day, TimeSlot};
use crate::error::{CatalogError, ImportError};

/// Subjects, rooms and time slots available to a run.
///
/// Built once and then only read. Every random draw made by the search
/// engines and the correction module picks from these collections, so a
/// validated catalog guarantees those draws never come up empty.
#[derive(Debug, Clone)]
pub struct Catalog {
    subjects: Vec<Arc<Subject>>,
    rooms: Vec<Arc<Room>>,
    time_slots: Vec<TimeSlot>,
    sessions: Vec<Session>,
}

impl Catalog {
    /// Validates and freezes the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if there are no rooms or no time slots, or
    /// if any class type has no eligible teachers or no class groups.
    pub fn new(
        subjects: Vec<Subject>,
        rooms: Vec<Room>,
        time_slots: Vec<TimeSlot>,
    ) -> Result<Self, CatalogError> {
        if rooms.is_empty() {
            return Err(CatalogError::NoRooms);
        }
        if time_slots.is_empty() {
            return Err(CatalogError::NoTimeSlots);
        }
        for subject in &subjects {
            for ct in &subject.class_types {
                if ct.teachers.is_empty() {
                    return Err(CatalogError::NoTeachers {
                        subject: subject.name.clone(),
                        format: ct.format,
                    });
                }
                if ct.classes.is_empty() {
                    return Err(CatalogError::NoClasses {
                        subject: subject.name.clone(),
                        format: ct.format,
                    });
                }
            }
        }

        let subjects: Vec<Arc<Subject>> = subjects.into_iter().map(Arc::new).collect();
        let sessions = session_plan(&subjects);

        Ok(Self {
            subjects,
            rooms: rooms.into_iter().map(Arc::new).collect(),
            time_slots,
            sessions,
        })
    }

    pub fn subjects(&self) -> &[Arc<Subject>] {
        &self.subjects
    }

    pub fn rooms(&self) -> &[Arc<Room>] {
        &self.rooms
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    /// Every session a complete timetable must schedule, in a fixed order:
    /// subject, class type, class group, then one entry per weekly session.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn random_teacher<R: Rng>(&self, class_type: &ClassType, rng: &mut R) -> Arc<str> {
        class_type.teachers[rng.random_range(0..class_type.teachers.len())].clone()
    }

    pub fn random_room<R: Rng>(&self, rng: &mut R) -> Arc<Room> {
        self.rooms[rng.random_range(0..self.rooms.len())].clone()
    }

    pub fn random_slot<R: Rng>(&self, rng: &mut R) -> TimeSlot {
        self.time_slots[rng.random_range(0..self.time_slots.len())]
    }

    /// Binds `session` to a uniformly drawn eligible teacher, room and slot.
    pub fn random_assignment<R: Rng>(&self, session: Session, rng: &mut R) -> Assignment {
        let teacher = self.random_teacher(session.class_type(), rng);
        let room = self.random_room(rng);
        let slot = self.random_slot(rng);
        Assignment::new(session, teacher, room, slot)
    }

    /// Converts a schedule into its by-name record.
    pub fn export(&self, schedule: &Schedule) -> ScheduleRecord {
        let assignments = schedule
            .assignments
            .iter()
            .map(|a| AssignmentRecord {
                subject: a.subject().name.clone(),
                department: a.subject().department.clone(),
                format: a.class_type().format,
                class: a.class().name.clone(),
                teacher: a.teacher.to_string(),
                room: a.room.name.clone(),
                room_department: a.room.department.clone(),
                day: a.time_slot.day(),
                start: a.time_slot.start(),
                end: a.time_slot.end(),
            })
            .collect();

        ScheduleRecord {
            assignments,
            fitness: schedule.fitness,
        }
    }

    /// Resolves a record against this catalog.
    ///
    /// The teacher of each assignment must be known to the catalog (eligible
    /// for some class type) but need not be eligible for its own class type;
    /// that is scored as a violation, not rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError`] on the first reference that does not resolve.
    pub fn import(&self, record: &ScheduleRecord) -> Result<Schedule, ImportError> {
        let teachers: HashSet<Arc<str>> = self
            .subjects
            .iter()
            .flat_map(|s| s.class_types.iter())
            .flat_map(|ct| ct.teachers.iter().cloned())
            .collect();

        let mut assignments = Vec::with_capacity(record.assignments.len());
        for r in &record.assignments {
            let subject = self
                .subjects
                .iter()
                .find(|s| s.name == r.subject && s.department == r.department)
                .ok_or_else(|| ImportError::UnknownSubject(r.subject.clone()))?;

            let (ct_index, class_type) =
                subject
                    .class_type(r.format)
                    .ok_or_else(|| ImportError::UnknownClassType {
                        subject: r.subject.clone(),
                        format: r.format,
                    })?;

            let class_index = class_type
                .classes
                .iter()
                .position(|c| c.name == r.class)
                .ok_or_else(|| ImportError::UnknownClass {
                    subject: r.subject.clone(),
                    class: r.class.clone(),
                })?;

            let teacher = teachers
                .get(r.teacher.as_str())
                .cloned()
                .ok_or_else(|| ImportError::UnknownTeacher(r.teacher.clone()))?;

            let room = self
                .rooms
                .iter()
                .find(|room| room.name == r.room && room.department == r.room_department)
                .cloned()
                .ok_or_else(|| ImportError::UnknownRoom(r.room.clone()))?;

            let slot = self
                .time_slots
                .iter()
                .find(|s| s.day() == r.day && s.start() == r.start && s.end() == r.end)
                .copied()
                .ok_or_else(|| {
                    ImportError::UnknownTimeSlot(format!(
                        "{} {:02}:{:02}-{:02}:{:02}",
                        r.day.abbreviation(),
                        r.start / 60,
                        r.start % 60,
                        r.end / 60,
                        r.end % 60
                    ))
                })?;

            // Indices were resolved against this subject, so the session is valid.
            let session = Session::new(Arc::clone(subject), ct_index, class_index).ok_or_else(
                || ImportError::UnknownClass {
                    subject: r.subject.clone(),
                    class: r.class.clone(),
                },
            )?;
            assignments.push(Assignment::new(session, teacher, room, slot));
        }

        Ok(Schedule::with_fitness(assignments, record.fitness))
    }
}

fn session_plan(subjects: &[Arc<Subject>]) -> Vec<Session> {
    let mut sessions = Vec::new();
    for subject in subjects {
        for (ct_index, ct) in subject.class_types.iter().enumerate() {
            for class_index in 0..ct.classes.len() {
                for _ in 0..ct.sessions_per_week {
                    if let Some(session) = Session::new(Arc::clone(subject), ct_index, class_index)
                    {
                        sessions.push(session);
                    }
                }
            }
        }
    }
    sessions
}

/// Builds back-to-back slots of `length` minutes on each day, from `first`
/// up to `last` (minutes since midnight).
///
/// # Errors
///
/// Returns [`CatalogError::InvalidTimeSlot`] if `length` is zero, the range
/// cannot hold one slot, or `last` is past midnight.
pub fn slot_grid(
    days: &[Day],
    first: u16,
    last: u16,
    length: u16,
) -> Result<Vec<TimeSlot>, CatalogError> {
    let invalid = CatalogError::InvalidTimeSlot {
        start: first,
        end: last,
    };
    if length == 0 || last > clock(24, 0) || first.saturating_add(length) > last {
        return Err(invalid);
    }

    let mut slots = Vec::new();
    for &day in days {
        let mut start = first;
        while start + length <= last {
            let slot = TimeSlot::new(day, start, start + length).ok_or_else(|| invalid.clone())?;
            slots.push(slot);
            start += length;
        }
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::{ClassFormat, ClassTypeSpec, Course, RoomKinds};
    use crate::random::create_rng;

    #[test]
    fn test_rejects_empty_rooms_and_slots() {
        let slots = fixtures::weekday_slots();
        let err = Catalog::new(vec![], vec![], slots).unwrap_err();
        assert_eq!(err, CatalogError::NoRooms);

        let rooms = vec![Room::new("101", RoomKinds::REGULAR, 30, "INF")];
        let err = Catalog::new(vec![], rooms, vec![]).unwrap_err();
        assert_eq!(err, CatalogError::NoTimeSlots);
    }

    #[test]
    fn test_rejects_class_type_without_teachers() {
        let subject = Subject::new(
            "SBJ",
            20,
            "INF",
            Course::new("Informatics", 1, "INF"),
            vec![ClassTypeSpec::new(
                ClassFormat::Lecture,
                1,
                Vec::<String>::new(),
                RoomKinds::AUDITORIUM,
            )],
            25,
        );
        let err = Catalog::new(vec![subject], fixtures::rooms(), fixtures::weekday_slots())
            .unwrap_err();
        assert!(matches!(err, CatalogError::NoTeachers { .. }));
    }

    #[test]
    fn test_session_plan_counts() {
        let catalog = fixtures::small_catalog();
        let expected: u32 = catalog
            .subjects()
            .iter()
            .flat_map(|s| s.class_types.iter())
            .map(|ct| ct.sessions_per_week * ct.classes.len() as u32)
            .sum();
        assert_eq!(catalog.sessions().len(), expected as usize);
    }

    #[test]
    fn test_slot_grid() {
        let slots = slot_grid(&[Day::Monday, Day::Tuesday], clock(8, 0), clock(10, 0), 30).unwrap();
        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0].to_string(), "MON 08:00 - 08:30");
        assert_eq!(slots[7].to_string(), "TUE 09:30 - 10:00");

        assert!(slot_grid(&[Day::Monday], clock(8, 0), clock(8, 20), 30).is_err());
        assert!(slot_grid(&[Day::Monday], clock(8, 0), clock(10, 0), 0).is_err());
    }

    #[test]
    fn test_export_import_roundtrip() {
        let catalog = fixtures::small_catalog();
        let mut rng = create_rng(5);
        let mut schedule = Schedule::random(&catalog, &mut rng);
        schedule.fitness = 17;

        let record = catalog.export(&schedule);
        let restored = catalog.import(&record).unwrap();

        assert_eq!(restored.fitness, 17);
        assert_eq!(restored.len(), schedule.len());
        for (a, b) in restored.assignments.iter().zip(&schedule.assignments) {
            assert_eq!(a.session, b.session);
            assert_eq!(a.teacher, b.teacher);
            assert_eq!(a.room, b.room);
            assert_eq!(a.time_slot, b.time_slot);
        }
    }

    #[test]
    fn test_import_rejects_dangling_references() {
        let catalog = fixtures::small_catalog();
        let mut rng = create_rng(5);
        let schedule = Schedule::random(&catalog, &mut rng);
        let record = catalog.export(&schedule);

        let mut bad = record.clone();
        bad.assignments[0].room = "nowhere".into();
        assert_eq!(
            catalog.import(&bad).unwrap_err(),
            ImportError::UnknownRoom("nowhere".into())
        );

        let mut bad = record.clone();
        bad.assignments[0].teacher = "Nobody".into();
        assert_eq!(
            catalog.import(&bad).unwrap_err(),
            ImportError::UnknownTeacher("Nobody".into())
        );

        let mut bad = record.clone();
        bad.assignments[0].class = "SBJ_T_XYZ".into();
        assert!(matches!(
            catalog.import(&bad).unwrap_err(),
            ImportError::UnknownClass { .. }
        ));

        let mut bad = record;
        bad.assignments[0].start = clock(3, 0);
        bad.assignments[0].end = clock(3, 30);
        assert!(matches!(
            catalog.import(&bad).unwrap_err(),
            ImportError::UnknownTimeSlot(_)
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_record_json_roundtrip() {
        let catalog = fixtures::small_catalog();
        let mut rng = create_rng(9);
        let schedule = Schedule::random(&catalog, &mut rng);
        let record = catalog.export(&schedule);

        let json = serde_json::to_string(&record).unwrap();
        let back: ScheduleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
