//! Shared catalogs and builders for unit tests.

use std::sync::Arc;

use crate::models::{
    clock, slot_grid, Assignment, Catalog, ClassFormat, ClassTypeSpec, Course, Day, Room,
    RoomKinds, Session, Subject, TimeSlot,
};

pub(crate) fn slot(day: Day, hour: u16, minute: u16, minutes: u16) -> TimeSlot {
    TimeSlot::starting_at(day, hour, minute, minutes).expect("valid fixture slot")
}

pub(crate) fn course() -> Course {
    Course::new("Informatics", 1, "INF")
}

/// `A1` auditorium, `R1`/`R2` regular (R2 owned by MATH), `L1`/`L2` labs.
pub(crate) fn rooms() -> Vec<Room> {
    vec![
        Room::new("A1", RoomKinds::AUDITORIUM, 200, "INF"),
        Room::new("R1", RoomKinds::REGULAR, 60, "INF"),
        Room::new("R2", RoomKinds::REGULAR, 60, "MATH"),
        Room::new("L1", RoomKinds::LAB, 30, "INF"),
        Room::new("L2", RoomKinds::LAB, 30, "INF"),
    ]
}

/// Hourly slots, Monday to Friday, 08:00 to 18:00.
pub(crate) fn weekday_slots() -> Vec<TimeSlot> {
    let days = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];
    slot_grid(&days, clock(8, 0), clock(18, 0), 60).expect("valid fixture grid")
}

/// A 20-student subject with a single lab group `{name}_PL_A`.
pub(crate) fn subject_with_lab(name: &str, sessions: u32, teachers: &[&str]) -> Subject {
    Subject::new(
        name,
        20,
        "INF",
        course(),
        vec![ClassTypeSpec::new(
            ClassFormat::Lab,
            sessions,
            teachers.iter().copied(),
            RoomKinds::LAB,
        )],
        25,
    )
}

/// Two subjects, seven sessions:
///
/// - 0, 1: `SBJ_T_AB` lecture (50 students, teachers T1 T2)
/// - 2, 3: `SBJ_PL_A` lab (25 students, teachers T2 T3)
/// - 4, 5: `SBJ_PL_B` lab (25 students, teachers T2 T3)
/// - 6: `ALG_TP_AB` seminar (50 students, teacher T4)
pub(crate) fn small_catalog() -> Catalog {
    let sbj = Subject::new(
        "SBJ",
        50,
        "INF",
        course(),
        vec![
            ClassTypeSpec::new(ClassFormat::Lecture, 2, ["T1", "T2"], RoomKinds::AUDITORIUM),
            ClassTypeSpec::new(ClassFormat::Lab, 2, ["T2", "T3"], RoomKinds::LAB),
        ],
        25,
    );
    let alg = Subject::new(
        "ALG",
        50,
        "INF",
        course(),
        vec![ClassTypeSpec::new(
            ClassFormat::Seminar,
            1,
            ["T4"],
            RoomKinds::REGULAR,
        )],
        25,
    );
    Catalog::new(vec![sbj, alg], rooms(), weekday_slots()).expect("valid fixture catalog")
}

/// `X_PL_A` needs six sessions (0..6), `Y_PL_A` two (6..8).
pub(crate) fn load_catalog() -> Catalog {
    Catalog::new(
        vec![
            subject_with_lab("X", 6, &["T1"]),
            subject_with_lab("Y", 2, &["T2"]),
        ],
        rooms(),
        weekday_slots(),
    )
    .expect("valid fixture catalog")
}

/// One assignment per session with its first eligible teacher, room 0 and
/// consecutive catalog slots.
pub(crate) fn complete_schedule(catalog: &Catalog) -> Vec<Assignment> {
    catalog
        .sessions()
        .iter()
        .enumerate()
        .map(|(i, session)| {
            let teacher = session.class_type().teachers[0].clone();
            let slot = catalog.time_slots()[i % catalog.time_slots().len()];
            Assignment::new(session.clone(), teacher, catalog.rooms()[0].clone(), slot)
        })
        .collect()
}

/// Builds assignments for a catalog's sessions with explicit resources.
pub(crate) struct AssignmentBuilder<'a> {
    catalog: &'a Catalog,
}

impl<'a> AssignmentBuilder<'a> {
    pub(crate) fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub(crate) fn session(&self, index: usize) -> Session {
        self.catalog.sessions()[index].clone()
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn at(
        &self,
        session: usize,
        teacher: &str,
        room: usize,
        day: Day,
        hour: u16,
        minute: u16,
        minutes: u16,
    ) -> Assignment {
        Assignment::new(
            self.session(session),
            Arc::from(teacher),
            self.catalog.rooms()[room].clone(),
            slot(day, hour, minute, minutes),
        )
    }
}
