use types::{Assignment, Calendar, Cell, ClassTimetable, Timetable};

use crate::builder::ScheduleProblem;
use crate::error::InternalError;

/// Turns a solved set of [`Assignment`]s back into a grid per class. A cell
/// written more than once means the encoder emitted two active decision
/// variables for the same (class, day, period) slot, which should be
/// structurally impossible under the class-exclusion constraint; surfacing
/// it as an [`InternalError`] rather than silently overwriting keeps that
/// promise honest.
pub fn decode(
    problem: &ScheduleProblem,
    assignments: &[Assignment],
) -> Result<Timetable, InternalError> {
    let mut grids: Vec<Vec<Vec<Cell>>> = problem
        .classes()
        .iter()
        .map(|_| {
            (0..Calendar::NUM_DAYS)
                .map(|_| (0..Calendar::NUM_PERIODS).map(|_| Cell::Empty).collect())
                .collect()
        })
        .collect();

    for a in assignments {
        let class_idx = problem
            .classes()
            .iter()
            .position(|c| c.class_id == a.class_id)
            .ok_or(InternalError::UnknownIndex(usize::MAX))?;

        let cell = &mut grids[class_idx][a.day_idx][a.period_idx];
        if !cell.is_empty() {
            return Err(InternalError::DoubleWrite {
                class_id: a.class_id.0.clone(),
                day: a.day_idx,
                period: a.period_idx,
            });
        }
        // Resolved by `room_idx`, the dense index the encoder actually built
        // decision variables against — not by re-searching for `room_id`,
        // which is only unique when ingest never assigns the same room
        // number to two buildings.
        let room = problem
            .rooms()
            .get(a.room_idx)
            .ok_or(InternalError::UnknownIndex(a.room_idx))?;
        *cell = Cell::Occupied {
            course_code: a.course_code.clone(),
            course_name: a.course_name.clone(),
            teacher_key: a.teacher_key.clone(),
            room_number: room.number.clone(),
            building: room.building.clone(),
        };
    }

    let classes = problem
        .classes()
        .iter()
        .zip(grids.into_iter())
        .map(|(class, grid)| ClassTimetable {
            class_id: class.class_id.clone(),
            grid,
            courses: class.courses.clone(),
        })
        .collect();

    Ok(Timetable {
        classes,
        days: Calendar::DAYS.iter().map(|s| s.to_string()).collect(),
        periods: Calendar::PERIODS.iter().map(|s| s.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{ClassCurriculum, ClassId, Course, Room, RoomId, TeacherKey};

    fn problem() -> ScheduleProblem {
        crate::builder::build_from_classes(
            vec![Room {
                id: RoomId("101".into()),
                number: "101".into(),
                building: "A".into(),
                capacity: 30,
                track: None,
            }],
            vec![ClassCurriculum {
                class_id: ClassId("L1-S1".into()),
                courses: vec![Course {
                    code: "CS101".into(),
                    name: "Intro".into(),
                    teacher_key: TeacherKey::from_lecturers(vec!["Alice"]),
                    credits: 3,
                }],
            }],
        )
        .unwrap()
    }

    #[test]
    fn single_assignment_lands_in_the_right_cell() {
        let problem = problem();
        let assignment = Assignment {
            class_id: ClassId("L1-S1".into()),
            course_code: "CS101".into(),
            course_name: "Intro".into(),
            teacher_key: TeacherKey::from_lecturers(vec!["Alice"]),
            room_id: RoomId("101".into()),
            room_idx: 0,
            day_idx: 0,
            period_idx: 0,
        };
        let timetable = decode(&problem, &[assignment]).unwrap();
        assert!(!timetable.classes[0].grid[0][0].is_empty());
        assert!(timetable.classes[0].grid[0][1].is_empty());
    }

    #[test]
    fn double_write_is_an_internal_error() {
        let problem = problem();
        let a = Assignment {
            class_id: ClassId("L1-S1".into()),
            course_code: "CS101".into(),
            course_name: "Intro".into(),
            teacher_key: TeacherKey::from_lecturers(vec!["Alice"]),
            room_id: RoomId("101".into()),
            room_idx: 0,
            day_idx: 0,
            period_idx: 0,
        };
        let b = Assignment {
            course_code: "CS999".into(),
            ..a.clone()
        };
        let err = decode(&problem, &[a, b]).unwrap_err();
        assert!(matches!(err, InternalError::DoubleWrite { .. }));
    }

    #[test]
    fn resolves_the_correct_room_when_room_numbers_collide_across_buildings() {
        let problem = crate::builder::build_from_classes(
            vec![
                Room {
                    id: RoomId("101".into()),
                    number: "101".into(),
                    building: "A".into(),
                    capacity: 30,
                    track: None,
                },
                Room {
                    id: RoomId("101".into()),
                    number: "101".into(),
                    building: "B".into(),
                    capacity: 30,
                    track: None,
                },
            ],
            vec![ClassCurriculum {
                class_id: ClassId("L1-S1".into()),
                courses: vec![Course {
                    code: "CS101".into(),
                    name: "Intro".into(),
                    teacher_key: TeacherKey::from_lecturers(vec!["Alice"]),
                    credits: 3,
                }],
            }],
        )
        .unwrap();

        let assignment = Assignment {
            class_id: ClassId("L1-S1".into()),
            course_code: "CS101".into(),
            course_name: "Intro".into(),
            teacher_key: TeacherKey::from_lecturers(vec!["Alice"]),
            room_id: RoomId("101".into()),
            room_idx: 1,
            day_idx: 0,
            period_idx: 0,
        };
        let timetable = decode(&problem, &[assignment]).unwrap();
        match &timetable.classes[0].grid[0][0] {
            Cell::Occupied { building, .. } => assert_eq!(building, "B"),
            Cell::Empty => panic!("expected an occupied cell"),
        }
    }
}
