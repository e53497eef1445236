use std::time::Duration;

use proptest::prelude::*;

use sched_core::{
    build_from_classes, ClassCurriculum, ClassId, Course, EngineConfig, Room, RoomId, Solver,
    SolveStatus, TeacherKey,
};
use solver_milp::MilpSolver;

/// A small scheduling problem: few enough classes/courses/rooms that an
/// exact ILP solve finishes well within the test budget.
fn small_problem() -> impl Strategy<Value = (Vec<Room>, Vec<ClassCurriculum>)> {
    let teacher_pool = vec!["Alice".to_string(), "Bob".to_string(), "TBD".to_string()];
    (1..=2usize, 1..=2usize, 1..=2usize).prop_flat_map(move |(num_classes, courses_per_class, num_rooms)| {
        let teacher_pool = teacher_pool.clone();
        let rooms: Vec<Room> = (0..num_rooms)
            .map(|i| Room {
                id: RoomId(format!("R{i}")),
                number: format!("{i}"),
                building: "A".into(),
                capacity: 30,
                track: None,
            })
            .collect();
        proptest::collection::vec(0..teacher_pool.len(), num_classes * courses_per_class).prop_map(
            move |teacher_choices| {
                let mut classes = Vec::new();
                let mut next = 0;
                for c in 0..num_classes {
                    let mut courses = Vec::new();
                    for k in 0..courses_per_class {
                        let teacher = &teacher_pool[teacher_choices[next]];
                        next += 1;
                        let teacher_key = if teacher == "TBD" {
                            TeacherKey::tbd()
                        } else {
                            TeacherKey::from_lecturers(vec![teacher.clone()])
                        };
                        courses.push(Course {
                            code: format!("C{c}-{k}"),
                            name: format!("Course {c}-{k}"),
                            teacher_key,
                            credits: 3,
                        });
                    }
                    classes.push(ClassCurriculum {
                        class_id: ClassId(format!("Class-{c}")),
                        courses,
                    });
                }
                (rooms.clone(), classes)
            },
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn invariants_hold_on_optimal_solutions((rooms, classes) in small_problem()) {
        let problem = build_from_classes(rooms, classes).unwrap();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let config = EngineConfig { time_budget: Duration::from_secs(10), seed: None };
        let result = rt.block_on(MilpSolver::new().solve(&problem, &config)).unwrap();

        if result.status != SolveStatus::Optimal {
            // Infeasible/Unknown carry no assignments to check; still a
            // valid outcome for a random problem (e.g. more courses than
            // periods for one teacher).
            return Ok(());
        }

        let timetable = sched_core::decode::decode(&problem, &result.assignments).unwrap();

        // P1: every (class, course) appears exactly once.
        for class in problem.classes() {
            for course in &class.courses {
                let ct = timetable
                    .classes
                    .iter()
                    .find(|t| t.class_id == class.class_id)
                    .unwrap();
                let count = ct
                    .grid
                    .iter()
                    .flatten()
                    .filter(|cell| match cell {
                        types::Cell::Occupied { course_code, .. } => *course_code == course.code,
                        types::Cell::Empty => false,
                    })
                    .count();
                prop_assert_eq!(count, 1);
            }
        }

        // P2: class exclusion - grid cells are single-valued by construction
        // (the decoder double-write check already enforces this).

        // P3: room exclusion.
        for day in 0..types::Calendar::NUM_DAYS {
            for period in 0..types::Calendar::NUM_PERIODS {
                let mut rooms_used = std::collections::HashSet::new();
                for ct in &timetable.classes {
                    if let types::Cell::Occupied { room_number, .. } = &ct.grid[day][period] {
                        prop_assert!(rooms_used.insert(room_number.clone()));
                    }
                }
            }
        }

        // P4: teacher exclusion, TBD constraining by default.
        for day in 0..types::Calendar::NUM_DAYS {
            for period in 0..types::Calendar::NUM_PERIODS {
                let mut teachers_used = std::collections::HashSet::new();
                for ct in &timetable.classes {
                    if let types::Cell::Occupied { teacher_key, .. } = &ct.grid[day][period] {
                        prop_assert!(teachers_used.insert(teacher_key.clone()));
                    }
                }
            }
        }

        // P5: curriculum confinement.
        for class in problem.classes() {
            let ct = timetable
                .classes
                .iter()
                .find(|t| t.class_id == class.class_id)
                .unwrap();
            for cell in ct.grid.iter().flatten() {
                if let types::Cell::Occupied { course_code, .. } = cell {
                    prop_assert!(class.courses.iter().any(|c| &c.code == course_code));
                }
            }
        }
    }
}
