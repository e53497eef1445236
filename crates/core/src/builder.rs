use std::collections::HashMap;

use types::{ClassCurriculum, ClassId, Course, CurriculaRecord, Room, RoomId, RoomRecord, TeacherKey};

use crate::error::InputError;

/// An immutable, validated scheduling problem: a fixed room pool and, per
/// class, the ordered list of courses it must take this semester. Owned
/// exclusively by the engine for the duration of one run.
#[derive(Clone, Debug)]
pub struct ScheduleProblem {
    rooms: Vec<Room>,
    classes: Vec<ClassCurriculum>,
}

impl ScheduleProblem {
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn classes(&self) -> &[ClassCurriculum] {
        &self.classes
    }

    pub fn num_rooms(&self) -> usize {
        self.rooms.len()
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn courses(&self, class_idx: usize) -> &[Course] {
        &self.classes[class_idx].courses
    }

    pub fn total_courses(&self) -> usize {
        self.classes.iter().map(|c| c.courses.len()).sum()
    }

    /// Inverted index from teacher key to every (class_idx, course_idx) the
    /// teacher is on the hook for, including the `"TBD"` bucket.
    pub fn teacher_index(&self) -> HashMap<TeacherKey, Vec<(usize, usize)>> {
        let mut idx: HashMap<TeacherKey, Vec<(usize, usize)>> = HashMap::new();
        for (class_idx, class) in self.classes.iter().enumerate() {
            for (course_idx, course) in class.courses.iter().enumerate() {
                idx.entry(course.teacher_key.clone())
                    .or_default()
                    .push((class_idx, course_idx));
            }
        }
        idx
    }
}

/// Builds a [`ScheduleProblem`] from already-typed rooms and class
/// curricula, the entry point used once ingest-side filtering has already
/// happened (or for synthetic/property-test problems).
pub fn build_from_classes(
    rooms: Vec<Room>,
    classes: Vec<ClassCurriculum>,
) -> Result<ScheduleProblem, InputError> {
    let mut seen = std::collections::HashSet::new();
    for class in &classes {
        if !seen.insert(class.class_id.clone()) {
            return Err(InputError::DuplicateClassId(class.class_id.0.clone()));
        }
    }

    Ok(ScheduleProblem { rooms, classes })
}

/// Builds a [`ScheduleProblem`] straight from the ingest contract's raw JSON
/// shapes, applying the same normalization rules as the original
/// implementation: a subject is dropped if its code is empty/missing or its
/// name is present but not a string; a missing name falls back to
/// `"Unnamed Course"`; an absent or empty lecturer list resolves to the
/// `"TBD"` teacher sentinel.
pub fn build(
    rooms: Vec<RoomRecord>,
    curricula: CurriculaRecord,
) -> Result<ScheduleProblem, InputError> {
    let rooms: Vec<Room> = rooms
        .into_iter()
        .map(|r| Room {
            id: RoomId(r.number.clone()),
            number: r.number,
            building: r.building,
            capacity: r.capacity,
            track: r.track,
        })
        .collect();

    let mut classes = Vec::new();
    for (level, semesters) in curricula {
        for (semester, data) in semesters {
            let class_id = ClassId(format!("Level-{level}-{semester}"));
            let mut courses = Vec::new();
            for subject in data.subjects {
                let code = match subject.code {
                    Some(c) if !c.is_empty() => c,
                    _ => continue,
                };
                let name = match subject.name {
                    None => "Unnamed Course".to_string(),
                    Some(None) => continue,
                    Some(Some(serde_json::Value::String(s))) => s,
                    Some(Some(_)) => continue,
                };
                let teacher_key = TeacherKey::from_lecturers(subject.lecturer.unwrap_or_default());
                courses.push(Course {
                    code,
                    name,
                    teacher_key,
                    credits: subject.credits,
                });
            }
            classes.push(ClassCurriculum { class_id, courses });
        }
    }

    build_from_classes(rooms, classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use types::SemesterRecord;
    use types::SubjectRecord;

    fn room(number: &str) -> RoomRecord {
        RoomRecord {
            number: number.to_string(),
            capacity: 30,
            building: "A".to_string(),
            track: None,
        }
    }

    #[test]
    fn drops_subjects_with_empty_code_or_non_string_name() {
        let mut semesters = BTreeMap::new();
        semesters.insert(
            "S1".to_string(),
            SemesterRecord {
                subjects: vec![
                    SubjectRecord {
                        code: Some("CS101".to_string()),
                        name: Some(Some(serde_json::Value::String("Intro".to_string()))),
                        lecturer: Some(vec!["Alice".to_string()]),
                        credits: 3,
                    },
                    SubjectRecord {
                        code: Some(String::new()),
                        name: Some(Some(serde_json::Value::String("Bad Code".to_string()))),
                        lecturer: None,
                        credits: 3,
                    },
                    SubjectRecord {
                        code: Some("CS102".to_string()),
                        name: Some(Some(serde_json::Value::Array(vec![]))),
                        lecturer: None,
                        credits: 3,
                    },
                ],
            },
        );
        let mut curricula = BTreeMap::new();
        curricula.insert("1".to_string(), semesters);

        let problem = build(vec![room("101")], curricula).unwrap();
        assert_eq!(problem.total_courses(), 1);
        assert_eq!(problem.classes()[0].courses[0].code, "CS101");
    }

    #[test]
    fn missing_name_falls_back_to_unnamed_course() {
        let mut semesters = BTreeMap::new();
        semesters.insert(
            "S1".to_string(),
            SemesterRecord {
                subjects: vec![SubjectRecord {
                    code: Some("CS101".to_string()),
                    name: None,
                    lecturer: None,
                    credits: 0,
                }],
            },
        );
        let mut curricula = BTreeMap::new();
        curricula.insert("1".to_string(), semesters);

        let problem = build(vec![room("101")], curricula).unwrap();
        assert_eq!(problem.classes()[0].courses[0].name, "Unnamed Course");
        assert!(problem.classes()[0].courses[0].teacher_key.is_tbd());
    }

    #[test]
    fn explicit_null_name_drops_the_subject_but_missing_name_does_not() {
        let mut semesters = BTreeMap::new();
        semesters.insert(
            "S1".to_string(),
            SemesterRecord {
                subjects: vec![
                    SubjectRecord {
                        code: Some("CS101".to_string()),
                        name: Some(None),
                        lecturer: None,
                        credits: 0,
                    },
                    SubjectRecord {
                        code: Some("CS102".to_string()),
                        name: None,
                        lecturer: None,
                        credits: 0,
                    },
                ],
            },
        );
        let mut curricula = BTreeMap::new();
        curricula.insert("1".to_string(), semesters);

        let problem = build(vec![room("101")], curricula).unwrap();
        assert_eq!(problem.total_courses(), 1);
        assert_eq!(problem.classes()[0].courses[0].code, "CS102");
        assert_eq!(problem.classes()[0].courses[0].name, "Unnamed Course");
    }

    #[test]
    fn rejects_duplicate_class_ids() {
        let classes = vec![
            ClassCurriculum {
                class_id: ClassId("Level-1-S1".to_string()),
                courses: vec![],
            },
            ClassCurriculum {
                class_id: ClassId("Level-1-S1".to_string()),
                courses: vec![],
            },
        ];
        let err = build_from_classes(
            vec![Room {
                id: RoomId("101".into()),
                number: "101".into(),
                building: "A".into(),
                capacity: 0,
                track: None,
            }],
            classes,
        )
        .unwrap_err();
        assert!(matches!(err, InputError::DuplicateClassId(_)));
    }

    #[test]
    fn empty_inputs_yield_a_trivially_satisfiable_problem() {
        let problem = build_from_classes(vec![], vec![]).unwrap();
        assert_eq!(problem.num_rooms(), 0);
        assert_eq!(problem.num_classes(), 0);
        assert_eq!(problem.total_courses(), 0);
    }
}
