use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use utoipa::ToSchema;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Clone, Debug, Serialize, Deserialize, ToSchema, Eq, PartialEq, Hash, Ord, PartialOrd)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

id_newtype!(RoomId);
id_newtype!(ClassId);

/// A canonical teacher identity. Equal strings denote the same scheduling
/// entity; `"TBD"` is the unknown-teacher sentinel and participates as a
/// single teacher like any other (see [`TeacherKey::tbd`]).
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[serde(transparent)]
pub struct TeacherKey(pub String);

impl TeacherKey {
    pub const TBD_STR: &'static str = "TBD";

    pub fn tbd() -> Self {
        Self(Self::TBD_STR.to_string())
    }

    pub fn is_tbd(&self) -> bool {
        self.0 == Self::TBD_STR
    }

    pub fn from_lecturers<I, S>(lecturers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = lecturers
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() {
            Self::tbd()
        } else {
            Self(names.join(", "))
        }
    }
}

impl fmt::Display for TeacherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A room, frozen after ingest.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Room {
    pub id: RoomId,
    pub number: String,
    pub building: String,
    /// Reserved for future room-capacity-vs-enrollment constraints; read by
    /// nothing in this engine.
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub track: Option<String>,
}

/// One curriculum course belonging to a single class.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Course {
    pub code: String,
    pub name: String,
    pub teacher_key: TeacherKey,
    #[serde(default)]
    pub credits: u32,
}

/// The ordered set of courses a class takes this semester.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassCurriculum {
    pub class_id: ClassId,
    pub courses: Vec<Course>,
}

/// A fixed six-day, five-period weekly calendar. Not configurable: every
/// class, room, and teacher shares the same calendar.
pub struct Calendar;

impl Calendar {
    pub const DAYS: [&'static str; 6] =
        ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];
    pub const PERIODS: [&'static str; 5] = [
        "7:00am - 9:55am",
        "10:05am - 12:55pm",
        "1:05pm - 3:55pm",
        "4:05pm - 6:55pm",
        "7:05pm - 9:55pm",
    ];
    /// Period weights, lightest (most preferred) first. Index-aligned with
    /// `PERIODS`.
    pub const PERIOD_WEIGHTS: [u32; 5] = [1, 2, 3, 4, 5];

    pub const NUM_DAYS: usize = Self::DAYS.len();
    pub const NUM_PERIODS: usize = Self::PERIODS.len();

    pub fn weight(period_idx: usize) -> u32 {
        Self::PERIOD_WEIGHTS[period_idx]
    }
}

/// One grid cell of a decoded [`Timetable`].
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Occupied {
        course_code: String,
        course_name: String,
        teacher_key: TeacherKey,
        room_number: String,
        building: String,
    },
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// The decoded day-by-period grid for a single class.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassTimetable {
    pub class_id: ClassId,
    /// `grid[day][period]`, `Calendar::NUM_DAYS` x `Calendar::NUM_PERIODS`.
    pub grid: Vec<Vec<Cell>>,
    /// The class's ordered course list, for legend rendering.
    pub courses: Vec<Course>,
}

/// The decoded timetable handed off for rendering, verbatim.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Timetable {
    pub classes: Vec<ClassTimetable>,
    pub days: Vec<String>,
    pub periods: Vec<String>,
}

/// The solver's total function from each (class, course) to (room, day,
/// period).
///
/// Carries both `room_id` (the external, caller-facing identifier) and
/// `room_idx` (the dense index into `ScheduleProblem::rooms()` the encoder
/// actually built decision variables against). `decode` resolves the room
/// by `room_idx`, never by re-searching for `room_id`: `RoomId` is derived
/// from ingest data the caller controls and is not guaranteed unique (two
/// rooms can share a `number` across different `building`s), so a lookup by
/// id alone could silently resolve to the wrong room on a collision.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Assignment {
    pub class_id: ClassId,
    pub course_code: String,
    pub course_name: String,
    pub teacher_key: TeacherKey,
    pub room_id: RoomId,
    pub room_idx: usize,
    pub day_idx: usize,
    pub period_idx: usize,
}

/// Solve-time configuration: wall-clock budget and an optional
/// determinism seed.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct EngineConfig {
    #[serde(with = "duration_secs")]
    pub time_budget: Duration,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(300),
            seed: None,
        }
    }
}

mod duration_secs {
    use super::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(d)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Outcome kind of a solve, independent of payload.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Feasible => "feasible",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Solver diagnostics, opaque to callers beyond logging/reporting.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SolveStats {
    pub num_classes: usize,
    pub num_courses: usize,
    pub num_rooms: usize,
    pub num_vars: usize,
    pub num_constraints: usize,
    pub elapsed_ms: u64,
}

/// Raw ingest input for one room.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomRecord {
    pub number: String,
    #[serde(default)]
    pub capacity: u32,
    pub building: String,
    #[serde(default)]
    pub track: Option<String>,
}

/// One raw subject entry; `name`/`code` are deliberately loosely typed so
/// the problem builder can drop malformed entries itself instead of
/// failing deserialization outright (a non-string `name` is silently
/// dropped, not rejected).
///
/// `name` distinguishes an absent key from an explicit JSON `null`: the
/// source only defaults a *missing* `name` to `"Unnamed Course"` and drops
/// the subject when `name` is present but `null` (fails its `isinstance`
/// check). A plain `Option<Value>` can't tell those apart — serde's
/// `Option` deserializer intercepts `null` before `Value`'s own impl ever
/// sees it — so this uses the double-`Option` pattern instead: outer
/// `None` means the key was absent, `Some(None)` means it was `null`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SubjectRecord {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<serde_json::Value>>,
    #[serde(default)]
    pub lecturer: Option<Vec<String>>,
    #[serde(default)]
    pub credits: u32,
}

fn double_option<'de, D>(de: D) -> Result<Option<Option<serde_json::Value>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SemesterRecord {
    #[serde(default)]
    pub subjects: Vec<SubjectRecord>,
}

/// `level -> semester -> { subjects: [...] }`.
pub type CurriculaRecord =
    std::collections::BTreeMap<String, std::collections::BTreeMap<String, SemesterRecord>>;
