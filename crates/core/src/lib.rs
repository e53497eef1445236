pub mod builder;
pub mod decode;
pub mod error;
pub mod result;
pub mod state;

use async_trait::async_trait;

pub use builder::{build, build_from_classes, ScheduleProblem};
pub use error::{InputError, InternalError};
pub use result::SolveResult;
pub use state::EngineState;

pub use types::{Assignment, Calendar, Cell, ClassCurriculum, ClassId, ClassTimetable, Course,
    CurriculaRecord, EngineConfig, Room, RoomId, RoomRecord, SemesterRecord, SolveStats,
    SolveStatus, SubjectRecord, TeacherKey, Timetable};

/// Translates a [`ScheduleProblem`] into a binary program, drives the
/// external solver, and hands back a [`SolveResult`]. Implemented once per
/// solver backend; callers never see the encoding.
#[async_trait]
pub trait Solver: Send + Sync + 'static {
    async fn solve(
        &self,
        problem: &ScheduleProblem,
        config: &EngineConfig,
    ) -> anyhow::Result<SolveResult>;
}

/// Runs the full `build → solve → decode` pipeline for a solver
/// implementation, threading the engine state machine through each phase
/// and converting phase-order violations into [`InternalError`] instead of
/// panicking.
pub async fn run<S: Solver>(
    solver: &S,
    rooms: Vec<RoomRecord>,
    curricula: CurriculaRecord,
    config: EngineConfig,
) -> anyhow::Result<(SolveResult, Option<Timetable>)> {
    let problem = build(rooms, curricula)?;

    let mut state = EngineState::idle();
    state = state.advance_to_encoded()?;

    let result = solver.solve(&problem, &config).await?;
    state = state.advance_to_solved(result.status)?;

    let timetable = if state.advance_to_decoded().is_ok() {
        Some(decode::decode(&problem, &result.assignments)?)
    } else {
        None
    };

    Ok((result, timetable))
}
