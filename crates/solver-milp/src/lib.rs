mod milp_core;

use std::sync::mpsc;
use std::time::Instant;

use async_trait::async_trait;
use good_lp::{default_solver, ProblemVariables, Solution, SolverModel};
use tracing::{info, info_span};

use milp_core::{
    add_class_exclusion_constraints, add_course_coverage_constraints,
    add_room_exclusion_constraints, add_teacher_exclusion_constraints, build_objective,
    declare_occupancy_vars, declare_starts, extract_solution, link_occupancy, EncoderOptions, Vars,
};
use sched_core::{Calendar, EngineConfig, ScheduleProblem, Solver, SolveResult, SolveStats, SolveStatus};

pub use milp_core::EncoderOptions as MilpEncoderOptions;

/// Re-exports encoder internals the benchmark needs to time variable
/// construction in isolation, without duplicating the encoder's logic.
pub mod bench_support {
    pub use crate::milp_core::declare_starts;
}

/// Drives the binary ILP encoding through `good_lp`'s `coin_cbc` backend.
/// There is no native CP/SAT binding in this workspace's dependency stack;
/// the dense 0/1 program built here (reification by equality-linking an
/// auxiliary binary to its indicator sum) realizes the same class of
/// problem a CP/SAT solver would, as the design notes anticipate for a
/// library lacking direct reification.
pub struct MilpSolver {
    options: EncoderOptions,
}

impl MilpSolver {
    pub fn new() -> Self {
        Self {
            options: EncoderOptions::default(),
        }
    }

    pub fn with_options(options: EncoderOptions) -> Self {
        Self { options }
    }
}

impl Default for MilpSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Solver for MilpSolver {
    async fn solve(
        &self,
        problem: &ScheduleProblem,
        config: &EngineConfig,
    ) -> anyhow::Result<SolveResult> {
        let span = info_span!(
            "solve",
            courses = problem.total_courses(),
            rooms = problem.num_rooms(),
            classes = problem.num_classes(),
            time_budget_secs = config.time_budget.as_secs(),
        );
        let _enter = span.enter();

        let problem = problem.clone();
        let options = self.options;
        let budget = config.time_budget;
        let started = Instant::now();

        let (tx, rx) = mpsc::channel();
        // good_lp's coin_cbc backend exposes no cooperative cancellation, so
        // the budget is enforced as a deadline around the blocking call
        // rather than inside it; a still-running solve thread is abandoned
        // (not killed) once the deadline passes.
        std::thread::spawn(move || {
            let result = encode_and_solve(&problem, options, started);
            let _ = tx.send(result);
        });

        let result = match rx.recv_timeout(budget) {
            Ok(result) => result,
            Err(_) => SolveResult {
                status: SolveStatus::Unknown,
                assignments: vec![],
                stats: SolveStats {
                    num_classes: 0,
                    num_courses: 0,
                    num_rooms: 0,
                    num_vars: 0,
                    num_constraints: 0,
                    elapsed_ms: started.elapsed().as_millis() as u64,
                },
            },
        };

        info!(status = %result.status, elapsed_ms = result.stats.elapsed_ms, "solve finished");
        Ok(result)
    }
}

/// Builds the model and blocks on `coin_cbc`. Only `Optimal` and
/// `Infeasible` are reachable through this backend's API: `coin_cbc`'s
/// branch-and-bound either proves optimality or reports infeasibility, it
/// does not surface an intermediate "feasible but unproven" solution the
/// way an interruptible CP/SAT search would. `Feasible` stays part of the
/// outcome contract for a future backend that can report it; `Unknown` is
/// produced only by the timeout wrapper above.
fn encode_and_solve(problem: &ScheduleProblem, opts: EncoderOptions, started: Instant) -> SolveResult {
    let mut pvars = ProblemVariables::new();
    let starts = declare_starts(problem, &mut pvars);
    let occ = declare_occupancy_vars(problem, &mut pvars);
    let num_vars = starts.len() + occ.len();
    let num_occ = occ.len();
    let v = Vars { starts, occ };

    let objective = build_objective(&v, opts);

    let mut model = pvars.minimise(objective.clone()).using(default_solver);
    model = add_course_coverage_constraints(model, problem, &v);
    model = add_class_exclusion_constraints(model, problem, &v);
    model = add_room_exclusion_constraints(model, problem, &v);
    model = add_teacher_exclusion_constraints(model, problem, &v);
    model = link_occupancy(model, &v);

    let num_teacher_keys = problem.teacher_index().len();
    let slots = Calendar::NUM_DAYS * Calendar::NUM_PERIODS;
    let num_constraints = problem.total_courses()
        + problem.num_classes() * slots
        + problem.num_rooms() * slots
        + num_teacher_keys * slots
        + num_occ;

    let base_stats = SolveStats {
        num_classes: problem.num_classes(),
        num_courses: problem.total_courses(),
        num_rooms: problem.num_rooms(),
        num_vars,
        num_constraints,
        elapsed_ms: started.elapsed().as_millis() as u64,
    };

    match model.solve() {
        Ok(sol) => {
            let assignments = extract_solution(problem, &v, &sol);
            SolveResult {
                status: SolveStatus::Optimal,
                assignments,
                stats: SolveStats {
                    elapsed_ms: started.elapsed().as_millis() as u64,
                    ..base_stats
                },
            }
        }
        Err(_e) => SolveResult {
            status: SolveStatus::Infeasible,
            assignments: vec![],
            stats: SolveStats {
                elapsed_ms: started.elapsed().as_millis() as u64,
                ..base_stats
            },
        },
    }
}
