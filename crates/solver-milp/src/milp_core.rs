use good_lp::{Expression, ProblemVariables, Solution, SolverModel, Variable};
use std::collections::HashMap;

use sched_core::{Assignment, Calendar, ScheduleProblem};

/// One candidate (class, course, room, day, period) start. With no room-
/// eligibility filter and no teacher-availability windows, every
/// combination is a candidate: the dense cross product the source itself
/// builds.
#[derive(Clone)]
pub struct StartVar {
    pub class_idx: usize,
    pub course_idx: usize,
    pub room_idx: usize,
    pub day_idx: usize,
    pub period_idx: usize,
    pub var: Variable,
}

pub(crate) struct Vars {
    pub starts: Vec<StartVar>,
    /// Reified `y[class,course,period]`, true iff that course lands in that
    /// period on any day/room.
    pub occ: HashMap<(usize, usize, usize), Variable>,
}

/// Whether the encoder should add a secondary, dominated tiebreak term
/// (tiny weight on day index, tinier on room index) to make the optimum
/// deterministic beyond what the primary objective already fixes. Off by
/// default; the primary weighted-period objective is the only one the
/// contract requires.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncoderOptions {
    pub tiebreak: bool,
}

pub fn declare_starts(problem: &ScheduleProblem, vars: &mut ProblemVariables) -> Vec<StartVar> {
    let mut starts = Vec::new();
    for (class_idx, class) in problem.classes().iter().enumerate() {
        for course_idx in 0..class.courses.len() {
            for room_idx in 0..problem.num_rooms() {
                for day_idx in 0..Calendar::NUM_DAYS {
                    for period_idx in 0..Calendar::NUM_PERIODS {
                        let var = vars.add(good_lp::variable().binary());
                        starts.push(StartVar {
                            class_idx,
                            course_idx,
                            room_idx,
                            day_idx,
                            period_idx,
                            var,
                        });
                    }
                }
            }
        }
    }
    starts
}

pub(crate) fn declare_occupancy_vars(
    problem: &ScheduleProblem,
    vars: &mut ProblemVariables,
) -> HashMap<(usize, usize, usize), Variable> {
    let mut occ = HashMap::new();
    for (class_idx, class) in problem.classes().iter().enumerate() {
        for course_idx in 0..class.courses.len() {
            for period_idx in 0..Calendar::NUM_PERIODS {
                occ.insert(
                    (class_idx, course_idx, period_idx),
                    vars.add(good_lp::variable().binary()),
                );
            }
        }
    }
    occ
}

/// `y[c,k,p] == Σ_{r,d} x[c,k,r,d,p]`. The sum can only ever be 0 or 1 once
/// the class-exclusion constraint holds, so the equality clamps `y` to a
/// true reified indicator without needing a dedicated reification
/// primitive.
pub(crate) fn link_occupancy<M: SolverModel>(mut model: M, v: &Vars) -> M {
    for (&(class_idx, course_idx, period_idx), &y) in &v.occ {
        let mut sum = Expression::from(0.0);
        for s in v.starts.iter().filter(|s| {
            s.class_idx == class_idx && s.course_idx == course_idx && s.period_idx == period_idx
        }) {
            sum = sum + s.var;
        }
        model = model.with(sum.eq(y));
    }
    model
}

/// I1: each (class, course) meets exactly once per week.
pub(crate) fn add_course_coverage_constraints<M: SolverModel>(
    mut model: M,
    problem: &ScheduleProblem,
    v: &Vars,
) -> M {
    for (class_idx, class) in problem.classes().iter().enumerate() {
        for course_idx in 0..class.courses.len() {
            let mut sum = Expression::from(0.0);
            for s in v
                .starts
                .iter()
                .filter(|s| s.class_idx == class_idx && s.course_idx == course_idx)
            {
                sum = sum + s.var;
            }
            model = model.with(sum.eq(1.0));
        }
    }
    model
}

/// I2: a class attends at most one course per (day, period).
pub(crate) fn add_class_exclusion_constraints<M: SolverModel>(
    mut model: M,
    problem: &ScheduleProblem,
    v: &Vars,
) -> M {
    for class_idx in 0..problem.num_classes() {
        for day_idx in 0..Calendar::NUM_DAYS {
            for period_idx in 0..Calendar::NUM_PERIODS {
                let mut sum = Expression::from(0.0);
                for s in v.starts.iter().filter(|s| {
                    s.class_idx == class_idx && s.day_idx == day_idx && s.period_idx == period_idx
                }) {
                    sum = sum + s.var;
                }
                model = model.with(sum.leq(1.0));
            }
        }
    }
    model
}

/// I3: a room hosts at most one class per (day, period).
pub(crate) fn add_room_exclusion_constraints<M: SolverModel>(
    mut model: M,
    problem: &ScheduleProblem,
    v: &Vars,
) -> M {
    for room_idx in 0..problem.num_rooms() {
        for day_idx in 0..Calendar::NUM_DAYS {
            for period_idx in 0..Calendar::NUM_PERIODS {
                let mut sum = Expression::from(0.0);
                for s in v.starts.iter().filter(|s| {
                    s.room_idx == room_idx && s.day_idx == day_idx && s.period_idx == period_idx
                }) {
                    sum = sum + s.var;
                }
                model = model.with(sum.leq(1.0));
            }
        }
    }
    model
}

/// I4: a teacher (including the shared `"TBD"` bucket) teaches at most one
/// course per (day, period).
pub(crate) fn add_teacher_exclusion_constraints<M: SolverModel>(
    mut model: M,
    problem: &ScheduleProblem,
    v: &Vars,
) -> M {
    let teacher_index = problem.teacher_index();
    for members in teacher_index.values() {
        for day_idx in 0..Calendar::NUM_DAYS {
            for period_idx in 0..Calendar::NUM_PERIODS {
                let mut sum = Expression::from(0.0);
                for s in v.starts.iter().filter(|s| {
                    s.day_idx == day_idx
                        && s.period_idx == period_idx
                        && members.contains(&(s.class_idx, s.course_idx))
                }) {
                    sum = sum + s.var;
                }
                model = model.with(sum.leq(1.0));
            }
        }
    }
    model
}

pub(crate) fn build_objective(v: &Vars, opts: EncoderOptions) -> Expression {
    let mut objective = Expression::from(0.0);
    for (&(_class_idx, _course_idx, period_idx), &y) in &v.occ {
        let w = Calendar::weight(period_idx) as f64;
        objective = objective + w * y;
    }
    if opts.tiebreak {
        let day_eps = 1e-4;
        let room_eps = 1e-6;
        for s in &v.starts {
            objective = objective + day_eps * (s.day_idx as f64) * s.var;
            objective = objective + room_eps * (s.room_idx as f64) * s.var;
        }
    }
    objective
}

pub(crate) fn extract_solution(
    problem: &ScheduleProblem,
    v: &Vars,
    sol: &impl Solution,
) -> Vec<Assignment> {
    let mut assignments = Vec::new();
    for s in &v.starts {
        if sol.value(s.var) > 0.5 {
            let class = &problem.classes()[s.class_idx];
            let course = &class.courses[s.course_idx];
            let room = &problem.rooms()[s.room_idx];
            assignments.push(Assignment {
                class_id: class.class_id.clone(),
                course_code: course.code.clone(),
                course_name: course.name.clone(),
                teacher_key: course.teacher_key.clone(),
                room_id: room.id.clone(),
                room_idx: s.room_idx,
                day_idx: s.day_idx,
                period_idx: s.period_idx,
            });
        }
    }
    assignments
}
