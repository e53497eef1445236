use std::sync::Arc;

use jobs::InMemJobs;
use solver_milp::MilpSolver;

#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<InMemJobs<MilpSolver>>,
}

impl AppState {
    pub fn new_default() -> Self {
        let jobs = InMemJobs::new(MilpSolver::new());
        Self { jobs: Arc::new(jobs) }
    }
}
