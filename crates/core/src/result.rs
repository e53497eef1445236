use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use types::{Assignment, SolveStats, SolveStatus};

/// What a solve produced: a status plus, for the two solved statuses, the
/// assignment set the decoder needs. Infeasible/Unknown carry an empty
/// assignment list; diagnostics live in `stats` regardless of outcome.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SolveResult {
    pub status: SolveStatus,
    pub assignments: Vec<Assignment>,
    pub stats: SolveStats,
}

impl SolveResult {
    pub fn is_decodable(&self) -> bool {
        matches!(self.status, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}
