use parking_lot::RwLock;
use sched_core::{decode, EngineConfig, ScheduleProblem, Solver};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;
use types::{SolveStats, SolveStatus, Timetable};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct JobId(pub String);

/// A finished solve, decoded eagerly: `Optimal`/`Feasible` carry a
/// `Timetable`, `Infeasible`/`Unknown` carry `None` (spec.md §4.5 — only the
/// two solved statuses reach the `decode` phase).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct JobOutcome {
    pub status: SolveStatus,
    pub stats: SolveStats,
    pub timetable: Option<Timetable>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, ToSchema)]
#[serde(tag = "status")]
pub enum JobStatus {
    Queued,
    Running,
    Done { outcome: JobOutcome },
    Failed { message: String },
}

/// An in-memory, best-effort job queue: each `enqueue` spawns one task on
/// the Tokio runtime and records its terminal state. No persistence and no
/// retry — a process restart loses every in-flight job, matching the
/// engine's own "stateless between runs" contract (spec.md §6).
#[derive(Clone)]
pub struct InMemJobs<S: Solver> {
    inner: Arc<RwLock<HashMap<String, JobStatus>>>,
    solver: Arc<S>,
}

impl<S: Solver> InMemJobs<S> {
    pub fn new(solver: S) -> Self {
        Self {
            inner: Default::default(),
            solver: Arc::new(solver),
        }
    }

    pub fn enqueue(&self, problem: ScheduleProblem, config: EngineConfig) -> JobId {
        let id = Uuid::new_v4().to_string();
        self.inner.write().insert(id.clone(), JobStatus::Queued);

        let map = self.inner.clone();
        let solver = self.solver.clone();
        let id_for_task = id.clone();

        tokio::spawn(async move {
            {
                let mut w = map.write();
                w.insert(id_for_task.clone(), JobStatus::Running);
            }
            let next = match solver.solve(&problem, &config).await {
                Ok(result) if result.is_decodable() => {
                    match decode::decode(&problem, &result.assignments) {
                        Ok(timetable) => JobStatus::Done {
                            outcome: JobOutcome {
                                status: result.status,
                                stats: result.stats,
                                timetable: Some(timetable),
                            },
                        },
                        Err(e) => {
                            error!(?e, "decode failed");
                            JobStatus::Failed {
                                message: e.to_string(),
                            }
                        }
                    }
                }
                Ok(result) => JobStatus::Done {
                    outcome: JobOutcome {
                        status: result.status,
                        stats: result.stats,
                        timetable: None,
                    },
                },
                Err(e) => {
                    error!(?e, "job failed");
                    JobStatus::Failed {
                        message: e.to_string(),
                    }
                }
            };
            map.write().insert(id_for_task, next);
        });

        JobId(id)
    }

    pub fn get(&self, id: &str) -> Option<JobStatus> {
        self.inner.read().get(id).cloned()
    }
}
