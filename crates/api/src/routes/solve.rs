use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use types::{CurriculaRecord, EngineConfig, RoomRecord};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct SolveIn {
    pub rooms: Vec<RoomRecord>,
    pub curricula: CurriculaRecord,
    #[serde(default)]
    pub config: EngineConfig,
}

#[derive(Serialize, ToSchema)]
pub struct JobCreated {
    #[serde(rename = "jobId")]
    pub job_id: String,
    pub status: &'static str,
}

#[utoipa::path(
    post,
    path = "/v1/solve",
    request_body = SolveIn,
    responses(
        (status = 200, description = "Job enqueued", body = JobCreated),
        (status = 400, description = "Malformed ingest input")
    )
)]
pub async fn solve(
    State(state): State<AppState>,
    Json(body): Json<SolveIn>,
) -> Result<Json<JobCreated>, ApiError> {
    let problem = sched_core::build(body.rooms, body.curricula).map_err(|e| ApiError(e.to_string()))?;
    let id = state.jobs.enqueue(problem, body.config);
    Ok(Json(JobCreated {
        job_id: id.0,
        status: "queued",
    }))
}
