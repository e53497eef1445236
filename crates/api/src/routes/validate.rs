use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use types::{CurriculaRecord, RoomRecord};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct ValidateIn {
    pub rooms: Vec<RoomRecord>,
    pub curricula: CurriculaRecord,
}

#[derive(Serialize, ToSchema)]
pub struct ValidationReport {
    pub ok: bool,
    pub num_classes: usize,
    pub num_courses: usize,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/v1/validate",
    request_body = ValidateIn,
    responses((status = 200, description = "Validation result", body = ValidationReport))
)]
pub async fn validate_handler(Json(body): Json<ValidateIn>) -> (StatusCode, Json<ValidationReport>) {
    match sched_core::build(body.rooms, body.curricula) {
        Ok(problem) => (
            StatusCode::OK,
            Json(ValidationReport {
                ok: true,
                num_classes: problem.num_classes(),
                num_courses: problem.total_courses(),
                errors: vec![],
            }),
        ),
        Err(e) => (
            StatusCode::OK,
            Json(ValidationReport {
                ok: false,
                num_classes: 0,
                num_courses: 0,
                errors: vec![e.to_string()],
            }),
        ),
    }
}
