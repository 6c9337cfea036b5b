use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::submission::{RecordId, StoredSubmission};
use crate::recommendation::catalog::{catalog, Catalog};
use crate::recommendation::form::SubmissionForm;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IdentifierQuery {
    pub identifier: Option<String>,
}

impl IdentifierQuery {
    fn identifier(&self) -> &str {
        self.identifier.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub record_id: RecordId,
    pub identifier: String,
    pub generated_report: String,
    pub generation_succeeded: bool,
    pub document_base64: String,
    pub filename: String,
}

/// GET /api/v1/catalog
pub async fn handle_catalog() -> Json<Catalog> {
    Json(catalog())
}

/// POST /api/v1/submissions
pub async fn handle_submit(
    State(state): State<AppState>,
    WithRejection(Json(form), _): WithRejection<Json<SubmissionForm>, AppError>,
) -> Result<(StatusCode, Json<SubmissionResponse>), AppError> {
    let outcome = state.pipeline.submit_and_render(form).await?;
    let submission = outcome.submission;
    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            record_id: submission.record_id,
            identifier: submission.identifier,
            generated_report: submission.generated_report,
            generation_succeeded: submission.generation_succeeded,
            document_base64: outcome.document.base64,
            filename: state.config.report_filename.clone(),
        }),
    ))
}

/// GET /api/v1/submissions/:id
pub async fn handle_get_submission(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<RecordId>, AppError>,
) -> Result<Json<StoredSubmission>, AppError> {
    Ok(Json(state.pipeline.record(id).await?))
}

/// GET /api/v1/submissions/latest?identifier=
pub async fn handle_latest(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<IdentifierQuery>, AppError>,
) -> Result<Json<StoredSubmission>, AppError> {
    let record = state.pipeline.latest_record(params.identifier()).await?;
    Ok(Json(record))
}

/// GET /api/v1/submissions/latest/report.pdf?identifier=
pub async fn handle_latest_document(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<IdentifierQuery>, AppError>,
) -> Result<Response, AppError> {
    let view = state.pipeline.latest_report(params.identifier()).await?;
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        state.config.report_filename
    ))
    .context("REPORT_FILENAME is not a valid header value")?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        view.document.bytes,
    )
        .into_response())
}
