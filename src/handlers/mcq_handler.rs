use actix_web::{get, post, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    constants::mcq_prompt::EXPORT_FILE_NAME,
    errors::AppError,
    models::dto::request::{ExportParams, GenerateParams, SearchParams},
    services::http_helpers::{json_attachment, success_json},
};

/// Body is the raw PDF upload; generation knobs arrive as query parameters.
#[post("/api/sessions/{id}/generate")]
pub async fn generate_mcqs(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    params: web::Query<GenerateParams>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let settings = params.into_inner().into_settings(&state.config)?;
    let response = state.mcq_service.generate(&id, &body, settings).await?;
    Ok(success_json(response))
}

#[get("/api/sessions/{id}/search")]
pub async fn search_mcqs(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    params: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
    params.validate()?;
    let limit = params.limit(&state.config);
    let response = state.mcq_service.search(&id, &params.q, limit).await?;
    Ok(success_json(response))
}

#[get("/api/sessions/{id}/export")]
pub async fn export_mcqs(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    params: web::Query<ExportParams>,
) -> Result<HttpResponse, AppError> {
    let records = state.mcq_service.export(&id, params.scope).await?;
    json_attachment(&records, EXPORT_FILE_NAME)
}
