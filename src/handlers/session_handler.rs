use actix_web::{delete, get, post, web, HttpResponse};
use uuid::Uuid;

use crate::{app_state::AppState, errors::AppError, services::http_helpers::success_json};

#[post("/api/sessions")]
pub async fn create_session(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let session = state.mcq_service.create_session().await?;
    Ok(HttpResponse::Created().json(session))
}

#[get("/api/sessions/{id}")]
pub async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.mcq_service.get_session(&id).await?;
    Ok(success_json(session))
}

#[delete("/api/sessions/{id}")]
pub async fn delete_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let response = state.mcq_service.delete_session(&id).await?;
    Ok(success_json(response))
}

#[get("/api/sessions/{id}/progress")]
pub async fn get_progress(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let progress = state.mcq_service.progress(&id).await?;
    Ok(success_json(progress))
}
