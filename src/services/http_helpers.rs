use actix_web::{
    http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType},
    HttpResponse,
};

use crate::errors::AppResult;

/// Pretty-printed JSON offered as a file download
pub fn json_attachment<T: serde::Serialize>(data: &T, file_name: &str) -> AppResult<HttpResponse> {
    let body = serde_json::to_string_pretty(data)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name.to_string())],
        })
        .body(body))
}

/// Creates a success JSON response
pub fn success_json<T: serde::Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(data)
}
