//! HTTP handlers.

use crate::error::ApiError;
use crate::state::AppState;
use actix_web::{get, post, web, HttpResponse};
use askdocs_core::AppError;
use serde::Deserialize;
use serde_json::json;

/// Inbound question payload.
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

#[post("/")]
pub async fn ask(
    request: web::Json<QuestionRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let question = request
        .question
        .as_deref()
        .filter(|question| !question.is_empty())
        .ok_or_else(|| {
            ApiError(AppError::Validation(
                "Request must contain 'question' field".to_string(),
            ))
        })?;

    let answer = state.pipeline.answer(question).await?;
    Ok(HttpResponse::Ok().json(answer))
}

/// Shape malformed JSON payloads like every other client error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response =
            HttpResponse::BadRequest().json(json!({ "message": err.to_string() }));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}
