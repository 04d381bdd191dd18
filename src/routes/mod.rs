//! HTTP handlers and the helpers they share.

use std::time::Duration;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse};
use tera::{Context, Tera};

use crate::domain::types::Platform;
use crate::dto::api::ErrorResponse;
use crate::models::config::ServerConfig;
use crate::services::ServiceError;

pub mod api;
pub mod main;

/// Renders `template` or logs the failure and answers 500.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::Form(_) | ServiceError::TypeConstraint(_) | ServiceError::InvalidPage { .. } => {
            StatusCode::BAD_REQUEST
        }
        ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// JSON `{ "error": ... }` body with the status matching `err`.
pub fn json_error(err: &ServiceError) -> HttpResponse {
    let status = status_for(err);
    if status.is_server_error() {
        log::error!("Request failed: {err}");
        // internal details stay in the log
        return HttpResponse::build(status).json(ErrorResponse {
            error: "internal error".to_string(),
        });
    }
    HttpResponse::build(status).json(ErrorResponse {
        error: err.to_string(),
    })
}

/// Platform guessed from the `User-Agent` header, desktop when absent.
pub fn detect_platform(req: &HttpRequest) -> Platform {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map_or(Platform::Desktop, Platform::detect)
}

/// Sleeps for the configured data source latency.
pub async fn simulate_latency(server_config: &ServerConfig) {
    if server_config.simulated_latency_ms > 0 {
        actix_web::rt::time::sleep(Duration::from_millis(server_config.simulated_latency_ms)).await;
    }
}
