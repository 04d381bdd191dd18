use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde::Deserialize;

use crate::dto::api::{ErrorResponse, ImagesResponse};
use crate::forms::search::{SearchParams, SearchPayload};
use crate::models::config::ServerConfig;
use crate::repository::InMemoryRepository;
use crate::routes::{detect_platform, json_error, simulate_latency};
use crate::services::gallery::{resolve_page_size, search_images};
use crate::services::images::{get_image, list_categories};
use crate::services::suggestions::suggest_queries;

#[get("/v1/images")]
pub async fn api_v1_images(
    req: HttpRequest,
    params: web::Query<SearchParams>,
    repo: web::Data<InMemoryRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let payload = match SearchPayload::try_from(params.into_inner()) {
        Ok(payload) => payload,
        Err(err) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: err.to_string(),
            });
        }
    };

    simulate_latency(&server_config).await;

    let (_, per_page) =
        resolve_page_size(&payload, server_config.page_sizes(), detect_platform(&req));

    match search_images(repo.get_ref(), &payload, per_page) {
        Ok(result) => HttpResponse::Ok().json(ImagesResponse::from(result)),
        Err(err) => json_error(&err),
    }
}

#[get("/v1/images/{image_id}")]
pub async fn api_v1_image(
    image_id: web::Path<u32>,
    repo: web::Data<InMemoryRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    simulate_latency(&server_config).await;

    match get_image(repo.get_ref(), image_id.into_inner()) {
        Ok(image) => HttpResponse::Ok().json(image),
        Err(err) => json_error(&err),
    }
}

#[derive(Deserialize)]
struct SuggestionsQueryParams {
    #[serde(default)]
    q: String,
}

#[get("/v1/suggestions")]
pub async fn api_v1_suggestions(params: web::Query<SuggestionsQueryParams>) -> impl Responder {
    HttpResponse::Ok().json(suggest_queries(&params.q))
}

#[get("/v1/categories")]
pub async fn api_v1_categories(repo: web::Data<InMemoryRepository>) -> impl Responder {
    match list_categories(repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => json_error(&err),
    }
}
