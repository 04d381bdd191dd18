use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use tera::{Context, Tera};

use crate::domain::types::{Category, Orientation, SizeFilter};
use crate::forms::search::{SearchParams, SearchPayload};
use crate::models::config::ServerConfig;
use crate::repository::InMemoryRepository;
use crate::routes::{detect_platform, render_template, simulate_latency, status_for};
use crate::services::ServiceError;
use crate::services::gallery::load_gallery_page;

#[get("/")]
pub async fn show_gallery(
    req: HttpRequest,
    params: web::Query<SearchParams>,
    repo: web::Data<InMemoryRepository>,
    tera: web::Data<Tera>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let payload = match SearchPayload::try_from(params.into_inner()) {
        Ok(payload) => payload,
        Err(err) => {
            log::warn!("Rejected gallery query: {err}");
            return HttpResponse::BadRequest().body(err.to_string());
        }
    };

    simulate_latency(&server_config).await;

    let data = match load_gallery_page(
        repo.get_ref(),
        &payload,
        server_config.page_sizes(),
        detect_platform(&req),
    ) {
        Ok(data) => data,
        Err(err @ ServiceError::InvalidPage { .. }) => {
            log::warn!("Gallery page out of range: {err}");
            return HttpResponse::NotFound().body(err.to_string());
        }
        Err(err) => {
            log::error!("Failed to load gallery: {err}");
            return HttpResponse::build(status_for(&err)).finish();
        }
    };

    let page_query = match serde_html_form::to_string(payload.link_params()) {
        Ok(query) => query,
        Err(err) => {
            log::error!("Failed to encode page links: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = Context::new();
    context.insert("current_page", "gallery");
    context.insert("gallery", &data);
    context.insert("page_query", &page_query);
    context.insert("categories", Category::ALL);
    context.insert("orientations", Orientation::ALL);
    context.insert("sizes", SizeFilter::ALL);

    render_template(&tera, "gallery/index.html", &context)
}
