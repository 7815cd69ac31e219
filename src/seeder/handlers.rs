use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{web, HttpRequest, HttpResponse, Responder};

use super::models::{SeedRequest, SeedResponse, READY_MESSAGE};
use super::{validate_count, SeedOptions, Seeder};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/seeder",
    tag = "Seeder",
    request_body = SeedRequest,
    responses(
        (status = 200, description = "Seeding finished; per-record outcomes are in the logs", body = SeedResponse),
        (status = 400, description = "Record count outside 0..=500 or malformed body", body = SeedResponse)
    )
)]
pub async fn run_seeder(
    state: web::Data<AppState>,
    request: web::Json<SeedRequest>,
) -> impl Responder {
    let request = request.into_inner();

    let count = match validate_count(request.count_or_default()) {
        Ok(count) => count,
        Err(e) => {
            log::warn!("Rejected seeder request: {}", e);
            return HttpResponse::BadRequest().json(SeedResponse::failed(e.to_string(), Vec::new()));
        }
    };

    let options = SeedOptions {
        count,
        with_files: request.with_files_or_default(),
        ..SeedOptions::default()
    };
    let report = Seeder::new(&state).run(&options).await;
    HttpResponse::Ok().json(SeedResponse::from(report))
}

#[utoipa::path(
    get,
    path = "/api/seeder",
    tag = "Seeder",
    responses(
        (status = 200, description = "Readiness message", body = String, content_type = "text/plain")
    )
)]
pub async fn seeder_status() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(READY_MESSAGE)
}

/// Malformed bodies get the same `{success, error, logs}` shape as other failures.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(SeedResponse::failed(err.to_string(), Vec::new()));
    InternalError::from_response(err, response).into()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/seeder")
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .route(web::get().to(seeder_status))
            .route(web::post().to(run_seeder)),
    );
}
