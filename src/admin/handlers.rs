use actix_web::{web, HttpRequest, HttpResponse, Responder};

use super::{token_matches, wipe, WipeResponse, ADMIN_TOKEN_HEADER};
use crate::{AppState, ErrorResponse};

#[utoipa::path(
    post,
    path = "/api/admin/wipe",
    tag = "Admin",
    params(
        ("x-admin-token" = String, Header, description = "Must equal ADMIN_WIPE_TOKEN")
    ),
    responses(
        (status = 200, description = "Bucket emptied and tables truncated", body = WipeResponse),
        (status = 401, description = "Missing or wrong admin token", body = ErrorResponse),
        (status = 500, description = "Wipe failed", body = ErrorResponse)
    )
)]
pub async fn wipe_all(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let provided = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    if !token_matches(state.config.admin_wipe_token.as_deref(), provided) {
        log::warn!("Rejected wipe request with missing or wrong token");
        return HttpResponse::Unauthorized()
            .json(ErrorResponse::new("Unauthorized", "Invalid admin token"));
    }

    match wipe(&state).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => {
            log::error!("Wipe failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/admin/wipe").route(web::post().to(wipe_all)));
}
