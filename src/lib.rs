use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod admin;
pub mod config;
pub mod db;
pub mod document;
pub mod pendaftar;
pub mod seeder;
pub mod storage;

pub use crate::db::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::seeder::handlers::run_seeder,
        crate::seeder::handlers::seeder_status,
        crate::admin::handlers::wipe_all
    ),
    components(schemas(
        seeder::models::SeedRequest,
        seeder::models::SeedResponse,
        admin::WipeResponse,
        admin::WipeStorageSummary,
        admin::WipeDbSummary,
        ErrorResponse,
    )),
    tags(
        (name = "Seeder", description = "Synthetic pendaftar seeding."),
        (name = "Admin", description = "Reset of seeded data.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Local seeder")
    )
)]
pub struct ApiDoc;

/// Installs `env_logger`, defaulting `RUST_LOG` to `info`.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Registers every `/api` route on `cfg`.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(seeder::handlers::config)
            .configure(admin::handlers::config),
    );
}

pub async fn run() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let seeder_config = match config::SeederConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Refusing to start: {}", e);
            std::process::exit(1);
        }
    };
    let bind_addr = (seeder_config.host.clone(), seeder_config.port);

    let app_state = match AppState::new_with_config(seeder_config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to build Supabase clients: {}", e);
            std::process::exit(1);
        }
    };
    if app_state.config.admin_wipe_token.is_none() {
        log::warn!("ADMIN_WIPE_TOKEN is not set; /api/admin/wipe will reject every request");
    }

    let prometheus = PrometheusMetricsBuilder::new("ppdb_seeder")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!("Starting seeder API at http://{}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::ACCEPT,
                header::CONTENT_TYPE,
                header::HeaderName::from_static(admin::ADMIN_TOKEN_HEADER),
            ])
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(api_config)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind_addr)?
    .run()
    .await
}
