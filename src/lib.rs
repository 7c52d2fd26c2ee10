use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use env_logger::Env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod assembler;
pub mod auth;
pub mod config;
pub mod db;
pub mod download;
pub mod error;
pub mod job;
pub mod material;
pub mod orchestrator;
pub mod storage;
pub mod template;

pub use crate::db::AppState;
pub use crate::error::{ApiError, ErrorResponse};

/// Route table for the whole API, mounted under `/api`. Kept separate from
/// [`run`] so integration tests can build an in-process service around it.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/jobs")
            .route(web::get().to(job::handlers::get_all_jobs))
            .route(web::post().to(job::handlers::create_job)),
    )
    .service(web::resource("/jobs/{id}").route(web::get().to(job::handlers::get_job_by_id)))
    .service(web::resource("/jobs/{id}/retry").route(web::post().to(job::handlers::retry_job)))
    .service(web::resource("/jobs/{id}/cancel").route(web::post().to(job::handlers::cancel_job)))
    .service(
        web::resource("/jobs/{id}/materials")
            .route(web::get().to(material::handlers::get_materials_for_job)),
    )
    .service(
        web::resource("/materials/{id}")
            .route(web::get().to(material::handlers::get_material_by_id)),
    )
    .service(web::resource("/download").route(web::get().to(download::download_material)));
}

pub async fn run() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    #[derive(OpenApi)]
    #[openapi(
        paths(
            crate::job::handlers::create_job,
            crate::job::handlers::get_all_jobs,
            crate::job::handlers::get_job_by_id,
            crate::job::handlers::retry_job,
            crate::job::handlers::cancel_job,
            crate::material::handlers::get_materials_for_job,
            crate::material::handlers::get_material_by_id,
            crate::download::download_material
        ),
        components(
            schemas(
                job::models::Job,
                job::models::JobStatus,
                job::models::JobMetadata,
                job::models::Language,
                job::models::Level,
                job::models::Audience,
                job::models::Tone,
                job::models::TrainingContext,
                job::models::CreateJobRequest,
                material::models::Material,
                material::models::MaterialType,
                material::models::MaterialFormat,
                ErrorResponse,
            )
        ),
        tags(
            (name = "Job Service", description = "Generation job lifecycle endpoints."),
            (name = "Material Service", description = "Generated material metadata endpoints."),
            (name = "Download Gateway", description = "Authorized material downloads.")
        ),
        servers(
            (url = "http://127.0.0.1:8080", description = "Localhost server")
        )
    )]
    struct ApiDoc;

    dotenvy::dotenv().ok(); // Load .env file

    let app_config = match crate::config::AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    let supabase_config = match crate::config::SupabaseConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let bind_address = app_config.bind_address.clone();
    let app_state = match AppState::new_with_config(app_config, supabase_config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("Failed to connect to database. Please check your DATABASE_URL in .env and ensure the database is running. Error: {}", e);
            std::process::exit(1);
        }
    };

    let prometheus = PrometheusMetricsBuilder::new("coursegen_server")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus metrics middleware");

    log::info!(
        "Starting server at http://{}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let app_state = app_state.clone();
        let prometheus = prometheus.clone();
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:8080")
            .allowed_origin("http://127.0.0.1:8080")
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus)
            .wrap(cors)
            .app_data(app_state)
            .service(web::scope("/api").configure(configure_api))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
    })
    .backlog(8192)
    .max_connections(25000)
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind(bind_address)?
    .run()
    .await
}
