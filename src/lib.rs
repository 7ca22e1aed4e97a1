pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::Services;
use errors::StartupError;
use handlers::{dashboard, orders, resources};

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), StartupError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    log::info!("applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Register services, extractor configs and every route on `cfg`.
///
/// Shared by the real server and the in-process HTTP tests.
pub fn configure_app(cfg: &mut web::ServiceConfig, services: &Services) {
    cfg.app_data(web::Data::from(services.resources.clone()))
        .app_data(web::Data::from(services.orders.clone()))
        .app_data(web::Data::from(services.dashboard.clone()))
        .app_data(handlers::json_config())
        .app_data(handlers::query_config())
        .app_data(handlers::path_config())
        .route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/api/resources")
                .route("", web::get().to(resources::list_resources))
                .route("", web::post().to(resources::create_resource))
                .route("", web::put().to(resources::update_resource))
                .route("", web::delete().to(resources::delete_resource))
                .route("/{id}", web::get().to(resources::get_resource)),
        )
        .service(
            web::scope("/api/orders")
                .route("", web::get().to(orders::list_orders))
                .route("", web::post().to(orders::create_order))
                .route("", web::put().to(orders::update_order))
                .route("", web::delete().to(orders::delete_order))
                .route("/check", web::post().to(orders::check_order))
                .route("/{id}", web::get().to(orders::get_order)),
        )
        .route("/api/dashboard", web::get().to(dashboard::get_dashboard))
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    services: Services,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(|cfg| configure_app(cfg, &services))
    })
    .bind((host.to_string(), port))?
    .run())
}
