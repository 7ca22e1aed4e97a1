use dotenvy::dotenv;
use production_scheduler::application::seed::seed_demo_data;
use production_scheduler::application::Services;
use production_scheduler::config::AppConfig;
use production_scheduler::errors::StartupError;
use production_scheduler::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.pool_size)?;
    run_migrations(&pool)?;

    let services = Services::with_pool(pool);
    if config.seed_demo_data && !seed_demo_data(&services)? {
        log::info!("database already has resources, demo data not seeded");
    }

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(services, &config.host, config.port)?.await?;
    Ok(())
}
