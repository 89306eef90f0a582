use std::str::FromStr;

use brad_os::api::routes::create_routes;
use brad_os::config::{run_migrations, AppConfig, DatabaseConfig};
use tokio::net::TcpListener;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Initialize tracing
    let level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    // Connect to the database and bring the schema up to date
    let db_config = DatabaseConfig::from_env()?;
    let db = db_config.create_pool().await?;
    run_migrations(&db).await?;

    // Create the application routes
    let app = create_routes(db);

    // Start the server
    let listener = TcpListener::bind(config.server_address()).await?;
    info!("Brad OS server starting on http://{}", config.server_address());
    info!(
        "Health check available at http://{}/health",
        config.server_address()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
