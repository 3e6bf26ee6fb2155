use dotenv::dotenv;
use lcv_alloc::config::constant::DEFAULT_DATABASE_URL;
use lcv_alloc::database::sqlx::db_connection;
use lcv_alloc::database::SqliteVehicleRegistry;
use lcv_alloc::fixtures::default_fleet;
use lcv_alloc::solver::greedy::run::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let registry = SqliteVehicleRegistry::new(db_connection(&database_url).await?);
    registry.reset_fleet(&default_fleet()).await?;

    for lcv in registry.list_vehicles().await? {
        info!("LCV in DB: {}, Capacity: {}", lcv.id, lcv.capacity);
    }
    Ok(())
}
