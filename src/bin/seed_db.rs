//! Seeds a development database with a department, a professor, students,
//! and an enrolled class. Destructive only in the sense that it inserts;
//! run it against a freshly migrated database.
use log::{error, info};
use service::config::Config;
use service::logging::Logger;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    info!("Seeding development data into [{}]", config.database_url());

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    entity_api::seed_database(db.as_ref()).await;

    info!("Seeding complete");
}
