use log::*;
use sqlx::{migrate, migrate::MigrateDatabase, Sqlite};

use crate::SqliteDatabase;

/// Creates a fresh sqlite database at `url` and brings its schema up to date. Any database
/// already sitting at that path is dropped first.
pub async fn prepare_test_env(url: &str) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    if let Err(e) = Sqlite::drop_database(url).await {
        warn!("🚀️ Could not drop old database {url}: {e:?}");
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error connecting to database");
    migrate!("./src/sqlite/migrations").run(db.pool()).await.expect("Error running DB migrations");
    info!("🚀️ Fresh test database ready at {url}");
}

/// A unique path under `data/` so that tests running in parallel never share a store.
pub fn random_db_path() -> String {
    format!("sqlite://../data/lms_test_{}", rand::random::<u64>())
}
