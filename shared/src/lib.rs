pub mod config;
pub mod database;
pub mod logging;

pub use config::Settings;
pub use database::{create_connection_pool, ping, run_sql, run_sql_file, DbPool};
pub use logging::init_tracing;
