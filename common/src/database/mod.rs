pub mod manager;
pub mod connection;
pub mod rows;
pub mod queries;

pub use manager::ConnectionManager;
pub use connection::{DbPool, build_pool, create_pool, run_migrations};
