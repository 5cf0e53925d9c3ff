pub mod utils;
pub mod models;
pub mod tally;
pub mod database;

pub use utils::{Config, Result, ApiError};
pub use database::{DbPool, ConnectionManager, create_pool, run_migrations};
pub use tally::Directory;
