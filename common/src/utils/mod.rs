pub mod error;
pub mod config;

pub use config::Config;
pub use error::{Result, ApiError};
