pub mod database;
pub mod extract;

pub use common::utils::error;
