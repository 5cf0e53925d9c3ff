pub mod admin;
pub mod notes;
pub mod leaders;
pub mod sessions;
pub mod directory;
pub mod certificates;
