mod migrations;
mod models;
mod repository;

pub use migrations::run_migrations;
pub use models::{BlacklistEntry, Profile};
pub use repository::Repository;
